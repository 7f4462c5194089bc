use super::{is_hidden, Category};
use crate::error::{LazyClaudeError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Lists the non-hidden subdirectories of the global store as categories,
/// sorted by name.
///
/// # Errors
/// * `StoreUnavailable` - if `global_root` cannot be listed
pub fn list_categories(global_root: &Path, project_root: &Path) -> Result<Vec<Category>> {
    let entries =
        fs::read_dir(global_root).map_err(|source| LazyClaudeError::StoreUnavailable {
            path: global_root.to_path_buf(),
            source,
        })?;

    let mut categories = Vec::new();
    for entry in entries {
        // Skip entries that cannot be read
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let name = entry.file_name();
        // `Path::is_dir` follows links, so a symlinked category directory counts
        if is_hidden(&name) || !entry.path().is_dir() {
            continue;
        }

        categories.push(Category::new(&name, global_root, project_root));
    }

    categories.sort_by(|a, b| a.global_dir.cmp(&b.global_dir));
    debug!(count = categories.len(), root = %global_root.display(), "listed categories");
    Ok(categories)
}

/// Startup discovery: like [`list_categories`], but an empty store is an error
/// because there is nothing to manage.
///
/// # Errors
/// * `StoreUnavailable` - if `global_root` cannot be listed
/// * `NoCategories` - if it has no non-hidden subdirectories
pub fn discover_categories(global_root: &Path, project_root: &Path) -> Result<Vec<Category>> {
    let categories = list_categories(global_root, project_root)?;
    if categories.is_empty() {
        return Err(LazyClaudeError::NoCategories {
            path: global_root.to_path_buf(),
        });
    }
    Ok(categories)
}
