//! Apply and remove: the only operations that change the link graph on purpose.
//!
//! Neither re-checks classification first. Callers act on items the catalog
//! already classified and refresh the catalog afterwards, whatever the result.

use super::classifier::remove_link_entry;
use super::{Category, Item};
use crate::error::{LazyClaudeError, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Links `item` into the project: `project_dir/<name> -> global_path`.
///
/// Creates `category.project_dir` first if needed. Never copies content.
///
/// # Errors
/// * `LinkCreateFailed` - if anything already occupies the link path, or on
///   any I/O error
pub fn apply(category: &Category, item: &Item) -> Result<()> {
    let link = category.link_path(item);
    let failed = |source: io::Error| LazyClaudeError::LinkCreateFailed {
        link: link.clone(),
        target: item.global_path.clone(),
        source,
    };

    fs::create_dir_all(&category.project_dir).map_err(failed)?;
    create_symlink(&item.global_path, &link, item.is_directory).map_err(failed)?;

    info!(link = %link.display(), target = %item.global_path.display(), "applied");
    Ok(())
}

/// Unlinks `item` from the project.
///
/// Only a symlink is ever deleted. A regular file or directory at the link
/// path is refused, so resource content is never touched.
///
/// # Errors
/// * `LinkRemoveFailed` - if the path does not exist, is not a symlink, or
///   cannot be removed
pub fn remove(category: &Category, item: &Item) -> Result<()> {
    let link = category.link_path(item);
    let failed = |source: io::Error| LazyClaudeError::LinkRemoveFailed {
        link: link.clone(),
        source,
    };

    let metadata = fs::symlink_metadata(&link).map_err(failed)?;
    if !metadata.file_type().is_symlink() {
        return Err(failed(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a symbolic link",
        )));
    }
    remove_link_entry(&link).map_err(failed)?;

    info!(link = %link.display(), "removed");
    Ok(())
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path, _is_directory: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path, is_directory: bool) -> io::Result<()> {
    if is_directory {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
