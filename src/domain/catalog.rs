use super::classifier::classify;
use super::{is_hidden, Category, Item};
use crate::error::{LazyClaudeError, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use tracing::{debug, warn};

/// The two halves of one category after a refresh, each sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    pub available: Vec<Item>,
    pub applied: Vec<Item>,
}

impl ItemCatalog {
    pub fn len(&self) -> usize {
        self.available.len() + self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.applied.is_empty()
    }

    fn push(&mut self, item: Item, applied: bool) {
        if applied {
            self.applied.push(item);
        } else {
            self.available.push(item);
        }
    }
}

/// Builds the catalog for `category`, classifying every visible entry of its
/// global directory against the project directory.
///
/// Links in the project directory whose global item no longer exists are
/// classified under their own name as well, so a link left behind by a
/// deleted resource is reclaimed. Links pointing anywhere else stay.
///
/// # Errors
/// * `CategoryUnreadable` - if the global directory cannot be listed
pub fn try_list_items(category: &Category) -> Result<ItemCatalog> {
    let entries = fs::read_dir(&category.global_dir).map_err(|source| {
        LazyClaudeError::CategoryUnreadable {
            path: category.global_dir.clone(),
            source,
        }
    })?;

    let mut catalog = ItemCatalog::default();
    let mut seen = HashSet::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let file_name = entry.file_name();
        if is_hidden(&file_name) {
            continue;
        }

        let item = Item::new(file_name.clone(), entry.path().is_dir(), category);
        let state = classify(&category.link_path(&item), &item.global_path);
        seen.insert(file_name);
        catalog.push(item, state.is_applied());
    }
    reclaim_stale_links(category, &seen);

    catalog.available.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    catalog.applied.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(catalog)
}

/// Classifies project-side links with no global counterpart. Only a link
/// that targets `global_dir/<name>` is dangling here and gets deleted.
fn reclaim_stale_links(category: &Category, seen: &HashSet<OsString>) {
    // A project directory that does not exist yet has nothing to reclaim
    let Ok(entries) = fs::read_dir(&category.project_dir) else {
        return;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let file_name = entry.file_name();
        if seen.contains(&file_name) || is_hidden(&file_name) {
            continue;
        }
        let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
        if !is_symlink {
            continue;
        }
        let state = classify(&entry.path(), &category.global_dir.join(&file_name));
        if state.cleaned_up() {
            debug!(
                category = %category.name,
                link = %entry.path().display(),
                "reclaimed link to deleted resource"
            );
        }
    }
}

/// Like [`try_list_items`], but an unreadable category yields an empty
/// catalog so the session keeps running.
pub fn list_items(category: &Category) -> ItemCatalog {
    try_list_items(category).unwrap_or_else(|e| {
        warn!(category = %category.name, error = %e, "category unreadable");
        ItemCatalog::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn category_in(temp: &TempDir) -> Category {
        let category = Category::new(
            "agents",
            &temp.path().join("store"),
            &temp.path().join("project"),
        );
        fs::create_dir_all(&category.global_dir).unwrap();
        category
    }

    #[test]
    fn test_all_available_without_links() {
        let temp = TempDir::new().unwrap();
        let category = category_in(&temp);
        fs::write(category.global_dir.join("zeta.md"), "z").unwrap();
        fs::write(category.global_dir.join("alpha.md"), "a").unwrap();
        fs::create_dir(category.global_dir.join("mid")).unwrap();
        fs::write(category.global_dir.join(".secret"), "s").unwrap();

        let catalog = list_items(&category);
        let names: Vec<&str> = catalog.available.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.md", "mid", "zeta.md"]);
        assert!(catalog.applied.is_empty());
        assert_eq!(catalog.len(), 3);
        assert!(catalog.available[1].is_directory);
        assert!(!catalog.available[0].is_directory);
    }

    #[test]
    fn test_unreadable_category_yields_empty_lists() {
        let temp = TempDir::new().unwrap();
        let category = Category::new("gone", temp.path(), Path::new("/p"));

        assert!(matches!(
            try_list_items(&category),
            Err(LazyClaudeError::CategoryUnreadable { .. })
        ));
        assert!(list_items(&category).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_linked_items_are_applied_and_sorted() {
        let temp = TempDir::new().unwrap();
        let category = category_in(&temp);
        for name in ["c.md", "a.md", "b.md"] {
            fs::write(category.global_dir.join(name), name).unwrap();
        }
        fs::create_dir_all(&category.project_dir).unwrap();
        for name in ["c.md", "a.md"] {
            std::os::unix::fs::symlink(
                category.global_dir.join(name),
                category.project_dir.join(name),
            )
            .unwrap();
        }

        let catalog = list_items(&category);
        let applied: Vec<&str> = catalog.applied.iter().map(|i| i.name.as_str()).collect();
        let available: Vec<&str> = catalog.available.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(applied, vec!["a.md", "c.md"]);
        assert_eq!(available, vec!["b.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_to_deleted_resource_is_reclaimed() {
        let temp = TempDir::new().unwrap();
        let category = category_in(&temp);
        fs::create_dir_all(&category.project_dir).unwrap();
        let stale = category.project_dir.join("removed.md");
        std::os::unix::fs::symlink(category.global_dir.join("removed.md"), &stale).unwrap();

        assert!(list_items(&category).is_empty());
        assert!(fs::symlink_metadata(&stale).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_foreign_link_without_resource_survives() {
        let temp = TempDir::new().unwrap();
        let category = category_in(&temp);
        fs::create_dir_all(&category.project_dir).unwrap();
        let foreign = category.project_dir.join("theirs.md");
        std::os::unix::fs::symlink(temp.path().join("elsewhere").join("theirs.md"), &foreign)
            .unwrap();
        fs::write(category.project_dir.join("local.md"), "local").unwrap();

        assert!(list_items(&category).is_empty());
        assert!(fs::symlink_metadata(&foreign).is_ok());
        assert!(category.project_dir.join("local.md").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_item_stays_in_partition() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let category = category_in(&temp);
        let raw = OsStr::from_bytes(b"b\xff.md");
        fs::write(category.global_dir.join("a.md"), "a").unwrap();
        fs::write(category.global_dir.join(raw), "b").unwrap();

        let catalog = list_items(&category);
        assert_eq!(catalog.len(), 2);
        let odd = catalog.available[1].clone();
        assert_eq!(odd.file_name.as_os_str(), raw);
        assert_eq!(odd.name, "b\u{FFFD}.md");

        crate::domain::apply(&category, &odd).unwrap();
        assert_eq!(
            fs::read_link(category.project_dir.join(raw)).unwrap(),
            category.global_dir.join(raw)
        );
        let catalog = list_items(&category);
        assert_eq!(catalog.applied, vec![odd]);
    }
}
