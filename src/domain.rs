//! Resource model and the reconciliation engine
//!
//! The filesystem is the only source of truth: an [`Item`] never stores
//! whether it is applied. Every refresh goes back to disk through
//! [`classifier::classify`].

pub mod catalog;
pub mod classifier;
pub mod discovery;
pub mod mutator;

pub use catalog::{list_items, try_list_items, ItemCatalog};
pub use classifier::{classify, LinkState};
pub use discovery::{discover_categories, list_categories};
pub use mutator::{apply, remove};

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A named group of resources, one subdirectory of the global store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Directory basename for display, e.g. `agents`
    pub name: String,
    /// Absolute path of the category inside the global store
    pub global_dir: PathBuf,
    /// Absolute path of the category inside the project (may not exist)
    pub project_dir: PathBuf,
}

impl Category {
    /// Builds a category from its on-disk directory name. Non UTF-8 names
    /// keep their exact bytes in both paths.
    pub fn new(dir_name: impl AsRef<OsStr>, global_root: &Path, project_root: &Path) -> Self {
        let dir_name = dir_name.as_ref();
        Self {
            name: dir_name.to_string_lossy().into_owned(),
            global_dir: global_root.join(dir_name),
            project_dir: project_root.join(dir_name),
        }
    }

    /// Where the symlink for `item` lives (or would live) in the project
    pub fn link_path(&self, item: &Item) -> PathBuf {
        self.project_dir.join(&item.file_name)
    }

    /// Category name with its first letter upper-cased, for tab labels
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// One resource inside a category's global directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Display name, lossy when the file name is not valid UTF-8
    pub name: String,
    /// File name exactly as stored on disk
    pub file_name: OsString,
    pub is_directory: bool,
    /// Absolute path of the resource inside the global store
    pub global_path: PathBuf,
}

impl Item {
    pub fn new(file_name: impl Into<OsString>, is_directory: bool, category: &Category) -> Self {
        let file_name = file_name.into();
        Self {
            name: file_name.to_string_lossy().into_owned(),
            global_path: category.global_dir.join(&file_name),
            file_name,
            is_directory,
        }
    }
}

/// Names starting with `.` are never categories, items or tree entries
pub(crate) fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
