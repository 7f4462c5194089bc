//! LazyClaude - curate which shared resources are active in a project
//!
//! Resources live in category directories of a global store. A resource is
//! applied to a project when the project's managed directory holds a symlink
//! to it. This crate provides the reconciliation engine that classifies
//! resources from disk and applies/removes links, plus the terminal front end.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod paths;
pub mod preview;
pub mod tree;
pub mod tui;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use domain::{
    apply, classify, discover_categories, list_categories, list_items, remove, try_list_items,
    Category, Item, ItemCatalog, LinkState,
};
pub use error::{LazyClaudeError, Result};
pub use paths::ResolvedPaths;
pub use tree::DirTree;
