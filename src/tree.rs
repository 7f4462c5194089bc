//! Depth-bounded directory tree for previews and the tree overlay

use crate::domain::is_hidden;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Deepest level that is still listed; root children are level 0
pub const MAX_TREE_DEPTH: usize = 3;

const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEntryKind {
    File,
    Directory,
    /// Stands in for the children of a directory past the depth bound
    Truncated,
}

/// One rendered row: branch prefix plus the entry name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub prefix: String,
    pub name: String,
    pub kind: TreeEntryKind,
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TreeEntryKind::Directory => write!(f, "{}{}/", self.prefix, self.name),
            _ => write!(f, "{}{}", self.prefix, self.name),
        }
    }
}

/// A directory tree that reads the filesystem only when formatted or
/// collected. Unreadable directories are rendered as empty.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
    max_depth: usize,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: MAX_TREE_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn lines(&self) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        self.walk(&self.root, "", 0, &mut lines);
        lines
    }

    fn walk(&self, dir: &Path, prefix: &str, depth: usize, out: &mut Vec<TreeLine>) {
        if depth > self.max_depth {
            out.push(TreeLine {
                prefix: prefix.to_string(),
                name: TRUNCATION_MARKER.to_string(),
                kind: TreeEntryKind::Truncated,
            });
            return;
        }

        let entries = visible_entries(dir);
        let count = entries.len();
        for (index, (name, path, is_dir)) in entries.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let (connector, child_prefix) = if is_last {
                ("└── ", format!("{}    ", prefix))
            } else {
                ("├── ", format!("{}│   ", prefix))
            };

            out.push(TreeLine {
                prefix: format!("{}{}", prefix, connector),
                name,
                kind: if is_dir {
                    TreeEntryKind::Directory
                } else {
                    TreeEntryKind::File
                },
            });
            if is_dir {
                self.walk(&path, &child_prefix, depth + 1, out);
            }
        }
    }
}

impl fmt::Display for DirTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Visible children of `dir` sorted by name, as (name, path, is_dir)
fn visible_entries(dir: &Path) -> Vec<(String, PathBuf, bool)> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut entries: Vec<(String, PathBuf, bool)> = read_dir
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let file_name = entry.file_name();
            if is_hidden(&file_name) {
                return None;
            }
            let name = file_name.to_string_lossy().into_owned();
            // Do not follow links while walking, a link cycle would recurse forever
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Some((name, entry.path(), is_dir))
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}
