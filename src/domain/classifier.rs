//! Decides whether a project-side path is an applied link to a global item.
//!
//! Classification is a read with one side effect: a link that points at the
//! expected global path but whose target is gone is deleted on the spot.
//! That side effect is reported through [`LinkState::Dangling`] so callers
//! can see it happened.

use crate::paths::normalize_lexically;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What was found at a project-side link path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the path
    Missing,
    /// A regular file or directory occupies the path
    NotSymlink,
    /// A symlink whose target could not be read or checked
    Unreadable,
    /// A symlink to somewhere other than the expected global path. Left alone.
    Foreign { target: PathBuf },
    /// A symlink to the expected global path, which exists
    Applied,
    /// A symlink to the expected global path, which no longer exists.
    /// `removed` tells whether the stale link was deleted.
    Dangling { removed: bool },
}

impl LinkState {
    pub fn is_applied(&self) -> bool {
        matches!(self, LinkState::Applied)
    }

    /// Whether classification deleted a stale link from disk
    pub fn cleaned_up(&self) -> bool {
        matches!(self, LinkState::Dangling { removed: true })
    }
}

/// Classifies `link_path` against the global resource at `expected_target`.
///
/// The link must resolve to the expected path before its target is checked
/// for existence, so links belonging to another resource are never deleted.
pub fn classify(link_path: &Path, expected_target: &Path) -> LinkState {
    let state = classify_inner(link_path, expected_target);
    debug!(link = %link_path.display(), ?state, "classified link");
    state
}

fn classify_inner(link_path: &Path, expected_target: &Path) -> LinkState {
    let metadata = match fs::symlink_metadata(link_path) {
        Ok(m) => m,
        Err(_) => return LinkState::Missing,
    };
    if !metadata.file_type().is_symlink() {
        return LinkState::NotSymlink;
    }

    let raw_target = match fs::read_link(link_path) {
        Ok(t) => t,
        Err(_) => return LinkState::Unreadable,
    };
    let Some(target) = resolve_link_target(link_path, &raw_target) else {
        return LinkState::Unreadable;
    };
    let Some(expected) = absolute(expected_target) else {
        return LinkState::Unreadable;
    };

    if !targets_match(&target, &expected) {
        return LinkState::Foreign { target };
    }

    match link_path.try_exists() {
        Ok(true) => LinkState::Applied,
        Ok(false) => LinkState::Dangling {
            removed: remove_dangling(link_path),
        },
        // Target may exist but be unreachable (permissions); keep the link.
        Err(_) => LinkState::Unreadable,
    }
}

/// Turns a raw link target into an absolute, normalised path. Relative
/// targets are resolved against the directory holding the link.
fn resolve_link_target(link_path: &Path, raw_target: &Path) -> Option<PathBuf> {
    if raw_target.is_absolute() {
        return Some(normalize_lexically(raw_target));
    }
    let parent = link_path.parent()?;
    absolute(&parent.join(raw_target))
}

fn absolute(path: &Path) -> Option<PathBuf> {
    crate::paths::absolutize(path).ok()
}

/// Lexical equality first; when both sides exist, equal real paths also match.
fn targets_match(target: &Path, expected: &Path) -> bool {
    if target == expected {
        return true;
    }
    match (fs::canonicalize(target), fs::canonicalize(expected)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Best-effort deletion of a dangling link. Failure is logged and swallowed.
fn remove_dangling(link_path: &Path) -> bool {
    match remove_link_entry(link_path) {
        Ok(()) => {
            info!(link = %link_path.display(), "removed dangling link");
            true
        }
        Err(e) => {
            warn!(link = %link_path.display(), error = %e, "failed to remove dangling link");
            false
        }
    }
}

/// Deletes the link entry itself, never what it points to.
pub(crate) fn remove_link_entry(path: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        // Directory symlinks carry FILE_ATTRIBUTE_DIRECTORY and need remove_dir.
        let meta = fs::symlink_metadata(path)?;
        if meta.file_attributes() & 0x10 != 0 {
            return fs::remove_dir(path);
        }
    }
    fs::remove_file(path)
}
