//! Path resolution for the global store and the project's managed directory
//!
//! Everything here is pure apart from reading the home and current
//! directories. Nothing checks that the returned paths exist.

use crate::error::{LazyClaudeError, Result};
use std::path::{Component, Path, PathBuf};

/// Default name of the managed subtree inside a project
pub const DEFAULT_PROJECT_SUBDIR: &str = ".claude";

/// The two roots the engine works against, both absolute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root of the global resource store (e.g. `~/.config/claude`)
    pub global_root: PathBuf,
    /// Managed directory inside the project (e.g. `/project/.claude`)
    pub project_root: PathBuf,
}

/// Default global store root: `~/.config/claude`
pub fn default_global_root() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".config").join("claude"))
        .ok_or_else(|| {
            LazyClaudeError::ConfigError("Could not determine home directory".to_string())
        })
}

/// Managed directory for a project: `<project>/<subdir>`
pub fn project_managed_root(project: &Path, subdir: &str) -> PathBuf {
    normalize_lexically(&project.join(subdir))
}

/// Expands `~` and environment variables in a configured path
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|e| {
        LazyClaudeError::ConfigError(format!("Failed to expand path '{}': {}", raw, e))
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Makes a path absolute against the current directory and normalises it
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }
    let cwd = std::env::current_dir()?;
    Ok(normalize_lexically(&cwd.join(path)))
}

/// Removes `.` and resolves `..` components without touching the filesystem.
///
/// Symlinks are not followed, so this works for paths whose target no longer
/// exists. `..` above the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Checks that a project subdirectory name stays inside the project
pub fn validate_project_subdir(subdir: &str) -> std::result::Result<(), String> {
    if subdir.trim().is_empty() {
        return Err("Project subdirectory must not be empty".to_string());
    }
    let path = Path::new(subdir);
    if path.is_absolute() {
        return Err(format!(
            "Project subdirectory must be relative: '{}'",
            subdir
        ));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(format!(
            "Project subdirectory must not contain '..': '{}'",
            subdir
        ));
    }
    Ok(())
}
