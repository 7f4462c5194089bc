//! Error types for the resource engine and its front end

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LazyClaudeError {
    /// The global store root is missing or cannot be listed. Fatal at startup.
    #[error("cannot read global store {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The global store has no non-hidden subdirectories. Fatal at startup.
    #[error("no categories found in {}", path.display())]
    NoCategories { path: PathBuf },

    /// One category directory could not be listed during a refresh.
    #[error("cannot read category directory {}: {source}", path.display())]
    CategoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot link {} -> {}: {source}", link.display(), target.display())]
    LinkCreateFailed {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot remove link {}: {source}", link.display())]
    LinkRemoveFailed {
        link: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LazyClaudeError {
    /// Whether the application must abort before showing any UI.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LazyClaudeError::StoreUnavailable { .. }
                | LazyClaudeError::NoCategories { .. }
                | LazyClaudeError::ConfigError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LazyClaudeError>;
