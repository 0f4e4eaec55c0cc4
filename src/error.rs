//! Error types for the snippet store.
//!
//! Only two things can really go wrong: the backing file cannot be read or
//! parsed at load time, or the collection cannot be written back after a
//! mutation. A missing file and removing an absent snippet are not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`crate::store::SnippetStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snippet file exists but could not be read
    #[error("failed to read snippets from {}: {source}", path.display())]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The snippet file exists but does not hold a valid snippet list
    #[error("snippet file {} is corrupt: {source}", path.display())]
    Corrupt {
        /// File that failed to parse
        path: PathBuf,
        /// Parser error, including line and column
        #[source]
        source: serde_json::Error,
    },

    /// Writing the collection back to disk failed
    #[error("failed to persist snippets to {}: {source}", path.display())]
    Persist {
        /// Target file of the write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Read,
    Corrupt,
    Persist,
}

impl StoreError {
    /// Returns the kind of failure without its payload.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read { .. } => ErrorKind::Read,
            Self::Corrupt { .. } => ErrorKind::Corrupt,
            Self::Persist { .. } => ErrorKind::Persist,
        }
    }

    /// Path of the file involved in the failure.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Corrupt { path, .. } | Self::Persist { path, .. } => {
                path
            }
        }
    }
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_path_follow_variant() {
        let err = StoreError::Persist {
            path: PathBuf::from("snippets.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), ErrorKind::Persist);
        assert_eq!(err.path(), std::path::Path::new("snippets.json"));
        assert!(err.to_string().contains("snippets.json"));
    }
}
