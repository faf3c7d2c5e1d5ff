//! Error types for artifact store operations.

use std::path::PathBuf;

/// Errors that can occur while publishing or clearing public artifacts.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The public root directory did not exist at construction time.
    /// The store never creates its own root; callers must provision it.
    #[error("public directory {} not found", path.display())]
    RootNotFound {
        /// The missing root path.
        path: PathBuf,
    },

    /// An I/O error occurred while writing, chmodding, or removing files.
    #[error("store I/O error at {}: {source}", path.display())]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
