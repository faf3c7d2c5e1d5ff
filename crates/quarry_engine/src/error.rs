//! Error types for build calls.

use std::path::PathBuf;

use quarry_minify::MinifyError;
use quarry_store::StoreError;

/// Errors that abort a `build` call.
///
/// There is no partial-success mode: a single failing asset fails the
/// entire batch, and nothing is written to the result cache.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// An asset identifier could not be resolved to a readable file.
    #[error("asset '{asset}' could not be resolved")]
    NotFound {
        /// The identifier as supplied by the caller.
        asset: String,
    },

    /// A source file could not be read.
    #[error("asset I/O error at {}: {source}", path.display())]
    Io {
        /// The file that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A minifier rejected a source file.
    #[error("failed to minify {}: {source}", path.display())]
    Minify {
        /// The file being minified.
        path: PathBuf,
        /// The minifier's error.
        source: MinifyError,
    },

    /// The public artifact store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = BuildError::NotFound {
            asset: "js/app.js".to_string(),
        };
        assert_eq!(format!("{err}"), "asset 'js/app.js' could not be resolved");
    }

    #[test]
    fn io_display() {
        let err = BuildError::Io {
            path: PathBuf::from("/srv/assets/app.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("asset I/O error"));
        assert!(msg.contains("app.js"));
    }

    #[test]
    fn minify_display() {
        let err = BuildError::Minify {
            path: PathBuf::from("bad.js"),
            source: MinifyError::UnterminatedString { line: 3 },
        };
        let msg = format!("{err}");
        assert!(msg.contains("failed to minify bad.js"));
        assert!(msg.contains("line 3"));
    }

    #[test]
    fn store_error_is_transparent() {
        let err = BuildError::Store(StoreError::RootNotFound {
            path: PathBuf::from("/missing"),
        });
        assert_eq!(format!("{err}"), "public directory /missing not found");
    }
}
