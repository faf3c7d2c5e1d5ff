//! Asset identifier resolution.
//!
//! Resolvers map caller-supplied identifiers (symbolic names, relative
//! paths) to readable source paths. Resolution is a capability injected
//! at engine construction, not a subclass hook: tests inject counting
//! stubs, production code injects a directory-rooted resolver.

use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// An asset after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAsset {
    /// A readable local file.
    Local(PathBuf),
    /// An external URL, passed through unresolved and emitted as a
    /// direct reference tag.
    External(String),
}

/// Maps an asset identifier to a readable source path.
pub trait SourceResolver: Send + Sync {
    /// Resolves `identifier` to an absolute or readable path.
    ///
    /// Fails with [`BuildError::NotFound`] if the identifier cannot be
    /// mapped to a real file.
    fn resolve(&self, identifier: &str) -> Result<PathBuf, BuildError>;
}

/// Passes identifiers through unchanged.
///
/// For callers that already hold real paths (including test-harness
/// paths); unreadable paths surface later as I/O errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityResolver;

impl SourceResolver for IdentityResolver {
    fn resolve(&self, identifier: &str) -> Result<PathBuf, BuildError> {
        Ok(PathBuf::from(identifier))
    }
}

/// Resolves symbolic names against a root directory.
///
/// Absolute identifiers pass through unchanged; relative ones map to
/// `root/identifier` and must exist at resolution time.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    /// Creates a resolver rooted at `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl SourceResolver for DirectoryResolver {
    fn resolve(&self, identifier: &str) -> Result<PathBuf, BuildError> {
        let path = Path::new(identifier);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let full = self.root.join(path);
        if full.is_file() {
            Ok(full)
        } else {
            Err(BuildError::NotFound {
                asset: identifier.to_string(),
            })
        }
    }
}
