//! Content-addressed public artifact storage.
//!
//! Published artifacts live under a sharded two-level layout:
//! `{root}/{checksum[0..2]}/{stem}.{checksum[2..]}.{ext}`, where the
//! checksum is the [`ContentHash`] of the logical name concatenated with
//! the content. The checksum in the path makes every URL cache-busted:
//! identical (name, content) pairs always map to the same path, and any
//! content change yields a new path. Artifacts are immutable once
//! written; the store only ever clears its whole namespace.

use std::path::{Path, PathBuf};

use quarry_common::ContentHash;
use tracing::debug;

use crate::error::StoreError;

/// Fallback extension for logical names that carry none.
const DEFAULT_EXT: &str = "cache";

/// A file materialized in the public directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicArtifact {
    /// Absolute on-disk path of the artifact.
    pub path: PathBuf,
    /// Two-character shard directory name.
    pub shard: String,
    /// Artifact file name (`{stem}.{checksum[2..]}.{ext}`).
    pub file_name: String,
}

impl PublicArtifact {
    /// The artifact path relative to the store root, with `/` separators.
    /// This is the path segment embedded in generated URLs.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.shard, self.file_name)
    }
}

/// Content-addressed store for browser-served artifacts.
///
/// Exclusively owns the public root directory tree. Writes are
/// idempotent per (name, content) pair, so racing publishes of
/// identical payloads are harmless.
#[derive(Debug)]
pub struct PublicStore {
    /// Public root directory. Must exist for the lifetime of the store.
    root: PathBuf,

    /// Unix permission mode applied to created directories and files.
    file_mode: Option<u32>,
}

impl PublicStore {
    /// Creates a store rooted at `root`.
    ///
    /// Fails with [`StoreError::RootNotFound`] if the directory does not
    /// exist; the store does not provision its own root.
    pub fn new(root: &Path) -> Result<Self, StoreError> {
        Self::with_file_mode(root, None)
    }

    /// Creates a store that applies `file_mode` (e.g. `0o750`) to every
    /// shard directory and artifact file it creates. The mode is ignored
    /// on non-Unix platforms.
    pub fn with_file_mode(root: &Path, file_mode: Option<u32>) -> Result<Self, StoreError> {
        if !root.is_dir() {
            return Err(StoreError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
            file_mode,
        })
    }

    /// Returns the store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Publishes `content` under `logical_name`, returning the artifact
    /// descriptor.
    ///
    /// The destination path encodes a checksum of (name, content), so
    /// republishing an identical pair overwrites the same path with
    /// identical bytes and differing content never collides.
    pub fn publish(&self, logical_name: &str, content: &[u8]) -> Result<PublicArtifact, StoreError> {
        let (stem, ext) = split_logical_name(logical_name);
        let checksum = ContentHash::of_parts(&[logical_name.as_bytes(), content]).to_string();

        let shard = checksum[..2].to_string();
        let file_name = format!("{stem}.{}.{ext}", &checksum[2..]);

        let shard_dir = self.root.join(&shard);
        if !shard_dir.is_dir() {
            std::fs::create_dir_all(&shard_dir).map_err(|e| StoreError::Io {
                path: shard_dir.clone(),
                source: e,
            })?;
            self.apply_mode(&shard_dir)?;
        }

        let path = shard_dir.join(&file_name);
        std::fs::write(&path, content).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e,
        })?;
        self.apply_mode(&path)?;

        debug!(name = logical_name, path = %path.display(), "published artifact");

        Ok(PublicArtifact {
            path,
            shard,
            file_name,
        })
    }

    /// Returns the browser-facing URL for an artifact:
    /// `url_base_path` + the artifact's shard-relative path.
    pub fn url_for(&self, artifact: &PublicArtifact, url_base_path: &str) -> String {
        format!("{url_base_path}{}", artifact.relative_path())
    }

    /// Recursively removes everything under the store root, directories
    /// last, then removes the root itself.
    ///
    /// Partial deletion is possible on failure and is surfaced as an
    /// error; callers must not assume the namespace is empty afterwards.
    /// A new store cannot be constructed until the root is re-created.
    pub fn clear(&self) -> Result<(), StoreError> {
        debug!(root = %self.root.display(), "clearing public store");
        remove_tree(&self.root)
    }

    #[cfg(unix)]
    fn apply_mode(&self, path: &Path) -> Result<(), StoreError> {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = self.file_mode {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
                StoreError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn apply_mode(&self, _path: &Path) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Splits a logical artifact name into (stem, extension). Names without
/// an extension fall back to the `cache` extension.
fn split_logical_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, ext),
        _ => (name, DEFAULT_EXT),
    }
}

/// Depth-first recursive directory removal: entries first, the
/// directory itself last.
fn remove_tree(dir: &Path) -> Result<(), StoreError> {
    let entries = std::fs::read_dir(dir).map_err(|e| StoreError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| StoreError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            remove_tree(&path)?;
        } else {
            std::fs::remove_file(&path).map_err(|e| StoreError::Io {
                path: path.clone(),
                source: e,
            })?;
        }
    }

    std::fs::remove_dir(dir).map_err(|e| StoreError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}
