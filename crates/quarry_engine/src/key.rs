//! Cache-key derivation.
//!
//! The key for a build call is a hash over the per-asset content
//! digests in the original caller order, followed by a digest of the
//! canonical options serialization. Hashing happens before kind
//! partitioning, so grouping by extension can never perturb cache
//! identity. External URLs contribute a digest of their identifier
//! string, since their content is never fetched.

use std::path::Path;

use quarry_common::ContentHash;

use crate::error::BuildError;
use crate::options::BuildOptions;
use crate::resolver::ResolvedAsset;

/// Computes the content digest of one source file.
pub fn file_digest(path: &Path) -> Result<ContentHash, BuildError> {
    let content = std::fs::read(path).map_err(|e| BuildError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(ContentHash::from_bytes(&content))
}

/// Computes the digest of the merged build options.
pub fn options_digest(options: &BuildOptions) -> ContentHash {
    ContentHash::from_bytes(options.canonical_string().as_bytes())
}

/// Derives the cache key for a resolved asset list and merged options.
///
/// Per-asset digest strings are concatenated in input order, the
/// options digest is appended, and the result is hashed once more.
pub fn cache_key(assets: &[ResolvedAsset], options: &BuildOptions) -> Result<String, BuildError> {
    let mut combined = String::with_capacity((assets.len() + 1) * 32);
    for asset in assets {
        let digest = match asset {
            ResolvedAsset::Local(path) => file_digest(path)?,
            ResolvedAsset::External(url) => ContentHash::from_bytes(url.as_bytes()),
        };
        combined.push_str(&digest.to_string());
    }
    combined.push_str(&options_digest(options).to_string());
    Ok(ContentHash::from_bytes(combined.as_bytes()).to_string())
}
