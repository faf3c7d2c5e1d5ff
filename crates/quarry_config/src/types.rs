//! Configuration types deserialized from `quarry.toml`.

use serde::Deserialize;

/// The top-level project configuration parsed from `quarry.toml`.
#[derive(Debug, Deserialize)]
pub struct QuarryConfig {
    /// Asset pipeline settings (public directory, URL layout, build defaults).
    pub assets: AssetsConfig,
    /// Result-cache backend selection.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Asset pipeline settings.
///
/// `public_dir` is the only required field. The remaining fields are the
/// per-project defaults for build calls; callers may override them per call.
#[derive(Debug, Deserialize)]
pub struct AssetsConfig {
    /// Directory that published artifacts are written into. Must exist;
    /// quarry never creates the public root itself.
    pub public_dir: String,

    /// Prefix prepended to generated artifact URLs (e.g. `"/cache/"`).
    #[serde(default)]
    pub url_base_path: String,

    /// Whether to minify asset content by default.
    #[serde(default = "default_true")]
    pub minify: bool,

    /// Whether to emit content inline by default (vs. linked public files).
    #[serde(default = "default_true")]
    pub inline: bool,

    /// Logical base name for published artifacts. The kind extension is
    /// appended automatically when the name has none.
    #[serde(default = "default_name")]
    pub name: String,

    /// Unix permission mode applied to created shard directories and
    /// published files (e.g. `0o750`). Ignored on non-Unix platforms.
    #[serde(default)]
    pub file_mode: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn default_name() -> String {
    "file".to_string()
}

/// Result-cache settings.
#[derive(Debug, Default, Deserialize)]
pub struct CacheConfig {
    /// The result-cache backend to use.
    #[serde(default)]
    pub backend: CacheBackend,
}

/// Result-cache backend selection.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process memory cache (default).
    #[default]
    Memory,
    /// No memoization; every build recomputes.
    None,
}
