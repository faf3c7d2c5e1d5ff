//! Per-file asset transformation.
//!
//! The transpiler reads one source file and either minifies it through
//! the injected [`Minifier`] or passes the content through unmodified.
//! No caching happens at this layer; memoization belongs to the engine.

use std::path::Path;
use std::sync::Arc;

use quarry_minify::Minifier;

use crate::error::BuildError;

/// The script-vs-style classification of an asset, derived from its
/// file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// JavaScript (`.js`).
    Script,
    /// CSS (`.css`).
    Style,
}

impl AssetKind {
    /// Classifies a path by extension, case-insensitively. Returns
    /// `None` for extensions that are neither script nor style.
    pub fn from_path(path: &Path) -> Option<AssetKind> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Classifies a bare extension string, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<AssetKind> {
        if ext.eq_ignore_ascii_case("js") {
            Some(AssetKind::Script)
        } else if ext.eq_ignore_ascii_case("css") {
            Some(AssetKind::Style)
        } else {
            None
        }
    }

    /// The canonical file extension for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            AssetKind::Script => "js",
            AssetKind::Style => "css",
        }
    }
}

/// Reads and transforms single asset files.
#[derive(Clone)]
pub struct Transpiler {
    minifier: Arc<dyn Minifier>,
}

impl Transpiler {
    /// Creates a transpiler delegating to the given minifier.
    pub fn new(minifier: Arc<dyn Minifier>) -> Self {
        Self { minifier }
    }

    /// Reads `path` and returns its (optionally minified) content.
    ///
    /// Minifier failures propagate; they are never swallowed into
    /// pass-through behavior.
    pub fn process(&self, path: &Path, kind: AssetKind, minify: bool) -> Result<String, BuildError> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !minify {
            return Ok(content);
        }

        let minified = match kind {
            AssetKind::Script => self.minifier.minify_script(&content),
            AssetKind::Style => self.minifier.minify_style(&content),
        };
        minified.map_err(|e| BuildError::Minify {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
