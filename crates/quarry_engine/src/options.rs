//! Build options and per-call overrides.
//!
//! Options are an explicit struct rather than a free-form map: each
//! field overrides shallowly (later wins, whole value replaced), so
//! there is no deep-merge ambiguity.

/// Effective configuration for one build call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Apply minification to local asset content.
    pub minify: bool,

    /// Emit content inline rather than as a linked public file.
    pub inline: bool,

    /// Logical base name for the published artifact. The kind extension
    /// is appended when the name carries none.
    pub name: String,

    /// Prefix prepended to generated artifact URLs.
    pub url_base_path: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            minify: true,
            inline: true,
            name: "file".to_string(),
            url_base_path: String::new(),
        }
    }
}

impl BuildOptions {
    /// Returns a copy of `self` with every populated override applied.
    pub fn merged(&self, overrides: &BuildOverrides) -> BuildOptions {
        BuildOptions {
            minify: overrides.minify.unwrap_or(self.minify),
            inline: overrides.inline.unwrap_or(self.inline),
            name: overrides.name.clone().unwrap_or_else(|| self.name.clone()),
            url_base_path: overrides
                .url_base_path
                .clone()
                .unwrap_or_else(|| self.url_base_path.clone()),
        }
    }

    /// Canonical serialized form used for the options digest. Field
    /// order is fixed, so the digest is stable across processes.
    pub(crate) fn canonical_string(&self) -> String {
        format!(
            "inline={};minify={};name={};url_base_path={}",
            self.inline, self.minify, self.name, self.url_base_path
        )
    }
}

/// Per-call option overrides. `None` fields fall back to the engine's
/// configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOverrides {
    /// Override for [`BuildOptions::minify`].
    pub minify: Option<bool>,
    /// Override for [`BuildOptions::inline`].
    pub inline: Option<bool>,
    /// Override for [`BuildOptions::name`].
    pub name: Option<String>,
    /// Override for [`BuildOptions::url_base_path`].
    pub url_base_path: Option<String>,
}

impl BuildOverrides {
    /// Overrides nothing; the engine defaults apply unchanged.
    pub fn none() -> Self {
        Self::default()
    }
}
