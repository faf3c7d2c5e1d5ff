//! The build orchestrator.
//!
//! `build` runs the pipeline: resolve identifiers, derive the cache
//! key, check the result cache, and on a miss partition the assets by
//! kind, transpile, publish any non-inline payload, assemble markup,
//! and store the result. A cache hit returns the memoized markup
//! without transpiling, minifying, or writing anything.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use rayon::prelude::*;
use tracing::{debug, warn};

use quarry_minify::Minifier;
use quarry_store::{PublicStore, ResultCache};

use crate::error::BuildError;
use crate::key;
use crate::markup;
use crate::options::{BuildOptions, BuildOverrides};
use crate::resolver::{ResolvedAsset, SourceResolver};
use crate::transpile::{AssetKind, Transpiler};

/// A per-file build product, in original input order.
enum Piece {
    /// An external reference, emitted as a direct linked tag.
    External(String),
    /// Transpiled local file content.
    Content(String),
}

/// The asset build engine.
///
/// All collaborators are injected: the resolver, the minifier, the
/// public store, and the result cache. The engine owns the options
/// merge and the cache-key computation; it is `Send + Sync` and safe to
/// share across threads.
pub struct AssetEngine {
    resolver: Arc<dyn SourceResolver>,
    transpiler: Transpiler,
    store: PublicStore,
    cache: Arc<dyn ResultCache>,
    defaults: BuildOptions,

    /// Per-key gates collapsing concurrent identical builds.
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AssetEngine {
    /// Creates an engine from its collaborators and default options.
    pub fn new(
        resolver: Arc<dyn SourceResolver>,
        minifier: Arc<dyn Minifier>,
        store: PublicStore,
        cache: Arc<dyn ResultCache>,
        defaults: BuildOptions,
    ) -> Self {
        Self {
            resolver,
            transpiler: Transpiler::new(minifier),
            store,
            cache,
            defaults,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the public artifact store.
    pub fn store(&self) -> &PublicStore {
        &self.store
    }

    /// Builds markup for a single asset. Equivalent to
    /// [`build`](Self::build) with a one-element list.
    pub fn build_one(&self, asset: &str, overrides: &BuildOverrides) -> Result<String, BuildError> {
        self.build(&[asset], overrides)
    }

    /// Builds markup for an ordered list of asset identifiers.
    ///
    /// Styles are emitted before scripts; within a kind, tags follow
    /// the caller's input order and are joined with newlines. A single
    /// failing asset aborts the whole call.
    pub fn build(&self, assets: &[&str], overrides: &BuildOverrides) -> Result<String, BuildError> {
        let options = self.defaults.merged(overrides);

        let mut resolved = Vec::with_capacity(assets.len());
        for asset in assets {
            if markup::is_external_url(asset) {
                resolved.push(ResolvedAsset::External((*asset).to_string()));
            } else {
                resolved.push(ResolvedAsset::Local(self.resolver.resolve(asset)?));
            }
        }

        // Hash in original caller order, before kind partitioning.
        let cache_key = key::cache_key(&resolved, &options)?;

        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(key = %cache_key, "result cache hit");
            return Ok(hit);
        }

        let gate = self.gate(&cache_key);
        let _guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished this build while we waited.
        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(key = %cache_key, "result cache hit after wait");
            self.release_gate(&cache_key);
            return Ok(hit);
        }

        debug!(key = %cache_key, assets = assets.len(), "result cache miss, building");

        // The gate entry must go away on failure too, or the in-flight
        // map grows by one entry per distinct failing key.
        let result = self.build_uncached(&resolved, &options).map(|markup| {
            self.cache.set(&cache_key, markup.clone());
            markup
        });
        self.release_gate(&cache_key);
        result
    }

    fn build_uncached(
        &self,
        resolved: &[ResolvedAsset],
        options: &BuildOptions,
    ) -> Result<String, BuildError> {
        let (styles, scripts) = partition(resolved);
        let style_tags = self.build_kind(AssetKind::Style, &styles, options)?;
        let script_tags = self.build_kind(AssetKind::Script, &scripts, options)?;
        Ok(format!("{}{}", style_tags.join("\n"), script_tags.join("\n")))
    }

    /// Builds the tag list for one kind.
    ///
    /// Local files are transpiled in parallel; results are reassembled
    /// in input order and the first error aborts the call. Non-inline
    /// content accumulates into a single public payload, published as
    /// one artifact and referenced by one linked tag.
    fn build_kind(
        &self,
        kind: AssetKind,
        items: &[&ResolvedAsset],
        options: &BuildOptions,
    ) -> Result<Vec<String>, BuildError> {
        let pieces: Vec<Piece> = items
            .par_iter()
            .map(|asset| match asset {
                ResolvedAsset::External(url) => Ok(Piece::External(url.clone())),
                ResolvedAsset::Local(path) => self
                    .transpiler
                    .process(path, kind, options.minify)
                    .map(Piece::Content),
            })
            .collect::<Result<_, BuildError>>()?;

        let mut tags = Vec::new();
        let mut public = String::new();
        for piece in pieces {
            match piece {
                Piece::External(url) => tags.push(markup::linked_tag(kind, &url)),
                Piece::Content(content) => {
                    if options.inline {
                        tags.push(markup::inline_tag(kind, &content));
                    } else {
                        public.push_str(&content);
                    }
                }
            }
        }

        if !public.is_empty() {
            let name = artifact_name(&options.name, kind);
            let artifact = self.store.publish(&name, public.as_bytes())?;
            let url = self.store.url_for(&artifact, &options.url_base_path);
            tags.push(markup::linked_tag(kind, &url));
        }

        Ok(tags)
    }

    fn gate(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(key.to_string()).or_default())
    }

    fn release_gate(&self, key: &str) {
        let mut map = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.remove(key);
    }
}

/// Splits resolved assets into style and script groups, preserving
/// input order within each group. Assets of unrecognized kind are
/// skipped with a warning.
fn partition(assets: &[ResolvedAsset]) -> (Vec<&ResolvedAsset>, Vec<&ResolvedAsset>) {
    let mut styles = Vec::new();
    let mut scripts = Vec::new();
    for asset in assets {
        let kind = match asset {
            ResolvedAsset::Local(path) => AssetKind::from_path(path),
            ResolvedAsset::External(url) => url_kind(url),
        };
        match kind {
            Some(AssetKind::Style) => styles.push(asset),
            Some(AssetKind::Script) => scripts.push(asset),
            None => match asset {
                ResolvedAsset::Local(path) => {
                    warn!(path = %path.display(), "skipping asset with unrecognized extension");
                }
                ResolvedAsset::External(url) => {
                    warn!(url, "skipping external reference with unrecognized extension");
                }
            },
        }
    }
    (styles, scripts)
}

/// Classifies an external URL by the extension of its path component,
/// ignoring query string and fragment.
fn url_kind(url: &str) -> Option<AssetKind> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;
    AssetKind::from_extension(ext)
}

/// The logical artifact name for a kind: `options.name`, with the kind
/// extension appended when the name has none.
fn artifact_name(name: &str, kind: AssetKind) -> String {
    if std::path::Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.{}", kind.extension())
    }
}
