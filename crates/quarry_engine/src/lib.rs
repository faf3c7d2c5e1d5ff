//! The quarry asset build engine.
//!
//! Given an ordered list of asset identifiers and build options, the
//! engine derives a deterministic cache key, memoizes the expensive
//! minify-and-publish work in a result cache, and produces
//! browser-servable markup: inline `<script>`/`<style>` tags, or linked
//! tags pointing at content-addressed files in the public store.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod key;
pub mod markup;
pub mod options;
pub mod resolver;
pub mod transpile;

pub use engine::AssetEngine;
pub use error::BuildError;
pub use options::{BuildOptions, BuildOverrides};
pub use resolver::{DirectoryResolver, IdentityResolver, ResolvedAsset, SourceResolver};
pub use transpile::{AssetKind, Transpiler};
