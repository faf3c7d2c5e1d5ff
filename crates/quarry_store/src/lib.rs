//! Artifact and result storage for the quarry asset pipeline.
//!
//! [`PublicStore`] owns the browser-served public directory and writes
//! content-addressed, cache-busted artifact files into it.
//! [`ResultCache`] is the boundary to the generic key/value cache that
//! memoizes built markup; [`MemoryCache`] is the default in-process
//! backend.

#![warn(missing_docs)]

pub mod artifact;
pub mod error;
pub mod result_cache;

pub use artifact::{PublicArtifact, PublicStore};
pub use error::StoreError;
pub use result_cache::{MemoryCache, NullCache, ResultCache};
