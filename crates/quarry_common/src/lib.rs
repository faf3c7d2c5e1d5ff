//! Shared foundational types for the quarry asset pipeline.
//!
//! This crate provides content hashing used for cache keys and
//! cache-busted artifact names.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
