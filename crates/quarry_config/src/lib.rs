//! Parsing and validation of `quarry.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a
//! strongly-typed [`QuarryConfig`] describing the public artifact
//! directory, URL layout, build defaults, and result-cache backend.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
