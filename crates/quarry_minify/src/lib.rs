//! Minification boundary for the quarry asset pipeline.
//!
//! Minifiers are injected values implementing the [`Minifier`] trait, so
//! the build engine never depends on a concrete implementation and tests
//! can substitute fakes without global state. Two implementations ship
//! with this crate: [`BasicMinifier`], a conservative comment and
//! whitespace stripper for JavaScript and CSS, and
//! [`PassthroughMinifier`], which returns input unchanged.

#![warn(missing_docs)]

pub mod error;
pub mod script;
pub mod style;

pub use error::MinifyError;
pub use script::minify_script;
pub use style::minify_style;

/// A pair of pure `&str -> String` minification functions, one per asset kind.
///
/// Implementations must be deterministic: the same input must always
/// produce the same output. Malformed input is rejected with
/// [`MinifyError`], never silently truncated.
pub trait Minifier: Send + Sync {
    /// Minifies JavaScript source.
    fn minify_script(&self, source: &str) -> Result<String, MinifyError>;

    /// Minifies CSS source.
    fn minify_style(&self, source: &str) -> Result<String, MinifyError>;
}

/// The built-in conservative minifier.
///
/// Strips comments and collapses whitespace without touching token
/// content. See [`script::minify_script`] and [`style::minify_style`]
/// for the exact rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicMinifier;

impl Minifier for BasicMinifier {
    fn minify_script(&self, source: &str) -> Result<String, MinifyError> {
        script::minify_script(source)
    }

    fn minify_style(&self, source: &str) -> Result<String, MinifyError> {
        style::minify_style(source)
    }
}

/// A minifier that returns its input unchanged. Intended for tests and
/// for deployments that minify out of band.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughMinifier;

impl Minifier for PassthroughMinifier {
    fn minify_script(&self, source: &str) -> Result<String, MinifyError> {
        Ok(source.to_string())
    }

    fn minify_style(&self, source: &str) -> Result<String, MinifyError> {
        Ok(source.to_string())
    }
}
