//! Generated markup shapes.
//!
//! These tag shapes are byte-relevant for compatibility: downstream
//! tests match them exactly. Do not reformat.

use crate::transpile::AssetKind;

/// `<script>{content}</script>`
pub fn inline_script(content: &str) -> String {
    format!("<script>{content}</script>")
}

/// `<script src="{url}"></script>`
pub fn linked_script(url: &str) -> String {
    format!("<script src=\"{url}\"></script>")
}

/// `<style>{content}</style>`
pub fn inline_style(content: &str) -> String {
    format!("<style>{content}</style>")
}

/// `<link rel="stylesheet" type="text/css" href="{url}" media="all" />`
pub fn linked_style(url: &str) -> String {
    format!("<link rel=\"stylesheet\" type=\"text/css\" href=\"{url}\" media=\"all\" />")
}

/// The inline tag for a kind.
pub fn inline_tag(kind: AssetKind, content: &str) -> String {
    match kind {
        AssetKind::Script => inline_script(content),
        AssetKind::Style => inline_style(content),
    }
}

/// The linked tag for a kind. External references use the same shape
/// with the original URL substituted verbatim.
pub fn linked_tag(kind: AssetKind, url: &str) -> String {
    match kind {
        AssetKind::Script => linked_script(url),
        AssetKind::Style => linked_style(url),
    }
}

/// Returns `true` for identifiers that are external URLs: `http://`,
/// `https://`, or protocol-relative `//`, scheme case-insensitive.
/// External references are never fetched, resolved, or minified.
pub fn is_external_url(identifier: &str) -> bool {
    let lower_prefix = |prefix: &str| {
        identifier.len() >= prefix.len() && identifier[..prefix.len()].eq_ignore_ascii_case(prefix)
    };
    lower_prefix("http://") || lower_prefix("https://") || identifier.starts_with("//")
}
