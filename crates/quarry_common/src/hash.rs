//! Content hashing for cache keys and cache-busted artifact names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit content hash computed using XXH3.
///
/// Two inputs with the same `ContentHash` are assumed to have identical
/// content. Used to derive build-cache keys from source files and to
/// produce collision-resistant names for published artifacts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes a content hash over a sequence of byte slices.
    ///
    /// Equivalent to hashing the concatenation of all parts, without
    /// building the concatenated buffer.
    pub fn of_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = xxhash_rust::xxh3::Xxh3::new();
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.digest128().to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &[u8] = b"function toggle(el){el.classList.toggle('open');}";
    const STYLE: &[u8] = b"nav ul{list-style:none;margin:0}";

    #[test]
    fn same_source_same_digest() {
        assert_eq!(
            ContentHash::from_bytes(SCRIPT),
            ContentHash::from_bytes(SCRIPT)
        );
    }

    #[test]
    fn one_byte_edit_changes_digest() {
        // The kind of change a rebuilt asset actually sees.
        let edited = b"function toggle(el){el.classList.toggle('shut');}";
        assert_ne!(
            ContentHash::from_bytes(SCRIPT),
            ContentHash::from_bytes(edited)
        );
        assert_ne!(ContentHash::from_bytes(SCRIPT), ContentHash::from_bytes(STYLE));
    }

    #[test]
    fn of_parts_matches_concatenation() {
        // Artifact checksums hash the logical name and the payload as
        // one stream.
        let mut joined = b"bundle.css".to_vec();
        joined.extend_from_slice(STYLE);
        assert_eq!(
            ContentHash::from_bytes(&joined),
            ContentHash::of_parts(&[b"bundle.css", STYLE])
        );
    }

    #[test]
    fn of_parts_depends_on_order_not_split() {
        let a = ContentHash::of_parts(&[b"bundle.js", SCRIPT]);
        let b = ContentHash::of_parts(&[b"bundle", b".js", SCRIPT]);
        assert_eq!(a, b);
        assert_ne!(a, ContentHash::of_parts(&[SCRIPT, b"bundle.js"]));
    }

    #[test]
    fn display_is_32_lowercase_hex_chars() {
        let s = ContentHash::from_bytes(STYLE).to_string();
        assert_eq!(s.len(), 32);
        assert!(s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn debug_abbreviates_to_leading_bytes() {
        let h = ContentHash::from_bytes(SCRIPT);
        let dbg = format!("{h:?}");
        assert!(dbg.starts_with("ContentHash("));
        assert!(dbg.ends_with("..)"));
        // The abbreviation shows the first two bytes of the full hex form.
        assert!(h.to_string().starts_with(&dbg[12..16]));
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::of_parts(&[b"file.js", SCRIPT]);
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
