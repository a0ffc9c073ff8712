use serde::{Deserialize, Serialize};

/// Canonical encoding of a request's semantically significant fields.
///
/// Two logically equal requests must always produce byte-identical
/// fingerprints, so producers are expected to normalize before encoding
/// (sort unordered collections, strip insignificant trailing zeros from
/// amounts). The store treats the value as opaque and compares by equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps an already-canonical encoding.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    /// Returns the canonical encoding as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprints_compare_by_canonical_bytes() {
        let a = Fingerprint::new("a,b,c");
        let b = Fingerprint::new("a,b,c");
        let c = Fingerprint::new("a,b");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
