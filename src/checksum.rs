//! Checksum utilities for content-addressed artifact names

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of hex characters kept in artifact filenames. Collisions at
/// this length are accepted as negligible for corpora of a few thousand
/// classes; the hash is a cache-busting key, not an identity key.
pub const SHORT_LEN: usize = 12;

/// SHA256 checksum of serialized artifact content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum from a string
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Get the full hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated form embedded in artifact filenames
    pub fn short(&self) -> &str {
        &self.0[..SHORT_LEN]
    }

    /// Verify that content matches this checksum
    pub fn verify(&self, content: &str) -> bool {
        let computed = Self::from_content(content);
        self.0 == computed.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = r#"{"name":"Foo","bases":[]}"#;
        let checksum1 = Checksum::from_content(content);
        let checksum2 = Checksum::from_content(content);
        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_checksum_different_content() {
        let checksum1 = Checksum::from_content(r#"{"name":"Foo"}"#);
        let checksum2 = Checksum::from_content(r#"{"name":"Bar"}"#);
        assert_ne!(checksum1, checksum2);
    }

    #[test]
    fn test_short_form_length() {
        let checksum = Checksum::from_content("anything");
        assert_eq!(checksum.short().len(), SHORT_LEN);
        assert!(checksum.as_str().starts_with(checksum.short()));
    }

    #[test]
    fn test_checksum_verification() {
        let content = r#"{"name":"Foo"}"#;
        let checksum = Checksum::from_content(content);
        assert!(checksum.verify(content));
        assert!(!checksum.verify("different content"));
    }
}
