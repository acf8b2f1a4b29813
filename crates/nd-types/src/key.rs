use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content-addressed digest of an (original, current) text pair.
///
/// A `PairDigest` is the BLAKE3 hash computed by the key deriver in
/// `nd-crypto`. Identical pairs always produce the same digest, so the digest
/// can stand in for the pair itself when looking up cached results.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairDigest([u8; 32]);

impl PairDigest {
    /// Create a `PairDigest` from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for PairDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairDigest({})", self.short_hex())
    }
}

impl fmt::Display for PairDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Identifies one comparison in the result cache.
///
/// Derived keys and caller-supplied keys live in separate namespaces: an
/// explicit key that happens to spell a digest's hex never aliases it.
/// Whoever supplies an explicit key is responsible for keeping it unique per
/// distinct (original, current) pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffKey {
    /// Derived from the compared content.
    Content(PairDigest),
    /// Supplied by the caller (e.g. a document path plus revision).
    Explicit(String),
}

impl DiffKey {
    /// Build an explicit key. Empty or whitespace-only keys are rejected.
    pub fn explicit(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(TypeError::InvalidKey("explicit key must not be empty".into()));
        }
        Ok(Self::Explicit(key))
    }
}

impl fmt::Display for DiffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content(digest) => write!(f, "content:{}", digest.short_hex()),
            Self::Explicit(key) => write!(f, "explicit:{key}"),
        }
    }
}
