use nd_types::{DiffKey, PairDigest};

/// Domain-separated BLAKE3 hasher for text comparisons.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so digests produced for different purposes never collide.
/// Pairs are framed with the byte length of the original text before its
/// content, which keeps `("ab", "c")` and `("a", "bc")` apart without relying
/// on a separator that could itself appear in the text.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for (original, current) comparison pairs.
    pub const PAIR: Self = Self {
        domain: "notedelta-pair-v1",
    };

    /// Hash an (original, current) pair with domain separation.
    pub fn hash_pair(&self, original: &str, current: &str) -> PairDigest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(&(original.len() as u64).to_le_bytes());
        hasher.update(original.as_bytes());
        hasher.update(current.as_bytes());
        PairDigest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Derive the cache key for a comparison.
    pub fn derive_key(&self, original: &str, current: &str) -> DiffKey {
        DiffKey::Content(self.hash_pair(original, current))
    }
}
