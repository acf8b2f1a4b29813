//! Content hashing for notedelta.
//!
//! Derives content-addressed cache keys for text comparisons using
//! domain-separated BLAKE3. No custom cryptography.

pub mod hasher;

pub use hasher::ContentHasher;
