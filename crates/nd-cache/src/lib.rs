//! Result cache for notedelta.
//!
//! Memoizes computed [`DiffStats`](nd_types::DiffStats) by comparison key so
//! repeated comparisons of the same pair skip the diff entirely. The cache
//! is bounded: once full, an insert of a new key first discards the least
//! recently used half of the entries (more for very small capacities).

pub mod cache;

pub use cache::{CacheKey, CacheStats, ResultCache, DEFAULT_CAPACITY};
