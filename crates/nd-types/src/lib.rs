//! Foundation types for notedelta.
//!
//! This crate provides the value types shared by every other notedelta
//! crate: the externally visible change statistics and the keys used to
//! address a comparison in the result cache.
//!
//! # Key Types
//!
//! - [`DiffStats`] -- Character/word/line change counts plus current-state totals
//! - [`DiffKey`] -- Identifies one (original, current) comparison
//! - [`PairDigest`] -- Content-addressed digest of a text pair (BLAKE3)

pub mod error;
pub mod key;
pub mod stats;

pub use error::TypeError;
pub use key::{DiffKey, PairDigest};
pub use stats::DiffStats;
