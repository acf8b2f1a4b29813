//! High-level API for notedelta.
//!
//! [`DiffService`] is the entry point for applications embedding notedelta:
//! hand it the saved and current text of a document and it returns cached,
//! structured change statistics.
//!
//! ```
//! use nd_sdk::DiffService;
//!
//! let service = DiffService::new();
//! let stats = service.compute_diff("a\nb\nc", "a\nx\nc", None).unwrap();
//! assert_eq!(stats.lines_modified, 1);
//! ```

pub mod config;
pub mod error;
pub mod request;
pub mod service;

pub use config::EngineConfig;
pub use error::{SdkError, SdkResult};
pub use request::DiffRequest;
pub use service::DiffService;

// Re-export key types
pub use nd_cache::CacheStats;
pub use nd_diff::{DiffError, MyersEngine, ScriptEngine};
pub use nd_types::{DiffKey, DiffStats};
