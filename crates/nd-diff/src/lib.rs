//! Diff engine for notedelta.
//!
//! Turns two versions of a text document into structured change statistics.
//! The engine runs twice per comparison, once over characters and once over
//! whole lines, and the two edit scripts are folded into a single
//! [`DiffStats`](nd_types::DiffStats).
//!
//! # Key Types
//!
//! - [`ScriptEngine`] / [`MyersEngine`] -- Edit-script computation (Myers via `similar`)
//! - [`EditScript`] / [`DiffOperation`] -- Ordered Equal/Insert/Delete transcript
//! - [`aggregate`] / [`reconcile`] -- Statistics and the modified-line heuristic
//! - [`count_words`] / [`count_lines`] -- Tokenizer
//! - [`render_transcript`] / [`DiffLine`] -- Optional line transcript for expandable views

pub mod aggregate;
pub mod cleanup;
pub mod compute;
pub mod error;
pub mod reconcile;
pub mod script;
pub mod tokenize;
pub mod transcript;

pub use aggregate::aggregate;
pub use cleanup::cleanup_semantic;
pub use compute::compute_stats;
pub use error::{DiffError, DiffResult, Side};
pub use reconcile::reconcile;
pub use script::{DiffOperation, EditScript, EngineOptions, Granularity, MyersEngine, ScriptEngine};
pub use tokenize::{count_chars, count_lines, count_words};
pub use transcript::{render_transcript, transcript_lines, DiffLine};
