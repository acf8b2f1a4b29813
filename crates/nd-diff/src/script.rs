//! Edit scripts and the engines that compute them.
//!
//! An [`EditScript`] is an ordered, left-to-right transcript from an original
//! text to a current text. Equal and Delete spans concatenate to the
//! original; Equal and Insert spans concatenate to the current text.
//! Adjacent operations of the same kind are always coalesced.

use std::time::{Duration, Instant};

use similar::{Algorithm, ChangeTag, TextDiff};
use tracing::warn;

use crate::cleanup::cleanup_semantic;
use crate::error::{DiffError, DiffResult, Side};
use crate::tokenize::count_chars;

/// A single step of an edit script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffOperation {
    /// Text present in both versions.
    Equal(String),
    /// Text present only in the current version.
    Insert(String),
    /// Text present only in the original version.
    Delete(String),
}

impl DiffOperation {
    /// The text carried by this operation.
    pub fn text(&self) -> &str {
        match self {
            Self::Equal(text) | Self::Insert(text) | Self::Delete(text) => text,
        }
    }

    /// Returns `true` for Insert and Delete.
    pub fn is_edit(&self) -> bool {
        match self {
            Self::Equal(_) => false,
            Self::Insert(_) | Self::Delete(_) => true,
        }
    }
}

/// The unit the engine treats as atomic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Every Unicode scalar value is a token.
    Chars,
    /// Every newline-terminated line, and a trailing partial line, is a token.
    Lines,
}

/// An ordered sequence of [`DiffOperation`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<DiffOperation>,
}

impl EditScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// A script that keeps `text` unchanged.
    pub fn unchanged(text: &str) -> Self {
        let mut script = Self::new();
        script.push(DiffOperation::Equal(text.to_string()));
        script
    }

    /// Append an operation, merging it into the last one when both have the
    /// same kind. Empty operations are dropped.
    pub fn push(&mut self, op: DiffOperation) {
        if op.text().is_empty() {
            return;
        }
        match (self.ops.last_mut(), op) {
            (Some(DiffOperation::Equal(last)), DiffOperation::Equal(text))
            | (Some(DiffOperation::Insert(last)), DiffOperation::Insert(text))
            | (Some(DiffOperation::Delete(last)), DiffOperation::Delete(text)) => {
                last.push_str(&text);
            }
            (_, op) => self.ops.push(op),
        }
    }

    /// The operations in order.
    pub fn ops(&self) -> &[DiffOperation] {
        &self.ops
    }

    /// Consume the script, returning its operations.
    pub fn into_ops(self) -> Vec<DiffOperation> {
        self.ops
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if the script has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns `true` if the script contains no Insert or Delete.
    pub fn is_identity(&self) -> bool {
        !self.ops.iter().any(DiffOperation::is_edit)
    }

    /// Rebuild the original text (Equal + Delete spans).
    pub fn original_text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DiffOperation::Equal(text) | DiffOperation::Delete(text) => Some(text.as_str()),
                DiffOperation::Insert(_) => None,
            })
            .collect()
    }

    /// Rebuild the current text (Equal + Insert spans).
    pub fn current_text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DiffOperation::Equal(text) | DiffOperation::Insert(text) => Some(text.as_str()),
                DiffOperation::Delete(_) => None,
            })
            .collect()
    }

    /// The script turning the current text back into the original.
    ///
    /// Inserts become deletes and vice versa. Within each run of edits the
    /// deletes are emitted first, as every engine script does.
    pub fn inverted(&self) -> EditScript {
        let mut inverted = EditScript::new();
        let mut pending: Vec<DiffOperation> = Vec::new();
        for op in &self.ops {
            match op {
                DiffOperation::Equal(text) => {
                    pending.sort_by_key(|op| matches!(op, DiffOperation::Insert(_)));
                    pending.drain(..).for_each(|op| inverted.push(op));
                    inverted.push(DiffOperation::Equal(text.clone()));
                }
                DiffOperation::Insert(text) => pending.push(DiffOperation::Delete(text.clone())),
                DiffOperation::Delete(text) => pending.push(DiffOperation::Insert(text.clone())),
            }
        }
        pending.sort_by_key(|op| matches!(op, DiffOperation::Insert(_)));
        pending.into_iter().for_each(|op| inverted.push(op));
        inverted
    }

    /// Iterate over the operations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DiffOperation> {
        self.ops.iter()
    }
}

impl FromIterator<DiffOperation> for EditScript {
    fn from_iter<I: IntoIterator<Item = DiffOperation>>(iter: I) -> Self {
        let mut script = Self::new();
        for op in iter {
            script.push(op);
        }
        script
    }
}

impl IntoIterator for EditScript {
    type Item = DiffOperation;
    type IntoIter = std::vec::IntoIter<DiffOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a DiffOperation;
    type IntoIter = std::slice::Iter<'a, DiffOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Computes edit scripts.
///
/// Implementations must be stateless per call and safe to share between
/// threads. Callers must not rely on a particular tie-break between equally
/// short scripts.
pub trait ScriptEngine: Send + Sync {
    /// Compute the edit script turning `original` into `current`.
    fn script(&self, original: &str, current: &str, granularity: Granularity)
        -> DiffResult<EditScript>;
}

/// Bounds and post-processing applied by [`MyersEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Inputs longer than this many characters (either side) are rejected.
    pub max_input_chars: Option<usize>,
    /// Wall-clock budget per script. Once it runs out the engine stops
    /// searching for a minimal script and returns a coarser, still valid one.
    pub deadline: Option<Duration>,
    /// Fold small equalities into the surrounding edits.
    pub semantic_cleanup: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_input_chars: Some(1_000_000),
            deadline: Some(Duration::from_secs(2)),
            semantic_cleanup: true,
        }
    }
}

impl EngineOptions {
    /// Check that the options describe a usable engine.
    pub fn validate(&self) -> DiffResult<()> {
        if self.max_input_chars == Some(0) {
            return Err(DiffError::InvalidConfig(
                "max_input_chars must be greater than zero".into(),
            ));
        }
        if self.deadline == Some(Duration::ZERO) {
            return Err(DiffError::InvalidConfig("deadline must be non-zero".into()));
        }
        Ok(())
    }

    /// Reject an input above `max_input_chars`.
    pub fn check_input(&self, side: Side, text: &str) -> DiffResult<()> {
        let Some(limit) = self.max_input_chars else {
            return Ok(());
        };
        // Byte length bounds the char count from above; skip the scan when
        // it already fits.
        if text.len() <= limit {
            return Ok(());
        }
        let chars = count_chars(text);
        if chars > limit {
            warn!(%side, chars, limit, "input rejected before diffing");
            return Err(DiffError::ResourceExhausted { side, chars, limit });
        }
        Ok(())
    }
}

/// Myers diff via the `similar` crate, followed by optional semantic cleanup.
#[derive(Clone, Debug, Default)]
pub struct MyersEngine {
    options: EngineOptions,
}

impl MyersEngine {
    /// Create an engine with the given options.
    pub fn new(options: EngineOptions) -> DiffResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The active options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

impl ScriptEngine for MyersEngine {
    fn script(
        &self,
        original: &str,
        current: &str,
        granularity: Granularity,
    ) -> DiffResult<EditScript> {
        self.options.check_input(Side::Original, original)?;
        self.options.check_input(Side::Current, current)?;

        let started = Instant::now();
        let mut config = TextDiff::configure();
        config.algorithm(Algorithm::Myers);
        if let Some(deadline) = self.options.deadline {
            config.deadline(started + deadline);
        }
        let diff = match granularity {
            Granularity::Chars => config.diff_chars(original, current),
            Granularity::Lines => config.diff_lines(original, current),
        };

        let mut script = EditScript::new();
        for change in diff.iter_all_changes() {
            let text = change.value().to_string();
            script.push(match change.tag() {
                ChangeTag::Equal => DiffOperation::Equal(text),
                ChangeTag::Insert => DiffOperation::Insert(text),
                ChangeTag::Delete => DiffOperation::Delete(text),
            });
        }

        if let Some(deadline) = self.options.deadline {
            let elapsed = started.elapsed();
            if elapsed >= deadline {
                warn!(
                    ?granularity,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "diff deadline reached; script may not be minimal"
                );
            }
        }

        if self.options.semantic_cleanup {
            script = cleanup_semantic(script, granularity);
        }
        Ok(script)
    }
}
