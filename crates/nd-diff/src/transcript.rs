//! Human-readable rendering of a line edit script.
//!
//! Used for the optional expandable change view. Every line of both texts
//! appears exactly once, prefixed with `' '` (unchanged), `'-'` (removed) or
//! `'+'` (added). No hunking or context trimming is done here; presentation
//! belongs to the caller.

use std::fmt::Write as _;

use crate::script::{DiffOperation, EditScript};

/// A single line of a transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// A line present in both texts.
    Context(String),
    /// A line added in the current text.
    Added(String),
    /// A line removed from the original text.
    Removed(String),
}

impl DiffLine {
    fn prefix(&self) -> char {
        match self {
            Self::Context(_) => ' ',
            Self::Added(_) => '+',
            Self::Removed(_) => '-',
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Context(text) | Self::Added(text) | Self::Removed(text) => text,
        }
    }
}

/// Split a line script into transcript lines, trailing newlines stripped.
pub fn transcript_lines(line_ops: &EditScript) -> Vec<DiffLine> {
    let mut lines = Vec::new();
    for op in line_ops {
        let wrap: fn(String) -> DiffLine = match op {
            DiffOperation::Equal(_) => DiffLine::Context,
            DiffOperation::Insert(_) => DiffLine::Added,
            DiffOperation::Delete(_) => DiffLine::Removed,
        };
        for line in op.text().split_inclusive('\n') {
            let line = line.strip_suffix('\n').unwrap_or(line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            lines.push(wrap(line.to_string()));
        }
    }
    lines
}

/// Render a line script as prefixed text, one line per transcript line.
pub fn render_transcript(line_ops: &EditScript) -> String {
    let mut out = String::new();
    for line in transcript_lines(line_ops) {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}{}", line.prefix(), line.text());
    }
    out
}
