//! Semantic cleanup of edit scripts.
//!
//! A minimal edit script often shreds a rewritten phrase into many tiny
//! edits held together by one- or two-character coincidental matches. The
//! cleanup pass folds every equality that is no longer than the largest edit
//! on *both* of its sides into a single Delete + Insert pair. The result is
//! no longer minimal, which can raise add/remove counts, but it reads the
//! way a person would describe the change.
//!
//! Lengths are measured in tokens of the script's granularity: characters
//! for a character script, lines for a line script.

use crate::script::{DiffOperation, EditScript, Granularity};
use crate::tokenize::{count_chars, count_lines};

/// A run of edits between two equalities, as a span of the source ops.
///
/// Folding only widens the span and adds the counts, so the text is not
/// touched until the script is rebuilt.
#[derive(Debug, Clone, Copy)]
struct Edit {
    start: usize,
    end: usize,
    deleted: usize,
    inserted: usize,
}

impl Edit {
    fn at(index: usize) -> Self {
        Self {
            start: index,
            end: index,
            deleted: 0,
            inserted: 0,
        }
    }

    fn largest(&self) -> usize {
        self.deleted.max(self.inserted)
    }
}

#[derive(Debug, Clone, Copy)]
enum Run {
    Equal { index: usize, units: usize },
    Edit(Edit),
}

/// Fold small equalities into surrounding edits until none qualifies.
///
/// Runs in time linear in the script length.
pub fn cleanup_semantic(script: EditScript, granularity: Granularity) -> EditScript {
    let units = |text: &str| match granularity {
        Granularity::Chars => count_chars(text),
        Granularity::Lines => count_lines(text),
    };

    let ops = script.into_ops();
    let mut out: Vec<Run> = Vec::new();
    for run in into_runs(&ops, units) {
        match run {
            Run::Equal { .. } => out.push(run),
            Run::Edit(_) => {
                out.push(run);
                // A merged edit is larger than either part, so the equality
                // to its left may qualify now as well.
                while let Some(merged) = fold_last(&out) {
                    out.truncate(out.len() - 3);
                    out.push(Run::Edit(merged));
                }
            }
        }
    }

    let mut cleaned = EditScript::new();
    for run in out {
        match run {
            Run::Equal { index, .. } => cleaned.push(ops[index].clone()),
            Run::Edit(edit) => {
                let span = &ops[edit.start..edit.end];
                let deleted: String = span
                    .iter()
                    .filter(|op| !matches!(op, DiffOperation::Insert(_)))
                    .map(DiffOperation::text)
                    .collect();
                let inserted: String = span
                    .iter()
                    .filter(|op| !matches!(op, DiffOperation::Delete(_)))
                    .map(DiffOperation::text)
                    .collect();
                cleaned.push(DiffOperation::Delete(deleted));
                cleaned.push(DiffOperation::Insert(inserted));
            }
        }
    }
    cleaned
}

/// Merge the last three runs if they are Edit, Equal, Edit and the equality
/// is no longer than the largest edit on both sides.
fn fold_last(runs: &[Run]) -> Option<Edit> {
    let [.., Run::Edit(left), Run::Equal { units, .. }, Run::Edit(right)] = runs else {
        return None;
    };
    if *units > left.largest() || *units > right.largest() {
        return None;
    }
    Some(Edit {
        start: left.start,
        end: right.end,
        deleted: left.deleted + units + right.deleted,
        inserted: left.inserted + units + right.inserted,
    })
}

/// Group the ops into alternating equality and edit runs, measuring each
/// op once.
fn into_runs(ops: &[DiffOperation], units: impl Fn(&str) -> usize) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut pending: Option<Edit> = None;
    for (index, op) in ops.iter().enumerate() {
        match op {
            DiffOperation::Equal(text) => {
                if let Some(edit) = pending.take() {
                    runs.push(Run::Edit(edit));
                }
                runs.push(Run::Equal {
                    index,
                    units: units(text),
                });
            }
            DiffOperation::Delete(text) => {
                let edit = pending.get_or_insert_with(|| Edit::at(index));
                edit.end = index + 1;
                edit.deleted += units(text);
            }
            DiffOperation::Insert(text) => {
                let edit = pending.get_or_insert_with(|| Edit::at(index));
                edit.end = index + 1;
                edit.inserted += units(text);
            }
        }
    }
    if let Some(edit) = pending {
        runs.push(Run::Edit(edit));
    }
    runs
}
