//! One full comparison: two scripts, aggregation, reconciliation.

use nd_types::DiffStats;

use crate::aggregate::aggregate;
use crate::error::{DiffError, DiffResult};
use crate::reconcile::reconcile;
use crate::script::{EditScript, Granularity, ScriptEngine};
use crate::tokenize::{count_chars, count_lines, count_words};
use crate::transcript::render_transcript;

/// Compute the change statistics between `original` and `current`.
///
/// Identical texts short-circuit without invoking the engine. When
/// `include_content` is set the line transcript is attached as
/// `diff_content`.
///
/// The engine always runs with the lexicographically smaller text as its
/// original; when the caller's order is the other way round the scripts are
/// inverted. Reversed comparisons are therefore exact mirrors, whatever tie
/// the engine picks between equally short scripts.
pub fn compute_stats<E: ScriptEngine + ?Sized>(
    engine: &E,
    original: &str,
    current: &str,
    include_content: bool,
) -> DiffResult<DiffStats> {
    if original == current {
        let mut stats =
            DiffStats::unchanged(count_lines(current), count_chars(current), count_words(current));
        if include_content {
            stats.diff_content = Some(render_transcript(&EditScript::unchanged(current)));
        }
        return Ok(stats);
    }

    let (char_ops, line_ops) = if original <= current {
        (
            engine.script(original, current, Granularity::Chars)?,
            engine.script(original, current, Granularity::Lines)?,
        )
    } else {
        let reversed = |granularity| {
            engine
                .script(current, original, granularity)
                .map(|script| script.inverted())
                .map_err(DiffError::with_sides_swapped)
        };
        (reversed(Granularity::Chars)?, reversed(Granularity::Lines)?)
    };

    let mut stats = reconcile(aggregate(&char_ops, &line_ops, current));
    if include_content {
        stats.diff_content = Some(render_transcript(&line_ops));
    }
    Ok(stats)
}
