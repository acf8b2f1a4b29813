//! Fold edit scripts into change statistics.

use nd_types::DiffStats;

use crate::script::{DiffOperation, EditScript};
use crate::tokenize::{count_chars, count_lines, count_words};

/// Build raw (unreconciled) statistics for a comparison.
///
/// Character and word counts come from `char_ops`, line counts from
/// `line_ops`. Totals are measured on `current` directly, never derived from
/// the deltas. `lines_modified` is left at zero; see
/// [`reconcile`](crate::reconcile::reconcile).
pub fn aggregate(char_ops: &EditScript, line_ops: &EditScript, current: &str) -> DiffStats {
    let mut stats = DiffStats::unchanged(count_lines(current), count_chars(current), count_words(current));

    for op in char_ops {
        match op {
            DiffOperation::Equal(_) => {}
            DiffOperation::Insert(text) => {
                stats.chars_added += count_chars(text);
                stats.words_added += count_words(text);
            }
            DiffOperation::Delete(text) => {
                stats.chars_removed += count_chars(text);
                stats.words_removed += count_words(text);
            }
        }
    }

    for op in line_ops {
        match op {
            DiffOperation::Equal(_) => {}
            DiffOperation::Insert(text) => stats.lines_added += count_lines(text),
            DiffOperation::Delete(text) => stats.lines_removed += count_lines(text),
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(ops: Vec<DiffOperation>) -> EditScript {
        ops.into_iter().collect()
    }

    #[test]
    fn inserts_and_deletes_are_counted_separately() {
        let chars = script(vec![
            DiffOperation::Equal("hello ".into()),
            DiffOperation::Delete("cruel world".into()),
            DiffOperation::Insert("there".into()),
        ]);
        let lines = script(vec![
            DiffOperation::Delete("hello cruel world".into()),
            DiffOperation::Insert("hello there".into()),
        ]);
        let stats = aggregate(&chars, &lines, "hello there");

        assert_eq!(stats.chars_added, 5);
        assert_eq!(stats.chars_removed, 11);
        assert_eq!(stats.words_added, 1);
        assert_eq!(stats.words_removed, 2);
        assert_eq!(stats.lines_added, 1);
        assert_eq!(stats.lines_removed, 1);
        assert_eq!(stats.lines_modified, 0);
    }

    #[test]
    fn totals_come_from_current_text() {
        let current = "one two\nthree\n";
        let stats = aggregate(&EditScript::unchanged(current), &EditScript::unchanged(current), current);
        assert!(stats.is_unchanged());
        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.total_chars, 14);
    }

    #[test]
    fn equal_operations_contribute_nothing() {
        let ops = script(vec![DiffOperation::Equal("lots of\nunchanged text\n".into())]);
        let stats = aggregate(&ops, &ops, "");
        assert!(stats.is_unchanged());
        assert_eq!(stats.total_chars, 0);
    }

    #[test]
    fn spans_are_counted_without_context() {
        // Inserting "p" into "hel lo" to get "help lo": the span is one word
        // fragment even though it joins an existing word.
        let chars = script(vec![
            DiffOperation::Equal("hel".into()),
            DiffOperation::Insert("p".into()),
            DiffOperation::Equal(" lo".into()),
        ]);
        let stats = aggregate(&chars, &EditScript::new(), "help lo");
        assert_eq!(stats.chars_added, 1);
        assert_eq!(stats.words_added, 1);
    }

    #[test]
    fn multibyte_chars_count_once() {
        let chars = script(vec![DiffOperation::Insert("我爱你".into())]);
        let stats = aggregate(&chars, &EditScript::new(), "我爱你");
        assert_eq!(stats.chars_added, 3);
        assert_eq!(stats.total_chars, 3);
    }
}
