use serde::{Deserialize, Serialize};

/// Change statistics between two versions of a text document.
///
/// Delta fields describe what changed going from the original text to the
/// current one. Totals are always measured on the current text, whether or
/// not anything changed. Character counts are Unicode scalar values, not
/// bytes.
///
/// `lines_modified` comes from a coarse heuristic: it is
/// `min(added, removed)` over the raw line counts, not a pairing of specific
/// deleted lines with specific inserted lines. Unrelated additions and
/// removals in the same comparison are reported as modifications.
///
/// Serialized with camelCase field names, which is the shape the editor
/// front-end consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub lines_added: usize,
    pub lines_removed: usize,
    pub lines_modified: usize,

    pub chars_added: usize,
    pub chars_removed: usize,
    pub words_added: usize,
    pub words_removed: usize,

    pub total_lines: usize,
    pub total_chars: usize,
    pub total_words: usize,

    /// Line transcript of the comparison, present only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_content: Option<String>,
}

impl DiffStats {
    /// Statistics for a comparison with no differences.
    pub fn unchanged(total_lines: usize, total_chars: usize, total_words: usize) -> Self {
        Self {
            total_lines,
            total_chars,
            total_words,
            ..Default::default()
        }
    }

    /// Returns `true` if every delta field is zero.
    pub fn is_unchanged(&self) -> bool {
        self.lines_added == 0
            && self.lines_removed == 0
            && self.lines_modified == 0
            && self.chars_added == 0
            && self.chars_removed == 0
            && self.words_added == 0
            && self.words_removed == 0
    }

    /// Lines touched in any way: added, removed or modified.
    pub fn lines_changed(&self) -> usize {
        self.lines_added + self.lines_removed + self.lines_modified
    }

    /// A copy of these statistics without the transcript.
    pub fn without_content(&self) -> Self {
        Self {
            diff_content: None,
            ..self.clone()
        }
    }
}
