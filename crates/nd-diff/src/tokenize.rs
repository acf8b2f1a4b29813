//! Word, line and character counting.
//!
//! The counters see only the text they are given. When applied to an
//! inserted or deleted span they count exactly what is in the span, so a
//! span that starts or ends mid-word counts the fragment as a word.

/// Count words: maximal runs of characters that are neither whitespace nor
/// punctuation.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for c in text.chars() {
        if is_separator(c) {
            in_word = false;
        } else if !in_word {
            in_word = true;
            count += 1;
        }
    }
    count
}

/// Count lines: newline-terminated segments plus a trailing partial line.
pub fn count_lines(text: &str) -> usize {
    let newlines = text.bytes().filter(|&b| b == b'\n').count();
    if text.is_empty() || text.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Count Unicode scalar values.
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || is_punctuation(c)
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            // Latin-1 punctuation
            '\u{00A1}' | '\u{00A7}' | '\u{00AB}' | '\u{00B6}' | '\u{00B7}' | '\u{00BB}' | '\u{00BF}'
            // General Punctuation (dashes, quotes, ellipsis, primes, ...)
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{205E}'
            // Supplemental Punctuation
            | '\u{2E00}'..='\u{2E7F}'
            // CJK Symbols and Punctuation
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
            | '\u{3014}'..='\u{301F}'
            // Fullwidth ASCII punctuation
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}'
        )
}
