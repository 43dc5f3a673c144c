//! Text helpers shared by the classifier, synthesizer and presenters.

/// Length of a string in Unicode scalar values.
///
/// Candidate lengths are compared in characters so multi-byte answers are
/// not penalised against ASCII ones.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Single-line preview of `s`, cut to at most `max_chars` characters.
///
/// Newlines are collapsed to spaces; an ellipsis marks a cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .trim()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if char_len(&flat) <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("short"), 5);
        assert_eq!(char_len("日本語"), 3);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("  hello  ", 20), "hello");
    }

    #[test]
    fn test_preview_flattens_and_cuts() {
        assert_eq!(preview("line one\nline two", 40), "line one line two");
        assert_eq!(preview("abcdefghijkl", 8), "abcde...");
        assert_eq!(preview("日本語テキスト", 5), "日本...");
    }
}
