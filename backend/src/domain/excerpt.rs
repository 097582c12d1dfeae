//! Whitespace-normalised previews of long text fields.

/// Preview length used by the question feed.
pub const DEFAULT_EXCERPT_LEN: usize = 140;

const ELLIPSIS: char = '…';

/// Collapse whitespace runs to single spaces and trim both ends.
///
/// # Examples
/// ```
/// use backend::domain::excerpt::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
/// ```
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}

/// Build a preview of `text` no longer than `max_len` characters.
///
/// The text is normalised with [`normalize_whitespace`]. When the result is
/// longer than `max_len` it is cut to `max_len - 1` characters and an
/// ellipsis is appended. Lengths count `char`s, so a cut never lands inside a
/// code point.
///
/// # Examples
/// ```
/// use backend::domain::excerpt::make_excerpt;
///
/// assert_eq!(make_excerpt("  hello   world  ", 8), "hello w…");
/// assert_eq!(make_excerpt("short", 8), "short");
/// ```
#[must_use]
pub fn make_excerpt(text: &str, max_len: usize) -> String {
    let normalized = normalize_whitespace(text);
    if normalized.chars().count() <= max_len {
        return normalized;
    }
    let Some(keep) = max_len.checked_sub(1) else {
        return String::new();
    };
    let mut excerpt: String = normalized.chars().take(keep).collect();
    excerpt.push(ELLIPSIS);
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  hello   world  ", 8, "hello w…")]
    #[case("hello world", 11, "hello world")]
    #[case("hello world", 10, "hello wor…")]
    #[case("line\none\r\n\ttwo", 140, "line one two")]
    #[case("   ", 140, "")]
    #[case("abc", 1, "…")]
    #[case("abc", 0, "")]
    #[case("", 0, "")]
    fn produces_expected_excerpts(
        #[case] input: &str,
        #[case] max_len: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(make_excerpt(input, max_len), expected);
    }

    #[rstest]
    fn truncates_on_character_boundaries() {
        let excerpt = make_excerpt("안녕하세요 서울", 4);
        assert_eq!(excerpt, "안녕하…");
        assert_eq!(excerpt.chars().count(), 4);
    }

    #[rstest]
    fn never_exceeds_bound() {
        let text = "word ".repeat(200);
        for max_len in 0..=DEFAULT_EXCERPT_LEN {
            let excerpt = make_excerpt(&text, max_len);
            assert!(excerpt.chars().count() <= max_len, "max_len {max_len}");
        }
    }

    #[rstest]
    fn returns_normalized_text_when_within_bound() {
        let text = "  Where   can I\nfind good\ttteokbokki?  ";
        assert_eq!(
            make_excerpt(text, DEFAULT_EXCERPT_LEN),
            normalize_whitespace(text)
        );
    }
}
