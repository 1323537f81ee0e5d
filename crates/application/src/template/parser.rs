//! Placeholder parser for {{key}} syntax
//!
//! Parses template text to extract placeholder references with their positions.

use std::ops::Range;

/// A placeholder found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The key (without {{ }}), trimmed.
    pub key: String,

    /// Byte range in the original string, braces included.
    pub span: Range<usize>,
}

impl Placeholder {
    /// Creates a new placeholder.
    #[must_use]
    pub fn new(key: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            key: key.into(),
            span,
        }
    }
}

/// Parses a template and extracts all placeholders, in order.
///
/// An unterminated `{{` ends parsing; text after it is left as is.
///
/// # Examples
///
/// ```
/// use scribecheck_application::template::parse_placeholders;
///
/// let found = parse_placeholders("<p>{{ summaryLength }} of {{transcriptionLength}}</p>");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].key, "summaryLength");
/// assert_eq!(found[1].span, 26..49);
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch != '{' || !matches!(chars.peek(), Some((_, '{'))) {
            continue;
        }
        chars.next();
        let start = i;
        let mut key = String::new();
        let mut found_end = false;

        while let Some((_, ch)) = chars.next() {
            if ch == '}' {
                if let Some((end_idx, '}')) = chars.peek() {
                    let end = *end_idx + 1;
                    chars.next();

                    let trimmed = key.trim();
                    if !trimmed.is_empty() {
                        placeholders.push(Placeholder::new(trimmed, start..end));
                    }
                    found_end = true;
                    break;
                }
            }
            key.push(ch);
        }

        if !found_end {
            break;
        }
    }

    placeholders
}

/// Returns true if the input contains any placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    !parse_placeholders(input).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        let found = parse_placeholders("{{responseTime}}ms");
        assert_eq!(found, vec![Placeholder::new("responseTime", 0..16)]);
    }

    #[test]
    fn test_repeated_placeholder() {
        let found = parse_placeholders("data: [{{a}}, {{b}}], total {{a}}");
        let keys: Vec<_> = found.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_single_braces_are_text() {
        assert!(parse_placeholders("body { margin: 0; }").is_empty());
        assert!(!has_placeholders("{ a }"));
    }

    #[test]
    fn test_empty_placeholder_is_ignored() {
        assert!(parse_placeholders("{{  }}").is_empty());
    }

    #[test]
    fn test_unterminated_placeholder() {
        let found = parse_placeholders("{{ok}} then {{broken");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "ok");
    }

    #[test]
    fn test_multibyte_text_keeps_byte_spans() {
        let input = "🎤 {{transcriptionLength}}";
        let found = parse_placeholders(input);
        assert_eq!(&input[found[0].span.clone()], "{{transcriptionLength}}");
    }
}
