//! Template substitution
//!
//! Replaces `{{key}}` placeholders in report templates with payload values.
//!
//! # Usage
//!
//! ```
//! use scribecheck_application::template::substitute;
//!
//! let result = substitute("<b>{{efficiency}}</b> in {{responseTime}}ms", |key| match key {
//!     "efficiency" => Some("Good".to_string()),
//!     "responseTime" => Some("7500".to_string()),
//!     _ => None,
//! });
//! assert_eq!(result.rendered, "<b>Good</b> in 7500ms");
//! assert!(result.is_complete());
//! ```

mod parser;

pub use parser::{Placeholder, has_placeholders, parse_placeholders};

/// Result of substituting a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Template text with every known placeholder replaced.
    pub rendered: String,

    /// Keys that had no value; their placeholders are left verbatim.
    pub unresolved: Vec<String>,
}

impl Substitution {
    /// Whether every placeholder was replaced.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Replaces placeholders using `lookup`.
pub fn substitute<F>(template: &str, lookup: F) -> Substitution
where
    F: Fn(&str) -> Option<String>,
{
    let placeholders = parse_placeholders(template);
    if placeholders.is_empty() {
        return Substitution {
            rendered: template.to_string(),
            unresolved: Vec::new(),
        };
    }

    let mut rendered = String::with_capacity(template.len());
    let mut unresolved = Vec::new();
    let mut cursor = 0;

    for placeholder in placeholders {
        rendered.push_str(&template[cursor..placeholder.span.start]);
        match lookup(&placeholder.key) {
            Some(value) => rendered.push_str(&value),
            None => {
                rendered.push_str(&template[placeholder.span.clone()]);
                if !unresolved.contains(&placeholder.key) {
                    unresolved.push(placeholder.key);
                }
            }
        }
        cursor = placeholder.span.end;
    }
    rendered.push_str(&template[cursor..]);

    Substitution {
        rendered,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(key: &str) -> Option<String> {
        match key {
            "transcriptionLength" => Some("1000".to_string()),
            "summaryLength" => Some("200".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_substitutes_all_occurrences() {
        let result = substitute("data: [{{transcriptionLength}}, {{summaryLength}}] / {{summaryLength}}", lookup);
        assert_eq!(result.rendered, "data: [1000, 200] / 200");
        assert!(result.is_complete());
    }

    #[test]
    fn test_unknown_keys_are_left_in_place() {
        let result = substitute("{{summaryLength}} {{missing}} {{missing}}", lookup);
        assert_eq!(result.rendered, "200 {{missing}} {{missing}}");
        assert_eq!(result.unresolved, vec!["missing".to_string()]);
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let result = substitute("body { color: #333; }", lookup);
        assert_eq!(result.rendered, "body { color: #333; }");
    }
}
