//! Inline attribute annotations (`#id .class .class`).
//!
//! The annotation span has already been isolated by the caller; this module
//! only scans it for delimiters. Nothing here can fail: malformed input simply
//! yields fewer attributes.

use crate::buffer::Buffer;
use crate::escape::escape_html;

/// Bytes that end an id or class token.
const TOKEN_END: [char; 5] = ['#', '.', ' ', '{', '}'];

/// Parsed attribute annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeList<'a> {
    /// Value of the first `#id` token, if any.
    pub id: Option<&'a str>,
    /// Class names in annotation order. Duplicates are kept.
    pub classes: Vec<&'a str>,
}

impl<'a> AttributeList<'a> {
    /// Parse an annotation such as `#intro .lead .big` or `{.python .numbered}`.
    ///
    /// The id is taken from the first `#`. Classes are collected from every
    /// `.` in the whole span, independently of where the id was found.
    #[must_use]
    pub fn parse(annotation: &'a str) -> Self {
        let span = unwrap_braces(annotation);

        let id = span
            .find('#')
            .map(|pos| token_at(span, pos + 1))
            .filter(|id| !id.is_empty());

        let classes = span
            .match_indices('.')
            .map(|(pos, _)| token_at(span, pos + 1))
            .filter(|class| !class.is_empty())
            .collect();

        Self { id, classes }
    }

    /// Whether neither an id nor a class was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty()
    }

    /// Write ` id="…"` and ` class="…"` attributes.
    ///
    /// Returns `true` if a class attribute was written.
    pub fn write_to(&self, out: &mut Buffer) -> bool {
        if let Some(id) = self.id {
            out.push_str(" id=\"");
            out.push_str(&escape_html(id));
            out.push('"');
        }

        if self.classes.is_empty() {
            return false;
        }

        out.push_str(" class=\"");
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&escape_html(class));
        }
        out.push('"');
        true
    }
}

/// Parse `annotation` and write its attributes.
///
/// Returns `true` if a class attribute was written.
pub fn write_attributes(out: &mut Buffer, annotation: &str) -> bool {
    AttributeList::parse(annotation).write_to(out)
}

/// Strip one enclosing `{ … }` pair, if present.
fn unwrap_braces(annotation: &str) -> &str {
    let trimmed = annotation.trim();
    trimmed
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(trimmed)
}

/// Token starting at `start`, running to the next delimiter or the end.
fn token_at(span: &str, start: usize) -> &str {
    let rest = &span[start..];
    let end = rest.find(TOKEN_END).unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(annotation: &str) -> (String, bool) {
        let mut out = Buffer::new();
        let has_class = write_attributes(&mut out, annotation);
        (out.into_string(), has_class)
    }

    #[test]
    fn test_parse_id_and_classes() {
        let attrs = AttributeList::parse("#intro .lead .big");
        assert_eq!(attrs.id, Some("intro"));
        assert_eq!(attrs.classes, vec!["lead", "big"]);
    }

    #[test]
    fn test_parse_braced_annotation() {
        let attrs = AttributeList::parse("{.python .numbered}");
        assert_eq!(attrs.id, None);
        assert_eq!(attrs.classes, vec!["python", "numbered"]);
    }

    #[test]
    fn test_parse_class_scan_is_independent_of_id() {
        let attrs = AttributeList::parse(".first #main.second");
        assert_eq!(attrs.id, Some("main"));
        assert_eq!(attrs.classes, vec!["first", "second"]);
    }

    #[test]
    fn test_parse_trailing_block_after_language() {
        let attrs = AttributeList::parse("toml {.config .numbered}");
        assert_eq!(attrs.classes, vec!["config", "numbered"]);
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        let attrs = AttributeList::parse(".b .a .b");
        assert_eq!(attrs.classes, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_parse_first_id_wins() {
        let attrs = AttributeList::parse("#one #two");
        assert_eq!(attrs.id, Some("one"));
    }

    #[test]
    fn test_parse_without_delimiters_is_empty() {
        let attrs = AttributeList::parse("python");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_degenerate_spans() {
        assert!(AttributeList::parse("").is_empty());
        assert!(AttributeList::parse("#").is_empty());
        assert!(AttributeList::parse(".").is_empty());
        assert!(AttributeList::parse("{}").is_empty());
        assert!(AttributeList::parse("# . .").is_empty());
    }

    #[test]
    fn test_parse_multibyte_tokens() {
        let attrs = AttributeList::parse("#überblick .größe");
        assert_eq!(attrs.id, Some("überblick"));
        assert_eq!(attrs.classes, vec!["größe"]);
    }

    #[test]
    fn test_write_id_and_classes() {
        let (html, has_class) = render("#intro .lead .big");
        assert_eq!(html, r#" id="intro" class="lead big""#);
        assert!(has_class);
    }

    #[test]
    fn test_write_id_only() {
        let (html, has_class) = render("#intro");
        assert_eq!(html, r#" id="intro""#);
        assert!(!has_class);
    }

    #[test]
    fn test_write_escapes_tokens() {
        let (html, _) = render(r#"#a"b .c<d"#);
        assert_eq!(html, r#" id="a&quot;b" class="c&lt;d""#);
    }

    #[test]
    fn test_write_nothing_for_plain_text() {
        let (html, has_class) = render("plain words");
        assert_eq!(html, "");
        assert!(!has_class);
    }
}
