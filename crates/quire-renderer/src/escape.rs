//! HTML text and href escaping.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes left untouched inside an href. `&` and `'` pass the percent encoder
/// and are entity-escaped afterwards; `%` is kept so pre-encoded URLs survive.
const HREF_UNSAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'+')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b',')
    .remove(b'%')
    .remove(b'#')
    .remove(b'@')
    .remove(b'?')
    .remove(b'=')
    .remove(b';')
    .remove(b':')
    .remove(b'/')
    .remove(b'$')
    .remove(b'~')
    .remove(b'&')
    .remove(b'\'');

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut result = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape a URL for use inside an `href` or `src` attribute.
///
/// Bytes outside the URL-safe set are percent-encoded; `&` and `'` become
/// entities.
#[must_use]
pub fn escape_href(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    for chunk in utf8_percent_encode(url, HREF_UNSAFE) {
        for c in chunk.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '\'' => result.push_str("&#x27;"),
                _ => result.push(c),
            }
        }
    }
    result
}
