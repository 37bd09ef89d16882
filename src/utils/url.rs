//! URL path helpers.
//!
//! Slugs and usernames come from the backend verbatim. Every place that
//! turns one into a link or an upstream path goes through `encode_segment`,
//! and the router undoes it with `decode_segment`.

use percent_encoding::{
    AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};
use std::borrow::Cow;

/// Unreserved characters (RFC 3986) stay literal.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Characters that could end a quoted CSS `url('...')` or its attribute.
const CSS_URL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'\\')
    .add(b'<')
    .add(b'>');

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, SEGMENT).into()
}

/// Make a URL safe to place inside CSS `url('...')`.
///
/// Separators are kept, so the URL still resolves the same way.
pub fn encode_css_url(url: &str) -> Cow<'_, str> {
    utf8_percent_encode(url, CSS_URL).into()
}

/// Decode a path segment; invalid UTF-8 is replaced.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    percent_decode_str(segment).decode_utf8_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert!(matches!(encode_segment("hello-world"), Cow::Borrowed("hello-world")));
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_segment("what?#x"), "what%3F%23x");
        assert_eq!(encode_segment("café"), "caf%C3%A9");
    }

    #[test]
    fn test_encode_css_url() {
        assert_eq!(encode_css_url("https://x.io/a/b.png?w=1&h=2"), "https://x.io/a/b.png?w=1&h=2");
        assert_eq!(encode_css_url("/a.png') ;x:url('y"), "/a.png%27%29%20;x:url%28%27y");
        assert_eq!(encode_css_url("/a\\b\"c"), "/a%5Cb%22c");
    }

    #[test]
    fn test_decode_reverses_encode() {
        let slug = "hello world café";
        assert_eq!(decode_segment(&encode_segment(slug)), slug);
    }
}
