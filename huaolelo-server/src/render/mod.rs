//! HTML rendering: row sets in, page markup out.
//!
//! No template engine; pages are assembled with `write!` into a `String`.
//! Everything interpolated from the database or the URL goes through
//! [`escape`], and path segments built from data go through
//! [`encode_segment`].

pub mod components;
pub mod entry;
pub mod layout;

/// Base URL of the scanned dictionary archive. Image and PDF paths in the
/// database are stored relative to it.
pub const ARCHIVE_BASE: &str = "https://trussel2.com/HAW/";

/// HTML-escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a path segment (words and anchors carry ʻokina and kahakō).
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Make a stored archive path absolute. Already-absolute URLs pass through.
pub fn archive_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else {
        format!("{ARCHIVE_BASE}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape("ʻāina"), "ʻāina");
    }

    #[test]
    fn encodes_path_segments() {
        assert_eq!(encode_segment("aloha"), "aloha");
        assert_eq!(encode_segment("ʻōlelo"), "%CA%BB%C5%8Dlelo");
    }

    #[test]
    fn archive_urls_resolve() {
        assert_eq!(
            archive_url("images/aalii.jpg"),
            "https://trussel2.com/HAW/images/aalii.jpg"
        );
        assert_eq!(archive_url("https://example.com/x.png"), "https://example.com/x.png");
    }
}
