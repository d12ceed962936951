//! Charset sniffing for byte input.
//!
//! Order of precedence: byte order mark, then a `<meta>` declaration in the
//! first kilobyte, then UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How many leading bytes are searched for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset=...>` and the `http-equiv` content-type form.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?\bcharset\s*=\s*["']?\s*([A-Za-z0-9_.:\-]+)"#)
        .expect("valid regex")
});

/// Detects the character encoding of an HTML byte stream.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        // A UTF-16 declaration inside ASCII-compatible bytes decodes as UTF-8.
        .map(Encoding::output_encoding)
        .unwrap_or(UTF_8)
}

/// Decodes HTML bytes into a string, replacing malformed sequences.
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = sniff_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    tracing::debug!(encoding = used.name(), had_errors, "decoded byte input");
    decoded.into_owned()
}

fn declared_charset(head: &str) -> Option<String> {
    META_CHARSET_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_utf8() {
        assert_eq!(sniff_encoding(b"<p>plain</p>"), UTF_8);
    }

    #[test]
    fn test_meta_charset() {
        let html = br#"<html><head><meta charset="windows-1252"></head></html>"#;
        assert_eq!(sniff_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn test_http_equiv_charset() {
        let html = br#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=ISO-8859-1">"#;
        // WHATWG maps latin1 labels to windows-1252.
        assert_eq!(sniff_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn test_bom_wins_over_meta() {
        let mut html = vec![0xEF, 0xBB, 0xBF];
        html.extend_from_slice(br#"<meta charset="windows-1252"><p>x</p>"#);
        assert_eq!(sniff_encoding(&html), UTF_8);
        assert!(decode_html(&html).starts_with("<meta"));
    }

    #[test]
    fn test_utf16_declaration_ignored() {
        let html = br#"<meta charset="utf-16"><p>x</p>"#;
        assert_eq!(sniff_encoding(html), UTF_8);
    }

    #[test]
    fn test_decode_latin1() {
        let html = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
        assert!(decode_html(html).contains("Caf\u{e9}"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let decoded = decode_html(b"<p>bad \xFF byte</p>");
        assert!(decoded.contains('\u{fffd}'));
        assert!(decoded.contains("byte"));
    }
}
