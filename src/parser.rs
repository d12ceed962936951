//! Tolerant HTML parsing into the owned tree.
//!
//! Parsing never fails. Whatever html5ever recovers from malformed markup is
//! what later stages see, including the treatment of CDATA sections:
//!
//! - `<![CDATA[...]]>` in ordinary content is tokenized as a bogus comment
//!   ending at the first `>`, so it becomes a [`Node::Comment`] and disappears
//!   once comments are removed.
//! - Inside `<script>` the section is raw script text and is left untouched.
//! - A `//` written before a CDATA marker outside any script is plain text.

use crate::dom;
use crate::encoding;
use crate::node::{Element, Node};

/// Parses a complete HTML document into a `#document` rooted tree.
#[must_use]
pub fn parse(html: &str) -> Element {
    let doc = dom::parse(html);
    let tree = dom::to_owned_tree(&doc);
    tracing::trace!(bytes = html.len(), "parsed document");
    tree
}

/// Parses HTML bytes, sniffing the charset first.
#[must_use]
pub fn parse_bytes(html: &[u8]) -> Element {
    parse(&encoding::decode_html(html))
}

/// Parses an HTML fragment in `<body>` context.
///
/// Every element is kept where it is written, including `<title>`,
/// `<style>` and other elements a full parse would move into `<head>`.
#[must_use]
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let doc = dom::to_owned_tree(&dom::parse_fragment(html));
    doc.children
        .into_iter()
        .find_map(|n| match n {
            Node::Element(el) if el.name == "html" => Some(el.children),
            _ => None,
        })
        .unwrap_or_default()
}

/// Start tags that mark a full document.
const DOCUMENT_TAGS: [&str; 3] = ["html", "head", "body"];

/// Elements whose content the tokenizer reads as text up to the matching
/// end tag.
const RAW_TEXT_TAGS: [&str; 9] = [
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Whether `html` is a full document rather than a fragment.
///
/// True when a doctype or an `<html>`, `<head>` or `<body>` start tag
/// appears as markup. Lookalikes inside comments, attribute values and
/// raw-text elements do not count.
#[must_use]
pub fn is_full_document(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;
    while let Some(offset) = lower[i..].find('<') {
        i += offset + 1;
        let rest = &lower[i..];
        if rest.starts_with("!--") {
            i = lower[i..].find("-->").map_or(bytes.len(), |end| i + end + 3);
            continue;
        }
        if rest.starts_with("!doctype") {
            return true;
        }
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }

        let name_len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        if DOCUMENT_TAGS.contains(&name) {
            return true;
        }
        i = skip_tag(bytes, i + name_len);

        if name == "plaintext" {
            return false;
        }
        if RAW_TEXT_TAGS.contains(&name) {
            let close = format!("</{name}");
            i = lower[i..].find(&close).map_or(bytes.len(), |end| i + end);
        }
    }
    false
}

/// Position just past the `>` closing a start tag, skipping quoted
/// attribute values.
fn skip_tag(bytes: &[u8], mut i: usize) -> usize {
    let mut quote = None;
    while i < bytes.len() {
        match (quote, bytes[i]) {
            (None, b'>') => return i + 1,
            (None, q @ (b'"' | b'\'')) => quote = Some(q),
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}
