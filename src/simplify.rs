//! Canonical form of HTML for structural comparison.
//!
//! `simplify` is idempotent: the canonical serialization parses back into the
//! same canonical tree.

use crate::node::{Element, Node};
use crate::parser;
use crate::serialize;
use crate::text::collapse_whitespace;

/// Canonicalizes an HTML string.
///
/// Input without an `<html>`, `<head>` or `<body>` start tag or a doctype
/// is parsed as a `<body>` fragment, keeping every element where it is
/// written, and the result is the canonical fragment only.
#[must_use]
pub fn simplify(html: &str) -> String {
    let mut root = if parser::is_full_document(html) {
        parser::parse(html)
    } else {
        Element::document(parser::parse_fragment(html))
    };
    canonicalize(&mut root);
    serialize::element_to_html(&root)
}

/// Canonicalizes an already parsed tree and serializes it.
#[must_use]
pub fn simplify_node(node: &Node) -> String {
    let mut node = node.clone();
    if let Node::Element(el) = &mut node {
        canonicalize(el);
        return serialize::element_to_html(el);
    }
    match node {
        Node::Text(text) => serialize::to_html(&Node::Text(collapse_whitespace(&text))),
        _ => String::new(),
    }
}

/// Whether two HTML strings have the same canonical form.
#[must_use]
pub fn equivalent(a: &str, b: &str) -> bool {
    simplify(a) == simplify(b)
}

/// Applies the canonical rules in place.
///
/// Comments are dropped, adjacent text is merged, text is collapsed and
/// trimmed (whitespace-only text disappears), empty-valued attributes are
/// dropped and the remaining ones sorted by name.
pub fn canonicalize(el: &mut Element) {
    el.retain_attrs(|_, value| !value.trim().is_empty());
    el.attrs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out: Vec<Node> = Vec::with_capacity(el.children.len());
    for child in el.replace_children(Vec::new()) {
        match child {
            Node::Comment(_) => {}
            Node::Text(text) => {
                if let Some(Node::Text(prev)) = out.last_mut() {
                    prev.push_str(&text);
                } else {
                    out.push(Node::Text(text));
                }
            }
            Node::Element(mut child) => {
                canonicalize(&mut child);
                out.push(Node::Element(child));
            }
        }
    }
    out.retain_mut(|child| match child {
        Node::Text(text) => {
            *text = collapse_whitespace(text);
            !text.is_empty()
        }
        _ => true,
    });
    el.children = out;
}
