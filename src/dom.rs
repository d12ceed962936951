//! `dom_query` adapter.
//!
//! html5ever (through `dom_query`) does the tolerant parsing. This module
//! converts its shared tree into the owned [`Node`] tree and offers the few
//! selection helpers the metadata extractors need.

pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

use dom_query::{NodeData, NodeRef};

use crate::node::{Element, Node};

/// Nesting depth after which a subtree is flattened into a single text node.
pub const MAX_TREE_DEPTH: usize = 512;

/// Parses an HTML string into a `dom_query` document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parses an HTML fragment in `<body>` context.
///
/// Metadata and raw-text elements stay where they are written instead of
/// moving into `<head>`. The parsed nodes are children of a synthetic
/// `<html>` element under the fragment root.
#[inline]
#[must_use]
pub fn parse_fragment(html: &str) -> Document {
    Document::fragment(html)
}

/// Get any attribute value of the first node in the selection.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get all text content of the selection.
///
/// Returns `StrTendril` so callers can trim without copying.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Trimmed, non-empty text of the first element matching `selector`.
#[must_use]
pub fn first_text(doc: &Document, selector: &str) -> Option<String> {
    doc.select(selector).iter().find_map(|sel| {
        let text = text_content(&sel);
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Converts a parsed document into an owned tree rooted at `#document`.
///
/// Doctype and processing-instruction nodes are dropped. `<template>`
/// contents live outside the main tree in html5ever and are not visited.
#[must_use]
pub fn to_owned_tree(doc: &Document) -> Element {
    let root = doc.root();
    Element::document(convert_children(&root, 0))
}

enum Kind {
    Element,
    Text(String),
    Comment(String),
}

fn kind_of(node: &NodeRef) -> Option<Kind> {
    node.query(|tree_node| match &tree_node.data {
        NodeData::Element(_) => Some(Kind::Element),
        NodeData::Text { contents } => Some(Kind::Text(contents.to_string())),
        NodeData::Comment { contents } => Some(Kind::Comment(contents.to_string())),
        _ => None,
    })
    .flatten()
}

fn convert_children(parent: &NodeRef, depth: usize) -> Vec<Node> {
    let mut out = Vec::new();
    let mut cursor = parent.first_child();
    while let Some(child) = cursor {
        if let Some(node) = convert(&child, depth) {
            out.push(node);
        }
        cursor = child.next_sibling();
    }
    out
}

fn convert(node: &NodeRef, depth: usize) -> Option<Node> {
    match kind_of(node)? {
        Kind::Text(text) => Some(Node::Text(text)),
        Kind::Comment(text) => Some(Node::Comment(text)),
        Kind::Element => {
            let name = node
                .node_name()
                .map(|n| n.to_lowercase())
                .unwrap_or_default();
            let attrs = node
                .attrs()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            let children = if depth >= MAX_TREE_DEPTH {
                tracing::warn!(depth, tag = %name, "tree too deep, flattening subtree to text");
                vec![Node::Text(node.text().to_string())]
            } else {
                convert_children(node, depth + 1)
            };
            Some(Node::Element(Element {
                name,
                attrs,
                children,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_helpers() {
        let doc = parse(r#"<html><body><h1 class="t"> Title </h1><p>x</p></body></html>"#);
        let h1 = doc.select("h1");
        assert_eq!(get_attribute(&h1, "class"), Some("t".to_string()));
        assert_eq!(get_attribute(&h1, "id"), None);
        assert_eq!(&*text_content(&h1), " Title ");
        assert_eq!(first_text(&doc, "h1"), Some("Title".to_string()));
        assert_eq!(first_text(&doc, "h2"), None);
    }

    #[test]
    fn test_owned_tree_shape() {
        let doc = parse("<!DOCTYPE html><html><head></head><body><p id=\"a\">Hi<!--c--></p></body></html>");
        let tree = to_owned_tree(&doc);
        assert!(tree.is_document());
        let names: Vec<_> = tree.element_children().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["html"]);

        let p = tree.find_element(|e| e.name == "p");
        let p = p.map(|p| (p.attr("id"), p.children.clone()));
        assert_eq!(
            p,
            Some((Some("a"), vec![Node::text("Hi"), Node::Comment("c".into())]))
        );
    }

    #[test]
    fn test_fragment_keeps_head_elements_in_place() {
        let tree = to_owned_tree(&parse_fragment("<title>T</title><p>x</p>"));
        let names: Vec<_> = tree.element_children().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["html"]);

        let html = tree.find_element(|e| e.name == "html");
        let children: Vec<_> = html
            .map(|h| h.element_children().map(|e| e.name.clone()).collect())
            .unwrap_or_default();
        assert_eq!(children, vec!["title", "p"]);
    }

    #[test]
    fn test_deep_nesting_is_flattened() {
        let depth = MAX_TREE_DEPTH + 20;
        let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let tree = to_owned_tree(&parse(&html));
        assert!(tree.text_content().contains("deep"));
    }
}
