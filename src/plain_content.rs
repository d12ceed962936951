//! Plain content: the extracted article as plain structured HTML.
//!
//! The extractor's HTML is cleaned again, reduced to the plain tree, leaf
//! paragraphs and list items are flattened to a single normalized text node,
//! and the annotator runs last so digests cover the final text.

use crate::annotate::annotate;
use crate::cleaner::CleanerConfig;
use crate::node::{Element, Node};
use crate::parser;
use crate::serialize::element_to_html;
use crate::simple_tree::{simplify_structure, BLOCK_TAGS};
use crate::text::normalise_text;

/// Elements whose whole text is collapsed into one text node.
const FLATTENED_TAGS: [&str; 2] = ["p", "li"];

/// Builds plain content from extracted article HTML with the default cleaner.
#[must_use]
pub fn plain_content(content: &str, content_digests: bool, node_indexes: bool) -> String {
    plain_content_with(content, &CleanerConfig::default(), content_digests, node_indexes)
}

/// [`plain_content`] with a custom cleaner configuration.
#[must_use]
pub fn plain_content_with(
    content: &str,
    config: &CleanerConfig,
    content_digests: bool,
    node_indexes: bool,
) -> String {
    let mut root = plain_tree(content, config);
    annotate(&mut root, content_digests, node_indexes);
    element_to_html(&root)
}

/// Unannotated plain tree of extracted article HTML.
#[must_use]
pub fn plain_tree(content: &str, config: &CleanerConfig) -> Element {
    let mut doc = Element::document(parser::parse_fragment(content));
    config.cleaner().clean(&mut doc);
    let mut root = simplify_structure(doc.children);
    flatten_leaves(&mut root);
    root
}

fn flatten_leaves(el: &mut Element) {
    let is_leaf = FLATTENED_TAGS.contains(&el.name.as_str())
        && !el
            .element_children()
            .any(|child| BLOCK_TAGS.contains(&child.name.as_str()));
    if is_leaf {
        let text = normalise_text(&el.text_content());
        el.replace_children(vec![Node::Text(text)]);
        return;
    }
    for child in &mut el.children {
        if let Node::Element(child) = child {
            flatten_leaves(child);
        }
    }
}
