//! Paragraph flattener.
//!
//! Walks plain content in document order and emits one [`TextBlock`] per
//! block-level element. A block's text is its own text plus that of its
//! inline descendants; nested blocks become blocks of their own.

use crate::annotate::INDEX_ATTR;
use crate::node::{Element, Node};
use crate::parser;
use crate::result::TextBlock;
use crate::simple_tree::BLOCK_TAGS;
use crate::text::normalise_text;

/// Flattens a plain-content HTML string into text blocks.
#[must_use]
pub fn extract_text_blocks_as_plain_text(plain_content: &str) -> Vec<TextBlock> {
    let root = Element::document(parser::parse_fragment(plain_content));
    let blocks = text_blocks(&root);
    tracing::trace!(blocks = blocks.len(), "flattened plain content");
    blocks
}

/// Text blocks of an owned tree. Text outside any block element forms a
/// block of its own, without index.
#[must_use]
pub fn text_blocks(root: &Element) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    push_block(root, &mut blocks);
    collect_nested(root, &mut blocks);
    blocks
}

fn collect_nested(el: &Element, blocks: &mut Vec<TextBlock>) {
    for child in el.element_children() {
        if is_block(child) {
            push_block(child, blocks);
        }
        collect_nested(child, blocks);
    }
}

fn push_block(el: &Element, blocks: &mut Vec<TextBlock>) {
    let mut raw = String::new();
    own_text(el, &mut raw);
    let text = normalise_text(&raw);
    if text.is_empty() {
        return;
    }
    blocks.push(TextBlock {
        text,
        node_index: el.attr(INDEX_ATTR).map(str::to_string),
    });
}

/// Text of `el` and its inline descendants, stopping at nested blocks.
fn own_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) if child.name == "br" => out.push(' '),
            Node::Element(child) if is_block(child) => out.push(' '),
            Node::Element(child) => own_text(child, out),
            Node::Comment(_) => {}
        }
    }
}

fn is_block(el: &Element) -> bool {
    BLOCK_TAGS.contains(&el.name.as_str())
}
