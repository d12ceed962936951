//! Plain structured tree builder.
//!
//! Reduces a cleaned subtree to paragraphs, headings, lists, quotes, tables
//! and line breaks, wrapped in a single root `<div>`. Inline formatting is
//! dissolved into its text, containers are flattened away, and every piece of
//! bare text ends up inside a block.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::cleaner::CleanerConfig;
use crate::node::{Element, Node};
use crate::parser;
use crate::text::normalise_text;

/// Elements that keep their structure in the plain tree.
///
/// Anything else (inline formatting, links, unknown and custom elements) is
/// replaced by its children.
pub static STRUCTURAL_TAGS: [&str; 28] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "dl", "dt", "dd", "blockquote",
    "pre", "table", "thead", "tbody", "tfoot", "tr", "td", "th", "caption", "colgroup", "col",
    "figcaption", "br", "hr",
];

/// Containers dissolved once their text has been wrapped.
pub static CONTAINER_TAGS: [&str; 11] = [
    "html", "head", "body", "div", "section", "article", "main", "header", "footer", "aside",
    "figure",
];

/// Block elements that emit one text block each when flattened.
pub static BLOCK_TAGS: [&str; 30] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "dt", "dd", "blockquote", "pre", "td", "th",
    "caption", "figcaption", "div", "section", "article", "main", "header", "footer", "aside",
    "figure", "ul", "ol", "dl", "table", "tr", "address",
];

static KEPT_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    STRUCTURAL_TAGS
        .into_iter()
        .chain(CONTAINER_TAGS)
        .collect()
});

static CONTAINER_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CONTAINER_TAGS.into_iter().collect());

/// Text-bearing blocks that never get nested paragraphs.
static LEAF_TEXT_TAGS: [&str; 8] = ["p", "pre", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Text-bearing blocks that only get paragraphs when they also hold blocks.
static MIXED_TEXT_TAGS: [&str; 8] =
    ["li", "dt", "dd", "td", "th", "caption", "figcaption", "blockquote"];

/// Attributes that survive attribute stripping.
static KEPT_ATTRIBUTES: [&str; 2] = ["colspan", "rowspan"];

/// Marker for a paragraph break produced by `<br>` chains and `<hr>`.
const BREAK: &str = "#break";

/// Parses a whole document, cleans it and builds its plain tree.
#[must_use]
pub fn parse_to_tree(html: &str) -> Element {
    parse_to_tree_with(html, &CleanerConfig::default())
}

/// [`parse_to_tree`] with a custom cleaner configuration.
#[must_use]
pub fn parse_to_tree_with(html: &str, config: &CleanerConfig) -> Element {
    let mut doc = parser::parse(html);
    config.cleaner().clean(&mut doc);
    simplify_structure(doc.children)
}

/// Builds the plain tree of `nodes`, returning the root `<div>`.
#[must_use]
pub fn simplify_structure(nodes: Vec<Node>) -> Element {
    let mut root = Element::with_children("div", nodes);

    root.remove_subtree(|n| matches!(n, Node::Comment(_)));
    decorate_special(&mut root);
    root.unwrap_matching(|el| !KEPT_TAG_SET.contains(el.name.as_str()));
    consolidate_text(&mut root);

    mark_breaks(&mut root);
    consolidate_text(&mut root);
    resolve_breaks(&mut root);
    wrap_bare_text(&mut root);
    root.remove_subtree(|n| n.is_element_named(BREAK));

    normalise_strings(&mut root);
    root.remove_subtree(is_empty_element);
    strip_attributes(&mut root);
    root.unwrap_matching(|el| CONTAINER_TAG_SET.contains(el.name.as_str()));

    tracing::trace!(blocks = root.children.len(), "built plain tree");
    root
}

/// Quotes `<q>`, prefixes `<sub>` with `_` and `<sup>` with `^`, then the
/// elements themselves are unwrapped.
fn decorate_special(el: &mut Element) {
    for child in &mut el.children {
        if let Node::Element(child) = child {
            decorate_special(child);
        }
    }
    match el.name.as_str() {
        "q" => {
            el.children.insert(0, Node::text("\""));
            el.children.push(Node::text("\""));
        }
        "sub" => el.children.insert(0, Node::text("_")),
        "sup" => el.children.insert(0, Node::text("^")),
        _ => return,
    }
    el.name = "span".to_string();
}

fn consolidate_text(el: &mut Element) {
    let mut out: Vec<Node> = Vec::with_capacity(el.children.len());
    for child in el.replace_children(Vec::new()) {
        match child {
            Node::Text(text) => {
                if let Some(Node::Text(prev)) = out.last_mut() {
                    prev.push_str(&text);
                } else {
                    out.push(Node::Text(text));
                }
            }
            Node::Element(mut child) => {
                consolidate_text(&mut child);
                out.push(Node::Element(child));
            }
            comment @ Node::Comment(_) => out.push(comment),
        }
    }
    el.children = out;
}

/// A single `<br>` becomes a space; two or more in a row (whitespace between
/// them ignored) and every `<hr>` become a break marker.
fn mark_breaks(el: &mut Element) {
    let mut out = Vec::with_capacity(el.children.len());
    let mut iter = el.replace_children(Vec::new()).into_iter().peekable();
    while let Some(child) = iter.next() {
        if child.is_element_named("hr") {
            out.push(Node::Element(Element::new(BREAK)));
            continue;
        }
        if !child.is_element_named("br") {
            out.push(child);
            continue;
        }

        let mut count = 1;
        let mut pending = Vec::new();
        while let Some(next) = iter.peek() {
            if next.is_element_named("br") {
                count += 1;
                pending.clear();
                iter.next();
            } else if matches!(next, Node::Text(t) if t.trim().is_empty()) {
                pending.extend(iter.next());
            } else {
                break;
            }
        }
        out.push(if count == 1 {
            Node::text(" ")
        } else {
            Node::Element(Element::new(BREAK))
        });
        out.extend(pending);
    }

    for child in &mut out {
        if let Node::Element(child) = child {
            mark_breaks(child);
        }
    }
    el.children = out;
}

/// Splits paragraphs at break markers and turns markers inside headings and
/// preformatted text into spaces.
fn resolve_breaks(el: &mut Element) {
    let mut out = Vec::with_capacity(el.children.len());
    for child in el.replace_children(Vec::new()) {
        match child {
            Node::Element(p) if p.name == "p" && has_break(&p) => {
                out.extend(split_paragraph(p).into_iter().map(Node::Element));
            }
            other => out.push(other),
        }
    }
    el.children = out;

    if LEAF_TEXT_TAGS.contains(&el.name.as_str()) && has_break(el) {
        for child in &mut el.children {
            if child.is_element_named(BREAK) {
                *child = Node::text(" ");
            }
        }
        consolidate_text(el);
    }

    for child in &mut el.children {
        if let Node::Element(child) = child {
            resolve_breaks(child);
        }
    }
}

fn has_break(el: &Element) -> bool {
    el.children.iter().any(|c| c.is_element_named(BREAK))
}

fn split_paragraph(p: Element) -> Vec<Element> {
    let mut parts = Vec::new();
    let mut current = Vec::new();
    for child in p.children {
        if child.is_element_named(BREAK) {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(child);
        }
    }
    parts.push(current);

    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(|children| Element {
            name: "p".to_string(),
            attrs: p.attrs.clone(),
            children,
        })
        .collect()
}

/// Wraps each non-blank text node in a `<p>` unless its parent already is a
/// text block holding nothing but text.
fn wrap_bare_text(el: &mut Element) {
    let name = el.name.as_str();
    let wrap = if LEAF_TEXT_TAGS.contains(&name) {
        false
    } else if MIXED_TEXT_TAGS.contains(&name) {
        el.children.iter().any(|c| matches!(c, Node::Element(_)))
    } else {
        true
    };

    for child in &mut el.children {
        match child {
            Node::Element(inner) => wrap_bare_text(inner),
            Node::Text(text) if wrap && !text.trim().is_empty() => {
                let text = std::mem::take(text);
                *child = Node::element("p", vec![Node::Text(text)]);
            }
            _ => {}
        }
    }
}

fn normalise_strings(el: &mut Element) {
    el.children.retain_mut(|child| match child {
        Node::Text(text) => {
            *text = normalise_text(text);
            !text.is_empty()
        }
        Node::Element(inner) => {
            normalise_strings(inner);
            true
        }
        Node::Comment(_) => false,
    });
}

/// Elements without text are dropped; table cells survive so that rows keep
/// their shape.
fn is_empty_element(node: &Node) -> bool {
    match node {
        Node::Element(el) => {
            !matches!(el.name.as_str(), "td" | "th") && el.text_content().trim().is_empty()
        }
        _ => false,
    }
}

fn strip_attributes(el: &mut Element) {
    el.retain_attrs(|name, _| KEPT_ATTRIBUTES.contains(&name));
    for child in &mut el.children {
        if let Node::Element(child) = child {
            strip_attributes(child);
        }
    }
}
