//! Content digests and node indexes.
//!
//! Digests are Merkle-style: a text node hashes its trimmed text, an element
//! hashes its tag, its own attributes and its children's digests in order.
//! Annotation attributes never feed into a digest, so annotating twice gives
//! the same result.

use sha2::{Digest, Sha256};

use crate::node::{Element, Node};

/// Attribute holding the content digest.
pub const DIGEST_ATTR: &str = "data-content-digest";

/// Attribute holding the node index.
pub const INDEX_ATTR: &str = "data-node-index";

/// Annotates `root` and all its descendant elements in place.
pub fn annotate(root: &mut Element, with_digest: bool, with_index: bool) {
    if with_index {
        add_node_indexes(root);
    }
    if with_digest {
        add_content_digests(root);
    }
}

/// Sets `data-content-digest` on every element, children before parents.
pub fn add_content_digests(root: &mut Element) -> String {
    let child_digests: Vec<String> = root
        .children
        .iter_mut()
        .filter_map(|child| match child {
            Node::Element(el) => Some(add_content_digests(el)),
            Node::Text(text) => text_digest(text),
            Node::Comment(_) => None,
        })
        .collect();
    let digest = element_digest(root, &child_digests);
    root.set_attr(DIGEST_ATTR, digest.clone());
    digest
}

/// Digest of a node without modifying it. Empty text has no digest.
#[must_use]
pub fn content_digest(node: &Node) -> Option<String> {
    match node {
        Node::Element(el) => Some(compute_element_digest(el)),
        Node::Text(text) => text_digest(text),
        Node::Comment(_) => None,
    }
}

fn compute_element_digest(el: &Element) -> String {
    let child_digests: Vec<String> = el.children.iter().filter_map(content_digest).collect();
    element_digest(el, &child_digests)
}

fn text_digest(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(hex::encode(Sha256::digest(text.as_bytes())))
}

fn element_digest(el: &Element, child_digests: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"<");
    hasher.update(el.name.as_bytes());
    for (name, value) in &el.attrs {
        if name == DIGEST_ATTR || name == INDEX_ATTR {
            continue;
        }
        hasher.update(b" ");
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value.as_bytes());
    }
    hasher.update(b">");
    for digest in child_digests {
        hasher.update(digest.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Sets `data-node-index` on every element: the root is `"0"`, each element
/// child appends its 0-based position among element siblings.
pub fn add_node_indexes(root: &mut Element) {
    assign_index(root, "0".to_string());
}

fn assign_index(el: &mut Element, index: String) {
    let mut position = 0usize;
    for child in &mut el.children {
        if let Node::Element(child) = child {
            assign_index(child, format!("{index}.{position}"));
            position += 1;
        }
    }
    el.set_attr(INDEX_ATTR, index);
}

/// Numeric components of a node index, for ordering comparisons.
#[must_use]
pub fn index_path(index: &str) -> Vec<usize> {
    index.split('.').filter_map(|part| part.parse().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(text: &str) -> Element {
        Element::with_children(
            "div",
            vec![
                Node::element("p", vec![Node::text(text)]),
                Node::text("   "),
                Node::element("ul", vec![Node::element("li", vec![Node::text("item")])]),
            ],
        )
    }

    fn attr<'a>(el: &'a Element, name: &str) -> &'a str {
        el.attr(name).unwrap_or_default()
    }

    #[test]
    fn test_text_digest() {
        let digest = content_digest(&Node::text("  hello ")).unwrap_or_default();
        assert_eq!(
            digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(content_digest(&Node::text("  ")).is_none());
        assert!(content_digest(&Node::Comment("x".into())).is_none());
    }

    #[test]
    fn test_identical_subtrees_identical_digests() {
        let mut a = tree("same");
        let mut b = tree("same");
        assert_eq!(add_content_digests(&mut a), add_content_digests(&mut b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_change_propagates_to_ancestors() {
        let mut a = tree("one");
        let mut b = tree("two");
        add_content_digests(&mut a);
        add_content_digests(&mut b);

        assert_ne!(attr(&a, DIGEST_ATTR), attr(&b, DIGEST_ATTR));
        let p = |el: &Element| el.element_children().next().map(|p| attr(p, DIGEST_ATTR).to_string());
        assert_ne!(p(&a), p(&b));
        let ul = |el: &Element| el.element_children().nth(1).map(|u| attr(u, DIGEST_ATTR).to_string());
        assert_eq!(ul(&a), ul(&b));
    }

    #[test]
    fn test_digest_is_idempotent() {
        let mut el = tree("x");
        let first = add_content_digests(&mut el);
        add_node_indexes(&mut el);
        let second = add_content_digests(&mut el);
        assert_eq!(first, second);
        assert_eq!(content_digest(&Node::Element(el)), Some(first));
    }

    #[test]
    fn test_tag_and_attributes_matter() {
        let p = Node::element("p", vec![Node::text("x")]);
        let div = Node::element("div", vec![Node::text("x")]);
        assert_ne!(content_digest(&p), content_digest(&div));

        let mut with_class = Element::with_children("p", vec![Node::text("x")]);
        with_class.set_attr("class", "c");
        assert_ne!(content_digest(&p), content_digest(&Node::Element(with_class)));
    }

    #[test]
    fn test_node_indexes() {
        let mut el = tree("x");
        add_node_indexes(&mut el);

        let mut indexes = Vec::new();
        el.walk_elements(|e| indexes.push(attr(e, INDEX_ATTR).to_string()));
        assert_eq!(indexes, vec!["0", "0.0", "0.1", "0.1.0"]);

        let paths: Vec<_> = indexes.iter().map(|i| index_path(i)).collect();
        assert!(paths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_annotate_flags() {
        let mut el = tree("x");
        annotate(&mut el, false, false);
        assert!(el.attrs.is_empty());

        annotate(&mut el, true, true);
        assert!(el.attr(DIGEST_ATTR).is_some());
        assert_eq!(el.attr(INDEX_ATTR), Some("0"));
    }
}
