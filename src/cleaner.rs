//! Metadata and blacklist removal.
//!
//! Both passes only ever delete whole subtrees or attributes, so running them
//! in either order gives the same tree.

use std::collections::HashSet;

use crate::node::{Element, Node};

/// Form elements.
pub static FORM_TAGS: [&str; 14] = [
    "button", "datalist", "fieldset", "form", "input", "label", "legend", "meter", "optgroup",
    "option", "output", "progress", "select", "textarea",
];

/// Image elements.
pub static IMAGE_TAGS: [&str; 5] = ["area", "img", "map", "picture", "source"];

/// Audio and video elements.
pub static MEDIA_TAGS: [&str; 3] = ["audio", "track", "video"];

/// Embedded content.
pub static EMBEDDED_TAGS: [&str; 6] = ["embed", "iframe", "math", "object", "param", "svg"];

/// Interactive elements.
pub static INTERACTIVE_TAGS: [&str; 3] = ["details", "dialog", "summary"];

/// Scripting elements.
pub static SCRIPTING_TAGS: [&str; 4] = ["canvas", "noscript", "script", "template"];

/// Data elements.
pub static DATA_TAGS: [&str; 2] = ["data", "link"];

/// Navigation chrome and presentation.
pub static CHROME_TAGS: [&str; 2] = ["nav", "style"];

/// Elements that carry document metadata rather than reader-visible content.
pub static METADATA_TAGS: [&str; 4] = ["meta", "link", "base", "title"];

/// Configuration of the cleaner, injected rather than global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    /// Elements removed together with their subtree by [`Cleaner::remove_blacklist`].
    pub blacklist_tags: HashSet<String>,

    /// Elements removed by [`Cleaner::remove_metadata`].
    pub metadata_tags: HashSet<String>,

    /// Attribute names stripped from every element.
    pub blacklist_attributes: HashSet<String>,

    /// Attribute-name prefixes stripped from every element (event handlers).
    pub blacklist_attribute_prefixes: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        let blacklist_tags = FORM_TAGS
            .iter()
            .chain(&IMAGE_TAGS)
            .chain(&MEDIA_TAGS)
            .chain(&EMBEDDED_TAGS)
            .chain(&INTERACTIVE_TAGS)
            .chain(&SCRIPTING_TAGS)
            .chain(&DATA_TAGS)
            .chain(&CHROME_TAGS)
            .map(ToString::to_string)
            .collect();

        Self {
            blacklist_tags,
            metadata_tags: METADATA_TAGS.iter().map(ToString::to_string).collect(),
            blacklist_attributes: HashSet::from(["style".to_string()]),
            blacklist_attribute_prefixes: vec!["on".to_string()],
        }
    }
}

impl CleanerConfig {
    /// Whether `tag` is removed by the blacklist pass.
    #[must_use]
    pub fn is_blacklisted_tag(&self, tag: &str) -> bool {
        self.blacklist_tags.contains(tag)
    }

    /// Whether attribute `name` is stripped by the blacklist pass.
    #[must_use]
    pub fn is_blacklisted_attribute(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        self.blacklist_attributes.contains(&lower)
            || self
                .blacklist_attribute_prefixes
                .iter()
                .any(|prefix| lower.starts_with(prefix.as_str()))
    }

    /// Borrows this configuration as a [`Cleaner`].
    #[must_use]
    pub fn cleaner(&self) -> Cleaner<'_> {
        Cleaner::new(self)
    }
}

/// Applies a [`CleanerConfig`] to trees.
#[derive(Debug, Clone, Copy)]
pub struct Cleaner<'a> {
    config: &'a CleanerConfig,
}

impl<'a> Cleaner<'a> {
    #[must_use]
    pub fn new(config: &'a CleanerConfig) -> Self {
        Self { config }
    }

    /// Removes all comments and metadata elements.
    pub fn remove_metadata(&self, root: &mut Element) -> usize {
        let removed = root.remove_subtree(|node| match node {
            Node::Comment(_) => true,
            Node::Element(el) => self.config.metadata_tags.contains(&el.name),
            Node::Text(_) => false,
        });
        tracing::trace!(removed, "removed metadata nodes");
        removed
    }

    /// Removes blacklisted elements with their subtrees and strips
    /// blacklisted attributes from what remains.
    pub fn remove_blacklist(&self, root: &mut Element) -> usize {
        let removed = root.remove_subtree(|node| {
            node.as_element()
                .is_some_and(|el| self.config.is_blacklisted_tag(&el.name))
        });
        self.strip_attributes(root);
        tracing::trace!(removed, "removed blacklisted elements");
        removed
    }

    /// Runs both passes.
    pub fn clean(&self, root: &mut Element) {
        self.remove_metadata(root);
        self.remove_blacklist(root);
    }

    fn strip_attributes(&self, el: &mut Element) {
        el.retain_attrs(|name, _| !self.config.is_blacklisted_attribute(name));
        for child in &mut el.children {
            if let Node::Element(child) = child {
                self.strip_attributes(child);
            }
        }
    }
}
