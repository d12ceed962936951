//! Owned document tree.
//!
//! Every stage after parsing works on this tree instead of the shared
//! `dom_query` document: each node is owned by exactly one parent, there are
//! no back references, and all mutation goes through the methods below.

/// Reserved element name for the document root.
pub const DOCUMENT_NAME: &str = "#document";

/// A node of the owned tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with its attributes and children.
    Element(Element),
    /// A text node.
    Text(String),
    /// A comment node. Stray `<![CDATA[...]]>` sections also end up here.
    Comment(String),
}

/// An element node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase local tag name.
    pub name: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with the given children.
    #[must_use]
    pub fn with_children(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Creates a document root holding `children`.
    #[must_use]
    pub fn document(children: Vec<Node>) -> Self {
        Self::with_children(DOCUMENT_NAME, children)
    }

    /// Whether this element is a document root.
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.name == DOCUMENT_NAME
    }

    /// Returns the value of attribute `name`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets attribute `name`, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    /// Removes attribute `name`, returning its value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(pos).1)
    }

    /// Keeps only the attributes for which `keep(name, value)` is true.
    pub fn retain_attrs<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.attrs.retain(|(k, v)| keep(k, v));
    }

    /// Replaces all children, returning the previous ones.
    pub fn replace_children(&mut self, children: Vec<Node>) -> Vec<Node> {
        std::mem::replace(&mut self.children, children)
    }

    /// Iterates over the element children.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Removes every descendant node matching `pred`, with its whole subtree.
    ///
    /// Matching is top-down: once a node is removed its descendants are not
    /// visited. Returns the number of removed nodes.
    pub fn remove_subtree<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Node) -> bool,
    {
        remove_in(&mut self.children, &mut pred)
    }

    /// Replaces every descendant element matching `pred` by its children.
    ///
    /// Descendants are processed before their ancestors, so nested matches
    /// are all unwrapped. Returns the number of unwrapped elements.
    pub fn unwrap_matching<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Element) -> bool,
    {
        unwrap_in(&mut self.children, &mut pred)
    }

    /// First descendant element (pre-order, self included) matching `pred`.
    pub fn find_element<F>(&self, mut pred: F) -> Option<&Element>
    where
        F: FnMut(&Element) -> bool,
    {
        find_in(self, &mut pred)
    }

    /// Visits this element and all descendant elements in pre-order.
    pub fn walk_elements<F>(&self, mut visit: F)
    where
        F: FnMut(&Element),
    {
        walk_in(self, &mut visit);
    }
}

impl Node {
    /// Creates a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates an element node with the given children.
    #[must_use]
    pub fn element(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Element(Element::with_children(name, children))
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Whether this node is an element named `name`.
    #[must_use]
    pub fn is_element_named(&self, name: &str) -> bool {
        self.as_element().is_some_and(|el| el.name == name)
    }

    /// Text content of the node (empty for comments).
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Element(el) => el.text_content(),
            Self::Text(t) => t.clone(),
            Self::Comment(_) => String::new(),
        }
    }

    /// See [`Element::remove_subtree`]. The node itself is never removed.
    pub fn remove_subtree<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(&Node) -> bool,
    {
        match self {
            Self::Element(el) => el.remove_subtree(pred),
            _ => 0,
        }
    }

    /// See [`Element::unwrap_matching`]. The node itself is never unwrapped.
    pub fn unwrap_matching<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(&Element) -> bool,
    {
        match self {
            Self::Element(el) => el.unwrap_matching(pred),
            _ => 0,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

fn collect_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => collect_text(&el.children, out),
            Node::Comment(_) => {}
        }
    }
}

fn remove_in<F>(children: &mut Vec<Node>, pred: &mut F) -> usize
where
    F: FnMut(&Node) -> bool,
{
    let before = children.len();
    children.retain(|child| !pred(child));
    let mut removed = before - children.len();
    for child in children.iter_mut() {
        if let Node::Element(el) = child {
            removed += remove_in(&mut el.children, pred);
        }
    }
    removed
}

fn unwrap_in<F>(children: &mut Vec<Node>, pred: &mut F) -> usize
where
    F: FnMut(&Element) -> bool,
{
    let mut count = 0;
    let old = std::mem::take(children);
    children.reserve(old.len());
    for mut child in old {
        if let Node::Element(el) = &mut child {
            count += unwrap_in(&mut el.children, pred);
        }
        match child {
            Node::Element(el) if pred(&el) => {
                count += 1;
                children.extend(el.children);
            }
            other => children.push(other),
        }
    }
    count
}

fn find_in<'a, F>(el: &'a Element, pred: &mut F) -> Option<&'a Element>
where
    F: FnMut(&Element) -> bool,
{
    if pred(el) {
        return Some(el);
    }
    el.element_children().find_map(|child| find_in(child, pred))
}

fn walk_in<F>(el: &Element, visit: &mut F)
where
    F: FnMut(&Element),
{
    visit(el);
    for child in el.element_children() {
        walk_in(child, visit);
    }
}
