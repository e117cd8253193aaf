//! In-memory document model.
//!
//! An arena of elements addressed by [`ElementId`]. It models the parts of
//! the DOM the page glue touches: tags, ids, classes, attributes, inline
//! `display`, text, and parent/child structure.

use std::collections::BTreeMap;
use std::fmt;

use crate::selector::Selector;

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inline `style.display` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    InlineBlock,
    None,
}

impl Display {
    /// CSS keyword.
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::InlineBlock => "inline-block",
            Display::None => "none",
        }
    }
}

/// A child node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(ElementId),
    Text(String),
}

/// One element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    display: Option<Display>,
    parent: Option<ElementId>,
    children: Vec<Node>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            display: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Get an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its old value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Check class membership.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Classes in order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Add a class if absent.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class. Returns whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }

    /// Inline display, if set.
    pub fn display(&self) -> Option<Display> {
        self.display
    }

    /// Set inline display.
    pub fn set_display(&mut self, display: Display) {
        self.display = Some(display);
    }

    /// Whether inline style hides the element.
    pub fn is_hidden(&self) -> bool {
        self.display == Some(Display::None)
    }

    /// Parent element.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Markup builder used to populate a [`Document`].
///
/// ```
/// use storefront_ui::dom::{Document, El};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let card = doc.insert(
///     body,
///     El::new("div")
///         .class("product-card")
///         .attr("data-product-id", "42")
///         .child(El::new("h5").class("product-name").text("Shoe")),
/// );
/// assert_eq!(doc.text_content(card), "Shoe");
/// ```
#[derive(Debug, Clone)]
pub struct El {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: Vec<ElChild>,
}

#[derive(Debug, Clone)]
enum ElChild {
    El(El),
    Text(String),
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Add one class, or several separated by whitespace.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(String::from));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(ElChild::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(ElChild::El(child));
        self
    }
}

/// The document: a `body` root plus everything attached below it.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Option<Element>>,
    body: ElementId,
}

impl Document {
    /// Create a document with an empty `body`.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Element::new("body"))],
            body: ElementId(0),
        }
    }

    /// The `body` element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Get an element. `None` once it has been removed.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Get an element mutably.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.slots.push(Some(Element::new(tag)));
        ElementId(self.slots.len() - 1)
    }

    /// Build `markup` and append it to `parent`. Returns the new element.
    pub fn insert(&mut self, parent: ElementId, markup: El) -> ElementId {
        let id = self.build(markup);
        self.append_child(parent, id);
        id
    }

    fn build(&mut self, markup: El) -> ElementId {
        let id = self.create_element(&markup.tag);
        if let Some(element) = self.element_mut(id) {
            element.classes = markup.classes;
            element.attributes.extend(markup.attributes);
        }
        for child in markup.children {
            match child {
                ElChild::Text(text) => self.append_text(id, &text),
                ElChild::El(el) => {
                    let child_id = self.build(el);
                    self.append_child(id, child_id);
                }
            }
        }
        id
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if self.element(parent).is_none() || parent == child {
            return;
        }
        self.detach(child);
        if let Some(element) = self.element_mut(child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.element_mut(parent) {
            element.children.push(Node::Element(child));
        }
    }

    /// Append a text node.
    pub fn append_text(&mut self, parent: ElementId, text: &str) {
        if let Some(element) = self.element_mut(parent) {
            element.children.push(Node::Text(text.to_string()));
        }
    }

    fn detach(&mut self, child: ElementId) {
        let Some(old_parent) = self.element(child).and_then(Element::parent) else {
            return;
        };
        if let Some(parent) = self.element_mut(old_parent) {
            parent
                .children
                .retain(|node| *node != Node::Element(child));
        }
        if let Some(element) = self.element_mut(child) {
            element.parent = None;
        }
    }

    /// Remove all children (the `innerHTML = ""` step).
    pub fn clear_children(&mut self, id: ElementId) {
        let children = match self.element_mut(id) {
            Some(element) => std::mem::take(&mut element.children),
            None => return,
        };
        for node in children {
            if let Node::Element(child) = node {
                self.drop_subtree(child);
            }
        }
    }

    /// Replace the children of `id` with a single text node.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        self.clear_children(id);
        self.append_text(id, text);
    }

    /// Remove an element and its subtree from the document.
    ///
    /// The body cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.body {
            return;
        }
        self.detach(id);
        self.drop_subtree(id);
    }

    fn drop_subtree(&mut self, id: ElementId) {
        let Some(element) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        for node in element.children {
            if let Node::Element(child) = node {
                self.drop_subtree(child);
            }
        }
    }

    /// Whether `id` is reachable from the body.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.ancestors_inclusive(id).last() == Some(&self.body)
    }

    /// `id` followed by its ancestors up to the root of its tree.
    pub fn ancestors_inclusive(&self, id: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = self.element(id).map(|_| id);
        while let Some(node) = current {
            path.push(node);
            current = self.element(node).and_then(Element::parent);
        }
        path
    }

    /// The nearest of `id` and its ancestors matching `selector`.
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        self.ancestors_inclusive(id).into_iter().find(|node| {
            self.element(*node)
                .map(|e| selector.matches(e))
                .unwrap_or(false)
        })
    }

    /// Attached elements in document order.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(element) = self.element(id) else {
                continue;
            };
            out.push(id);
            for node in element.children.iter().rev() {
                if let Node::Element(child) = node {
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// All attached elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.query_all_within(self.body, selector)
    }

    /// First attached element matching `selector`.
    pub fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Descendants of `root` (root included) matching `selector`.
    pub fn query_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| {
                self.element(*id)
                    .map(|e| selector.matches(e))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// First strict descendant of `root` matching `selector`.
    pub fn query_within(&self, root: ElementId, selector: &Selector) -> Option<ElementId> {
        self.query_all_within(root, selector)
            .into_iter()
            .find(|id| *id != root)
    }

    /// First attached element satisfying `predicate`, in document order.
    pub fn find_first(&self, predicate: impl Fn(&Element) -> bool) -> Option<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .find(|id| self.element(*id).map(&predicate).unwrap_or(false))
    }

    /// First attached element whose `id` attribute is `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .find(|el| self.element(*el).and_then(Element::id) == Some(id))
    }

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        let Some(element) = self.element(id) else {
            return;
        };
        for node in &element.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(child) => self.collect_text(*child, out),
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
