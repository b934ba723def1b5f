//! FILENAME: core/accordion-behavior/src/dom.rs
//! PURPOSE: Minimal element tree the toggle behavior runs against.
//! CONTEXT: Elements live in an arena owned by `Document` and are addressed by
//! `ElementId`. Only what the accordion needs is modelled: classes,
//! attributes, text, sibling navigation, simple selectors, click listeners
//! with bubbling, once-markers and a per-element slide state.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::animation::SlideState;
use crate::error::{BehaviorError, Result};

/// Handle to an element of a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Click listener: receives the document and the element it is bound to.
pub type ClickHandler = Rc<dyn Fn(&mut Document, ElementId)>;

// ============================================================================
// ELEMENT
// ============================================================================

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    once: FxHashSet<String>,
    slide: SlideState,
}

impl Element {
    fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            once: FxHashSet::default(),
            slide: SlideState::Shown,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn slide(&self) -> SlideState {
        self.slide
    }
}

// ============================================================================
// SELECTOR
// ============================================================================

/// `tag.class.class` part of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(part: &str) -> Result<Self> {
        let mut pieces = part.split('.');
        let tag = match pieces.next() {
            Some("") | Some("*") | None => None,
            Some(tag) => Some(tag.to_ascii_lowercase()),
        };

        let mut classes = Vec::new();
        for class in pieces {
            if class.is_empty() {
                return Err(BehaviorError::InvalidSelector(part.to_string()));
            }
            classes.push(class.to_string());
        }

        let valid = |s: &str| s.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if tag.as_deref().is_some_and(|t| !valid(t)) || !classes.iter().all(|c| valid(c)) {
            return Err(BehaviorError::InvalidSelector(part.to_string()));
        }

        Ok(Compound { tag, classes })
    }

    fn matches(&self, element: &Element) -> bool {
        self.tag.as_deref().map_or(true, |tag| element.tag == tag)
            && self.classes.iter().all(|class| element.has_class(class))
    }
}

/// A descendant-combinator selector such as `.wrapper .header` or `div.item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self> {
        let parts = selector
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Result<Vec<_>>>()?;

        if parts.is_empty() {
            return Err(BehaviorError::InvalidSelector(selector.to_string()));
        }
        Ok(Selector { parts })
    }

    /// The last part must match the element, earlier parts its ancestors
    /// (anywhere in the document) in order.
    pub fn matches(&self, doc: &Document, id: ElementId) -> bool {
        let Some((last, ancestors)) = self.parts.split_last() else {
            return false;
        };
        let Some(element) = doc.element(id) else {
            return false;
        };
        if !last.matches(element) {
            return false;
        }

        let mut remaining = ancestors.iter().rev().peekable();
        let mut current = element.parent;
        while let Some(part) = remaining.peek() {
            let Some(ancestor_id) = current else {
                return false;
            };
            let Some(ancestor) = doc.element(ancestor_id) else {
                return false;
            };
            if part.matches(ancestor) {
                remaining.next();
            }
            current = ancestor.parent;
        }
        true
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// Arena of elements rooted at a `body` element.
pub struct Document {
    elements: Vec<Element>,
    listeners: FxHashMap<ElementId, Vec<ClickHandler>>,
    root: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.len())
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            elements: vec![Element::new("body")],
            listeners: FxHashMap::default(),
            root: ElementId(0),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    fn require(&self, id: ElementId) -> Result<&Element> {
        self.element(id).ok_or(BehaviorError::UnknownElement(id.0))
    }

    /// Every element id in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> {
        (0..self.elements.len()).map(ElementId)
    }

    // ------------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------------

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(Element::new(tag));
        ElementId(self.elements.len() - 1)
    }

    /// Appends `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.require(parent)?;
        self.require(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(BehaviorError::HierarchyCycle(child.0));
        }

        if let Some(old_parent) = self.elements[child.0].parent {
            self.elements[old_parent.0].children.retain(|c| *c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
        Ok(())
    }

    /// Creates an element with the given classes and appends it to `parent`.
    pub fn append_new(&mut self, parent: ElementId, tag: &str, classes: &[&str]) -> Result<ElementId> {
        let id = self.create_element(tag);
        for class in classes {
            self.add_class(id, class);
        }
        self.append_child(parent, id)?;
        Ok(id)
    }

    fn is_ancestor(&self, ancestor: ElementId, of: ElementId) -> bool {
        let mut current = self.element(of).and_then(Element::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.element(id).and_then(Element::parent);
        }
        false
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(Element::parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map(Element::children).unwrap_or(&[])
    }

    /// The sibling directly after `id`, if any.
    pub fn next_element_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let position = siblings.iter().position(|s| *s == id)?;
        siblings.get(position + 1).copied()
    }

    /// Descendants of `context` (excluding it) in document order.
    pub fn descendants(&self, context: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(context).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Descendants of `context` matching `selector`, in document order.
    pub fn query_selector_all(&self, context: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(context)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Classes, attributes, text
    // ------------------------------------------------------------------------

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.classes.retain(|c| c != class);
        }
    }

    /// Flips `class` and returns whether it is now present.
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.has_class(id, class)
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.text = text.into();
        }
    }

    // ------------------------------------------------------------------------
    // Behavior state
    // ------------------------------------------------------------------------

    /// Marks `id` with `key` and returns true the first time only.
    pub fn once(&mut self, id: ElementId, key: &str) -> bool {
        self.element_mut(id)
            .map(|element| element.once.insert(key.to_string()))
            .unwrap_or(false)
    }

    pub fn slide_state(&self, id: ElementId) -> Option<SlideState> {
        self.element(id).map(Element::slide)
    }

    pub fn set_slide_state(&mut self, id: ElementId, state: SlideState) {
        if let Some(element) = self.element_mut(id) {
            element.slide = state;
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn add_click_listener(&mut self, id: ElementId, handler: ClickHandler) -> Result<()> {
        self.require(id)?;
        self.listeners.entry(id).or_default().push(handler);
        Ok(())
    }

    pub fn listener_count(&self, id: ElementId) -> usize {
        self.listeners.get(&id).map_or(0, Vec::len)
    }

    /// Dispatches a click on `target`, bubbling up to the root.
    /// Returns the number of handlers invoked.
    pub fn click(&mut self, target: ElementId) -> Result<usize> {
        self.require(target)?;

        let mut path = vec![target];
        let mut current = self.parent(target);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }

        let mut invoked = 0;
        for id in path {
            // Handlers may add listeners; run the ones registered at dispatch time
            let handlers = self.listeners.get(&id).cloned().unwrap_or_default();
            for handler in handlers {
                handler(self, id);
                invoked += 1;
            }
        }
        Ok(invoked)
    }
}

// ============================================================================
// TESTS
// ============================================================================
