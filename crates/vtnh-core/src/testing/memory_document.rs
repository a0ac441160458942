//! In-memory document for testing.
//!
//! An arena of element nodes rooted at a `BODY` element. Handles are plain
//! indices, so they stay valid (but detached) after their subtree is removed,
//! which is how a route swap looks from the engine's side.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::dom::Document;
use crate::selector::SelectorPath;

/// Handle to an element in a [`MemoryDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    transition_name: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            id: None,
            attributes: BTreeMap::new(),
            transition_name: None,
            parent,
            children: Vec::new(),
        }
    }
}

/// In-memory [`Document`] implementation.
pub struct MemoryDocument {
    nodes: RefCell<Vec<Node>>,
    /// Number of `set_transition_name` calls, for asserting write counts
    style_writes: RefCell<usize>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document holding only an empty `BODY`.
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![Node::new("body", None)]),
            style_writes: RefCell::new(0),
        }
    }

    /// The root `BODY` element.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element with `tag` as the last child of `parent`.
    pub fn append(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node::new(tag, Some(parent)));
        nodes[parent.0].children.push(id);
        id
    }

    /// Set the element's `id`.
    pub fn set_id(&self, element: NodeId, id: &str) {
        self.nodes.borrow_mut()[element.0].id = Some(id.to_string());
    }

    /// Set an attribute on the element.
    pub fn set_attribute(&self, element: NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[element.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Detach every child of `parent`, as a route swap replaces page content.
    pub fn clear_children(&self, parent: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut nodes[parent.0].children);
        for child in children {
            nodes[child.0].parent = None;
        }
    }

    /// Find an attached element by id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.all_elements()
            .into_iter()
            .find(|el| self.nodes.borrow()[el.0].id.as_deref() == Some(id))
    }

    /// Every attached element in document order, `BODY` first.
    pub fn all_elements(&self) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut order = Vec::new();
        let mut stack = vec![self.body()];
        while let Some(el) = stack.pop() {
            order.push(el);
            stack.extend(nodes[el.0].children.iter().rev().copied());
        }
        order
    }

    /// Attached elements currently carrying the transition name `name`.
    pub fn holders_of(&self, name: &str) -> Vec<NodeId> {
        self.all_elements()
            .into_iter()
            .filter(|el| self.nodes.borrow()[el.0].transition_name.as_deref() == Some(name))
            .collect()
    }

    /// Number of style writes so far.
    pub fn style_writes(&self) -> usize {
        *self.style_writes.borrow()
    }

    fn find(&self, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let order = self.all_elements();
        let nodes = self.nodes.borrow();
        order.into_iter().find(|el| predicate(&nodes[el.0]))
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn tag_name(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].tag.clone()
    }

    fn id(&self, element: &NodeId) -> Option<String> {
        self.nodes.borrow()[element.0]
            .id
            .clone()
            .filter(|id| !id.is_empty())
    }

    fn parent_element(&self, element: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[element.0].parent
    }

    fn previous_element_sibling(&self, element: &NodeId) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let parent = nodes[element.0].parent?;
        let siblings = &nodes[parent.0].children;
        let position = siblings.iter().position(|s| s == element)?;
        position.checked_sub(1).map(|i| siblings[i])
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let path = SelectorPath::parse(selector).ok()?;
        self.all_elements()
            .into_iter()
            .find(|el| path.matches(self, el))
    }

    fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.find(|node| node.attributes.get(name).map(String::as_str) == Some(value))
    }

    fn find_by_transition_name(&self, name: &str) -> Option<NodeId> {
        self.find(|node| node.transition_name.as_deref() == Some(name))
    }

    fn transition_name(&self, element: &NodeId) -> Option<String> {
        self.nodes.borrow()[element.0]
            .transition_name
            .clone()
            .filter(|name| !name.is_empty())
    }

    fn set_transition_name(&self, element: &NodeId, name: &str) {
        *self.style_writes.borrow_mut() += 1;
        self.nodes.borrow_mut()[element.0].transition_name =
            (!name.is_empty()).then(|| name.to_string());
    }
}
