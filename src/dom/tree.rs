//! Arena storage for the node tree.
//!
//! Disposed slots go on a free list and are reused by later allocations. Each
//! slot carries a generation that is bumped on disposal, so a stale `NodeId`
//! resolves to `None` even after its slot holds a new node.

use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use tokio::task::JoinHandle;

use super::event::{EventKind, Listener};

/// Tag used for text nodes
pub(crate) const TEXT_TAG: &str = "#text";

/// Elements that start a new line in `inner_text`
const BLOCK_TAGS: [&str; 18] = [
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "pre", "blockquote", "table", "tr", "hr", "br",
    "section",
];

/// Attribute carrying a card's instance key
pub const INSTANCE_ATTR: &str = "data-instance";

/// Index of a node in the arena, tagged with the slot generation it was
/// allocated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

pub(crate) struct Node {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub value: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub listeners: Vec<(EventKind, Listener)>,
}

impl Node {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: None,
            value: None,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn text(content: &str) -> Self {
        let mut node = Self::element(TEXT_TAG);
        node.text = Some(content.to_string());
        node
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }
}

/// A user-facing notification raised by a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Instance key of the card that raised it, if any
    pub source: Option<String>,
    /// Message text
    pub message: String,
}

pub(crate) struct Timer {
    pub due: Instant,
    pub callback: Box<dyn FnOnce()>,
}

pub(crate) struct Tree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    pub notices: VecDeque<Notice>,
    pub clipboard: Option<String>,
    pub timers: Vec<Timer>,
    pub tasks: Vec<JoinHandle<()>>,
    /// Set when the host runs the document inside a `LocalSet`
    pub tasks_enabled: bool,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::element("body")),
            }],
            free: Vec::new(),
            root: NodeId { index: 0, generation: 0 },
            notices: VecDeque::new(),
            clipboard: None,
            timers: Vec::new(),
            tasks: Vec::new(),
            tasks_enabled: false,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    /// Number of live nodes, root included
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Number of arena slots, live or free
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.node(c).and_then(|n| n.parent);
        }
        false
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.node(id).is_some() && self.is_ancestor(self.root, id)
    }

    /// Unlink a node from its parent, keeping the subtree alive
    pub fn detach(&mut self, id: NodeId) {
        let parent = self.node(id).and_then(|n| n.parent);
        if let Some(p) = parent
            && let Some(pn) = self.node_mut(p)
        {
            pn.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    /// Attach `child` as the last child of `parent`
    ///
    /// Returns false when either node is gone or the move would create a cycle.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.node(parent).is_none() || self.node(child).is_none() || self.is_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        true
    }

    /// Pre-order descendants of `id`, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).map(|n| n.children.iter().rev().copied().collect()).unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(n) = self.node(next) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    /// Detach a subtree and free every slot in it, dropping its listeners
    pub fn dispose(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() || id == self.root {
            return false;
        }
        self.detach(id);
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for d in doomed {
            if let Some(slot) = self.slots.get_mut(d.index)
                && slot.generation == d.generation
                && slot.node.take().is_some()
            {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(d.index);
            }
        }
        true
    }

    /// Dispose every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let children = self.node(id).map(|n| n.children.clone()).unwrap_or_default();
        for c in children {
            self.dispose(c);
        }
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.node(id) else {
            return String::new();
        };
        if node.is_text() {
            return node.text.clone().unwrap_or_default();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.node(d))
            .filter(|n| n.is_text())
            .filter_map(|n| n.text.as_deref())
            .collect()
    }

    /// Text laid out in lines, one per block element; list items are bulleted
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out.lines()
            .map(str::trim_end)
            .filter(|l| !l.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.is_text() {
            out.push_str(node.text.as_deref().unwrap_or_default());
            return;
        }
        let block = BLOCK_TAGS.contains(&node.tag.as_str());
        if block && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        if node.tag == "li" {
            out.push_str("• ");
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
        if block && !out.ends_with('\n') {
            out.push('\n');
        }
    }

    /// Closest ancestor-or-self value of attribute `name`
    pub fn closest_attr(&self, id: NodeId, name: &str) -> Option<String> {
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c)?;
            if let Some(v) = node.attrs.get(name) {
                return Some(v.clone());
            }
            current = node.parent;
        }
        None
    }
}
