//! Element handles.
//!
//! An `Element` is a weak reference into the tree plus a node id. Listener
//! closures capture elements freely without keeping the tree alive. Every
//! operation on a disposed node, or on a dropped tree, is a no-op.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use log::{debug, warn};

use super::event::{Event, EventKind, Listener};
use super::markup;
use super::selector::Selector;
use super::tree::{INSTANCE_ATTR, Node, NodeId, Notice, Timer, Tree};
use super::Dom;

#[derive(Clone)]
pub struct Element {
    pub(crate) tree: Weak<RefCell<Tree>>,
    pub(crate) id: NodeId,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("id", &self.id).field("tag", &self.tag()).finish()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tree.ptr_eq(&other.tree)
    }
}

impl Eq for Element {}

impl Element {
    pub(crate) fn new(tree: &Rc<RefCell<Tree>>, id: NodeId) -> Self {
        Self {
            tree: Rc::downgrade(tree),
            id,
        }
    }

    fn sibling(&self, id: NodeId) -> Self {
        Self {
            tree: self.tree.clone(),
            id,
        }
    }

    fn with_tree<R>(&self, f: impl FnOnce(&Tree) -> R) -> Option<R> {
        let tree = self.tree.upgrade()?;
        let guard = tree.borrow();
        let result = f(&guard);
        Some(result)
    }

    fn with_tree_mut<R>(&self, f: impl FnOnce(&mut Tree) -> R) -> Option<R> {
        let tree = self.tree.upgrade()?;
        let mut guard = tree.borrow_mut();
        let result = f(&mut guard);
        Some(result)
    }

    fn with_node<R>(&self, f: impl FnOnce(&Node) -> R) -> Option<R> {
        self.with_tree(|t| t.node(self.id).map(f)).flatten()
    }

    fn with_node_mut<R>(&self, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
        self.with_tree_mut(|t| t.node_mut(self.id).map(f)).flatten()
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document this element belongs to, while it is alive
    pub fn document(&self) -> Option<Dom> {
        self.tree.upgrade().map(|tree| Dom { tree })
    }

    /// Whether the node still exists (has not been disposed)
    pub fn exists(&self) -> bool {
        self.with_node(|_| ()).is_some()
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self) -> bool {
        self.with_tree(|t| t.is_connected(self.id)).unwrap_or(false)
    }

    pub fn tag(&self) -> Option<String> {
        self.with_node(|n| n.tag.clone())
    }

    pub fn classes(&self) -> Vec<String> {
        self.with_node(|n| n.classes.clone()).unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.with_node(|n| n.classes.iter().any(|c| c == class)).unwrap_or(false)
    }

    pub fn add_class(&self, class: &str) -> bool {
        self.with_node_mut(|n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        })
        .is_some()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.with_node(|n| n.attrs.get(name).cloned()).flatten()
    }

    pub fn set_attr(&self, name: &str, value: &str) -> bool {
        self.with_node_mut(|n| {
            n.attrs.insert(name.to_string(), value.to_string());
        })
        .is_some()
    }

    pub fn parent(&self) -> Option<Element> {
        self.with_node(|n| n.parent).flatten().map(|p| self.sibling(p))
    }

    /// Element children, text nodes skipped
    pub fn children(&self) -> Vec<Element> {
        self.with_tree(|t| {
            t.node(self.id)
                .map(|n| {
                    n.children
                        .iter()
                        .copied()
                        .filter(|c| t.node(*c).is_some_and(|cn| !cn.is_text()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
        .unwrap_or_default()
        .into_iter()
        .map(|c| self.sibling(c))
        .collect()
    }

    /// Whether `other` is this element or one of its descendants
    pub fn contains(&self, other: &Element) -> bool {
        self.tree.ptr_eq(&other.tree) && self.with_tree(|t| t.node(other.id).is_some() && t.is_ancestor(self.id, other.id)).unwrap_or(false)
    }

    /// Move `child` under this element as its last child
    pub fn append_child(&self, child: &Element) -> bool {
        if !self.tree.ptr_eq(&child.tree) {
            return false;
        }
        self.with_tree_mut(|t| t.append(self.id, child.id)).unwrap_or(false)
    }

    /// Create a new element and append it as the last child
    pub fn append_element(&self, tag: &str, classes: &[&str]) -> Option<Element> {
        let id = self.with_tree_mut(|t| {
            t.node(self.id)?;
            let mut node = Node::element(tag);
            node.classes = classes.iter().map(|c| c.to_string()).collect();
            let id = t.alloc(node);
            t.append(self.id, id);
            Some(id)
        })??;
        Some(self.sibling(id))
    }

    /// First descendant matching `selector`
    pub fn query(&self, selector: &str) -> Option<Element> {
        self.query_all(selector).into_iter().next()
    }

    /// All descendants matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                warn!("query on {:?} ignored: {}", self.id, e);
                return Vec::new();
            }
        };
        self.with_tree(|t| {
            t.descendants(self.id)
                .into_iter()
                .filter(|d| t.node(*d).is_some_and(|n| selector.matches(n)))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
        .into_iter()
        .map(|d| self.sibling(d))
        .collect()
    }

    /// Current value of a form control
    ///
    /// A select without an explicit value reports its first option's value.
    pub fn value(&self) -> String {
        self.with_tree(|t| {
            let node = t.node(self.id)?;
            if let Some(v) = &node.value {
                return Some(v.clone());
            }
            if node.tag == "select" {
                return node
                    .children
                    .iter()
                    .filter_map(|c| t.node(*c))
                    .find(|c| c.tag == "option")
                    .map(|opt| opt.attrs.get("value").cloned().unwrap_or_default());
            }
            None
        })
        .flatten()
        .unwrap_or_default()
    }

    pub fn set_value(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.with_node_mut(|n| n.value = Some(value)).is_some()
    }

    /// `(value, label)` pairs of a select's options
    pub fn options(&self) -> Vec<(String, String)> {
        self.children()
            .into_iter()
            .filter(|c| c.tag().as_deref() == Some("option"))
            .map(|opt| {
                let label = opt.text_content().trim().to_string();
                let value = opt.attr("value").unwrap_or_else(|| label.clone());
                (value, label)
            })
            .collect()
    }

    pub fn text_content(&self) -> String {
        self.with_tree(|t| t.text_content(self.id)).unwrap_or_default()
    }

    /// Text content laid out one block element per line
    pub fn inner_text(&self) -> String {
        self.with_tree(|t| t.inner_text(self.id)).unwrap_or_default()
    }

    /// Replace all children with a single text node
    pub fn set_text(&self, text: &str) -> bool {
        self.with_tree_mut(|t| {
            if t.node(self.id).is_none() {
                return false;
            }
            t.clear_children(self.id);
            if !text.is_empty() {
                let id = t.alloc(Node::text(text));
                t.append(self.id, id);
            }
            true
        })
        .unwrap_or(false)
    }

    /// Replace all children with the parsed `markup`
    pub fn set_inner_html(&self, markup: &str) -> bool {
        self.with_tree_mut(|t| {
            if t.node(self.id).is_none() {
                return false;
            }
            t.clear_children(self.id);
            markup::append_fragment(t, self.id, markup);
            true
        })
        .unwrap_or(false)
    }

    pub fn add_event_listener(&self, kind: EventKind, listener: impl Fn(&Event) + 'static) -> bool {
        let listener: Listener = Rc::new(listener);
        self.with_node_mut(|n| n.listeners.push((kind, listener))).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.with_node(|n| n.listeners.len()).unwrap_or(0)
    }

    /// Invoke every listener of `kind` on this element, in registration order
    ///
    /// No borrow of the tree is held while listeners run, so they may freely
    /// mutate the tree, including disposing this element.
    pub fn dispatch(&self, kind: EventKind) -> bool {
        let Some(listeners) = self.with_node(|n| {
            n.listeners
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, l)| Rc::clone(l))
                .collect::<Vec<_>>()
        }) else {
            debug!("{} dispatched to disposed node {:?}", kind, self.id);
            return false;
        };

        let event = Event {
            kind,
            target: self.clone(),
        };
        for listener in listeners {
            listener(&event);
        }
        true
    }

    pub fn click(&self) -> bool {
        self.dispatch(EventKind::Click)
    }

    /// Set the value and fire an `input` event, as typing would
    pub fn type_text(&self, value: &str) -> bool {
        self.set_value(value) && self.dispatch(EventKind::Input)
    }

    /// Detach this element and free its subtree, releasing every listener in it
    pub fn remove(&self) -> bool {
        self.with_tree_mut(|t| t.dispose(self.id)).unwrap_or(false)
    }

    /// Instance key of the card this element lives in
    pub fn instance_key(&self) -> Option<String> {
        self.with_tree(|t| t.closest_attr(self.id, INSTANCE_ATTR)).flatten()
    }

    /// Raise a blocking notification for the user
    ///
    /// Alerts from a disposed element, such as a late async completion in a
    /// dismissed card, are dropped.
    pub fn alert(&self, message: impl Into<String>) {
        let message = message.into();
        if !self.exists() {
            debug!("alert from disposed node dropped: {}", message);
            return;
        }
        let source = self.instance_key();
        debug!("alert from {:?}: {}", source, message);
        self.with_tree_mut(|t| t.notices.push_back(Notice { source, message }));
    }

    /// Write text to the document clipboard
    pub fn write_clipboard(&self, text: &str) -> bool {
        self.with_tree_mut(|t| t.clipboard = Some(text.to_string())).is_some()
    }

    /// Run `callback` once the host fires timers at or after `delay` from now
    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> bool {
        self.with_tree_mut(|t| {
            t.timers.push(Timer {
                due: Instant::now() + delay,
                callback: Box::new(callback),
            })
        })
        .is_some()
    }

    /// Spawn fire-and-forget async work on the current `LocalSet`
    ///
    /// Returns false without spawning when the document was not created with
    /// `Dom::with_tasks` or is gone. Finished handles are dropped on each spawn.
    pub fn spawn_local(&self, work: impl Future<Output = ()> + 'static) -> bool {
        let Some(tree) = self.tree.upgrade() else {
            return false;
        };
        let mut tree = tree.borrow_mut();
        if !tree.tasks_enabled {
            debug!("spawn from {:?} refused: document has no task executor", self.id);
            return false;
        }
        tree.tasks.retain(|h| !h.is_finished());
        tree.tasks.push(tokio::task::spawn_local(work));
        true
    }
}
