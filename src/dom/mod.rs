//! UI node tree - the document that tool cards render into
//!
//! A single-threaded, arena-backed element tree with class/tag selectors,
//! form values, text, event listeners, a notification queue, a clipboard,
//! timers and fire-and-forget async tasks.

mod element;
mod event;
mod markup;
mod selector;
mod tree;

pub use element::Element;
pub use event::{Event, EventKind};
pub use selector::Selector;
pub use tree::{INSTANCE_ATTR, NodeId, Notice};

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::warn;

use tree::{Node, Tree};

/// Owning handle to a document
///
/// Cloning shares the same document. Dropping the last `Dom` frees the tree;
/// outstanding `Element` handles then become inert.
#[derive(Clone)]
pub struct Dom {
    pub(crate) tree: Rc<RefCell<Tree>>,
}

impl Dom {
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::new())),
        }
    }

    /// A document whose elements may spawn async work
    ///
    /// Every element operation that spawns must then run inside a
    /// `tokio::task::LocalSet`; `tokio::task::spawn_local` panics otherwise.
    pub fn with_tasks() -> Self {
        let dom = Self::new();
        dom.tree.borrow_mut().tasks_enabled = true;
        dom
    }

    /// Number of arena slots, live or free
    pub fn slot_count(&self) -> usize {
        self.tree.borrow().slot_count()
    }

    /// The document root (`body`)
    pub fn root(&self) -> Element {
        let id = self.tree.borrow().root();
        Element::new(&self.tree, id)
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> Element {
        let id = self.tree.borrow_mut().alloc(Node::element(tag));
        Element::new(&self.tree, id)
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.tree.borrow().live_count()
    }

    /// Drain pending notifications, oldest first
    pub fn take_notices(&self) -> Vec<Notice> {
        self.tree.borrow_mut().notices.drain(..).collect()
    }

    /// Oldest pending notification, without removing it
    pub fn peek_notice(&self) -> Option<Notice> {
        self.tree.borrow().notices.front().cloned()
    }

    /// Dismiss the oldest pending notification
    pub fn dismiss_notice(&self) -> Option<Notice> {
        self.tree.borrow_mut().notices.pop_front()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.tree.borrow().clipboard.clone()
    }

    pub fn pending_timers(&self) -> usize {
        self.tree.borrow().timers.len()
    }

    /// Fire every timer due at `now`, returning how many ran
    ///
    /// Callbacks run with no borrow held and may schedule further timers.
    pub fn run_timers(&self, now: Instant) -> usize {
        let due = {
            let mut tree = self.tree.borrow_mut();
            let (due, pending): (Vec<_>, Vec<_>) = tree.timers.drain(..).partition(|t| t.due <= now);
            tree.timers = pending;
            due
        };
        let count = due.len();
        for timer in due {
            (timer.callback)();
        }
        count
    }

    /// Outstanding async tasks spawned by tools; finished handles are dropped
    pub fn pending_tasks(&self) -> usize {
        let mut tree = self.tree.borrow_mut();
        tree.tasks.retain(|h| !h.is_finished());
        tree.tasks.len()
    }

    /// Await every async task spawned so far, including ones spawned meanwhile
    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut self.tree.borrow_mut().tasks);
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!("tool task failed: {}", e);
                }
            }
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
