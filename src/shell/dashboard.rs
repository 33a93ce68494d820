//! Dashboard - registry of open tool instances and their layout container
//!
//! The registry and the container's children always describe the same set of
//! cards: cards are registered as they are mounted, and a dismissed card
//! notifies the registry to drop its entry.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{debug, info};

use crate::dom::{Dom, Element, INSTANCE_ATTR};
use crate::error::{DashError, Result};
use crate::id::{now_ms, unique_instance_key};
use crate::tools::ToolCatalog;

use super::card::{ToolCard, close_button};
use super::descriptor::{ToolDescriptor, WireFn};

pub const CONTAINER_CLASS: &str = "dashboard-grid";

/// One open tool card
#[derive(Debug, Clone)]
pub struct ToolInstance {
    /// Unique key, `{kind}-{creation_ms}` with an optional tie-break suffix
    pub instance_key: String,
    /// Descriptor the card was built from
    pub descriptor: ToolDescriptor,
    /// Card root node
    pub root: Element,
}

type Registry = Rc<RefCell<HashMap<String, ToolInstance>>>;

pub struct Dashboard {
    dom: Dom,
    container: Element,
    tools: Registry,
    /// Keys handed out whose cards are still being rendered
    reserved: RefCell<HashSet<String>>,
}

impl Dashboard {
    /// Create a dashboard with a detached container
    ///
    /// The host mounts `render()` wherever it wants the grid to appear.
    pub fn new(dom: &Dom) -> Self {
        let container = dom.create_element("div");
        container.add_class(CONTAINER_CLASS);
        Self {
            dom: dom.clone(),
            container,
            tools: Rc::new(RefCell::new(HashMap::new())),
            reserved: RefCell::new(HashSet::new()),
        }
    }

    /// Render a card from the given parts, register it and mount it
    ///
    /// Returns the new instance key. The key is reserved before the card is
    /// rendered, so a wiring callback that opens another tool of the same
    /// kind gets a distinct key.
    pub fn add_tool(&self, kind: &str, title: &str, body_template: &str, wire: Option<WireFn>) -> Result<String> {
        let key = {
            let tools = self.tools.borrow();
            let reserved = self.reserved.borrow();
            unique_instance_key(kind, now_ms(), |k| tools.contains_key(k) || reserved.contains(k))
        };
        self.add_tool_keyed(key, kind, title, body_template, wire)
    }

    /// `add_tool` under a caller-chosen key
    ///
    /// Fails with `DuplicateInstance` when the key is registered or still
    /// being wired, before anything is rendered.
    pub(crate) fn add_tool_keyed(
        &self,
        key: String,
        kind: &str,
        title: &str,
        body_template: &str,
        wire: Option<WireFn>,
    ) -> Result<String> {
        if self.is_taken(&key) {
            return Err(DashError::DuplicateInstance(key));
        }
        self.reserved.borrow_mut().insert(key.clone());

        let registry = Rc::downgrade(&self.tools);
        let closed_key = key.clone();
        let card = ToolCard::new(title, body_template, wire.clone())
            .with_instance_key(key.clone())
            .with_on_close(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.borrow_mut().remove(&closed_key);
                    info!("Closed tool {}", closed_key);
                }
            });
        // Wiring may re-enter the dashboard; no borrow is held here
        let root = card.render(&self.dom);
        self.reserved.borrow_mut().remove(&key);

        let descriptor = ToolDescriptor {
            kind: kind.to_string(),
            title: title.to_string(),
            body_template: body_template.to_string(),
            wire,
        };
        self.tools.borrow_mut().insert(
            key.clone(),
            ToolInstance {
                instance_key: key.clone(),
                descriptor,
                root: root.clone(),
            },
        );

        self.container.append_child(&root);
        info!("Opened tool {}", key);
        Ok(key)
    }

    fn is_taken(&self, key: &str) -> bool {
        self.tools.borrow().contains_key(key) || self.reserved.borrow().contains(key)
    }

    /// `add_tool` from a catalog descriptor
    pub fn add_descriptor(&self, descriptor: &ToolDescriptor) -> Result<String> {
        self.add_tool(&descriptor.kind, &descriptor.title, &descriptor.body_template, descriptor.wire.clone())
    }

    /// Handle a tool-kind selection
    ///
    /// An empty or unknown kind is silently ignored and yields `Ok(None)`.
    pub fn select(&self, kind: &str, catalog: &ToolCatalog) -> Result<Option<String>> {
        if kind.is_empty() {
            return Ok(None);
        }
        match catalog.get(kind) {
            Some(descriptor) => self.add_descriptor(descriptor).map(Some),
            None => {
                debug!("Ignoring selection of unknown tool kind '{}'", kind);
                Ok(None)
            }
        }
    }

    /// The layout container; the same node on every call
    pub fn render(&self) -> &Element {
        &self.container
    }

    /// Dismiss a card as if its close affordance were clicked
    pub fn close(&self, key: &str) -> bool {
        let Some(root) = self.tools.borrow().get(key).map(|i| i.root.clone()) else {
            return false;
        };
        match close_button(&root) {
            Some(button) => {
                button.click();
            }
            None => {
                root.remove();
                self.tools.borrow_mut().remove(key);
            }
        }
        !self.contains(key)
    }

    pub fn get(&self, key: &str) -> Option<ToolInstance> {
        self.tools.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tools.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tools.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.borrow().is_empty()
    }

    /// Instance keys in visual order
    pub fn instances(&self) -> Vec<String> {
        self.container.children().iter().filter_map(|c| c.attr(INSTANCE_ATTR)).collect()
    }

    /// Whether registry keys and mounted cards are the same set
    pub fn is_consistent(&self) -> bool {
        let mut mounted = self.instances();
        let mut registered: Vec<String> = self.tools.borrow().keys().cloned().collect();
        mounted.sort();
        registered.sort();
        mounted == registered
    }

    /// Dismiss every card and remove the container
    pub fn teardown(self) {
        for key in self.instances() {
            self.close(&key);
        }
        self.tools.borrow_mut().clear();
        self.container.remove();
        info!("Dashboard torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::EventKind;
    use crate::shell::card::card_body;
    use std::cell::Cell;

    fn echo_wire() -> WireFn {
        Rc::new(|root: &Element| -> Result<()> {
            let input = root.query(".x").ok_or_else(|| DashError::Markup("missing .x".to_string()))?;
            let output = root.query(".y").ok_or_else(|| DashError::Markup("missing .y".to_string()))?;
            input.add_event_listener(EventKind::Input, move |e| {
                output.set_text(&e.target.value());
            });
            Ok(())
        })
    }

    fn mounted() -> (Dom, Dashboard) {
        let dom = Dom::new();
        let dashboard = Dashboard::new(&dom);
        dom.root().append_child(dashboard.render());
        (dom, dashboard)
    }

    #[test]
    fn test_new_dashboard_empty() {
        let (_dom, dashboard) = mounted();
        assert!(dashboard.is_empty());
        assert_eq!(dashboard.len(), 0);
        assert!(dashboard.render().has_class(CONTAINER_CLASS));
    }

    #[test]
    fn test_render_is_idempotent() {
        let (_dom, dashboard) = mounted();
        let a = dashboard.render().clone();
        let b = dashboard.render().clone();
        assert_eq!(a, b);
        assert_eq!(a.children().len(), 0);
    }

    #[test]
    fn test_add_tool_registers_and_mounts() {
        let (_dom, dashboard) = mounted();
        let key = dashboard.add_tool("echo", "Echo", "<input class='x'><output class='y'>", Some(echo_wire())).unwrap();

        assert!(key.starts_with("echo-"));
        assert_eq!(dashboard.len(), 1);
        let instance = dashboard.get(&key).unwrap();
        assert_eq!(instance.descriptor.kind, "echo");
        assert!(dashboard.render().contains(&instance.root));
        assert!(instance.root.is_connected());
        assert!(dashboard.is_consistent());
    }

    #[test]
    fn test_same_kind_twice_gets_distinct_keys() {
        let (_dom, dashboard) = mounted();
        let a = dashboard.add_tool("echo", "Echo", "", None).unwrap();
        let b = dashboard.add_tool("echo", "Echo", "", None).unwrap();
        assert_ne!(a, b);
        assert_eq!(dashboard.len(), 2);
        assert_eq!(dashboard.instances(), vec![a, b]);
    }

    #[test]
    fn test_wire_runs_once_per_add() {
        let (_dom, dashboard) = mounted();
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let wire: WireFn = Rc::new(move |_: &Element| -> Result<()> {
            c.set(c.get() + 1);
            Ok(())
        });
        dashboard.add_tool("t", "T", "", Some(wire.clone())).unwrap();
        dashboard.add_tool("t", "T", "", Some(wire)).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_dismiss_updates_registry_and_tree() {
        let (_dom, dashboard) = mounted();
        let a = dashboard.add_tool("a", "A", "", None).unwrap();
        let b = dashboard.add_tool("b", "B", "", None).unwrap();
        let c = dashboard.add_tool("c", "C", "", None).unwrap();

        let root_b = dashboard.get(&b).unwrap().root;
        close_button(&root_b).unwrap().click();

        assert!(!dashboard.contains(&b));
        assert_eq!(dashboard.instances(), vec![a, c]);
        assert_eq!(dashboard.len(), 2);
        assert!(dashboard.is_consistent());
    }

    #[test]
    fn test_close_by_key() {
        let (_dom, dashboard) = mounted();
        let key = dashboard.add_tool("a", "A", "<p>x</p>", None).unwrap();
        assert!(dashboard.close(&key));
        assert!(dashboard.is_empty());
        assert!(!dashboard.close(&key));
        assert!(dashboard.render().children().is_empty());
    }

    #[test]
    fn test_echo_end_to_end() {
        let (dom, dashboard) = mounted();
        let key = dashboard.add_tool("echo", "Echo", "<input class='x'><output class='y'>", Some(echo_wire())).unwrap();
        let root = dashboard.get(&key).unwrap().root;
        let input = root.query(".x").unwrap();
        let output = root.query(".y").unwrap();

        input.set_value("hello");
        input.dispatch(EventKind::Input);
        assert_eq!(output.text_content(), "hello");

        dashboard.close(&key);
        assert!(!input.exists());
        assert!(!output.exists());
        assert!(dom.root().query(".x").is_none());
        assert!(dom.root().query(".y").is_none());
    }

    #[test]
    fn test_teardown_removes_everything() {
        let (dom, dashboard) = mounted();
        dashboard.add_tool("a", "A", "<p>x</p>", None).unwrap();
        dashboard.add_tool("b", "B", "<p>y</p>", None).unwrap();
        dashboard.teardown();
        assert_eq!(dom.node_count(), 1);
    }

    #[test]
    fn test_wire_sees_body_before_mount() {
        let (_dom, dashboard) = mounted();
        let found = Rc::new(Cell::new(false));
        let f = Rc::clone(&found);
        let wire: WireFn = Rc::new(move |root: &Element| -> Result<()> {
            f.set(card_body(root).and_then(|b| b.query(".marker")).is_some());
            Ok(())
        });
        dashboard.add_tool("p", "P", "<span class='marker'></span>", Some(wire)).unwrap();
        assert!(found.get());
    }

    #[test]
    fn test_nested_add_of_same_kind_gets_distinct_key() {
        let dom = Dom::new();
        let dashboard = Rc::new(Dashboard::new(&dom));
        dom.root().append_child(dashboard.render());

        let inner: Rc<RefCell<Option<Result<String>>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&inner);
        let weak = Rc::downgrade(&dashboard);
        let wire: WireFn = Rc::new(move |_: &Element| -> Result<()> {
            if let Some(d) = weak.upgrade() {
                *slot.borrow_mut() = Some(d.add_tool("echo", "Echo", "", None));
            }
            Ok(())
        });

        let outer = dashboard.add_tool("echo", "Echo", "", Some(wire)).unwrap();
        let nested = inner.borrow_mut().take().unwrap().unwrap();
        assert_ne!(outer, nested);
        assert_eq!(dashboard.len(), 2);
        assert!(dashboard.contains(&outer));
        assert!(dashboard.contains(&nested));
        assert!(dashboard.is_consistent());
    }

    #[test]
    fn test_key_being_wired_is_taken() {
        let dom = Dom::new();
        let dashboard = Rc::new(Dashboard::new(&dom));
        dom.root().append_child(dashboard.render());

        let inner: Rc<RefCell<Option<Result<String>>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&inner);
        let weak = Rc::downgrade(&dashboard);
        let wire: WireFn = Rc::new(move |root: &Element| -> Result<()> {
            if let (Some(d), Some(key)) = (weak.upgrade(), root.attr(INSTANCE_ATTR)) {
                *slot.borrow_mut() = Some(d.add_tool_keyed(key, "echo", "Echo", "", None));
            }
            Ok(())
        });

        let key = dashboard
            .add_tool_keyed("echo-1700000000000".to_string(), "echo", "Echo", "", Some(wire))
            .unwrap();
        match inner.borrow_mut().take() {
            Some(Err(DashError::DuplicateInstance(k))) => assert_eq!(k, key),
            other => panic!("expected DuplicateInstance, got {:?}", other),
        }
        assert_eq!(dashboard.len(), 1);
        assert!(dashboard.is_consistent());
    }

    #[test]
    fn test_registered_key_is_rejected_without_rendering() {
        let (dom, dashboard) = mounted();
        let key = dashboard.add_tool_keyed("a-1".to_string(), "a", "A", "<p>x</p>", None).unwrap();
        let nodes = dom.node_count();

        let err = dashboard.add_tool_keyed(key.clone(), "a", "A", "<p>x</p>", None).unwrap_err();
        assert!(matches!(err, DashError::DuplicateInstance(ref k) if *k == key));
        assert_eq!(dom.node_count(), nodes);
        assert_eq!(dashboard.len(), 1);
        assert!(dashboard.is_consistent());
    }
}
