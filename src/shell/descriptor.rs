//! Tool descriptors - the contract every tool satisfies to be hosted
//!
//! A descriptor names a tool kind, gives its card title and body markup, and
//! supplies the wiring callback that attaches behavior to a rendered card.

use std::fmt;
use std::rc::Rc;

use crate::dom::Element;
use crate::error::Result;

/// Wiring callback: receives the card root once its body is in the tree
///
/// Called exactly once per card, synchronously. It must only rely on the body
/// markup it supplied, never on the card chrome. Listeners it attaches are
/// released when the card is removed.
pub type WireFn = Rc<dyn Fn(&Element) -> Result<()>>;

/// Immutable description of one tool kind
#[derive(Clone)]
pub struct ToolDescriptor {
    /// Catalog key (e.g., "json", "jsonToCsv")
    pub kind: String,
    /// Card title
    pub title: String,
    /// Markup placed in the card body
    pub body_template: String,
    /// Behavior attached after render
    pub wire: Option<WireFn>,
}

impl ToolDescriptor {
    /// Create a descriptor with no wiring
    pub fn new(kind: impl Into<String>, title: impl Into<String>, body_template: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            body_template: body_template.into(),
            wire: None,
        }
    }

    /// Set the wiring callback
    pub fn with_wire(mut self, wire: impl Fn(&Element) -> Result<()> + 'static) -> Self {
        self.wire = Some(Rc::new(wire));
        self
    }

    /// Whether the descriptor carries a wiring callback
    pub fn is_wired(&self) -> bool {
        self.wire.is_some()
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("body_template", &self.body_template)
            .field("wired", &self.is_wired())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_new() {
        let d = ToolDescriptor::new("echo", "Echo", "<input class='x'>");
        assert_eq!(d.kind, "echo");
        assert_eq!(d.title, "Echo");
        assert_eq!(d.body_template, "<input class='x'>");
        assert!(!d.is_wired());
    }

    #[test]
    fn test_descriptor_with_wire() {
        let d = ToolDescriptor::new("echo", "Echo", "").with_wire(|_| Ok(()));
        assert!(d.is_wired());
    }

    #[test]
    fn test_descriptor_clone_shares_wire() {
        let d = ToolDescriptor::new("echo", "Echo", "").with_wire(|_| Ok(()));
        let c = d.clone();
        assert!(Rc::ptr_eq(d.wire.as_ref().unwrap(), c.wire.as_ref().unwrap()));
    }

    #[test]
    fn test_descriptor_debug_hides_closure() {
        let d = ToolDescriptor::new("uuid", "UUID Generator", "").with_wire(|_| Ok(()));
        let s = format!("{:?}", d);
        assert!(s.contains("uuid"));
        assert!(s.contains("wired: true"));
    }
}
