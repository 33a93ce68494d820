//! Tool card - the chrome around one tool instance
//!
//! Layout of a rendered card:
//!
//! ```text
//! div.tool-card[data-instance]
//! ├── div.card-header
//! │   ├── h3.card-title
//! │   └── div.card-controls
//! │       ├── button.card-move   (decorative)
//! │       └── button.card-close
//! └── div.tool-content           (parsed body template)
//! ```

use std::rc::Rc;

use log::{debug, error};

use crate::dom::{Dom, Element, EventKind, INSTANCE_ATTR};

use super::descriptor::{ToolDescriptor, WireFn};

pub const CARD_CLASS: &str = "tool-card";
pub const HEADER_CLASS: &str = "card-header";
pub const TITLE_CLASS: &str = "card-title";
pub const MOVE_CLASS: &str = "card-move";
pub const CLOSE_CLASS: &str = "card-close";
pub const BODY_CLASS: &str = "tool-content";

/// Builds the node tree for one tool instance
pub struct ToolCard {
    title: String,
    body_template: String,
    wire: Option<WireFn>,
    instance_key: Option<String>,
    on_close: Option<Rc<dyn Fn()>>,
}

impl ToolCard {
    pub fn new(title: impl Into<String>, body_template: impl Into<String>, wire: Option<WireFn>) -> Self {
        Self {
            title: title.into(),
            body_template: body_template.into(),
            wire,
            instance_key: None,
            on_close: None,
        }
    }

    pub fn from_descriptor(descriptor: &ToolDescriptor) -> Self {
        Self::new(descriptor.title.clone(), descriptor.body_template.clone(), descriptor.wire.clone())
    }

    /// Tag the card root with its instance key
    pub fn with_instance_key(mut self, key: impl Into<String>) -> Self {
        self.instance_key = Some(key.into());
        self
    }

    /// Hook run after the card has removed itself on dismissal
    pub fn with_on_close(mut self, on_close: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(on_close));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Build the card, attach the dismissal handler, then wire the body
    ///
    /// The returned root is detached; the caller mounts it. A wiring failure is
    /// logged and shown as a notification on the card, and the card is still
    /// returned fully rendered.
    pub fn render(&self, dom: &Dom) -> Element {
        let root = dom.create_element("div");
        root.add_class(CARD_CLASS);
        if let Some(key) = &self.instance_key {
            root.set_attr(INSTANCE_ATTR, key);
        }

        if let Some(header) = root.append_element("div", &[HEADER_CLASS]) {
            if let Some(title) = header.append_element("h3", &[TITLE_CLASS]) {
                title.set_text(&self.title);
            }
            if let Some(controls) = header.append_element("div", &["card-controls"]) {
                if let Some(mv) = controls.append_element("button", &[MOVE_CLASS]) {
                    mv.set_attr("title", "Move");
                    mv.set_text("⠿");
                }
                if let Some(close) = controls.append_element("button", &[CLOSE_CLASS]) {
                    close.set_attr("title", "Close");
                    close.set_text("×");
                    let target = root.clone();
                    let on_close = self.on_close.clone();
                    close.add_event_listener(EventKind::Click, move |_| {
                        if target.remove() {
                            debug!("card dismissed");
                            if let Some(cb) = &on_close {
                                cb();
                            }
                        }
                    });
                }
            }
        }

        if let Some(body) = root.append_element("div", &[BODY_CLASS]) {
            body.set_inner_html(&self.body_template);
        }

        if let Some(wire) = &self.wire
            && let Err(e) = wire(&root)
        {
            error!("wiring '{}' failed: {}", self.title, e);
            root.alert(format!("{} could not be initialized: {}", self.title, e));
        }

        root
    }
}

/// Body region of a rendered card
pub fn card_body(root: &Element) -> Option<Element> {
    root.query(&format!(".{}", BODY_CLASS))
}

/// Title text of a rendered card
pub fn card_title(root: &Element) -> Option<String> {
    root.query(&format!(".{}", TITLE_CLASS)).map(|t| t.text_content())
}

/// Close affordance of a rendered card
pub fn close_button(root: &Element) -> Option<Element> {
    root.query(&format!(".{}", CLOSE_CLASS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use std::cell::Cell;

    #[test]
    fn test_render_structure() {
        let dom = Dom::new();
        let card = ToolCard::new("Echo", "<input class='x'><output class='y'>", None).with_instance_key("echo-1");
        let root = card.render(&dom);

        assert!(root.has_class(CARD_CLASS));
        assert_eq!(root.attr(INSTANCE_ATTR).as_deref(), Some("echo-1"));
        assert_eq!(card_title(&root).as_deref(), Some("Echo"));
        assert!(root.query(".card-move").is_some());
        assert!(close_button(&root).is_some());

        let body = card_body(&root).unwrap();
        assert!(body.query(".x").is_some());
        assert!(body.query(".y").is_some());
    }

    #[test]
    fn test_render_is_detached() {
        let dom = Dom::new();
        let root = ToolCard::new("T", "", None).render(&dom);
        assert!(root.exists());
        assert!(!root.is_connected());
    }

    #[test]
    fn test_wire_called_once_after_body_present() {
        let dom = Dom::new();
        let calls = Rc::new(Cell::new(0));
        let seen_body = Rc::new(Cell::new(false));

        let c = Rc::clone(&calls);
        let s = Rc::clone(&seen_body);
        let wire: WireFn = Rc::new(move |root: &Element| -> crate::error::Result<()> {
            c.set(c.get() + 1);
            s.set(root.query(".x").is_some());
            Ok(())
        });

        ToolCard::new("T", "<input class='x'>", Some(wire)).render(&dom);
        assert_eq!(calls.get(), 1);
        assert!(seen_body.get());
    }

    #[test]
    fn test_wire_failure_still_renders() {
        let dom = Dom::new();
        let wire: WireFn = Rc::new(|_: &Element| -> crate::error::Result<()> { Err(DashError::Wiring("boom".to_string())) });
        let root = ToolCard::new("Broken", "<p class='p'>body</p>", Some(wire)).with_instance_key("broken-1").render(&dom);

        assert!(card_body(&root).unwrap().query(".p").is_some());
        assert!(close_button(&root).is_some());

        let notices = dom.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].source.as_deref(), Some("broken-1"));
        assert!(notices[0].message.contains("boom"));
    }

    #[test]
    fn test_close_removes_and_notifies() {
        let dom = Dom::new();
        let closed = Rc::new(Cell::new(0));
        let c = Rc::clone(&closed);
        let root = ToolCard::new("T", "<p>x</p>", None).with_on_close(move || c.set(c.get() + 1)).render(&dom);
        dom.root().append_child(&root);
        assert!(root.is_connected());

        close_button(&root).unwrap().click();
        assert!(!root.exists());
        assert_eq!(closed.get(), 1);
        assert!(dom.root().children().is_empty());
    }

    #[test]
    fn test_from_descriptor() {
        let descriptor = ToolDescriptor::new("echo", "Echo", "<output class='y'>");
        let card = ToolCard::from_descriptor(&descriptor);
        assert_eq!(card.title(), "Echo");
        let dom = Dom::new();
        let root = card.render(&dom);
        assert!(root.query(".y").is_some());
    }
}
