//! Interactive controls of a card body, as the terminal presents them.

use crate::dom::Element;
use crate::shell::card_body;

/// Selector for everything the user can focus
const CONTROL_SELECTOR: &str = "input, textarea, select, button";

/// Rendered-only regions a tool writes markup into
const OUTPUT_SELECTOR: &str = ".preview-area";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    Input,
    TextArea,
    Select,
}

impl ControlKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "button" => Some(Self::Button),
            "input" => Some(Self::Input),
            "textarea" => Some(Self::TextArea),
            "select" => Some(Self::Select),
            _ => None,
        }
    }
}

/// A focusable control in a card body
#[derive(Debug, Clone)]
pub struct Control {
    pub element: Element,
    pub kind: ControlKind,
    pub readonly: bool,
}

impl Control {
    pub fn from_element(element: &Element) -> Option<Self> {
        let kind = ControlKind::from_tag(&element.tag()?)?;
        Some(Self {
            element: element.clone(),
            kind,
            readonly: element.attr("readonly").is_some(),
        })
    }

    /// Button text, or the placeholder of a field
    pub fn label(&self) -> String {
        match self.kind {
            ControlKind::Button => self.element.text_content().trim().to_string(),
            _ => self
                .element
                .attr("placeholder")
                .or_else(|| self.element.classes().into_iter().next())
                .unwrap_or_default(),
        }
    }

    /// Whether Enter starts editing this control's value
    pub fn is_editable(&self) -> bool {
        matches!(self.kind, ControlKind::Input | ControlKind::TextArea) && !self.readonly
    }

    /// Move a select to its next option, wrapping around
    ///
    /// Returns the new value, or `None` for a select without options.
    pub fn cycle_option(&self) -> Option<String> {
        let options = self.element.options();
        if options.is_empty() {
            return None;
        }
        let current = self.element.value();
        let index = options.iter().position(|(v, _)| *v == current).map(|i| (i + 1) % options.len()).unwrap_or(0);
        let value = options[index].0.clone();
        self.element.set_value(value.clone());
        Some(value)
    }
}

/// Focusable controls of a card, in document order
pub fn card_controls(root: &Element) -> Vec<Control> {
    card_body(root)
        .map(|body| body.query_all(CONTROL_SELECTOR))
        .unwrap_or_default()
        .iter()
        .filter_map(Control::from_element)
        .collect()
}

/// Markup output regions of a card
pub fn card_outputs(root: &Element) -> Vec<Element> {
    card_body(root).map(|body| body.query_all(OUTPUT_SELECTOR)).unwrap_or_default()
}
