//! Events dispatched to element listeners.

use std::fmt;
use std::rc::Rc;

use super::element::Element;

/// Kinds of events a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Button activation
    Click,
    /// Text field content changed
    Input,
    /// Select option changed
    Change,
}

impl EventKind {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "click" => Some(Self::Click),
            "input" => Some(Self::Input),
            "change" => Some(Self::Change),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Change => "change",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event delivered to a listener
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened
    pub kind: EventKind,
    /// Element the event was dispatched on
    pub target: Element,
}

/// Listener closure stored on a node
pub(crate) type Listener = Rc<dyn Fn(&Event)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_from_str() {
        assert_eq!(EventKind::from_str("click"), Some(EventKind::Click));
        assert_eq!(EventKind::from_str("INPUT"), Some(EventKind::Input));
        assert_eq!(EventKind::from_str("change"), Some(EventKind::Change));
        assert_eq!(EventKind::from_str("hover"), None);
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Click.to_string(), "click");
        assert_eq!(EventKind::Input.to_string(), "input");
    }
}
