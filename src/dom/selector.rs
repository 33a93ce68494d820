//! Compound selectors: `tag`, `.class`, `tag.class.other`, and comma lists of those.
//!
//! Combinators are not supported. Descendant (`div p`), child (`div > p`) and
//! sibling (`+`, `~`) forms are rejected with `DashError::Selector`, since a
//! selector is matched against one node without looking at its ancestors.
//! To scope a lookup, query from the ancestor element instead:
//! `card.query(".y")` rather than `root.query(".card .y")`.

use crate::error::{DashError, Result};

use super::tree::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.contains(char::is_whitespace) {
            return Err(DashError::Selector(s.to_string()));
        }

        let mut parts = s.split('.');
        let tag = match parts.next() {
            Some("") | None => None,
            Some(t) if is_ident(t) => Some(t.to_ascii_lowercase()),
            Some(_) => return Err(DashError::Selector(s.to_string())),
        };

        let mut classes = Vec::new();
        for class in parts {
            if !is_ident(class) {
                return Err(DashError::Selector(s.to_string()));
            }
            classes.push(class.to_string());
        }

        if tag.is_none() && classes.is_empty() {
            return Err(DashError::Selector(s.to_string()));
        }
        Ok(Self { tag, classes })
    }

    fn matches(&self, node: &Node) -> bool {
        if node.is_text() {
            return false;
        }
        if let Some(tag) = &self.tag
            && *tag != node.tag
        {
            return false;
        }
        self.classes.iter().all(|c| node.classes.iter().any(|nc| nc == c))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(s: &str) -> Result<Self> {
        let alternatives = s.split(',').map(Compound::parse).collect::<Result<Vec<_>>>()?;
        Ok(Self { alternatives })
    }

    pub(crate) fn matches(&self, node: &Node) -> bool {
        self.alternatives.iter().any(|c| c.matches(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(tag: &str, classes: &[&str]) -> Node {
        let mut n = Node::element(tag);
        n.classes = classes.iter().map(|c| c.to_string()).collect();
        n
    }

    #[test]
    fn test_class_selector() {
        let sel = Selector::parse(".format-btn").unwrap();
        assert!(sel.matches(&node("button", &["format-btn", "px-4"])));
        assert!(!sel.matches(&node("button", &["copy-btn"])));
    }

    #[test]
    fn test_tag_selector() {
        let sel = Selector::parse("textarea").unwrap();
        assert!(sel.matches(&node("textarea", &[])));
        assert!(!sel.matches(&node("input", &[])));
    }

    #[test]
    fn test_compound_selector() {
        let sel = Selector::parse("button.card-close").unwrap();
        assert!(sel.matches(&node("button", &["card-close"])));
        assert!(!sel.matches(&node("div", &["card-close"])));
    }

    #[test]
    fn test_multiple_classes() {
        let sel = Selector::parse(".a.b").unwrap();
        assert!(sel.matches(&node("div", &["b", "a"])));
        assert!(!sel.matches(&node("div", &["a"])));
    }

    #[test]
    fn test_selector_list() {
        let sel = Selector::parse("input, textarea, select").unwrap();
        assert!(sel.matches(&node("select", &[])));
        assert!(!sel.matches(&node("button", &[])));
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let sel = Selector::parse("TEXTAREA").unwrap();
        assert!(sel.matches(&node("textarea", &[])));
    }

    #[test]
    fn test_text_nodes_never_match() {
        let sel = Selector::parse("div").unwrap();
        assert!(!sel.matches(&Node::text("div")));
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("div p").is_err());
        assert!(Selector::parse("button:last-child").is_err());
        assert!(Selector::parse(".a,").is_err());
    }

    #[test]
    fn test_combinators_rejected() {
        for s in ["div p", ".card .y", "div > p", "div>p", "h3 + p", "h3 ~ p"] {
            assert!(matches!(Selector::parse(s), Err(DashError::Selector(_))), "{s}");
        }
    }
}
