//! Markup parsing into the node tree.
//!
//! Uses `scraper` (html5ever) to parse fragments, then copies the result into
//! the arena. Form controls are normalized on the way in: a textarea's text
//! becomes its value and an input's `value` attribute becomes its value.

use scraper::{ElementRef, Html};

use super::tree::{Node, NodeId, Tree};

/// Elements whose whitespace-only text children are significant
const PRESERVE_WHITESPACE: &[&str] = &["pre", "code", "textarea"];

/// Parse `markup` and append the resulting nodes under `parent`
pub(crate) fn append_fragment(tree: &mut Tree, parent: NodeId, markup: &str) {
    let fragment = Html::parse_fragment(markup);
    copy_children(tree, parent, fragment.root_element());
}

fn copy_children(tree: &mut Tree, parent: NodeId, source: ElementRef<'_>) {
    let keep_blank = tree.node(parent).is_some_and(|n| PRESERVE_WHITESPACE.contains(&n.tag.as_str()));

    for child in source.children() {
        if let Some(el) = ElementRef::wrap(child) {
            let value = el.value();
            let mut node = Node::element(value.name());
            node.classes = value.classes().map(str::to_string).collect();
            for (name, v) in value.attrs() {
                if name != "class" {
                    node.attrs.insert(name.to_string(), v.to_string());
                }
            }
            let id = tree.alloc(node);
            tree.append(parent, id);
            copy_children(tree, id, el);
            normalize_control(tree, id);
        } else if let Some(text) = child.value().as_text() {
            let content: &str = text;
            if content.trim().is_empty() && !keep_blank {
                continue;
            }
            let id = tree.alloc(Node::text(content));
            tree.append(parent, id);
        }
    }
}

fn normalize_control(tree: &mut Tree, id: NodeId) {
    let Some(tag) = tree.node(id).map(|n| n.tag.clone()) else {
        return;
    };
    match tag.as_str() {
        "textarea" => {
            let initial = tree.text_content(id);
            tree.clear_children(id);
            if let Some(n) = tree.node_mut(id) {
                n.value = Some(initial);
            }
        }
        "input" => {
            if let Some(n) = tree.node_mut(id) {
                n.value = Some(n.attrs.get("value").cloned().unwrap_or_default());
            }
        }
        _ => {}
    }
}
