//! Dashboard integration tests
//!
//! Drives the dashboard the way a host does: mount the grid, select tools
//! from the builtin catalog, interact, and dismiss.

use devdash::config::HttpConfig;
use devdash::dom::{Dom, Element};
use devdash::error::{DashError, Result};
use devdash::shell::{Dashboard, card_title, close_button};
use devdash::tools::ToolCatalog;

fn mounted() -> Result<(Dom, Dashboard, ToolCatalog)> {
    let dom = Dom::new();
    let dashboard = Dashboard::new(&dom);
    dom.root().append_child(dashboard.render());
    let catalog = ToolCatalog::builtin(&HttpConfig::default())?;
    Ok((dom, dashboard, catalog))
}

/// Integration test: every builtin tool opens, mounts, and wires cleanly
#[test]
fn test_open_every_builtin_tool() -> Result<()> {
    let (dom, dashboard, catalog) = mounted()?;

    for kind in catalog.list() {
        let key = dashboard.select(kind, &catalog)?.expect("builtin kind opens");
        assert!(key.starts_with(&format!("{}-", kind)));
        let instance = dashboard.get(&key).expect("registered");
        assert!(instance.root.is_connected());
        assert_eq!(card_title(&instance.root), Some(catalog.get(kind).unwrap().title.clone()));
    }

    assert_eq!(dashboard.len(), catalog.len());
    assert!(dashboard.is_consistent());
    assert!(dom.take_notices().is_empty(), "no tool should fail to wire");
    Ok(())
}

/// Integration test: registry and mounted cards stay in step through opens and closes
#[test]
fn test_registry_consistency_through_churn() -> Result<()> {
    let (_dom, dashboard, catalog) = mounted()?;

    let a = dashboard.select("json", &catalog)?.unwrap();
    let b = dashboard.select("json", &catalog)?.unwrap();
    let c = dashboard.select("uuid", &catalog)?.unwrap();
    assert_ne!(a, b);
    assert_eq!(dashboard.instances(), vec![a.clone(), b.clone(), c.clone()]);

    close_button(&dashboard.get(&b).unwrap().root).unwrap().click();
    assert!(!dashboard.contains(&b));
    assert!(dashboard.is_consistent());

    assert!(dashboard.close(&a));
    assert!(!dashboard.close(&a));
    assert_eq!(dashboard.instances(), vec![c]);
    assert!(dashboard.is_consistent());
    Ok(())
}

/// Integration test: unknown and empty selections change nothing
#[test]
fn test_unknown_selection_is_noop() -> Result<()> {
    let (dom, dashboard, catalog) = mounted()?;
    let before = dom.node_count();

    assert_eq!(dashboard.select("", &catalog)?, None);
    assert_eq!(dashboard.select("not-a-tool", &catalog)?, None);

    assert!(dashboard.is_empty());
    assert_eq!(dom.node_count(), before);
    Ok(())
}

/// Integration test: render hands back the same container every time
#[test]
fn test_render_idempotent_after_adds() -> Result<()> {
    let (dom, dashboard, catalog) = mounted()?;
    dashboard.select("css", &catalog)?;

    let first: Element = dashboard.render().clone();
    assert_eq!(&first, dashboard.render());
    assert_eq!(dom.root().children(), vec![first]);
    Ok(())
}

/// Integration test: dismissing a card frees its nodes and listeners
#[test]
fn test_dismiss_frees_nodes() -> Result<()> {
    let (dom, dashboard, catalog) = mounted()?;
    let baseline = dom.node_count();

    let key = dashboard.select("hash", &catalog)?.unwrap();
    let button = dashboard.get(&key).unwrap().root.query(".generate-btn").unwrap();
    assert!(dom.node_count() > baseline);
    assert_eq!(button.listener_count(), 1);

    dashboard.close(&key);
    assert_eq!(dom.node_count(), baseline);
    assert!(!button.exists());
    assert!(!button.click());
    Ok(())
}

/// Integration test: a failing wiring callback still mounts the card
#[test]
fn test_wiring_failure_still_mounts() -> Result<()> {
    let (dom, dashboard, _catalog) = mounted()?;
    let wire: devdash::shell::WireFn =
        std::rc::Rc::new(|_root: &Element| -> Result<()> { Err(DashError::Wiring("boom".to_string())) });

    let key = dashboard.add_tool("broken", "Broken", "<input class='x'>", Some(wire))?;

    let instance = dashboard.get(&key).unwrap();
    assert!(instance.root.is_connected());
    assert!(instance.root.query(".x").is_some());
    let notices = dom.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].source.as_deref(), Some(key.as_str()));
    assert!(notices[0].message.contains("boom"));
    Ok(())
}

/// Integration test: a hand-rolled echo tool works end to end
#[test]
fn test_echo_tool_end_to_end() -> Result<()> {
    let (_dom, dashboard, _catalog) = mounted()?;
    let wire: devdash::shell::WireFn = std::rc::Rc::new(|root: &Element| -> Result<()> {
        let input = root.query(".in").ok_or_else(|| DashError::Markup("in".to_string()))?;
        let out = root.query(".out").ok_or_else(|| DashError::Markup("out".to_string()))?;
        let source = input.clone();
        input.add_event_listener(devdash::dom::EventKind::Input, move |_| {
            out.set_text(&source.value());
        });
        Ok(())
    });

    let key = dashboard.add_tool("echo", "Echo", "<input class='in'><div class='out'></div>", Some(wire))?;
    let root = dashboard.get(&key).unwrap().root;
    root.query(".in").unwrap().type_text("hi there");
    assert_eq!(root.query(".out").unwrap().text_content(), "hi there");
    Ok(())
}

/// Integration test: teardown empties the registry and the document
#[test]
fn test_teardown() -> Result<()> {
    let (dom, dashboard, catalog) = mounted()?;
    let baseline = dom.node_count();
    dashboard.select("markdown", &catalog)?;
    dashboard.select("color", &catalog)?;

    dashboard.teardown();
    assert!(dom.root().children().is_empty());
    assert!(dom.node_count() < baseline);
    Ok(())
}
