//! Wiring helpers shared by the builtin tools.

use std::time::Duration;

use crate::dom::{Element, EventKind};
use crate::error::{DashError, Result};

use super::error::TransformError;

/// How long a copy button shows its confirmation
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

pub const COPIED_LABEL: &str = "✓ Copied!";

/// Look up a control the tool's own template is expected to contain
pub fn require(root: &Element, selector: &str) -> Result<Element> {
    root.query(selector)
        .ok_or_else(|| DashError::Markup(format!("missing {}", selector)))
}

/// Run `transform` on `source`'s value when `button` is clicked, writing the
/// result to `target` or raising the error as a notification
pub fn on_click_transform(
    button: &Element,
    source: &Element,
    target: &Element,
    transform: impl Fn(&str) -> std::result::Result<String, TransformError> + 'static,
) {
    let source = source.clone();
    let target = target.clone();
    button.add_event_listener(EventKind::Click, move |e| match transform(&source.value()) {
        Ok(out) => {
            target.set_value(out);
        }
        Err(err) => e.target.alert(err.to_string()),
    });
}

/// Copy `source`'s value, then show a confirmation label on the button for
/// `COPY_FEEDBACK` before restoring its original label
pub fn wire_copy_button(button: &Element, source: &Element) {
    let label = button.text_content();
    let source = source.clone();
    button.add_event_listener(EventKind::Click, move |e| {
        let button = &e.target;
        if !button.write_clipboard(&source.value()) {
            button.alert(TransformError::Clipboard("document unavailable".to_string()).to_string());
            return;
        }
        button.set_text(COPIED_LABEL);
        let restore = button.clone();
        let label = label.clone();
        button.set_timeout(COPY_FEEDBACK, move || {
            restore.set_text(&label);
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use std::time::Instant;

    fn host(dom: &Dom, markup: &str) -> Element {
        let host = dom.root().append_element("div", &[]).unwrap();
        host.set_inner_html(markup);
        host
    }

    #[test]
    fn test_require_found_and_missing() {
        let dom = Dom::new();
        let root = host(&dom, "<textarea class='t'></textarea>");
        assert!(require(&root, ".t").is_ok());
        let err = require(&root, ".nope").unwrap_err();
        assert!(matches!(err, DashError::Markup(_)));
        assert!(err.to_string().contains(".nope"));
    }

    #[test]
    fn test_on_click_transform_success() {
        let dom = Dom::new();
        let root = host(&dom, "<input class='in'><button class='go'>Go</button><textarea class='out'></textarea>");
        let input = root.query(".in").unwrap();
        let out = root.query(".out").unwrap();
        on_click_transform(&root.query(".go").unwrap(), &input, &out, |s| Ok(s.to_uppercase()));

        input.set_value("abc");
        root.query(".go").unwrap().click();
        assert_eq!(out.value(), "ABC");
        assert!(dom.take_notices().is_empty());
    }

    #[test]
    fn test_on_click_transform_error_alerts() {
        let dom = Dom::new();
        let root = host(&dom, "<input class='in'><button class='go'>Go</button>");
        let input = root.query(".in").unwrap();
        on_click_transform(&root.query(".go").unwrap(), &input, &input, |_| Err(TransformError::InvalidColor));

        input.set_value("zzz");
        root.query(".go").unwrap().click();
        assert_eq!(input.value(), "zzz");
        let notices = dom.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Invalid color format");
    }

    #[test]
    fn test_copy_button_feedback_and_restore() {
        let dom = Dom::new();
        let root = host(&dom, "<textarea class='t'>payload</textarea><button class='copy-btn'>Copy</button>");
        let button = root.query(".copy-btn").unwrap();
        wire_copy_button(&button, &root.query(".t").unwrap());

        button.click();
        assert_eq!(dom.clipboard().as_deref(), Some("payload"));
        assert_eq!(button.text_content(), COPIED_LABEL);

        dom.run_timers(Instant::now() + COPY_FEEDBACK + Duration::from_millis(10));
        assert_eq!(button.text_content(), "Copy");
    }

    #[test]
    fn test_copy_twice_restores_original_label() {
        let dom = Dom::new();
        let root = host(&dom, "<textarea class='t'>x</textarea><button class='copy-btn'>Copy</button>");
        let button = root.query(".copy-btn").unwrap();
        wire_copy_button(&button, &root.query(".t").unwrap());

        button.click();
        button.click();
        dom.run_timers(Instant::now() + COPY_FEEDBACK + Duration::from_millis(10));
        assert_eq!(button.text_content(), "Copy");
    }

    #[test]
    fn test_copy_restore_after_removal_is_noop() {
        let dom = Dom::new();
        let root = host(&dom, "<textarea class='t'>x</textarea><button class='copy-btn'>Copy</button>");
        let button = root.query(".copy-btn").unwrap();
        wire_copy_button(&button, &root.query(".t").unwrap());

        button.click();
        root.remove();
        assert_eq!(dom.run_timers(Instant::now() + COPY_FEEDBACK + Duration::from_millis(10)), 1);
        assert!(!button.exists());
    }
}
