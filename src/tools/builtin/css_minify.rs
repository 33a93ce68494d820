//! CSS Minifier

use crate::dom::Element;
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::common::{on_click_transform, require};

pub const KIND: &str = "css";
pub const TITLE: &str = "CSS Minifier";

const BODY: &str = r#"<div class="space-y-4">
  <textarea class="css-input" placeholder="Enter CSS here..."></textarea>
  <button class="minify-btn">Minify</button>
  <textarea class="result-area" placeholder="Minified CSS will appear here..." readonly></textarea>
</div>"#;

/// Punctuation that never needs surrounding whitespace
const TIGHT: [char; 4] = ['{', '}', ';', ','];

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Strip comments and redundant whitespace; quoted strings are copied as is
pub fn minify(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut pending_space = false;
    let mut chars = css.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                pending_space = true;
            }
            c if c.is_whitespace() => pending_space = true,
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space, c);
                out.push(c);
                let mut escaped = false;
                for s in chars.by_ref() {
                    out.push(s);
                    if escaped {
                        escaped = false;
                    } else if s == '\\' {
                        escaped = true;
                    } else if s == c {
                        break;
                    }
                }
            }
            c => {
                flush_space(&mut out, &mut pending_space, c);
                if c == '}' && out.ends_with(';') {
                    out.pop();
                }
                out.push(c);
            }
        }
    }
    out
}

fn flush_space(out: &mut String, pending: &mut bool, next: char) {
    if std::mem::take(pending) && !out.is_empty() && !TIGHT.contains(&next) && !out.ends_with(&TIGHT[..]) {
        out.push(' ');
    }
}

fn wire(root: &Element) -> Result<()> {
    on_click_transform(
        &require(root, ".minify-btn")?,
        &require(root, ".css-input")?,
        &require(root, ".result-area")?,
        |css| Ok(minify(css)),
    );
    Ok(())
}
