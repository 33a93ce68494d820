//! Color Converter
//!
//! Hex colors to `rgb()` and `hsl()` notation.

use std::fmt;

use crate::dom::{Element, EventKind};
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::require;

pub const KIND: &str = "color";
pub const TITLE: &str = "Color Converter";

const BODY: &str = r#"<div class="space-y-4">
  <input class="hex-input" placeholder="Enter HEX color...">
  <button class="convert-btn">Convert</button>
  <input class="rgb-input" placeholder="RGB will appear here..." readonly>
  <input class="hsl-input" placeholder="HSL will appear here..." readonly>
</div>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness in whole percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl Rgb {
    /// Parse `#rgb` or `#rrggbb`
    pub fn from_hex(input: &str) -> std::result::Result<Self, TransformError> {
        let digits = input.trim().strip_prefix('#').ok_or(TransformError::InvalidColor)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TransformError::InvalidColor);
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(TransformError::InvalidColor),
        };
        let value = u32::from_str_radix(&expanded, 16).map_err(|_| TransformError::InvalidColor)?;
        Ok(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        Hsl {
            h: round_half_up(h * 360.0) as u16,
            s: round_half_up(s * 100.0) as u8,
            l: round_half_up(l * 100.0) as u8,
        }
    }
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Convert a hex color to its `(rgb, hsl)` strings
pub fn convert(hex: &str) -> std::result::Result<(String, String), TransformError> {
    let rgb = Rgb::from_hex(hex)?;
    Ok((rgb.to_string(), rgb.to_hsl().to_string()))
}

fn wire(root: &Element) -> Result<()> {
    let hex = require(root, ".hex-input")?;
    let rgb = require(root, ".rgb-input")?;
    let hsl = require(root, ".hsl-input")?;
    require(root, ".convert-btn")?.add_event_listener(EventKind::Click, move |e| match convert(&hex.value()) {
        Ok((rgb_text, hsl_text)) => {
            rgb.set_value(rgb_text);
            hsl.set_value(hsl_text);
        }
        Err(err) => e.target.alert(err.to_string()),
    });
    Ok(())
}
