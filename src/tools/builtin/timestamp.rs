//! Timestamp Converter
//!
//! Epoch milliseconds to an ISO-8601 UTC string and back.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};

use crate::dom::Element;
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::{on_click_transform, require};

pub const KIND: &str = "timestamp";
pub const TITLE: &str = "Timestamp Converter";

const BODY: &str = r#"<div class="space-y-4">
  <input class="timestamp-input" placeholder="Enter timestamp...">
  <button class="convert-to-date-btn">Convert to Date</button>
  <input class="date-input" placeholder="Enter date...">
  <button class="convert-to-timestamp-btn">Convert to Timestamp</button>
</div>"#;

/// Largest representable distance from the epoch, in ms (±100,000,000 days)
const MAX_EPOCH_MS: i64 = 8_640_000_000_000_000;

/// Zone-less layouts, all read as UTC
const NAIVE_LAYOUTS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Leading decimal integer of `input`
///
/// Leading whitespace and a sign are allowed; anything after the digits is
/// ignored. `None` when there are no digits.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Epoch milliseconds to `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn to_date(input: &str) -> std::result::Result<String, TransformError> {
    let ms = parse_leading_int(input)
        .filter(|ms| ms.abs() <= MAX_EPOCH_MS)
        .ok_or(TransformError::InvalidTimestamp)?;
    let date = DateTime::from_timestamp_millis(ms).ok_or(TransformError::InvalidTimestamp)?;
    Ok(date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Date text to epoch milliseconds
pub fn to_timestamp(input: &str) -> std::result::Result<String, TransformError> {
    parse_date_ms(input.trim())
        .map(|ms| ms.to_string())
        .ok_or(TransformError::InvalidDate)
}

fn parse_date_ms(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.timestamp_millis());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(s) {
        return Some(date.timestamp_millis());
    }
    if let Some(naive) = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
    {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn wire(root: &Element) -> Result<()> {
    let timestamp = require(root, ".timestamp-input")?;
    let date = require(root, ".date-input")?;
    on_click_transform(&require(root, ".convert-to-date-btn")?, &timestamp, &date, to_date);
    on_click_transform(&require(root, ".convert-to-timestamp-btn")?, &date, &timestamp, to_timestamp);
    Ok(())
}
