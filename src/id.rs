//! ID generation utilities for devdash
//!
//! Instance keys identify one open tool card. The same tool kind may be open
//! several times, so keys combine the kind with the creation time.

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Generate an instance key for a tool kind
///
/// Format: `{kind}-{timestamp_ms}`
/// Example: `json-1738300800123`
pub fn generate_instance_key(kind: &str, timestamp_ms: u64) -> String {
    format!("{}-{}", kind, timestamp_ms)
}

/// Generate an instance key that `is_taken` does not reject
///
/// Two cards of the same kind created within one millisecond would collide,
/// so a `-{n}` suffix is appended until the key is free.
/// Example: `json-1738300800123-2`
pub fn unique_instance_key(kind: &str, timestamp_ms: u64, is_taken: impl Fn(&str) -> bool) -> String {
    let base = generate_instance_key(kind, timestamp_ms);
    if !is_taken(&base) {
        return base;
    }
    let mut suffix = 1u32;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_now_ms_returns_reasonable_timestamp() {
        let ts = now_ms();
        // Should be after 2020-01-01 and before 2100-01-01
        assert!(ts > 1577836800000);
        assert!(ts < 4102444800000);
    }

    #[test]
    fn test_generate_instance_key_format() {
        assert_eq!(generate_instance_key("json", 1738300800123), "json-1738300800123");
    }

    #[test]
    fn test_generate_instance_key_camel_kind() {
        let key = generate_instance_key("jsonToCsv", 5);
        assert!(key.starts_with("jsonToCsv-"));
        assert!(key.ends_with("-5"));
    }

    #[test]
    fn test_unique_instance_key_free() {
        let key = unique_instance_key("uuid", 42, |_| false);
        assert_eq!(key, "uuid-42");
    }

    #[test]
    fn test_unique_instance_key_tie_break() {
        let taken: HashSet<String> = ["uuid-42".to_string()].into_iter().collect();
        let key = unique_instance_key("uuid", 42, |k| taken.contains(k));
        assert_eq!(key, "uuid-42-1");
    }

    #[test]
    fn test_unique_instance_key_skips_taken_suffixes() {
        let taken: HashSet<String> = ["css-7", "css-7-1", "css-7-2"].iter().map(|s| s.to_string()).collect();
        let key = unique_instance_key("css", 7, |k| taken.contains(k));
        assert_eq!(key, "css-7-3");
    }
}
