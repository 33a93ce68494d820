//! Error types for devdash
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in devdash
#[derive(Debug, Error)]
pub enum DashError {
    /// Tool kind is not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Instance key already present in the dashboard registry
    #[error("Duplicate instance: {0}")]
    DuplicateInstance(String),

    /// Selector could not be parsed
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// Body template or card structure is not what the wiring expects
    #[error("Markup error: {0}")]
    Markup(String),

    /// A wiring callback failed while attaching behavior
    #[error("Wiring error: {0}")]
    Wiring(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for devdash operations
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_error() {
        let err = DashError::UnknownTool("frobnicate".to_string());
        assert_eq!(err.to_string(), "Unknown tool: frobnicate");
    }

    #[test]
    fn test_duplicate_instance_error() {
        let err = DashError::DuplicateInstance("json-1700000000000".to_string());
        assert_eq!(err.to_string(), "Duplicate instance: json-1700000000000");
    }

    #[test]
    fn test_selector_error() {
        let err = DashError::Selector("#".to_string());
        assert_eq!(err.to_string(), "Invalid selector: #");
    }

    #[test]
    fn test_markup_error() {
        let err = DashError::Markup("missing .result-area".to_string());
        assert_eq!(err.to_string(), "Markup error: missing .result-area");
    }

    #[test]
    fn test_wiring_error() {
        let err = DashError::Wiring("no textarea".to_string());
        assert_eq!(err.to_string(), "Wiring error: no textarea");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashError = io_err.into();
        assert!(matches!(err, DashError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: DashError = json_err.into();
        assert!(matches!(err, DashError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(DashError::UnknownTool("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
