//! Error types for ctgscore.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtgError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    // Input errors
    #[error("Input directory not found: {path}")]
    InputDirNotFound { path: String },

    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },

    // Pipeline errors
    #[error("Pipeline error: {message}")]
    Pipeline { message: String },

    // Comparison errors
    #[error("Reference results not found at {path}")]
    ReferenceNotFound { path: String },

    #[error("Reference results at {path} contain no entries")]
    ReferenceEmpty { path: String },

    #[error("Unknown grade label: {label}")]
    UnknownGrade { label: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Plot errors
    #[error("Plot rendering failed: {message}")]
    Plot { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, CtgError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_invalid_value_display() {
        let error = CtgError::ConfigInvalidValue {
            key: "processes".to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for processes: must be at least 1"
        );
    }

    #[test]
    fn test_decode_display() {
        let error = CtgError::Decode {
            path: "ctg_files/12.txt".to_string(),
            message: "expected ']' at offset 40".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to decode ctg_files/12.txt: expected ']' at offset 40"
        );
    }

    #[test]
    fn test_reference_not_found_display() {
        let error = CtgError::ReferenceNotFound {
            path: "expected_result.json".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Reference results not found at expected_result.json"
        );
    }

    #[test]
    fn test_unknown_grade_display() {
        let error = CtgError::UnknownGrade {
            label: "fair".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown grade label: fair");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: CtgError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: CtgError = json_error.into();
        assert!(error.to_string().starts_with("JSON error"));

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<CtgError>();
        assert_sync::<CtgError>();
    }
}
