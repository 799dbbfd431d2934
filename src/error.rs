//! Error type for the input and report layers
//!
//! The projection engine and goal-seek never fail; everything that touches
//! files or caller-supplied data returns `Result<T, PlanError>`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown longevity preset: {0} (expected 85, 90 or 95)")]
    UnknownPreset(u32),

    #[error("Invalid scenario: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scenario.json");
        let err: PlanError = io.into();
        assert!(matches!(err, PlanError::Io(_)));
        assert!(err.to_string().contains("scenario.json"));
    }

    #[test]
    fn test_json_error_converts() {
        let err: PlanError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_invalid_message() {
        let err = PlanError::Invalid("freedom_age must be >= current_age".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid scenario: freedom_age must be >= current_age"
        );
    }
}
