//! Error types for the calhouse crate

use thiserror::Error;

/// Result type alias for calhouse operations
pub type Result<T> = std::result::Result<T, CalhouseError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum CalhouseError {
    #[error("Required column not found: {0}")]
    MissingColumn(String),

    #[error("No candidate models registered")]
    NoCandidates,

    #[error("Failed to write model artifact {path}: {source}")]
    ArtifactWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Data error: {0}")]
    Data(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Model not fitted")]
    NotFitted,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<polars::error::PolarsError> for CalhouseError {
    fn from(err: polars::error::PolarsError) -> Self {
        CalhouseError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for CalhouseError {
    fn from(err: serde_json::Error) -> Self {
        CalhouseError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalhouseError::MissingColumn("median_house_value".to_string());
        assert_eq!(
            err.to_string(),
            "Required column not found: median_house_value"
        );
    }

    #[test]
    fn test_artifact_write_names_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CalhouseError::ArtifactWrite {
            path: "save_model/model.json".to_string(),
            source: io_err,
        };
        assert!(err.to_string().contains("save_model/model.json"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CalhouseError = io_err.into();
        assert!(matches!(err, CalhouseError::Io(_)));
    }
}
