//! Error types for desk usage analysis

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, deriving or reporting desk usage
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed record {record} (line {line}): {reason}")]
    MalformedRecord {
        record: usize,
        line: u64,
        reason: String,
    },

    #[error("No data to summarize: no day contains a measured interval")]
    EmptyDataset,

    #[error("No standing or sitting time recorded")]
    NoStandingData,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart rendering error: {0}")]
    Chart(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeskError::InputNotFound(PathBuf::from("/tmp/missing.csv"));
        assert_eq!(err.to_string(), "File not found: /tmp/missing.csv");

        let err = DeskError::MalformedRecord {
            record: 3,
            line: 4,
            reason: "invalid height 'tall'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record 3 (line 4): invalid height 'tall'"
        );

        let err = DeskError::MissingColumn("height_mm".to_string());
        assert_eq!(err.to_string(), "Missing required column: height_mm");
    }
}
