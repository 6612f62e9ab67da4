//! Error types for trip ingestion and summarisation

use std::path::PathBuf;
use thiserror::Error;

/// Result type used across the library
pub type Result<T> = std::result::Result<T, LinehaulError>;

#[derive(Error, Debug)]
pub enum LinehaulError {
    /// A required column is absent or blank in a data row (1-based)
    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    /// A column holds a value that cannot be interpreted
    #[error("row {row}: invalid value {value:?} for field `{field}`")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// No CSV file found in the data directory
    #[error("no CSV file found in {}", .0.display())]
    NoInputFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LinehaulError {
    pub fn missing(row: usize, field: &'static str) -> Self {
        Self::MissingField { row, field }
    }

    pub fn invalid(row: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            row,
            field,
            value: value.into(),
        }
    }

    /// True for errors caused by the content of the input batch
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::InvalidField { .. } | Self::Csv(_)
        )
    }
}
