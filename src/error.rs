//! Error types for pixel transform operations

use crate::services::ProcessingStage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pixel transform operations
pub type Result<T> = std::result::Result<T, PixelOpsError>;

/// Comprehensive error type for pixel transform operations
#[derive(Error, Debug)]
pub enum PixelOpsError {
    /// Input image does not exist
    #[error("Input not found: '{}'", .0.display())]
    NotFound(PathBuf),

    /// Input/output errors (permission denied, unreadable file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input exists but could not be decoded as an image
    #[error("Failed to decode image '{}': {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// Output PNG could not be encoded or written
    #[error("Failed to encode PNG '{}': {message}", path.display())]
    Encode { path: PathBuf, message: String },

    /// Invalid threshold, path or other parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other failure, tagged with the stage it happened in
    #[error("Processing failed at stage '{}': {message}", stage.description())]
    Processing {
        stage: ProcessingStage,
        message: String,
    },
}

impl PixelOpsError {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new not-found error for an input path
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::NotFound(path.as_ref().to_path_buf())
    }

    /// Create a decode error for an input path
    pub fn decode<P: AsRef<Path>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Decode {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an encode error for an output path
    pub fn encode<P: AsRef<Path>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Encode {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a processing error for a given stage
    pub fn processing<S: Into<String>>(stage: ProcessingStage, message: S) -> Self {
        Self::Processing {
            stage,
            message: message.into(),
        }
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<Path>>(operation: &str, path: P, error: &std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            error.kind(),
            format!(
                "Failed to {} '{}': {}",
                operation,
                path.as_ref().display(),
                error
            ),
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
        recommended: Option<T>,
    ) -> Self {
        let recommendation = match recommended {
            Some(rec) => format!(" Recommended: {}", rec),
            None => String::new(),
        };

        Self::InvalidArgument(format!(
            "Invalid {}: {} (valid range: {}).{}",
            parameter, value, valid_range, recommendation
        ))
    }

    /// The processing stage this error belongs to
    #[must_use]
    pub fn stage(&self) -> ProcessingStage {
        match self {
            Self::NotFound(_) | Self::Decode { .. } | Self::Io(_) => {
                ProcessingStage::ImageLoading
            },
            Self::Encode { .. } => ProcessingStage::FileSaving,
            Self::InvalidArgument(_) => ProcessingStage::Initialization,
            Self::Processing { stage, .. } => *stage,
        }
    }

    /// Whether this error means the input file was missing
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
