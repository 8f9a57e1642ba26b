//! Error types for desktop control operations

use thiserror::Error;

/// Result type for desktop control operations
pub type Result<T> = std::result::Result<T, ComputerError>;

/// Error type for desktop control operations
#[derive(Debug, Error)]
pub enum ComputerError {
    /// A required argument was missing for the chosen action
    #[error("{field} is required for {action}")]
    MissingArgument {
        field: &'static str,
        action: String,
    },

    /// The action name is not part of the fixed action set
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A coordinate fell outside the device resolution
    #[error("coordinates ({0}, {1}) are out of bounds")]
    OutOfBounds(i32, i32),

    /// Screen capture produced no usable image
    #[error("screen capture failed: {0}")]
    Capture(String),

    /// An input-injection primitive failed
    #[error("input injection failed: {0}")]
    Input(String),

    /// An error occurred while processing an image
    #[error("image processing failed: {0}")]
    Image(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for ComputerError {
    fn from(e: image::ImageError) -> Self {
        ComputerError::Image(e.to_string())
    }
}

impl From<png::DecodingError> for ComputerError {
    fn from(e: png::DecodingError) -> Self {
        ComputerError::Image(e.to_string())
    }
}

impl From<png::EncodingError> for ComputerError {
    fn from(e: png::EncodingError) -> Self {
        ComputerError::Image(e.to_string())
    }
}

impl From<xcap::XCapError> for ComputerError {
    fn from(e: xcap::XCapError) -> Self {
        ComputerError::Capture(e.to_string())
    }
}
