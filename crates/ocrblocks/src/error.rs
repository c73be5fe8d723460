//! Error types for ocrblocks.
//!
//! Every fallible operation in the crate returns [`OcrBlocksError`]. Box
//! clustering itself is total and never produces one; errors come from the
//! collaborators around it (engine output, config files, serialization).
//!
//! **I/O errors bubble up unchanged** through the `Io` variant. Everything else
//! carries a message with enough context (path, row number, config key) to be
//! reported directly to a user.
//!
//! # Example
//!
//! ```rust
//! use ocrblocks::{OcrBlocksError, Result};
//!
//! fn load(path: &str) -> Result<String> {
//!     let content = std::fs::read_to_string(path)?;
//!
//!     if content.is_empty() {
//!         return Err(OcrBlocksError::validation(format!("File is empty: {}", path)));
//!     }
//!
//!     Ok(content)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `OcrBlocksError`.
pub type Result<T> = std::result::Result<T, OcrBlocksError>;

/// Main error type for all ocrblocks operations.
#[derive(Debug, Error)]
pub enum OcrBlocksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for OcrBlocksError {
    fn from(err: serde_json::Error) -> Self {
        OcrBlocksError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<std::str::Utf8Error> for OcrBlocksError {
    fn from(err: std::str::Utf8Error) -> Self {
        OcrBlocksError::Parsing {
            message: format!("Input is not valid UTF-8: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl OcrBlocksError {
    error_constructor!(parsing, Parsing);
    error_constructor!(ocr, Ocr);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);
}
