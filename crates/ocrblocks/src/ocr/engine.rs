//! OCR engine trait.
//!
//! The engine that turns pixels into words lives outside this crate. Anything
//! that can report a full-text string and word-level rectangles for one image
//! can be plugged into [`OcrProcessor`](crate::core::processor::OcrProcessor).

use crate::Result;
use crate::types::Recognition;

/// An OCR engine that recognizes words in a single image.
///
/// Engines must be thread-safe (`Send + Sync`) so batches can run in parallel.
///
/// # Example
///
/// ```rust
/// use ocrblocks::ocr::OcrEngine;
/// use ocrblocks::{Recognition, Result, WordBox};
///
/// struct FixedEngine;
///
/// impl OcrEngine for FixedEngine {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn recognize(&self, _image_bytes: &[u8]) -> Result<Recognition> {
///         Ok(Recognition {
///             text: "Hello World\n".to_string(),
///             words: vec![
///                 WordBox::from_edges("Hello", 0, 0, 50, 12)?,
///                 WordBox::from_edges("World", 58, 0, 110, 12)?,
///             ],
///         })
///     }
/// }
/// ```
pub trait OcrEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Recognize the words in one image.
    ///
    /// # Errors
    ///
    /// - `OcrBlocksError::Ocr` - the engine failed to process the image
    /// - `OcrBlocksError::Parsing` - the image (or engine output) is malformed
    /// - `OcrBlocksError::Io` - I/O errors (these always bubble up)
    fn recognize(&self, image_bytes: &[u8]) -> Result<Recognition>;
}

impl<T: OcrEngine + ?Sized> OcrEngine for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image_bytes: &[u8]) -> Result<Recognition> {
        (**self).recognize(image_bytes)
    }
}
