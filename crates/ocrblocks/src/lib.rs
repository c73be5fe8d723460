//! ocrblocks - merge OCR word boxes into text blocks
//!
//! OCR engines report text one word at a time, each with its own pixel
//! rectangle. ocrblocks sorts those words into reading order and greedily grows
//! proximity groups, producing one enclosing rectangle and one space-joined
//! string per group: the blocks a UI overlays on the source image.
//!
//! # Quick Start
//!
//! ```rust
//! use ocrblocks::{WordBox, cluster};
//!
//! let blocks = cluster(vec![
//!     WordBox::new("Hello", 0, 0, 50, 12),
//!     WordBox::new("World", 58, 2, 52, 12),
//!     WordBox::new("Footer", 0, 300, 60, 12),
//! ]);
//!
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].text, "Hello World");
//! ```
//!
//! # Architecture
//!
//! - **Merge** (`merge`): reading-order sort, proximity test, greedy grouping
//! - **OCR** (`ocr`): the [`OcrEngine`](ocr::OcrEngine) seam and a Tesseract TSV reader
//! - **Core** (`core`): configuration loading and the [`OcrProcessor`](core::OcrProcessor)
//!   that ties an engine to the merger

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod merge;
pub mod ocr;
pub mod types;

pub use crate::core::config::{MergeConfig, OcrBlocksConfig, TsvConfig};
pub use crate::core::processor::OcrProcessor;
pub use error::{OcrBlocksError, Result};
pub use merge::{BoxClusterer, cluster};
pub use types::{BatchItemResult, MergedBox, OcrResult, Recognition, WordBox};
