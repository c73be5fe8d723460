//! OCR engine seam.
//!
//! - [`OcrEngine`]: the trait an external engine implements
//! - [`TsvEngine`]: reads word rows from Tesseract TSV output
pub mod engine;
pub mod tsv;

pub use engine::OcrEngine;
pub use tsv::{TsvEngine, extract_words_from_tsv, text_from_tsv};
