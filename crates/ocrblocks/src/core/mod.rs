//! Core orchestration: configuration and the OCR processing pipeline.

pub mod config;
pub mod processor;

pub use config::{MergeConfig, OcrBlocksConfig, TsvConfig};
pub use processor::OcrProcessor;
