//! Runs an OCR engine and merges its word boxes into text blocks.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::core::config::OcrBlocksConfig;
use crate::merge::BoxClusterer;
use crate::ocr::engine::OcrEngine;
use crate::types::{BatchItemResult, MergedBox, OcrResult};
use crate::{OcrBlocksError, Result};

/// Drives one [`OcrEngine`] and post-processes its output.
///
/// # Example
///
/// ```rust
/// use ocrblocks::core::{OcrBlocksConfig, OcrProcessor};
/// use ocrblocks::ocr::TsvEngine;
///
/// # fn main() -> ocrblocks::Result<()> {
/// let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
///            5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t96\tfoo\n\
///            5\t1\t1\t1\t1\t2\t15\t0\t10\t10\t96\tbar\n";
///
/// let processor = OcrProcessor::new(TsvEngine::default(), OcrBlocksConfig::default());
/// let result = processor.process_image(tsv.as_bytes())?;
///
/// assert_eq!(result.text, "foo bar\n");
/// assert_eq!(result.boxes.len(), 1);
/// assert_eq!(result.boxes[0].width, 25);
/// # Ok(())
/// # }
/// ```
pub struct OcrProcessor<E> {
    engine: E,
    config: OcrBlocksConfig,
    clusterer: BoxClusterer,
}

impl<E: OcrEngine> OcrProcessor<E> {
    pub fn new(engine: E, config: OcrBlocksConfig) -> Self {
        let clusterer = BoxClusterer::new(config.merge.clone());
        Self {
            engine,
            config,
            clusterer,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &OcrBlocksConfig {
        &self.config
    }

    /// Recognize one image and merge its word boxes.
    ///
    /// The full text comes straight from the engine and is never rebuilt from the
    /// merged boxes.
    ///
    /// # Errors
    ///
    /// - `OcrBlocksError::Validation` - empty input
    /// - any error reported by the engine, unchanged
    pub fn process_image(&self, image_bytes: &[u8]) -> Result<OcrResult> {
        if image_bytes.is_empty() {
            return Err(OcrBlocksError::validation("Empty image data"));
        }

        let recognition = self.engine.recognize(image_bytes)?;
        tracing::debug!(
            engine = self.engine.name(),
            words = recognition.words.len(),
            "recognized image"
        );

        let boxes = if self.config.merge.enabled {
            self.clusterer.cluster(recognition.words)
        } else {
            recognition.words.into_iter().map(MergedBox::from).collect()
        };

        Ok(OcrResult {
            text: recognition.text,
            boxes,
        })
    }

    /// Process several named inputs in parallel.
    ///
    /// Results come back in input order. A failing item does not stop the
    /// others; its error message is recorded in the item instead.
    pub fn process_batch(&self, inputs: &[(String, Vec<u8>)]) -> Vec<BatchItemResult> {
        inputs
            .par_iter()
            .map(|(source, bytes)| batch_item(source.clone(), self.process_image(bytes)))
            .collect()
    }

    /// Read and process several files in parallel.
    ///
    /// Each file is read on the worker that processes it, so a missing or
    /// unreadable file becomes a failed item (`IO error: ...`) like any other
    /// per-item failure. Results come back in input order.
    pub fn process_files_batch(&self, paths: &[PathBuf]) -> Vec<BatchItemResult> {
        paths
            .par_iter()
            .map(|path| {
                let result = std::fs::read(path)
                    .map_err(OcrBlocksError::from)
                    .and_then(|bytes| self.process_image(&bytes));
                batch_item(path.display().to_string(), result)
            })
            .collect()
    }
}

fn batch_item(source: String, result: Result<OcrResult>) -> BatchItemResult {
    match result {
        Ok(result) => BatchItemResult {
            source,
            success: true,
            result: Some(result),
            error: None,
        },
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "batch item failed");
            BatchItemResult {
                source,
                success: false,
                result: None,
                error: Some(e.to_string()),
            }
        }
    }
}
