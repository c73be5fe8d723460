//! Tesseract TSV word output.
//!
//! `tesseract image.png out tsv` writes one row per page, block, paragraph, line
//! and word:
//!
//! ```text
//! level page_num block_num par_num line_num word_num left top width height conf text
//! ```
//!
//! Only word rows (level 5) carry text. They are turned into [`WordBox`]es and
//! the engine's full text is rebuilt from the same rows.

use crate::core::config::TsvConfig;
use crate::ocr::engine::OcrEngine;
use crate::types::{Recognition, WordBox};
use crate::{OcrBlocksError, Result};

/// TSV level of a word row.
pub const TSV_WORD_LEVEL: u32 = 5;

/// Number of columns in a complete TSV row.
pub const TSV_MIN_FIELDS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineKey {
    page: u32,
    block: u32,
    paragraph: u32,
    line: u32,
}

impl LineKey {
    fn same_paragraph(&self, other: &LineKey) -> bool {
        self.page == other.page && self.block == other.block && self.paragraph == other.paragraph
    }
}

struct TsvWord {
    key: LineKey,
    word: WordBox,
}

fn check_confidence(min_confidence: f64) -> Result<()> {
    if min_confidence.is_finite() {
        Ok(())
    } else {
        Err(OcrBlocksError::validation(format!(
            "min_confidence must be a finite number, got {}",
            min_confidence
        )))
    }
}

fn parse_words(tsv_data: &str, min_confidence: f64) -> Result<Vec<TsvWord>> {
    check_confidence(min_confidence)?;

    let mut words = Vec::new();

    for (line_num, line) in tsv_data.lines().enumerate() {
        if line_num == 0 {
            continue;
        }

        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < TSV_MIN_FIELDS {
            continue;
        }

        let level = fields[0].trim().parse::<u32>().unwrap_or(0);
        if level != TSV_WORD_LEVEL {
            continue;
        }

        let conf = fields[10].trim().parse::<f64>().unwrap_or(-1.0);
        if conf < min_confidence {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let (Ok(x), Ok(y), Ok(width), Ok(height)) = (
            fields[6].trim().parse::<i32>(),
            fields[7].trim().parse::<i32>(),
            fields[8].trim().parse::<i64>(),
            fields[9].trim().parse::<i64>(),
        ) else {
            tracing::warn!(
                row = line_num + 1,
                left = fields[6],
                top = fields[7],
                width = fields[8],
                height = fields[9],
                text,
                "skipping TSV word with unparseable geometry"
            );
            continue;
        };
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            tracing::warn!(row = line_num + 1, width, height, text, "skipping TSV word with negative size");
            continue;
        };

        let field = |i: usize| fields[i].trim().parse::<u32>().unwrap_or(0);
        let key = LineKey {
            page: field(1),
            block: field(2),
            paragraph: field(3),
            line: field(4),
        };

        words.push(TsvWord {
            key,
            word: WordBox {
                text: text.to_string(),
                x,
                y,
                width,
                height,
            },
        });
    }

    Ok(words)
}

fn join_text(words: &[TsvWord]) -> String {
    let mut text = String::new();
    let mut previous: Option<LineKey> = None;

    for entry in words {
        match previous {
            Some(prev) if prev == entry.key => text.push(' '),
            Some(prev) if prev.same_paragraph(&entry.key) => text.push('\n'),
            Some(_) => text.push_str("\n\n"),
            None => {}
        }
        text.push_str(&entry.word.text);
        previous = Some(entry.key);
    }

    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// Extract word boxes from Tesseract TSV output.
///
/// The header row, blank rows, truncated rows, non-word levels, words below
/// `min_confidence` and words with blank text are skipped. Rows whose geometry
/// does not parse, or that report a negative width or height, are skipped with
/// a warning.
pub fn extract_words_from_tsv(tsv_data: &str, min_confidence: f64) -> Result<Vec<WordBox>> {
    Ok(parse_words(tsv_data, min_confidence)?
        .into_iter()
        .map(|entry| entry.word)
        .collect())
}

/// Rebuild the plain text of a Tesseract TSV page.
///
/// Words on a line are separated by one space, lines by a newline, and
/// paragraphs or blocks by a blank line.
pub fn text_from_tsv(tsv_data: &str, min_confidence: f64) -> Result<String> {
    Ok(join_text(&parse_words(tsv_data, min_confidence)?))
}

/// An [`OcrEngine`] that reads Tesseract TSV output instead of pixels.
///
/// Use this when Tesseract has already been run (`tesseract img out tsv`) and
/// only the merging step remains.
#[derive(Debug, Clone, Default)]
pub struct TsvEngine {
    config: TsvConfig,
}

impl TsvEngine {
    pub fn new(config: TsvConfig) -> Self {
        Self { config }
    }
}

impl OcrEngine for TsvEngine {
    fn name(&self) -> &str {
        "tesseract-tsv"
    }

    fn recognize(&self, image_bytes: &[u8]) -> Result<Recognition> {
        let tsv_data = std::str::from_utf8(image_bytes)?;
        let parsed = parse_words(tsv_data, self.config.min_confidence)?;
        let text = join_text(&parsed);

        Ok(Recognition {
            text,
            words: parsed.into_iter().map(|entry| entry.word).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn tsv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_extract_words_basic() {
        let data = tsv(&[
            "5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tHello",
            "5\t1\t0\t0\t0\t1\t190\t50\t70\t30\t92.3\tWorld",
        ]);

        let words = extract_words_from_tsv(&data, 0.0).unwrap();
        assert_eq!(
            words,
            vec![
                WordBox::new("Hello", 100, 50, 80, 30),
                WordBox::new("World", 190, 50, 70, 30),
            ]
        );
    }

    #[test]
    fn test_extract_words_confidence_filter() {
        let data = tsv(&[
            "5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tHello",
            "5\t1\t0\t0\t0\t1\t190\t50\t70\t30\t50.0\tWorld",
            "5\t1\t0\t0\t0\t2\t270\t50\t60\t30\t92.3\tTest",
        ]);

        let words = extract_words_from_tsv(&data, 90.0).unwrap();
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["Hello", "Test"]);
    }

    #[test]
    fn test_extract_words_level_filter() {
        let data = tsv(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t",
            "3\t1\t1\t1\t0\t0\t100\t50\t80\t30\t-1\tParagraph",
            "5\t1\t1\t1\t1\t1\t100\t50\t80\t30\t95.5\tHello",
            "4\t1\t1\t1\t1\t0\t100\t50\t170\t30\t-1\tLine",
        ]);

        let words = extract_words_from_tsv(&data, 0.0).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Hello");
    }

    #[test]
    fn test_extract_words_blank_text_skipped() {
        let data = tsv(&[
            "5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\t   ",
            "5\t1\t0\t0\t0\t1\t190\t50\t70\t30\t92.3\tWorld",
        ]);

        let words = extract_words_from_tsv(&data, 0.0).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "World");
    }

    #[test]
    fn test_extract_words_malformed_rows() {
        let data = "level\tpage_num\tblock_num\n\
                    5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tHello\n\
                    invalid line\n\
                    5\t1\t0\t0\t0\t1\t190\t50\t70\t30\t92.3\tWorld";

        let words = extract_words_from_tsv(data, 0.0).unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_negative_size_skipped() {
        let data = tsv(&[
            "5\t1\t0\t0\t0\t0\t100\t50\t-80\t30\t95.5\tBroken",
            "5\t1\t0\t0\t0\t1\t190\t50\t70\t-1\t92.3\tAlsoBroken",
            "5\t1\t0\t0\t0\t2\t270\t50\t60\t30\t92.3\tFine",
        ]);

        let words = extract_words_from_tsv(&data, 0.0).unwrap();
        assert_eq!(words, vec![WordBox::new("Fine", 270, 50, 60, 30)]);
    }

    #[test]
    fn test_unparseable_geometry_skipped() {
        let data = tsv(&[
            "5\t1\t0\t0\t0\t0\tabc\t50\t80\t30\t95.5\tGarbledLeft",
            "5\t1\t0\t0\t0\t1\t100\t99999999999\t80\t30\t95.5\tHugeTop",
            "5\t1\t0\t0\t0\t2\t100\t50\t\t30\t95.5\tNoWidth",
            "5\t1\t0\t0\t0\t3\t100\t50\t80\t3.5\t95.5\tFractionalHeight",
            "5\t1\t0\t0\t0\t4\t270\t50\t60\t30\t92.3\tFine",
        ]);

        let words = extract_words_from_tsv(&data, 0.0).unwrap();
        assert_eq!(words, vec![WordBox::new("Fine", 270, 50, 60, 30)]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let data = tsv(&["5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tHello\r"]).replace('\n', "\r\n");
        let words = extract_words_from_tsv(&data, 0.0).unwrap();
        assert_eq!(words, vec![WordBox::new("Hello", 100, 50, 80, 30)]);
    }

    #[test]
    fn test_non_finite_confidence_rejected() {
        let err = extract_words_from_tsv(HEADER, f64::NAN).unwrap_err();
        assert!(matches!(err, OcrBlocksError::Validation { .. }));
    }

    #[test]
    fn test_text_from_tsv_lines_and_paragraphs() {
        let data = tsv(&[
            "5\t1\t1\t1\t1\t1\t10\t10\t40\t12\t96\tThe",
            "5\t1\t1\t1\t1\t2\t55\t10\t40\t12\t96\tquick",
            "5\t1\t1\t1\t2\t1\t10\t30\t40\t12\t96\tbrown",
            "5\t1\t1\t2\t1\t1\t10\t70\t40\t12\t96\tfox",
            "5\t1\t2\t1\t1\t1\t10\t120\t40\t12\t96\tjumps",
        ]);

        let text = text_from_tsv(&data, 0.0).unwrap();
        assert_eq!(text, "The quick\nbrown\n\nfox\n\njumps\n");
    }

    #[test]
    fn test_text_from_empty_tsv() {
        assert_eq!(text_from_tsv(HEADER, 0.0).unwrap(), "");
        assert_eq!(text_from_tsv("", 0.0).unwrap(), "");
    }

    #[test]
    fn test_engine_recognize() {
        let data = tsv(&[
            "5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t90\tfoo",
            "5\t1\t1\t1\t1\t2\t15\t0\t10\t10\t40\tbar",
        ]);
        let engine = TsvEngine::new(TsvConfig { min_confidence: 50.0 });

        let recognition = engine.recognize(data.as_bytes()).unwrap();
        assert_eq!(recognition.text, "foo\n");
        assert_eq!(recognition.words, vec![WordBox::new("foo", 0, 0, 10, 10)]);
        assert_eq!(engine.name(), "tesseract-tsv");
    }

    #[test]
    fn test_engine_rejects_non_utf8() {
        let engine = TsvEngine::default();
        let err = engine.recognize(&[0x89, 0x50, 0x4e, 0x47, 0xff]).unwrap_err();
        assert!(matches!(err, OcrBlocksError::Parsing { .. }));
    }
}
