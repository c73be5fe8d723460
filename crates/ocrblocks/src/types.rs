//! Box and result types shared by the clusterer, the engine seam and the CLI.

use serde::{Deserialize, Serialize};

use crate::{OcrBlocksError, Result};

/// A single recognized word and its pixel rectangle.
///
/// `x`/`y` are the top-left corner. Width and height are unsigned, so a box
/// with a negative extent cannot be constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordBox {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WordBox {
    pub fn new(text: impl Into<String>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from an engine rectangle given as left/top/right/bottom edges.
    ///
    /// # Errors
    ///
    /// Returns `OcrBlocksError::Validation` when `right < left` or `bottom < top`,
    /// or when the extent does not fit in a `u32`.
    pub fn from_edges(text: impl Into<String>, left: i32, top: i32, right: i32, bottom: i32) -> Result<Self> {
        let text = text.into();
        let width = u32::try_from(i64::from(right) - i64::from(left)).map_err(|_| {
            OcrBlocksError::validation(format!(
                "Box '{}' has right edge {} left of its left edge {}",
                text, right, left
            ))
        })?;
        let height = u32::try_from(i64::from(bottom) - i64::from(top)).map_err(|_| {
            OcrBlocksError::validation(format!(
                "Box '{}' has bottom edge {} above its top edge {}",
                text, bottom, top
            ))
        })?;

        Ok(Self {
            text,
            x: left,
            y: top,
            width,
            height,
        })
    }

    pub fn left(&self) -> i64 {
        i64::from(self.x)
    }

    pub fn top(&self) -> i64 {
        i64::from(self.y)
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

/// The union of one or more word boxes that ended up in the same cluster.
///
/// Same shape as [`WordBox`]: `text` is the members' text joined by single
/// spaces and the rectangle tightly encloses every member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergedBox {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MergedBox {
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

impl From<WordBox> for MergedBox {
    fn from(word: WordBox) -> Self {
        Self {
            text: word.text,
            x: word.x,
            y: word.y,
            width: word.width,
            height: word.height,
        }
    }
}

impl From<MergedBox> for WordBox {
    fn from(merged: MergedBox) -> Self {
        Self {
            text: merged.text,
            x: merged.x,
            y: merged.y,
            width: merged.width,
            height: merged.height,
        }
    }
}

/// What an OCR engine hands back for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    /// The engine's own full-text rendering of the image.
    pub text: String,
    /// Word-level boxes, in whatever order the engine reports them.
    pub words: Vec<WordBox>,
}

/// Result of processing one image: full text plus merged text blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub text: String,
    pub boxes: Vec<MergedBox>,
}

/// Outcome of one item in a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub source: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<OcrResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_box_edges() {
        let word = WordBox::new("Hello", 100, 50, 80, 30);
        assert_eq!(word.left(), 100);
        assert_eq!(word.top(), 50);
        assert_eq!(word.right(), 180);
        assert_eq!(word.bottom(), 80);
    }

    #[test]
    fn test_edges_do_not_overflow() {
        let word = WordBox::new("far", i32::MAX, i32::MAX, u32::MAX, u32::MAX);
        assert_eq!(word.right(), i64::from(i32::MAX) + i64::from(u32::MAX));
        assert_eq!(word.bottom(), i64::from(i32::MAX) + i64::from(u32::MAX));
    }

    #[test]
    fn test_from_edges() {
        let word = WordBox::from_edges("World", 190, 50, 260, 80).unwrap();
        assert_eq!(word, WordBox::new("World", 190, 50, 70, 30));
    }

    #[test]
    fn test_from_edges_zero_size() {
        let word = WordBox::from_edges("", 0, 0, 0, 0).unwrap();
        assert_eq!(word.width, 0);
        assert_eq!(word.height, 0);
    }

    #[test]
    fn test_from_edges_rejects_inverted_rect() {
        let err = WordBox::from_edges("bad", 10, 0, 5, 10).unwrap_err();
        assert!(matches!(err, OcrBlocksError::Validation { .. }));
        assert!(err.to_string().contains("bad"));

        let err = WordBox::from_edges("bad", 0, 10, 10, 2).unwrap_err();
        assert!(matches!(err, OcrBlocksError::Validation { .. }));
    }

    #[test]
    fn test_merged_round_trip_is_lossless() {
        let word = WordBox::new("foo bar", -3, 7, 25, 10);
        let merged = MergedBox::from(word.clone());
        assert_eq!(merged.right(), 22);
        assert_eq!(WordBox::from(merged), word);
    }

    #[test]
    fn test_serialized_field_names() {
        let merged = MergedBox::from(WordBox::new("foo", 1, 2, 3, 4));
        let json = serde_json::to_value(&merged).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "foo", "x": 1, "y": 2, "width": 3, "height": 4})
        );
    }

    #[test]
    fn test_batch_item_skips_empty_fields() {
        let item = BatchItemResult {
            source: "page.tsv".to_string(),
            success: false,
            result: None,
            error: Some("boom".to_string()),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("result").is_none());
        assert_eq!(json["error"], "boom");
    }
}
