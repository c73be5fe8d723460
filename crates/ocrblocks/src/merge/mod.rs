//! Spatial merging of OCR word boxes into text blocks.
//!
//! Words are sorted into an approximate reading order, then scanned once while a
//! single "current group" grows. A word joins the group when it is nearby *any*
//! member already in it; otherwise the group is closed and the word starts a new
//! one. Grouping is therefore greedy and order dependent rather than a transitive
//! connected-components pass: a word that only touches a member of an earlier,
//! already closed group starts a group of its own.
//!
//! # Example
//!
//! ```rust
//! use ocrblocks::merge::cluster;
//! use ocrblocks::WordBox;
//!
//! let merged = cluster(vec![
//!     WordBox::new("bar", 15, 0, 10, 10),
//!     WordBox::new("foo", 0, 0, 10, 10),
//! ]);
//!
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].text, "foo bar");
//! assert_eq!((merged[0].x, merged[0].width), (0, 25));
//! ```
pub mod ordering;
pub mod proximity;

pub use ordering::{scan_order_less, sort_scan_order};
pub use proximity::is_nearby;

use crate::core::config::MergeConfig;
use crate::types::{MergedBox, WordBox};

/// Horizontal slack, in pixels, allowed between two boxes of the same block.
pub const HORIZONTAL_GAP: u32 = 20;

/// Vertical slack, in pixels, allowed between two boxes of the same block.
pub const VERTICAL_GAP: u32 = 10;

/// Boxes whose top edges differ by less than this many pixels share a row.
pub const ROW_TOLERANCE: u32 = 10;

/// Groups word boxes into merged blocks using a fixed [`MergeConfig`].
#[derive(Debug, Clone, Default)]
pub struct BoxClusterer {
    config: MergeConfig,
}

impl BoxClusterer {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Partition `boxes` into proximity groups and merge each group.
    ///
    /// Every input box lands in exactly one output box. Empty input yields empty
    /// output and a single box comes back unchanged.
    pub fn cluster(&self, boxes: Vec<WordBox>) -> Vec<MergedBox> {
        let input_len = boxes.len();
        let sorted = sort_scan_order(boxes, self.config.row_tolerance);

        let mut merged = Vec::new();
        let mut current: Vec<WordBox> = Vec::new();

        for word in sorted {
            let joins = current.iter().any(|member| is_nearby(member, &word, &self.config));
            if !joins && !current.is_empty() {
                merged.push(merge_group(std::mem::take(&mut current)));
            }
            current.push(word);
        }

        if !current.is_empty() {
            merged.push(merge_group(current));
        }

        tracing::debug!(words = input_len, blocks = merged.len(), "clustered word boxes");

        merged
    }
}

/// Cluster with the default gaps and row tolerance.
pub fn cluster(boxes: Vec<WordBox>) -> Vec<MergedBox> {
    BoxClusterer::default().cluster(boxes)
}

/// Merge one group into its bounding rectangle and space-joined text.
///
/// A single-member group is returned as is. Members are joined in the order
/// given, and empty texts still contribute an (empty) token.
pub fn merge_group(group: Vec<WordBox>) -> MergedBox {
    let mut members = group.into_iter();
    let Some(first) = members.next() else {
        return MergedBox::default();
    };

    let mut min_x = first.left();
    let mut min_y = first.top();
    let mut max_x = first.right();
    let mut max_y = first.bottom();
    let mut text = first.text;

    for word in members {
        min_x = min_x.min(word.left());
        min_y = min_y.min(word.top());
        max_x = max_x.max(word.right());
        max_y = max_y.max(word.bottom());
        text.push(' ');
        text.push_str(&word.text);
    }

    // Min edges always come from an i32 coordinate. Extents saturate.
    MergedBox {
        text,
        x: min_x as i32,
        y: min_y as i32,
        width: u32::try_from(max_x - min_x).unwrap_or(u32::MAX),
        height: u32::try_from(max_y - min_y).unwrap_or(u32::MAX),
    }
}
