use crate::core::config::MergeConfig;
use crate::types::WordBox;

/// Whether two boxes are close enough to belong to the same block.
///
/// Both rectangles are treated as inflated by `horizontal_gap` on the x axis and
/// `vertical_gap` on the y axis; the boxes are nearby when the inflated ranges
/// overlap or touch on both axes.
pub fn is_nearby(a: &WordBox, b: &WordBox, config: &MergeConfig) -> bool {
    let h_gap = i64::from(config.horizontal_gap);
    let v_gap = i64::from(config.vertical_gap);

    let horizontally_near = a.left() <= b.right() + h_gap && b.left() <= a.right() + h_gap;
    let vertically_near = a.top() <= b.bottom() + v_gap && b.top() <= a.bottom() + v_gap;

    horizontally_near && vertically_near
}
