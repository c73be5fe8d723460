use crate::types::WordBox;

/// Row-major reading order with a tolerance for vertical jitter.
///
/// Boxes whose `y` differ by less than `row_tolerance` are on the same row and
/// compare by `x`; otherwise they compare by `y`.
pub fn scan_order_less(a: &WordBox, b: &WordBox, row_tolerance: u32) -> bool {
    if (a.top() - b.top()).abs() < i64::from(row_tolerance) {
        a.left() < b.left()
    } else {
        a.top() < b.top()
    }
}

/// Sort boxes into canonical scan order.
///
/// The row comparator is not transitive (three boxes 6px apart vertically can
/// form a cycle), so `slice::sort_by` cannot be used: it may panic on an
/// inconsistent ordering. A stable merge sort only ever asks "is b before a?"
/// and always terminates with a deterministic permutation.
pub fn sort_scan_order(boxes: Vec<WordBox>, row_tolerance: u32) -> Vec<WordBox> {
    merge_sort(boxes, &|a: &WordBox, b: &WordBox| scan_order_less(a, b, row_tolerance))
}

fn merge_sort<T, F>(mut items: Vec<T>, less: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, less);
    let right = merge_sort(right, less);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Equal elements keep their input order.
        let next = if less(r, l) { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);

    merged
}
