//! Axis-aligned box tests. Every bound is half-open: a box at `x` with
//! width `w` covers columns `x .. x + w`.

use crate::entities::{Position, Size};

/// Whether `point` lies inside the box at `origin` with `size`.
pub fn is_collision(point: Position, origin: Position, size: Size) -> bool {
    point.x >= origin.x
        && point.x < origin.x + size.width
        && point.y >= origin.y
        && point.y < origin.y + size.height
}

/// Broad overlap test used before eroding cover. Boxes that merely touch
/// on their far edge pass this test but share no cells, so callers must
/// still clip to the covered range.
pub fn rects_overlap(a: Position, a_size: Size, b: Position, b_size: Size) -> bool {
    a.x < b.x + b_size.width
        && a.x + a_size.width >= b.x
        && a.y < b.y + b_size.height
        && a.y + a_size.height >= b.y
}
