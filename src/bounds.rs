//! Composite boxes: the selection frame and marquee intersection.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::element::CanvasElement;
use crate::geometry::BoundingBox;
use crate::handlers;
use crate::metrics::TextMetrics;

/// AABB enclosing every element's box. Rotated member boxes contribute their
/// four world-space corners, never their unrotated extent.
///
/// Returns `None` when no member has a box.
pub fn selection_bounding_box<'a, I>(elements: I, metrics: &dyn TextMetrics) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a CanvasElement>,
{
    let corners = elements
        .into_iter()
        .filter_map(|el| handlers::bounding_box(el, metrics))
        .flat_map(|b| b.corners());
    BoundingBox::enclosing(corners)
}

/// Whether two boxes overlap.
///
/// Two axis-aligned boxes use an exact overlap test. Otherwise the test
/// samples corners in both directions: true when any corner of one box lies
/// inside the other (in that box's own unrotated frame).
#[must_use]
pub fn boxes_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    if !a.is_rotated() && !b.is_rotated() {
        return !(a.x + a.width < b.x || b.x + b.width < a.x || a.y + a.height < b.y || b.y + b.height < a.y);
    }
    b.corners().iter().any(|&c| a.contains(c, 0.0)) || a.corners().iter().any(|&c| b.contains(c, 0.0))
}
