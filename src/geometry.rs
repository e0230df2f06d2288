//! Geometric primitives: points, axis-aligned and oriented boxes, and the
//! handful of vector operations the rest of the crate is built on.
//!
//! All coordinates are in canvas space (unscaled, unpanned). Angles are in
//! radians; positive angles rotate from +x towards +y.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in canvas (or screen) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Rotate this point by `angle` radians about `pivot`.
    #[must_use]
    pub fn rotate_about(self, pivot: Point, angle: f64) -> Point {
        if angle == 0.0 {
            return self;
        }
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point { x: pivot.x + dx * cos - dy * sin, y: pivot.y + dx * sin + dy * cos }
    }

    /// Scale this point's offset from `center` by `(sx, sy)`.
    #[must_use]
    pub fn scale_about(self, center: Point, sx: f64, sy: f64) -> Point {
        Point { x: center.x + (self.x - center.x) * sx, y: center.y + (self.y - center.y) * sy }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }
}

/// Closest point to `p` on the segment `a`–`b`, with the projection clamped to the segment.
///
/// A zero-length segment yields `a`.
#[must_use]
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    Point { x: a.x + t * dx, y: a.y + t * dy }
}

/// Point on the quadratic Bézier `start`–`control`–`end` at parameter `t`.
#[must_use]
pub fn quadratic_point(start: Point, control: Point, end: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point {
        x: mt * mt * start.x + 2.0 * mt * t * control.x + t * t * end.x,
        y: mt * mt * start.y + 2.0 * mt * t * control.y + t * t * end.y,
    }
}

/// Control point that makes the quadratic Bézier pass through `on_curve` at `t = 0.5`.
#[must_use]
pub fn control_for_midpoint(start: Point, end: Point, on_curve: Point) -> Point {
    Point {
        x: 2.0 * on_curve.x - 0.5 * start.x - 0.5 * end.x,
        y: 2.0 * on_curve.y - 0.5 * start.y - 0.5 * end.y,
    }
}

/// A rectangle, optionally rotated about its own center.
///
/// `rotation == 0.0` means axis-aligned (AABB); anything else is an oriented
/// box (OBB) whose unrotated extent is `x, y, width, height`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl BoundingBox {
    /// Axis-aligned box.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height, rotation: 0.0 }
    }

    /// Oriented box rotated by `rotation` radians about its center.
    #[must_use]
    pub fn rotated(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self { x, y, width, height, rotation }
    }

    /// Smallest AABB containing every point, or `None` for an empty iterator.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Normalized box spanning two arbitrary corners (used for marquees).
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
    }

    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }

    /// A box with zero width or height cannot carry anchors.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.x + self.width / 2.0, y: self.y + self.height / 2.0 }
    }

    /// The four corners in world space (nw, ne, se, sw), rotation applied.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let center = self.center();
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
        .map(|p| p.rotate_about(center, self.rotation))
    }

    /// Map a world point into this box's unrotated frame.
    #[must_use]
    pub fn to_local(&self, p: Point) -> Point {
        p.rotate_about(self.center(), -self.rotation)
    }

    /// Map a point from this box's unrotated frame back to world space.
    #[must_use]
    pub fn to_world(&self, p: Point) -> Point {
        p.rotate_about(self.center(), self.rotation)
    }

    /// Whether a point already in the local frame lies inside the unrotated
    /// extent grown by `padding` on every side.
    #[must_use]
    pub fn contains_local(&self, p: Point, padding: f64) -> bool {
        p.x >= self.x - padding
            && p.x <= self.x + self.width + padding
            && p.y >= self.y - padding
            && p.y <= self.y + self.height + padding
    }

    /// Whether a world point lies inside the (possibly rotated) box grown by `padding`.
    #[must_use]
    pub fn contains(&self, p: Point, padding: f64) -> bool {
        self.contains_local(self.to_local(p), padding)
    }

    /// Grow by `padding` on every side, keeping the center and rotation.
    #[must_use]
    pub fn inflate(&self, padding: f64) -> Self {
        Self {
            x: self.x - padding,
            y: self.y - padding,
            width: self.width + padding * 2.0,
            height: self.height + padding * 2.0,
            rotation: self.rotation,
        }
    }
}
