use crate::consts::MIN_PATH_LINE_WIDTH;
use crate::element::DrawPath;
use crate::geometry::{BoundingBox, Point};
use crate::metrics::TextMetrics;

use super::ElementHandler;

/// Freehand paths: every point plus the stored centroid move together.
///
/// `DrawPath::rotation` is never read or written here.
pub struct PathHandler;

impl ElementHandler for PathHandler {
    type Data = DrawPath;

    fn translate(data: &mut DrawPath, dx: f64, dy: f64) {
        for p in &mut data.points {
            *p = p.offset(dx, dy);
        }
        data.center_x += dx;
        data.center_y += dy;
    }

    fn scale(data: &mut DrawPath, scale_x: f64, scale_y: f64, center: Point) {
        data.line_width = (data.line_width * scale_x.max(scale_y)).max(MIN_PATH_LINE_WIDTH);
        for p in &mut data.points {
            *p = p.scale_about(center, scale_x, scale_y);
        }
        let c = Point::new(data.center_x, data.center_y).scale_about(center, scale_x, scale_y);
        data.center_x = c.x;
        data.center_y = c.y;
    }

    fn rotate(data: &mut DrawPath, angle: f64, pivot: Point) {
        for p in &mut data.points {
            *p = p.rotate_about(pivot, angle);
        }
        let c = Point::new(data.center_x, data.center_y).rotate_about(pivot, angle);
        data.center_x = c.x;
        data.center_y = c.y;
    }

    /// Tight AABB over the points; stroke width is not included.
    fn bounding_box(data: &DrawPath, _metrics: &dyn TextMetrics) -> Option<BoundingBox> {
        BoundingBox::enclosing(data.points.iter().copied())
    }
}
