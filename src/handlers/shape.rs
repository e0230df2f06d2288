use crate::consts::MIN_SHAPE_SIZE;
use crate::element::Shape;
use crate::geometry::{BoundingBox, Point};
use crate::metrics::TextMetrics;

use super::ElementHandler;

/// Shapes: a rectangle that rotates about its own center.
pub struct ShapeHandler;

impl ElementHandler for ShapeHandler {
    type Data = Shape;

    fn translate(data: &mut Shape, dx: f64, dy: f64) {
        data.x += dx;
        data.y += dy;
    }

    /// The center follows the scale; width and height scale independently.
    fn scale(data: &mut Shape, scale_x: f64, scale_y: f64, center: Point) {
        let new_center = data.center().scale_about(center, scale_x, scale_y);
        data.width = (data.width * scale_x).max(MIN_SHAPE_SIZE);
        data.height = (data.height * scale_y).max(MIN_SHAPE_SIZE);
        data.x = new_center.x - data.width / 2.0;
        data.y = new_center.y - data.height / 2.0;
    }

    fn rotate(data: &mut Shape, angle: f64, pivot: Point) {
        let new_center = data.center().rotate_about(pivot, angle);
        data.x = new_center.x - data.width / 2.0;
        data.y = new_center.y - data.height / 2.0;
        data.rotation += angle;
    }

    /// The exact rectangle, carrying the shape's own rotation.
    fn bounding_box(data: &Shape, _metrics: &dyn TextMetrics) -> Option<BoundingBox> {
        Some(BoundingBox::rotated(data.x, data.y, data.width, data.height, data.rotation))
    }
}
