use crate::element::Connector;
use crate::geometry::{BoundingBox, Point};
use crate::metrics::TextMetrics;

use super::{ElementHandler, linear};

/// Plain lines.
pub struct LineHandler;

impl ElementHandler for LineHandler {
    type Data = Connector;

    fn translate(data: &mut Connector, dx: f64, dy: f64) {
        linear::translate(data, dx, dy);
    }

    fn scale(data: &mut Connector, scale_x: f64, scale_y: f64, center: Point) {
        linear::scale(data, scale_x, scale_y, center);
    }

    fn rotate(data: &mut Connector, angle: f64, pivot: Point) {
        linear::rotate(data, angle, pivot);
    }

    fn bounding_box(data: &Connector, _metrics: &dyn TextMetrics) -> Option<BoundingBox> {
        Some(linear::bounding_box(data, 0.0))
    }
}
