use crate::consts::{ARROW_MIN_HEAD_LENGTH, LINE_MIN_PADDING};
use crate::element::Connector;
use crate::geometry::{BoundingBox, Point};
use crate::metrics::TextMetrics;

use super::{ElementHandler, linear};

/// Arrows: lines whose box is widened to cover the arrowhead.
pub struct ArrowHandler;

impl ArrowHandler {
    /// Length of the drawn arrowhead for a given stroke width.
    #[must_use]
    pub fn head_length(line_width: f64) -> f64 {
        (line_width * 5.0).max(ARROW_MIN_HEAD_LENGTH)
    }
}

impl ElementHandler for ArrowHandler {
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
        let extra = (Self::head_length(data.line_width) * 0.8 - LINE_MIN_PADDING).max(0.0);
        Some(linear::bounding_box(data, extra))
    }
}
