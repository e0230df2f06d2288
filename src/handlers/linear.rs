//! Geometry shared by lines and arrows.

use crate::consts::LINE_MIN_PADDING;
use crate::element::{Connector, ConnectorEnd};
use crate::geometry::{BoundingBox, Point};

pub(super) fn translate(data: &mut Connector, dx: f64, dy: f64) {
    data.start_x += dx;
    data.start_y += dy;
    data.end_x += dx;
    data.end_y += dy;
    if let Some(cx) = data.control_x.as_mut() {
        *cx += dx;
    }
    if let Some(cy) = data.control_y.as_mut() {
        *cy += dy;
    }
}

pub(super) fn scale(data: &mut Connector, scale_x: f64, scale_y: f64, center: Point) {
    let start = data.start().scale_about(center, scale_x, scale_y);
    let end = data.end().scale_about(center, scale_x, scale_y);
    data.set_endpoint(ConnectorEnd::Start, start);
    data.set_endpoint(ConnectorEnd::End, end);
    if let Some(cx) = data.control_x.as_mut() {
        *cx = center.x + (*cx - center.x) * scale_x;
    }
    if let Some(cy) = data.control_y.as_mut() {
        *cy = center.y + (*cy - center.y) * scale_y;
    }
}

pub(super) fn rotate(data: &mut Connector, angle: f64, pivot: Point) {
    let start = data.start().rotate_about(pivot, angle);
    let end = data.end().rotate_about(pivot, angle);
    data.set_endpoint(ConnectorEnd::Start, start);
    data.set_endpoint(ConnectorEnd::End, end);
    if let Some(control) = data.control() {
        data.set_control(control.rotate_about(pivot, angle));
    }
}

/// Oriented box around a straight segment, or an AABB around start, end and
/// control point when curved. `extra_padding` widens the box for arrowheads.
pub(super) fn bounding_box(data: &Connector, extra_padding: f64) -> BoundingBox {
    let padding = (data.line_width * 2.0).max(LINE_MIN_PADDING) + extra_padding;

    if let Some(control) = data.control() {
        let start = data.start();
        let end = data.end();
        let min_x = start.x.min(end.x).min(control.x) - padding;
        let min_y = start.y.min(end.y).min(control.y) - padding;
        let max_x = start.x.max(end.x).max(control.x) + padding;
        let max_y = start.y.max(end.y).max(control.y) + padding;
        return BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y);
    }

    let dx = data.end_x - data.start_x;
    let dy = data.end_y - data.start_y;
    let length = dx.hypot(dy);
    let angle = dy.atan2(dx);
    let cx = (data.start_x + data.end_x) / 2.0;
    let cy = (data.start_y + data.end_y) / 2.0;

    BoundingBox::rotated(cx - length / 2.0, cy - padding / 2.0, length, padding, angle)
}
