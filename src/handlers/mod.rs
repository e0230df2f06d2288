//! Element handlers: one implementation of the move / scale / rotate /
//! bounding-box contract per element kind.
//!
//! Every consumer (hit testing, selection boxes, transforms, connections)
//! goes through the free functions at the bottom of this module, which pick
//! the handler by the element's tag. Nothing outside this module matches on
//! element kinds to do geometry.


mod arrow;
mod line;
mod linear;
mod path;
mod shape;
mod text;

pub use arrow::ArrowHandler;
pub use line::LineHandler;
pub use path::PathHandler;
pub use shape::ShapeHandler;
pub use text::TextHandler;

use crate::element::{CanvasElement, ElementData};
use crate::geometry::{BoundingBox, Point};
use crate::metrics::TextMetrics;

/// Geometry operations for one element payload type.
///
/// Handlers do no input validation: callers clamp scale factors and skip
/// degenerate boxes before calling in.
pub trait ElementHandler {
    type Data;

    /// Translate every positional field by `(dx, dy)`.
    fn translate(data: &mut Self::Data, dx: f64, dy: f64);

    /// Scale positions about `center`; size-like fields follow the kind's rules.
    fn scale(data: &mut Self::Data, scale_x: f64, scale_y: f64, center: Point);

    /// Rotate positions by `angle` radians about `pivot`.
    fn rotate(data: &mut Self::Data, angle: f64, pivot: Point);

    /// The element's footprint, or `None` when it has no geometry.
    fn bounding_box(data: &Self::Data, metrics: &dyn TextMetrics) -> Option<BoundingBox>;
}

/// Translate an element by `(dx, dy)`.
pub fn move_element(el: &mut CanvasElement, dx: f64, dy: f64) {
    match &mut el.data {
        ElementData::Text(d) => TextHandler::translate(d, dx, dy),
        ElementData::Path(d) => PathHandler::translate(d, dx, dy),
        ElementData::Shape(d) => ShapeHandler::translate(d, dx, dy),
        ElementData::Line(d) => LineHandler::translate(d, dx, dy),
        ElementData::Arrow(d) => ArrowHandler::translate(d, dx, dy),
    }
}

/// Scale an element about `center`.
pub fn scale_element(el: &mut CanvasElement, scale_x: f64, scale_y: f64, center: Point) {
    match &mut el.data {
        ElementData::Text(d) => TextHandler::scale(d, scale_x, scale_y, center),
        ElementData::Path(d) => PathHandler::scale(d, scale_x, scale_y, center),
        ElementData::Shape(d) => ShapeHandler::scale(d, scale_x, scale_y, center),
        ElementData::Line(d) => LineHandler::scale(d, scale_x, scale_y, center),
        ElementData::Arrow(d) => ArrowHandler::scale(d, scale_x, scale_y, center),
    }
}

/// Rotate an element by `angle` radians about `pivot`.
pub fn rotate_element(el: &mut CanvasElement, angle: f64, pivot: Point) {
    match &mut el.data {
        ElementData::Text(d) => TextHandler::rotate(d, angle, pivot),
        ElementData::Path(d) => PathHandler::rotate(d, angle, pivot),
        ElementData::Shape(d) => ShapeHandler::rotate(d, angle, pivot),
        ElementData::Line(d) => LineHandler::rotate(d, angle, pivot),
        ElementData::Arrow(d) => ArrowHandler::rotate(d, angle, pivot),
    }
}

/// Current bounding box of an element, recomputed from its geometry.
#[must_use]
pub fn bounding_box(el: &CanvasElement, metrics: &dyn TextMetrics) -> Option<BoundingBox> {
    match &el.data {
        ElementData::Text(d) => TextHandler::bounding_box(d, metrics),
        ElementData::Path(d) => PathHandler::bounding_box(d, metrics),
        ElementData::Shape(d) => ShapeHandler::bounding_box(d, metrics),
        ElementData::Line(d) => LineHandler::bounding_box(d, metrics),
        ElementData::Arrow(d) => ArrowHandler::bounding_box(d, metrics),
    }
}
