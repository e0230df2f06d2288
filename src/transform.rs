//! Selection-level transforms.
//!
//! Each operation applies one handler primitive to every selected element
//! with a shared delta/pivot, then re-derives the connector endpoints
//! attached to those elements. Geometry is mutated first and connections
//! are updated afterwards, so a frame never sees half-applied connectors.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::connect::update_connected_arrows;
use crate::doc::Document;
use crate::element::{Connector, ElementId};
use crate::geometry::{BoundingBox, Point, control_for_midpoint};
use crate::handlers::{move_element, rotate_element, scale_element};
use crate::hit::{Handle, LineHandle};
use crate::metrics::TextMetrics;

/// Scale factors and pivot for one incremental resize step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStep {
    pub scale_x: f64,
    pub scale_y: f64,
    pub pivot: Point,
}

/// Scale factors for dragging `handle` of `bbox` by `(dx, dy)`.
///
/// Corner handles scale both axes about the opposite corner; edge handles
/// scale one axis about the opposite edge. Factors are clamped to at least
/// `min_factor`; an axis with zero extent keeps factor 1. Returns `None`
/// for the rotate handle.
#[must_use]
pub fn resize_step(handle: Handle, bbox: &BoundingBox, dx: f64, dy: f64, min_factor: f64) -> Option<ResizeStep> {
    let (x0, y0) = (bbox.x, bbox.y);
    let (x1, y1) = (bbox.x + bbox.width, bbox.y + bbox.height);
    let c = bbox.center();

    let grow_x = |delta: f64| if bbox.width == 0.0 { 1.0 } else { (bbox.width + delta) / bbox.width };
    let grow_y = |delta: f64| if bbox.height == 0.0 { 1.0 } else { (bbox.height + delta) / bbox.height };

    let (scale_x, scale_y, pivot) = match handle {
        Handle::Se => (grow_x(dx), grow_y(dy), Point::new(x0, y0)),
        Handle::Nw => (grow_x(-dx), grow_y(-dy), Point::new(x1, y1)),
        Handle::Ne => (grow_x(dx), grow_y(-dy), Point::new(x0, y1)),
        Handle::Sw => (grow_x(-dx), grow_y(dy), Point::new(x1, y0)),
        Handle::N => (1.0, grow_y(-dy), Point::new(c.x, y1)),
        Handle::S => (1.0, grow_y(dy), Point::new(c.x, y0)),
        Handle::W => (grow_x(-dx), 1.0, Point::new(x1, c.y)),
        Handle::E => (grow_x(dx), 1.0, Point::new(x0, c.y)),
        Handle::Rotate => return None,
    };

    Some(ResizeStep { scale_x: scale_x.max(min_factor), scale_y: scale_y.max(min_factor), pivot })
}

/// Angle of `point` around `center`, in radians.
#[must_use]
pub fn pointer_angle(center: Point, point: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x)
}

fn selected_ids(doc: &Document) -> Vec<ElementId> {
    doc.selected().map(|el| el.id.clone()).collect()
}

fn sync_connections(doc: &mut Document, ids: &[ElementId], metrics: &dyn TextMetrics) {
    for id in ids {
        update_connected_arrows(id, doc.elements_mut(), metrics);
    }
}

/// Translate every selected element by `(dx, dy)`.
pub fn move_selection(doc: &mut Document, dx: f64, dy: f64, metrics: &dyn TextMetrics) {
    let ids = selected_ids(doc);
    for id in &ids {
        if let Some(el) = doc.get_mut(id) {
            move_element(el, dx, dy);
        }
    }
    sync_connections(doc, &ids, metrics);
}

/// Scale every selected element about the step's shared pivot.
pub fn scale_selection(doc: &mut Document, step: ResizeStep, metrics: &dyn TextMetrics) {
    let ids = selected_ids(doc);
    for id in &ids {
        if let Some(el) = doc.get_mut(id) {
            scale_element(el, step.scale_x, step.scale_y, step.pivot);
        }
    }
    sync_connections(doc, &ids, metrics);
}

/// Rotate every selected element by `delta` radians about `pivot` and
/// accumulate the delta into the selection rotation.
pub fn rotate_selection(doc: &mut Document, delta: f64, pivot: Point, metrics: &dyn TextMetrics) {
    let ids = selected_ids(doc);
    for id in &ids {
        if let Some(el) = doc.get_mut(id) {
            rotate_element(el, delta, pivot);
        }
    }
    let rotation = doc.selection_rotation() + delta;
    doc.set_selection_rotation(rotation);
    sync_connections(doc, &ids, metrics);
}

/// Drag a line handle to `point`: endpoints follow the pointer directly,
/// the mid handle back-solves the control point so the curve passes
/// through `point` at `t = 0.5`.
pub fn drag_line_handle(connector: &mut Connector, handle: LineHandle, point: Point) {
    match handle.end() {
        Some(end) => connector.set_endpoint(end, point),
        None => connector.set_control(control_for_midpoint(connector.start(), connector.end(), point)),
    }
}
