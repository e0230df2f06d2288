//! Connections: snapping connector endpoints to shapes and keeping them
//! attached as the shapes move.
//!
//! An attached endpoint stores the target's id plus an [`Anchor`], a position
//! normalized to the target's bounding box. After any transform of the
//! target the endpoint is re-derived from the anchor and the target's current
//! box, so it follows translation, scaling and rotation alike.

#[cfg(test)]
#[path = "connect_test.rs"]
mod connect_test;

use std::collections::HashSet;

use crate::element::{Anchor, CanvasElement, ConnectorEnd, ElementData, ElementId, ShapeType};
use crate::geometry::{BoundingBox, Point, closest_point_on_segment};
use crate::handlers;
use crate::metrics::TextMetrics;

/// Box of `el` if it can carry anchors (present and non-degenerate).
fn anchor_box(el: &CanvasElement, metrics: &dyn TextMetrics) -> Option<BoundingBox> {
    handlers::bounding_box(el, metrics).filter(|b| !b.is_degenerate())
}

/// Closest point of `edges` to `p`.
fn closest_on_edges(p: Point, edges: &[(Point, Point)]) -> Option<Point> {
    edges
        .iter()
        .map(|&(a, b)| closest_point_on_segment(p, a, b))
        .min_by(|a, b| p.distance_sq(*a).total_cmp(&p.distance_sq(*b)))
}

/// Nearest point on the element's visible outline to `point`.
///
/// Circles and ellipses project radially onto the ellipse, diamonds onto
/// their four diagonal edges, everything else onto the box edges. Rotated
/// boxes are handled in their own frame. Returns `None` for elements
/// without a box or with a zero-width/height box.
#[must_use]
pub fn closest_border_point(el: &CanvasElement, point: Point, metrics: &dyn TextMetrics) -> Option<Point> {
    let bbox = anchor_box(el, metrics)?;
    let p = bbox.to_local(point);
    let c = bbox.center();
    let hw = bbox.width / 2.0;
    let hh = bbox.height / 2.0;

    let local = match el.shape_type() {
        Some(ShapeType::Circle | ShapeType::Ellipse) => {
            let mut dx = p.x - c.x;
            let dy = p.y - c.y;
            if dx == 0.0 && dy == 0.0 {
                dx = 1.0;
            }
            let t = 1.0 / ((dx * dx) / (hw * hw) + (dy * dy) / (hh * hh)).sqrt();
            Point::new(c.x + t * dx, c.y + t * dy)
        }
        Some(ShapeType::Diamond) => {
            let top = Point::new(c.x, c.y - hh);
            let right = Point::new(c.x + hw, c.y);
            let bottom = Point::new(c.x, c.y + hh);
            let left = Point::new(c.x - hw, c.y);
            closest_on_edges(p, &[(top, right), (right, bottom), (bottom, left), (left, top)])?
        }
        _ => {
            let tl = Point::new(bbox.x, bbox.y);
            let tr = Point::new(bbox.x + bbox.width, bbox.y);
            let br = Point::new(bbox.x + bbox.width, bbox.y + bbox.height);
            let bl = Point::new(bbox.x, bbox.y + bbox.height);
            closest_on_edges(p, &[(tl, tr), (tr, br), (br, bl), (bl, tl)])?
        }
    };
    Some(bbox.to_world(local))
}

/// Normalized position of `point` within the element's box.
///
/// Returns `None` when the box is missing or degenerate.
#[must_use]
pub fn compute_anchor(el: &CanvasElement, point: Point, metrics: &dyn TextMetrics) -> Option<Anchor> {
    let bbox = anchor_box(el, metrics)?;
    let p = bbox.to_local(point);
    Some(Anchor { x: (p.x - bbox.x) / bbox.width, y: (p.y - bbox.y) / bbox.height })
}

/// World position of `anchor` within the element's current box.
///
/// Returns `None` when the box is missing or degenerate.
#[must_use]
pub fn anchor_to_point(el: &CanvasElement, anchor: Anchor, metrics: &dyn TextMetrics) -> Option<Point> {
    let bbox = anchor_box(el, metrics)?;
    let local = Point::new(bbox.x + anchor.x * bbox.width, bbox.y + anchor.y * bbox.height);
    Some(bbox.to_world(local))
}

/// Distance from `point` to the element's box: zero inside, otherwise the
/// distance to the nearest box point. Box-based for every shape
/// type; it only decides *whether* to snap.
fn distance_to_box(point: Point, bbox: &BoundingBox) -> f64 {
    let p = bbox.to_local(point);
    if bbox.contains_local(p, 0.0) {
        return 0.0;
    }
    let clamped = Point::new(
        p.x.clamp(bbox.x, bbox.x + bbox.width),
        p.y.clamp(bbox.y, bbox.y + bbox.height),
    );
    p.distance(clamped)
}

/// The closest non-connector element within `snap_radius` of `point`,
/// skipping ids in `exclude` and elements whose box is missing or
/// degenerate. Ties keep the earlier element.
pub fn find_snap_target<'a>(
    point: Point,
    elements: &'a [CanvasElement],
    exclude: &HashSet<ElementId>,
    metrics: &dyn TextMetrics,
    snap_radius: f64,
) -> Option<&'a CanvasElement> {
    let mut best: Option<&CanvasElement> = None;
    let mut best_dist = snap_radius;
    for el in elements {
        if el.kind().is_connector() || exclude.contains(&el.id) {
            continue;
        }
        let Some(bbox) = anchor_box(el, metrics) else {
            continue;
        };
        let dist = distance_to_box(point, &bbox);
        if dist < best_dist {
            best_dist = dist;
            best = Some(el);
        }
    }
    best
}

/// Re-derive every connector endpoint attached to `moved_id` from its stored
/// anchor and the mover's current box. Returns how many endpoints moved.
///
/// Call after every mutation of the mover, for every mutated element in a
/// batch, before redrawing.
pub fn update_connected_arrows(moved_id: &str, elements: &mut [CanvasElement], metrics: &dyn TextMetrics) -> usize {
    let Some(mover) = elements.iter().find(|el| el.id == moved_id) else {
        return 0;
    };
    let Some(bbox) = anchor_box(mover, metrics) else {
        return 0;
    };

    let mut updated = 0;
    for el in elements.iter_mut() {
        if el.id == moved_id {
            continue;
        }
        let Some(connector) = el.connector_mut() else {
            continue;
        };
        for end in [ConnectorEnd::Start, ConnectorEnd::End] {
            if connector.connected_to(end).map(String::as_str) != Some(moved_id) {
                continue;
            }
            if let Some(anchor) = connector.anchor(end) {
                let local = Point::new(bbox.x + anchor.x * bbox.width, bbox.y + anchor.y * bbox.height);
                connector.set_endpoint(end, bbox.to_world(local));
                updated += 1;
            }
        }
    }
    updated
}

/// Clear every connector reference to an id in `removed`. Geometry is left
/// untouched. Returns how many references were cleared.
pub fn scrub_connections(elements: &mut [CanvasElement], removed: &HashSet<ElementId>) -> usize {
    clear_connections_where(elements, |target| removed.contains(target))
}

/// Clear every connector reference to an id that is not in `elements`.
/// Returns how many references were cleared.
pub fn scrub_dangling_connections(elements: &mut [CanvasElement]) -> usize {
    let present: HashSet<ElementId> = elements.iter().map(|el| el.id.clone()).collect();
    clear_connections_where(elements, |target| !present.contains(target))
}

fn clear_connections_where<F>(elements: &mut [CanvasElement], gone: F) -> usize
where
    F: Fn(&str) -> bool,
{
    let mut cleared = 0;
    for el in elements.iter_mut() {
        let id = el.id.clone();
        let (ElementData::Line(connector) | ElementData::Arrow(connector)) = &mut el.data else {
            continue;
        };
        for end in [ConnectorEnd::Start, ConnectorEnd::End] {
            if connector.connected_to(end).is_some_and(|target| gone(target)) {
                connector.disconnect(end);
                cleared += 1;
                tracing::debug!(connector = %id, ?end, "cleared dangling connection");
            }
        }
    }
    cleared
}

/// Outcome of snapping one connector endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Snap {
    pub target: ElementId,
    pub point: Point,
    pub anchor: Option<Anchor>,
}

/// Find where an endpoint dragged to `point` should attach: the closest
/// border point of the nearest snap target, with its anchor.
pub fn snap_endpoint(
    point: Point,
    elements: &[CanvasElement],
    exclude: &HashSet<ElementId>,
    metrics: &dyn TextMetrics,
    snap_radius: f64,
) -> Option<Snap> {
    let target = find_snap_target(point, elements, exclude, metrics, snap_radius)?;
    let border = closest_border_point(target, point, metrics)?;
    Some(Snap { target: target.id.clone(), point: border, anchor: compute_anchor(target, border, metrics) })
}
