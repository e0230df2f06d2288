//! Hit testing: elements under a point, selection handles, and line handles.
//!
//! Handles are always tested before elements by the caller, so a handle that
//! overlaps an element wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::EngineConfig;
use crate::element::{CanvasElement, Connector, ConnectorEnd};
use crate::geometry::{BoundingBox, Point, quadratic_point};
use crate::handlers;
use crate::metrics::TextMetrics;

/// A selection-frame handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    E,
    W,
    Rotate,
}

impl Handle {
    /// Corner handles scale both axes.
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Nw | Self::Ne | Self::Sw | Self::Se)
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Rotate => "grab",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// A handle on a single selected line or arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHandle {
    Start,
    End,
    /// On-curve midpoint of a curved connector; dragging it bends the curve.
    Mid,
}

impl LineHandle {
    /// The connector end this handle drags, if it is an endpoint.
    #[must_use]
    pub fn end(self) -> Option<ConnectorEnd> {
        match self {
            Self::Start => Some(ConnectorEnd::Start),
            Self::End => Some(ConnectorEnd::End),
            Self::Mid => None,
        }
    }

    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Mid => "grab",
            Self::Start | Self::End => "crosshair",
        }
    }
}

/// Topmost element whose box (grown by `padding`) contains `point`.
///
/// Elements are scanned last-to-first so later (visually higher) elements
/// win. Rotated boxes are tested in their own unrotated frame.
pub fn hit_test<'a>(
    point: Point,
    elements: &'a [CanvasElement],
    metrics: &dyn TextMetrics,
    padding: f64,
) -> Option<&'a CanvasElement> {
    elements.iter().rev().find(|el| {
        handlers::bounding_box(el, metrics).is_some_and(|b| b.contains(point, padding))
    })
}

/// Which handle of the selection frame `bbox` lies under `point`.
///
/// The point is first rotated into the frame's unrotated space about the
/// frame's center by `-selection_rotation`. The rotate handle is checked
/// first, then corners, then edge midpoints.
#[must_use]
pub fn hit_test_handle(
    point: Point,
    bbox: Option<&BoundingBox>,
    selection_rotation: f64,
    config: &EngineConfig,
) -> Option<Handle> {
    let bbox = bbox?;
    let local = point.rotate_about(bbox.center(), -selection_rotation);
    let frame = BoundingBox::new(bbox.x, bbox.y, bbox.width, bbox.height).inflate(config.selection_padding);

    let left = frame.x;
    let right = frame.x + frame.width;
    let top = frame.y;
    let bottom = frame.y + frame.height;
    let mid_x = left + frame.width / 2.0;
    let mid_y = top + frame.height / 2.0;

    let rotate = Point::new(mid_x, top - config.rotate_handle_offset);
    if local.distance(rotate) <= config.handle_size {
        return Some(Handle::Rotate);
    }

    let near = |hx: f64, hy: f64| {
        (local.x - hx).abs() < config.handle_hit_size && (local.y - hy).abs() < config.handle_hit_size
    };
    let candidates = [
        (Handle::Nw, left, top),
        (Handle::Ne, right, top),
        (Handle::Sw, left, bottom),
        (Handle::Se, right, bottom),
        (Handle::N, mid_x, top),
        (Handle::S, mid_x, bottom),
        (Handle::W, left, mid_y),
        (Handle::E, right, mid_y),
    ];
    candidates.into_iter().find(|&(_, hx, hy)| near(hx, hy)).map(|(h, _, _)| h)
}

/// Which handle of a selected connector lies under `point`.
///
/// Start and end are always present; the mid handle exists only on curved
/// connectors, at the curve's `t = 0.5` point.
#[must_use]
pub fn hit_test_line_handle(point: Point, connector: &Connector, radius: f64) -> Option<LineHandle> {
    if point.distance(connector.start()) <= radius {
        return Some(LineHandle::Start);
    }
    if point.distance(connector.end()) <= radius {
        return Some(LineHandle::End);
    }
    let control = connector.control()?;
    let mid = quadratic_point(connector.start(), control, connector.end(), 0.5);
    (point.distance(mid) <= radius).then_some(LineHandle::Mid)
}
