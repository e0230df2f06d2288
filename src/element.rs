//! Document model: canvas elements and their per-kind payloads.
//!
//! A [`CanvasElement`] is an id plus exactly one payload variant. The JSON
//! form is `{ "type": "shape", "id": ..., "data": { ...payload } }` with
//! camelCase payload fields, which is what the drawing app persists.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

/// Opaque element identifier. Generated outside the core; only compared and cleared here.
pub type ElementId = String;

/// Generate a fresh element id (UUID v4 string).
#[must_use]
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// The tag of an element, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Path,
    Shape,
    Line,
    Arrow,
}

impl ElementKind {
    /// Lines and arrows connect other elements and are never snap targets themselves.
    #[must_use]
    pub fn is_connector(self) -> bool {
        matches!(self, Self::Line | Self::Arrow)
    }
}

/// Text weight/slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Stroke pattern for lines and arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Outline drawn for a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Square,
    Circle,
    Ellipse,
    Triangle,
    Diamond,
    Cylinder,
    Pyramid,
}

impl ShapeType {
    /// Square and circle are drawn with equal sides.
    #[must_use]
    pub fn is_equilateral(self) -> bool {
        matches!(self, Self::Square | Self::Circle)
    }
}

/// A block of (possibly multi-line) text anchored at its baseline-left position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Radians, about `(x, y)`.
    #[serde(default)]
    pub rotation: f64,
}

/// A freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPath {
    pub points: Vec<Point>,
    pub line_width: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Kept for serialization compatibility; transforms rotate the points
    /// directly and never read or write this field.
    #[serde(default)]
    pub rotation: f64,
    /// Centroid at commit time, carried through every transform as the pivot reference.
    pub center_x: f64,
    pub center_y: f64,
}

impl DrawPath {
    /// Arithmetic mean of the points, or `None` for an empty path.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.points.len() as f64;
        let (sx, sy) = self.points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }
}

/// A closed geometric shape inside the rectangle `x, y, width, height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub shape_type: ShapeType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(default)]
    pub border_radius: f64,
    /// Radians, about the rectangle's center.
    #[serde(default)]
    pub rotation: f64,
}

impl Shape {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Which end of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorEnd {
    Start,
    End,
}

/// Normalized position inside a target's bounding box (`0..=1` on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Payload shared by lines and arrows: a segment, optionally curved through a
/// quadratic control point, whose ends may be attached to other elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_y: Option<f64>,
    pub line_width: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub style: LineStyle,
    /// Hand-drawn jitter amount; a render-time effect only.
    #[serde(default)]
    pub roughness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_connected_to: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_connected_to: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_anchor_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_anchor_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_anchor_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_anchor_y: Option<f64>,
}

impl Connector {
    /// Straight connector between two points.
    #[must_use]
    pub fn between(start: Point, end: Point, line_width: f64, color: impl Into<String>) -> Self {
        Self {
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
            line_width,
            color: color.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// The quadratic control point, present only when both coordinates are set.
    #[must_use]
    pub fn control(&self) -> Option<Point> {
        match (self.control_x, self.control_y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn set_control(&mut self, p: Point) {
        self.control_x = Some(p.x);
        self.control_y = Some(p.y);
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    #[must_use]
    pub fn endpoint(&self, end: ConnectorEnd) -> Point {
        match end {
            ConnectorEnd::Start => self.start(),
            ConnectorEnd::End => self.end(),
        }
    }

    pub fn set_endpoint(&mut self, end: ConnectorEnd, p: Point) {
        match end {
            ConnectorEnd::Start => {
                self.start_x = p.x;
                self.start_y = p.y;
            }
            ConnectorEnd::End => {
                self.end_x = p.x;
                self.end_y = p.y;
            }
        }
    }

    #[must_use]
    pub fn connected_to(&self, end: ConnectorEnd) -> Option<&ElementId> {
        match end {
            ConnectorEnd::Start => self.start_connected_to.as_ref(),
            ConnectorEnd::End => self.end_connected_to.as_ref(),
        }
    }

    /// The stored anchor for `end`, present only when both coordinates are set.
    #[must_use]
    pub fn anchor(&self, end: ConnectorEnd) -> Option<Anchor> {
        let (x, y) = match end {
            ConnectorEnd::Start => (self.start_anchor_x, self.start_anchor_y),
            ConnectorEnd::End => (self.end_anchor_x, self.end_anchor_y),
        };
        Some(Anchor { x: x?, y: y? })
    }

    /// Record an attachment of `end` to `target` at `anchor`.
    pub fn connect(&mut self, end: ConnectorEnd, target: ElementId, anchor: Option<Anchor>) {
        let (ax, ay) = (anchor.map(|a| a.x), anchor.map(|a| a.y));
        match end {
            ConnectorEnd::Start => {
                self.start_connected_to = Some(target);
                self.start_anchor_x = ax;
                self.start_anchor_y = ay;
            }
            ConnectorEnd::End => {
                self.end_connected_to = Some(target);
                self.end_anchor_x = ax;
                self.end_anchor_y = ay;
            }
        }
    }

    /// Drop the attachment of `end` together with its anchor.
    pub fn disconnect(&mut self, end: ConnectorEnd) {
        match end {
            ConnectorEnd::Start => {
                self.start_connected_to = None;
                self.start_anchor_x = None;
                self.start_anchor_y = None;
            }
            ConnectorEnd::End => {
                self.end_connected_to = None;
                self.end_anchor_x = None;
                self.end_anchor_y = None;
            }
        }
    }
}

/// The per-kind payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ElementData {
    Text(TextBlock),
    Path(DrawPath),
    Shape(Shape),
    Line(Connector),
    Arrow(Connector),
}

impl ElementData {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Path(_) => ElementKind::Path,
            Self::Shape(_) => ElementKind::Shape,
            Self::Line(_) => ElementKind::Line,
            Self::Arrow(_) => ElementKind::Arrow,
        }
    }
}

/// An element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    pub id: ElementId,
    #[serde(flatten)]
    pub data: ElementData,
}

impl CanvasElement {
    #[must_use]
    pub fn new(id: impl Into<ElementId>, data: ElementData) -> Self {
        Self { id: id.into(), data }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }

    /// The connector payload for lines and arrows.
    #[must_use]
    pub fn connector(&self) -> Option<&Connector> {
        match &self.data {
            ElementData::Line(c) | ElementData::Arrow(c) => Some(c),
            _ => None,
        }
    }

    pub fn connector_mut(&mut self) -> Option<&mut Connector> {
        match &mut self.data {
            ElementData::Line(c) | ElementData::Arrow(c) => Some(c),
            _ => None,
        }
    }

    /// The shape type when this element is a shape.
    #[must_use]
    pub fn shape_type(&self) -> Option<ShapeType> {
        match &self.data {
            ElementData::Shape(s) => Some(s.shape_type),
            _ => None,
        }
    }
}
