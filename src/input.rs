//! Input model: tools, modifier keys, tool settings, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `Gesture` is the interaction in progress between pointer-down and
//! pointer-up, carrying everything needed to compute incremental deltas and
//! to commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::element::{Connector, DrawPath, ElementId, ElementKind, FontStyle, LineStyle, Shape, ShapeType};
use crate::geometry::{BoundingBox, Point};
use crate::hit::{Handle, LineHandle};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Drag to pan the view.
    Pan,
    /// Freehand drawing.
    Draw,
    /// Draw a shape of the configured [`ShapeType`].
    Shape,
    /// Draw a straight line.
    Line,
    /// Draw an arrow.
    Arrow,
    /// Place text.
    Text,
}

impl Tool {
    /// Whether this tool creates a connector (line, arrow).
    #[must_use]
    pub fn is_connector(self) -> bool {
        matches!(self, Self::Line | Self::Arrow)
    }

    /// Cursor shown while the tool is idle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Select => "default",
            Self::Pan => "grab",
            Self::Text => "text",
            Self::Draw | Self::Shape | Self::Line | Self::Arrow => "crosshair",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key, named as the host reports it (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.0 == "Backspace"
    }
}

/// Wheel / trackpad scroll delta in screen pixels (positive `dy` = down).
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Style applied to newly drawn elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub shape_type: ShapeType,
    pub stroke_width: f64,
    pub stroke_color: String,
    pub stroke_opacity: Option<f64>,
    pub line_style: LineStyle,
    pub roughness: f64,
    pub shape_fill_color: String,
    pub shape_stroke_color: String,
    pub shape_stroke_width: f64,
    pub shape_border_radius: f64,
    pub text_size: f64,
    pub text_style: FontStyle,
    pub text_color: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rectangle,
            stroke_width: 2.0,
            stroke_color: "#000000".into(),
            stroke_opacity: None,
            line_style: LineStyle::Solid,
            roughness: 0.0,
            shape_fill_color: "transparent".into(),
            shape_stroke_color: "#000000".into(),
            shape_stroke_width: 2.0,
            shape_border_radius: 0.0,
            text_size: 16.0,
            text_style: FontStyle::Normal,
            text_color: "#000000".into(),
        }
    }
}

/// UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    pub settings: ToolSettings,
    /// Marquee being dragged, normalized.
    pub marquee: Option<BoundingBox>,
    /// Border point and element a connector endpoint would snap to.
    pub snap_target: Option<(Point, ElementId)>,
    /// Cursor requested for the current hover state.
    pub cursor: &'static str,
}

/// The interaction in progress.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Panning the view.
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
    /// Moving the selection.
    DraggingSelection {
        /// Canvas position of the previous pointer event.
        last: Point,
    },
    /// Rubber-band selection.
    Marquee { start: Point, end: Point },
    /// Resizing the selection with a corner or edge handle.
    Resizing {
        handle: Handle,
        /// Canvas position of the previous pointer event.
        last: Point,
        /// Selection box after the previous step; each step scales relative to it.
        bbox: BoundingBox,
    },
    /// Rotating the selection.
    Rotating {
        /// Center of the selection box at gesture start; fixed for the gesture.
        center: Point,
        /// Pointer angle at the previous event.
        last_angle: f64,
        /// Selection box at gesture start, used for handle placement while rotated.
        initial_box: BoundingBox,
    },
    /// Dragging a handle of the single selected line/arrow.
    DraggingLineHandle { id: ElementId, handle: LineHandle },
    /// Drawing a freehand path.
    DrawingPath { path: DrawPath },
    /// Drawing a shape from a fixed corner.
    DrawingShape { start: Point, shape: Shape },
    /// Drawing a line or arrow.
    DrawingConnector { kind: ElementKind, connector: Connector },
}

impl Gesture {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
