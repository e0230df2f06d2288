//! Shared numeric constants for the sketchboard crate.
//!
//! These are the defaults behind [`crate::config::EngineConfig`]; core
//! functions receive the effective values explicitly.

// ── Hit-testing ─────────────────────────────────────────────────

/// Slop in canvas units added around every element box during hit testing.
pub const HIT_TEST_PADDING: f64 = 5.0;

/// Gap between the selection box and the drawn selection frame.
pub const SELECTION_PADDING: f64 = 8.0;

/// Radius of the rotate handle hot-zone.
pub const HANDLE_SIZE: f64 = 8.0;

/// Half-extent of the square hot-zone around corner and edge handles.
pub const HANDLE_HIT_SIZE: f64 = 10.0;

/// Distance from the top of the selection frame to the rotate handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 24.0;

/// Radius of the start/end/mid hot-zones on a selected line or arrow.
pub const LINE_HANDLE_RADIUS: f64 = 10.0;

// ── Connections ─────────────────────────────────────────────────

/// Maximum border distance at which a connector endpoint snaps to a shape.
pub const SNAP_RADIUS: f64 = 20.0;

// ── Bounding boxes ──────────────────────────────────────────────

/// Line height as a multiple of font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.25;

/// Offset from the text baseline to the approximate cap height, as a multiple of font size.
pub const TEXT_ASCENT: f64 = 0.75;

/// Lower bound on the thickness of a line/arrow selection box.
pub const LINE_MIN_PADDING: f64 = 6.0;

/// Lower bound on the arrowhead length.
pub const ARROW_MIN_HEAD_LENGTH: f64 = 20.0;

// ── Transforms ──────────────────────────────────────────────────

/// Smallest per-step scale factor a resize gesture may apply.
pub const MIN_SCALE_FACTOR: f64 = 0.1;

/// Minimum font size after scaling.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Minimum path stroke width after scaling.
pub const MIN_PATH_LINE_WIDTH: f64 = 1.0;

/// Minimum shape width/height after scaling.
pub const MIN_SHAPE_SIZE: f64 = 10.0;

// ── Commit thresholds ───────────────────────────────────────────

/// A drawn shape must exceed this size on both axes to be committed.
pub const MIN_COMMIT_SHAPE_SIZE: f64 = 5.0;

/// A drawn line or arrow must exceed this length to be committed.
pub const MIN_COMMIT_CONNECTOR_LENGTH: f64 = 10.0;

/// A marquee must exceed this size on either axis to select anything.
pub const MIN_MARQUEE_SIZE: f64 = 5.0;

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed view scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed view scale.
pub const MAX_SCALE: f64 = 5.0;

/// Multiplicative step for a single zoom-in / zoom-out.
pub const ZOOM_FACTOR: f64 = 1.1;
