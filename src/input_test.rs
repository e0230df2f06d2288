#![allow(clippy::clone_on_copy)]

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn connector_tools() {
    assert!(Tool::Line.is_connector());
    assert!(Tool::Arrow.is_connector());
    assert!(!Tool::Shape.is_connector());
    assert!(!Tool::Select.is_connector());
}

#[test]
fn tool_cursors() {
    assert_eq!(Tool::Select.cursor(), "default");
    assert_eq!(Tool::Pan.cursor(), "grab");
    assert_eq!(Tool::Text.cursor(), "text");
    for tool in [Tool::Draw, Tool::Shape, Tool::Line, Tool::Arrow] {
        assert_eq!(tool.cursor(), "crosshair");
    }
}

// =============================================================
// Key / Modifiers
// =============================================================

#[test]
fn delete_keys() {
    assert!(Key("Delete".into()).is_delete());
    assert!(Key("Backspace".into()).is_delete());
    assert!(!Key("Escape".into()).is_delete());
    assert!(!Key("d".into()).is_delete());
}

#[test]
fn modifiers_default_none_held() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

// =============================================================
// Settings / UI state
// =============================================================

#[test]
fn tool_settings_defaults() {
    let s = ToolSettings::default();
    assert_eq!(s.shape_type, ShapeType::Rectangle);
    assert_eq!(s.shape_fill_color, "transparent");
    assert_eq!(s.line_style, LineStyle::Solid);
    assert_eq!(s.text_style, FontStyle::Normal);
    assert!(s.stroke_width > 0.0);
    assert!(s.text_size > 0.0);
}

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.marquee.is_none());
    assert!(ui.snap_target.is_none());
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn gesture_default_is_idle() {
    assert!(Gesture::default().is_idle());
}

#[test]
fn active_gestures_are_not_idle() {
    let p = Point::new(0.0, 0.0);
    let gestures = [
        Gesture::Panning { last_screen: p },
        Gesture::DraggingSelection { last: p },
        Gesture::Marquee { start: p, end: p },
        Gesture::Resizing { handle: Handle::Se, last: p, bbox: BoundingBox::default() },
        Gesture::Rotating { center: p, last_angle: 0.0, initial_box: BoundingBox::default() },
        Gesture::DraggingLineHandle { id: "a".into(), handle: LineHandle::End },
    ];
    for g in gestures {
        assert!(!g.is_idle(), "{g:?}");
    }
}
