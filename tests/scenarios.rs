//! End-to-end interaction scenarios driven through the public API.

use std::collections::HashSet;

use sketchboard::bounds::selection_bounding_box;
use sketchboard::config::EngineConfig;
use sketchboard::connect::{find_snap_target, update_connected_arrows};
use sketchboard::element::{CanvasElement, ConnectorEnd};
use sketchboard::engine::{Action, Engine};
use sketchboard::geometry::{BoundingBox, Point};
use sketchboard::handlers::{bounding_box, move_element};
use sketchboard::hit::hit_test;
use sketchboard::input::{Button, Key, Modifiers, Tool};
use sketchboard::metrics::FixedAdvanceMetrics;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::TRACE).try_init();
}

/// A saved board: a rectangle with an arrow attached to its right-middle point.
fn saved_board() -> Vec<CanvasElement> {
    serde_json::from_value(serde_json::json!([
        {
            "type": "shape",
            "id": "rect",
            "data": {
                "shapeType": "rectangle",
                "x": 100.0, "y": 100.0, "width": 50.0, "height": 50.0,
                "fillColor": "transparent", "strokeColor": "#1e1e1e", "strokeWidth": 2.0
            }
        },
        {
            "type": "arrow",
            "id": "arrow",
            "data": {
                "startX": 0.0, "startY": 0.0, "endX": 150.0, "endY": 125.0,
                "lineWidth": 2.0, "color": "#1e1e1e",
                "endConnectedTo": "rect", "endAnchorX": 1.0, "endAnchorY": 0.5
            }
        }
    ]))
    .expect("board JSON")
}

fn arrow_end(elements: &[CanvasElement]) -> Point {
    elements.iter().find(|el| el.id == "arrow").and_then(CanvasElement::connector).expect("arrow").end()
}

#[test]
fn moving_a_target_drags_the_attached_arrow() {
    init_tracing();
    let mut elements = saved_board();
    let metrics = FixedAdvanceMetrics::default();
    move_element(&mut elements[0], 20.0, -10.0);
    assert_eq!(update_connected_arrows("rect", &mut elements, &metrics), 1);
    assert_eq!(arrow_end(&elements), Point::new(170.0, 115.0));
}

#[test]
fn later_element_wins_hit_test() {
    let mut elements = saved_board();
    let mut b = elements[0].clone();
    b.id = "b".into();
    elements.push(b);
    let hit = hit_test(Point::new(110.0, 110.0), &elements, &FixedAdvanceMetrics::default(), 5.0);
    assert_eq!(hit.map(|el| el.id.as_str()), Some("b"));
}

#[test]
fn straight_line_box() {
    let line: CanvasElement = serde_json::from_value(serde_json::json!({
        "type": "line", "id": "l",
        "data": {
            "startX": 0.0, "startY": 0.0, "endX": 100.0, "endY": 0.0,
            "lineWidth": 4.0, "color": "#000"
        }
    }))
    .expect("line JSON");
    let b = bounding_box(&line, &FixedAdvanceMetrics::default()).expect("box");
    assert_eq!(b, BoundingBox::rotated(0.0, -4.0, 100.0, 8.0, 0.0));
    assert_eq!(b.center(), Point::new(50.0, 0.0));
}

#[test]
fn selection_box_covers_whole_board() {
    let elements = saved_board();
    let b = selection_bounding_box(&elements, &FixedAdvanceMetrics::default()).expect("box");
    for el in &elements {
        for c in bounding_box(el, &FixedAdvanceMetrics::default()).expect("box").corners() {
            assert!(b.contains(c, 1e-9));
        }
    }
}

#[test]
fn connectors_are_never_snap_targets() {
    let elements = saved_board();
    let target = find_snap_target(Point::new(50.0, 40.0), &elements, &HashSet::new(), &FixedAdvanceMetrics::default(), 20.0);
    assert!(target.is_none());
}

#[test]
fn draw_connect_move_delete_session() {
    init_tracing();
    let mut engine = Engine::new(EngineConfig::default(), FixedAdvanceMetrics::default());
    let mods = Modifiers::default();

    // Two shapes.
    engine.set_tool(Tool::Shape);
    engine.on_pointer_down(Point::new(100.0, 100.0), Button::Primary, mods);
    engine.on_pointer_move(Point::new(200.0, 200.0), mods);
    engine.on_pointer_up(Point::new(200.0, 200.0), Button::Primary, mods);
    engine.set_tool(Tool::Shape);
    engine.on_pointer_down(Point::new(400.0, 100.0), Button::Primary, mods);
    engine.on_pointer_move(Point::new(500.0, 200.0), mods);
    engine.on_pointer_up(Point::new(500.0, 200.0), Button::Primary, mods);
    assert_eq!(engine.doc.len(), 2);
    let left = engine.doc.elements()[0].id.clone();
    let right = engine.doc.elements()[1].id.clone();

    // Arrow from the left shape's right edge to the right shape's left edge.
    engine.set_tool(Tool::Arrow);
    engine.on_pointer_down(Point::new(205.0, 150.0), Button::Primary, mods);
    engine.on_pointer_move(Point::new(395.0, 150.0), mods);
    let actions = engine.on_pointer_up(Point::new(395.0, 150.0), Button::Primary, mods);
    let arrow_id = actions
        .iter()
        .find_map(|a| match a {
            Action::ElementCreated(id) => Some(id.clone()),
            _ => None,
        })
        .expect("arrow committed");
    let arrow = engine.doc.get(&arrow_id).and_then(CanvasElement::connector).expect("arrow");
    assert_eq!(arrow.start(), Point::new(200.0, 150.0));
    assert_eq!(arrow.end(), Point::new(400.0, 150.0));
    assert_eq!(arrow.connected_to(ConnectorEnd::Start), Some(&left));
    assert_eq!(arrow.connected_to(ConnectorEnd::End), Some(&right));

    // Drag the right shape down; only the arrow's end follows.
    engine.on_pointer_down(Point::new(450.0, 120.0), Button::Primary, mods);
    engine.on_pointer_move(Point::new(450.0, 170.0), mods);
    engine.on_pointer_up(Point::new(450.0, 170.0), Button::Primary, mods);
    let arrow = engine.doc.get(&arrow_id).and_then(CanvasElement::connector).expect("arrow");
    assert_eq!(arrow.start(), Point::new(200.0, 150.0));
    assert_eq!(arrow.end(), Point::new(400.0, 200.0));

    // Delete it: the arrow survives with its end detached.
    let actions = engine.on_key_down(&Key("Delete".into()), mods);
    assert_eq!(actions[0], Action::ElementsDeleted(vec![right.clone()]));
    let arrow = engine.doc.get(&arrow_id).and_then(CanvasElement::connector).expect("arrow");
    assert_eq!(arrow.connected_to(ConnectorEnd::End), None);
    assert_eq!(arrow.connected_to(ConnectorEnd::Start), Some(&left));
    assert_eq!(arrow.end(), Point::new(400.0, 200.0));
}
