#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::element::{Anchor, CanvasElement, ConnectorEnd, ElementData, Shape, ShapeType};
use crate::handlers;
use crate::metrics::FixedAdvanceMetrics;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> CanvasElement {
    CanvasElement::new(
        id,
        ElementData::Shape(Shape {
            shape_type: ShapeType::Rectangle,
            x,
            y,
            width: w,
            height: h,
            fill_color: "transparent".into(),
            stroke_color: "#000".into(),
            stroke_width: 2.0,
            fill_opacity: None,
            stroke_opacity: None,
            border_radius: 0.0,
            rotation: 0.0,
        }),
    )
}

/// `r` at 100,100 50x50 with arrow `a` attached at its right-edge midpoint.
fn connected_doc() -> Document {
    let mut a = CanvasElement::new(
        "a",
        ElementData::Arrow(Connector::between(Point::new(0.0, 0.0), Point::new(150.0, 125.0), 2.0, "#000")),
    );
    if let Some(c) = a.connector_mut() {
        c.connect(ConnectorEnd::End, "r".into(), Some(Anchor { x: 1.0, y: 0.5 }));
    }
    let mut doc = Document::new();
    doc.load(vec![rect("r", 100.0, 100.0, 50.0, 50.0), a]);
    doc
}

fn arrow_end(doc: &Document) -> Point {
    doc.get("a").and_then(CanvasElement::connector).map(Connector::end).unwrap()
}

// =============================================================
// resize_step
// =============================================================

#[test]
fn se_corner_scales_about_nw() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    let step = resize_step(Handle::Se, &b, 50.0, 25.0, 0.1).unwrap();
    assert_eq!(step, ResizeStep { scale_x: 1.5, scale_y: 1.5, pivot: Point::new(0.0, 0.0) });
}

#[test]
fn nw_corner_scales_about_se() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    let step = resize_step(Handle::Nw, &b, 10.0, 10.0, 0.1).unwrap();
    assert_eq!(step.pivot, Point::new(100.0, 50.0));
    assert!(approx_eq(step.scale_x, 0.9));
    assert!(approx_eq(step.scale_y, 0.8));
}

#[test]
fn edge_handles_scale_one_axis() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    let e = resize_step(Handle::E, &b, 20.0, 999.0, 0.1).unwrap();
    assert_eq!((e.scale_x, e.scale_y), (1.2, 1.0));
    assert_eq!(e.pivot, Point::new(0.0, 25.0));
    let n = resize_step(Handle::N, &b, 999.0, -25.0, 0.1).unwrap();
    assert_eq!((n.scale_x, n.scale_y), (1.0, 1.5));
    assert_eq!(n.pivot, Point::new(50.0, 50.0));
}

#[test]
fn factors_are_clamped() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    let step = resize_step(Handle::Se, &b, -500.0, -99.0, 0.1).unwrap();
    assert_eq!(step.scale_x, 0.1);
    assert_eq!(step.scale_y, 0.1);
}

#[test]
fn zero_extent_axis_keeps_factor_one() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 0.0);
    let step = resize_step(Handle::Se, &b, 10.0, 10.0, 0.1).unwrap();
    assert_eq!(step.scale_y, 1.0);
}

#[test]
fn rotate_handle_has_no_resize_step() {
    assert!(resize_step(Handle::Rotate, &BoundingBox::new(0.0, 0.0, 10.0, 10.0), 1.0, 1.0, 0.1).is_none());
}

#[test]
fn pointer_angle_quadrants() {
    let c = Point::new(10.0, 10.0);
    assert_eq!(pointer_angle(c, Point::new(20.0, 10.0)), 0.0);
    assert!(approx_eq(pointer_angle(c, Point::new(10.0, 20.0)), FRAC_PI_2));
}

// =============================================================
// Selection transforms
// =============================================================

#[test]
fn move_selection_drags_attached_arrow() {
    let mut doc = connected_doc();
    doc.select("r", false).unwrap();
    move_selection(&mut doc, 20.0, -10.0, &FixedAdvanceMetrics::default());
    assert_eq!(arrow_end(&doc), Point::new(170.0, 115.0));
}

#[test]
fn move_selection_with_arrow_selected_too() {
    let mut doc = connected_doc();
    doc.select("r", false).unwrap();
    doc.select("a", true).unwrap();
    move_selection(&mut doc, 10.0, 10.0, &FixedAdvanceMetrics::default());
    let c = doc.get("a").and_then(CanvasElement::connector).unwrap();
    assert_eq!(c.start(), Point::new(10.0, 10.0));
    assert_eq!(c.end(), Point::new(160.0, 135.0));
}

#[test]
fn move_then_inverse_restores_document() {
    let mut doc = connected_doc();
    doc.select("r", false).unwrap();
    let before = doc.elements().to_vec();
    let m = FixedAdvanceMetrics::default();
    move_selection(&mut doc, 33.0, -12.5, &m);
    move_selection(&mut doc, -33.0, 12.5, &m);
    assert_eq!(doc.elements(), before.as_slice());
}

#[test]
fn unselected_elements_do_not_move() {
    let mut doc = connected_doc();
    doc.select("a", false).unwrap();
    move_selection(&mut doc, 5.0, 5.0, &FixedAdvanceMetrics::default());
    assert_eq!(handlers::bounding_box(doc.get("r").unwrap(), &FixedAdvanceMetrics::default()).unwrap().x, 100.0);
}

#[test]
fn scale_selection_keeps_arrow_on_anchor() {
    let mut doc = connected_doc();
    doc.select("r", false).unwrap();
    let m = FixedAdvanceMetrics::default();
    let bbox = doc.selection_box(&m).unwrap();
    let step = resize_step(Handle::Se, &bbox, 50.0, 50.0, 0.1).unwrap();
    scale_selection(&mut doc, step, &m);
    // 100,100 100x100 now; right-edge midpoint is (200, 150).
    assert_eq!(doc.selection_box(&m), Some(BoundingBox::new(100.0, 100.0, 100.0, 100.0)));
    assert_eq!(arrow_end(&doc), Point::new(200.0, 150.0));
}

#[test]
fn rotate_selection_accumulates_rotation_and_moves_arrow() {
    let mut doc = connected_doc();
    doc.select("r", false).unwrap();
    let m = FixedAdvanceMetrics::default();
    let center = Point::new(125.0, 125.0);
    rotate_selection(&mut doc, 0.5, center, &m);
    rotate_selection(&mut doc, FRAC_PI_2 - 0.5, center, &m);
    assert!(approx_eq(doc.selection_rotation(), FRAC_PI_2));
    assert!(point_approx_eq(arrow_end(&doc), Point::new(125.0, 150.0)));
}

#[test]
fn transforms_with_empty_selection_are_noops() {
    let mut doc = connected_doc();
    let before = doc.elements().to_vec();
    let m = FixedAdvanceMetrics::default();
    move_selection(&mut doc, 10.0, 10.0, &m);
    rotate_selection(&mut doc, 1.0, Point::new(0.0, 0.0), &m);
    assert_eq!(doc.elements(), before.as_slice());
    assert_eq!(doc.selection_rotation(), 0.0);
}

// =============================================================
// drag_line_handle
// =============================================================

#[test]
fn dragging_endpoint_moves_it() {
    let mut c = Connector::between(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 2.0, "#000");
    drag_line_handle(&mut c, LineHandle::Start, Point::new(-10.0, 5.0));
    assert_eq!(c.start(), Point::new(-10.0, 5.0));
    assert_eq!(c.end(), Point::new(100.0, 0.0));
}

#[test]
fn dragging_mid_handle_bends_curve_through_pointer() {
    let mut c = Connector::between(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 2.0, "#000");
    c.set_control(Point::new(50.0, 0.0));
    drag_line_handle(&mut c, LineHandle::Mid, Point::new(50.0, 40.0));
    assert_eq!(c.control(), Some(Point::new(50.0, 80.0)));
    let mid = crate::geometry::quadratic_point(c.start(), Point::new(50.0, 80.0), c.end(), 0.5);
    assert!(point_approx_eq(mid, Point::new(50.0, 40.0)));
}
