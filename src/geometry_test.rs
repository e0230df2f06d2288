#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_distance() {
    assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    assert_eq!(Point::new(1.0, 1.0).distance_sq(Point::new(4.0, 5.0)), 25.0);
}

#[test]
fn rotate_about_quarter_turn() {
    let p = Point::new(10.0, 0.0).rotate_about(Point::new(0.0, 0.0), FRAC_PI_2);
    assert!(point_approx_eq(p, Point::new(0.0, 10.0)));
}

#[test]
fn rotate_about_zero_angle_is_identity() {
    let p = Point::new(3.5, -2.0);
    assert_eq!(p.rotate_about(Point::new(100.0, 100.0), 0.0), p);
}

#[test]
fn rotate_about_composes() {
    let pivot = Point::new(5.0, 7.0);
    let p = Point::new(12.0, -3.0);
    let twice = p.rotate_about(pivot, 0.3).rotate_about(pivot, 0.5);
    let once = p.rotate_about(pivot, 0.8);
    assert!(point_approx_eq(twice, once));
}

#[test]
fn rotate_about_pivot_is_fixed() {
    let pivot = Point::new(5.0, 7.0);
    assert!(point_approx_eq(pivot.rotate_about(pivot, 1.234), pivot));
}

#[test]
fn scale_about_center() {
    let p = Point::new(10.0, 20.0).scale_about(Point::new(0.0, 10.0), 2.0, 0.5);
    assert_eq!(p, Point::new(20.0, 15.0));
}

#[test]
fn offset_translates() {
    assert_eq!(Point::new(1.0, 2.0).offset(3.0, -4.0), Point::new(4.0, -2.0));
}

// --- Segments and curves ---

#[test]
fn closest_point_projects_inside_segment() {
    let c = closest_point_on_segment(Point::new(5.0, 5.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(c, Point::new(5.0, 0.0));
}

#[test]
fn closest_point_clamps_to_endpoints() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(closest_point_on_segment(Point::new(-5.0, 3.0), a, b), a);
    assert_eq!(closest_point_on_segment(Point::new(25.0, -1.0), a, b), b);
}

#[test]
fn closest_point_on_zero_length_segment_is_start() {
    let a = Point::new(4.0, 4.0);
    assert_eq!(closest_point_on_segment(Point::new(0.0, 0.0), a, a), a);
}

#[test]
fn quadratic_point_endpoints_and_middle() {
    let s = Point::new(0.0, 0.0);
    let c = Point::new(50.0, 100.0);
    let e = Point::new(100.0, 0.0);
    assert_eq!(quadratic_point(s, c, e, 0.0), s);
    assert_eq!(quadratic_point(s, c, e, 1.0), e);
    assert!(point_approx_eq(quadratic_point(s, c, e, 0.5), Point::new(50.0, 50.0)));
}

#[test]
fn control_for_midpoint_passes_through_target() {
    let s = Point::new(0.0, 0.0);
    let e = Point::new(100.0, 20.0);
    let target = Point::new(40.0, 60.0);
    let control = control_for_midpoint(s, e, target);
    assert!(point_approx_eq(quadratic_point(s, control, e, 0.5), target));
}

// --- BoundingBox ---

#[test]
fn enclosing_empty_is_none() {
    assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
}

#[test]
fn enclosing_points() {
    let b = BoundingBox::enclosing([Point::new(3.0, 8.0), Point::new(-1.0, 2.0), Point::new(5.0, 4.0)]);
    assert_eq!(b, Some(BoundingBox::new(-1.0, 2.0, 6.0, 6.0)));
}

#[test]
fn from_corners_normalizes() {
    let b = BoundingBox::from_corners(Point::new(10.0, 10.0), Point::new(0.0, 4.0));
    assert_eq!(b, BoundingBox::new(0.0, 4.0, 10.0, 6.0));
}

#[test]
fn degenerate_boxes() {
    assert!(BoundingBox::new(0.0, 0.0, 0.0, 5.0).is_degenerate());
    assert!(BoundingBox::new(0.0, 0.0, 5.0, 0.0).is_degenerate());
    assert!(!BoundingBox::new(0.0, 0.0, 5.0, 5.0).is_degenerate());
}

#[test]
fn corners_unrotated() {
    let b = BoundingBox::new(0.0, 0.0, 10.0, 20.0);
    assert_eq!(
        b.corners(),
        [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 20.0), Point::new(0.0, 20.0)]
    );
}

#[test]
fn corners_half_turn_swap() {
    let b = BoundingBox::rotated(0.0, 0.0, 10.0, 20.0, PI);
    let [nw, _, se, _] = b.corners();
    assert!(point_approx_eq(nw, Point::new(10.0, 20.0)));
    assert!(point_approx_eq(se, Point::new(0.0, 0.0)));
}

#[test]
fn local_world_round_trip() {
    let b = BoundingBox::rotated(10.0, 10.0, 40.0, 20.0, 0.7);
    let p = Point::new(13.0, 41.0);
    assert!(point_approx_eq(b.to_world(b.to_local(p)), p));
}

#[test]
fn contains_respects_rotation() {
    // 100 x 10 bar centered at (50, 5), turned upright.
    let b = BoundingBox::rotated(0.0, 0.0, 100.0, 10.0, FRAC_PI_2);
    assert!(b.contains(Point::new(50.0, 45.0), 0.0));
    assert!(!b.contains(Point::new(90.0, 5.0), 0.0));
    assert!(BoundingBox::new(0.0, 0.0, 100.0, 10.0).contains(Point::new(90.0, 5.0), 0.0));
}

#[test]
fn contains_with_padding() {
    let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(!b.contains(Point::new(13.0, 5.0), 0.0));
    assert!(b.contains(Point::new(13.0, 5.0), 5.0));
}

#[test]
fn inflate_keeps_center_and_rotation() {
    let b = BoundingBox::rotated(0.0, 0.0, 10.0, 10.0, 0.5).inflate(3.0);
    assert_eq!(b, BoundingBox::rotated(-3.0, -3.0, 16.0, 16.0, 0.5));
    assert_eq!(b.center(), Point::new(5.0, 5.0));
}

#[test]
fn unrotated_box_serializes_without_rotation() {
    let json = serde_json::to_value(BoundingBox::new(1.0, 2.0, 3.0, 4.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0 }));
}
