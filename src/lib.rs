//! Geometry and transform engine for an infinite 2D drawing canvas.
//!
//! The crate owns everything about canvas elements that is pure math:
//! per-kind move/scale/rotate, bounding boxes, hit testing against elements
//! and selection handles, connector attachment and snapping, and the
//! orchestration that keeps attached connectors glued to their targets while
//! elements are transformed. Rendering, persistence and networking belong to
//! the host, which feeds pointer events into [`engine::Engine`] and reacts to
//! the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Points, oriented boxes, segment and Bézier helpers |
//! | [`element`] | Element kinds, payloads and their JSON form |
//! | [`metrics`] | Text measurement capability |
//! | [`handlers`] | Per-kind translate / scale / rotate / bounding box |
//! | [`bounds`] | Selection box and box intersection |
//! | [`hit`] | Hit-testing elements, selection handles and line handles |
//! | [`connect`] | Border points, anchors, snapping and connection upkeep |
//! | [`transform`] | Selection-wide move / resize / rotate |
//! | [`doc`] | Element store, selection, commit and delete |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Tools, input event types and the gesture state machine |
//! | [`engine`] | Pointer/keyboard controller tying it all together |
//! | [`config`] | Environment-driven thresholds |
//! | [`consts`] | Default numeric constants |

pub mod bounds;
pub mod camera;
pub mod config;
pub mod connect;
pub mod consts;
pub mod doc;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod handlers;
pub mod hit;
pub mod input;
pub mod metrics;
pub mod transform;
