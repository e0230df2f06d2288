//! Interaction controller: turns pointer and keyboard events into document
//! mutations using the core geometry modules.
//!
//! Every handler runs to completion and returns the [`Action`]s the host
//! should process (redraw, cursor change, history checkpoint, text editor).
//! Within one event the order is always: mutate geometry, update connected
//! connectors, then request a render.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::connect::{Snap, snap_endpoint};
use crate::doc::{DocError, Document};
use crate::element::{
    CanvasElement, Connector, ConnectorEnd, DrawPath, ElementData, ElementId, ElementKind, Shape, TextBlock,
};
use crate::geometry::{BoundingBox, Point};
use crate::hit::{Handle, hit_test, hit_test_handle, hit_test_line_handle};
use crate::input::{Button, Gesture, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::metrics::TextMetrics;
use crate::transform::{drag_line_handle, move_selection, pointer_angle, resize_step, rotate_selection, scale_selection};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new element was committed.
    ElementCreated(ElementId),
    /// Elements were removed.
    ElementsDeleted(Vec<ElementId>),
    /// The selection set changed.
    SelectionChanged,
    /// A mutating gesture finished; the host may snapshot history here.
    HistoryCheckpoint,
    /// The host should open a text editor at `at`, for `id` when editing existing text.
    EditTextRequested { id: Option<ElementId>, at: Point },
    SetCursor(&'static str),
    RenderNeeded,
}

/// The canvas interaction engine.
pub struct Engine {
    pub doc: Document,
    pub camera: Camera,
    pub ui: UiState,
    pub gesture: Gesture,
    pub config: EngineConfig,
    metrics: Box<dyn TextMetrics>,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig, metrics: impl TextMetrics + 'static) -> Self {
        Self {
            doc: Document::new(),
            camera: Camera::default(),
            ui: UiState { cursor: Tool::Select.cursor(), ..UiState::default() },
            gesture: Gesture::Idle,
            config,
            metrics: Box::new(metrics),
        }
    }

    /// The text measurement provider in use.
    #[must_use]
    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    // --- Tool / text ---

    /// Switch tools. Clears the selection and abandons any gesture.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        self.ui.cursor = tool.cursor();
        self.ui.marquee = None;
        self.ui.snap_target = None;
        self.gesture = Gesture::Idle;
        self.doc.clear_selection();
        vec![Action::SelectionChanged, Action::SetCursor(tool.cursor()), Action::RenderNeeded]
    }

    /// Commit a new text block at canvas point `at` using the current text settings.
    ///
    /// # Errors
    ///
    /// Returns `EmptyText` when `text` is blank.
    pub fn commit_text(&mut self, at: Point, text: &str) -> Result<ElementId, DocError> {
        let s = &self.ui.settings;
        let block = TextBlock {
            x: at.x,
            y: at.y,
            text: text.to_string(),
            font_size: s.text_size,
            font_style: s.text_style,
            font_family: None,
            color: s.text_color.clone(),
            opacity: None,
            rotation: 0.0,
        };
        self.doc.commit(CanvasElement::new(String::new(), ElementData::Text(block)), &self.config)
    }

    /// Replace the content of an existing text block. Blank text removes it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not a text element.
    pub fn set_text(&mut self, id: &str, text: &str) -> Result<Vec<Action>, DocError> {
        let Some(CanvasElement { data: ElementData::Text(block), .. }) = self.doc.get_mut(id) else {
            return Err(DocError::NotFound(id.to_string()));
        };
        if text.trim().is_empty() {
            let removed = self.doc.remove(id)?;
            return Ok(vec![Action::ElementsDeleted(vec![removed.id]), Action::RenderNeeded]);
        }
        block.text = text.to_string();
        Ok(vec![Action::HistoryCheckpoint, Action::RenderNeeded])
    }

    // --- Queries ---

    /// The frame handles are drawn on and hit-tested against, with its rotation.
    ///
    /// While rotating, this is the box captured at gesture start turned by the
    /// accumulated rotation; otherwise the live selection box.
    #[must_use]
    pub fn selection_frame(&self) -> Option<(BoundingBox, f64)> {
        if let Gesture::Rotating { initial_box, .. } = &self.gesture {
            return Some((*initial_box, self.doc.selection_rotation()));
        }
        self.doc.selection_box(self.metrics()).map(|b| (b, self.doc.selection_rotation()))
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button == Button::Middle || self.ui.tool == Tool::Pan {
            self.gesture = Gesture::Panning { last_screen: screen };
            self.ui.cursor = "grabbing";
            return vec![Action::SetCursor("grabbing")];
        }
        if button != Button::Primary {
            return Vec::new();
        }
        let p = self.camera.screen_to_canvas(screen);
        match self.ui.tool {
            Tool::Select => self.select_down(p, modifiers),
            Tool::Draw => {
                let s = &self.ui.settings;
                self.gesture = Gesture::DrawingPath {
                    path: DrawPath {
                        points: vec![p],
                        line_width: s.stroke_width,
                        color: s.stroke_color.clone(),
                        opacity: s.stroke_opacity,
                        rotation: 0.0,
                        center_x: p.x,
                        center_y: p.y,
                    },
                };
                Vec::new()
            }
            Tool::Shape => {
                let s = &self.ui.settings;
                self.gesture = Gesture::DrawingShape {
                    start: p,
                    shape: Shape {
                        shape_type: s.shape_type,
                        x: p.x,
                        y: p.y,
                        width: 0.0,
                        height: 0.0,
                        fill_color: s.shape_fill_color.clone(),
                        stroke_color: s.shape_stroke_color.clone(),
                        stroke_width: s.shape_stroke_width,
                        fill_opacity: None,
                        stroke_opacity: None,
                        border_radius: s.shape_border_radius,
                        rotation: 0.0,
                    },
                };
                Vec::new()
            }
            Tool::Line | Tool::Arrow => self.connector_down(p),
            Tool::Text => vec![Action::EditTextRequested { id: None, at: p }],
            Tool::Pan => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let p = self.camera.screen_to_canvas(screen);
        if self.gesture.is_idle() {
            return self.hover(p);
        }
        let metrics = self.metrics.as_ref();
        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { last_screen } => {
                self.camera.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
                *last_screen = screen;
                vec![Action::RenderNeeded]
            }
            Gesture::DraggingSelection { last } => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = p;
                move_selection(&mut self.doc, dx, dy, metrics);
                vec![Action::RenderNeeded]
            }
            Gesture::Marquee { start, end } => {
                *end = p;
                self.ui.marquee = Some(BoundingBox::from_corners(*start, p));
                vec![Action::RenderNeeded]
            }
            Gesture::Resizing { handle, last, bbox } => {
                if let Some(step) = resize_step(*handle, bbox, p.x - last.x, p.y - last.y, self.config.min_scale_factor) {
                    scale_selection(&mut self.doc, step, metrics);
                }
                *last = p;
                if let Some(b) = self.doc.selection_box(metrics) {
                    *bbox = b;
                }
                vec![Action::RenderNeeded]
            }
            Gesture::Rotating { center, last_angle, .. } => {
                let angle = pointer_angle(*center, p);
                let delta = angle - *last_angle;
                *last_angle = angle;
                rotate_selection(&mut self.doc, delta, *center, metrics);
                vec![Action::RenderNeeded]
            }
            Gesture::DraggingLineHandle { id, handle } => {
                let snap = match handle.end() {
                    Some(_) => snap_excluding(&self.doc, id, p, metrics, self.config.snap_radius),
                    None => None,
                };
                let target = snap.as_ref().map_or(p, |s| s.point);
                self.ui.snap_target = snap.map(|s| (s.point, s.target));
                if let Some(c) = self.doc.get_mut(id).and_then(CanvasElement::connector_mut) {
                    drag_line_handle(c, *handle, target);
                }
                vec![Action::RenderNeeded]
            }
            Gesture::DrawingPath { path } => {
                path.points.push(p);
                vec![Action::RenderNeeded]
            }
            Gesture::DrawingShape { start, shape } => {
                let mut width = (p.x - start.x).abs();
                let mut height = (p.y - start.y).abs();
                if shape.shape_type.is_equilateral() {
                    let side = width.max(height);
                    width = side;
                    height = side;
                }
                shape.x = start.x.min(p.x);
                shape.y = start.y.min(p.y);
                shape.width = width;
                shape.height = height;
                vec![Action::RenderNeeded]
            }
            Gesture::DrawingConnector { connector, .. } => {
                let snap = find_snap(&self.doc, &HashSet::new(), p, metrics, self.config.snap_radius);
                connector.set_endpoint(ConnectorEnd::End, snap.as_ref().map_or(p, |s| s.point));
                self.ui.snap_target = snap.map(|s| (s.point, s.target));
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let p = self.camera.screen_to_canvas(screen);
        let gesture = std::mem::take(&mut self.gesture);
        self.ui.snap_target = None;
        match gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { .. } => {
                self.ui.cursor = self.ui.tool.cursor();
                vec![Action::SetCursor(self.ui.cursor)]
            }
            Gesture::DraggingSelection { .. } | Gesture::Resizing { .. } => {
                vec![Action::HistoryCheckpoint, Action::RenderNeeded]
            }
            Gesture::Rotating { .. } => {
                self.doc.set_selection_rotation(0.0);
                tracing::trace!("rotate gesture ended");
                vec![Action::HistoryCheckpoint, Action::RenderNeeded]
            }
            Gesture::DraggingLineHandle { id, handle } => {
                if let Some(end) = handle.end() {
                    let snap = snap_excluding(&self.doc, &id, p, self.metrics(), self.config.snap_radius);
                    self.attach_end(&id, end, snap);
                }
                vec![Action::HistoryCheckpoint, Action::RenderNeeded]
            }
            Gesture::Marquee { start, end } => {
                self.ui.marquee = None;
                let marquee = BoundingBox::from_corners(start, end);
                let metrics = self.metrics.as_ref();
                self.doc.select_in_marquee(&marquee, metrics, &self.config);
                vec![Action::SelectionChanged, Action::RenderNeeded]
            }
            Gesture::DrawingPath { path } => {
                let el = CanvasElement::new(String::new(), ElementData::Path(path));
                self.finish_commit(el, false)
            }
            Gesture::DrawingShape { shape, .. } => {
                let el = CanvasElement::new(String::new(), ElementData::Shape(shape));
                self.finish_commit(el, true)
            }
            Gesture::DrawingConnector { kind, mut connector } => {
                let metrics = self.metrics.as_ref();
                let snap = find_snap(&self.doc, &HashSet::new(), connector.end(), metrics, self.config.snap_radius);
                if let Some(s) = snap {
                    connector.set_endpoint(ConnectorEnd::End, s.point);
                    connector.connect(ConnectorEnd::End, s.target, s.anchor);
                }
                let (data, select) = if kind == ElementKind::Arrow {
                    (ElementData::Arrow(connector), true)
                } else {
                    (ElementData::Line(connector), false)
                };
                self.finish_commit(CanvasElement::new(String::new(), data), select)
            }
        }
    }

    pub fn on_double_click(&mut self, screen: Point) -> Vec<Action> {
        let p = self.camera.screen_to_canvas(screen);
        match hit_test(p, self.doc.elements(), self.metrics(), self.config.hit_padding) {
            Some(el) if el.kind() == ElementKind::Text => {
                vec![Action::EditTextRequested { id: Some(el.id.clone()), at: p }]
            }
            _ => Vec::new(),
        }
    }

    /// Ctrl/Meta + wheel zooms about the pointer; plain wheel pans.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.ctrl || modifiers.meta {
            if delta.dy < 0.0 {
                self.camera.zoom_in(screen, &self.config);
            } else if delta.dy > 0.0 {
                self.camera.zoom_out(screen, &self.config);
            }
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_delete() && self.doc.has_selection() && self.gesture.is_idle() {
            let removed = self.doc.remove_selected();
            return vec![Action::ElementsDeleted(removed), Action::SelectionChanged, Action::RenderNeeded];
        }
        if key.0 == "Escape" && self.doc.has_selection() {
            self.doc.clear_selection();
            return vec![Action::SelectionChanged, Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Internals ---

    fn select_down(&mut self, p: Point, modifiers: Modifiers) -> Vec<Action> {
        let metrics = self.metrics.as_ref();

        if self.doc.has_selection() {
            if let Some(el) = self.doc.single_selected() {
                if let Some(handle) = el.connector().and_then(|c| hit_test_line_handle(p, c, self.config.line_handle_radius)) {
                    tracing::trace!(id = %el.id, ?handle, "line handle drag started");
                    self.gesture = Gesture::DraggingLineHandle { id: el.id.clone(), handle };
                    return vec![Action::SetCursor(handle.cursor())];
                }
            }

            let frame = self.selection_frame();
            let rotation = self.doc.selection_rotation();
            if let Some(handle) = hit_test_handle(p, frame.as_ref().map(|(b, _)| b), rotation, &self.config) {
                if let Some(live) = self.doc.selection_box(metrics) {
                    self.gesture = if handle == Handle::Rotate {
                        let center = live.center();
                        Gesture::Rotating { center, last_angle: pointer_angle(center, p), initial_box: live }
                    } else {
                        Gesture::Resizing { handle, last: p, bbox: live }
                    };
                    tracing::trace!(?handle, "selection handle drag started");
                    return vec![Action::SetCursor(handle.cursor())];
                }
            }
        }

        let hit = hit_test(p, self.doc.elements(), metrics, self.config.hit_padding).map(|el| el.id.clone());
        let mut actions = Vec::new();
        match hit {
            Some(id) => {
                if modifiers.shift {
                    if self.doc.toggle(&id).is_ok() {
                        self.doc.set_selection_rotation(0.0);
                        actions.push(Action::SelectionChanged);
                    }
                } else if !self.doc.is_selected(&id) && self.doc.select(&id, false).is_ok() {
                    actions.push(Action::SelectionChanged);
                }
                self.gesture = Gesture::DraggingSelection { last: p };
            }
            None => {
                if !modifiers.shift && self.doc.has_selection() {
                    self.doc.clear_selection();
                    actions.push(Action::SelectionChanged);
                }
                self.gesture = Gesture::Marquee { start: p, end: p };
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn connector_down(&mut self, p: Point) -> Vec<Action> {
        let kind = if self.ui.tool == Tool::Arrow { ElementKind::Arrow } else { ElementKind::Line };
        let s = &self.ui.settings;
        let snap = find_snap(&self.doc, &HashSet::new(), p, self.metrics(), self.config.snap_radius);
        let start = snap.as_ref().map_or(p, |snap| snap.point);
        let mut connector = Connector::between(start, start, s.stroke_width, s.stroke_color.clone());
        connector.opacity = s.stroke_opacity;
        connector.style = s.line_style;
        connector.roughness = s.roughness;
        if let Some(snap) = snap {
            connector.connect(ConnectorEnd::Start, snap.target, snap.anchor);
        }
        self.gesture = Gesture::DrawingConnector { kind, connector };
        Vec::new()
    }

    fn hover(&mut self, p: Point) -> Vec<Action> {
        let cursor = if self.ui.tool == Tool::Select {
            self.hover_cursor(p)
        } else {
            self.ui.tool.cursor()
        };
        if cursor == self.ui.cursor {
            return Vec::new();
        }
        self.ui.cursor = cursor;
        vec![Action::SetCursor(cursor)]
    }

    fn hover_cursor(&self, p: Point) -> &'static str {
        let metrics = self.metrics();
        if self.doc.has_selection() {
            if let Some(c) = self.doc.single_selected().and_then(CanvasElement::connector) {
                if let Some(handle) = hit_test_line_handle(p, c, self.config.line_handle_radius) {
                    return handle.cursor();
                }
            }
            let frame = self.selection_frame();
            if let Some(handle) =
                hit_test_handle(p, frame.as_ref().map(|(b, _)| b), self.doc.selection_rotation(), &self.config)
            {
                return handle.cursor();
            }
        }
        if hit_test(p, self.doc.elements(), metrics, self.config.hit_padding).is_some() {
            "move"
        } else {
            Tool::Select.cursor()
        }
    }

    /// Attach `end` of connector `id` to the snap result, or detach it when there is none.
    fn attach_end(&mut self, id: &str, end: ConnectorEnd, snap: Option<Snap>) {
        let Some(c) = self.doc.get_mut(id).and_then(CanvasElement::connector_mut) else {
            return;
        };
        match snap {
            Some(s) => {
                tracing::debug!(connector = %id, target = %s.target, ?end, "endpoint attached");
                c.set_endpoint(end, s.point);
                c.connect(end, s.target, s.anchor);
            }
            None => {
                if c.connected_to(end).is_some() {
                    tracing::debug!(connector = %id, ?end, "endpoint detached");
                }
                c.disconnect(end);
            }
        }
    }

    fn finish_commit(&mut self, element: CanvasElement, select_and_return: bool) -> Vec<Action> {
        let kind = element.kind();
        match self.doc.commit(element, &self.config) {
            Ok(id) => {
                let mut actions = vec![Action::ElementCreated(id.clone()), Action::HistoryCheckpoint];
                if select_and_return {
                    actions.extend(self.set_tool(Tool::Select));
                    if self.doc.select(&id, false).is_ok() {
                        actions.push(Action::SelectionChanged);
                    }
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            Err(e) => {
                tracing::trace!(?kind, error = %e, "drawn element discarded");
                vec![Action::RenderNeeded]
            }
        }
    }
}

fn find_snap(
    doc: &Document,
    exclude: &HashSet<ElementId>,
    p: Point,
    metrics: &dyn TextMetrics,
    snap_radius: f64,
) -> Option<Snap> {
    snap_endpoint(p, doc.elements(), exclude, metrics, snap_radius)
}

fn snap_excluding(doc: &Document, id: &str, p: Point, metrics: &dyn TextMetrics, snap_radius: f64) -> Option<Snap> {
    find_snap(doc, &HashSet::from([id.to_string()]), p, metrics, snap_radius)
}
