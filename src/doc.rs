//! Document model: the ordered element list, the selection, and the
//! commit/delete operations that keep connector references consistent.
//!
//! `Document` is the explicit context passed into every core operation.
//! Element order is z-order: later elements draw on top and hit-test first.
//! Selection is a set of ids; an empty selection always has
//! `selection_rotation == 0`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use crate::bounds::{boxes_intersect, selection_bounding_box};
use crate::config::EngineConfig;
use crate::connect::{scrub_connections, scrub_dangling_connections};
use crate::element::{
    CanvasElement, Connector, ConnectorEnd, ElementData, ElementId, ElementKind, FontStyle, LineStyle, Shape, new_element_id,
};
use crate::geometry::BoundingBox;
use crate::handlers;
use crate::metrics::TextMetrics;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocError {
    #[error("element not found: {0}")]
    NotFound(ElementId),
    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),
    #[error("{kind:?} is below the minimum size for commit")]
    BelowMinimumSize { kind: ElementKind },
    #[error("text is empty")]
    EmptyText,
}

/// Elements plus the selection state.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<CanvasElement>,
    selection: HashSet<ElementId>,
    selection_rotation: f64,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all elements with a loaded snapshot. Clears the selection and
    /// any connector reference to an id the snapshot does not contain.
    pub fn load(&mut self, elements: Vec<CanvasElement>) {
        self.elements = elements;
        let cleared = scrub_dangling_connections(&mut self.elements);
        if cleared > 0 {
            tracing::debug!(cleared, "snapshot had dangling connections");
        }
        self.clear_selection();
    }

    // --- Elements ---

    /// All elements in z-order (bottom first).
    #[must_use]
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Mutable access to the element list for the transform and connection passes.
    pub fn elements_mut(&mut self) -> &mut [CanvasElement] {
        &mut self.elements
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CanvasElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append an element on top of the z-order without commit checks.
    /// Connector ends pointing at ids not in the document are detached.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if an element with the same id exists.
    pub fn insert(&mut self, mut element: CanvasElement) -> Result<(), DocError> {
        if self.get(&element.id).is_some() {
            return Err(DocError::DuplicateId(element.id));
        }
        if let Some(connector) = element.connector_mut() {
            for end in [ConnectorEnd::Start, ConnectorEnd::End] {
                let missing = connector.connected_to(end).is_some_and(|target| {
                    self.elements.iter().all(|el| el.id != *target)
                });
                if missing {
                    connector.disconnect(end);
                }
            }
        }
        self.elements.push(element);
        Ok(())
    }

    /// Commit a freshly drawn element: check the tool threshold for its kind,
    /// finalize derived fields, assign an id when `id` is empty, and append it.
    ///
    /// Thresholds: paths need more than one point (the centroid is computed
    /// here), shapes must exceed the minimum size on both axes, lines and
    /// arrows must exceed the minimum length, text must not be blank.
    ///
    /// # Errors
    ///
    /// Returns `BelowMinimumSize`, `EmptyText` or `DuplicateId`.
    pub fn commit(&mut self, mut element: CanvasElement, config: &EngineConfig) -> Result<ElementId, DocError> {
        let kind = element.kind();
        match &mut element.data {
            ElementData::Text(t) => {
                if t.text.trim().is_empty() {
                    return Err(DocError::EmptyText);
                }
            }
            ElementData::Path(p) => {
                if p.points.len() < 2 {
                    return Err(DocError::BelowMinimumSize { kind });
                }
                if let Some(c) = p.centroid() {
                    p.center_x = c.x;
                    p.center_y = c.y;
                }
            }
            ElementData::Shape(s) => {
                if s.width <= config.min_commit_shape_size || s.height <= config.min_commit_shape_size {
                    return Err(DocError::BelowMinimumSize { kind });
                }
            }
            ElementData::Line(c) | ElementData::Arrow(c) => {
                if c.length() <= config.min_commit_connector_length {
                    return Err(DocError::BelowMinimumSize { kind });
                }
            }
        }
        if element.id.is_empty() {
            element.id = new_element_id();
        }
        let id = element.id.clone();
        self.insert(element)?;
        tracing::debug!(%id, ?kind, "element committed");
        Ok(id)
    }

    /// Remove one element, scrubbing connector references to it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id.
    pub fn remove(&mut self, id: &str) -> Result<CanvasElement, DocError> {
        let index = self
            .elements
            .iter()
            .position(|el| el.id == id)
            .ok_or_else(|| DocError::NotFound(id.to_string()))?;
        let removed = self.elements.remove(index);
        let ids = HashSet::from([removed.id.clone()]);
        scrub_connections(&mut self.elements, &ids);
        self.selection.remove(id);
        if self.selection.is_empty() {
            self.selection_rotation = 0.0;
        }
        tracing::debug!(%id, "element removed");
        Ok(removed)
    }

    /// Remove every selected element, scrub connector references to them in
    /// the same step, and clear the selection. Returns the removed ids.
    pub fn remove_selected(&mut self) -> Vec<ElementId> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let removed = std::mem::take(&mut self.selection);
        let mut ids = Vec::with_capacity(removed.len());
        self.elements.retain(|el| {
            let keep = !removed.contains(&el.id);
            if !keep {
                ids.push(el.id.clone());
            }
            keep
        });
        let cleared = scrub_connections(&mut self.elements, &removed);
        self.selection_rotation = 0.0;
        tracing::debug!(removed = ids.len(), cleared, "selection deleted");
        ids
    }

    // --- Selection ---

    /// Selected ids (unordered).
    #[must_use]
    pub fn selection(&self) -> &HashSet<ElementId> {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Accumulated group rotation shown on the selection frame.
    #[must_use]
    pub fn selection_rotation(&self) -> f64 {
        self.selection_rotation
    }

    pub fn set_selection_rotation(&mut self, rotation: f64) {
        self.selection_rotation = if self.selection.is_empty() { 0.0 } else { rotation };
    }

    /// Select `id`, either replacing the selection or adding to it.
    /// Replacing resets the selection rotation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id.
    pub fn select(&mut self, id: &str, add: bool) -> Result<(), DocError> {
        if self.get(id).is_none() {
            return Err(DocError::NotFound(id.to_string()));
        }
        if !add {
            self.selection.clear();
            self.selection_rotation = 0.0;
        }
        self.selection.insert(id.to_string());
        Ok(())
    }

    pub fn deselect(&mut self, id: &str) {
        self.selection.remove(id);
        if self.selection.is_empty() {
            self.selection_rotation = 0.0;
        }
    }

    /// Add `id` to the selection, or remove it if already selected.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id.
    pub fn toggle(&mut self, id: &str) -> Result<(), DocError> {
        if self.is_selected(id) {
            self.deselect(id);
            Ok(())
        } else {
            self.select(id, true)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selection_rotation = 0.0;
    }

    /// Selected elements in z-order.
    pub fn selected(&self) -> impl Iterator<Item = &CanvasElement> {
        self.elements.iter().filter(|el| self.selection.contains(&el.id))
    }

    /// The single selected element, if exactly one is selected.
    #[must_use]
    pub fn single_selected(&self) -> Option<&CanvasElement> {
        if self.selection.len() != 1 {
            return None;
        }
        self.selected().next()
    }

    /// Box enclosing the whole selection, or `None` when nothing selected has a box.
    #[must_use]
    pub fn selection_box(&self, metrics: &dyn TextMetrics) -> Option<BoundingBox> {
        selection_bounding_box(self.selected(), metrics)
    }

    /// Add every element whose box intersects `marquee` to the selection.
    /// Marquees not exceeding the minimum size on either axis select nothing.
    /// Returns how many elements were newly added.
    pub fn select_in_marquee(&mut self, marquee: &BoundingBox, metrics: &dyn TextMetrics, config: &EngineConfig) -> usize {
        if marquee.width <= config.min_marquee_size && marquee.height <= config.min_marquee_size {
            return 0;
        }
        let had_selection = self.has_selection();
        let hits: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|el| handlers::bounding_box(el, metrics).is_some_and(|b| boxes_intersect(marquee, &b)))
            .map(|el| el.id.clone())
            .collect();
        let mut added = 0;
        for id in hits {
            if self.selection.insert(id) {
                added += 1;
            }
        }
        if !had_selection {
            self.selection_rotation = 0.0;
        }
        added
    }

    // --- Style ---
    //
    // Setters apply to selected elements of the kinds that carry the field;
    // other selected kinds are left untouched.

    fn for_each_selected<F>(&mut self, mut apply: F)
    where
        F: FnMut(&mut ElementData),
    {
        let selection = &self.selection;
        for el in self.elements.iter_mut().filter(|el| selection.contains(&el.id)) {
            apply(&mut el.data);
        }
    }

    /// Stroke width of selected paths, lines and arrows.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.for_each_selected(|data| match data {
            ElementData::Path(p) => p.line_width = width,
            ElementData::Line(c) | ElementData::Arrow(c) => c.line_width = width,
            ElementData::Text(_) | ElementData::Shape(_) => {}
        });
    }

    /// Stroke color of selected paths, lines and arrows.
    pub fn set_stroke_color(&mut self, color: &str) {
        self.for_each_selected(|data| match data {
            ElementData::Path(p) => p.color = color.to_string(),
            ElementData::Line(c) | ElementData::Arrow(c) => c.color = color.to_string(),
            ElementData::Text(_) | ElementData::Shape(_) => {}
        });
    }

    /// Stroke opacity of selected paths, lines and arrows.
    pub fn set_stroke_opacity(&mut self, opacity: f64) {
        self.for_each_selected(|data| match data {
            ElementData::Path(p) => p.opacity = Some(opacity),
            ElementData::Line(c) | ElementData::Arrow(c) => c.opacity = Some(opacity),
            ElementData::Text(_) | ElementData::Shape(_) => {}
        });
    }

    /// Width of selected connectors of `kind` only (`Line` or `Arrow`).
    pub fn set_connector_width(&mut self, kind: ElementKind, width: f64) {
        self.for_each_connector_of(kind, |c| c.line_width = width);
    }

    pub fn set_connector_color(&mut self, kind: ElementKind, color: &str) {
        self.for_each_connector_of(kind, |c| c.color = color.to_string());
    }

    pub fn set_connector_opacity(&mut self, kind: ElementKind, opacity: f64) {
        self.for_each_connector_of(kind, |c| c.opacity = Some(opacity));
    }

    /// Dash pattern of selected connectors of `kind`.
    pub fn set_connector_style(&mut self, kind: ElementKind, style: LineStyle) {
        self.for_each_connector_of(kind, |c| c.style = style);
    }

    /// Hand-drawn jitter of selected connectors of `kind`.
    pub fn set_connector_roughness(&mut self, kind: ElementKind, roughness: f64) {
        self.for_each_connector_of(kind, |c| c.roughness = roughness);
    }

    fn for_each_connector_of<F>(&mut self, kind: ElementKind, mut apply: F)
    where
        F: FnMut(&mut Connector),
    {
        self.for_each_selected(|data| {
            if data.kind() != kind {
                return;
            }
            if let ElementData::Line(c) | ElementData::Arrow(c) = data {
                apply(c);
            }
        });
    }

    /// Font size of selected text blocks.
    pub fn set_font_size(&mut self, size: f64) {
        self.for_each_selected(|data| {
            if let ElementData::Text(t) = data {
                t.font_size = size;
            }
        });
    }

    pub fn set_font_style(&mut self, style: FontStyle) {
        self.for_each_selected(|data| {
            if let ElementData::Text(t) = data {
                t.font_style = style;
            }
        });
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.for_each_selected(|data| {
            if let ElementData::Text(t) = data {
                t.font_family = Some(family.to_string());
            }
        });
    }

    pub fn set_text_color(&mut self, color: &str) {
        self.for_each_selected(|data| {
            if let ElementData::Text(t) = data {
                t.color = color.to_string();
            }
        });
    }

    pub fn set_text_opacity(&mut self, opacity: f64) {
        self.for_each_selected(|data| {
            if let ElementData::Text(t) = data {
                t.opacity = Some(opacity);
            }
        });
    }

    /// Fill color of selected shapes.
    pub fn set_fill_color(&mut self, color: &str) {
        self.for_each_shape(|s| s.fill_color = color.to_string());
    }

    pub fn set_fill_opacity(&mut self, opacity: f64) {
        self.for_each_shape(|s| s.fill_opacity = Some(opacity));
    }

    /// Outline color of selected shapes.
    pub fn set_shape_stroke_color(&mut self, color: &str) {
        self.for_each_shape(|s| s.stroke_color = color.to_string());
    }

    pub fn set_shape_stroke_opacity(&mut self, opacity: f64) {
        self.for_each_shape(|s| s.stroke_opacity = Some(opacity));
    }

    pub fn set_shape_stroke_width(&mut self, width: f64) {
        self.for_each_shape(|s| s.stroke_width = width);
    }

    pub fn set_border_radius(&mut self, radius: f64) {
        self.for_each_shape(|s| s.border_radius = radius);
    }

    fn for_each_shape<F>(&mut self, mut apply: F)
    where
        F: FnMut(&mut Shape),
    {
        self.for_each_selected(|data| {
            if let ElementData::Shape(s) = data {
                apply(s);
            }
        });
    }
}
