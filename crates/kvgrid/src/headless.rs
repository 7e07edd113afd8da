//! An in-memory [`Surface`] that records what the grid asks for.
//!
//! `HeadlessSurface` needs no display, which makes it the natural backend for
//! tests and for exercising a grid from scripts. User typing is simulated
//! with [`HeadlessSurface::set_input_text`].
//!
//! ```
//! use kvgrid::{HeadlessSurface, KeyValueGrid, Rect};
//!
//! let mut grid = KeyValueGrid::new(HeadlessSurface::new(), Rect::new(0, 0, 400, 300));
//! grid.add("Settings", "Theme", "Dark");
//!
//! let field = grid.bindings().get("Settings").unwrap().inputs[0];
//! grid.surface_mut().set_input_text(field, "Light");
//! assert_eq!(grid.get_data().value("Settings", "Theme"), Some("Light"));
//! ```

use kvgrid_core::Rect;
use slotmap::SlotMap;

use crate::surface::{Surface, VisualId, VisualKind};

/// A visual recorded by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visual {
    pub kind: VisualKind,
    pub parent: Option<VisualId>,
    pub rect: Rect,
    /// Label text or current input text.
    pub text: String,
    pub font_size: Option<u16>,
    /// Whether the visual was attached to the host as a top-level visual.
    pub attached: bool,
}

/// A surface that keeps every live visual in an arena.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    visuals: SlotMap<VisualId, Visual>,
    redraws: usize,
}

impl HeadlessSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live visual.
    pub fn visual(&self, id: VisualId) -> Option<&Visual> {
        self.visuals.get(id)
    }

    /// Number of live visuals, attached or not.
    pub fn live_count(&self) -> usize {
        self.visuals.len()
    }

    /// Number of live visuals of the given kind.
    pub fn count_of(&self, kind: VisualKind) -> usize {
        self.visuals.values().filter(|v| v.kind == kind).count()
    }

    /// Handles of top-level visuals currently attached to the host.
    pub fn attached(&self) -> Vec<VisualId> {
        self.visuals
            .iter()
            .filter(|(_, v)| v.attached)
            .map(|(id, _)| id)
            .collect()
    }

    /// Text of every live label, in no particular order.
    pub fn label_texts(&self) -> Vec<&str> {
        self.visuals
            .values()
            .filter(|v| v.kind == VisualKind::Label)
            .map(|v| v.text.as_str())
            .collect()
    }

    /// Every live input field with its current text, in no particular order.
    pub fn inputs_with_text(&self) -> Vec<(VisualId, &str)> {
        self.visuals
            .iter()
            .filter(|(_, v)| v.kind == VisualKind::Input)
            .map(|(id, v)| (id, v.text.as_str()))
            .collect()
    }

    /// How many times a redraw was requested.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Simulate the user typing into an input field.
    ///
    /// Returns false if `id` is not a live input.
    pub fn set_input_text(&mut self, id: VisualId, text: impl Into<String>) -> bool {
        match self.visuals.get_mut(id) {
            Some(visual) if visual.kind == VisualKind::Input => {
                visual.text = text.into();
                true
            }
            _ => false,
        }
    }

    fn insert(
        &mut self,
        kind: VisualKind,
        parent: Option<VisualId>,
        rect: Rect,
        text: &str,
        font_size: Option<u16>,
    ) -> VisualId {
        self.visuals.insert(Visual {
            kind,
            parent,
            rect,
            text: text.to_string(),
            font_size,
            attached: false,
        })
    }
}

impl Surface for HeadlessSurface {
    fn create_container(&mut self, rect: Rect) -> VisualId {
        self.insert(VisualKind::Container, None, rect, "", None)
    }

    fn create_label(
        &mut self,
        parent: Option<VisualId>,
        rect: Rect,
        text: &str,
        font_size: u16,
    ) -> VisualId {
        self.insert(VisualKind::Label, parent, rect, text, Some(font_size))
    }

    fn create_input(&mut self, parent: VisualId, rect: Rect, value: &str) -> VisualId {
        self.insert(VisualKind::Input, Some(parent), rect, value, None)
    }

    fn attach(&mut self, id: VisualId) {
        if let Some(visual) = self.visuals.get_mut(id) {
            visual.attached = true;
        }
    }

    fn detach(&mut self, id: VisualId) {
        if self.visuals.remove(id).is_none() {
            return;
        }
        let children: Vec<VisualId> = self
            .visuals
            .iter()
            .filter(|(_, v)| v.parent == Some(id))
            .map(|(child, _)| child)
            .collect();
        for child in children {
            self.detach(child);
        }
    }

    fn input_text(&self, id: VisualId) -> Option<String> {
        self.visuals
            .get(id)
            .filter(|v| v.kind == VisualKind::Input)
            .map(|v| v.text.clone())
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detach_container_drops_children() {
        let mut surface = HeadlessSurface::new();
        let frame = surface.create_container(Rect::new(0, 0, 100, 50));
        let key = surface.create_label(Some(frame), Rect::new(5, 5, 40, 20), "Key", 12);
        let input = surface.create_input(frame, Rect::new(50, 5, 40, 20), "v");
        let title = surface.create_label(None, Rect::new(5, -5, 40, 20), "Title", 10);
        surface.attach(frame);
        surface.attach(title);
        assert_eq!(surface.live_count(), 4);

        surface.detach(frame);
        assert!(surface.visual(key).is_none());
        assert!(surface.input_text(input).is_none());
        assert_eq!(surface.attached(), vec![title]);
    }

    #[test]
    fn test_detach_twice_is_harmless() {
        let mut surface = HeadlessSurface::new();
        let frame = surface.create_container(Rect::ZERO);
        surface.detach(frame);
        surface.detach(frame);
        assert_eq!(surface.live_count(), 0);
    }

    #[test]
    fn test_set_input_text_only_on_inputs() {
        let mut surface = HeadlessSurface::new();
        let frame = surface.create_container(Rect::ZERO);
        let label = surface.create_label(Some(frame), Rect::ZERO, "Key", 12);
        let input = surface.create_input(frame, Rect::ZERO, "old");

        assert!(!surface.set_input_text(label, "nope"));
        assert!(surface.set_input_text(input, "new"));
        assert_eq!(surface.input_text(input).as_deref(), Some("new"));
        assert_eq!(surface.input_text(label), None);
    }

    #[test]
    fn test_inputs_with_text_lists_live_inputs() {
        let mut surface = HeadlessSurface::new();
        let frame = surface.create_container(Rect::ZERO);
        surface.create_label(Some(frame), Rect::ZERO, "Key", 12);
        let first = surface.create_input(frame, Rect::ZERO, "one");
        let second = surface.create_input(frame, Rect::ZERO, "two");
        surface.set_input_text(second, "edited");

        let mut inputs = surface.inputs_with_text();
        inputs.sort_by_key(|&(_, text)| text);
        assert_eq!(inputs, vec![(second, "edited"), (first, "one")]);

        surface.detach(frame);
        assert!(surface.inputs_with_text().is_empty());
    }

    #[test]
    fn test_boxed_dyn_surface() {
        let mut boxed: Box<dyn Surface> = Box::new(HeadlessSurface::new());
        let frame = boxed.create_container(Rect::new(0, 0, 10, 10));
        let input = boxed.create_input(frame, Rect::ZERO, "value");
        boxed.attach(frame);
        boxed.request_redraw();
        assert_eq!(boxed.input_text(input).as_deref(), Some("value"));
        boxed.detach(frame);
        assert_eq!(boxed.input_text(input), None);
    }

    #[test]
    fn test_redraw_counter() {
        let mut surface = HeadlessSurface::new();
        surface.request_redraw();
        surface.request_redraw();
        assert_eq!(surface.redraw_count(), 2);
    }
}
