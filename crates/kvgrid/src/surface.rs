//! The host widget surface the grid renders into.
//!
//! kvgrid does not draw anything itself. A [`Surface`] implementation wraps
//! whatever toolkit the application uses and supplies the handful of
//! capabilities the grid needs: creating containers, labels and editable
//! text fields, attaching them to and detaching them from the host region,
//! reading back field text and requesting a redraw.
//!
//! Visuals are referred to by [`VisualId`] handles. A backend typically keeps
//! a `SlotMap<VisualId, NativeWidget>` and hands out its keys.

use kvgrid_core::Rect;
use slotmap::new_key_type;

new_key_type! {
    /// A handle to a visual created by a [`Surface`].
    ///
    /// Handles stay valid until the visual is detached. Using a detached
    /// handle is not an error; the surface ignores it.
    pub struct VisualId;
}

/// The kind of visual a surface created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// A framed region that groups other visuals.
    Container,
    /// Static, non-editable text.
    Label,
    /// A single-line editable text field.
    Input,
}

/// Capabilities the grid needs from the host toolkit.
pub trait Surface {
    /// Create a framed container region.
    ///
    /// The container is not shown until it is [attached](Surface::attach).
    fn create_container(&mut self, rect: Rect) -> VisualId;

    /// Create a static text label.
    ///
    /// With `parent` set, the label lives inside that container and goes
    /// away with it. Without a parent it must be attached on its own.
    fn create_label(
        &mut self,
        parent: Option<VisualId>,
        rect: Rect,
        text: &str,
        font_size: u16,
    ) -> VisualId;

    /// Create an editable single-line text field inside `parent`.
    fn create_input(&mut self, parent: VisualId, rect: Rect, value: &str) -> VisualId;

    /// Show a top-level visual on the host surface.
    fn attach(&mut self, id: VisualId);

    /// Hide a visual and remove it from the host surface.
    ///
    /// Detaching a container also discards its children.
    fn detach(&mut self, id: VisualId);

    /// Current text of an input field, or `None` if `id` is not a live input.
    fn input_text(&self, id: VisualId) -> Option<String>;

    /// Ask the host to repaint the grid region.
    fn request_redraw(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn create_container(&mut self, rect: Rect) -> VisualId {
        (**self).create_container(rect)
    }

    fn create_label(
        &mut self,
        parent: Option<VisualId>,
        rect: Rect,
        text: &str,
        font_size: u16,
    ) -> VisualId {
        (**self).create_label(parent, rect, text, font_size)
    }

    fn create_input(&mut self, parent: VisualId, rect: Rect, value: &str) -> VisualId {
        (**self).create_input(parent, rect, value)
    }

    fn attach(&mut self, id: VisualId) {
        (**self).attach(id)
    }

    fn detach(&mut self, id: VisualId) {
        (**self).detach(id)
    }

    fn input_text(&self, id: VisualId) -> Option<String> {
        (**self).input_text(id)
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw()
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn create_container(&mut self, rect: Rect) -> VisualId {
        (**self).create_container(rect)
    }

    fn create_label(
        &mut self,
        parent: Option<VisualId>,
        rect: Rect,
        text: &str,
        font_size: u16,
    ) -> VisualId {
        (**self).create_label(parent, rect, text, font_size)
    }

    fn create_input(&mut self, parent: VisualId, rect: Rect, value: &str) -> VisualId {
        (**self).create_input(parent, rect, value)
    }

    fn attach(&mut self, id: VisualId) {
        (**self).attach(id)
    }

    fn detach(&mut self, id: VisualId) {
        (**self).detach(id)
    }

    fn input_text(&self, id: VisualId) -> Option<String> {
        (**self).input_text(id)
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw()
    }
}
