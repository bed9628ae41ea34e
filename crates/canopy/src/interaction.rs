//! Pointer and wheel handling.
//!
//! The [`InteractionController`] is a small state machine that turns raw
//! pointer events, given in surface pixels, into mutations of the node tree,
//! the viewport and the selection:
//!
//! ```text
//!                primary down on glyph: toggle
//!              +-------+
//!              |       v
//!            +-----------+  primary down on body   +------------------+
//!            |           | ----------------------> |                  |
//!            |   Idle    |                         | Dragging(node)   | <-- move: reposition
//!            |           | <---------------------- |                  |
//!            +-----------+          up             +------------------+
//!              |       ^
//!  secondary   |       |  up
//!  down        v       |
//!            +-----------+
//!            |  Panning  | <-- move: pan
//!            +-----------+
//! ```
//!
//! Wheel events zoom in any state. Every other combination is ignored, so
//! handling never fails.

use log::{debug, trace};

use canopy_core::{
    geometry::Point,
    tree::{NodeIndex, NodeTree},
    viewport::Viewport,
};

use crate::{scene::ToggleGlyph, selection::SelectionChannel};

/// Mouse button, or the equivalent touch/pen contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Selects, drags and toggles nodes.
    Primary,
    /// Pans the canvas.
    Secondary,
}

/// Input event in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point, button: PointerButton },
    Move { position: Point },
    Up { position: Point, button: PointerButton },
    /// Positive deltas zoom in, negative deltas zoom out.
    Wheel { delta: f32 },
}

/// Whether handling an event changed anything visible.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    Redraw,
    Unchanged,
}

impl Update {
    pub fn needs_redraw(self) -> bool {
        self == Self::Redraw
    }
}

/// Current gesture of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A node is following the pointer.
    Dragging(NodeIndex),
    /// The canvas is following the pointer; `last` is the previous raw
    /// pointer position.
    Panning { last: Point },
}

/// Everything an event may mutate, borrowed from the owning diagram.
#[derive(Debug)]
pub struct InteractionTarget<'a, P> {
    pub tree: &'a mut NodeTree<P>,
    pub viewport: &'a mut Viewport,
    pub selected: &'a mut Option<NodeIndex>,
    pub selection: &'a mut SelectionChannel<P>,
}

/// The pointer state machine.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    glyph: ToggleGlyph,
}

impl InteractionController {
    /// Creates an idle controller using `glyph` to recognize toggle clicks.
    pub fn new(glyph: ToggleGlyph) -> Self {
        Self {
            state: InteractionState::Idle,
            glyph,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Abandons any gesture in progress.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Applies one event and reports whether a redraw is due.
    pub fn handle<P: Clone>(
        &mut self,
        event: PointerEvent,
        target: InteractionTarget<'_, P>,
    ) -> Update {
        trace!(event:?, state:? = self.state; "Pointer event");

        match (self.state, event) {
            (_, PointerEvent::Wheel { delta }) => Self::zoom(target.viewport, delta),
            (
                InteractionState::Idle,
                PointerEvent::Down {
                    position,
                    button: PointerButton::Primary,
                },
            ) => self.primary_down(position, target),
            (
                InteractionState::Idle,
                PointerEvent::Down {
                    position,
                    button: PointerButton::Secondary,
                },
            ) => {
                debug!(x = position.x(), y = position.y(); "Panning started");
                self.state = InteractionState::Panning { last: position };
                Update::Unchanged
            }
            (InteractionState::Dragging(index), PointerEvent::Move { position }) => {
                let model = target.viewport.to_model(position);
                let offset = target.tree[index].drag_offset().unwrap_or_default();
                target.tree.move_to(index, model.sub_point(offset));
                Update::Redraw
            }
            (InteractionState::Panning { last }, PointerEvent::Move { position }) => {
                target.viewport.pan_by(position.sub_point(last));
                self.state = InteractionState::Panning { last: position };
                Update::Redraw
            }
            (InteractionState::Dragging(index), PointerEvent::Up { .. }) => {
                target.tree.end_drag(index);
                self.state = InteractionState::Idle;
                debug!(node_id:% = target.tree[index].id(); "Drag finished");
                Update::Redraw
            }
            (InteractionState::Panning { .. }, PointerEvent::Up { .. }) => {
                self.state = InteractionState::Idle;
                debug!(pan:? = target.viewport.pan(); "Panning finished");
                Update::Unchanged
            }
            _ => Update::Unchanged,
        }
    }

    fn primary_down<P: Clone>(
        &mut self,
        position: Point,
        target: InteractionTarget<'_, P>,
    ) -> Update {
        let model = target.viewport.to_model(position);

        let Some(index) = target.tree.node_at(model) else {
            if target.selected.take().is_some() {
                debug!("Selection cleared");
            }
            return Update::Redraw;
        };

        let node = &target.tree[index];
        if node.has_children() && self.glyph.contains(node.bounds(), model) {
            target.tree.toggle_expanded(index);
            return Update::Redraw;
        }

        let offset = model.sub_point(node.position());
        target.tree.begin_drag(index, offset);
        *target.selected = Some(index);
        target.selection.emit(&target.tree[index]);
        self.state = InteractionState::Dragging(index);
        Update::Redraw
    }

    fn zoom(viewport: &mut Viewport, delta: f32) -> Update {
        if delta > 0.0 {
            viewport.zoom_in();
        } else if delta < 0.0 {
            viewport.zoom_out();
        } else {
            return Update::Unchanged;
        }
        debug!(zoom = viewport.zoom(); "Zoom changed");
        Update::Redraw
    }
}
