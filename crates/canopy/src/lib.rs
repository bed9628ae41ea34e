//! Canopy - interactive hierarchical diagrams.
//!
//! Canopy renders a tree of typed nodes as a node-link diagram and lets the
//! user explore it: nodes expand and collapse through a toggle glyph, can be
//! dragged anywhere, and the whole canvas pans and zooms. Clicking a node
//! reports it back to the host through a selection callback.
//!
//! The host describes its data as a forest of [`Record`]s; what those records
//! mean is entirely up to the host. The [`Diagram`] facade owns everything
//! else.
//!
//! # Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use canopy::{
//!     Diagram, NodeKind, Record,
//!     config::AppConfig,
//!     interaction::{PointerButton, PointerEvent},
//! };
//!
//! let mut diagram = Diagram::new(AppConfig::default()).unwrap();
//! diagram
//!     .build(vec![
//!         Record::new("pump", "Pump", NodeKind::Component, ()).with_child(
//!             Record::new("harm", "Harm", NodeKind::Harm, ())
//!                 .collapsed()
//!                 .with_child(Record::new("sev", "Severity: 4", NodeKind::Detail, ())),
//!         ),
//!     ])
//!     .unwrap();
//!
//! let selected = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&selected);
//! diagram.on_node_selected(move |node| *sink.borrow_mut() = Some(node.label.clone()));
//!
//! // Press on the body of "Pump"
//! let pump = diagram.node("pump").unwrap();
//! let press = diagram.viewport().to_screen(pump.bounds().center());
//! let _ = diagram.handle_event(PointerEvent::Down {
//!     position: press,
//!     button: PointerButton::Primary,
//! });
//! assert_eq!(selected.borrow().as_deref(), Some("Pump"));
//!
//! assert!(diagram.toggle("harm"));
//! assert!(diagram.node("sev").unwrap().is_visible());
//!
//! let svg = diagram.render_svg();
//! assert!(svg.contains("Severity: 4"));
//! ```

pub mod config;
pub mod interaction;
pub mod layout;
pub mod record;
pub mod scene;
pub mod selection;

mod error;

pub use canopy_core::{color, draw, geometry, identifier, tree, tree::NodeKind, viewport};

pub use error::CanopyError;
pub use record::Record;

use std::path::Path;

use log::{debug, info};

use canopy_core::{
    draw::{Canvas, SvgCanvas},
    geometry::{Bounds, Size},
    tree::{Node, NodeIndex, NodeTree},
    viewport::Viewport,
};

use config::AppConfig;
use interaction::{InteractionController, InteractionState, InteractionTarget, PointerEvent, Update};
use layout::LayoutBuilder;
use scene::{SceneRenderer, Theme};
use selection::{NodeSnapshot, SelectionChannel};

/// An interactive diagram: the node tree plus its viewport, selection and
/// pointer state.
///
/// `P` is the host's opaque per-node payload. It is cloned into the tree on
/// every build and into each selection snapshot. The synthetic root carries
/// `P::default()`.
#[derive(Debug)]
pub struct Diagram<P = ()> {
    config: AppConfig,
    theme: Theme,
    records: Vec<Record<P>>,
    tree: NodeTree<P>,
    viewport: Viewport,
    selected: Option<NodeIndex>,
    controller: InteractionController,
    selection: SelectionChannel<P>,
}

impl<P: Clone + Default> Diagram<P> {
    /// Creates an empty diagram holding only the synthetic root.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Config`] if a style color does not parse or
    /// the viewport settings are out of range.
    pub fn new(config: AppConfig) -> Result<Self, CanopyError> {
        let theme = Theme::new(config.style())?;
        let viewport = config.viewport().to_viewport()?;
        let tree = LayoutBuilder::new(config.layout()).build(&[])?;
        let controller = InteractionController::new(theme.glyph());

        Ok(Self {
            config,
            theme,
            records: Vec::new(),
            tree,
            viewport,
            selected: None,
            controller,
            selection: SelectionChannel::new(),
        })
    }

    /// Replaces the diagram content with a freshly laid-out tree built from
    /// `records`.
    ///
    /// Selection and any gesture in progress are dropped; the viewport is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Graph`] if two records share an id. The
    /// previous content is left untouched in that case.
    pub fn build(&mut self, records: Vec<Record<P>>) -> Result<(), CanopyError> {
        let count: usize = records.iter().map(Record::count).sum();
        info!(records = count; "Building diagram");

        self.tree = LayoutBuilder::new(self.config.layout()).build(&records)?;
        self.records = records;
        self.selected = None;
        self.controller.reset();
        Ok(())
    }

    /// Discards manual positions, expansion changes and selection by
    /// rebuilding from the last records.
    pub fn refresh(&mut self) -> Result<(), CanopyError> {
        info!("Refreshing diagram");
        self.build(self.records.clone())
    }

    /// Registers the selection callback, replacing any previous one.
    pub fn on_node_selected(&mut self, callback: impl FnMut(&NodeSnapshot<P>) + 'static) {
        self.selection.subscribe(callback);
    }

    /// Feeds one pointer event, in surface pixels, to the interaction
    /// controller.
    pub fn handle_event(&mut self, event: PointerEvent) -> Update {
        self.controller.handle(
            event,
            InteractionTarget {
                tree: &mut self.tree,
                viewport: &mut self.viewport,
                selected: &mut self.selected,
                selection: &mut self.selection,
            },
        )
    }

    /// Toggles the node with `id`, as a glyph click would.
    ///
    /// Returns `false` for unknown ids, leaves and hidden nodes, which have
    /// no glyph to click.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(index) = self.tree.find(id) else {
            debug!(node_id = id; "Toggle of unknown node ignored");
            return false;
        };
        if !self.tree[index].is_visible() {
            debug!(node_id = id; "Toggle of hidden node ignored");
            return false;
        }

        let changed = self.tree.toggle_expanded(index);
        self.release_hidden_drag();
        changed
    }

    /// Selects the node with `id` and notifies the selection callback,
    /// without starting a drag.
    ///
    /// Returns `false` for unknown ids.
    pub fn activate(&mut self, id: &str) -> bool {
        let Some(index) = self.tree.find(id) else {
            debug!(node_id = id; "Activation of unknown node ignored");
            return false;
        };
        self.selected = Some(index);
        self.selection.emit(&self.tree[index]);
        true
    }

    /// Expands every node.
    pub fn expand_all(&mut self) {
        debug!("Expanding all nodes");
        self.tree.expand_all();
    }

    /// Collapses every node below the root.
    pub fn collapse_all(&mut self) {
        debug!("Collapsing all nodes");
        self.tree.collapse_all();
        self.release_hidden_drag();
    }

    /// Restores the default zoom and pan.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Ends a drag whose node was just hidden, so later pointer moves cannot
    /// reposition an invisible node.
    fn release_hidden_drag(&mut self) {
        let InteractionState::Dragging(index) = self.controller.state() else {
            return;
        };
        if !self.tree[index].is_visible() {
            debug!(node_id:% = self.tree[index].id(); "Drag cancelled on hidden node");
            self.tree.end_drag(index);
            self.controller.reset();
        }
    }
}

impl<P> Diagram<P> {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn tree(&self) -> &NodeTree<P> {
        &self.tree
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The records the current tree was built from.
    pub fn records(&self) -> &[Record<P>] {
        &self.records
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node<P>> {
        self.tree.find(id).map(|index| &self.tree[index])
    }

    /// The currently selected node, if any.
    pub fn selected(&self) -> Option<&Node<P>> {
        self.selected.map(|index| &self.tree[index])
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    /// Model-space bounds of all visible nodes.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.tree.content_bounds()
    }

    /// Size of the rendering surface in pixels.
    pub fn surface_size(&self) -> Size {
        Size::new(self.config.viewport().width(), self.config.viewport().height())
    }

    /// Draws the current state onto `canvas`.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        SceneRenderer::new(&self.theme).render(canvas, &self.tree, &self.viewport, self.selected);
    }

    /// Renders the current state to an SVG document string.
    pub fn render_svg(&self) -> String {
        self.svg_canvas().to_svg_string()
    }

    /// Renders the current state and writes it to `path` as SVG.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Export`] if the file cannot be written.
    pub fn export_svg(&self, path: impl AsRef<Path>) -> Result<(), CanopyError> {
        let path = path.as_ref();
        let document = self.svg_canvas().to_document();
        svg::save(path, &document).map_err(|err| {
            CanopyError::Export(format!("failed to write `{}`: {err}", path.display()))
        })?;

        info!(path:? = path; "SVG exported");
        Ok(())
    }

    fn svg_canvas(&self) -> SvgCanvas {
        let mut canvas = SvgCanvas::new(self.surface_size());
        self.render(&mut canvas);
        canvas
    }
}
