//! Initial placement of nodes.
//!
//! The layout is a simple layered tree: every level is offset from its
//! parent by a fixed distance along the flow axis, and each sibling group is
//! centered on its parent along the cross axis. Siblings of different parents
//! may overlap; overlap avoidance is left to the user dragging nodes apart.
//!
//! The result depends only on the record hierarchy, sibling order and the
//! [`LayoutConfig`] constants.

use log::{debug, info};

use canopy_core::{
    geometry::{Point, Size},
    tree::{Node, NodeIndex, NodeKind, NodeTree},
};

use crate::{
    CanopyError,
    config::{LayoutConfig, LayoutDirection},
    record::Record,
};

/// Builds a positioned [`NodeTree`] from a record forest.
///
/// # Examples
///
/// ```
/// # use canopy::{config::LayoutConfig, layout::LayoutBuilder, Record, NodeKind};
/// let config = LayoutConfig::default();
/// let records = vec![Record::new("pump", "Pump", NodeKind::Component, ())];
///
/// let tree = LayoutBuilder::new(&config).build(&records).unwrap();
/// let root = &tree[tree.root()];
/// assert_eq!(root.position().x(), config.margin());
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LayoutBuilder<'a> {
    config: &'a LayoutConfig,
}

impl<'a> LayoutBuilder<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Creates the synthetic root, attaches the records beneath it and
    /// assigns every node its initial geometry, expansion and visibility.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Graph`] if two records (or a record and the
    /// synthetic root) share an id.
    pub fn build<P: Clone + Default>(
        &self,
        records: &[Record<P>],
    ) -> Result<NodeTree<P>, CanopyError> {
        let margin = self.config.margin();
        let root = Node::new(
            self.config.root_id(),
            self.config.root_label(),
            NodeKind::Root,
            P::default(),
        )
        .with_position(Point::new(margin, margin))
        .with_size(self.node_size());

        let mut tree = NodeTree::new(root);
        let root = tree.root();
        self.place_children(&mut tree, root, true, records)?;

        info!(nodes = tree.len(), direction:? = self.config.direction(); "Layout complete");
        Ok(tree)
    }

    fn node_size(&self) -> Size {
        Size::new(self.config.node_width(), self.config.node_height())
    }

    /// Places `records` as children of `parent`. `open` is whether the
    /// parent is both visible and expanded.
    fn place_children<P: Clone>(
        &self,
        tree: &mut NodeTree<P>,
        parent: NodeIndex,
        open: bool,
        records: &[Record<P>],
    ) -> Result<(), CanopyError> {
        if records.is_empty() {
            return Ok(());
        }

        let parent_position = tree[parent].position();
        let size = self.node_size();
        let count = records.len() as f32;

        for (i, record) in records.iter().enumerate() {
            let offset = i as f32 - (count - 1.0) / 2.0;
            let position = self.child_position(parent_position, offset);
            let payload = record.payload().clone();
            let node = Node::new(record.id(), record.label(), record.kind(), payload)
                .with_position(position)
                .with_size(size)
                .with_expanded(!record.is_collapsed())
                .with_visible(open);

            let index = tree.add_child(parent, node)?;
            debug!(
                node_id = record.id(),
                x = position.x(),
                y = position.y(),
                visible = open;
                "Placed node"
            );

            self.place_children(tree, index, open && !record.is_collapsed(), record.children())?;
        }

        Ok(())
    }

    /// Top-left corner of a child whose center sits `offset` sibling slots
    /// away from the parent's center on the cross axis.
    fn child_position(&self, parent: Point, offset: f32) -> Point {
        let config = self.config;
        let (width, height) = (config.node_width(), config.node_height());

        match config.direction() {
            LayoutDirection::LeftToRight => {
                let x = parent.x() + width + config.level_spacing();
                let step = height + config.sibling_spacing();
                let center_y = parent.y() + height / 2.0 + offset * step;
                Point::new(x, center_y - height / 2.0)
            }
            LayoutDirection::TopToBottom => {
                let y = parent.y() + height + config.level_spacing();
                let step = width + config.sibling_spacing();
                let center_x = parent.x() + width / 2.0 + offset * step;
                Point::new(center_x - width / 2.0, y)
            }
        }
    }
}
