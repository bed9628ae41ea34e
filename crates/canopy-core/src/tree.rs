//! The typed node tree behind a diagram.
//!
//! A [`NodeTree`] is an arena of [`Node`]s addressed by [`NodeIndex`]. A
//! parent owns the ordered list of its children's indices; each child keeps a
//! non-owning back-reference to its parent. Nodes are created in bulk when a
//! diagram is built and never removed; during interaction only position,
//! expansion and visibility change.
//!
//! # Expansion cascade
//!
//! Visibility is not derived on demand. It is pushed down the tree whenever
//! a node is toggled:
//!
//! - Collapsing a node hides its whole subtree and resets every descendant's
//!   `expanded` flag.
//! - Expanding a node shows its direct children, and keeps descending only
//!   through children that are themselves expanded.
//!
//! ```
//! # use canopy_core::tree::{Node, NodeKind, NodeTree};
//! let mut tree = NodeTree::new(Node::new("root", "Analysis", NodeKind::Root, ()));
//! let root = tree.root();
//! let harm = tree.add_child(root, Node::new("harm", "Harm", NodeKind::Harm, ())).unwrap();
//! let sev = Node::new("sev", "Severity", NodeKind::Detail, ());
//! let severity = tree.add_child(harm, sev).unwrap();
//!
//! tree.toggle_expanded(harm); // collapse
//! assert!(!tree[severity].is_visible());
//!
//! tree.toggle_expanded(harm); // expand again
//! assert!(tree[severity].is_visible());
//! ```

use std::{fmt, ops::Index, str::FromStr};

use indexmap::{IndexMap, map::Entry};
use log::trace;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

/// The closed set of node types.
///
/// The kind only selects colors and default behavior; what a kind means in
/// the host's domain is up to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Component,
    Sequence,
    Hazard,
    Harm,
    Control,
    Detail,
}

impl NodeKind {
    /// All kinds, in declaration order.
    pub const ALL: [NodeKind; 7] = [
        Self::Root,
        Self::Component,
        Self::Sequence,
        Self::Hazard,
        Self::Harm,
        Self::Control,
        Self::Detail,
    ];

    /// Returns the lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Component => "component",
            Self::Sequence => "sequence",
            Self::Hazard => "hazard",
            Self::Harm => "harm",
            Self::Control => "control",
            Self::Detail => "detail",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown node kind `{s}`"))
    }
}

/// Handle to a node inside a [`NodeTree`].
///
/// Indices follow insertion order, which is also the hit-testing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the position of the node in insertion order.
    pub fn position(self) -> usize {
        self.0
    }
}

/// Errors raised while assembling a tree.
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("duplicate node id `{0}`")]
    DuplicateId(Id),

    #[error("unknown parent node #{}", .0.position())]
    UnknownParent(NodeIndex),
}

/// A single diagram node.
///
/// Geometry is kept in model space: `position` is the top-left corner.
#[derive(Debug, Clone)]
pub struct Node<P> {
    id: Id,
    label: String,
    kind: NodeKind,
    position: Point,
    size: Size,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
    level: usize,
    expanded: bool,
    visible: bool,
    payload: P,
    drag_offset: Option<Point>,
}

impl<P> Node<P> {
    /// Creates a detached node: visible, expanded, at the origin with zero size.
    pub fn new(id: impl Into<Id>, label: impl Into<String>, kind: NodeKind, payload: P) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            position: Point::default(),
            size: Size::default(),
            parent: None,
            children: Vec::new(),
            level: 0,
            expanded: true,
            visible: true,
            payload,
            drag_offset: None,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Top-left corner in model space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The node rectangle in model space.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth from the root; the root is level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Expansion state. Leaves report `false` whatever flag they carry.
    pub fn is_expanded(&self) -> bool {
        self.expanded && self.has_children()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    /// Pointer offset from the node's top-left corner recorded at drag start.
    pub fn drag_offset(&self) -> Option<Point> {
        self.drag_offset
    }

    /// Overwrites the node position. Children are not moved.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }
}

/// Arena of nodes with a single root at index 0.
#[derive(Debug, Clone)]
pub struct NodeTree<P> {
    nodes: Vec<Node<P>>,
    ids: IndexMap<Id, NodeIndex>,
}

impl<P> NodeTree<P> {
    /// Creates a tree holding only `root`.
    ///
    /// The root is forced visible, parentless and at level 0.
    pub fn new(mut root: Node<P>) -> Self {
        root.parent = None;
        root.level = 0;
        root.visible = true;
        root.children.clear();

        let mut ids = IndexMap::new();
        ids.insert(root.id, NodeIndex(0));
        Self {
            nodes: vec![root],
            ids,
        }
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `child` to `parent`'s children, taking ownership of it.
    ///
    /// Sets the child's parent and level. Any children the detached node
    /// carried are discarded; attach them through the tree instead.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateId`] when the tree already holds a node
    /// with the child's id, and [`TreeError::UnknownParent`] for an index
    /// from another tree.
    pub fn add_child(
        &mut self,
        parent: NodeIndex,
        mut child: Node<P>,
    ) -> Result<NodeIndex, TreeError> {
        let parent_level = self
            .nodes
            .get(parent.0)
            .map(|node| node.level)
            .ok_or(TreeError::UnknownParent(parent))?;

        let index = NodeIndex(self.nodes.len());
        match self.ids.entry(child.id) {
            Entry::Occupied(_) => return Err(TreeError::DuplicateId(child.id)),
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
        }

        child.parent = Some(parent);
        child.level = parent_level + 1;
        child.children.clear();
        self.nodes.push(child);
        self.nodes[parent.0].children.push(index);

        Ok(index)
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node<P>> {
        self.nodes.get(index.0)
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node<P>> {
        self.nodes.get_mut(index.0)
    }

    /// Finds a node by id.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        let id = Id::lookup(id)?;
        self.ids.get(&id).copied()
    }

    /// Iterates over all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node<P>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// Iterates over visible nodes in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = (NodeIndex, &Node<P>)> {
        self.iter().filter(|(_, node)| node.visible)
    }

    /// Iterates over `(parent, child)` pairs where both ends are visible.
    pub fn visible_edges(&self) -> impl Iterator<Item = (&Node<P>, &Node<P>)> {
        self.visible().filter_map(|(_, child)| {
            let parent = self.nodes.get(child.parent?.0)?;
            parent.visible.then_some((parent, child))
        })
    }

    /// Returns the first visible node, in insertion order, whose rectangle
    /// contains the model-space point.
    pub fn node_at(&self, point: Point) -> Option<NodeIndex> {
        self.visible()
            .find(|(_, node)| node.bounds().contains(point))
            .map(|(index, _)| index)
    }

    /// Bounds enclosing every visible node, or `None` if the only visible
    /// node has no extent.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.visible()
            .map(|(_, node)| node.bounds())
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Moves a node. Children are not moved.
    pub fn move_to(&mut self, index: NodeIndex, position: Point) {
        if let Some(node) = self.nodes.get_mut(index.0) {
            node.move_to(position);
        }
    }

    /// Marks a node as being dragged, remembering the pointer offset.
    pub fn begin_drag(&mut self, index: NodeIndex, offset: Point) {
        if let Some(node) = self.nodes.get_mut(index.0) {
            node.drag_offset = Some(offset);
        }
    }

    /// Clears a node's drag state.
    pub fn end_drag(&mut self, index: NodeIndex) {
        if let Some(node) = self.nodes.get_mut(index.0) {
            node.drag_offset = None;
        }
    }

    /// Flips a node's expansion and runs the visibility cascade.
    ///
    /// Leaves are left untouched. Returns `true` when the node changed.
    pub fn toggle_expanded(&mut self, index: NodeIndex) -> bool {
        let Some(node) = self.nodes.get_mut(index.0) else {
            return false;
        };
        if !node.has_children() {
            return false;
        }

        node.expanded = !node.expanded;
        let expanded = node.expanded;
        trace!(node_id:% = node.id, expanded; "Toggled node");

        if expanded {
            self.show_descendants(index);
        } else {
            self.hide_descendants(index);
        }
        true
    }

    /// Expands every node with children and makes every node visible.
    pub fn expand_all(&mut self) {
        for node in &mut self.nodes {
            node.expanded = node.has_children();
            node.visible = true;
        }
    }

    /// Collapses every node except the root.
    ///
    /// Afterwards only the root and its direct children are visible.
    pub fn collapse_all(&mut self) {
        let root = self.root();
        for node in &mut self.nodes {
            if node.parent.is_none() {
                node.expanded = true;
                node.visible = true;
            } else {
                node.expanded = false;
                node.visible = node.parent == Some(root);
            }
        }
    }

    fn show_descendants(&mut self, index: NodeIndex) {
        let mut stack = self.nodes[index.0].children.clone();
        while let Some(child) = stack.pop() {
            let node = &mut self.nodes[child.0];
            node.visible = true;
            if node.expanded {
                stack.extend_from_slice(&node.children);
            }
        }
    }

    fn hide_descendants(&mut self, index: NodeIndex) {
        let mut stack = self.nodes[index.0].children.clone();
        while let Some(child) = stack.pop() {
            let node = &mut self.nodes[child.0];
            node.visible = false;
            node.expanded = false;
            stack.extend_from_slice(&node.children);
        }
    }
}

impl<P> Index<NodeIndex> for NodeTree<P> {
    type Output = Node<P>;

    /// # Panics
    ///
    /// Panics for an index that does not belong to this tree.
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}
