//! One-way notification of node selection to the host.

use std::fmt;

use log::debug;

use canopy_core::{
    identifier::Id,
    tree::{Node, NodeKind},
};

/// Read-only copy of a selected node's public fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot<P> {
    pub id: Id,
    pub label: String,
    pub kind: NodeKind,
    pub payload: P,
}

impl<P: Clone> NodeSnapshot<P> {
    pub fn from_node(node: &Node<P>) -> Self {
        Self {
            id: node.id(),
            label: node.label().to_string(),
            kind: node.kind(),
            payload: node.payload().clone(),
        }
    }
}

type Callback<P> = Box<dyn FnMut(&NodeSnapshot<P>)>;

/// Holds at most one host callback for selection events.
///
/// # Examples
///
/// ```
/// # use std::{cell::RefCell, rc::Rc};
/// # use canopy::selection::SelectionChannel;
/// # use canopy_core::tree::{Node, NodeKind};
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut channel = SelectionChannel::new();
///
/// let sink = Rc::clone(&seen);
/// channel.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.label.clone()));
///
/// channel.emit(&Node::new("harm-1", "Harm", NodeKind::Harm, ()));
/// assert_eq!(*seen.borrow(), vec!["Harm".to_string()]);
/// ```
pub struct SelectionChannel<P> {
    callback: Option<Callback<P>>,
}

impl<P> Default for SelectionChannel<P> {
    fn default() -> Self {
        Self { callback: None }
    }
}

impl<P> fmt::Debug for SelectionChannel<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionChannel")
            .field("subscribed", &self.callback.is_some())
            .finish()
    }
}

impl<P: Clone> SelectionChannel<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback`, replacing any previous one.
    pub fn subscribe(&mut self, callback: impl FnMut(&NodeSnapshot<P>) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Removes the registered callback, if any.
    pub fn unsubscribe(&mut self) {
        self.callback = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.callback.is_some()
    }

    /// Sends a snapshot of `node` to the registered callback.
    pub fn emit(&mut self, node: &Node<P>) {
        debug!(node_id:% = node.id(), kind:% = node.kind(); "Node selected");
        if let Some(callback) = self.callback.as_mut() {
            callback(&NodeSnapshot::from_node(node));
        }
    }
}
