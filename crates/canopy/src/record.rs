//! Host-supplied domain records.
//!
//! A [`Record`] is the only shape the engine requires from the host: an id, a
//! label, a kind, an opaque payload and nested children. How records are
//! extracted from business data is up to the host's adapter.

use canopy_core::tree::NodeKind;

/// One entry of the record forest passed to [`Diagram::build`](crate::Diagram::build).
///
/// # Examples
///
/// ```
/// # use canopy::{Record, NodeKind};
/// let harm = Record::new("harm-1", "Harm", NodeKind::Harm, ())
///     .collapsed()
///     .with_child(Record::new("sev-1", "Severity: 4", NodeKind::Detail, ()));
///
/// assert!(harm.is_collapsed());
/// assert_eq!(harm.children().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record<P> {
    id: String,
    label: String,
    kind: NodeKind,
    payload: P,
    children: Vec<Record<P>>,
    collapsed: bool,
}

impl<P> Record<P> {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: NodeKind,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            payload,
            children: Vec::new(),
            collapsed: false,
        }
    }

    /// Appends a child record.
    pub fn with_child(mut self, child: Record<P>) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child records in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Record<P>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Marks this record as a composite whose children start hidden.
    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
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

    pub fn children(&self) -> &[Record<P>] {
        &self.children
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Number of records in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Record::count).sum::<usize>()
    }
}
