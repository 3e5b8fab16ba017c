#![forbid(unsafe_code)]

//! What is being dragged.
//!
//! A payload is one of three shapes:
//!
//! | Variant | Source | Default effect |
//! |---------|--------|----------------|
//! | [`DragPayload::ExistingNodes`] | nodes already in the document | move |
//! | [`DragPayload::NewNodeData`] | a component palette | copy (insert) |
//! | [`DragPayload::Opaque`] | foreign data (files, text) | never dropped on the tree |
//!
//! Payloads are shared between the controller and listeners through `Rc`
//! and never mutated after boost.

use crate::document::{Document, NodeId};

/// Description of a node that does not exist yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub component_name: String,
    /// Human-readable label for drag previews.
    pub title: Option<String>,
}

impl NodeDescriptor {
    #[must_use]
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Data carried during a drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPayload {
    /// Ordered, non-empty list of nodes being moved (or copied).
    ExistingNodes { nodes: Vec<NodeId> },
    /// Components to be created at the drop location.
    NewNodeData { data: Vec<NodeDescriptor> },
    /// Anything else, identified by a MIME-like kind.
    Opaque { kind: String, data: Vec<u8> },
}

impl DragPayload {
    /// Payload of existing nodes.
    #[must_use]
    pub fn nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self::ExistingNodes {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Payload of new component data.
    #[must_use]
    pub fn new_data(data: impl IntoIterator<Item = NodeDescriptor>) -> Self {
        Self::NewNodeData {
            data: data.into_iter().collect(),
        }
    }

    /// Payload of foreign data.
    #[must_use]
    pub fn opaque(kind: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Opaque {
            kind: kind.into(),
            data,
        }
    }

    #[must_use]
    pub fn is_existing(&self) -> bool {
        matches!(self, Self::ExistingNodes { .. })
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self, Self::NewNodeData { .. })
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque { .. })
    }

    /// Dragged nodes; empty for the other variants.
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        match self {
            Self::ExistingNodes { nodes } => nodes,
            _ => &[],
        }
    }

    #[must_use]
    pub fn first_node(&self) -> Option<NodeId> {
        self.node_ids().first().copied()
    }

    /// Whether any dragged node is a slot. Slots are always copied.
    #[must_use]
    pub fn has_slot(&self, doc: &dyn Document) -> bool {
        self.node_ids().iter().any(|n| doc.is_slot(*n))
    }

    /// Component names carried by the payload, in order.
    ///
    /// Existing nodes resolve their names through `doc`; nodes without
    /// metadata are skipped. Opaque payloads carry none.
    #[must_use]
    pub fn component_names<'a>(&'a self, doc: &'a dyn Document) -> Vec<&'a str> {
        match self {
            Self::ExistingNodes { nodes } => nodes
                .iter()
                .filter_map(|n| doc.component_meta(*n))
                .map(|m| m.component_name.as_str())
                .collect(),
            Self::NewNodeData { data } => {
                data.iter().map(|d| d.component_name.as_str()).collect()
            }
            Self::Opaque { .. } => Vec::new(),
        }
    }
}
