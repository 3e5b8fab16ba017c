#![forbid(unsafe_code)]

//! Drop container resolution.
//!
//! Starting from the element under the pointer, find the nearest node that
//! is allowed to receive the payload:
//!
//! 1. map the hit element to a node (falling back to the root);
//! 2. step from a leaf to its parent;
//! 3. step out of any dragged subtree so a node is never dropped into
//!    itself;
//! 4. walk up until a container accepts the payload.
//!
//! # Invariants
//!
//! 1. The result is never a descendant-or-self of a dragged node.
//! 2. The walk visits each node at most once and terminates even when the
//!    document reports a parent cycle.
//! 3. Opaque payloads never resolve.

use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::document::{Document, NodeId};
use crate::locate_event::LocateEvent;
use crate::location::DropContainer;
use crate::payload::DragPayload;
use crate::surface::{InstanceId, NodeInstance, RenderSurface};

/// Resolves drop containers against one document rendered by one surface.
pub struct DropResolver<'a> {
    document: &'a dyn Document,
    surface: &'a dyn RenderSurface,
}

impl<'a> DropResolver<'a> {
    #[must_use]
    pub fn new(document: &'a dyn Document, surface: &'a dyn RenderSurface) -> Self {
        Self { document, surface }
    }

    /// Find the container the payload would drop into.
    pub fn drop_container(&self, event: &LocateEvent) -> Option<DropContainer> {
        let doc = self.document;
        let opaque = event.payload.is_opaque();
        let root = doc.root();

        let hit: Option<NodeInstance> = event
            .target
            .and_then(|el| self.surface.node_instance_from_element(el));
        if hit.is_none() && opaque {
            return None;
        }
        let mut candidate = hit.map(|h| h.node).or(root);

        if !candidate.is_some_and(|c| doc.is_parental(c)) {
            candidate = candidate.and_then(|c| doc.parent(c)).or(root);
        }
        if opaque {
            return None;
        }
        let mut container = candidate?;

        let mut visited: HashSet<NodeId> = HashSet::new();
        if let DragPayload::ExistingNodes { nodes } = event.payload.as_ref() {
            let mut p = Some(container);
            for node in nodes.iter().rev() {
                if let Some(current) = p
                    && doc.contains(*node, current)
                {
                    p = doc.parent(*node);
                }
            }
            if p != Some(container) {
                container = p.or_else(|| doc.focus_node())?;
                visited.insert(container);
                #[cfg(feature = "tracing")]
                trace!(corrected = %container, "stepped out of dragged subtree");
            }
        }

        let instance = match hit {
            Some(h) if h.node == container => Some(h.instance),
            Some(h) => self
                .surface
                .closest_node_instance(h.instance, container)
                .map(|n| n.instance),
            None => self.first_instance(container),
        };
        let mut drop = DropContainer {
            container,
            instance,
        };

        loop {
            if self.handle_accept(&drop, event) {
                return Some(drop);
            }
            visited.insert(drop.container);
            let parent = doc.parent(drop.container)?;
            if visited.contains(&parent) {
                return None;
            }
            let instance = drop
                .instance
                .and_then(|i| self.surface.closest_node_instance(i, parent))
                .map(|n| n.instance)
                .or_else(|| self.first_instance(parent));
            drop = DropContainer {
                container: parent,
                instance,
            };
        }
    }

    /// Whether `drop.container` may receive the payload.
    ///
    /// The root and any container enclosing the focus node defer to the
    /// document's nesting check against the focus node. Other nodes must be
    /// containers (or whitelisted by their accept override) and pass the
    /// nesting check themselves.
    pub fn handle_accept(&self, drop: &DropContainer, event: &LocateEvent) -> bool {
        let doc = self.document;
        let container = drop.container;
        let focus = doc.focus_node();

        if doc.is_root(container) || focus.is_some_and(|f| doc.contains(container, f)) {
            return match focus.or(doc.root()) {
                Some(f) => doc.check_nesting(f, &event.payload),
                None => false,
            };
        }

        let meta = doc.component_meta(container);
        let is_container = meta.is_some_and(|m| m.is_container);
        let overridden = meta.is_some_and(|m| m.hooks.overrides_accept(container, &event.payload));
        if !is_container && !overridden {
            return false;
        }
        doc.check_nesting(container, &event.payload)
    }

    fn first_instance(&self, node: NodeId) -> Option<InstanceId> {
        self.surface.component_instances(node).first().copied()
    }
}
