#![forbid(unsafe_code)]

//! Node tree collaborator.
//!
//! The engine never owns the document. It reads structure and component
//! metadata through the [`Document`] trait and asks the document whether a
//! payload may nest inside a container. Component metadata carries optional
//! hooks; an absent hook always permits.

use std::fmt;
use std::rc::Rc;

use crate::payload::DragPayload;

/// Identifier of a node in the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Veto on moving a node: `(node) -> allowed`.
pub type MoveHook = Rc<dyn Fn(NodeId) -> bool>;
/// Veto on moving a child out of a container: `(child, container) -> allowed`.
pub type ChildMoveHook = Rc<dyn Fn(NodeId, NodeId) -> bool>;
/// Whitelist a non-container as a drop target: `(candidate, payload) -> accept`.
pub type AcceptHook = Rc<dyn Fn(NodeId, &DragPayload) -> bool>;

/// Optional behaviour callbacks attached to a component type.
#[derive(Clone, Default)]
pub struct ComponentHooks {
    pub on_move: Option<MoveHook>,
    pub on_child_move: Option<ChildMoveHook>,
    pub accept_override: Option<AcceptHook>,
}

impl ComponentHooks {
    /// Whether `node` may be moved. Absent hook permits.
    #[must_use]
    pub fn allows_move(&self, node: NodeId) -> bool {
        self.on_move.as_ref().is_none_or(|hook| hook(node))
    }

    /// Whether `child` may be moved out of `container`. Absent hook permits.
    #[must_use]
    pub fn allows_child_move(&self, child: NodeId, container: NodeId) -> bool {
        self.on_child_move
            .as_ref()
            .is_none_or(|hook| hook(child, container))
    }

    /// Whether the override whitelists `candidate`. Absent hook rejects.
    #[must_use]
    pub fn overrides_accept(&self, candidate: NodeId, payload: &DragPayload) -> bool {
        self.accept_override
            .as_ref()
            .is_some_and(|hook| hook(candidate, payload))
    }
}

impl fmt::Debug for ComponentHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHooks")
            .field("on_move", &self.on_move.as_ref().map(|_| ".."))
            .field("on_child_move", &self.on_child_move.as_ref().map(|_| ".."))
            .field(
                "accept_override",
                &self.accept_override.as_ref().map(|_| ".."),
            )
            .finish()
    }
}

/// Parent/child whitelists by component name. `None` allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingRule {
    pub child_whitelist: Option<Vec<String>>,
    pub parent_whitelist: Option<Vec<String>>,
}

impl NestingRule {
    #[must_use]
    pub fn allows_child(&self, component: &str) -> bool {
        self.child_whitelist
            .as_ref()
            .is_none_or(|list| list.iter().any(|c| c == component))
    }

    #[must_use]
    pub fn allows_parent(&self, component: &str) -> bool {
        self.parent_whitelist
            .as_ref()
            .is_none_or(|list| list.iter().any(|c| c == component))
    }
}

/// Metadata describing a component type.
#[derive(Debug, Clone, Default)]
pub struct ComponentMeta {
    pub component_name: String,
    /// May receive dropped children.
    pub is_container: bool,
    /// Always inserted under the focus node.
    pub is_modal: bool,
    /// Lays out children on its own grid model.
    pub is_grid: bool,
    /// Sub-selector locating the element whose box represents the component.
    pub root_selector: Option<String>,
    pub nesting: NestingRule,
    pub hooks: ComponentHooks,
}

impl ComponentMeta {
    #[must_use]
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn container(mut self) -> Self {
        self.is_container = true;
        self
    }

    #[must_use]
    pub fn modal(mut self) -> Self {
        self.is_modal = true;
        self
    }

    /// Marks a grid container. Grids hold children, so this implies `container`.
    #[must_use]
    pub fn grid(mut self) -> Self {
        self.is_grid = true;
        self.is_container = true;
        self
    }

    #[must_use]
    pub fn with_root_selector(mut self, selector: impl Into<String>) -> Self {
        self.root_selector = Some(selector.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, components: &[&str]) -> Self {
        self.nesting.child_whitelist = Some(components.iter().map(|c| c.to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_parents(mut self, components: &[&str]) -> Self {
        self.nesting.parent_whitelist = Some(components.iter().map(|c| c.to_string()).collect());
        self
    }

    #[must_use]
    pub fn on_move(mut self, hook: impl Fn(NodeId) -> bool + 'static) -> Self {
        self.hooks.on_move = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn on_child_move(mut self, hook: impl Fn(NodeId, NodeId) -> bool + 'static) -> Self {
        self.hooks.on_child_move = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn accept_override(
        mut self,
        hook: impl Fn(NodeId, &DragPayload) -> bool + 'static,
    ) -> Self {
        self.hooks.accept_override = Some(Rc::new(hook));
        self
    }
}

/// Upper bound on ancestor walks. Trees deeper than this are treated as
/// malformed and walks stop early instead of spinning on a cycle.
pub const MAX_DEPTH: usize = 4096;

/// Read access to the edited document.
///
/// Implementations must keep the tree acyclic.
pub trait Document {
    /// Identifier used to label drop locations.
    fn document_id(&self) -> u64 {
        0
    }

    /// The current root node.
    fn root(&self) -> Option<NodeId>;

    /// The node the user is currently editing inside of.
    fn focus_node(&self) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Ordered children.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Whether the node can hold children at all (not a leaf).
    fn is_parental(&self, node: NodeId) -> bool;

    fn component_meta(&self, node: NodeId) -> Option<&ComponentMeta>;

    /// Document-level parent/child compatibility between `container` and
    /// every component carried by `payload`.
    fn check_nesting(&self, container: NodeId, payload: &DragPayload) -> bool;

    fn is_locked(&self, _node: NodeId) -> bool {
        false
    }

    fn is_slot(&self, _node: NodeId) -> bool {
        false
    }

    fn is_root(&self, node: NodeId) -> bool {
        self.root() == Some(node)
    }

    fn is_container(&self, node: NodeId) -> bool {
        self.component_meta(node).is_some_and(|m| m.is_container)
    }

    /// Ancestor-or-self test.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        for _ in 0..MAX_DEPTH {
            let Some(current) = cursor else {
                return false;
            };
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }
}

/// Nearest strict ancestor whose component is a container.
pub fn container_ancestor(doc: &dyn Document, node: NodeId) -> Option<NodeId> {
    ancestors(doc, node).skip(1).find(|n| doc.is_container(*n))
}

/// Whether the node's own move hook and its container's child-move hook
/// both permit moving it.
pub fn can_move(doc: &dyn Document, node: NodeId) -> bool {
    let self_ok = doc
        .component_meta(node)
        .is_none_or(|meta| meta.hooks.allows_move(node));
    if !self_ok {
        return false;
    }
    let Some(container) = container_ancestor(doc, node) else {
        return true;
    };
    doc.component_meta(container)
        .is_none_or(|meta| meta.hooks.allows_child_move(node, container))
}

/// The subset of `nodes` that may be moved, in order.
pub fn movable_nodes(doc: &dyn Document, nodes: &[NodeId]) -> Vec<NodeId> {
    nodes.iter().copied().filter(|n| can_move(doc, *n)).collect()
}

/// First locked node on the path from `node` up to the root.
pub fn closest_locked(doc: &dyn Document, node: NodeId) -> Option<NodeId> {
    ancestors(doc, node).find(|n| doc.is_locked(*n))
}

/// Iterator over `node` and its ancestors, root last.
///
/// Stops after [`MAX_DEPTH`] steps.
pub fn ancestors(doc: &dyn Document, node: NodeId) -> Ancestors<'_> {
    Ancestors {
        doc,
        cursor: Some(node),
        remaining: MAX_DEPTH,
    }
}

/// See [`ancestors`].
pub struct Ancestors<'a> {
    doc: &'a dyn Document,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.cursor?;
        self.cursor = self.doc.parent(current);
        Some(current)
    }
}
