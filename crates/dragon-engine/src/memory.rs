#![forbid(unsafe_code)]

//! In-memory document and surface.
//!
//! [`MemoryDocument`] is a plain node tree with a component registry and
//! whitelist-based nesting rules. [`MemorySurface`] is a retained layout of
//! rendered instances with explicit boxes. Together they let an embedder
//! (or a test, or a benchmark) drive the engine without a real renderer.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use dragon_core::event::ElementId;
use dragon_core::geometry::{Point, Rect};
use dragon_core::viewport::Viewport;

use crate::document::{ComponentMeta, Document, NodeId};
use crate::nearest::ChildLayout;
use crate::payload::DragPayload;
use crate::surface::{InstanceId, NodeInstance, RenderSurface};

// ---------------------------------------------------------------------------
// MemoryDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct MemNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    component: String,
    leaf: bool,
    locked: bool,
    slot: bool,
}

/// A node tree held in memory.
///
/// Components used by [`append`](Self::append) without a prior
/// [`register`](Self::register) get plain, non-container metadata.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    id: u64,
    root: NodeId,
    next_id: u64,
    focus: Cell<Option<NodeId>>,
    nodes: HashMap<NodeId, MemNode>,
    metas: HashMap<String, ComponentMeta>,
}

impl MemoryDocument {
    /// A document whose root renders `root_meta`.
    #[must_use]
    pub fn new(root_meta: ComponentMeta) -> Self {
        let root = NodeId(1);
        let component = root_meta.component_name.clone();
        let mut metas = HashMap::new();
        metas.insert(component.clone(), root_meta);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            MemNode {
                parent: None,
                children: Vec::new(),
                component,
                leaf: false,
                locked: false,
                slot: false,
            },
        );
        Self {
            id: 0,
            root,
            next_id: 2,
            focus: Cell::new(None),
            nodes,
            metas,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    #[inline]
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Register (or replace) metadata for a component name.
    pub fn register(&mut self, meta: ComponentMeta) {
        self.metas.insert(meta.component_name.clone(), meta);
    }

    /// Append a new node rendering `component` as the last child of
    /// `parent`. An unknown parent leaves the node detached.
    pub fn append(&mut self, parent: NodeId, component: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        if !self.metas.contains_key(component) {
            self.metas
                .insert(component.to_string(), ComponentMeta::new(component));
        }
        let attached = match self.nodes.get_mut(&parent) {
            Some(p) => {
                p.children.push(id);
                Some(parent)
            }
            None => None,
        };
        self.nodes.insert(
            id,
            MemNode {
                parent: attached,
                children: Vec::new(),
                component: component.to_string(),
                leaf: false,
                locked: false,
                slot: false,
            },
        );
        id
    }

    /// Mark a node as a leaf that can never hold children.
    pub fn set_leaf(&mut self, node: NodeId, leaf: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.leaf = leaf;
        }
    }

    pub fn set_locked(&mut self, node: NodeId, locked: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.locked = locked;
        }
    }

    pub fn set_slot(&mut self, node: NodeId, slot: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.slot = slot;
        }
    }

    /// Change the focus node. `None` focuses the root.
    pub fn set_focus(&self, node: Option<NodeId>) {
        self.focus.set(node);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Document for MemoryDocument {
    fn document_id(&self) -> u64 {
        self.id
    }

    fn root(&self) -> Option<NodeId> {
        Some(self.root)
    }

    fn focus_node(&self) -> Option<NodeId> {
        self.focus.get().or(Some(self.root))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(&node).map_or(&[], |n| n.children.as_slice())
    }

    fn is_parental(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| !n.leaf)
    }

    fn component_meta(&self, node: NodeId) -> Option<&ComponentMeta> {
        self.nodes
            .get(&node)
            .and_then(|n| self.metas.get(&n.component))
    }

    /// Every carried component must be whitelisted by the container and
    /// must whitelist the container in turn. Opaque payloads never nest.
    fn check_nesting(&self, container: NodeId, payload: &DragPayload) -> bool {
        if payload.is_opaque() {
            return false;
        }
        let Some(container_meta) = self.component_meta(container) else {
            return false;
        };
        payload.component_names(self).into_iter().all(|name| {
            container_meta.nesting.allows_child(name)
                && self
                    .metas
                    .get(name)
                    .is_none_or(|m| m.nesting.allows_parent(&container_meta.component_name))
        })
    }

    fn is_locked(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.locked)
    }

    fn is_slot(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.slot)
    }
}

// ---------------------------------------------------------------------------
// MemorySurface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Placed {
    node: NodeId,
    parent: Option<InstanceId>,
    rect: Rect,
    selectors: Vec<(String, Rect)>,
    layout: ChildLayout,
}

/// Retained layout of rendered instances.
///
/// Each placed instance also acts as one hit-testable element; see
/// [`element_of`](Self::element_of). Later placements paint on top of
/// earlier ones, so place parents before children.
#[derive(Debug)]
pub struct MemorySurface {
    viewport: Cell<Viewport>,
    placed: RefCell<Vec<Placed>>,
    edge_band: f64,
    scrolling: Cell<Option<Point>>,
}

impl MemorySurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
            placed: RefCell::new(Vec::new()),
            edge_band: 0.0,
            scrolling: Cell::new(None),
        }
    }

    /// Auto-scroll while the pointer is within `band` of a visible edge.
    /// A band of zero (the default) disables it.
    #[must_use]
    pub fn with_edge_scroll(mut self, band: f64) -> Self {
        self.edge_band = band.max(0.0);
        self
    }

    /// Current auto-scroll direction, one of -1, 0 or 1 per axis.
    #[must_use]
    pub fn scrolling(&self) -> Option<Point> {
        self.scrolling.get()
    }

    /// Render `node` inside `parent` with box `rect` (canvas space).
    pub fn place(&self, node: NodeId, parent: Option<InstanceId>, rect: Rect) -> InstanceId {
        let mut placed = self.placed.borrow_mut();
        placed.push(Placed {
            node,
            parent,
            rect,
            selectors: Vec::new(),
            layout: ChildLayout::default(),
        });
        InstanceId(placed.len() as u64)
    }

    /// Element handle of an instance.
    #[must_use]
    pub const fn element_of(instance: InstanceId) -> ElementId {
        ElementId(instance.0)
    }

    pub fn set_rect(&self, instance: InstanceId, rect: Rect) {
        self.with_placed(instance, |p| p.rect = rect);
    }

    pub fn set_layout(&self, instance: InstanceId, layout: ChildLayout) {
        self.with_placed(instance, |p| p.layout = layout);
    }

    /// Box reported when `selector` narrows the instance.
    pub fn set_selector_rect(&self, instance: InstanceId, selector: &str, rect: Rect) {
        self.with_placed(instance, |p| {
            p.selectors.retain(|(s, _)| s != selector);
            p.selectors.push((selector.to_string(), rect));
        });
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    fn with_placed(&self, instance: InstanceId, f: impl FnOnce(&mut Placed)) {
        let Some(index) = Self::index(instance) else {
            return;
        };
        if let Some(p) = self.placed.borrow_mut().get_mut(index) {
            f(p);
        }
    }

    fn index(instance: InstanceId) -> Option<usize> {
        usize::try_from(instance.0).ok()?.checked_sub(1)
    }

    fn get(&self, instance: InstanceId) -> Option<Placed> {
        let index = Self::index(instance)?;
        self.placed.borrow().get(index).cloned()
    }
}

impl RenderSurface for MemorySurface {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn node_instance_from_element(&self, element: ElementId) -> Option<NodeInstance> {
        let instance = InstanceId(element.0);
        self.get(instance).map(|p| NodeInstance {
            node: p.node,
            instance,
        })
    }

    fn element_from_point(&self, canvas: Point) -> Option<ElementId> {
        let placed = self.placed.borrow();
        placed
            .iter()
            .rposition(|p| p.rect.contains(canvas))
            .map(|i| ElementId(i as u64 + 1))
    }

    fn component_instances(&self, node: NodeId) -> Vec<InstanceId> {
        self.placed
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.node == node)
            .map(|(i, _)| InstanceId(i as u64 + 1))
            .collect()
    }

    fn closest_node_instance(&self, from: InstanceId, node: NodeId) -> Option<NodeInstance> {
        let placed = self.placed.borrow();
        let mut cursor = Some(from);
        for _ in 0..placed.len() {
            let instance = cursor?;
            let p = placed.get(Self::index(instance)?)?;
            if p.node == node {
                return Some(NodeInstance { node, instance });
            }
            cursor = p.parent;
        }
        None
    }

    fn instance_rect(&self, instance: InstanceId, selector: Option<&str>) -> Option<Rect> {
        let p = self.get(instance)?;
        match selector {
            None => Some(p.rect),
            Some(sel) => p
                .selectors
                .iter()
                .find(|(s, _)| s == sel)
                .map(|(_, r)| *r),
        }
    }

    fn child_layout(&self, instance: InstanceId) -> ChildLayout {
        self.get(instance).map(|p| p.layout).unwrap_or_default()
    }

    fn scroll_near_edge(&self, canvas: Point) {
        if self.edge_band <= 0.0 || !canvas.is_finite() {
            return;
        }
        let visible = self.viewport.get().canvas_bounds();
        let step = |at: f64, low: f64, high: f64| {
            if at < low + self.edge_band {
                -1.0
            } else if at > high - self.edge_band {
                1.0
            } else {
                0.0
            }
        };
        let dir = Point::new(
            step(canvas.x, visible.left(), visible.right()),
            step(canvas.y, visible.top(), visible.bottom()),
        );
        self.scrolling.set((dir != Point::default()).then_some(dir));
    }

    fn cancel_scroll(&self) {
        self.scrolling.set(None);
    }
}
