#![forbid(unsafe_code)]

//! Rendering surfaces and the sensor that locates drops on them.
//!
//! A [`RenderSurface`] is the engine's view of a rendered document: it maps
//! elements to node instances, hit-tests canvas points and reports boxes and
//! layout flow. [`SurfaceSensor`] combines a surface with the document it
//! renders and implements [`Sensor`] on top of them.
//!
//! # Invariants
//!
//! 1. `fix_event` is idempotent.
//! 2. `locate` never returns a location inside a locked subtree.
//! 3. Cached boxes never outlive the gesture or a viewport change.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use dragon_core::event::{ElementId, SurfaceId};
use dragon_core::geometry::{Point, Rect};
use dragon_core::viewport::Viewport;
#[cfg(feature = "tracing")]
use tracing::{debug_span, trace};

use crate::document::{Document, NodeId, closest_locked, movable_nodes};
use crate::locate_event::LocateEvent;
use crate::location::{DropLocation, LocationDetail};
use crate::nearest::{self, ChildGeometry, ChildLayout};
use crate::payload::DragPayload;
use crate::resolver::DropResolver;
use crate::sensor::Sensor;

/// Identifier of one rendered instance of a node. A node may render more
/// than once (lists, repeated templates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

/// A node paired with one of its rendered instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInstance {
    pub node: NodeId,
    pub instance: InstanceId,
}

/// Geometry and hit-testing for a rendered document.
///
/// Points and rectangles are in canvas space.
pub trait RenderSurface {
    fn viewport(&self) -> Viewport;

    /// Node instance owning a rendered element.
    fn node_instance_from_element(&self, element: ElementId) -> Option<NodeInstance>;

    /// Topmost element at a canvas point.
    fn element_from_point(&self, canvas: Point) -> Option<ElementId>;

    /// Rendered instances of a node, in render order.
    fn component_instances(&self, node: NodeId) -> Vec<InstanceId>;

    /// Nearest enclosing instance of `node`, starting at `from` itself.
    fn closest_node_instance(&self, from: InstanceId, node: NodeId) -> Option<NodeInstance>;

    /// Box of an instance, optionally narrowed by a sub-selector.
    fn instance_rect(&self, instance: InstanceId, selector: Option<&str>) -> Option<Rect>;

    /// Flow of an instance relative to its siblings.
    fn child_layout(&self, instance: InstanceId) -> ChildLayout;

    /// Called on every locate with the pointer's canvas point. Surfaces that
    /// auto-scroll while the pointer nears their edges start or steer it here.
    fn scroll_near_edge(&self, _canvas: Point) {}

    /// Stop any auto-scroll started by [`RenderSurface::scroll_near_edge`].
    fn cancel_scroll(&self) {}
}

impl<T: RenderSurface + ?Sized> RenderSurface for Rc<T> {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn node_instance_from_element(&self, element: ElementId) -> Option<NodeInstance> {
        (**self).node_instance_from_element(element)
    }

    fn element_from_point(&self, canvas: Point) -> Option<ElementId> {
        (**self).element_from_point(canvas)
    }

    fn component_instances(&self, node: NodeId) -> Vec<InstanceId> {
        (**self).component_instances(node)
    }

    fn closest_node_instance(&self, from: InstanceId, node: NodeId) -> Option<NodeInstance> {
        (**self).closest_node_instance(from, node)
    }

    fn instance_rect(&self, instance: InstanceId, selector: Option<&str>) -> Option<Rect> {
        (**self).instance_rect(instance, selector)
    }

    fn child_layout(&self, instance: InstanceId) -> ChildLayout {
        (**self).child_layout(instance)
    }

    fn scroll_near_edge(&self, canvas: Point) {
        (**self).scroll_near_edge(canvas);
    }

    fn cancel_scroll(&self) {
        (**self).cancel_scroll();
    }
}

// ---------------------------------------------------------------------------
// RectCache
// ---------------------------------------------------------------------------

/// Per-gesture memo of instance boxes.
///
/// Keyed by instance only: an instance's selector is fixed by its node's
/// component metadata, which does not change during a gesture.
#[derive(Debug, Default)]
struct RectCache {
    generation: u64,
    rects: HashMap<InstanceId, Option<Rect>>,
    hits: u64,
}

impl RectCache {
    /// Drop everything if the viewport moved since the last fill.
    fn sync(&mut self, generation: u64) {
        if self.generation != generation {
            self.rects.clear();
            self.generation = generation;
        }
    }

    fn clear(&mut self) {
        self.rects.clear();
        self.hits = 0;
    }

    fn get_or_measure(
        &mut self,
        instance: InstanceId,
        measure: impl FnOnce() -> Option<Rect>,
    ) -> Option<Rect> {
        if let Some(rect) = self.rects.get(&instance) {
            self.hits += 1;
            return *rect;
        }
        let rect = measure();
        self.rects.insert(instance, rect);
        rect
    }
}

// ---------------------------------------------------------------------------
// SurfaceSensor
// ---------------------------------------------------------------------------

/// Sensor backed by a rendering surface and the document it renders.
pub struct SurfaceSensor<S> {
    id: SurfaceId,
    surface: S,
    document: Rc<dyn Document>,
    available: bool,
    sensing: bool,
    cache: RectCache,
}

impl<S: RenderSurface> SurfaceSensor<S> {
    #[must_use]
    pub fn new(id: SurfaceId, surface: S, document: Rc<dyn Document>) -> Self {
        Self {
            id,
            surface,
            document,
            available: true,
            sensing: false,
            cache: RectCache::default(),
        }
    }

    /// Take the sensor out of (or back into) arbitration.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn document(&self) -> &Rc<dyn Document> {
        &self.document
    }

    /// Whether the sensor has located during the current gesture.
    #[must_use]
    pub fn is_sensing(&self) -> bool {
        self.sensing
    }

    /// Number of box lookups served from the cache since the last
    /// deactivation.
    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.cache.hits
    }

    fn source_label(&self) -> String {
        format!("{}/doc{}", self.id, self.document.document_id())
    }

    fn node_rect(&mut self, instance: InstanceId, node: NodeId) -> Option<Rect> {
        let selector = self
            .document
            .component_meta(node)
            .and_then(|m| m.root_selector.clone());
        let surface = &self.surface;
        self.cache
            .get_or_measure(instance, || surface.instance_rect(instance, selector.as_deref()))
    }

    /// Box of a node's first rendered instance.
    fn first_instance_rect(&mut self, node: NodeId) -> Option<Rect> {
        let inst = self.surface.component_instances(node).first().copied()?;
        self.node_rect(inst, node)
    }

    /// Box of the container the pointer would otherwise drop into.
    fn drop_container_rect(&mut self, event: &LocateEvent) -> Option<Rect> {
        let doc = Rc::clone(&self.document);
        let found = DropResolver::new(doc.as_ref(), &self.surface).drop_container(event)?;
        self.node_rect(found.instance?, found.container)
    }

    /// Modal payloads always go to the focus node at index 0. The edge is
    /// the focus node's box when it is rendered, else the pointer's drop
    /// container, else the root, else the visible canvas.
    fn modal_location(&mut self, event: &LocateEvent) -> Option<DropLocation> {
        let doc = Rc::clone(&self.document);
        let first = event.payload.first_node()?;
        if !doc.component_meta(first).is_some_and(|m| m.is_modal) {
            return None;
        }
        let focus = doc.focus_node()?;
        let edge = self
            .first_instance_rect(focus)
            .or_else(|| self.drop_container_rect(event))
            .or_else(|| doc.root().and_then(|root| self.first_instance_rect(root)))
            .unwrap_or_else(|| self.surface.viewport().canvas_bounds());
        Some(DropLocation::new(
            focus,
            LocationDetail::at(0, edge),
            self.source_label(),
        ))
    }
}

/// Child geometry for one drop container, resolving each child to the
/// instance rendered inside the container's instance.
struct ContainerProbe<'a, S> {
    sensor: &'a mut SurfaceSensor<S>,
    container_instance: InstanceId,
    instances: HashMap<NodeId, InstanceId>,
}

impl<S: RenderSurface> ContainerProbe<'_, S> {
    fn instance_of(&mut self, child: NodeId) -> Option<InstanceId> {
        if let Some(inst) = self.instances.get(&child) {
            return Some(*inst);
        }
        let surface = &self.sensor.surface;
        let instances = surface.component_instances(child);
        let chosen = if instances.len() > 1 {
            let parent = self.sensor.document.parent(child);
            instances
                .iter()
                .copied()
                .find(|inst| {
                    parent
                        .and_then(|p| surface.closest_node_instance(*inst, p))
                        .is_some_and(|ni| ni.instance == self.container_instance)
                })
        } else {
            instances.first().copied()
        }?;
        self.instances.insert(child, chosen);
        Some(chosen)
    }
}

impl<S: RenderSurface> ChildGeometry for ContainerProbe<'_, S> {
    fn child_rect(&mut self, child: NodeId) -> Option<Rect> {
        let inst = self.instance_of(child)?;
        self.sensor.node_rect(inst, child)
    }

    fn child_layout(&mut self, child: NodeId) -> ChildLayout {
        self.instance_of(child)
            .map(|inst| self.sensor.surface.child_layout(inst))
            .unwrap_or_default()
    }
}

impl<S: RenderSurface> Sensor for SurfaceSensor<S> {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn sensor_available(&self) -> bool {
        self.available
    }

    fn is_enter(&self, event: &LocateEvent) -> bool {
        self.surface.viewport().contains_global(event.global)
    }

    fn fix_event(&self, event: &mut LocateEvent) {
        if event.fixed {
            return;
        }
        let foreign = event.origin != Some(self.id);
        if foreign || event.canvas.is_none() {
            event.canvas = Some(self.surface.viewport().global_to_canvas(event.global));
        }
        if (foreign || event.target.is_none())
            && let Some(canvas) = event.canvas
            && canvas.is_finite()
        {
            event.target = self.surface.element_from_point(canvas);
        }
        event.sensor = Some(self.id);
        event.fixed = true;
    }

    fn locate(&mut self, event: &LocateEvent) -> Option<DropLocation> {
        #[cfg(feature = "tracing")]
        let _span = debug_span!("dragon.locate", sensor = %self.id).entered();
        let doc = Rc::clone(&self.document);

        if let DragPayload::ExistingNodes { nodes } = event.payload.as_ref()
            && movable_nodes(doc.as_ref(), nodes).is_empty()
        {
            #[cfg(feature = "tracing")]
            trace!("no movable nodes");
            return None;
        }
        self.sensing = true;
        self.surface.scroll_near_edge(event.canvas_point());
        self.cache.sync(self.surface.viewport().generation());

        if let Some(modal) = self.modal_location(event) {
            return Some(modal);
        }

        let found = DropResolver::new(doc.as_ref(), &self.surface).drop_container(event)?;
        if let Some(_locked) = closest_locked(doc.as_ref(), found.container) {
            #[cfg(feature = "tracing")]
            trace!(locked = %_locked, "container is locked");
            return None;
        }
        let instance = found.instance?;
        let edge = self.node_rect(instance, found.container)?;
        let children = doc.children(found.container);
        if children.is_empty() {
            return Some(DropLocation::new(
                found.container,
                LocationDetail::at(0, edge),
                self.source_label(),
            ));
        }

        let point = event.canvas_point();
        let mut probe = ContainerProbe {
            sensor: self,
            container_instance: instance,
            instances: HashMap::new(),
        };
        let detail = nearest::search(point, edge, children, &mut probe);
        #[cfg(feature = "tracing")]
        trace!(container = %found.container, index = detail.index, "located");
        Some(DropLocation::new(found.container, detail, self.source_label()))
    }

    fn deactivate(&mut self) {
        self.sensing = false;
        self.surface.cancel_scroll();
        self.cache.clear();
    }

    fn viewport(&self) -> Option<Viewport> {
        Some(self.surface.viewport())
    }

    fn node_at(&self, event: &LocateEvent) -> Option<NodeId> {
        event
            .target
            .and_then(|el| self.surface.node_instance_from_element(el))
            .map(|ni| ni.node)
    }

    fn hosts_node(&self, node: NodeId) -> bool {
        self.document
            .root()
            .is_some_and(|root| self.document.contains(root, node))
    }
}

impl<S> fmt::Debug for SurfaceSensor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceSensor")
            .field("id", &self.id)
            .field("available", &self.available)
            .field("sensing", &self.sensing)
            .field("cached", &self.cache.rects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragon_core::event::PointerEvent;

    use crate::document::ComponentMeta;
    use crate::location::NearPos;
    use crate::memory::{MemoryDocument, MemorySurface};
    use crate::payload::NodeDescriptor;
    use crate::sensor::SensorRegistry;

    struct Scene {
        doc: Rc<MemoryDocument>,
        surface: Rc<MemorySurface>,
        sensor: SurfaceSensor<Rc<MemorySurface>>,
        root: NodeId,
        column: NodeId,
        a: NodeId,
        b: NodeId,
    }

    // Page (0,0 400x400)
    // └── Column (0,0 100x100)
    //     ├── A (0,0 100x10)
    //     └── B (0,10 100x10)
    fn scene() -> Scene {
        let mut doc = MemoryDocument::new(ComponentMeta::new("Page").container());
        doc.register(ComponentMeta::new("Column").container());
        doc.register(ComponentMeta::new("Text"));
        let root = doc.root_id();
        let column = doc.append(root, "Column");
        let a = doc.append(column, "Text");
        let b = doc.append(column, "Text");
        doc.set_leaf(a, true);
        doc.set_leaf(b, true);

        let surface = Rc::new(MemorySurface::new(Viewport::new(Rect::new(
            0.0, 0.0, 400.0, 400.0,
        ))));
        let root_i = surface.place(root, None, Rect::new(0.0, 0.0, 400.0, 400.0));
        let col_i = surface.place(column, Some(root_i), Rect::new(0.0, 0.0, 100.0, 100.0));
        surface.place(a, Some(col_i), Rect::new(0.0, 0.0, 100.0, 10.0));
        surface.place(b, Some(col_i), Rect::new(0.0, 10.0, 100.0, 10.0));

        let doc = Rc::new(doc);
        let sensor = SurfaceSensor::new(SurfaceId(1), Rc::clone(&surface), doc.clone());
        Scene {
            doc,
            surface,
            sensor,
            root,
            column,
            a,
            b,
        }
    }

    fn fixed_event(s: &Scene, payload: DragPayload, x: f64, y: f64) -> LocateEvent {
        let mut e = LocateEvent::new(Rc::new(payload), Point::new(x, y));
        s.sensor.fix_event(&mut e);
        e
    }

    fn button() -> DragPayload {
        DragPayload::new_data([NodeDescriptor::new("Button")])
    }

    #[test]
    fn locates_after_second_child() {
        let mut s = scene();
        let e = fixed_event(&s, button(), 5.0, 18.0);
        let loc = s.sensor.locate(&e).unwrap();
        assert_eq!(loc.target, s.column);
        assert_eq!(loc.index(), 2);
        let near = loc.detail.near.unwrap();
        assert_eq!(near.node, s.b);
        assert_eq!(near.pos, NearPos::After);
        assert_eq!(loc.detail.edge, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(loc.source, "surface#1/doc0");
    }

    #[test]
    fn fix_event_is_idempotent() {
        let s = scene();
        let mut e = LocateEvent::new(Rc::new(button()), Point::new(5.0, 5.0));
        s.sensor.fix_event(&mut e);
        assert!(e.fixed);
        assert_eq!(e.canvas, Some(Point::new(5.0, 5.0)));
        assert!(e.target.is_some());
        let once = e.clone();
        s.sensor.fix_event(&mut e);
        assert_eq!(e, once);
    }

    #[test]
    fn fix_event_retargets_foreign_events() {
        let s = scene();
        let mut e = LocateEvent::new(Rc::new(button()), Point::new(5.0, 15.0))
            .with_target(ElementId(9999))
            .with_origin(SurfaceId(7));
        s.sensor.fix_event(&mut e);
        let hit = s.surface.node_instance_from_element(e.target.unwrap()).unwrap();
        assert_eq!(hit.node, s.b);
        assert_eq!(e.sensor, Some(SurfaceId(1)));
    }

    #[test]
    fn fix_event_keeps_own_target_and_canvas() {
        let s = scene();
        let mut e = LocateEvent::new(Rc::new(button()), Point::new(500.0, 500.0))
            .with_origin(SurfaceId(1))
            .with_canvas(Point::new(5.0, 5.0))
            .with_target(ElementId(42));
        s.sensor.fix_event(&mut e);
        assert_eq!(e.canvas, Some(Point::new(5.0, 5.0)));
        assert_eq!(e.target, Some(ElementId(42)));
    }

    #[test]
    fn fix_event_through_scrolled_viewport() {
        let s = scene();
        let mut vp = s.surface.viewport();
        vp.set_bounds(Rect::new(100.0, 100.0, 200.0, 200.0));
        vp.set_scale(2.0);
        vp.set_scroll(Point::new(0.0, 10.0));
        s.surface.set_viewport(vp);
        // global (110, 110) -> client (5, 5) -> canvas (5, 15) -> B
        let mut e = LocateEvent::new(Rc::new(button()), Point::new(110.0, 110.0));
        s.sensor.fix_event(&mut e);
        assert_eq!(e.canvas, Some(Point::new(5.0, 15.0)));
        assert_eq!(s.sensor.node_at(&e), Some(s.b));
    }

    #[test]
    fn empty_container_inserts_at_zero() {
        let mut s = scene();
        let mut doc = MemoryDocument::new(ComponentMeta::new("Page").container());
        let root = doc.root_id();
        doc.set_focus(Some(root));
        let surface = MemorySurface::new(Viewport::new(Rect::new(0.0, 0.0, 50.0, 50.0)));
        surface.place(root, None, Rect::new(0.0, 0.0, 50.0, 50.0));
        s.sensor = SurfaceSensor::new(SurfaceId(2), Rc::new(surface), Rc::new(doc));
        let e = fixed_event(&s, button(), 3.0, 3.0);
        let loc = s.sensor.locate(&e).unwrap();
        assert_eq!(loc.target, root);
        assert_eq!(loc.detail, LocationDetail::at(0, Rect::new(0.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn modal_overrides_pointer() {
        let mut doc = MemoryDocument::new(ComponentMeta::new("Page").container());
        doc.register(ComponentMeta::new("Dialog").modal().container());
        doc.register(ComponentMeta::new("Column").container());
        let root = doc.root_id();
        let column = doc.append(root, "Column");
        let dialog = doc.append(root, "Dialog");
        let surface = Rc::new(MemorySurface::new(Viewport::new(Rect::new(
            0.0, 0.0, 400.0, 400.0,
        ))));
        let root_i = surface.place(root, None, Rect::new(0.0, 0.0, 400.0, 400.0));
        surface.place(column, Some(root_i), Rect::new(0.0, 0.0, 100.0, 100.0));
        surface.place(dialog, Some(root_i), Rect::new(200.0, 200.0, 50.0, 50.0));
        let mut sensor = SurfaceSensor::new(SurfaceId(1), surface, Rc::new(doc));

        for (x, y) in [(5.0, 5.0), (300.0, 10.0), (220.0, 220.0)] {
            let mut e = LocateEvent::new(Rc::new(DragPayload::nodes([dialog])), Point::new(x, y));
            sensor.fix_event(&mut e);
            let loc = sensor.locate(&e).unwrap();
            assert_eq!(loc.target, root);
            assert_eq!(loc.index(), 0);
            assert_eq!(loc.detail.edge, Rect::new(0.0, 0.0, 400.0, 400.0));
        }
    }

    #[test]
    fn modal_targets_unrendered_focus() {
        let mut doc = MemoryDocument::new(ComponentMeta::new("Page").container());
        doc.register(ComponentMeta::new("Dialog").modal().container());
        doc.register(ComponentMeta::new("Scope").container());
        let root = doc.root_id();
        let scope = doc.append(root, "Scope");
        let dialog = doc.append(root, "Dialog");
        doc.set_focus(Some(scope));
        let doc = Rc::new(doc);
        let payload = Rc::new(DragPayload::nodes([dialog]));

        // Focus has no box: the pointer's drop container supplies the edge.
        let surface = Rc::new(MemorySurface::new(Viewport::new(Rect::new(
            0.0, 0.0, 400.0, 400.0,
        ))));
        surface.place(root, None, Rect::new(0.0, 0.0, 300.0, 300.0));
        let mut sensor = SurfaceSensor::new(SurfaceId(1), surface, doc.clone());
        let mut e = LocateEvent::new(Rc::clone(&payload), Point::new(5.0, 5.0));
        sensor.fix_event(&mut e);
        let loc = sensor.locate(&e).unwrap();
        assert_eq!(loc.target, scope);
        assert_eq!(loc.index(), 0);
        assert_eq!(loc.detail.edge, Rect::new(0.0, 0.0, 300.0, 300.0));

        // Nothing rendered at all: the visible canvas is the edge.
        let bare = MemorySurface::new(Viewport::new(Rect::new(0.0, 0.0, 400.0, 400.0)));
        let mut sensor = SurfaceSensor::new(SurfaceId(1), bare, doc);
        let mut e = LocateEvent::new(payload, Point::new(5.0, 5.0));
        sensor.fix_event(&mut e);
        let loc = sensor.locate(&e).unwrap();
        assert_eq!(loc.target, scope);
        assert_eq!(loc.index(), 0);
        assert_eq!(loc.detail.edge, Rect::new(0.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn locked_container_never_locates() {
        let s = scene();
        let mut doc = (*s.doc).clone();
        doc.set_locked(s.column, true);
        let mut sensor = SurfaceSensor::new(SurfaceId(1), Rc::clone(&s.surface), Rc::new(doc));
        let mut e = LocateEvent::new(Rc::new(button()), Point::new(5.0, 18.0));
        sensor.fix_event(&mut e);
        assert_eq!(sensor.locate(&e), None);
    }

    #[test]
    fn immovable_payload_never_locates() {
        let mut doc = MemoryDocument::new(ComponentMeta::new("Page").container());
        doc.register(ComponentMeta::new("Pinned").on_move(|_| false));
        let root = doc.root_id();
        let pinned = doc.append(root, "Pinned");
        let surface = MemorySurface::new(Viewport::new(Rect::new(0.0, 0.0, 50.0, 50.0)));
        surface.place(root, None, Rect::new(0.0, 0.0, 50.0, 50.0));
        let mut sensor = SurfaceSensor::new(SurfaceId(1), surface, Rc::new(doc));
        let mut e = LocateEvent::new(Rc::new(DragPayload::nodes([pinned])), Point::new(1.0, 1.0));
        sensor.fix_event(&mut e);
        assert_eq!(sensor.locate(&e), None);
        assert!(!sensor.is_sensing());
    }

    #[test]
    fn rect_cache_reused_then_invalidated() {
        let mut s = scene();
        let e = fixed_event(&s, button(), 5.0, 18.0);
        s.sensor.locate(&e).unwrap();
        assert_eq!(s.sensor.cache_hits(), 0);
        s.sensor.locate(&e).unwrap();
        assert!(s.sensor.cache_hits() > 0);

        // Scrolling bumps the generation and invalidates stale boxes.
        let mut vp = s.surface.viewport();
        vp.set_scroll(Point::new(0.0, 0.0));
        s.surface.set_viewport(vp);
        s.surface
            .set_rect(InstanceId(4), Rect::new(0.0, 10.0, 100.0, 40.0));
        let e = fixed_event(&s, button(), 5.0, 18.0);
        let loc = s.sensor.locate(&e).unwrap();
        // B now spans 10..50; y = 18 is in its upper half.
        assert_eq!(loc.index(), 1);

        s.sensor.deactivate();
        assert_eq!(s.sensor.cache_hits(), 0);
        assert!(!s.sensor.is_sensing());
    }

    #[test]
    fn multi_instance_child_uses_instance_inside_container() {
        let s = scene();
        // Render A a second time outside the column.
        let stray = s
            .surface
            .place(s.a, Some(InstanceId(1)), Rect::new(300.0, 300.0, 10.0, 10.0));
        let mut sensor =
            SurfaceSensor::new(SurfaceId(1), Rc::clone(&s.surface), s.doc.clone());
        let mut e = LocateEvent::new(Rc::new(button()), Point::new(5.0, 3.0));
        sensor.fix_event(&mut e);
        let loc = sensor.locate(&e).unwrap();
        assert_eq!(loc.detail.near.unwrap().node, s.a);
        assert_eq!(loc.index(), 0);
        assert_eq!(stray, InstanceId(5));
    }

    #[test]
    fn child_rendered_only_elsewhere_is_skipped() {
        let s = scene();
        let mut doc = (*s.doc).clone();
        let c = doc.append(s.column, "Text");
        doc.set_leaf(c, true);
        // Two renders of C, neither inside the column's instance.
        s.surface
            .place(c, Some(InstanceId(1)), Rect::new(0.0, 45.0, 100.0, 10.0));
        s.surface
            .place(c, Some(InstanceId(1)), Rect::new(150.0, 300.0, 10.0, 10.0));
        let mut sensor = SurfaceSensor::new(SurfaceId(1), Rc::clone(&s.surface), Rc::new(doc));
        let mut e = LocateEvent::new(Rc::new(button()), Point::new(5.0, 40.0));
        sensor.fix_event(&mut e);
        let loc = sensor.locate(&e).unwrap();
        assert_eq!(loc.target, s.column);
        let near = loc.detail.near.unwrap();
        assert_eq!(near.node, s.b);
        assert_eq!(near.pos, NearPos::After);
        assert_eq!(loc.index(), 2);
    }

    #[test]
    fn locate_drives_edge_scroll_and_deactivate_stops_it() {
        let s = scene();
        let surface = Rc::new(
            MemorySurface::new(Viewport::new(Rect::new(0.0, 0.0, 400.0, 400.0)))
                .with_edge_scroll(20.0),
        );
        let root_i = surface.place(s.root, None, Rect::new(0.0, 0.0, 400.0, 400.0));
        surface.place(s.column, Some(root_i), Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut sensor = SurfaceSensor::new(SurfaceId(1), Rc::clone(&surface), s.doc.clone());

        let mut e = LocateEvent::new(Rc::new(button()), Point::new(200.0, 390.0));
        sensor.fix_event(&mut e);
        assert!(sensor.locate(&e).is_some());
        assert_eq!(surface.scrolling(), Some(Point::new(0.0, 1.0)));

        sensor.deactivate();
        assert_eq!(surface.scrolling(), None);
    }

    #[test]
    fn enter_and_hosting() {
        let s = scene();
        let inside = LocateEvent::new(Rc::new(button()), Point::new(10.0, 10.0));
        let outside = LocateEvent::new(Rc::new(button()), Point::new(401.0, 10.0));
        assert!(s.sensor.is_enter(&inside));
        assert!(!s.sensor.is_enter(&outside));
        assert!(s.sensor.hosts_node(s.a));
        assert!(s.sensor.hosts_node(s.root));
        assert!(!s.sensor.hosts_node(NodeId(999)));
    }

    #[test]
    fn registry_normalizes_through_surface_sensor() {
        let s = scene();
        let mut reg = SensorRegistry::new();
        reg.insert(Box::new(s.sensor)).unwrap();
        let ev = PointerEvent::moved(5.0, 18.0).with_origin(SurfaceId(1));
        let payload = Rc::new(button());
        let le = LocateEvent::from_pointer(&payload, &ev, None, &reg);
        assert_eq!(le.canvas, Some(Point::new(5.0, 18.0)));
        assert_eq!(le.sensor, Some(SurfaceId(1)));
        assert!(reg.get(SurfaceId(1)).unwrap().hosts_node(s.column));
    }
}
