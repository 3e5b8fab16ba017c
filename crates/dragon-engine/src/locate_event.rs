#![forbid(unsafe_code)]

//! Coordinate-normalized drag events.
//!
//! Raw pointer events are relative to whichever surface dispatched them. A
//! [`LocateEvent`] carries the same input expressed in global (outer
//! surface) coordinates, plus the canvas point inside the originating
//! nested surface when one is known. Sensors later "fix" the event for
//! their own surface, filling in the canvas point and the element under it.

use std::rc::Rc;

use dragon_core::event::{ElementId, Modifiers, PointerEvent, SurfaceId};
use dragon_core::geometry::Point;

use crate::payload::DragPayload;
use crate::sensor::SensorRegistry;

/// A drag event after coordinate normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct LocateEvent {
    pub payload: Rc<DragPayload>,
    /// Element under the pointer in the surface the event is fixed for.
    pub target: Option<ElementId>,
    /// Surface the raw event was dispatched in (`None` = outer surface).
    pub origin: Option<SurfaceId>,
    /// Pointer in outer-surface coordinates.
    pub global: Point,
    /// Pointer in the content space of `sensor`.
    pub canvas: Option<Point>,
    /// Sensor this event is attached to.
    pub sensor: Option<SurfaceId>,
    pub modifiers: Modifiers,
    /// Set once a sensor has filled in `canvas` and `target`.
    pub fixed: bool,
}

impl LocateEvent {
    /// An outer-surface event at `global` with nothing resolved yet.
    #[must_use]
    pub fn new(payload: Rc<DragPayload>, global: Point) -> Self {
        Self {
            payload,
            target: None,
            origin: None,
            global,
            canvas: None,
            sensor: None,
            modifiers: Modifiers::NONE,
            fixed: false,
        }
    }

    /// Normalize a raw pointer event.
    ///
    /// Events from the outer surface keep their client point as the global
    /// point. Events from a registered nested surface are mapped through
    /// that surface's viewport, producing both the global and the canvas
    /// point, and are attached to that surface's sensor. An event from an
    /// unknown surface falls back to `last_sensor`'s viewport.
    #[must_use]
    pub fn from_pointer(
        payload: &Rc<DragPayload>,
        ev: &PointerEvent,
        last_sensor: Option<SurfaceId>,
        sensors: &SensorRegistry,
    ) -> Self {
        let mut event = Self {
            payload: Rc::clone(payload),
            target: ev.target,
            origin: ev.origin,
            global: ev.client,
            canvas: None,
            sensor: None,
            modifiers: ev.modifiers,
            fixed: false,
        };
        let Some(origin) = ev.origin else {
            return event;
        };

        let viewport_of = |id: SurfaceId| sensors.get(id).and_then(|s| s.viewport());
        let resolved = viewport_of(origin)
            .map(|vp| (origin, vp))
            .or_else(|| last_sensor.and_then(|id| viewport_of(id).map(|vp| (id, vp))));

        if let Some((sensor, vp)) = resolved {
            event.global = vp.client_to_global(ev.client);
            event.canvas = Some(vp.client_to_canvas(ev.client));
            event.sensor = Some(sensor);
        }
        event
    }

    /// The point geometry queries should run against.
    #[must_use]
    pub fn canvas_point(&self) -> Point {
        self.canvas.unwrap_or(self.global)
    }

    #[must_use]
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: SurfaceId) -> Self {
        self.origin = Some(origin);
        self
    }

    #[must_use]
    pub fn with_canvas(mut self, canvas: Point) -> Self {
        self.canvas = Some(canvas);
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySurface;
    use crate::sensor::Sensor;
    use crate::surface::SurfaceSensor;
    use crate::document::{ComponentMeta, NodeId};
    use crate::memory::MemoryDocument;
    use dragon_core::geometry::Rect;
    use dragon_core::viewport::Viewport;

    fn registry(vp: Viewport) -> SensorRegistry {
        let doc = Rc::new(MemoryDocument::new(ComponentMeta::new("Page").container()));
        let surface = MemorySurface::new(vp);
        let mut reg = SensorRegistry::new();
        let sensor: Box<dyn Sensor> = Box::new(SurfaceSensor::new(SurfaceId(1), surface, doc));
        reg.insert(sensor).unwrap();
        reg
    }

    fn payload() -> Rc<DragPayload> {
        Rc::new(DragPayload::nodes([NodeId(1)]))
    }

    #[test]
    fn outer_event_is_global() {
        let reg = registry(Viewport::new(Rect::new(100.0, 100.0, 400.0, 400.0)));
        let ev = PointerEvent::moved(12.0, 34.0).with_target(ElementId(9));
        let le = LocateEvent::from_pointer(&payload(), &ev, None, &reg);
        assert_eq!(le.global, Point::new(12.0, 34.0));
        assert_eq!(le.canvas, None);
        assert_eq!(le.sensor, None);
        assert_eq!(le.target, Some(ElementId(9)));
        assert!(!le.fixed);
        assert_eq!(le.canvas_point(), le.global);
    }

    #[test]
    fn nested_event_maps_through_viewport() {
        let vp = Viewport::new(Rect::new(100.0, 50.0, 400.0, 400.0))
            .with_scale(0.5)
            .with_scroll(Point::new(0.0, 300.0));
        let reg = registry(vp);
        let ev = PointerEvent::moved(40.0, 100.0).with_origin(SurfaceId(1));
        let le = LocateEvent::from_pointer(&payload(), &ev, None, &reg);
        assert_eq!(le.global, Point::new(120.0, 100.0));
        assert_eq!(le.canvas, Some(Point::new(40.0, 400.0)));
        assert_eq!(le.sensor, Some(SurfaceId(1)));
        assert_eq!(le.origin, Some(SurfaceId(1)));
    }

    #[test]
    fn unknown_origin_falls_back_to_last_sensor() {
        let reg = registry(Viewport::new(Rect::new(10.0, 10.0, 100.0, 100.0)));
        let ev = PointerEvent::moved(5.0, 5.0).with_origin(SurfaceId(42));
        let le = LocateEvent::from_pointer(&payload(), &ev, Some(SurfaceId(1)), &reg);
        assert_eq!(le.global, Point::new(15.0, 15.0));
        assert_eq!(le.sensor, Some(SurfaceId(1)));

        let le = LocateEvent::from_pointer(&payload(), &ev, None, &reg);
        assert_eq!(le.global, Point::new(5.0, 5.0));
        assert_eq!(le.sensor, None);
    }
}
