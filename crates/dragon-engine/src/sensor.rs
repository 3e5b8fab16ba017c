#![forbid(unsafe_code)]

//! Sensors and their registry.
//!
//! A sensor represents one region that can receive drags, usually a
//! rendering surface. The controller asks each sensor whether the pointer
//! is inside it, lets the chosen sensor rewrite the event into its own
//! coordinates, then asks it for a drop location.
//!
//! The registry keeps sensors in registration order, which is also their
//! priority when several claim the same pointer.

use dragon_core::event::SurfaceId;
use dragon_core::viewport::Viewport;

use crate::document::NodeId;
use crate::error::DragonError;
use crate::locate_event::LocateEvent;
use crate::location::DropLocation;

/// A region that can locate drops.
pub trait Sensor {
    /// Stable identifier, unique within a registry.
    fn id(&self) -> SurfaceId;

    /// Whether the sensor currently participates in arbitration.
    fn sensor_available(&self) -> bool {
        true
    }

    /// Whether `event`'s global point lies inside this sensor.
    fn is_enter(&self, event: &LocateEvent) -> bool;

    /// Rewrite `event` into this sensor's coordinates. Idempotent: a
    /// second call on an already fixed event changes nothing.
    fn fix_event(&self, event: &mut LocateEvent);

    /// Compute where the payload would land. `None` means no valid drop
    /// here and any indicator should be cleared.
    fn locate(&mut self, event: &LocateEvent) -> Option<DropLocation>;

    /// Drop per-gesture state. Called when the sensor loses the pointer and
    /// when the gesture ends.
    fn deactivate(&mut self);

    /// Viewport used to map raw events dispatched inside this sensor.
    fn viewport(&self) -> Option<Viewport> {
        None
    }

    /// Node under a fixed event's target.
    fn node_at(&self, _event: &LocateEvent) -> Option<NodeId> {
        None
    }

    /// Whether the node belongs to the document this sensor renders.
    fn hosts_node(&self, _node: NodeId) -> bool {
        false
    }
}

/// Sensors in priority order.
#[derive(Default)]
pub struct SensorRegistry {
    sensors: Vec<Box<dyn Sensor>>,
}

impl SensorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sensor at the lowest priority.
    ///
    /// # Errors
    ///
    /// [`DragonError::DuplicateSensor`] if the id is already registered.
    pub fn insert(&mut self, sensor: Box<dyn Sensor>) -> Result<(), DragonError> {
        let id = sensor.id();
        if self.contains(id) {
            return Err(DragonError::DuplicateSensor(id));
        }
        self.sensors.push(sensor);
        Ok(())
    }

    /// Unregister and return a sensor.
    ///
    /// # Errors
    ///
    /// [`DragonError::UnknownSensor`] if nothing is registered under `id`.
    pub fn remove(&mut self, id: SurfaceId) -> Result<Box<dyn Sensor>, DragonError> {
        let pos = self
            .sensors
            .iter()
            .position(|s| s.id() == id)
            .ok_or(DragonError::UnknownSensor(id))?;
        Ok(self.sensors.remove(pos))
    }

    #[must_use]
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.sensors.iter().any(|s| s.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&dyn Sensor> {
        self.sensors
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut (dyn Sensor + 'static)> {
        self.sensors
            .iter_mut()
            .find(|s| s.id() == id)
            .map(|s| s.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Sensor> {
        self.sensors.iter().map(|s| s.as_ref())
    }

    /// Registered ids in priority order.
    #[must_use]
    pub fn ids(&self) -> Vec<SurfaceId> {
        self.sensors.iter().map(|s| s.id()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl std::fmt::Debug for SensorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
