#![forbid(unsafe_code)]

//! Drag lifecycle controller.
//!
//! [`Dragon`] turns a stream of pointer and keyboard events into a drag
//! gesture: it arms on a press, promotes to dragging once the pointer
//! shakes, picks the sensor under the pointer on every move, asks it for a
//! drop location and finally reports the end of the gesture.
//!
//! # Phases
//!
//! ```text
//! Idle --boost--> Armed --shake--> Dragging --release/escape/press--> Idle
//!   ^               |                                                  |
//!   +----release----+--------------------------------------------------+
//! ```
//!
//! Native drags (the platform owns the gesture) skip `Armed` and start
//! dragging on boost.
//!
//! # Invariants
//!
//! 1. Every gesture that reaches `Dragging` emits exactly one `DragStart`
//!    and exactly one `DragEnd`, in that order, with any number of `Drag`
//!    events between them.
//! 2. A gesture that never shakes emits nothing.
//! 3. When the gesture ends no gesture listener remains registered and the
//!    last active sensor has been deactivated once.
//! 4. Only one sensor is active at a time; switching deactivates the
//!    previous one first.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | No movable node | Move hooks veto every dragged node | Boost aborted, stays `Idle` |
//! | No sensor under the pointer | Pointer outside every surface | Keep the last sensor, else none |
//! | No drop location | Nothing accepts the payload | Location cleared |
//! | Escape pressed mid-drag | User cancellation | `DragEnd` without a location (if `cancel_on_escape`) |
//! | Sensor removed mid-drag | Surface torn down | Deactivated once, falls out of arbitration |

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use dragon_core::event::{
    KeyEvent, Modifiers, MouseButton, PointerEvent, PointerKind, SurfaceId,
};
use dragon_core::shake::{MoveFilter, MoveVerdict, ShakeDetector};
#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::bus::{EventBus, ListenerId};
use crate::config::DragonConfig;
use crate::document::{Document, NodeId, movable_nodes};
use crate::error::DragonError;
use crate::grid::{GridEvent, GridStrategy, MetaGrid};
use crate::locate_event::LocateEvent;
use crate::location::DropLocation;
use crate::payload::DragPayload;
use crate::sensor::{Sensor, SensorRegistry};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Where the controller is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pressed; waiting for the pointer to shake.
    Armed,
    Dragging,
}

/// Hint for a native drag's drop effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Copy,
    Move,
}

/// Cursor decorations requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub dragging: bool,
    pub copy: bool,
}

/// Observable controller state. Published to
/// [`watch_state`](Dragon::watch_state) listeners whenever it changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DragonState {
    pub phase: DragPhase,
    pub active_sensor: Option<SurfaceId>,
    /// The drag currently copies instead of moving.
    pub copy: bool,
    pub cursor: CursorState,
    /// Native text selection is allowed (suppressed during pointer drags).
    pub native_selection: bool,
    /// The drag source receives pointer events (suppressed over grids).
    pub source_pointer_events: bool,
    pub drop_effect: Option<DropEffect>,
    pub location: Option<DropLocation>,
    /// The sensor located successfully over a grid.
    pub can_drop: bool,
}

impl Default for DragonState {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            active_sensor: None,
            copy: false,
            cursor: CursorState::default(),
            native_selection: true,
            source_pointer_events: true,
            drop_effect: None,
            location: None,
            can_drop: false,
        }
    }
}

/// End-of-gesture report.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEndEvent {
    pub payload: Rc<DragPayload>,
    /// Effective copy flag: copy modifiers at release, new data, or slots.
    pub copy: bool,
    /// Location at release; `None` when cancelled or nothing accepted.
    pub location: Option<DropLocation>,
}

/// Lifecycle notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    DragStart(LocateEvent),
    Drag(LocateEvent),
    DragEnd(DragEndEvent),
}

bitflags! {
    /// Event kinds the running gesture reacts to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Listening: u8 {
        const POINTER_MOVE = 1 << 0;
        const POINTER_UP   = 1 << 1;
        const POINTER_DOWN = 1 << 2;
        const DRAG_OVER    = 1 << 3;
        const DROP         = 1 << 4;
        const DRAG_END     = 1 << 5;
        const ESCAPE       = 1 << 6;
        const COPY_KEYS    = 1 << 7;
    }
}

impl Listening {
    fn for_kind(kind: PointerKind) -> Option<Self> {
        match kind {
            PointerKind::Move => Some(Self::POINTER_MOVE),
            PointerKind::Up => Some(Self::POINTER_UP),
            PointerKind::Down => Some(Self::POINTER_DOWN),
            PointerKind::DragOver => Some(Self::DRAG_OVER),
            PointerKind::Drop => Some(Self::DROP),
            PointerKind::DragEnd => Some(Self::DRAG_END),
            PointerKind::DragStart => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Gesture
// ---------------------------------------------------------------------------

/// Everything scoped to one press-to-release gesture.
struct Gesture {
    payload: Rc<DragPayload>,
    boost_event: PointerEvent,
    from_grid: Option<NodeId>,
    /// Payload creates new nodes.
    newbie: bool,
    /// Payload carries a slot.
    force_copy: bool,
    native: bool,
    shake: ShakeDetector,
    moves: MoveFilter,
    last_sensor: Option<SurfaceId>,
    source_sensor: Option<SurfaceId>,
    /// Copy modifiers are held.
    copy: bool,
    did_drop: bool,
    listening: Listening,
}

impl Gesture {
    fn effective_copy(&self) -> bool {
        self.copy || self.newbie || self.force_copy
    }
}

// ---------------------------------------------------------------------------
// Dragon
// ---------------------------------------------------------------------------

/// The drag controller.
pub struct Dragon {
    config: DragonConfig,
    document: Rc<dyn Document>,
    sensors: SensorRegistry,
    grid: Option<Box<dyn GridStrategy>>,
    state: DragonState,
    published: DragonState,
    gesture: Option<Gesture>,
    next_listener: u64,
    events: EventBus<DragEvent>,
    grid_events: EventBus<GridEvent>,
    state_watchers: EventBus<DragonState>,
}

impl Dragon {
    /// Create a controller for `document`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DragonConfig::validate`] failure.
    pub fn new(document: Rc<dyn Document>, config: DragonConfig) -> Result<Self, DragonError> {
        config.validate()?;
        Ok(Self {
            config,
            document,
            sensors: SensorRegistry::new(),
            grid: Some(Box::new(MetaGrid)),
            state: DragonState::default(),
            published: DragonState::default(),
            gesture: None,
            next_listener: 0,
            events: EventBus::new(),
            grid_events: EventBus::new(),
            state_watchers: EventBus::new(),
        })
    }

    /// Replace the grid strategy.
    #[must_use]
    pub fn with_grid_strategy(mut self, strategy: impl GridStrategy + 'static) -> Self {
        self.grid = Some(Box::new(strategy));
        self
    }

    #[must_use]
    pub fn config(&self) -> &DragonConfig {
        &self.config
    }

    #[must_use]
    pub fn document(&self) -> &Rc<dyn Document> {
        &self.document
    }

    #[must_use]
    pub fn state(&self) -> &DragonState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.state.phase
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.phase == DragPhase::Dragging
    }

    #[must_use]
    pub fn active_sensor(&self) -> Option<SurfaceId> {
        self.state.active_sensor
    }

    #[must_use]
    pub fn location(&self) -> Option<&DropLocation> {
        self.state.location.as_ref()
    }

    /// Event kinds the running gesture listens to; empty when idle.
    #[must_use]
    pub fn listening(&self) -> Listening {
        self.gesture
            .as_ref()
            .map_or(Listening::empty(), |g| g.listening)
    }

    /// Payload of the running gesture.
    #[must_use]
    pub fn payload(&self) -> Option<&Rc<DragPayload>> {
        self.gesture.as_ref().map(|g| &g.payload)
    }

    // --- Sensors -----------------------------------------------------------

    /// Register a sensor at the lowest priority.
    ///
    /// # Errors
    ///
    /// [`DragonError::DuplicateSensor`] if the id is taken.
    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>) -> Result<(), DragonError> {
        #[cfg(feature = "tracing")]
        let id = sensor.id();
        self.sensors.insert(sensor)?;
        #[cfg(feature = "tracing")]
        debug!(sensor = %id, "sensor added");
        Ok(())
    }

    /// Unregister a sensor. If it was active in the running gesture it is
    /// deactivated and the gesture continues without it.
    ///
    /// # Errors
    ///
    /// [`DragonError::UnknownSensor`] if nothing is registered under `id`.
    pub fn remove_sensor(&mut self, id: SurfaceId) -> Result<Box<dyn Sensor>, DragonError> {
        let mut sensor = self.sensors.remove(id)?;
        if let Some(g) = self.gesture.as_mut() {
            if g.last_sensor == Some(id) {
                sensor.deactivate();
                g.last_sensor = None;
                self.state.active_sensor = None;
            }
            if g.source_sensor == Some(id) {
                g.source_sensor = None;
            }
        } else if self.state.active_sensor == Some(id) {
            self.state.active_sensor = None;
        }
        #[cfg(feature = "tracing")]
        debug!(sensor = %id, "sensor removed");
        self.publish();
        Ok(sensor)
    }

    #[must_use]
    pub fn sensor(&self, id: SurfaceId) -> Option<&dyn Sensor> {
        self.sensors.get(id)
    }

    pub fn sensor_mut(&mut self, id: SurfaceId) -> Option<&mut (dyn Sensor + 'static)> {
        self.sensors.get_mut(id)
    }

    #[must_use]
    pub fn sensors(&self) -> &SensorRegistry {
        &self.sensors
    }

    // --- Subscriptions -----------------------------------------------------

    fn allocate_listener(&mut self) -> ListenerId {
        let id = ListenerId::from_raw(self.next_listener);
        self.next_listener += 1;
        id
    }

    /// Every lifecycle event.
    pub fn on_event(&mut self, listener: impl FnMut(&DragEvent) + 'static) -> ListenerId {
        let id = self.allocate_listener();
        self.events.subscribe_as(id, listener);
        id
    }

    pub fn on_drag_start(&mut self, mut listener: impl FnMut(&LocateEvent) + 'static) -> ListenerId {
        self.on_event(move |e| {
            if let DragEvent::DragStart(le) = e {
                listener(le);
            }
        })
    }

    pub fn on_drag(&mut self, mut listener: impl FnMut(&LocateEvent) + 'static) -> ListenerId {
        self.on_event(move |e| {
            if let DragEvent::Drag(le) = e {
                listener(le);
            }
        })
    }

    pub fn on_drag_end(&mut self, mut listener: impl FnMut(&DragEndEvent) + 'static) -> ListenerId {
        self.on_event(move |e| {
            if let DragEvent::DragEnd(end) = e {
                listener(end);
            }
        })
    }

    pub fn on_grid(&mut self, listener: impl FnMut(&GridEvent) + 'static) -> ListenerId {
        let id = self.allocate_listener();
        self.grid_events.subscribe_as(id, listener);
        id
    }

    /// Called with the new state after every change.
    pub fn watch_state(&mut self, listener: impl FnMut(&DragonState) + 'static) -> ListenerId {
        let id = self.allocate_listener();
        self.state_watchers.subscribe_as(id, listener);
        id
    }

    /// Remove any listener. Returns false if `id` is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
            | self.grid_events.unsubscribe(id)
            | self.state_watchers.unsubscribe(id)
    }

    // --- Entry points ------------------------------------------------------

    /// Handle a press on a draggable shell. `factory` produces the payload
    /// for the press; `None` means nothing is draggable there.
    ///
    /// The press itself is consumed here and must not also be passed to
    /// [`handle_pointer`](Self::handle_pointer).
    pub fn press(
        &mut self,
        ev: &PointerEvent,
        factory: impl FnOnce(&PointerEvent) -> Option<DragPayload>,
    ) -> bool {
        if ev.button == MouseButton::Right {
            #[cfg(feature = "tracing")]
            trace!("secondary press ignored");
            return false;
        }
        let Some(payload) = factory(ev) else {
            return false;
        };
        self.boost(payload, ev, None)
    }

    /// Start a gesture for `payload` from the press (or native drag start)
    /// `ev`. `from_grid` names the grid the payload is dragged out of.
    ///
    /// Returns false when no dragged node may move.
    pub fn boost(
        &mut self,
        payload: DragPayload,
        ev: &PointerEvent,
        from_grid: Option<NodeId>,
    ) -> bool {
        if let Some(g) = self.gesture.take() {
            #[cfg(feature = "tracing")]
            debug!("boost during a running gesture; ending it first");
            self.over(g, None);
        }
        self.state.active_sensor = None;

        let payload = match payload {
            DragPayload::ExistingNodes { nodes } => {
                let movable = movable_nodes(self.document.as_ref(), &nodes);
                if movable.is_empty() {
                    #[cfg(feature = "tracing")]
                    debug!(requested = nodes.len(), "boost aborted: no movable node");
                    self.publish();
                    return false;
                }
                if movable.len() != nodes.len() {
                    #[cfg(feature = "tracing")]
                    debug!(
                        dropped = nodes.len() - movable.len(),
                        "immovable nodes left out of the payload"
                    );
                }
                DragPayload::ExistingNodes { nodes: movable }
            }
            other => other,
        };
        let payload = Rc::new(payload);
        let newbie = !payload.is_existing();
        let force_copy = payload.has_slot(self.document.as_ref());
        let native = ev.kind.is_native_drag();
        let source_sensor = payload.first_node().and_then(|node| {
            self.sensors
                .iter()
                .find(|s| s.hosts_node(node))
                .map(|s| s.id())
        });

        let mut listening = if native {
            Listening::DRAG_OVER | Listening::DROP | Listening::DRAG_END | Listening::POINTER_DOWN
        } else {
            Listening::POINTER_MOVE | Listening::POINTER_UP | Listening::POINTER_DOWN
        };
        if !newbie && !native {
            listening |= Listening::COPY_KEYS;
        }

        let mut gesture = Gesture {
            payload,
            boost_event: *ev,
            from_grid,
            newbie,
            force_copy,
            native,
            shake: ShakeDetector::new(ev.client, ev.target, self.config.shake_distance),
            moves: MoveFilter::new(),
            last_sensor: None,
            source_sensor,
            copy: false,
            did_drop: false,
            listening,
        };
        self.state.phase = DragPhase::Armed;
        #[cfg(feature = "tracing")]
        debug!(native, newbie, force_copy, "boost");

        if native {
            self.state.drop_effect = Some(if newbie || force_copy {
                DropEffect::Copy
            } else {
                DropEffect::Move
            });
            self.drag_start(&mut gesture);
        } else {
            self.state.native_selection = false;
        }
        self.gesture = Some(gesture);
        self.publish();
        true
    }

    /// Feed a pointer event. Ignored when no gesture is running or the
    /// gesture does not listen to this kind.
    pub fn handle_pointer(&mut self, ev: &PointerEvent) {
        let Some(mut g) = self.gesture.take() else {
            return;
        };
        let wanted = Listening::for_kind(ev.kind).is_some_and(|flag| g.listening.contains(flag));
        if !wanted {
            self.gesture = Some(g);
            return;
        }
        match ev.kind {
            PointerKind::Move | PointerKind::DragOver => {
                self.on_move(&mut g, ev);
                self.gesture = Some(g);
            }
            PointerKind::Drop => {
                g.did_drop = true;
                self.gesture = Some(g);
            }
            _ => self.over(g, Some(ev)),
        }
        self.publish();
    }

    /// Feed a keyboard event: Escape cancels, modifier changes toggle copy.
    pub fn handle_key(&mut self, ev: &KeyEvent) {
        let Some(mut g) = self.gesture.take() else {
            return;
        };
        if ev.is_escape() && g.listening.contains(Listening::ESCAPE) {
            #[cfg(feature = "tracing")]
            debug!("drag cancelled by escape");
            self.state.location = None;
            self.over(g, None);
        } else {
            if g.listening.contains(Listening::COPY_KEYS) {
                self.check_copy(&mut g, ev.modifiers, false);
            }
            self.gesture = Some(g);
        }
        self.publish();
    }

    /// End the running gesture without a drop.
    pub fn cancel(&mut self) {
        let Some(g) = self.gesture.take() else {
            return;
        };
        self.state.location = None;
        self.over(g, None);
        self.publish();
    }

    // --- Gesture internals -------------------------------------------------

    fn on_move(&mut self, g: &mut Gesture, ev: &PointerEvent) {
        if self.state.phase == DragPhase::Dragging {
            self.drag(g, ev);
            return;
        }
        if g.shake.is_shaken(ev.client, ev.target) {
            self.drag_start(g);
            self.drag(g, ev);
        }
    }

    fn drag_start(&mut self, g: &mut Gesture) {
        self.state.phase = DragPhase::Dragging;
        g.shake.mark_shaken();
        let mut le = LocateEvent::from_pointer(&g.payload, &g.boost_event, g.last_sensor, &self.sensors);
        if g.newbie || g.force_copy {
            self.set_copy_state(true);
        } else {
            self.choose_sensor(g, &mut le);
        }
        self.state.cursor.dragging = true;
        if !g.native && self.config.cancel_on_escape {
            g.listening |= Listening::ESCAPE;
        }
        #[cfg(feature = "tracing")]
        debug!(sensor = ?g.last_sensor, "drag start");
        self.events.emit(&DragEvent::DragStart(le));
    }

    fn drag(&mut self, g: &mut Gesture, ev: &PointerEvent) {
        self.check_copy(g, ev.modifiers, ev.kind.is_native_drag());
        let verdict = g.moves.admit(ev.client);
        if verdict != MoveVerdict::Accept {
            #[cfg(feature = "tracing")]
            trace!(?verdict, x = ev.client.x, y = ev.client.y, "move skipped");
            return;
        }

        let mut le = LocateEvent::from_pointer(&g.payload, ev, g.last_sensor, &self.sensors);
        let sensor = self.choose_sensor(g, &mut le);

        if let Some(grid) = self.grid_hit(sensor, &le) {
            self.state.source_pointer_events = false;
            self.grid_events.emit(&GridEvent::Sleeping(false));
            if g.from_grid == Some(grid) {
                self.state.location = None;
                self.clear_state();
                self.events.emit(&DragEvent::Drag(le));
                return;
            }
            let can_drop = sensor
                .and_then(|id| self.sensors.get_mut(id))
                .and_then(|s| s.locate(&le))
                .is_some();
            self.state.can_drop = can_drop;
            if can_drop {
                #[cfg(feature = "tracing")]
                trace!(%grid, "grid placeholder");
                self.grid_events.emit(&GridEvent::AddPlaceholder {
                    grid,
                    from_grid: g.from_grid,
                    node: g.payload.first_node(),
                    global: le.global,
                });
                self.state.location = None;
                self.clear_state();
                self.events.emit(&DragEvent::Drag(le));
                return;
            }
        } else if self.grid_active() {
            self.state.can_drop = false;
            self.grid_events.emit(&GridEvent::RemovePlaceholder);
            self.grid_events.emit(&GridEvent::Sleeping(true));
        }

        self.state.location = sensor.and_then(|id| self.sensors.get_mut(id)).and_then(|s| {
            s.fix_event(&mut le);
            s.locate(&le)
        });
        self.events.emit(&DragEvent::Drag(le));
    }

    /// Pick the sensor for `le`, attach it and let it fix the event.
    fn choose_sensor(&mut self, g: &mut Gesture, le: &mut LocateEvent) -> Option<SurfaceId> {
        let event: &LocateEvent = le;
        let attached = event
            .sensor
            .filter(|id| self.sensors.get(*id).is_some_and(|s| s.is_enter(event)));
        let chosen = attached
            .or_else(|| {
                self.sensors
                    .iter()
                    .find(|s| s.sensor_available() && s.is_enter(event))
                    .map(|s| s.id())
            })
            .or_else(|| {
                [g.last_sensor, event.sensor, g.source_sensor]
                    .into_iter()
                    .flatten()
                    .find(|id| self.sensors.contains(*id))
            });

        if chosen != g.last_sensor {
            if let Some(prev) = g.last_sensor
                && let Some(s) = self.sensors.get_mut(prev)
            {
                s.deactivate();
            }
            #[cfg(feature = "tracing")]
            debug!(from = ?g.last_sensor, to = ?chosen, "sensor switch");
            g.last_sensor = chosen;
        }
        if let Some(id) = chosen {
            le.sensor = Some(id);
            if let Some(s) = self.sensors.get(id) {
                s.fix_event(le);
            }
        }
        self.state.active_sensor = chosen;
        chosen
    }

    fn grid_active(&self) -> bool {
        self.config.grid_enabled && self.grid.is_some()
    }

    fn grid_hit(&self, sensor: Option<SurfaceId>, le: &LocateEvent) -> Option<NodeId> {
        if !self.config.grid_enabled {
            return None;
        }
        let strategy = self.grid.as_ref()?;
        let node = self.sensors.get(sensor?)?.node_at(le)?;
        strategy.grid_of(self.document.as_ref(), node)
    }

    fn check_copy(&mut self, g: &mut Gesture, modifiers: Modifiers, native: bool) {
        if native || g.newbie {
            return;
        }
        if modifiers.intersects(self.config.copy_modifiers) {
            g.copy = true;
            self.set_copy_state(true);
        } else {
            g.copy = false;
            if !g.force_copy {
                self.set_copy_state(false);
            }
        }
    }

    fn set_copy_state(&mut self, copy: bool) {
        self.state.copy = copy;
        self.state.cursor.copy = copy;
    }

    /// Transient decorations only; the phase and location are untouched.
    fn clear_state(&mut self) {
        self.state.cursor = CursorState::default();
    }

    /// Terminate `g`. Dropping the gesture removes all of its listeners.
    fn over(&mut self, mut g: Gesture, ev: Option<&PointerEvent>) {
        self.state.source_pointer_events = true;

        if let Some(ev) = ev
            && self.state.phase == DragPhase::Dragging
            && self.state.can_drop
        {
            let mut le = LocateEvent::from_pointer(&g.payload, ev, g.last_sensor, &self.sensors);
            let sensor = self.choose_sensor(&mut g, &mut le);
            if let Some(grid) = self.grid_hit(sensor, &le) {
                let node = g.payload.first_node();
                if node != Some(grid) {
                    #[cfg(feature = "tracing")]
                    debug!(%grid, "grid drop");
                    self.grid_events.emit(&GridEvent::Drop { grid, node });
                }
            }
        }
        if self.grid_active() {
            self.grid_events.emit(&GridEvent::RemovePlaceholder);
        }

        if let Some(id) = g.last_sensor
            && let Some(s) = self.sensors.get_mut(id)
        {
            s.deactivate();
        }

        if g.native {
            if !g.did_drop {
                self.state.location = None;
            }
        } else {
            self.state.native_selection = true;
        }
        self.clear_state();

        if self.state.phase == DragPhase::Dragging {
            let end = DragEndEvent {
                payload: Rc::clone(&g.payload),
                copy: g.effective_copy(),
                location: self.state.location.clone(),
            };
            self.state.phase = DragPhase::Idle;
            #[cfg(feature = "tracing")]
            debug!(copy = end.copy, located = end.location.is_some(), "drag end");
            self.events.emit(&DragEvent::DragEnd(end));
        }
        self.state.phase = DragPhase::Idle;
        self.state.location = None;
        self.state.can_drop = false;
        self.state.drop_effect = None;
        self.set_copy_state(false);
    }

    fn publish(&mut self) {
        if self.state != self.published {
            self.published = self.state.clone();
            self.state_watchers.emit(&self.state);
        }
    }
}

impl fmt::Debug for Dragon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dragon")
            .field("config", &self.config)
            .field("sensors", &self.sensors)
            .field("state", &self.state)
            .field("listening", &self.listening())
            .finish()
    }
}
