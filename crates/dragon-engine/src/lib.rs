#![forbid(unsafe_code)]

//! Drag-and-drop positioning engine for tree-structured visual editors.
//!
//! The engine owns no document and no rendering. It sees the edited tree
//! through [`Document`], each rendering surface through [`RenderSurface`],
//! and turns pointer input into [`DropLocation`]s: which container a drop
//! would land in, at which child index, and where to draw the indicator.
//!
//! # Pieces
//!
//! - [`Dragon`] runs the gesture lifecycle and arbitrates between sensors.
//! - [`SurfaceSensor`] locates drops on one [`RenderSurface`].
//! - [`DropResolver`] finds the container that accepts the payload.
//! - [`nearest::search`] picks the insertion index among the children.
//! - [`MemoryDocument`] and [`MemorySurface`] are in-memory hosts used by
//!   tests, benches and headless embedders.

pub mod bus;
pub mod config;
pub mod document;
pub mod dragon;
pub mod error;
pub mod grid;
pub mod locate_event;
pub mod location;
pub mod memory;
pub mod nearest;
pub mod payload;
pub mod resolver;
pub mod sensor;
pub mod surface;

pub use bus::{EventBus, ListenerId};
pub use config::DragonConfig;
pub use document::{ComponentHooks, ComponentMeta, Document, NestingRule, NodeId};
pub use dragon::{
    CursorState, DragEndEvent, DragEvent, DragPhase, Dragon, DragonState, DropEffect, Listening,
};
pub use error::{DragonError, Result};
pub use grid::{GridEvent, GridStrategy, MetaGrid};
pub use locate_event::LocateEvent;
pub use location::{Align, DropContainer, DropLocation, LocationDetail, NearInfo, NearPos};
pub use memory::{MemoryDocument, MemorySurface};
pub use nearest::{ChildGeometry, ChildLayout};
pub use payload::{DragPayload, NodeDescriptor};
pub use resolver::DropResolver;
pub use sensor::{Sensor, SensorRegistry};
pub use surface::{InstanceId, NodeInstance, RenderSurface, SurfaceSensor};
