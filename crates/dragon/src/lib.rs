#![forbid(unsafe_code)]

//! Dragon public facade crate.
//!
//! Re-exports the input and geometry types from `dragon-core` and the
//! controller, sensors and document model from `dragon-engine`, plus a
//! prelude for embedders.

// --- Input re-exports ------------------------------------------------------

pub use dragon_core::event::{
    ElementId, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, PointerEvent,
    PointerKind, SurfaceId,
};
pub use dragon_core::geometry::{Point, Rect};
pub use dragon_core::viewport::Viewport;

// --- Engine re-exports -----------------------------------------------------

pub use dragon_engine::{
    Align, ChildLayout, ComponentMeta, CursorState, Document, DragEndEvent, DragEvent, DragPayload,
    DragPhase, Dragon, DragonConfig, DragonState, DropContainer, DropEffect, DropLocation,
    GridEvent, GridStrategy, InstanceId, ListenerId, LocateEvent, LocationDetail, MemoryDocument,
    MemorySurface, MetaGrid, NearInfo, NearPos, NodeDescriptor, NodeId, NodeInstance,
    RenderSurface, Sensor, SensorRegistry, SurfaceSensor,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Dragon embedders.
pub use dragon_engine::DragonError as Error;

/// Standard result type for Dragon APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ComponentMeta, Document, DragEvent, DragPayload, Dragon, DragonConfig, DropLocation,
        Error, KeyEvent, Modifiers, NodeId, PointerEvent, RenderSurface, Result, Sensor,
        SurfaceId, SurfaceSensor,
    };

    pub use crate::{core, engine};
}

pub use dragon_core as core;
pub use dragon_engine as engine;
