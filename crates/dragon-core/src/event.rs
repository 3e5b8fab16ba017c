#![forbid(unsafe_code)]

//! Canonical pointer and keyboard input.
//!
//! Embedders translate whatever their windowing layer delivers (DOM events,
//! winit, a test script) into these types before handing them to the drag
//! controller. Every event records which rendering surface it came from so
//! that coordinates can be normalized into a single global space.
//!
//! # Design Notes
//!
//! - `client` is always relative to the originating surface's viewport.
//! - `origin == None` means the outer (top-level) surface.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::Point;

/// Opaque identifier of a rendering surface (outer editor or nested preview).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Opaque handle to a rendered element a pointer event hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    /// Secondary (context menu) button.
    Right,
}

/// What kind of pointer event occurred.
///
/// The `Drag*`/`Drop` variants mirror a platform's native drag-and-drop
/// protocol, where the platform owns the gesture and no shake check applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Native drag began.
    DragStart,
    /// Native drag moved over a surface.
    DragOver,
    /// Native drop onto a surface.
    Drop,
    /// Native drag finished (dropped or abandoned).
    DragEnd,
}

impl PointerKind {
    /// True for the native drag protocol variants.
    #[must_use]
    pub const fn is_native_drag(self) -> bool {
        matches!(
            self,
            Self::DragStart | Self::DragOver | Self::Drop | Self::DragEnd
        )
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Position relative to the originating surface's viewport.
    pub client: Point,
    /// Element under the pointer, when the surface performed a hit test.
    pub target: Option<ElementId>,
    /// Surface the event was dispatched in (`None` = outer surface).
    pub origin: Option<SurfaceId>,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create an outer-surface event with no target and no modifiers.
    #[must_use]
    pub const fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            client: Point::new(x, y),
            target: None,
            origin: None,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shorthand for a primary-button press.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    /// Shorthand for a pointer move.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    /// Shorthand for a pointer release.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    #[must_use]
    pub const fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub const fn with_origin(mut self, origin: SurfaceId) -> Self {
        self.origin = Some(origin);
        self
    }

    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True when the event came from the outer surface.
    #[must_use]
    pub const fn is_outer(&self) -> bool {
        self.origin.is_none()
    }
}

/// Key codes the drag controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Alt,
    Control,
    Shift,
    Super,
    Char(char),
}

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Release,
}

/// A keyboard event.
///
/// `modifiers` reflects the modifier state *after* the key transition, the
/// way platforms report it on keydown/keyup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn is_escape(&self) -> bool {
        matches!(self.code, KeyCode::Escape) && matches!(self.kind, KeyEventKind::Press)
    }
}
