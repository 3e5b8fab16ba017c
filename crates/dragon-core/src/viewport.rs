#![forbid(unsafe_code)]

//! Viewport transform for a nested rendering surface.
//!
//! A nested surface (a sandboxed preview) is placed inside the outer editor
//! at [`Viewport::bounds`], may be zoomed by [`Viewport::scale`] and has its
//! own scroll offset. Three coordinate spaces are involved:
//!
//! | Space | Meaning |
//! |-------|---------|
//! | global | outer surface client coordinates, comparable across surfaces |
//! | client | relative to the nested surface's visible top-left, unscaled |
//! | canvas | nested content coordinates (`client + scroll`) |
//!
//! Rectangles reported by a surface are in canvas space, so all geometry
//! queries run against canvas points.
//!
//! # Invariants
//!
//! 1. `scale` is always finite and strictly positive.
//! 2. `global_to_canvas(canvas_to_global(p)) == p` up to float rounding.
//! 3. `generation` changes whenever any transform input changes.

use crate::geometry::{Point, Rect};

/// Placement, zoom and scroll of a nested surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Rect,
    scroll: Point,
    scale: f64,
    generation: u64,
}

impl Viewport {
    /// A viewport at `bounds` with no scroll and scale 1.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            scroll: Point::default(),
            scale: 1.0,
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.set_scale(scale);
        self
    }

    #[must_use]
    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.set_scroll(scroll);
        self
    }

    /// Surface frame in global coordinates.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    #[must_use]
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Monotonic counter bumped by every setter. Caches keyed on surface
    /// geometry compare against it to detect staleness.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.generation += 1;
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
        self.generation += 1;
    }

    /// Set the zoom factor. Non-finite or non-positive values reset to 1.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self.generation += 1;
    }

    /// Surface-client point to global.
    #[must_use]
    pub fn client_to_global(&self, client: Point) -> Point {
        Point::new(
            self.bounds.left() + client.x * self.scale,
            self.bounds.top() + client.y * self.scale,
        )
    }

    /// Global point to surface-client.
    #[must_use]
    pub fn global_to_client(&self, global: Point) -> Point {
        Point::new(
            (global.x - self.bounds.left()) / self.scale,
            (global.y - self.bounds.top()) / self.scale,
        )
    }

    /// Surface-client point to canvas (content) space.
    #[must_use]
    pub fn client_to_canvas(&self, client: Point) -> Point {
        client.offset(self.scroll)
    }

    /// Canvas point to global, undoing scroll then applying zoom.
    #[must_use]
    pub fn canvas_to_global(&self, canvas: Point) -> Point {
        self.client_to_global(Point::new(
            canvas.x - self.scroll.x,
            canvas.y - self.scroll.y,
        ))
    }

    /// Global point to canvas space.
    #[must_use]
    pub fn global_to_canvas(&self, global: Point) -> Point {
        self.client_to_canvas(self.global_to_client(global))
    }

    /// The visible part of the canvas.
    #[must_use]
    pub fn canvas_bounds(&self) -> Rect {
        Rect::new(
            self.scroll.x,
            self.scroll.y,
            self.bounds.width / self.scale,
            self.bounds.height / self.scale,
        )
    }

    /// Inclusive test against the surface frame in global space.
    #[must_use]
    pub fn contains_global(&self, global: Point) -> bool {
        self.bounds.contains(global)
    }
}
