#![forbid(unsafe_code)]

//! Core: geometry, canonical pointer input, surface viewports and shake detection.

pub mod event;
pub mod geometry;
pub mod shake;
pub mod viewport;
