#![forbid(unsafe_code)]

//! Press-to-drag promotion and move deduplication.
//!
//! A press only becomes a drag once the pointer has "shaken": travelled
//! further than a small threshold, moved onto a different element, or been
//! explicitly marked (native drags start shaken). Once shaken the detector
//! never reverts for the lifetime of the gesture.
//!
//! [`MoveFilter`] drops pointer moves that carry no new information: exact
//! repeats of the previous position, and the spurious `(0, 0)` coordinates
//! some platforms report at the end of a native drag.

use crate::event::ElementId;
use crate::geometry::Point;

/// Default shake threshold in pixels.
pub const DEFAULT_SHAKE_DISTANCE: f64 = 4.0;

/// A jump from the last point larger than this (per axis) to exactly
/// `(0, 0)` is treated as a bogus coordinate.
pub const INVALID_POINT_JUMP: f64 = 5.0;

/// Tracks whether a press has turned into a drag.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    origin: Point,
    target: Option<ElementId>,
    threshold_sq: f64,
    shaken: bool,
}

impl ShakeDetector {
    /// Start tracking from the press position and target.
    #[must_use]
    pub fn new(origin: Point, target: Option<ElementId>, threshold: f64) -> Self {
        Self {
            origin,
            target,
            threshold_sq: threshold * threshold,
            shaken: false,
        }
    }

    /// Record that the gesture has been promoted. Irreversible.
    pub fn mark_shaken(&mut self) {
        self.shaken = true;
    }

    #[inline]
    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.shaken
    }

    /// Whether a pointer at `pos` over `target` counts as shaken.
    ///
    /// True when already marked, when the target differs from the press
    /// target, or when the squared distance strictly exceeds the squared
    /// threshold.
    #[must_use]
    pub fn is_shaken(&self, pos: Point, target: Option<ElementId>) -> bool {
        if self.shaken {
            return true;
        }
        if self.target != target {
            return true;
        }
        self.origin.distance_squared(pos) > self.threshold_sq
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// Outcome of offering a move to [`MoveFilter::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveVerdict {
    /// New position; process it.
    Accept,
    /// Same as the previous position.
    Duplicate,
    /// Bogus `(0, 0)` coordinate; the previous position is kept.
    Invalid,
}

/// Deduplicates high-frequency pointer moves.
#[derive(Debug, Clone, Default)]
pub struct MoveFilter {
    last: Option<Point>,
}

impl MoveFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `pos` and remember it unless it is invalid.
    pub fn admit(&mut self, pos: Point) -> MoveVerdict {
        if let Some(last) = self.last {
            if pos.x == 0.0
                && pos.y == 0.0
                && ((last.x - pos.x).abs() > INVALID_POINT_JUMP
                    || (last.y - pos.y).abs() > INVALID_POINT_JUMP)
            {
                return MoveVerdict::Invalid;
            }
            if last == pos {
                return MoveVerdict::Duplicate;
            }
        }
        self.last = Some(pos);
        MoveVerdict::Accept
    }

    /// Forget the previous position.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
