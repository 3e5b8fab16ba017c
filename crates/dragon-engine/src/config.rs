#![forbid(unsafe_code)]

//! Controller configuration.

use dragon_core::event::Modifiers;
use dragon_core::shake::DEFAULT_SHAKE_DISTANCE;

use crate::error::DragonError;

/// Configuration for the drag controller.
#[derive(Clone, Debug, PartialEq)]
pub struct DragonConfig {
    /// Pointer travel (pixels) before a press becomes a drag (default: 4).
    pub shake_distance: f64,
    /// Holding any of these turns a move into a copy (default: Alt or Ctrl).
    pub copy_modifiers: Modifiers,
    /// Whether pressing Escape cancels an active pointer drag (default: true).
    pub cancel_on_escape: bool,
    /// Consult the grid strategy on every drag tick (default: true).
    pub grid_enabled: bool,
}

impl Default for DragonConfig {
    fn default() -> Self {
        Self {
            shake_distance: DEFAULT_SHAKE_DISTANCE,
            copy_modifiers: Modifiers::ALT | Modifiers::CTRL,
            cancel_on_escape: true,
            grid_enabled: true,
        }
    }
}

impl DragonConfig {
    #[must_use]
    pub fn with_shake_distance(mut self, pixels: f64) -> Self {
        self.shake_distance = pixels;
        self
    }

    #[must_use]
    pub fn with_copy_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.copy_modifiers = modifiers;
        self
    }

    /// Escape does not cancel drags.
    #[must_use]
    pub fn no_escape_cancel(mut self) -> Self {
        self.cancel_on_escape = false;
        self
    }

    /// Skip grid handling entirely.
    #[must_use]
    pub fn without_grid(mut self) -> Self {
        self.grid_enabled = false;
        self
    }

    /// Check field ranges.
    ///
    /// # Errors
    ///
    /// [`DragonError::InvalidConfig`] when `shake_distance` is negative or
    /// not finite.
    pub fn validate(&self) -> Result<(), DragonError> {
        if !self.shake_distance.is_finite() || self.shake_distance < 0.0 {
            return Err(DragonError::InvalidConfig {
                field: "shake_distance",
                reason: format!("must be finite and >= 0, got {}", self.shake_distance),
            });
        }
        Ok(())
    }
}
