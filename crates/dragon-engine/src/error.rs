#![forbid(unsafe_code)]

//! Error type for the drag engine.
//!
//! Failures during a gesture (no sensor, no container, rejected payload)
//! are routine and surface as absent locations, never as errors. Only
//! misuse of the registry or configuration is reported here.

use std::fmt;

use dragon_core::event::SurfaceId;

/// Engine error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragonError {
    /// A sensor with this id is already registered.
    DuplicateSensor(SurfaceId),
    /// No sensor is registered under this id.
    UnknownSensor(SurfaceId),
    /// A configuration field holds an unusable value.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for DragonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSensor(id) => write!(f, "sensor {id} is already registered"),
            Self::UnknownSensor(id) => write!(f, "sensor {id} is not registered"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for DragonError {}

/// Result alias for engine APIs.
pub type Result<T> = std::result::Result<T, DragonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DragonError::DuplicateSensor(SurfaceId(2)).to_string(),
            "sensor surface#2 is already registered"
        );
        assert_eq!(
            DragonError::UnknownSensor(SurfaceId(5)).to_string(),
            "sensor surface#5 is not registered"
        );
        let err = DragonError::InvalidConfig {
            field: "shake_distance",
            reason: "must be finite".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config field `shake_distance`: must be finite"
        );
    }

    #[test]
    fn is_std_error() {
        fn takes(_: &dyn std::error::Error) {}
        takes(&DragonError::UnknownSensor(SurfaceId(1)));
    }
}
