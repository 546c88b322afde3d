//! Configuration errors
//!
//! The simulation itself has no recoverable failures; everything that can go
//! wrong is caught when the settings are frozen at session start.

/// Rejected game configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("min_size ({min}) exceeds max_size ({max})")]
    SizeRange { min: f32, max: f32 },

    #[error("min_distance ({min_distance}) exceeds min_size ({min_size})")]
    DistanceAboveSize { min_distance: f32, min_size: f32 },

    #[error("max_distance ({max_distance}) is below min_size ({min_size})")]
    DistanceBelowSize { max_distance: f32, min_size: f32 },

    #[error("{field} must be a whole number, got {value}")]
    FractionalBound { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("min_charge_scale must lie in (0, 1], got {0}")]
    ChargeScale(f32),

    #[error("box palette is empty")]
    EmptyPalette,

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
