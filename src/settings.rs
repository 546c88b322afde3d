//! Game settings
//!
//! Every size and distance is derived from the viewport; durations are in
//! milliseconds. Settings are validated once and then frozen into the session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Frozen game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Box geometry ===
    /// Smallest box edge length
    pub min_size: f32,
    /// Largest box edge length (the first two boxes always use it)
    pub max_size: f32,
    /// Smallest gap to the next box
    pub min_distance: f32,
    /// Upper bound used by the gap formula
    pub max_distance: f32,
    /// Resting box height
    pub default_height: f32,

    // === Jump ===
    /// Airborne time (ms)
    pub jump_time: f32,
    /// Height above `default_height` at the top of the arc
    pub jump_peak_height: f32,
    /// Time to reach full charge (ms)
    pub charge_duration: f32,
    /// Launch velocity floor
    pub min_velocity: f32,
    /// Trunk and box Y scale at full charge
    pub min_charge_scale: f32,
    /// Trunk XZ scale at full charge
    pub charge_trunk_expansion: f32,
    /// Always land on the center of the next box (test hook)
    pub deterministic_landing: bool,

    // === Figure ===
    pub figure_height: f32,
    pub figure_width: f32,
    pub figure_color: u32,

    // === Animations (ms) ===
    pub entry_duration: f32,
    pub entry_drop_height: f32,
    pub recenter_duration: f32,

    /// Box colors
    pub palette: Vec<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_viewport(DEFAULT_CLIENT_HEIGHT)
    }
}

impl Settings {
    /// Derive settings for a canvas of the given client height
    ///
    /// The canvas is `3/5` as wide as it is tall and always spans
    /// `BASE_WIDTH` world units horizontally, so only the view height
    /// depends on the screen. Box geometry scales with the base width.
    pub fn from_viewport(client_height: f32) -> Self {
        let width = BASE_WIDTH;
        let max_size = width * 3.0 / 10.0;
        log::debug!(
            "Viewport {}px -> view {}x{}",
            client_height,
            width,
            Self::view_height(client_height)
        );

        Self {
            min_size: width / 10.0,
            max_size,
            min_distance: width / 20.0,
            max_distance: width / 5.0,
            default_height: max_size / 2.0,

            jump_time: JUMP_TIME,
            jump_peak_height: width / 5.0,
            charge_duration: CHARGE_DURATION,
            min_velocity: MIN_VELOCITY,
            min_charge_scale: MIN_CHARGE_SCALE,
            charge_trunk_expansion: CHARGE_TRUNK_EXPANSION,
            deterministic_landing: false,

            figure_height: width * 12.0 / 100.0,
            figure_width: width * 4.0 / 100.0,
            figure_color: FIGURE_COLOR,

            entry_duration: ENTRY_DURATION,
            entry_drop_height: ENTRY_DROP_HEIGHT,
            recenter_duration: RECENTER_DURATION,

            palette: BOX_COLORS.to_vec(),
        }
    }

    /// View height in world units for a canvas of the given client height
    pub fn view_height(client_height: f32) -> f32 {
        let client_width = client_height * CLIENT_ASPECT;
        if client_width <= 0.0 {
            return BASE_WIDTH;
        }
        client_height / client_width * BASE_WIDTH
    }

    /// Same settings with the always-land-in-the-center hook switched on
    pub fn deterministic(mut self) -> Self {
        self.deterministic_landing = true;
        self
    }

    /// Gap between the first box and the second
    pub fn default_distance(&self) -> f32 {
        0.5 * (self.max_distance + self.min_size)
    }

    /// Trunk height: figure height minus the head and a small neck gap
    pub fn trunk_height(&self) -> f32 {
        self.figure_height - 1.2 * self.figure_width
    }

    /// Reject malformed configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("max_distance", self.max_distance),
            ("default_height", self.default_height),
            ("jump_time", self.jump_time),
            ("jump_peak_height", self.jump_peak_height),
            ("charge_duration", self.charge_duration),
            ("min_velocity", self.min_velocity),
            ("charge_trunk_expansion", self.charge_trunk_expansion),
            ("figure_height", self.figure_height),
            ("figure_width", self.figure_width),
            ("entry_duration", self.entry_duration),
            ("entry_drop_height", self.entry_drop_height),
            ("recenter_duration", self.recenter_duration),
        ];
        for (field, value) in positive {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.min_distance >= 0.0) {
            return Err(ConfigError::NotPositive {
                field: "min_distance",
                value: self.min_distance,
            });
        }
        // Rounded box sizes and gaps only stay in range for whole-number bounds
        let bounds = [
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
        ];
        for (field, value) in bounds {
            if value.fract() != 0.0 {
                return Err(ConfigError::FractionalBound { field, value });
            }
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::SizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.min_distance > self.min_size {
            return Err(ConfigError::DistanceAboveSize {
                min_distance: self.min_distance,
                min_size: self.min_size,
            });
        }
        if self.max_distance < self.min_size {
            return Err(ConfigError::DistanceBelowSize {
                max_distance: self.max_distance,
                min_size: self.min_size,
            });
        }
        if !(self.min_charge_scale > 0.0 && self.min_charge_scale <= 1.0) {
            return Err(ConfigError::ChargeScale(self.min_charge_scale));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields take the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let settings = Settings::default();
        assert_eq!(settings.min_size, 10.0);
        assert_eq!(settings.max_size, 30.0);
        assert_eq!(settings.min_distance, 5.0);
        assert_eq!(settings.max_distance, 20.0);
        assert_eq!(settings.default_height, 15.0);
        assert_eq!(settings.default_distance(), 15.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_view_height() {
        // 3:5 canvas -> 100 x 166.67 world units
        let h = Settings::view_height(1000.0);
        assert!((h - 100.0 * 5.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_rejects_inverted_sizes() {
        let settings = Settings {
            min_size: 40.0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::SizeRange { .. })));
    }

    #[test]
    fn test_rejects_min_distance_above_min_size() {
        let settings = Settings {
            min_distance: 12.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::DistanceAboveSize { min_distance, min_size })
                if min_distance == 12.0 && min_size == 10.0
        ));
    }

    #[test]
    fn test_rejects_max_distance_below_min_size() {
        let settings = Settings {
            max_distance: 8.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::DistanceBelowSize { max_distance, min_size })
                if max_distance == 8.0 && min_size == 10.0
        ));
    }

    #[test]
    fn test_rejects_fractional_bounds() {
        let settings = Settings {
            min_size: 10.0,
            max_size: 10.6,
            min_distance: 5.4,
            max_distance: 10.6,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::FractionalBound { field: "max_size", .. })
        ));
        let settings = Settings {
            min_distance: 5.4,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::FractionalBound { field: "min_distance", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_and_unchecked_fields() {
        let settings = Settings {
            max_distance: f32::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NotPositive { field: "max_distance", .. })
        ));
        for field in ["jump_peak_height", "charge_trunk_expansion", "entry_drop_height"] {
            let mut settings = Settings::default();
            match field {
                "jump_peak_height" => settings.jump_peak_height = 0.0,
                "charge_trunk_expansion" => settings.charge_trunk_expansion = -1.0,
                _ => settings.entry_drop_height = f32::NAN,
            }
            assert!(
                matches!(settings.validate(), Err(ConfigError::NotPositive { field: f, .. }) if f == field),
                "{} accepted",
                field
            );
        }
        let settings = Settings {
            min_distance: f32::NAN,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_charge_scale() {
        let settings = Settings {
            min_charge_scale: 0.0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::ChargeScale(_))));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let settings = Settings {
            palette: Vec::new(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_rejects_zero_jump_time() {
        let settings = Settings {
            jump_time: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NotPositive { field: "jump_time", .. })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{ "deterministic_landing": true, "jump_time": 500 }"#)
            .expect("valid json");
        assert!(settings.deterministic_landing);
        assert_eq!(settings.jump_time, 500.0);
        assert_eq!(settings.max_size, 30.0);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(Settings::from_json("not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Settings::from_json(r#"{ "min_size": 50 }"#),
            Err(ConfigError::SizeRange { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings::default().deterministic();
        let json = settings.to_json().expect("serializable");
        let parsed = Settings::from_json(&json).expect("roundtrip");
        assert_eq!(parsed, settings);
    }
}
