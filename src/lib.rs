//! Box Hop - a charge-and-jump platform hopping game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (box chain, recentering, jumper state machine)
//! - `settings`: Frozen game configuration derived from the viewport
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Width of the view in world units, regardless of screen size
    pub const BASE_WIDTH: f32 = 100.0;
    /// Canvas width as a fraction of the canvas height
    pub const CLIENT_ASPECT: f32 = 3.0 / 5.0;
    /// Client height used when no viewport is known
    pub const DEFAULT_CLIENT_HEIGHT: f32 = 1000.0;

    /// Frame slice of the native driver (60 Hz, milliseconds)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Airborne time of a jump (ms); also the velocity-to-distance factor
    pub const JUMP_TIME: f32 = 350.0;
    /// Time to reach full charge (ms)
    pub const CHARGE_DURATION: f32 = 1500.0;
    /// Launch velocity floor
    pub const MIN_VELOCITY: f32 = 0.03;
    /// Trunk and box Y scale at full charge
    pub const MIN_CHARGE_SCALE: f32 = 0.6;
    /// Trunk XZ scale at full charge
    pub const CHARGE_TRUNK_EXPANSION: f32 = 1.3;
    /// Fraction of the trunk height the head sinks by at full charge
    pub const HEAD_SINK_RATIO: f32 = 0.4;

    /// Box entry drop animation
    pub const ENTRY_DURATION: f32 = 400.0;
    pub const ENTRY_DROP_HEIGHT: f32 = 10.0;

    /// World shift animation after a box is added
    pub const RECENTER_DURATION: f32 = 50.0;

    /// Box palette
    pub const BOX_COLORS: [u32; 6] = [0x67C23A, 0xE6A23C, 0xF56C6C, 0x409EFF, 0x909399, 0xB37FEB];
    /// Figure color
    pub const FIGURE_COLOR: u32 = 0x386899;
}

/// Midpoint of two ground-plane points
#[inline]
pub fn ground_midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}
