//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the frame slices handed to `advance`
//! - Seeded RNG only
//! - Boxes addressed by arena index, never by reference
//! - No rendering or platform dependencies

pub mod chain;
pub mod ease;
pub mod jumper;
pub mod platform;
pub mod state;
pub mod tick;
pub mod ticker;
pub mod tween;

pub use chain::BoxChain;
pub use ease::Easing;
pub use jumper::{Jumper, JumperState, Launch, LandingOutcome, Pose};
pub use platform::{Direction, Platform, PlatformId, PlatformKind};
pub use state::{FigureView, GameEvent, GamePhase, GameState, PlatformView};
pub use tick::{Autopilot, TickInput, apply_input, required_hold, tick};
pub use ticker::{Animate, SubscriptionId, Ticker};
pub use tween::Tween;
