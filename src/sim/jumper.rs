//! The jumping figure: charge, launch, flight and landing
//!
//! Pressing squashes the figure and the box under it; releasing converts the
//! squash into a horizontal distance covered in a fixed airborne time, while
//! a separate rise/fall profile runs over the same time.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::chain::BoxChain;
use super::ease::Easing;
use super::platform::{Direction, PlatformId};
use super::tween::Tween;
use crate::consts::HEAD_SINK_RATIO;
use crate::settings::Settings;

/// Figure state; cycles `Idle -> Charging -> Airborne -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumperState {
    #[default]
    Idle,
    Charging,
    Airborne,
}

/// Charge-driven deformation of the figure and its box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Head height relative to the figure's rotation center
    pub head_offset: f32,
    pub trunk_scale_xz: f32,
    pub trunk_scale_y: f32,
    pub box_scale_y: f32,
}

impl Pose {
    pub fn neutral(settings: &Settings) -> Self {
        Self {
            head_offset: settings.figure_height / 2.0,
            trunk_scale_xz: 1.0,
            trunk_scale_y: 1.0,
            box_scale_y: 1.0,
        }
    }

    /// Pose at full charge
    pub fn charged(settings: &Settings) -> Self {
        Self {
            head_offset: settings.figure_height / 2.0 - settings.trunk_height() * HEAD_SINK_RATIO,
            trunk_scale_xz: settings.charge_trunk_expansion,
            trunk_scale_y: settings.min_charge_scale,
            box_scale_y: settings.min_charge_scale,
        }
    }

    fn to_array(self) -> [f32; 4] {
        [self.head_offset, self.trunk_scale_xz, self.trunk_scale_y, self.box_scale_y]
    }

    fn from_array([head_offset, trunk_scale_xz, trunk_scale_y, box_scale_y]: [f32; 4]) -> Self {
        Self {
            head_offset,
            trunk_scale_xz,
            trunk_scale_y,
            box_scale_y,
        }
    }
}

/// Parameters of a jump, fixed at release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub velocity: f32,
    pub distance: f32,
    pub direction: Direction,
}

/// How a jump ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOutcome {
    /// Came down on the next box, which is now the standing box
    Landed(PlatformId),
    /// Came down anywhere else, including back on the launch box; ends the session
    Missed,
}

/// Result of advancing the figure by one frame slice
#[derive(Debug, Clone, Copy, Default)]
pub struct JumperStep {
    pub animating: bool,
    pub landing: Option<LandingOutcome>,
}

#[derive(Debug, Clone)]
struct Flight {
    /// Ground-plane (x, z), linear over the whole jump
    horizontal: Tween<2>,
    /// Up to the peak, decelerating
    rise: Tween<1>,
    /// Back down to the rest height, accelerating; starts when `rise` ends
    fall: Tween<1>,
}

impl Flight {
    /// Returns the new ground position (x, z) and height
    fn advance(&mut self, dt: f32) -> (Vec2, f32) {
        let xz = Vec2::from_array(self.horizontal.advance(dt));
        let y = if self.rise.is_running() {
            let y = self.rise.advance(dt)[0];
            if self.rise.is_running() {
                y
            } else {
                self.fall.advance(self.rise.overflow())[0]
            }
        } else {
            self.fall.advance(dt)[0]
        };
        (xz, y)
    }

    fn is_finished(&self) -> bool {
        self.horizontal.is_finished() && !self.rise.is_running() && self.fall.is_finished()
    }
}

#[derive(Debug, Clone)]
pub struct Jumper {
    /// Box under the figure; during flight, the box it jumped from
    standing: PlatformId,
    /// Box the current jump is aimed at
    target: Option<PlatformId>,
    state: JumperState,
    pose: Pose,
    charge_ratio: f32,
    /// Feet position
    position: Vec3,
    charge: Option<Tween<4>>,
    flight: Option<Flight>,
}

impl Jumper {
    /// Place the figure on top of `standing`
    pub fn attach(chain: &BoxChain, standing: PlatformId, settings: &Settings) -> Self {
        let platform = &chain[standing];
        let center = platform.center();
        Self {
            standing,
            target: None,
            state: JumperState::Idle,
            pose: Pose::neutral(settings),
            charge_ratio: 0.0,
            position: Vec3::new(center.x, platform.height, center.y),
            charge: None,
            flight: None,
        }
    }

    /// Begin charging; ignored unless idle
    pub fn press(&mut self, settings: &Settings) -> bool {
        if self.state != JumperState::Idle {
            log::debug!("Press ignored while {:?}", self.state);
            return false;
        }
        self.state = JumperState::Charging;
        self.charge_ratio = 0.0;
        self.charge = Some(Tween::new(
            self.pose.to_array(),
            Pose::charged(settings).to_array(),
            settings.charge_duration,
            Easing::Linear,
        ));
        true
    }

    /// Launch with the charge accumulated so far; ignored unless charging
    pub fn release(&mut self, chain: &BoxChain, settings: &Settings) -> Option<Launch> {
        if self.state != JumperState::Charging {
            log::debug!("Release ignored while {:?}", self.state);
            return None;
        }
        // Keep whatever squash was reached
        if let Some(charge) = self.charge.as_mut() {
            charge.stop();
        }
        self.charge = None;
        self.state = JumperState::Airborne;

        let standing = &chain[self.standing];
        let velocity = (1.0 - self.pose.trunk_scale_y).max(settings.min_velocity);
        self.target = standing.next;
        let distance = match standing.next {
            Some(next) if settings.deterministic_landing => standing.step_to(chain[next].size),
            _ => velocity * settings.jump_time,
        };
        let direction = standing.direction;

        let start = Vec2::new(self.position.x, self.position.z);
        let end = start + direction.unit() * distance;
        let rise_time = settings.jump_time * 0.5;
        let fall_time = settings.jump_time - rise_time;
        let peak = settings.default_height + settings.jump_peak_height;

        self.flight = Some(Flight {
            horizontal: Tween::new(start.to_array(), end.to_array(), settings.jump_time, Easing::Linear),
            rise: Tween::new([self.position.y], [peak], rise_time, Easing::QuarticOut),
            fall: Tween::new([peak], [settings.default_height], fall_time, Easing::QuarticIn),
        });

        Some(Launch {
            velocity,
            distance,
            direction,
        })
    }

    /// Advance charge or flight by `dt` milliseconds
    pub fn advance(&mut self, chain: &mut BoxChain, settings: &Settings, dt: f32) -> JumperStep {
        match self.state {
            JumperState::Idle => JumperStep::default(),
            JumperState::Charging => self.advance_charge(chain, dt),
            JumperState::Airborne => self.advance_flight(chain, settings, dt),
        }
    }

    fn advance_charge(&mut self, chain: &mut BoxChain, dt: f32) -> JumperStep {
        let Some(charge) = self.charge.as_mut() else {
            return JumperStep::default();
        };
        let running = charge.is_running();
        if running {
            self.pose = Pose::from_array(charge.advance(dt));
            self.charge_ratio = charge.progress();
            let platform = &mut chain[self.standing];
            platform.set_compression(self.pose.box_scale_y);
            self.position.y = platform.rest_height * self.pose.box_scale_y;
        }
        // Fully charged figures wait for release without animating
        JumperStep {
            animating: running && charge.is_running(),
            landing: None,
        }
    }

    fn advance_flight(&mut self, chain: &mut BoxChain, settings: &Settings, dt: f32) -> JumperStep {
        let Some(flight) = self.flight.as_mut() else {
            return JumperStep::default();
        };
        let (xz, y) = flight.advance(dt);
        self.position = Vec3::new(xz.x, y, xz.y);
        if !flight.is_finished() {
            return JumperStep {
                animating: true,
                landing: None,
            };
        }
        let outcome = self.land(chain, settings);
        JumperStep {
            animating: false,
            landing: Some(outcome),
        }
    }

    /// Settle the figure and decide where it came down
    fn land(&mut self, chain: &mut BoxChain, settings: &Settings) -> LandingOutcome {
        let feet = Vec2::new(self.position.x, self.position.z);
        let launched_from = self.standing;
        chain[launched_from].reset_height();

        self.flight = None;
        self.pose = Pose::neutral(settings);
        self.state = JumperState::Idle;

        let target = self.target.take();
        match target {
            Some(target) if chain[target].footprint_contains(feet) => {
                self.standing = target;
                LandingOutcome::Landed(target)
            }
            _ => LandingOutcome::Missed,
        }
    }

    /// Follow a world translation (recentering)
    pub fn translate(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.position.x += delta.x;
        self.position.z += delta.y;
        if let Some(flight) = self.flight.as_mut() {
            flight.horizontal.offset(delta.to_array());
        }
    }

    /// Charging toward full squash, or in the air
    pub fn is_animating(&self) -> bool {
        match self.state {
            JumperState::Idle => false,
            JumperState::Charging => self.charge.as_ref().is_some_and(|c| c.is_running()),
            JumperState::Airborne => true,
        }
    }

    pub fn state(&self) -> JumperState {
        self.state
    }

    pub fn standing(&self) -> PlatformId {
        self.standing
    }

    pub fn target(&self) -> Option<PlatformId> {
        self.target
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Share of the full charge time held, in `[0, 1]`
    pub fn charge_ratio(&self) -> f32 {
        self.charge_ratio
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}
