//! Game session state
//!
//! Owns the box chain, the figure and the seeded RNG, turns input signals
//! into state transitions, and grows the chain after every landing.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chain::BoxChain;
use super::jumper::{Jumper, Launch, LandingOutcome, Pose};
use super::platform::{Direction, PlatformId, PlatformKind};
use super::ticker::Animate;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting input
    Playing,
    /// The figure fell; a new session has to be started
    GameOver,
}

/// Things the surrounding layer (HUD, audio, game-over flow) reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ChargeStarted,
    Launched { distance: f32, direction: Direction },
    Landed { platform: PlatformId },
    Missed { x: f32, z: f32 },
    PlatformAdded { platform: PlatformId },
}

/// What the renderer needs to draw a box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformView {
    pub id: PlatformId,
    pub kind: PlatformKind,
    /// `y` carries the entry drop offset
    pub position: Vec3,
    pub size: f32,
    pub height: f32,
    pub color: u32,
}

/// What the renderer needs to draw the figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigureView {
    pub world_position: Vec3,
    pub head_offset: f32,
    pub trunk_scale_xz: f32,
    pub trunk_scale_y: f32,
    pub color: u32,
}

/// RNG state wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// One play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub rng_state: RngState,
    pub phase: GamePhase,
    pub chain: BoxChain,
    pub jumper: Jumper,
    /// Successful jumps onto a new box
    pub landings: u32,
    /// Simulated time (ms)
    pub time_ms: f64,
    settings: Settings,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Validate the settings and lay out the first two boxes
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::start(settings, seed))
    }

    fn start(settings: Settings, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let mut chain = BoxChain::new();
        let first = chain.create_platform(None, &settings, &mut rng);
        chain.create_platform(Some(first), &settings, &mut rng);
        // The figure starts on the last-but-one box
        let jumper = Jumper::attach(&chain, first, &settings);

        log::info!("New session with seed {}", seed);
        Self {
            rng_state,
            phase: GamePhase::Playing,
            chain,
            jumper,
            landings: 0,
            time_ms: 0.0,
            settings,
            rng,
            events: Vec::new(),
        }
    }

    /// Throw the session away and start over with the same settings
    pub fn restart(&mut self, seed: u64) {
        let settings = std::mem::take(&mut self.settings);
        *self = Self::start(settings, seed);
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Press signal: start charging
    pub fn press(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            log::debug!("Press ignored after game over");
            return false;
        }
        let accepted = self.jumper.press(&self.settings);
        if accepted {
            self.events.push(GameEvent::ChargeStarted);
        }
        accepted
    }

    /// Release signal: jump
    pub fn release(&mut self) -> Option<Launch> {
        if self.phase == GamePhase::GameOver {
            return None;
        }
        let launch = self.jumper.release(&self.chain, &self.settings)?;
        log::debug!(
            "Launch {:?} velocity={} distance={}",
            launch.direction,
            launch.velocity,
            launch.distance
        );
        self.events.push(GameEvent::Launched {
            distance: launch.distance,
            direction: launch.direction,
        });
        Some(launch)
    }

    /// Anything still moving
    pub fn is_animating(&self) -> bool {
        self.jumper.is_animating() || !self.chain.is_settled()
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn on_landing(&mut self, outcome: LandingOutcome) {
        match outcome {
            LandingOutcome::Landed(platform) => {
                self.landings += 1;
                log::info!("Landed on box {} ({} so far)", platform.0, self.landings);
                self.events.push(GameEvent::Landed { platform });

                let added = self.chain.append_platform(&self.settings, &mut self.rng);
                self.follow_world();
                self.events.push(GameEvent::PlatformAdded { platform: added });
            }
            LandingOutcome::Missed => {
                let feet = self.jumper.position();
                log::info!(
                    "Missed at ({}, {}) after {} landings",
                    feet.x,
                    feet.z,
                    self.landings
                );
                self.phase = GamePhase::GameOver;
                self.events.push(GameEvent::Missed { x: feet.x, z: feet.z });
            }
        }
    }

    /// Move the figure along with any recentering shift
    fn follow_world(&mut self) {
        let translation = self.chain.take_translation();
        self.jumper.translate(translation);
    }

    /// Boxes head first
    pub fn platform_views(&self) -> Vec<PlatformView> {
        self.chain
            .iter()
            .map(|p| PlatformView {
                id: p.id,
                kind: p.kind,
                position: Vec3::new(p.position.x, p.drop_offset, p.position.z),
                size: p.size,
                height: p.height,
                color: p.color,
            })
            .collect()
    }

    pub fn figure_view(&self) -> FigureView {
        let Pose {
            head_offset,
            trunk_scale_xz,
            trunk_scale_y,
            ..
        } = self.jumper.pose();
        FigureView {
            world_position: self.jumper.position(),
            head_offset,
            trunk_scale_xz,
            trunk_scale_y,
            color: self.settings.figure_color,
        }
    }
}

impl Animate for GameState {
    fn advance(&mut self, dt: f32) -> bool {
        let was_animating = self.is_animating();
        self.time_ms += dt as f64;

        self.chain.advance(dt);
        self.follow_world();

        let step = self.jumper.advance(&mut self.chain, &self.settings, dt);
        if let Some(outcome) = step.landing {
            self.on_landing(outcome);
        }

        was_animating || self.is_animating()
    }
}
