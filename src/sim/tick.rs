//! Input application and the per-frame step
//!
//! Press and release are edge signals: the input layer sets them for a
//! single frame. The autopilot plays the game by itself for demos.

use super::jumper::JumperState;
use super::state::{GamePhase, GameState};
use super::ticker::Animate;

/// Input signals for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Pointer or touch went down
    pub press: bool,
    /// Pointer or touch went up
    pub release: bool,
}

impl TickInput {
    pub fn press() -> Self {
        Self {
            press: true,
            ..Default::default()
        }
    }

    pub fn release() -> Self {
        Self {
            release: true,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.press && !self.release
    }
}

/// Feed the frame's signals to the session; returns whether any was accepted
pub fn apply_input(state: &mut GameState, input: &TickInput) -> bool {
    let mut accepted = false;
    if input.press {
        accepted |= state.press();
    }
    if input.release {
        accepted |= state.release().is_some();
    }
    accepted
}

/// Apply input and advance one frame slice of `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    let accepted = apply_input(state, input);
    state.advance(dt) || accepted
}

/// Demo player: holds each press just long enough to reach the next box's center
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    held: f32,
    hold_for: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this frame's input
    pub fn next_input(&mut self, state: &GameState, dt: f32) -> TickInput {
        if state.phase == GamePhase::GameOver {
            return TickInput::default();
        }
        match state.jumper.state() {
            // Wait for the world to stop moving before the next jump
            JumperState::Idle if state.chain.is_settled() => {
                self.held = 0.0;
                self.hold_for = required_hold(state);
                log::debug!("Autopilot holding for {:.0}ms", self.hold_for);
                TickInput::press()
            }
            JumperState::Charging => {
                self.held += dt;
                if self.held >= self.hold_for {
                    TickInput::release()
                } else {
                    TickInput::default()
                }
            }
            _ => TickInput::default(),
        }
    }
}

/// Charge time (ms) that carries the figure onto the center of the next box
pub fn required_hold(state: &GameState) -> f32 {
    let settings = state.settings();
    let standing = &state.chain[state.jumper.standing()];
    let Some(next) = standing.next else {
        return 0.0;
    };
    let feet = state.jumper.position();
    let gap = (state.chain[next].center() - glam::Vec2::new(feet.x, feet.z)).dot(standing.direction.unit());
    let velocity = (gap / settings.jump_time).max(settings.min_velocity);
    velocity / (1.0 - settings.min_charge_scale) * settings.charge_duration
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    const DT: f32 = 10.0;

    #[test]
    fn test_release_without_press_ignored() {
        let mut state = GameState::new(Settings::default(), 1).expect("valid");
        assert!(!tick(&mut state, &TickInput::release(), DT));
        assert_eq!(state.jumper.state(), JumperState::Idle);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_press_and_release_same_frame() {
        let mut state = GameState::new(Settings::default(), 1).expect("valid");
        let input = TickInput {
            press: true,
            release: true,
        };
        assert!(tick(&mut state, &input, DT));
        assert_eq!(state.jumper.state(), JumperState::Airborne);
    }

    #[test]
    fn test_required_hold_for_opening_gap() {
        let state = GameState::new(Settings::default(), 1).expect("valid");
        // 45 units in 350ms, full charge (0.4) takes 1500ms
        let expected = 45.0 / 350.0 / 0.4 * 1500.0;
        assert!((required_hold(&state) - expected).abs() < 1e-2);
    }

    #[test]
    fn test_autopilot_keeps_landing() {
        let mut state = GameState::new(Settings::default(), 2024).expect("valid");
        let mut pilot = Autopilot::new();
        let mut frames = 0;
        while state.landings < 10 {
            let input = pilot.next_input(&state, DT);
            tick(&mut state, &input, DT);
            frames += 1;
            assert_eq!(state.phase, GamePhase::Playing, "missed after {} landings", state.landings);
            assert!(frames < 10_000);
        }
        let events = state.drain_events();
        let added = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlatformAdded { .. }))
            .count();
        assert_eq!(added, 10);
    }
}
