//! The box chain and the world recentering shift
//!
//! The camera never moves. Whenever a box is added, the midpoint of the two
//! newest boxes is eased back to the origin by translating every box in the
//! chain, one frame delta at a time.

use std::ops::{Index, IndexMut};

use glam::Vec2;
use rand::Rng;

use super::ease::Easing;
use super::platform::{Platform, PlatformId};
use super::tween::Tween;
use crate::ground_midpoint;
use crate::settings::Settings;

/// An in-progress recentering shift
#[derive(Debug, Clone)]
struct Recenter {
    /// Virtual shift eased from (0, 0) to the midpoint
    tween: Tween<2>,
    /// Portion of the shift already subtracted from the chain
    applied: Vec2,
}

impl Recenter {
    fn target(&self) -> Vec2 {
        Vec2::from_array(self.tween.target())
    }
}

/// Arena-backed doubly linked chain of boxes; only ever grows
#[derive(Debug, Clone, Default)]
pub struct BoxChain {
    platforms: Vec<Platform>,
    tail: Option<PlatformId>,
    recenter: Option<Recenter>,
    /// Translation applied to the world since the last `take_translation`
    translation: Vec2,
}

impl BoxChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a box chained after `previous` and make it the tail
    pub fn create_platform<R: Rng>(
        &mut self,
        previous: Option<PlatformId>,
        settings: &Settings,
        rng: &mut R,
    ) -> PlatformId {
        let id = PlatformId(self.platforms.len());
        let platform = Platform::generate(id, previous.and_then(|p| self.get(p)), settings, rng);
        log::debug!(
            "Box {} size={} at ({}, {}) next {:?} +{}",
            id.0,
            platform.size,
            platform.position.x,
            platform.position.z,
            platform.direction,
            platform.distance
        );

        if let Some(prev) = previous.and_then(|p| self.platforms.get_mut(p.0)) {
            prev.next = Some(id);
        }
        self.platforms.push(platform);
        self.tail = Some(id);
        id
    }

    /// Add a box after the tail and start recentering on the two newest boxes
    pub fn append_platform<R: Rng>(&mut self, settings: &Settings, rng: &mut R) -> PlatformId {
        // The shift deltas assume one ramp from the origin at a time
        self.settle_recenter();
        let id = self.create_platform(self.tail, settings, rng);
        self.recenter(settings.recenter_duration);
        id
    }

    /// Start easing the midpoint of the two newest boxes to the origin
    pub fn recenter(&mut self, duration: f32) {
        self.settle_recenter();
        let Some(target) = self.recent_midpoint() else {
            return;
        };
        log::debug!("Recentering by ({}, {}) over {}ms", target.x, target.y, duration);
        self.recenter = Some(Recenter {
            tween: Tween::new([0.0, 0.0], target.to_array(), duration, Easing::QuadraticOut),
            applied: Vec2::ZERO,
        });
    }

    /// Midpoint of the tail and the box before it, as (x, z)
    pub fn recent_midpoint(&self) -> Option<Vec2> {
        let last = &self[self.tail?];
        let second_last = &self[last.previous?];
        Some(ground_midpoint(last.center(), second_last.center()))
    }

    /// Advance entry and recentering animations; returns whether any is still running
    pub fn advance(&mut self, dt: f32) -> bool {
        let mut animating = false;
        for platform in &mut self.platforms {
            animating |= platform.advance_entry(dt);
        }
        animating |= self.advance_recenter(dt);
        animating
    }

    fn advance_recenter(&mut self, dt: f32) -> bool {
        let Some(recenter) = self.recenter.as_mut() else {
            return false;
        };
        let sample = Vec2::from_array(recenter.tween.advance(dt));
        let delta = sample - recenter.applied;
        recenter.applied = sample;
        let running = recenter.tween.is_running();

        self.shift(delta);
        if !running {
            self.recenter = None;
        }
        running
    }

    /// Finish an outstanding shift immediately
    fn settle_recenter(&mut self) {
        if let Some(recenter) = self.recenter.take() {
            let rest = recenter.target() - recenter.applied;
            log::warn!("Recenter still running; settling remaining ({}, {})", rest.x, rest.y);
            self.shift(rest);
        }
    }

    /// Subtract `delta` from every box, walking from the tail to the head
    fn shift(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            let platform = &mut self.platforms[id.0];
            platform.translate(-delta);
            cursor = platform.previous;
        }
        self.translation -= delta;
    }

    /// World translation applied since the last call
    pub fn take_translation(&mut self) -> Vec2 {
        std::mem::take(&mut self.translation)
    }

    pub fn is_recentering(&self) -> bool {
        self.recenter.is_some()
    }

    /// No shift running and every box has finished entering
    pub fn is_settled(&self) -> bool {
        !self.is_recentering() && self.platforms.iter().all(Platform::is_settled)
    }

    pub fn get(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id.0)
    }

    pub fn get_mut(&mut self, id: PlatformId) -> Option<&mut Platform> {
        self.platforms.get_mut(id.0)
    }

    pub fn tail(&self) -> Option<PlatformId> {
        self.tail
    }

    pub fn head(&self) -> Option<PlatformId> {
        self.platforms.first().map(|p| p.id)
    }

    pub fn previous(&self, id: PlatformId) -> Option<PlatformId> {
        self.get(id)?.previous
    }

    pub fn next(&self, id: PlatformId) -> Option<PlatformId> {
        self.get(id)?.next
    }

    /// Boxes in generation order, head first
    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl Index<PlatformId> for BoxChain {
    type Output = Platform;

    fn index(&self, id: PlatformId) -> &Platform {
        &self.platforms[id.0]
    }
}

impl IndexMut<PlatformId> for BoxChain {
    fn index_mut(&mut self, id: PlatformId) -> &mut Platform {
        &mut self.platforms[id.0]
    }
}
