//! Boxes the figure jumps between
//!
//! Boxes form a doubly linked chain stored in an arena (`BoxChain`); the
//! links here are arena indices. The figure only ever travels toward +X or
//! -Z, so every box is placed along one of those two axes from its
//! predecessor.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ease::Easing;
use super::tween::Tween;
use crate::settings::Settings;

/// Index of a box in its chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformId(pub usize);

/// Axis along which the next box is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    PosX,
    NegZ,
}

impl Direction {
    /// Unit step on the ground plane as (x, z)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::PosX => Vec2::X,
            Direction::NegZ => Vec2::NEG_Y,
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random::<f32>() < 0.5 {
            Direction::PosX
        } else {
            Direction::NegZ
        }
    }
}

/// Box shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Cube,
}

#[derive(Debug, Clone)]
pub struct Platform {
    pub id: PlatformId,
    pub kind: PlatformKind,
    pub previous: Option<PlatformId>,
    pub next: Option<PlatformId>,
    /// Edge length of the square top
    pub size: f32,
    pub color: u32,
    /// Visual height, squashed while the figure charges on top of it
    pub height: f32,
    /// Height at rest
    pub rest_height: f32,
    /// `y` stays 0; the entry drop is tracked in `drop_offset`
    pub position: Vec3,
    /// Where the next box goes
    pub direction: Direction,
    /// Gap between this box's edge and the next box's edge
    pub distance: f32,
    /// Vertical offset of the entry animation (0 once settled)
    pub drop_offset: f32,
    entry: Option<Tween<1>>,
}

impl Platform {
    /// Roll a new box after `previous`
    ///
    /// The first two boxes of a chain are fixed: largest size, default
    /// direction and gap, no entry animation. Color is always random.
    pub fn generate<R: Rng>(
        id: PlatformId,
        previous: Option<&Platform>,
        settings: &Settings,
        rng: &mut R,
    ) -> Self {
        let fixed = previous.is_none_or(|p| p.previous.is_none());

        let size = if fixed {
            settings.max_size
        } else {
            (rng.random::<f32>() * (settings.max_size - settings.min_size)).round() + settings.min_size
        };
        let color = settings.palette[rng.random_range(0..settings.palette.len())];
        let direction = if fixed {
            Direction::default()
        } else {
            Direction::random(rng)
        };
        let distance = if fixed {
            settings.default_distance()
        } else {
            (settings.min_distance + rng.random::<f32>() * (settings.max_distance - settings.min_size))
                .round()
        };

        let position = match previous {
            Some(prev) => {
                let step = prev.size / 2.0 + prev.distance + size / 2.0;
                let xz = prev.center() + prev.direction.unit() * step;
                Vec3::new(xz.x, 0.0, xz.y)
            }
            None => Vec3::ZERO,
        };

        let entry = (!fixed).then(|| {
            Tween::new(
                [settings.entry_drop_height],
                [0.0],
                settings.entry_duration,
                Easing::BounceOut,
            )
        });

        Self {
            id,
            kind: PlatformKind::Cube,
            previous: previous.map(|p| p.id),
            next: None,
            size,
            color,
            height: settings.default_height,
            rest_height: settings.default_height,
            position,
            direction,
            distance,
            drop_offset: entry.as_ref().map_or(0.0, |t| t.value()[0]),
            entry,
        }
    }

    /// Center of the top face on the ground plane, as (x, z)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Whether a ground-plane point lies on the top face (edges included)
    pub fn footprint_contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        let d = (point - self.center()).abs();
        d.x <= half && d.y <= half
    }

    /// Center-to-center distance to a following box of the given size
    pub fn step_to(&self, next_size: f32) -> f32 {
        self.size / 2.0 + self.distance + next_size / 2.0
    }

    /// Squash to `ratio` of the rest height
    pub fn set_compression(&mut self, ratio: f32) {
        self.height = self.rest_height * ratio.clamp(0.0, 1.0);
    }

    pub fn reset_height(&mut self) {
        self.height = self.rest_height;
    }

    /// Move on the ground plane by (dx, dz)
    pub fn translate(&mut self, delta: Vec2) {
        self.position.x += delta.x;
        self.position.z += delta.y;
    }

    /// True once the entry animation (if any) has finished
    pub fn is_settled(&self) -> bool {
        self.entry.as_ref().is_none_or(|t| !t.is_running())
    }

    /// Advance the entry animation; returns whether it is still running
    pub(crate) fn advance_entry(&mut self, dt: f32) -> bool {
        let Some(entry) = self.entry.as_mut() else {
            return false;
        };
        self.drop_offset = entry.advance(dt)[0];
        if entry.is_running() {
            true
        } else {
            self.entry = None;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn chain_of(n: usize, seed: u64) -> Vec<Platform> {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut boxes: Vec<Platform> = Vec::new();
        for i in 0..n {
            let p = Platform::generate(PlatformId(i), boxes.last(), &settings, &mut rng);
            boxes.push(p);
        }
        boxes
    }

    #[test]
    fn test_first_two_fixed() {
        let boxes = chain_of(2, 7);
        assert_eq!(boxes[0].position, Vec3::ZERO);
        assert_eq!(boxes[0].size, 30.0);
        assert_eq!(boxes[0].direction, Direction::PosX);
        assert_eq!(boxes[0].distance, 15.0);
        assert_eq!(boxes[1].size, 30.0);
        assert_eq!(boxes[1].direction, Direction::PosX);
        assert_eq!(boxes[1].distance, 15.0);
        // 30/2 + 15 + 30/2
        assert_eq!(boxes[1].position, Vec3::new(45.0, 0.0, 0.0));
        assert!(boxes[0].is_settled() && boxes[1].is_settled());
        assert_eq!(boxes[1].previous, Some(PlatformId(0)));
    }

    #[test]
    fn test_third_box_enters_from_above() {
        let mut boxes = chain_of(3, 11);
        let third = &mut boxes[2];
        assert!(!third.is_settled());
        assert_eq!(third.drop_offset, 10.0);
        let mut frames = 0;
        while third.advance_entry(16.0) {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(third.is_settled());
        assert_eq!(third.drop_offset, 0.0);
    }

    #[test]
    fn test_negative_z_placement() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut prev = Platform::generate(PlatformId(0), None, &settings, &mut rng);
        prev.direction = Direction::NegZ;
        prev.position = Vec3::new(4.0, 0.0, 2.0);
        let next = Platform::generate(PlatformId(1), Some(&prev), &settings, &mut rng);
        assert_eq!(next.position, Vec3::new(4.0, 0.0, 2.0 - 45.0));
    }

    #[test]
    fn test_footprint_edges() {
        let boxes = chain_of(1, 1);
        let b = &boxes[0];
        assert!(b.footprint_contains(Vec2::new(15.0, -15.0)));
        assert!(!b.footprint_contains(Vec2::new(15.1, 0.0)));
        assert!(!b.footprint_contains(Vec2::new(0.0, -15.1)));
    }

    #[test]
    fn test_compression() {
        let mut boxes = chain_of(1, 1);
        boxes[0].set_compression(0.6);
        assert!((boxes[0].height - 9.0).abs() < 1e-5);
        boxes[0].reset_height();
        assert_eq!(boxes[0].height, 15.0);
    }
}
