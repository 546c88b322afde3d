//! Easing curves
//!
//! Map linear progress `t` in `[0, 1]` to eased progress. Every curve
//! satisfies `apply(0) == 0` and `apply(1) == 1`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant rate
    #[default]
    Linear,
    /// Decelerating, `t * (2 - t)`
    QuadraticOut,
    /// Accelerating, `t^4`
    QuarticIn,
    /// Decelerating, `1 - (1 - t)^4`
    QuarticOut,
    /// Lands and bounces three times before settling
    BounceOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::QuarticIn => t * t * t * t,
            Easing::QuarticOut => {
                let k = t - 1.0;
                1.0 - k * k * k * k
            }
            Easing::BounceOut => bounce_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let k = t - 1.5 / D;
        N * k * k + 0.75
    } else if t < 2.5 / D {
        let k = t - 2.25 / D;
        N * k * k + 0.9375
    } else {
        let k = t - 2.625 / D;
        N * k * k + 0.984375
    }
}
