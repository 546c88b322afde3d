//! Time-based interpolation of a fixed set of values
//!
//! A tween is advanced by whatever frame slice the driver hands it and
//! reports the sampled values. Stopping freezes it at the last sample.

use super::ease::Easing;

#[derive(Debug, Clone)]
pub struct Tween<const N: usize> {
    from: [f32; N],
    to: [f32; N],
    current: [f32; N],
    /// Milliseconds
    duration: f32,
    elapsed: f32,
    easing: Easing,
    stopped: bool,
}

impl<const N: usize> Tween<N> {
    pub fn new(from: [f32; N], to: [f32; N], duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            current: if duration > 0.0 { from } else { to },
            duration,
            elapsed: 0.0,
            easing,
            stopped: false,
        }
    }

    /// Advance by `dt` milliseconds and return the new sample
    pub fn advance(&mut self, dt: f32) -> [f32; N] {
        if !self.is_running() {
            return self.current;
        }
        self.elapsed += dt.max(0.0);
        self.sample();
        self.current
    }

    fn sample(&mut self) {
        let t = self.progress();
        if t >= 1.0 {
            self.current = self.to;
            return;
        }
        let e = self.easing.apply(t);
        for i in 0..N {
            self.current[i] = self.from[i] + (self.to[i] - self.from[i]) * e;
        }
    }

    /// Last sampled values
    pub fn value(&self) -> [f32; N] {
        self.current
    }

    pub fn target(&self) -> [f32; N] {
        self.to
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_running(&self) -> bool {
        !self.stopped && !self.is_finished()
    }

    /// Time advanced past the end; the head start of a chained tween
    pub fn overflow(&self) -> f32 {
        (self.elapsed - self.duration).max(0.0)
    }

    /// Abort, keeping the last sample as the final value
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Translate both endpoints and the current sample
    pub fn offset(&mut self, delta: [f32; N]) {
        for i in 0..N {
            self.from[i] += delta[i];
            self.to[i] += delta[i];
            self.current[i] += delta[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoint() {
        let mut tween = Tween::new([0.0, 10.0], [10.0, 0.0], 100.0, Easing::Linear);
        let v = tween.advance(50.0);
        assert!((v[0] - 5.0).abs() < 1e-5);
        assert!((v[1] - 5.0).abs() < 1e-5);
        assert!(tween.is_running());
    }

    #[test]
    fn test_reaches_target_exactly() {
        let mut tween = Tween::new([0.0], [37.5], 50.0, Easing::QuadraticOut);
        for _ in 0..7 {
            tween.advance(16.0);
        }
        assert_eq!(tween.value(), [37.5]);
        assert!(tween.is_finished());
        assert!((tween.overflow() - 62.0).abs() < 1e-4);
    }

    #[test]
    fn test_stop_keeps_last_sample() {
        let mut tween = Tween::new([1.0], [0.6], 1500.0, Easing::Linear);
        tween.advance(750.0);
        tween.stop();
        let frozen = tween.value();
        tween.advance(750.0);
        assert_eq!(tween.value(), frozen);
        assert!((frozen[0] - 0.8).abs() < 1e-5);
        assert!(!tween.is_running());
        assert!(!tween.is_finished());
    }

    #[test]
    fn test_offset_moves_path() {
        let mut tween = Tween::new([0.0, 0.0], [10.0, 0.0], 100.0, Easing::Linear);
        tween.advance(50.0);
        tween.offset([-2.0, 1.0]);
        assert_eq!(tween.target(), [8.0, 1.0]);
        assert!((tween.value()[0] - 3.0).abs() < 1e-5);
        tween.advance(50.0);
        assert_eq!(tween.value(), [8.0, 1.0]);
    }

    #[test]
    fn test_zero_duration_is_done() {
        let mut tween = Tween::new([0.0], [1.0], 0.0, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.advance(16.0), [1.0]);
        assert_eq!(tween.progress(), 1.0);
    }
}
