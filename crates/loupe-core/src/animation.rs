#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Everything here advances only when the host calls [`Animation::tick`] with
//! the frame delta. Nothing sleeps, spawns, or reads a clock, so a replay with
//! the same deltas produces the same values bit for bit.
//!
//! - [`Fade`]: fixed-duration progress with an easing curve. Drives the
//!   header opacity channel while the panel snaps.
//! - [`spring::Spring`]: damped oscillator. Drives the panel offset.

pub mod spring;

use std::time::Duration;

pub use spring::Spring;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Maps `t` in [0, 1] to an eased progress in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Constant velocity.
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation whose progress is reported in [0.0, 1.0].
pub trait Animation {
    /// Advance by one frame delta.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end and will not change further.
    fn is_complete(&self) -> bool;

    /// Normalized progress, clamped to [0.0, 1.0].
    fn value(&self) -> f64;
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Eased progress from 0.0 to 1.0 over a fixed duration.
///
/// Elapsed time is accumulated as a [`Duration`] so long runs of small
/// deltas do not drift.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with linear easing. A zero duration completes on the
    /// first tick.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing curve (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Progress before easing.
    #[must_use]
    pub fn raw_progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Interpolate between `from` and `to` at the current eased progress.
    #[must_use]
    pub fn lerp(&self, from: f64, to: f64) -> f64 {
        let t = self.value();
        from * (1.0 - t) + to * t
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        (self.easing)(self.raw_progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn easing_endpoints() {
        for easing in [linear, ease_out, ease_in_out, ease_out_cubic] {
            assert!(easing(0.0).abs() < 1e-12);
            assert!((easing(1.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert!((ease_in_out(-3.0)).abs() < 1e-12);
        assert!((ease_in_out(7.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn easing_is_monotonic() {
        for easing in [linear, ease_out, ease_in_out, ease_out_cubic] {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = easing(f64::from(i) / 100.0);
                assert!(v >= prev - 1e-9, "easing went backwards at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn fade_completes_after_duration() {
        let mut fade = Fade::new(Duration::from_millis(300));
        for _ in 0..18 {
            fade.tick(MS_16);
        }
        assert!(!fade.is_complete(), "288ms of a 300ms fade is not done");
        fade.tick(MS_16);
        assert!(fade.is_complete());
        assert!((fade.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fade_lerp_tracks_progress() {
        let mut fade = Fade::new(Duration::from_millis(100));
        assert!((fade.lerp(1.0, 0.3) - 1.0).abs() < 1e-12);
        fade.tick(Duration::from_millis(50));
        assert!((fade.lerp(1.0, 0.3) - 0.65).abs() < 1e-9);
        fade.tick(Duration::from_millis(50));
        assert!((fade.lerp(1.0, 0.3) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_fade_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        fade.tick(Duration::from_nanos(1));
        assert!(fade.is_complete());
    }
}
