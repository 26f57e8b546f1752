#![forbid(unsafe_code)]

//! Damped spring driving the panel offset.
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! Unit mass. Positions are in layout units (the same units as the panel
//! height), velocities in units per second.
//!
//! # Invariants
//!
//! 1. A spring at rest does not move until [`Spring::set_target`] wakes it.
//! 2. Settling snaps `position` to exactly `target` and zeroes velocity, so
//!    a settled panel sits on 0 or H with no floating-point residue.
//! 3. Stiffness is at least [`MIN_STIFFNESS`]; damping is never negative.
//!
//! # Failure Modes
//!
//! - Long frames: deltas are subdivided into steps of at most 4ms, so a
//!   500ms hitch still integrates stably.
//! - Zero damping never settles; [`SpringConfig::validate`] rejects it.

use std::time::Duration;

use super::Animation;

/// Largest single integration step in seconds.
const MAX_STEP_SECS: f64 = 0.004;

/// Floor applied to stiffness.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Spring parameters for the panel position channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SpringConfig {
    /// Restoring force per unit of displacement. Default: 90.
    pub stiffness: f64,
    /// Velocity drag. Default: 20 (just above critical for k = 90).
    pub damping: f64,
    /// Distance from target below which the spring may settle. Default: 0.01.
    pub rest_threshold: f64,
    /// Speed below which the spring may settle. Default: 0.1.
    pub velocity_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 90.0,
            damping: 20.0,
            rest_threshold: 0.01,
            velocity_threshold: 0.1,
        }
    }
}

impl SpringConfig {
    /// Damping at which this stiffness converges fastest without overshoot.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.max(MIN_STIFFNESS).sqrt()
    }

    /// Problems with these parameters, empty when usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.stiffness.is_finite() || self.stiffness < MIN_STIFFNESS {
            errors.push(format!(
                "spring.stiffness must be >= {MIN_STIFFNESS}, got {}",
                self.stiffness
            ));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 {
            errors.push(format!("spring.damping must be > 0, got {}", self.damping));
        }
        if !(self.rest_threshold.is_finite() && self.rest_threshold > 0.0) {
            errors.push(format!(
                "spring.rest_threshold must be > 0, got {}",
                self.rest_threshold
            ));
        }
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold > 0.0) {
            errors.push(format!(
                "spring.velocity_threshold must be > 0, got {}",
                self.velocity_threshold
            ));
        }
        errors
    }
}

/// A damped harmonic oscillator moving from an initial position to a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    initial: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring from `initial` toward `target` with default panel parameters.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self::with_config(initial, target, &SpringConfig::default())
    }

    /// Spring from `initial` toward `target` using `config`.
    #[must_use]
    pub fn with_config(initial: f64, target: f64, config: &SpringConfig) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            initial,
            target,
            stiffness: config.stiffness.max(MIN_STIFFNESS),
            damping: config.damping.max(0.0),
            rest_threshold: config.rest_threshold.abs(),
            velocity_threshold: config.velocity_threshold.abs(),
            at_rest: false,
        }
    }

    /// Start with an existing velocity (builder). Used to carry momentum
    /// across a retarget.
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        if velocity.is_finite() {
            self.velocity = velocity;
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Move the target. Wakes the spring if the move is larger than the rest
    /// threshold.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing long frames.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Fraction of the way from the initial position to the target.
    fn value(&self) -> f64 {
        let span = self.target - self.initial;
        if span.abs() < f64::EPSILON {
            return if self.at_rest { 1.0 } else { 0.0 };
        }
        ((self.position - self.initial) / span).clamp(0.0, 1.0)
    }
}
