#![forbid(unsafe_code)]

//! Animated snaps toward a rest state.
//!
//! A snap runs two independent channels:
//!
//! - **position**: a [`Spring`] from the rendered offset to 0 or H, written
//!   into the [`PanelOffsetStore`] every frame;
//! - **header**: a fixed-duration [`Fade`] from the header opacity on screen
//!   when the snap began to the resting value for the target direction.
//!
//! A snap settles when both channels are complete.
//!
//! # Invariants
//!
//! 1. A new [`MotionDriver::animate_to`] starts from the offset currently in
//!    the store, never from the previous target, and inherits the previous
//!    spring's velocity.
//! 2. A settle callback runs at most once. Cancelled or superseded snaps
//!    drop theirs unrun.
//! 3. [`MotionDriver::cancel`] is a no-op when idle.

use std::fmt;
use std::time::Duration;

use crate::animation::spring::SpringConfig;
use crate::animation::{Animation, EasingFn, Fade, Spring, ease_in_out};
use crate::offset::PanelOffsetStore;
use crate::snap::RestState;

/// Callback run once when a snap reaches its rest state.
pub type SettleCallback = Box<dyn FnOnce()>;

/// Timing for the two snap channels.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    pub spring: SpringConfig,
    pub header_fade: Duration,
    pub header_easing: EasingFn,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            header_fade: Duration::from_millis(300),
            header_easing: ease_in_out,
        }
    }
}

/// A snap that reached its rest state during [`MotionDriver::tick`].
pub struct Settled {
    pub target: RestState,
    pub on_settled: Option<SettleCallback>,
}

impl fmt::Debug for Settled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settled")
            .field("target", &self.target)
            .field("has_callback", &self.on_settled.is_some())
            .finish()
    }
}

struct Snap {
    target: RestState,
    spring: Spring,
    header: Fade,
    header_from: f64,
    header_to: f64,
    on_settled: Option<SettleCallback>,
}

/// Drives the panel offset toward a rest state, one frame at a time.
pub struct MotionDriver {
    config: MotionConfig,
    active: Option<Snap>,
}

impl fmt::Debug for MotionDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionDriver")
            .field("target", &self.target())
            .field("position", &self.active.as_ref().map(|s| s.spring.position()))
            .finish()
    }
}

impl Default for MotionDriver {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl MotionDriver {
    #[must_use]
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Whether a snap is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Rest state the in-flight snap is heading for.
    #[must_use]
    pub fn target(&self) -> Option<RestState> {
        self.active.as_ref().map(|snap| snap.target)
    }

    /// Header opacity from the fade channel while a snap is in flight.
    #[must_use]
    pub fn header_opacity(&self) -> Option<f64> {
        self.active
            .as_ref()
            .map(|snap| snap.header.lerp(snap.header_from, snap.header_to))
    }

    /// Start a snap toward `target` from the offset currently in `store`.
    ///
    /// `header_from` is the header opacity on screen right now and
    /// `header_to` its resting value for `target`. Any snap already in flight
    /// is replaced; its callback is dropped without running.
    pub fn animate_to(
        &mut self,
        store: &PanelOffsetStore,
        target: RestState,
        header_from: f64,
        header_to: f64,
        on_settled: Option<SettleCallback>,
    ) {
        let from = store.offset();
        let velocity = self
            .active
            .take()
            .map_or(0.0, |previous| previous.spring.velocity());
        let to = target.offset(store.height());

        let _span = tracing::debug_span!("panel.snap", rest = %target, from, to).entered();
        tracing::debug!(velocity, "snap started");

        self.active = Some(Snap {
            target,
            spring: Spring::with_config(from, to, &self.config.spring).with_velocity(velocity),
            header: Fade::new(self.config.header_fade).easing(self.config.header_easing),
            header_from,
            header_to,
            on_settled,
        });
    }

    /// Move the in-flight target after the panel height changed.
    pub fn retarget(&mut self, panel_height: f64) {
        if let Some(snap) = self.active.as_mut() {
            snap.spring.set_target(snap.target.offset(panel_height));
        }
    }

    /// Stop immediately. The offset stays wherever it had reached. Returns
    /// whether anything was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(snap) => {
                tracing::trace!(
                    rest = %snap.target,
                    position = snap.spring.position(),
                    "snap cancelled"
                );
                true
            }
            None => false,
        }
    }

    /// Advance one frame, writing the new offset into `store`.
    ///
    /// Returns the settled snap (with its callback, not yet run) on the frame
    /// both channels complete.
    pub fn tick(&mut self, dt: Duration, store: &mut PanelOffsetStore) -> Option<Settled> {
        let snap = self.active.as_mut()?;
        snap.spring.tick(dt);
        snap.header.tick(dt);
        store.set(snap.spring.position());

        if !(snap.spring.is_complete() && snap.header.is_complete()) {
            return None;
        }
        let snap = self.active.take()?;
        store.set(snap.target.offset(store.height()));
        tracing::debug!(rest = %snap.target, "snap settled");
        Some(Settled {
            target: snap.target,
            on_settled: snap.on_settled,
        })
    }
}
