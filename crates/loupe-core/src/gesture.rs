#![forbid(unsafe_code)]

//! Drag tracking: turns a vertical drag stream into offset candidates.
//!
//! The host's input layer reports drags as cumulative translations since the
//! finger went down ([`DragEvent`]). [`GestureTracker`] pins the offset at
//! drag start as its baseline and produces `baseline + translation`, clamped
//! to [0, H]. It never animates and has no opinion on where the panel should
//! end up; that belongs to the snap resolver.
//!
//! # Invariants
//!
//! 1. Candidates are always within [0, H].
//! 2. Updates and ends without a preceding start produce nothing.
//! 3. Non-finite translations are dropped rather than propagated.

/// A drag input sample from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Finger down on the panel or its handle.
    Start,
    /// Finger moved; `translation_y` is cumulative since [`DragEvent::Start`].
    /// Negative values move the panel up (toward open).
    Update { translation_y: f64 },
    /// Finger lifted with the final cumulative translation.
    End { translation_y: f64 },
}

/// Converts cumulative drag translations into clamped offset candidates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureTracker {
    baseline: Option<f64>,
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag anchored at `baseline` (the offset the finger grabbed).
    /// A second start re-anchors.
    pub fn begin(&mut self, baseline: f64) {
        self.baseline = Some(baseline);
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }

    /// Offset the drag was anchored at, if dragging.
    #[inline]
    #[must_use]
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Offset candidate for a cumulative translation, clamped to
    /// [0, `panel_height`].
    #[must_use]
    pub fn candidate(&self, translation_y: f64, panel_height: f64) -> Option<f64> {
        let baseline = self.baseline?;
        if !translation_y.is_finite() {
            tracing::trace!(translation_y, "dropping non-finite drag translation");
            return None;
        }
        Some((baseline + translation_y).clamp(0.0, panel_height.max(0.0)))
    }

    /// Finish the drag, returning the final clamped offset. A non-finite
    /// final translation resolves at the baseline.
    pub fn finish(&mut self, translation_y: f64, panel_height: f64) -> Option<f64> {
        let candidate = self
            .candidate(translation_y, panel_height)
            .or_else(|| self.candidate(0.0, panel_height));
        self.baseline = None;
        candidate
    }

    /// Drop any in-progress drag without producing a candidate.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}
