#![forbid(unsafe_code)]

//! Single source of truth for the panel's vertical offset.
//!
//! Offset 0 is fully open; offset H (the panel height) is fully closed.
//! Every write goes through [`PanelOffsetStore::set`], which clamps, so no
//! reader can ever observe a value outside [0, H].
//!
//! An invalid height (zero, negative, NaN, infinite) collapses the legal
//! range to the single point 0: the store pins the offset there until a
//! valid height arrives.

/// Owner of the panel offset and the panel height it is clamped against.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOffsetStore {
    offset: f64,
    height: f64,
    valid: bool,
}

impl PanelOffsetStore {
    /// Store for a panel of `height`, resting closed.
    #[must_use]
    pub fn new(height: f64) -> Self {
        let valid = is_valid_height(height);
        Self {
            offset: if valid { height } else { 0.0 },
            height: if valid { height } else { 0.0 },
            valid,
        }
    }

    /// Current offset, always within [0, height].
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Panel height (full travel). Zero while the height is invalid.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether the last reported height was usable.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Clamp `candidate` into the legal range without writing it.
    #[must_use]
    pub fn clamp(&self, candidate: f64) -> f64 {
        if !self.valid {
            return 0.0;
        }
        candidate.clamp(0.0, self.height)
    }

    /// Write a new offset, clamped. Non-finite candidates are dropped and the
    /// previous value is kept. Returns the stored value.
    pub fn set(&mut self, candidate: f64) -> f64 {
        if candidate.is_finite() {
            self.offset = self.clamp(candidate);
        }
        self.offset
    }

    /// Replace the height and re-clamp the offset into the new range.
    ///
    /// Returns whether the new height is valid. An invalid height pins the
    /// offset to 0.
    pub fn set_height(&mut self, height: f64) -> bool {
        self.valid = is_valid_height(height);
        self.height = if self.valid { height } else { 0.0 };
        self.offset = self.clamp(self.offset);
        self.valid
    }

    /// Whether the panel is fully open.
    #[inline]
    #[must_use]
    pub fn is_fully_open(&self) -> bool {
        self.offset <= 0.0
    }

    /// Whether the panel is fully closed (hidden).
    #[inline]
    #[must_use]
    pub fn is_fully_closed(&self) -> bool {
        self.valid && self.offset >= self.height
    }
}

/// A panel height is usable when it is finite and strictly positive.
#[inline]
#[must_use]
pub fn is_valid_height(height: f64) -> bool {
    height.is_finite() && height > 0.0
}
