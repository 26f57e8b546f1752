#![forbid(unsafe_code)]

//! Release decision: which rest state a finished drag resolves to.
//!
//! The rule is position only. A flick that is still moving fast toward the
//! open side but is released below the midpoint closes. Velocity weighting
//! would move the release threshold and is deliberately not applied.

use std::fmt;

/// One of the two stable panel positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum RestState {
    /// Offset 0, panel revealed.
    Open,
    /// Offset H, panel hidden below the viewport.
    Closed,
}

impl RestState {
    /// Offset at which this state rests for a panel of `height`.
    #[inline]
    #[must_use]
    pub fn offset(self, height: f64) -> f64 {
        match self {
            Self::Open => 0.0,
            Self::Closed => height,
        }
    }

    /// The other rest state.
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

impl fmt::Display for RestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Closed => "closed",
        })
    }
}

/// Pure release-threshold decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapResolver;

impl SnapResolver {
    /// Open when `final_offset` is strictly above the midpoint of travel
    /// (numerically below `panel_height / 2`); ties close.
    #[inline]
    #[must_use]
    pub fn decide(final_offset: f64, panel_height: f64) -> RestState {
        if final_offset < panel_height / 2.0 {
            RestState::Open
        } else {
            RestState::Closed
        }
    }
}
