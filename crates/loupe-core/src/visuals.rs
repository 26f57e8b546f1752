#![forbid(unsafe_code)]

//! Visual values derived from the panel offset.
//!
//! Nothing here is stored. The controller calls [`VisualRanges::compute`]
//! after every offset write, so the backdrop and header can never disagree
//! with the panel position.

/// Visual outputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct DerivedVisuals {
    /// Backdrop dim, fully dim when open and invisible when closed.
    pub backdrop_opacity: f64,
    /// Header opacity. Dims while the panel is open but never vanishes.
    pub header_opacity: f64,
    /// Whether the backdrop accepts taps (any part of the panel showing).
    pub backdrop_interactive: bool,
}

/// Endpoint values for the derived opacities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct VisualRanges {
    /// Backdrop opacity at offset 0. Default: 0.5.
    pub backdrop_open: f64,
    /// Backdrop opacity at offset H. Default: 0.0.
    pub backdrop_closed: f64,
    /// Header opacity at offset 0. Default: 0.3.
    pub header_open: f64,
    /// Header opacity at offset H. Default: 1.0.
    pub header_closed: f64,
}

impl Default for VisualRanges {
    fn default() -> Self {
        Self {
            backdrop_open: 0.5,
            backdrop_closed: 0.0,
            header_open: 0.3,
            header_closed: 1.0,
        }
    }
}

impl VisualRanges {
    /// Map an offset to visuals for a panel of `panel_height`.
    ///
    /// A non-positive height yields the resting-closed visuals instead of
    /// dividing by zero.
    #[must_use]
    pub fn compute(&self, offset: f64, panel_height: f64) -> DerivedVisuals {
        if !(panel_height.is_finite() && panel_height > 0.0) {
            return self.closed();
        }
        let range = (0.0, panel_height);
        DerivedVisuals {
            backdrop_opacity: interpolate(
                offset,
                range,
                (self.backdrop_open, self.backdrop_closed),
            ),
            header_opacity: interpolate(offset, range, (self.header_open, self.header_closed)),
            backdrop_interactive: offset < panel_height,
        }
    }

    /// Header opacity for a rest state.
    #[must_use]
    pub fn header_at_rest(&self, open: bool) -> f64 {
        if open {
            self.header_open
        } else {
            self.header_closed
        }
    }

    /// Visuals of a fully closed panel.
    #[must_use]
    pub fn closed(&self) -> DerivedVisuals {
        DerivedVisuals {
            backdrop_opacity: self.backdrop_closed,
            header_opacity: self.header_closed,
            backdrop_interactive: false,
        }
    }

    /// Problems with these ranges, empty when usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("visuals.backdrop_open", self.backdrop_open),
            ("visuals.backdrop_closed", self.backdrop_closed),
            ("visuals.header_open", self.header_open),
            ("visuals.header_closed", self.header_closed),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        errors
    }
}

/// Visuals for `offset` with the default ranges.
#[must_use]
pub fn compute(offset: f64, panel_height: f64) -> DerivedVisuals {
    VisualRanges::default().compute(offset, panel_height)
}

/// Linear map of `x` from `input` to `output`, clamped to the output range.
#[must_use]
pub fn interpolate(x: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (x0, x1) = input;
    let (y0, y1) = output;
    let span = x1 - x0;
    if span.abs() < f64::EPSILON {
        return y0;
    }
    let t = ((x - x0) / span).clamp(0.0, 1.0);
    // Endpoint-exact form: t = 0 yields y0 and t = 1 yields y1 bit for bit.
    y0 * (1.0 - t) + y1 * t
}
