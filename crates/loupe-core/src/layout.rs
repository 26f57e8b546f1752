#![forbid(unsafe_code)]

//! Responsive panel height.
//!
//! The panel's travel distance depends on the device class and orientation.
//! Hosts report the window size as a [`Viewport`]; [`ResponsiveLayout`]
//! turns it into a panel height through [`LayoutProvider`].

/// Window width at or above which the device is treated as a tablet.
pub const TABLET_MIN_WIDTH: f64 = 768.0;
/// Window width at or above which the device is a large tablet.
pub const LARGE_TABLET_MIN_WIDTH: f64 = 1024.0;
/// Window width at or above which the device is extra large.
pub const EXTRA_LARGE_MIN_WIDTH: f64 = 1200.0;
/// Window width below which a phone is a small screen.
pub const SMALL_SCREEN_MAX_WIDTH: f64 = 380.0;

/// Window size in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_tablet(&self) -> bool {
        self.width >= TABLET_MIN_WIDTH
    }

    #[must_use]
    pub fn is_large_tablet(&self) -> bool {
        self.width >= LARGE_TABLET_MIN_WIDTH
    }

    #[must_use]
    pub fn is_extra_large(&self) -> bool {
        self.width >= EXTRA_LARGE_MIN_WIDTH
    }

    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    #[must_use]
    pub fn is_small_screen(&self) -> bool {
        self.width < SMALL_SCREEN_MAX_WIDTH
    }
}

/// Fraction of the window height the panel occupies, per device class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PanelFractions {
    /// Default: 0.6.
    pub tablet_landscape: f64,
    /// Default: 0.45.
    pub tablet_portrait: f64,
    /// Default: 0.7.
    pub phone_landscape: f64,
    /// Small phones in portrait. Default: 0.65.
    pub phone_small: f64,
    /// Default: 0.4.
    pub phone_portrait: f64,
}

impl Default for PanelFractions {
    fn default() -> Self {
        Self {
            tablet_landscape: 0.6,
            tablet_portrait: 0.45,
            phone_landscape: 0.7,
            phone_small: 0.65,
            phone_portrait: 0.4,
        }
    }
}

impl PanelFractions {
    /// Fraction that applies to `viewport`.
    #[must_use]
    pub fn for_viewport(&self, viewport: &Viewport) -> f64 {
        match (viewport.is_tablet(), viewport.is_landscape()) {
            (true, true) => self.tablet_landscape,
            (true, false) => self.tablet_portrait,
            (false, true) => self.phone_landscape,
            (false, false) if viewport.is_small_screen() => self.phone_small,
            (false, false) => self.phone_portrait,
        }
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("layout.tablet_landscape", self.tablet_landscape),
            ("layout.tablet_portrait", self.tablet_portrait),
            ("layout.phone_landscape", self.phone_landscape),
            ("layout.phone_small", self.phone_small),
            ("layout.phone_portrait", self.phone_portrait),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(format!("{name} must be in (0, 1], got {value}"));
            }
        }
        errors
    }
}

/// Source of the current panel height.
pub trait LayoutProvider {
    /// Full travel distance of the panel for the current layout pass.
    fn panel_height(&self) -> f64;
}

impl LayoutProvider for f64 {
    fn panel_height(&self) -> f64 {
        *self
    }
}

/// Panel height from a viewport and per-class fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveLayout {
    pub viewport: Viewport,
    pub fractions: PanelFractions,
}

impl ResponsiveLayout {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            fractions: PanelFractions::default(),
        }
    }

    #[must_use]
    pub fn with_fractions(mut self, fractions: PanelFractions) -> Self {
        self.fractions = fractions;
        self
    }
}

impl LayoutProvider for ResponsiveLayout {
    fn panel_height(&self) -> f64 {
        self.viewport.height * self.fractions.for_viewport(&self.viewport)
    }
}
