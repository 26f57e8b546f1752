#![forbid(unsafe_code)]

//! The detail panel controller.
//!
//! [`PanelController`] owns the offset store and the two writers that may
//! touch it: the [`GestureTracker`] while a finger is down and the
//! [`MotionDriver`] while a snap is in flight. The host feeds it drag input
//! and frame deltas and reads back [`PanelController::frame`] to paint.
//!
//! # State Machine
//!
//! ```text
//! Closed --drag start--> Dragging --release, open side--> SnappingOpen --settle--> Open
//! Open   --drag start--> Dragging --release, closed side--> SnappingClosed --settle--> Closed
//! Closed --open/toggle--> SnappingOpen       Open --close/toggle--> SnappingClosed
//! SnappingOpen | SnappingClosed --drag start--> Dragging
//! ```
//!
//! # Invariants
//!
//! 1. Offset is within [0, H] after every operation.
//! 2. In `Open` the offset is exactly 0 and in `Closed` exactly H, with no
//!    snap in flight.
//! 3. Drag start cancels any snap before the tracker takes over writes, and
//!    anchors at the offset the snap had reached.
//! 4. Visuals are recomputed from the offset on every read.
//! 5. With an invalid panel height the offset is held at 0 and every
//!    motion request is refused.

use std::time::Duration;

use crate::config::PanelConfig;
use crate::gesture::{DragEvent, GestureTracker};
use crate::layout::{LayoutProvider, PanelFractions, ResponsiveLayout, Viewport};
use crate::motion::{MotionDriver, SettleCallback};
use crate::offset::PanelOffsetStore;
use crate::snap::{RestState, SnapResolver};
use crate::visuals::{DerivedVisuals, VisualRanges};

/// Where the panel is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum PanelState {
    Closed,
    Dragging,
    SnappingOpen,
    SnappingClosed,
    Open,
}

impl PanelState {
    /// Resting state for `target`.
    #[must_use]
    pub fn rest(target: RestState) -> Self {
        match target {
            RestState::Open => Self::Open,
            RestState::Closed => Self::Closed,
        }
    }

    /// Snapping state heading for `target`.
    #[must_use]
    pub fn snapping(target: RestState) -> Self {
        match target {
            RestState::Open => Self::SnappingOpen,
            RestState::Closed => Self::SnappingClosed,
        }
    }

    /// Whether the panel is at one of its two rest positions.
    #[must_use]
    pub fn is_at_rest(self) -> bool {
        matches!(self, Self::Open | Self::Closed)
    }
}

/// Notifications for the host, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    StateChanged { from: PanelState, to: PanelState },
    /// A snap reached its rest state.
    Settled(RestState),
}

/// Everything the view layer needs to paint one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct PanelFrame {
    pub offset: f64,
    pub panel_height: f64,
    pub state: PanelState,
    pub visuals: DerivedVisuals,
}

/// Drag-and-snap controller for the photo detail panel.
#[derive(Debug)]
pub struct PanelController {
    store: PanelOffsetStore,
    tracker: GestureTracker,
    driver: MotionDriver,
    ranges: VisualRanges,
    fractions: PanelFractions,
    state: PanelState,
    events: Vec<PanelEvent>,
}

impl PanelController {
    /// Controller for a panel of `panel_height`, closed, default tuning.
    #[must_use]
    pub fn new(panel_height: f64) -> Self {
        Self::with_config(panel_height, &PanelConfig::default())
    }

    /// Controller for a panel of `panel_height`, closed.
    #[must_use]
    pub fn with_config(panel_height: f64, config: &PanelConfig) -> Self {
        let store = PanelOffsetStore::new(panel_height);
        if !store.is_valid() {
            tracing::error!(
                panel_height,
                "invalid panel height from layout provider; panel motion disabled"
            );
        }
        Self {
            store,
            tracker: GestureTracker::new(),
            driver: MotionDriver::new(config.motion()),
            ranges: config.visuals,
            fractions: config.layout,
            state: PanelState::Closed,
            events: Vec::new(),
        }
    }

    // -- Queries ------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Whether the panel is resting open. Drives the toggle icon.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.store.offset()
    }

    #[inline]
    #[must_use]
    pub fn panel_height(&self) -> f64 {
        self.store.height()
    }

    /// Visuals for the current offset. While a snap is in flight the header
    /// follows the snap's fade channel instead of the offset.
    #[must_use]
    pub fn visuals(&self) -> DerivedVisuals {
        let mut visuals = self.ranges.compute(self.store.offset(), self.store.height());
        if let Some(header) = self.driver.header_opacity() {
            visuals.header_opacity = header;
        }
        visuals
    }

    #[must_use]
    pub fn frame(&self) -> PanelFrame {
        PanelFrame {
            offset: self.store.offset(),
            panel_height: self.store.height(),
            state: self.state,
            visuals: self.visuals(),
        }
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Layout -------------------------------------------------------------

    /// Responsive layout for `viewport` using this panel's fractions.
    #[must_use]
    pub fn layout_for(&self, viewport: Viewport) -> ResponsiveLayout {
        ResponsiveLayout::new(viewport).with_fractions(self.fractions)
    }

    /// Re-read the panel height from a layout provider.
    pub fn relayout(&mut self, provider: &impl LayoutProvider) {
        self.set_panel_height(provider.panel_height());
    }

    /// Apply a new panel height.
    ///
    /// Closed re-clamps to the new height without animating and Open stays
    /// at 0. A snap toward closed retargets the new height; drags and snaps
    /// toward open are clamped into the new range.
    pub fn set_panel_height(&mut self, panel_height: f64) {
        let was_valid = self.store.is_valid();
        if !self.store.set_height(panel_height) {
            tracing::error!(
                panel_height,
                "invalid panel height from layout provider; panel motion disabled"
            );
            self.driver.cancel();
            self.tracker.reset();
            self.transition(PanelState::Closed);
            return;
        }

        if !was_valid {
            self.store.set(panel_height);
            self.transition(PanelState::Closed);
            return;
        }

        match self.state {
            PanelState::Closed => {
                self.store.set(panel_height);
            }
            PanelState::Open => {
                self.store.set(0.0);
            }
            PanelState::SnappingClosed => self.driver.retarget(panel_height),
            PanelState::SnappingOpen | PanelState::Dragging => {}
        }
    }

    // -- Drag input ---------------------------------------------------------

    /// Finger down. Interrupts any snap, keeping the offset it reached.
    pub fn drag_start(&mut self) {
        if !self.store.is_valid() {
            tracing::trace!("ignoring drag: invalid panel height");
            return;
        }
        if self.driver.cancel() {
            tracing::debug!(offset = self.store.offset(), "drag interrupted snap");
        }
        self.tracker.begin(self.store.offset());
        self.transition(PanelState::Dragging);
    }

    /// Finger moved by `translation_y` (cumulative) since drag start.
    pub fn drag_update(&mut self, translation_y: f64) {
        if self.state != PanelState::Dragging {
            tracing::trace!(translation_y, "ignoring drag update outside a drag");
            return;
        }
        if let Some(candidate) = self.tracker.candidate(translation_y, self.store.height()) {
            self.store.set(candidate);
        }
    }

    /// Finger lifted. Resolves a rest state and snaps toward it.
    pub fn drag_end(&mut self, translation_y: f64) {
        if self.state != PanelState::Dragging {
            tracing::trace!(translation_y, "ignoring drag end outside a drag");
            return;
        }
        let height = self.store.height();
        let Some(candidate) = self.tracker.finish(translation_y, height) else {
            return;
        };
        let released = self.store.set(candidate);
        let target = SnapResolver::decide(released, height);
        tracing::debug!(offset = released, height, rest = %target, "drag released");
        self.start_snap(target, None);
    }

    /// Dispatch one drag sample.
    pub fn handle_drag(&mut self, event: DragEvent) {
        match event {
            DragEvent::Start => self.drag_start(),
            DragEvent::Update { translation_y } => self.drag_update(translation_y),
            DragEvent::End { translation_y } => self.drag_end(translation_y),
        }
    }

    /// Feed a batch of drag samples from the host's input layer, in order.
    pub fn bind_gesture(&mut self, events: impl IntoIterator<Item = DragEvent>) {
        for event in events {
            self.handle_drag(event);
        }
    }

    // -- Programmatic motion ------------------------------------------------

    /// Snap toward `target` from wherever the panel is.
    ///
    /// Refused (callback dropped) during a drag or with an invalid panel
    /// height. Already resting at `target`: the callback runs immediately.
    pub fn animate_to(&mut self, target: RestState, on_settled: Option<SettleCallback>) {
        if !self.store.is_valid() {
            tracing::error!(rest = %target, "refusing to animate: invalid panel height");
            return;
        }
        if self.state == PanelState::Dragging {
            tracing::debug!(rest = %target, "ignoring snap request during drag");
            return;
        }
        if self.state == PanelState::rest(target) {
            if let Some(callback) = on_settled {
                callback();
            }
            return;
        }
        self.start_snap(target, on_settled);
    }

    /// Open if closed or closing, close if open or opening.
    pub fn toggle(&mut self) {
        match self.state {
            PanelState::Open | PanelState::SnappingOpen => self.close(),
            PanelState::Closed | PanelState::SnappingClosed => self.open(),
            PanelState::Dragging => tracing::debug!("ignoring toggle during drag"),
        }
    }

    pub fn open(&mut self) {
        self.animate_to(RestState::Open, None);
    }

    /// Close. Also bound to the close button inside the panel.
    pub fn close(&mut self) {
        self.animate_to(RestState::Closed, None);
    }

    /// Tap on the dim backdrop. Closes only while the backdrop is interactive.
    pub fn tap_backdrop(&mut self) {
        if self.visuals().backdrop_interactive && self.state != PanelState::Dragging {
            self.close();
        }
    }

    // -- Frame --------------------------------------------------------------

    /// Advance one frame of `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let Some(settled) = self.driver.tick(dt, &mut self.store) else {
            return;
        };
        self.transition(PanelState::rest(settled.target));
        self.events.push(PanelEvent::Settled(settled.target));
        if let Some(callback) = settled.on_settled {
            callback();
        }
    }

    // -- Internals ----------------------------------------------------------

    fn start_snap(&mut self, target: RestState, on_settled: Option<SettleCallback>) {
        let header_from = self.visuals().header_opacity;
        let header_to = self.ranges.header_at_rest(target == RestState::Open);
        self.driver
            .animate_to(&self.store, target, header_from, header_to, on_settled);
        self.transition(PanelState::snapping(target));
    }

    fn transition(&mut self, to: PanelState) {
        let from = self.state;
        if from == to {
            return;
        }
        tracing::debug!(?from, ?to, offset = self.store.offset(), "panel state");
        self.state = to;
        self.events.push(PanelEvent::StateChanged { from, to });
    }
}

impl Drop for PanelController {
    fn drop(&mut self) {
        if self.driver.cancel() {
            tracing::trace!("panel controller dropped mid-snap");
        }
    }
}
