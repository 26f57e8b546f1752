#![forbid(unsafe_code)]

//! Scripted interaction sequences and their frame-by-frame replay.
//!
//! A scenario is a list of [`Step`]s. Input steps apply immediately; frame
//! steps advance the controller by a fixed 16 ms and record one
//! [`FrameRecord`] each. Replays are deterministic: the same scenario and
//! viewport always produce the same records.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use loupe_core::{DragEvent, PanelController, PanelEvent, PanelFrame, Viewport};

/// Fixed frame interval used by every replay.
pub const FRAME: Duration = Duration::from_millis(16);

/// One scripted input or frame advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Drag input. Translations are fractions of the panel height.
    Drag(DragEvent),
    Toggle,
    Open,
    Close,
    TapBackdrop,
    /// Window resized or rotated.
    Resize(Viewport),
    /// Advance exactly this many frames.
    Frames(u32),
    /// Advance until the panel rests, bounded by the replay's frame cap.
    Settle,
}

/// Named scenarios the harness can replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    DragOpen,
    DragClose,
    Toggle,
    DoubleToggle,
    Interrupt,
    Resize,
}

impl Scenario {
    pub const ALL: [Self; 6] = [
        Self::DragOpen,
        Self::DragClose,
        Self::Toggle,
        Self::DoubleToggle,
        Self::Interrupt,
        Self::Resize,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DragOpen => "drag-open",
            Self::DragClose => "drag-close",
            Self::Toggle => "toggle",
            Self::DoubleToggle => "double-toggle",
            Self::Interrupt => "interrupt",
            Self::Resize => "resize",
        }
    }

    /// The scripted steps for a panel inside `viewport`.
    #[must_use]
    pub fn steps(self, viewport: Viewport) -> Vec<Step> {
        match self {
            Self::DragOpen => drag_by(-0.625, 10),
            Self::DragClose => {
                let mut steps = vec![Step::Open, Step::Settle];
                steps.extend(drag_by(0.6, 10));
                steps
            }
            Self::Toggle => vec![Step::Toggle, Step::Settle, Step::TapBackdrop, Step::Settle],
            Self::DoubleToggle => vec![
                Step::Toggle,
                Step::Frames(1),
                Step::Toggle,
                Step::Settle,
            ],
            Self::Interrupt => vec![
                Step::Open,
                Step::Frames(12),
                Step::Drag(DragEvent::Start),
                Step::Drag(DragEvent::Update { translation_y: 0.0 }),
                Step::Drag(DragEvent::Update { translation_y: 0.1 }),
                Step::Frames(1),
                Step::Drag(DragEvent::End { translation_y: 0.1 }),
                Step::Settle,
            ],
            Self::Resize => {
                let rotated = Viewport::new(viewport.height, viewport.width);
                vec![
                    Step::Resize(rotated),
                    Step::Frames(1),
                    Step::Open,
                    Step::Frames(6),
                    Step::Resize(viewport),
                    Step::Settle,
                    Step::Resize(rotated),
                    Step::Frames(1),
                    Step::Close,
                    Step::Settle,
                ]
            }
        }
    }
}

/// A drag of `fraction` panel heights, in `samples` equal updates.
///
/// The translation is resolved against the live panel height at replay
/// time, so a scenario reads the same on every viewport.
fn drag_by(fraction: f64, samples: u32) -> Vec<Step> {
    let mut steps = vec![Step::Drag(DragEvent::Start)];
    for i in 1..=samples {
        steps.push(Step::Drag(DragEvent::Update {
            translation_y: fraction * f64::from(i) / f64::from(samples),
        }));
        steps.push(Step::Frames(1));
    }
    steps.push(Step::Drag(DragEvent::End {
        translation_y: fraction,
    }));
    steps.push(Step::Settle);
    steps
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized scenario name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScenario(pub String);

impl fmt::Display for UnknownScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Scenario::ALL.iter().map(|s| s.name()).collect();
        write!(
            f,
            "unknown scenario {:?} (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownScenario {}

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

/// One rendered frame of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub index: u32,
    pub elapsed_ms: u64,
    pub frame: PanelFrame,
    pub events: Vec<PanelEvent>,
}

impl FrameRecord {
    /// The record as one JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let events: Vec<serde_json::Value> = self.events.iter().map(event_json).collect();
        serde_json::json!({
            "frame": self.index,
            "elapsed_ms": self.elapsed_ms,
            "offset": self.frame.offset,
            "panel_height": self.frame.panel_height,
            "state": self.frame.state,
            "visuals": self.frame.visuals,
            "events": events,
        })
    }
}

fn event_json(event: &PanelEvent) -> serde_json::Value {
    match event {
        PanelEvent::StateChanged { from, to } => serde_json::json!({
            "kind": "state_changed",
            "from": from,
            "to": to,
        }),
        PanelEvent::Settled(rest) => serde_json::json!({
            "kind": "settled",
            "rest": rest,
        }),
    }
}

/// Frame-stepped replay of a scenario against one controller.
pub struct Replay {
    panel: PanelController,
    max_frames: u32,
    index: u32,
    records: Vec<FrameRecord>,
}

impl Replay {
    #[must_use]
    pub fn new(panel: PanelController, max_frames: u32) -> Self {
        Self {
            panel,
            max_frames,
            index: 0,
            records: Vec::new(),
        }
    }

    /// True once the frame cap is spent.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.index >= self.max_frames
    }

    pub fn apply(&mut self, step: Step) {
        let height = self.panel.panel_height();
        match step {
            Step::Drag(DragEvent::Start) => self.panel.drag_start(),
            Step::Drag(DragEvent::Update { translation_y }) => {
                self.panel.drag_update(translation_y * height);
            }
            Step::Drag(DragEvent::End { translation_y }) => {
                self.panel.drag_end(translation_y * height);
            }
            Step::Toggle => self.panel.toggle(),
            Step::Open => self.panel.open(),
            Step::Close => self.panel.close(),
            Step::TapBackdrop => self.panel.tap_backdrop(),
            Step::Resize(viewport) => {
                let layout = self.panel.layout_for(viewport);
                self.panel.relayout(&layout);
            }
            Step::Frames(n) => {
                for _ in 0..n {
                    if !self.frame() {
                        break;
                    }
                }
            }
            Step::Settle => {
                while self.frame() && !self.panel.state().is_at_rest() {}
            }
        }
    }

    /// Advance one frame. Returns false when the frame cap is spent.
    fn frame(&mut self) -> bool {
        if self.exhausted() {
            tracing::warn!(max_frames = self.max_frames, "frame cap reached");
            return false;
        }
        self.panel.tick(FRAME);
        self.index += 1;
        let elapsed_ms = u64::from(self.index) * FRAME.as_millis() as u64;
        self.records.push(FrameRecord {
            index: self.index,
            elapsed_ms,
            frame: self.panel.frame(),
            events: self.panel.drain_events(),
        });
        true
    }

    /// Run every step of `scenario` and return the recorded frames.
    pub fn run(mut self, scenario: Scenario, viewport: Viewport) -> Vec<FrameRecord> {
        let _span = tracing::info_span!("harness.replay", scenario = %scenario).entered();
        for step in scenario.steps(viewport) {
            tracing::trace!(?step, "step");
            self.apply(step);
        }
        tracing::info!(
            frames = self.index,
            state = ?self.panel.state(),
            offset = self.panel.offset(),
            "replay finished"
        );
        self.records
    }
}
