//! Property-based invariant tests for the panel controller.
//!
//! These tests verify, for arbitrary interleavings of drags, programmatic
//! requests, resizes, and frames:
//!
//! 1. Offset stays within [0, H] at every sampled point
//! 2. Open rests at exactly 0 and Closed at exactly H, with nothing in flight
//! 3. Derived visuals stay inside their ranges
//! 4. The snap decision ties toward closing and is deterministic
//! 5. Same operations yield the same trajectory

use std::time::Duration;

use loupe_core::visuals::compute;
use loupe_core::{DragEvent, PanelController, PanelState, RestState, SnapResolver};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Drag(DragEvent),
    Toggle,
    Open,
    Close,
    TapBackdrop,
    Resize(f64),
    Tick(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Drag(DragEvent::Start)),
        (-1200.0f64..1200.0).prop_map(|t| Op::Drag(DragEvent::Update { translation_y: t })),
        (-1200.0f64..1200.0).prop_map(|t| Op::Drag(DragEvent::End { translation_y: t })),
        Just(Op::Toggle),
        Just(Op::Open),
        Just(Op::Close),
        Just(Op::TapBackdrop),
        (100.0f64..900.0).prop_map(Op::Resize),
        (1u64..80).prop_map(Op::Tick),
        (1u64..80).prop_map(Op::Tick),
        (1u64..80).prop_map(Op::Tick),
    ]
}

fn apply(panel: &mut PanelController, op: &Op) {
    match op {
        Op::Drag(event) => panel.handle_drag(*event),
        Op::Toggle => panel.toggle(),
        Op::Open => panel.open(),
        Op::Close => panel.close(),
        Op::TapBackdrop => panel.tap_backdrop(),
        Op::Resize(h) => panel.set_panel_height(*h),
        Op::Tick(ms) => panel.tick(Duration::from_millis(*ms)),
    }
}

fn assert_invariants(panel: &PanelController) -> Result<(), TestCaseError> {
    let h = panel.panel_height();
    let offset = panel.offset();
    prop_assert!(
        (0.0..=h).contains(&offset),
        "offset {offset} outside [0, {h}]"
    );
    match panel.state() {
        PanelState::Open => {
            prop_assert_eq!(offset, 0.0);
            prop_assert!(!panel.is_animating());
        }
        PanelState::Closed => {
            prop_assert_eq!(offset, h);
            prop_assert!(!panel.is_animating());
        }
        PanelState::Dragging => prop_assert!(!panel.is_animating()),
        PanelState::SnappingOpen | PanelState::SnappingClosed => {
            prop_assert!(panel.is_animating());
        }
    }
    let visuals = panel.visuals();
    prop_assert!((0.0 - EPS..=0.5 + EPS).contains(&visuals.backdrop_opacity));
    prop_assert!((0.3 - EPS..=1.0 + EPS).contains(&visuals.header_opacity));
    prop_assert_eq!(visuals.backdrop_interactive, offset < h);
    Ok(())
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(
        height in 100.0f64..900.0,
        ops in prop::collection::vec(op_strategy(), 1..120),
    ) {
        let mut panel = PanelController::new(height);
        assert_invariants(&panel)?;
        for op in &ops {
            apply(&mut panel, op);
            assert_invariants(&panel)?;
        }
    }

    #[test]
    fn every_snap_eventually_rests(
        height in 100.0f64..900.0,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut panel = PanelController::new(height);
        for op in &ops {
            apply(&mut panel, op);
        }
        if panel.state() == PanelState::Dragging {
            panel.drag_end(0.0);
        }
        for _ in 0..2_000 {
            if panel.state().is_at_rest() {
                break;
            }
            panel.tick(Duration::from_millis(16));
        }
        prop_assert!(panel.state().is_at_rest(), "stuck in {:?}", panel.state());
        assert_invariants(&panel)?;
    }

    #[test]
    fn drag_samples_stay_clamped(
        height in 1.0f64..2000.0,
        start_open in any::<bool>(),
        translations in prop::collection::vec(-5000.0f64..5000.0, 1..50),
    ) {
        let mut panel = PanelController::new(height);
        if start_open {
            panel.open();
            for _ in 0..2_000 {
                panel.tick(Duration::from_millis(16));
                if panel.is_open() {
                    break;
                }
            }
        }
        panel.drag_start();
        for t in &translations {
            panel.drag_update(*t);
            prop_assert!((0.0..=height).contains(&panel.offset()));
        }
    }

    #[test]
    fn snap_decision_is_a_position_threshold(
        height in 1.0f64..5000.0,
        fraction in 0.0f64..=1.0,
    ) {
        let offset = height * fraction;
        let expected = if offset < height / 2.0 { RestState::Open } else { RestState::Closed };
        prop_assert_eq!(SnapResolver::decide(offset, height), expected);
        prop_assert_eq!(SnapResolver::decide(height / 2.0, height), RestState::Closed);
    }

    #[test]
    fn visuals_are_monotone_in_offset(
        height in 1.0f64..5000.0,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let near = compute(lo * height, height);
        let far = compute(hi * height, height);
        prop_assert!(near.backdrop_opacity + EPS >= far.backdrop_opacity);
        prop_assert!(near.header_opacity <= far.header_opacity + EPS);
    }

    #[test]
    fn deterministic_trajectories(
        ops in prop::collection::vec(op_strategy(), 1..80),
    ) {
        let run = || {
            let mut panel = PanelController::new(400.0);
            ops.iter()
                .map(|op| {
                    apply(&mut panel, op);
                    (panel.offset(), panel.state())
                })
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }
}
