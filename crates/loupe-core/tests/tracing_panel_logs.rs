#![forbid(unsafe_code)]

//! Log contract of the panel controller.
//!
//! An invalid panel height must surface as an ERROR event; snaps run inside
//! a `panel.snap` span carrying the rest state they head for.
//!
//! Run:
//!   cargo test -p loupe-core --test tracing_panel_logs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use loupe_core::{PanelController, PanelState, RestState};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == tracing::Level::ERROR)
            .collect()
    }
}

struct Capture(CaptureHandle);

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.0.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.0.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> CaptureHandle {
    let handle = CaptureHandle::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(Capture(handle.clone()));
    tracing::subscriber::with_default(subscriber, f);
    handle
}

#[test]
fn zero_height_logs_error_at_construction() {
    let capture = with_captured(|| {
        let panel = PanelController::new(0.0);
        assert_eq!(panel.offset(), 0.0);
        assert_eq!(panel.state(), PanelState::Closed);
    });
    let errors = capture.errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].message.contains("invalid panel height"));
    assert_eq!(errors[0].fields.get("panel_height").map(String::as_str), Some("0"));
}

#[test]
fn negative_height_from_layout_logs_error_and_refuses_motion() {
    let capture = with_captured(|| {
        let mut panel = PanelController::new(400.0);
        panel.set_panel_height(-10.0);
        panel.toggle();
        panel.drag_start();
        panel.tick(Duration::from_millis(16));
        assert_eq!(panel.offset(), 0.0);
        assert!(!panel.is_animating());
        assert!(!panel.visuals().backdrop_interactive);
    });
    let errors = capture.errors();
    assert!(
        errors.iter().any(|e| e.message.contains("invalid panel height")),
        "{errors:?}"
    );
    assert!(
        errors.iter().any(|e| e.message.contains("refusing to animate")),
        "{errors:?}"
    );
}

#[test]
fn valid_usage_logs_no_errors() {
    let capture = with_captured(|| {
        let mut panel = PanelController::new(400.0);
        panel.open();
        for _ in 0..200 {
            panel.tick(Duration::from_millis(16));
        }
        assert!(panel.is_open());
    });
    assert!(capture.errors().is_empty());
}

#[test]
fn snap_runs_inside_panel_snap_span() {
    let capture = with_captured(|| {
        let mut panel = PanelController::new(400.0);
        panel.animate_to(RestState::Open, None);
    });
    let spans = capture.spans();
    let snap = spans
        .iter()
        .find(|s| s.name == "panel.snap")
        .expect("panel.snap span recorded");
    assert_eq!(snap.fields.get("rest").map(String::as_str), Some("open"));

    let started = capture
        .events()
        .into_iter()
        .find(|e| e.message == "snap started")
        .expect("snap started event");
    assert_eq!(started.parent_span_name.as_deref(), Some("panel.snap"));
}
