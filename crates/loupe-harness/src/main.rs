#![forbid(unsafe_code)]

//! Replays scripted panel interactions and prints one JSON line per frame.
//!
//! # Environment
//!
//! - `LOUPE_HARNESS_SCENARIO`: scenario name, or `all` (default `drag-open`)
//! - `LOUPE_HARNESS_WIDTH` / `LOUPE_HARNESS_HEIGHT`: viewport (default 390x844)
//! - `LOUPE_HARNESS_MAX_FRAMES`: frame cap per scenario (default 600)
//! - `LOUPE_HARNESS_CONFIG`: optional TOML file with panel tunables
//! - `LOUPE_LOG`: tracing filter, written to stderr (default `info`)
//! - `LOUPE_LOG_JSON=1`: structured JSON logs instead of text

mod scenario;

use std::io::{self, Write};

use loupe_core::{LayoutProvider, PanelConfig, PanelController, ResponsiveLayout, Viewport};
use tracing_subscriber::EnvFilter;

use crate::scenario::{Replay, Scenario};

const DEFAULT_VIEWPORT: Viewport = Viewport::new(390.0, 844.0);
const DEFAULT_MAX_FRAMES: u32 = 600;

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LOUPE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOUPE_LOG_JSON").is_ok_and(|v| v == "1");
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config() -> io::Result<PanelConfig> {
    let Ok(path) = std::env::var("LOUPE_HARNESS_CONFIG") else {
        return Ok(PanelConfig::default());
    };
    PanelConfig::from_toml_file(&path).map_err(|err| {
        tracing::error!(%path, %err, "failed to load panel config");
        io::Error::new(io::ErrorKind::InvalidData, err)
    })
}

fn scenarios() -> io::Result<Vec<Scenario>> {
    let name = std::env::var("LOUPE_HARNESS_SCENARIO").unwrap_or_else(|_| "drag-open".into());
    if name.trim().eq_ignore_ascii_case("all") {
        return Ok(Scenario::ALL.to_vec());
    }
    name.parse::<Scenario>()
        .map(|scenario| vec![scenario])
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

fn main() -> io::Result<()> {
    init_logging();

    let config = load_config()?;
    let viewport = Viewport::new(
        env_f64("LOUPE_HARNESS_WIDTH", DEFAULT_VIEWPORT.width),
        env_f64("LOUPE_HARNESS_HEIGHT", DEFAULT_VIEWPORT.height),
    );
    let max_frames = std::env::var("LOUPE_HARNESS_MAX_FRAMES")
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let layout = ResponsiveLayout::new(viewport).with_fractions(config.layout);
    tracing::info!(
        width = viewport.width,
        height = viewport.height,
        panel_height = layout.panel_height(),
        max_frames,
        "harness starting"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for scenario in scenarios()? {
        let panel = PanelController::with_config(layout.panel_height(), &config);
        for record in Replay::new(panel, max_frames).run(scenario, viewport) {
            let mut line = record.to_json();
            line["scenario"] = serde_json::Value::from(scenario.name());
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}
