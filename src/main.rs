//! handtree replay driver.
//!
//! Feeds a recorded landmark session through the gesture controller and
//! logs the emitted control events — a stand-in sink for exercising the
//! core without a live detection backend or renderer.

use std::fs::File;
use std::io::{self, BufReader};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use handtree::controller::{ControlConfig, GestureController};
use handtree::source::{LandmarkSource, ReplaySource};
use handtree::state_machine::ControlEvent;

#[derive(Parser, Debug)]
#[command(name = "handtree", about = "Gesture control core for a hand-driven 3D photo tree")]
struct Cli {
    /// Recorded landmark session (JSONL), or '-' for stdin
    replay: String,

    /// Debounce window between state transitions, in milliseconds
    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,

    /// Pinch distance threshold, in normalized units
    #[arg(long, default_value_t = 0.05)]
    pinch_threshold: f32,

    /// Open-finger ratio threshold
    #[arg(long, default_value_t = 1.2)]
    open_ratio: f32,

    /// Only log committed state changes
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handtree=info".into()),
        )
        .init();

    let mut config = ControlConfig::default();
    config.state_machine.debounce = Duration::from_millis(cli.debounce_ms);
    config.classifier.pinch_threshold = cli.pinch_threshold;
    config.classifier.open_ratio = cli.open_ratio;

    // A source that fails to open disables the feature for the session:
    // reported once, no retries, no partial operation.
    let mut source: Box<dyn LandmarkSource> = if cli.replay == "-" {
        Box::new(ReplaySource::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(&cli.replay)
            .with_context(|| format!("landmark source unavailable: {}", cli.replay))?;
        Box::new(ReplaySource::new(BufReader::new(file)))
    };

    let mut controller = GestureController::new(config);
    let mut ticks = 0u64;

    while let Some(tick) = source.next_tick()? {
        ticks += 1;
        let t = tick.at.as_millis();
        for event in controller.on_frame(tick.frame.as_ref(), tick.at) {
            match event {
                ControlEvent::StateChanged(state) => {
                    info!("t={t}ms state -> {}", state.as_str());
                }
                ControlEvent::PhotoGrab(grabbing) if !cli.quiet => {
                    info!("t={t}ms photo-grab {grabbing}");
                }
                ControlEvent::CameraMove { dx, dy } if !cli.quiet => {
                    info!("t={t}ms camera-move ({dx:.3}, {dy:.3})");
                }
                _ => {}
            }
        }
    }

    info!(
        "replay complete: {ticks} ticks, final state {}",
        controller.state().as_str(),
    );
    Ok(())
}
