//! Landmark sources — the detection backend as a capability boundary.
//!
//! The detector is a black box that, once per tick, either produces a
//! full 21-joint frame or nothing. [`LandmarkSource`] keeps the control
//! core testable without any real backend; [`ReplaySource`] feeds
//! recorded sessions (JSONL, one tick per line) from any buffered reader.
//!
//! Record shape, matching what the detector side emits:
//! `{"t_ms": 33, "hand": {"landmarks": [{"x":…,"y":…,"z":…} × 21]}}`
//! with `"hand": null` when no hand was detected.

use std::io::BufRead;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::landmark::{Joint, LandmarkFrame};

// ── Tick ───────────────────────────────────────────────────

/// One tick from a source: a monotonic timestamp and an optional hand.
#[derive(Debug, Clone)]
pub struct Tick {
    pub at: Duration,
    /// `None` when no hand was detected this tick.
    pub frame: Option<LandmarkFrame>,
}

/// Anything that produces landmark ticks in arrival order. There is no
/// reordering or buffering behind this trait; a late frame is simply a
/// tick that never happened.
pub trait LandmarkSource {
    /// Next tick, or `None` at end of stream. An `Err` means the source
    /// itself is broken (not a malformed detection — those degrade to
    /// "no hand").
    fn next_tick(&mut self) -> Result<Option<Tick>>;
}

// ── Replay records ─────────────────────────────────────────

#[derive(Deserialize)]
struct HandRecord {
    landmarks: Vec<Joint>,
}

#[derive(Deserialize)]
struct TickRecord {
    t_ms: u64,
    hand: Option<HandRecord>,
}

// ── ReplaySource ───────────────────────────────────────────

/// Replays a recorded landmark session from a buffered reader.
///
/// Malformed lines and hands with the wrong landmark count degrade to
/// "no hand detected" for that tick — the session keeps playing and the
/// core never sees a partial frame.
pub struct ReplaySource<R> {
    reader: R,
    line: u64,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_tick(&mut self) -> Result<Option<Tick>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            self.line += 1;
            let n = self
                .reader
                .read_line(&mut buf)
                .context("reading replay stream")?;
            if n == 0 {
                return Ok(None);
            }
            let trimmed = buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: TickRecord = match serde_json::from_str(trimmed) {
                Ok(record) => record,
                Err(err) => {
                    // No usable timestamp either, so the line is skipped
                    // rather than surfaced as an empty tick.
                    debug!("replay line {}: unparseable tick: {err}", self.line);
                    continue;
                }
            };

            let frame = record.hand.and_then(|hand| {
                let frame = LandmarkFrame::from_joints(&hand.landmarks);
                if frame.is_none() {
                    debug!(
                        "replay line {}: malformed hand ({} joints), treating as no hand",
                        self.line,
                        hand.landmarks.len(),
                    );
                }
                frame
            });

            return Ok(Some(Tick {
                at: Duration::from_millis(record.t_ms),
                frame,
            }));
        }
    }
}

// ── Tests ──────────────────────────────────────────────────
