//! Pose classification — one landmark frame in, one [`HandPose`] out.
//!
//! Pure and stateless: no history, no side effects, deterministic for a
//! given frame. Only the per-tick features are computed here; turning a
//! stream of poses into scene-state transitions is the state machine's job.

use crate::landmark::{LandmarkFrame, FINGER_PAIRS, INDEX_TIP, THUMB_TIP};

// ── Config ─────────────────────────────────────────────────

/// Classification thresholds. Tuned empirically, exposed as configuration.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// A finger counts as open iff wrist→tip exceeds this multiple of
    /// wrist→knuckle.
    pub open_ratio: f32,
    /// Maximum thumb-tip-to-index-tip distance (normalized units) for a
    /// pinch.
    pub pinch_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            open_ratio: 1.2,
            pinch_threshold: 0.05,
        }
    }
}

// ── HandPose ───────────────────────────────────────────────

/// Per-frame pose features consumed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandPose {
    /// Count of open non-thumb fingers (0–4). The thumb is never counted;
    /// it only participates in the pinch test.
    pub fingers_open: u8,
    /// Thumb tip and index tip close together.
    pub is_pinching: bool,
}

/// Classify one frame.
///
/// The open-finger test compares two distances measured from the same
/// reference point (the wrist), so it is invariant to hand size and
/// distance from the camera. The pinch test is an absolute distance in
/// normalized image space.
pub fn classify(frame: &LandmarkFrame, config: &ClassifierConfig) -> HandPose {
    let wrist = frame.wrist();

    let fingers_open = FINGER_PAIRS
        .iter()
        .filter(|(tip, knuckle)| {
            wrist.distance(frame.joint(*tip))
                > config.open_ratio * wrist.distance(frame.joint(*knuckle))
        })
        .count() as u8;

    let pinch_gap = frame.joint(THUMB_TIP).distance(frame.joint(INDEX_TIP));

    HandPose {
        fingers_open,
        is_pinching: pinch_gap < config.pinch_threshold,
    }
}

// ── Tests ──────────────────────────────────────────────────
