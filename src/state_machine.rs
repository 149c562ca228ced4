//! Debounced scene-state machine.
//!
//! Consumes per-tick [`HandPose`] features and drives the scene mode:
//! `TreeShape` (photos arranged as a tree), `Scattered` (photos spread
//! through space, camera pan active), `PhotoView` (a photo grabbed and
//! brought forward). Committed transitions are rate-limited by a debounce
//! window so noisy per-frame classification cannot thrash the mode.
//!
//! The transition rules form a strict priority list, resolved into a
//! tagged [`GestureSignal`] before any state is touched, so the order
//! stays auditable in isolation from the classifier.

use std::time::Duration;

use tracing::debug;

use crate::classifier::HandPose;

// ── TreeState ──────────────────────────────────────────────

/// Discrete scene mode. The only persistent state the core owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    /// Photos arranged as a tree (initial mode).
    TreeShape,
    /// Photos scattered through space; camera pan follows the wrist.
    Scattered,
    /// One photo grabbed and held in front of the camera.
    PhotoView,
}

impl TreeState {
    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TreeShape => "tree-shape",
            Self::Scattered => "scattered",
            Self::PhotoView => "photo-view",
        }
    }
}

// ── GestureSignal ──────────────────────────────────────────

/// Which transition rule a pose selects, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSignal {
    /// Thumb and index pinched while scattered — grab a photo.
    Pinch,
    /// Four open fingers — scatter the tree.
    OpenPalm,
    /// All fingers closed with no pinch — reform the tree.
    Fist,
    /// Transitional pose; leaves the machine untouched.
    Ambiguous,
}

impl GestureSignal {
    /// Resolve the priority-ordered rule list against the current state.
    ///
    /// The pinch rule only applies while `Scattered`, which is what makes
    /// `PhotoView` reachable exclusively from `Scattered`. A pinch held in
    /// any other state falls through the list: the fist rule requires no
    /// pinch, so a pinched fist resolves to `Ambiguous`, not `Fist`.
    pub fn resolve(pose: HandPose, current: TreeState) -> Self {
        if pose.is_pinching && current == TreeState::Scattered {
            Self::Pinch
        } else if pose.fingers_open >= 4 {
            Self::OpenPalm
        } else if pose.fingers_open == 0 && !pose.is_pinching {
            Self::Fist
        } else {
            Self::Ambiguous
        }
    }
}

// ── Events ─────────────────────────────────────────────────

/// Events emitted toward the rendering sink, at most one of each per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// A debounce-gated state transition committed.
    StateChanged(TreeState),
    /// Grab/release signal for the photo under the pinch. Emitted every
    /// tick its rule matches, independent of whether the state commit
    /// succeeds — the sink sees redundant same-value sets.
    PhotoGrab(bool),
    /// Continuous camera pan delta, emitted only while `Scattered`.
    CameraMove { dx: f32, dy: f32 },
}

// ── Config ─────────────────────────────────────────────────

/// Transition timing configuration.
#[derive(Debug, Clone)]
pub struct StateMachineConfig {
    /// Minimum interval between two committed transitions. Ticks whose
    /// target lands inside the window are dropped, not queued.
    pub debounce: Duration,
}

impl Default for StateMachineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
        }
    }
}

// ── TreeStateMachine ───────────────────────────────────────

/// The debounced state machine. Each instance is independent; nothing
/// here is shared or global, so tests and multi-user setups can run
/// several side by side.
pub struct TreeStateMachine {
    config: StateMachineConfig,
    current: TreeState,
    last_transition_at: Option<Duration>,
}

impl TreeStateMachine {
    pub fn new(config: StateMachineConfig) -> Self {
        Self {
            config,
            current: TreeState::TreeShape,
            last_transition_at: None,
        }
    }

    /// Current scene mode.
    pub fn current(&self) -> TreeState {
        self.current
    }

    /// Feed one tick of pose features. `now` is a monotonic timestamp
    /// supplied by the caller (the frame source's clock).
    pub fn update(&mut self, pose: HandPose, now: Duration) -> Vec<ControlEvent> {
        let mut events = Vec::new();

        let target = match GestureSignal::resolve(pose, self.current) {
            GestureSignal::Pinch => {
                events.push(ControlEvent::PhotoGrab(true));
                Some(TreeState::PhotoView)
            }
            GestureSignal::OpenPalm => {
                events.push(ControlEvent::PhotoGrab(false));
                Some(TreeState::Scattered)
            }
            GestureSignal::Fist => {
                events.push(ControlEvent::PhotoGrab(false));
                Some(TreeState::TreeShape)
            }
            GestureSignal::Ambiguous => None,
        };

        if let Some(target) = target {
            // Requesting the current state is a no-op regardless of timing;
            // a differing target inside the debounce window is dropped and
            // simply re-evaluated next tick.
            if target != self.current && self.window_elapsed(now) {
                debug!(
                    "state transition: {} -> {} at {}ms",
                    self.current.as_str(),
                    target.as_str(),
                    now.as_millis(),
                );
                self.current = target;
                self.last_transition_at = Some(now);
                events.push(ControlEvent::StateChanged(target));
            }
        }

        events
    }

    /// Whether the debounce window has elapsed since the last commit.
    ///
    /// A `now` earlier than the last commit (clock jumped backward, e.g.
    /// after a pause) counts as elapsed so the machine cannot wedge.
    fn window_elapsed(&self, now: Duration) -> bool {
        match self.last_transition_at {
            None => true,
            Some(last) => match now.checked_sub(last) {
                Some(elapsed) => elapsed >= self.config.debounce,
                None => true,
            },
        }
    }

    /// Restore the initial mode and forget transition history.
    pub fn reset(&mut self) {
        self.current = TreeState::TreeShape;
        self.last_transition_at = None;
    }
}

impl Default for TreeStateMachine {
    fn default() -> Self {
        Self::new(StateMachineConfig::default())
    }
}

// ── Tests ──────────────────────────────────────────────────
