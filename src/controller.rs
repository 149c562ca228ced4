//! Per-tick orchestration: landmark frame in, control events out.
//!
//! A [`GestureController`] owns one classifier configuration and one
//! state machine, making each instance fully independent — no globals,
//! no shared state. Everything runs synchronously within the caller's
//! tick; there is no buffering and no internal concurrency.

use std::time::Duration;

use crate::camera::{self, CameraConfig};
use crate::classifier::{self, ClassifierConfig};
use crate::landmark::LandmarkFrame;
use crate::state_machine::{ControlEvent, StateMachineConfig, TreeState, TreeStateMachine};

/// Aggregated tunables for one controller instance.
#[derive(Debug, Clone, Default)]
pub struct ControlConfig {
    pub classifier: ClassifierConfig,
    pub state_machine: StateMachineConfig,
    pub camera: CameraConfig,
}

/// One independent gesture-control pipeline.
pub struct GestureController {
    config: ControlConfig,
    machine: TreeStateMachine,
}

impl GestureController {
    pub fn new(config: ControlConfig) -> Self {
        let machine = TreeStateMachine::new(config.state_machine.clone());
        Self { config, machine }
    }

    /// Current scene mode.
    pub fn state(&self) -> TreeState {
        self.machine.current()
    }

    /// Process one tick.
    ///
    /// `None` means no hand was detected this tick: the classifier is not
    /// invoked and nothing is emitted (distinct from an ambiguous pose,
    /// which classifies but fires no rule). With a frame present, the
    /// pose drives the state machine, then the wrist drives the camera
    /// pan gated by the state as of after this tick's update.
    pub fn on_frame(&mut self, frame: Option<&LandmarkFrame>, now: Duration) -> Vec<ControlEvent> {
        let Some(frame) = frame else {
            return Vec::new();
        };

        let pose = classifier::classify(frame, &self.config.classifier);
        let mut events = self.machine.update(pose, now);

        if let Some(delta) =
            camera::map_camera(frame.wrist(), self.machine.current(), &self.config.camera)
        {
            events.push(ControlEvent::CameraMove {
                dx: delta.dx,
                dy: delta.dy,
            });
        }

        events
    }

    /// Teardown/reuse policy: back to the initial mode, history forgotten.
    pub fn reset(&mut self) {
        self.machine.reset();
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(ControlConfig::default())
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::test_frames;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_absent_frame_emits_nothing() {
        let mut controller = GestureController::default();
        assert!(controller.on_frame(None, ms(0)).is_empty());
        assert_eq!(controller.state(), TreeState::TreeShape);
    }

    #[test]
    fn test_scenario_fist_fist_palm() {
        let mut controller = GestureController::default();

        // Two fists while already in TreeShape: release re-emitted, no
        // transition, no camera.
        for t in [0, 33] {
            let events = controller.on_frame(Some(&test_frames::fist(0.5, 0.8)), ms(t));
            assert_eq!(events, vec![ControlEvent::PhotoGrab(false)]);
            assert_eq!(controller.state(), TreeState::TreeShape);
        }

        // Open palm commits the scatter.
        let events = controller.on_frame(Some(&test_frames::open_palm(0.5, 0.8)), ms(66));
        assert_eq!(controller.state(), TreeState::Scattered);
        assert!(events.contains(&ControlEvent::PhotoGrab(false)));
        assert!(events.contains(&ControlEvent::StateChanged(TreeState::Scattered)));
    }

    #[test]
    fn test_scenario_pinch_grab_then_hold() {
        let mut controller = GestureController::default();
        controller.on_frame(Some(&test_frames::open_palm(0.5, 0.8)), ms(0));
        assert_eq!(controller.state(), TreeState::Scattered);

        let events = controller.on_frame(Some(&test_frames::pinch(0.5, 0.8)), ms(600));
        assert!(events.contains(&ControlEvent::PhotoGrab(true)));
        assert!(events.contains(&ControlEvent::StateChanged(TreeState::PhotoView)));
        assert_eq!(controller.state(), TreeState::PhotoView);

        // Held pinch in PhotoView: no rule matches, no events (and the
        // camera is inactive outside Scattered).
        let events = controller.on_frame(Some(&test_frames::pinch(0.5, 0.8)), ms(700));
        assert!(events.is_empty());
        assert_eq!(controller.state(), TreeState::PhotoView);
    }

    #[test]
    fn test_scenario_camera_pan_while_scattered() {
        let mut controller = GestureController::default();
        controller.on_frame(Some(&test_frames::open_palm(0.5, 0.8)), ms(0));

        let events = controller.on_frame(Some(&test_frames::open_palm(0.25, 0.5)), ms(700));
        let pan = events.iter().find_map(|e| match e {
            ControlEvent::CameraMove { dx, dy } => Some((*dx, *dy)),
            _ => None,
        });
        let (dx, dy) = pan.expect("camera pan while scattered");
        assert!((dx - 1.0).abs() < 1e-6);
        assert!(dy.abs() < 1e-6);
    }

    #[test]
    fn test_camera_fires_every_scattered_tick() {
        let mut controller = GestureController::default();
        controller.on_frame(Some(&test_frames::open_palm(0.5, 0.8)), ms(0));

        // Ambiguous poses leave the state alone but still pan.
        for t in [33, 66, 99] {
            let events = controller.on_frame(Some(&test_frames::two_fingers(0.4, 0.6)), ms(t));
            assert!(events
                .iter()
                .any(|e| matches!(e, ControlEvent::CameraMove { .. })));
            assert_eq!(events.len(), 1, "only the pan should fire, got {events:?}");
        }
    }

    #[test]
    fn test_no_camera_outside_scattered() {
        let mut controller = GestureController::default();
        let events = controller.on_frame(Some(&test_frames::two_fingers(0.2, 0.2)), ms(0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_debounced_targets_are_dropped_end_to_end() {
        let mut controller = GestureController::default();
        controller.on_frame(Some(&test_frames::open_palm(0.5, 0.8)), ms(0));
        assert_eq!(controller.state(), TreeState::Scattered);

        let events = controller.on_frame(Some(&test_frames::fist(0.5, 0.8)), ms(100));
        assert!(!events
            .iter()
            .any(|e| matches!(e, ControlEvent::StateChanged(_))));
        assert_eq!(controller.state(), TreeState::Scattered);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = GestureController::default();
        let mut b = GestureController::default();

        a.on_frame(Some(&test_frames::open_palm(0.5, 0.8)), ms(0));
        assert_eq!(a.state(), TreeState::Scattered);
        assert_eq!(b.state(), TreeState::TreeShape);

        b.on_frame(None, ms(0));
        assert_eq!(b.state(), TreeState::TreeShape);
    }

    #[test]
    fn test_reset() {
        let mut controller = GestureController::default();
        controller.on_frame(Some(&test_frames::open_palm(0.5, 0.8)), ms(0));
        controller.reset();
        assert_eq!(controller.state(), TreeState::TreeShape);
    }
}
