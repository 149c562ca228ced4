//! Camera pan mapping.
//!
//! While the scene is scattered, the wrist's offset from the frame center
//! maps to a 2-axis pan delta. The sign inversion matches a mirrored
//! (selfie) video feed, and the horizontal axis is weighted 2× the
//! vertical. No smoothing or easing here — damping is the renderer's job.

use crate::landmark::Joint;
use crate::state_machine::TreeState;

/// Transient 2-axis pan signal. No history is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDelta {
    pub dx: f32,
    pub dy: f32,
}

/// Pan scaling per axis.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub pan_scale_x: f32,
    pub pan_scale_y: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_scale_x: 4.0,
            pan_scale_y: 2.0,
        }
    }
}

/// Map a wrist position to a pan delta. Pure and stateless; yields a
/// delta only while the scene is `Scattered`.
pub fn map_camera(wrist: &Joint, state: TreeState, config: &CameraConfig) -> Option<CameraDelta> {
    if state != TreeState::Scattered {
        return None;
    }
    Some(CameraDelta {
        dx: (0.5 - wrist.x) * config.pan_scale_x,
        dy: (0.5 - wrist.y) * config.pan_scale_y,
    })
}

// ── Tests ──────────────────────────────────────────────────
