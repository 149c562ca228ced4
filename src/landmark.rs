//! Hand landmark data model.
//!
//! Models the 21-point hand layout produced by the landmark detector
//! (MediaPipe hand-landmarker convention): index 0 is the wrist, 4 the
//! thumb tip, 8/12/16/20 the fingertips, 5/9/13/17 the MCP knuckles.
//! Coordinates are normalized to [0,1] with the origin top-left, as the
//! detector emits them; z is depth relative to the wrist and unused here.
//!
//! A frame is all-or-nothing: anything other than exactly 21 joints is
//! rejected at construction and treated upstream as "no hand detected".

use serde::Deserialize;
use tracing::debug;

// ── Joint indices ──────────────────────────────────────────

/// Number of joints per hand.
pub const JOINT_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// (tip, knuckle) index pairs for the four non-thumb fingers,
/// in index → pinky order.
pub const FINGER_PAIRS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

// ── Joint ──────────────────────────────────────────────────

/// One detected joint in normalized image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Joint {
    pub x: f32,
    pub y: f32,
    /// Depth relative to the wrist; carried for fidelity to the detector
    /// output but unused by the control core.
    #[serde(default)]
    pub z: f32,
}

impl Joint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Planar Euclidean distance to another joint.
    pub fn distance(&self, other: &Joint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ── LandmarkFrame ──────────────────────────────────────────

/// A complete 21-joint hand observation for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    joints: [Joint; JOINT_COUNT],
}

impl LandmarkFrame {
    /// Build a frame from exactly 21 joints. Any other count is a
    /// malformed detection and yields `None`.
    pub fn from_joints(joints: &[Joint]) -> Option<Self> {
        match <[Joint; JOINT_COUNT]>::try_from(joints) {
            Ok(joints) => Some(Self { joints }),
            Err(_) => {
                debug!(
                    "landmark frame rejected: expected {} joints, got {}",
                    JOINT_COUNT,
                    joints.len(),
                );
                None
            }
        }
    }

    /// Build a frame from a flat `[x0, y0, z0, x1, …]` buffer, the shape
    /// detectors commonly hand over an FFI or IPC boundary.
    pub fn from_flat(data: &[f32]) -> Option<Self> {
        if data.len() != JOINT_COUNT * 3 {
            debug!(
                "landmark frame rejected: expected {} values, got {}",
                JOINT_COUNT * 3,
                data.len(),
            );
            return None;
        }
        let mut joints = [Joint::default(); JOINT_COUNT];
        for (joint, chunk) in joints.iter_mut().zip(data.chunks_exact(3)) {
            *joint = Joint {
                x: chunk[0],
                y: chunk[1],
                z: chunk[2],
            };
        }
        Some(Self { joints })
    }

    /// Joint at one of the index constants above.
    pub fn joint(&self, index: usize) -> &Joint {
        &self.joints[index]
    }

    pub fn wrist(&self) -> &Joint {
        &self.joints[WRIST]
    }
}

// ── Test frame builders ────────────────────────────────────


// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_joints_exact_count() {
        let joints = [Joint::default(); JOINT_COUNT];
        assert!(LandmarkFrame::from_joints(&joints).is_some());
    }

    #[test]
    fn test_from_joints_rejects_partial() {
        let joints = [Joint::default(); 20];
        assert!(LandmarkFrame::from_joints(&joints).is_none());
        let joints = [Joint::default(); 22];
        assert!(LandmarkFrame::from_joints(&joints).is_none());
        assert!(LandmarkFrame::from_joints(&[]).is_none());
    }

    #[test]
    fn test_from_flat() {
        let mut data = vec![0.0f32; JOINT_COUNT * 3];
        data[INDEX_TIP * 3] = 0.3;
        data[INDEX_TIP * 3 + 1] = 0.7;
        let frame = LandmarkFrame::from_flat(&data).unwrap();
        assert!((frame.joint(INDEX_TIP).x - 0.3).abs() < f32::EPSILON);
        assert!((frame.joint(INDEX_TIP).y - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        assert!(LandmarkFrame::from_flat(&[0.0; 60]).is_none());
        assert!(LandmarkFrame::from_flat(&[]).is_none());
    }

    #[test]
    fn test_joint_distance() {
        let a = Joint::new(0.0, 0.0);
        let b = Joint::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
        assert!((b.distance(&a) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_distance_ignores_depth() {
        let a = Joint { x: 0.0, y: 0.0, z: 0.0 };
        let b = Joint { x: 0.3, y: 0.4, z: 9.0 };
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wrist_accessor() {
        let frame = test_frames::open_palm(0.25, 0.5);
        assert!((frame.wrist().x - 0.25).abs() < f32::EPSILON);
        assert!((frame.wrist().y - 0.5).abs() < f32::EPSILON);
    }
}
