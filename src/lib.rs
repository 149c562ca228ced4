//! Gesture-control core for a hand-driven 3D photo tree.
//!
//! Interprets a live stream of 21-point hand landmarks into discrete scene
//! modes and continuous camera-pan signals. The detection backend and the
//! renderer are external collaborators: landmark frames come in via
//! [`source::LandmarkSource`], control events go out as
//! [`state_machine::ControlEvent`] values.
//!
//! Pipeline per tick: landmark frame → [`classifier`] → debounced
//! [`state_machine`] → events; concurrently wrist position → [`camera`]
//! pan delta while the scene is scattered. [`controller`] wires it all up.

pub mod camera;
pub mod classifier;
pub mod controller;
pub mod landmark;
pub mod source;
pub mod state_machine;

pub use controller::{ControlConfig, GestureController};
pub use landmark::{Joint, LandmarkFrame};
pub use state_machine::{ControlEvent, TreeState};
