//! Camera system for globe navigation.
//!
//! Provides the globe-relative camera math, the orbit/pan/zoom gestures,
//! the state machine that arbitrates between them, and the per-frame
//! controller hosts drive.

/// Orbit, pan and zoom gestures.
pub mod actions;
/// Altitude-driven clip planes.
pub mod clipping;
/// Per-frame data handed to the gestures.
pub mod context;
/// Per-frame entry point.
pub mod controller;
/// Globe-relative camera operations.
pub mod globe;
/// Gesture arbitration.
pub mod machine;
#[cfg(test)]
pub(crate) mod testing;

pub use clipping::ClipPlanes;
pub use context::CameraContext;
pub use controller::GlobeCameraController;
pub use globe::{CameraAxes, GlobeCamera};
pub use machine::{ActionMachine, RunningAction};
