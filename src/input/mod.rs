//! Input handling: platform events, per-frame snapshots, and the pointer
//! state machines the camera actions read.
//!
//! Hosts either feed [`InputEvent`]s to an [`InputCollector`] or implement
//! [`InputSource`] directly on top of their own input system.

/// Folds events into frame snapshots.
pub mod collector;
/// Platform-agnostic input events.
pub mod event;
/// Mouse pointer state.
pub mod pointer;
/// The per-frame query trait and snapshot type.
pub mod source;
/// Pointer bundle consumed by the actions.
pub mod state;
/// Fixed-size touch groups.
pub mod touch;

pub use collector::InputCollector;
pub use event::{InputEvent, MouseButton};
pub use pointer::{MousePointer, Pointer, PointerType};
pub use source::{InputFrame, InputSource, MOUSE_BUTTON_COUNT};
pub use state::CameraInput;
pub use touch::TouchGroup;
