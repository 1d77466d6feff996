//! Shared utilities for the navigation controller.
//!
//! Frame timing for hosts that do not track their own delta time, and the
//! logarithmic elevation curve used by zoom stepping.

pub mod elevation_curve;
/// Wall-clock frame deltas.
pub mod frame_timing;

pub use elevation_curve::ElevationCurve;
pub use frame_timing::FrameClock;
