//! Double-precision rotation math.
//!
//! [`Quaterniond`] is the rotation type used throughout the camera code;
//! [`vector`] holds the angle helpers the gestures need.

pub mod quaternion;
pub mod vector;

pub use quaternion::Quaterniond;
pub use vector::{angle_between, signed_angle};
