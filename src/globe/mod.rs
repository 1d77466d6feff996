//! Collaborators the camera needs from the host engine.
//!
//! The navigation core never talks to a renderer or terrain system
//! directly. It reads and writes the camera pose through [`GlobeAnchor`],
//! converts orientations through [`Georeference`], and queries the surface
//! through [`RayCaster`]. [`SphericalGlobe`] and [`AnchorPose`] implement
//! all three for a perfect sphere, which is enough for tests and the replay
//! binary.

use glam::{DVec2, DVec3};

use crate::math::Quaterniond;

/// Stored pose implementing [`GlobeAnchor`].
pub mod anchor;
/// Ray-cast helpers shared by the gestures.
pub mod raycast;
/// Perfect-sphere reference collaborators.
pub mod sphere;

pub use anchor::AnchorPose;
pub use raycast::{aim_at_hit_or_center, height_above_surface, GlobeAim};
pub use sphere::{SphericalGlobe, Viewport};

/// The camera pose owned by the host.
pub trait GlobeAnchor {
    /// Position in globe-fixed (ECEF) meters.
    fn position_globe_fixed(&self) -> DVec3;
    /// Move the anchor.
    fn set_position_globe_fixed(&mut self, position: DVec3);
    /// Orientation relative to the local east-up-north frame.
    fn rotation_east_up_north(&self) -> Quaterniond;
    /// Replace the east-up-north orientation.
    fn set_rotation_east_up_north(&mut self, rotation: Quaterniond);
    /// Height above the reference surface in meters.
    fn height(&self) -> f64;
}

/// Conversion between local east-up-north frames and the globe-fixed frame.
pub trait Georeference {
    /// Rotation taking east-up-north axes at `position` to globe-fixed axes
    /// (+X east, +Y up, −Z north).
    fn east_up_north_to_globe_fixed(&self, position: DVec3) -> Quaterniond;
}

/// Surface queries.
pub trait RayCaster {
    /// Globe-fixed hit of the ray through `screen` (pixels, origin
    /// bottom-left) from `view`, if any.
    fn cast(&self, view: &CameraView, screen: DVec2) -> Option<DVec3>;

    /// Distance from `start` to the surface along the line toward the globe
    /// center, if the line hits it.
    fn cast_toward_center(&self, start: DVec3) -> Option<f64>;
}

/// Camera pose in globe-fixed coordinates, as handed to ray casts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera position.
    pub position: DVec3,
    /// Camera orientation (local −Z is the view direction).
    pub rotation: Quaterniond,
}

impl CameraView {
    /// View direction.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        self.rotation.forward()
    }
}
