use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::sphere::SphericalGlobe;
use super::GlobeAnchor;
use crate::math::Quaterniond;

/// A camera pose stored by value.
///
/// Heights are measured against a sphere of `radius`, matching
/// [`SphericalGlobe`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPose {
    /// Globe-fixed position in meters.
    pub position: DVec3,
    /// Orientation relative to east-up-north.
    pub rotation: Quaterniond,
    /// Reference sphere radius for [`GlobeAnchor::height`].
    pub radius: f64,
}

impl AnchorPose {
    /// Pose at a geodetic location.
    ///
    /// `heading` is degrees clockwise from north; `pitch` is degrees above
    /// the horizon, so −90 looks straight down.
    #[must_use]
    pub fn from_geodetic(
        globe: &SphericalGlobe,
        longitude: f64,
        latitude: f64,
        height: f64,
        heading: f64,
        pitch: f64,
    ) -> Self {
        let rotation = Quaterniond::angle_axis(-heading, DVec3::Y)
            * Quaterniond::angle_axis(pitch, DVec3::X);
        Self {
            position: globe
                .geodetic_to_globe_fixed(longitude, latitude, height),
            rotation,
            radius: globe.radius,
        }
    }
}

impl GlobeAnchor for AnchorPose {
    fn position_globe_fixed(&self) -> DVec3 {
        self.position
    }

    fn set_position_globe_fixed(&mut self, position: DVec3) {
        self.position = position;
    }

    fn rotation_east_up_north(&self) -> Quaterniond {
        self.rotation
    }

    fn set_rotation_east_up_north(&mut self, rotation: Quaterniond) {
        self.rotation = rotation;
    }

    fn height(&self) -> f64 {
        self.position.length() - self.radius
    }
}
