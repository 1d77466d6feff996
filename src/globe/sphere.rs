//! A perfectly spherical globe viewed through a perspective camera.
//!
//! Globe-fixed axes follow ECEF: +Z through the north pole, +X through
//! longitude 0 on the equator.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::{CameraView, Georeference, RayCaster};
use crate::math::Quaterniond;

/// Viewport used to turn screen positions into rays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Vertical field of view in degrees.
    pub fovy_degrees: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            fovy_degrees: 60.0,
        }
    }
}

impl Viewport {
    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Viewport center in pixels.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Camera-local unit direction through `screen`.
    #[must_use]
    pub fn local_ray(&self, screen: DVec2) -> DVec3 {
        let ndc_x = 2.0 * screen.x / self.width.max(1.0) - 1.0;
        let ndc_y = 2.0 * screen.y / self.height.max(1.0) - 1.0;
        let tan_half = (self.fovy_degrees.to_radians() * 0.5).tan();
        let x = ndc_x * self.aspect() * tan_half;
        DVec3::new(x, ndc_y * tan_half, -1.0).normalize()
    }
}

/// Sphere-backed [`Georeference`] and [`RayCaster`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalGlobe {
    /// Sphere radius in meters.
    pub radius: f64,
    /// Viewport for screen rays.
    pub viewport: Viewport,
}

impl Default for SphericalGlobe {
    fn default() -> Self {
        Self::new(Self::EARTH_RADIUS, Viewport::default())
    }
}

impl SphericalGlobe {
    /// WGS84 equatorial radius.
    pub const EARTH_RADIUS: f64 = 6_378_137.0;

    /// Create a globe.
    #[must_use]
    pub const fn new(radius: f64, viewport: Viewport) -> Self {
        Self { radius, viewport }
    }

    /// Globe-fixed position of a point at `height` meters above the sphere.
    #[must_use]
    pub fn geodetic_to_globe_fixed(
        &self,
        longitude: f64,
        latitude: f64,
        height: f64,
    ) -> DVec3 {
        let (sin_lon, cos_lon) = longitude.to_radians().sin_cos();
        let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
        let unit = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
        (self.radius + height) * unit
    }

    /// `(longitude, latitude, height)` of a globe-fixed position.
    #[must_use]
    pub fn globe_fixed_to_geodetic(&self, position: DVec3) -> DVec3 {
        let r = position.length();
        if r == 0.0 {
            return DVec3::new(0.0, 0.0, -self.radius);
        }
        let longitude = position.y.atan2(position.x).to_degrees();
        let latitude = (position.z / r).clamp(-1.0, 1.0).asin().to_degrees();
        DVec3::new(longitude, latitude, r - self.radius)
    }

    /// The `(east, up, north)` unit axes at `position`.
    #[must_use]
    pub fn local_axes(&self, position: DVec3) -> (DVec3, DVec3, DVec3) {
        let up = position.normalize_or(DVec3::Z);
        let mut east = DVec3::Z.cross(up).normalize_or_zero();
        if east == DVec3::ZERO {
            // Pole: any horizontal direction will do.
            east = DVec3::Y;
        }
        let north = up.cross(east);
        (east, up, north)
    }
}

impl Georeference for SphericalGlobe {
    fn east_up_north_to_globe_fixed(&self, position: DVec3) -> Quaterniond {
        let (east, up, north) = self.local_axes(position);
        Quaterniond::from_rotation_axes(east, up, -north)
    }
}

impl RayCaster for SphericalGlobe {
    fn cast(&self, view: &CameraView, screen: DVec2) -> Option<DVec3> {
        let direction = view.rotation * self.viewport.local_ray(screen);
        let origin = view.position;

        let b = origin.dot(direction);
        let c = origin.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let t = if -b - root >= 0.0 { -b - root } else { -b + root };
        if t < 0.0 {
            return None;
        }
        Some(origin + direction * t)
    }

    fn cast_toward_center(&self, start: DVec3) -> Option<f64> {
        let distance = start.length() - self.radius;
        (distance > 0.0).then_some(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f64 = SphericalGlobe::EARTH_RADIUS;

    fn assert_vec_close(a: DVec3, b: DVec3, eps: f64) {
        assert!((a - b).length() <= eps, "expected {b}, got {a}");
    }

    #[test]
    fn identity_east_up_north_faces_north() {
        let globe = SphericalGlobe::default();
        let p = globe.geodetic_to_globe_fixed(0.0, 0.0, 0.0);
        let frame = globe.east_up_north_to_globe_fixed(p);
        assert_vec_close(frame.forward(), DVec3::Z, 1e-12);
        assert_vec_close(frame.up(), DVec3::X, 1e-12);
        assert_vec_close(frame.right(), DVec3::Y, 1e-12);
    }

    #[test]
    fn pole_frame_is_orthonormal() {
        let globe = SphericalGlobe::default();
        let frame = globe.east_up_north_to_globe_fixed(DVec3::new(0.0, 0.0, R));
        assert!((frame.length() - 1.0).abs() < 1e-12);
        assert_vec_close(frame.up(), DVec3::Z, 1e-12);
    }

    #[test]
    fn geodetic_round_trip() {
        let globe = SphericalGlobe::default();
        let p = globe.geodetic_to_globe_fixed(-122.4, 37.8, 1200.0);
        let g = globe.globe_fixed_to_geodetic(p);
        assert_vec_close(g, DVec3::new(-122.4, 37.8, 1200.0), 1e-6);
    }

    #[test]
    fn center_ray_hits_below_camera() {
        let globe = SphericalGlobe::default();
        let view = CameraView {
            position: DVec3::new(R + 1.0e6, 0.0, 0.0),
            rotation: Quaterniond::look_rotation(-DVec3::X, DVec3::Z),
        };
        let hit = globe.cast(&view, globe.viewport.center()).unwrap();
        assert_vec_close(hit, DVec3::new(R, 0.0, 0.0), 1e-6);
    }

    #[test]
    fn ray_away_from_globe_misses() {
        let globe = SphericalGlobe::default();
        let view = CameraView {
            position: DVec3::new(R + 1.0e6, 0.0, 0.0),
            rotation: Quaterniond::look_rotation(DVec3::X, DVec3::Z),
        };
        assert!(globe.cast(&view, globe.viewport.center()).is_none());
    }

    #[test]
    fn screen_edges_follow_fov() {
        let viewport = Viewport::default();
        let top = viewport.local_ray(DVec2::new(640.0, 720.0));
        let angle = top.y.atan2(-top.z).to_degrees();
        assert!((angle - 30.0).abs() < 1e-9);
        let right = viewport.local_ray(DVec2::new(1280.0, 360.0));
        assert!(right.x > 0.0);
    }

    #[test]
    fn cast_toward_center_measures_height() {
        let globe = SphericalGlobe::default();
        let above = DVec3::new(0.0, R + 10.0, 0.0);
        let below = DVec3::new(0.0, R - 10.0, 0.0);
        assert_eq!(globe.cast_toward_center(above), Some(10.0));
        assert_eq!(globe.cast_toward_center(below), None);
    }
}
