//! Globe-relative camera math.
//!
//! [`GlobeCamera`] is a short-lived view over the host's [`GlobeAnchor`]. All
//! operations work in globe-fixed coordinates and write back an
//! east-up-north relative orientation, so the stored pose stays meaningful
//! as the camera travels around the globe.

use glam::DVec3;

use crate::globe::{CameraView, Georeference, GlobeAnchor};
use crate::math::{angle_between, Quaterniond};

/// `|right · outward|` above this counts as camera roll.
const ROLL_TOLERANCE: f64 = 0.01;
/// `|forward · outward|` at or above this is too close to straight up or
/// down for the roll correction to pick a stable up vector.
const STEEP_VIEW_LIMIT: f64 = 0.9;

/// Camera basis vectors in globe-fixed coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAxes {
    /// Local +X.
    pub right: DVec3,
    /// Local +Y.
    pub up: DVec3,
    /// Local −Z.
    pub forward: DVec3,
}

/// Mutable camera view over an anchor and its georeference.
pub struct GlobeCamera<'a, 'g> {
    anchor: &'a mut (dyn GlobeAnchor + 'g),
    georeference: &'a dyn Georeference,
}

impl<'a, 'g> GlobeCamera<'a, 'g> {
    /// Wrap an anchor.
    pub fn new(
        anchor: &'a mut (dyn GlobeAnchor + 'g),
        georeference: &'a dyn Georeference,
    ) -> Self {
        Self {
            anchor,
            georeference,
        }
    }

    /// Globe-fixed position.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.anchor.position_globe_fixed()
    }

    /// Height reported by the anchor.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.anchor.height()
    }

    /// Globe-fixed orientation.
    #[must_use]
    pub fn rotation(&self) -> Quaterniond {
        self.georeference
            .east_up_north_to_globe_fixed(self.position())
            * self.anchor.rotation_east_up_north()
    }

    /// Position and orientation for ray casts.
    #[must_use]
    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position(),
            rotation: self.rotation(),
        }
    }

    /// Globe-fixed camera axes.
    #[must_use]
    pub fn axes(&self) -> CameraAxes {
        let rotation = self.rotation();
        CameraAxes {
            right: rotation.right(),
            up: rotation.up(),
            forward: rotation.forward(),
        }
    }

    /// Move the camera, keeping its globe-fixed orientation.
    pub fn set_position(&mut self, position: DVec3) {
        let world = self.rotation();
        self.anchor.set_position_globe_fixed(position);
        self.store_rotation(world);
    }

    /// Move the camera by `offset`, keeping its globe-fixed orientation.
    pub fn translate(&mut self, offset: DVec3) {
        self.set_position(self.position() + offset);
    }

    /// Rotate position and orientation around the globe center.
    pub fn rotate_around_globe_center(&mut self, rotation: Quaterniond) {
        self.rotate_around_pivot(rotation, DVec3::ZERO);
    }

    /// Rotate position and orientation around `pivot`.
    pub fn rotate_around_pivot(&mut self, rotation: Quaterniond, pivot: DVec3) {
        let world = self.rotation();
        let offset = self.position() - pivot;
        self.anchor
            .set_position_globe_fixed(pivot + rotation * offset);
        self.set_rotation(rotation * world);
    }

    /// Rotate the orientation in place (globe-fixed `rotation` applied
    /// after the current orientation).
    pub fn rotate(&mut self, rotation: Quaterniond) {
        self.set_rotation(rotation * self.rotation());
    }

    /// Set the globe-fixed orientation, removing roll relative to the local
    /// vertical unless the view is too steep to define it.
    pub fn set_rotation(&mut self, rotation: Quaterniond) {
        let outward = self.position().normalize_or_zero();
        let right = rotation.right();
        let forward = rotation.forward();

        let rotation = if right.dot(outward).abs() > ROLL_TOLERANCE
            && forward.dot(outward).abs() < STEEP_VIEW_LIMIT
        {
            let up = forward.cross(outward).cross(forward);
            Quaterniond::look_rotation(forward, up)
        } else {
            rotation
        };
        self.store_rotation(rotation);
    }

    fn store_rotation(&mut self, world: Quaterniond) {
        let frame = self
            .georeference
            .east_up_north_to_globe_fixed(self.position());
        self.anchor
            .set_rotation_east_up_north((frame.inverse() * world).normalize());
    }

    /// Pitch the camera down toward the globe center by up to `speed`
    /// degrees once it is at or above `start_elevation`.
    ///
    /// The angle between camera up and the direction to the globe center
    /// shrinks toward 90° (looking at the center) and never overshoots it.
    /// `lerp` scales the applied step. Returns whether a rotation was
    /// applied.
    pub fn recenter_camera_rotation(
        &mut self,
        start_elevation: f64,
        speed: f64,
        lerp: f64,
    ) -> bool {
        if self.height() < start_elevation {
            return false;
        }
        let axes = self.axes();
        let to_center = -self.position();
        let angle = angle_between(axes.up, to_center);
        let max_pitch = (angle - 90.0).max(0.0);
        let pitch = speed.clamp(0.0, max_pitch);
        if pitch <= 0.0 {
            return false;
        }
        let rotation = Quaterniond::lerp(
            Quaterniond::IDENTITY,
            Quaterniond::angle_axis(-pitch, axes.right),
            lerp,
        );
        log::trace!("recenter pitch {pitch:.4} deg (up/center {angle:.4})");
        self.rotate(rotation);
        true
    }

    /// Push the camera out along the local vertical so that `height` (as
    /// measured by the caller) is at least `min_height`. Returns whether the
    /// camera moved.
    pub fn keep_above_ground(&mut self, height: f64, min_height: f64) -> bool {
        if height >= min_height {
            return false;
        }
        let outward = self.position().normalize_or_zero();
        if outward == DVec3::ZERO {
            return false;
        }
        self.translate(outward * (min_height - height));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::{AnchorPose, SphericalGlobe};

    fn setup(pitch: f64) -> (SphericalGlobe, AnchorPose) {
        let globe = SphericalGlobe::default();
        let pose =
            AnchorPose::from_geodetic(&globe, 10.0, 20.0, 1.0e6, 30.0, pitch);
        (globe, pose)
    }

    fn close(a: DVec3, b: DVec3, eps: f64) -> bool {
        (a - b).length() <= eps
    }

    #[test]
    fn set_position_keeps_world_rotation() {
        let (globe, mut pose) = setup(-45.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        let before = camera.rotation();
        camera.translate(DVec3::new(1.0e5, -2.0e5, 3.0e5));
        assert!(Quaterniond::angle(before, camera.rotation()) < 1e-7);
    }

    #[test]
    fn pivot_rotation_preserves_distance() {
        let (globe, mut pose) = setup(-90.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        let pivot = globe.geodetic_to_globe_fixed(10.0, 20.0, 0.0);
        let before = camera.position().distance(pivot);
        let q = Quaterniond::angle_axis(5.0, pivot.normalize());
        camera.rotate_around_pivot(q, pivot);
        assert!((camera.position().distance(pivot) - before).abs() < 1e-6);
    }

    #[test]
    fn globe_center_rotation_preserves_height() {
        let (globe, mut pose) = setup(-60.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        let h = camera.height();
        let spin = Quaterniond::angle_axis(3.0, DVec3::Z);
        camera.rotate_around_globe_center(spin);
        assert!((camera.height() - h).abs() < 1e-6);
    }

    #[test]
    fn set_rotation_removes_roll() {
        let (globe, mut pose) = setup(-20.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        let forward = camera.axes().forward;
        let rolled = Quaterniond::angle_axis(25.0, forward) * camera.rotation();
        camera.set_rotation(rolled);
        let outward = camera.position().normalize();
        assert!(camera.axes().right.dot(outward).abs() < 1e-9);
        assert!(close(camera.axes().forward, forward, 1e-9));
    }

    #[test]
    fn steep_views_keep_roll() {
        let (globe, mut pose) = setup(-90.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        let roll = Quaterniond::angle_axis(25.0, camera.axes().forward);
        let rolled = roll * camera.rotation();
        camera.set_rotation(rolled);
        assert!(Quaterniond::angle(camera.rotation(), rolled) < 1e-7);
    }

    #[test]
    fn recenter_moves_toward_center_without_overshoot() {
        let (globe, mut pose) = setup(0.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        let angle = |c: &GlobeCamera<'_, '_>| {
            angle_between(c.axes().up, -c.position())
        };

        let mut prev = angle(&camera);
        assert!((prev - 180.0).abs() < 1e-6);
        for _ in 0..200 {
            let _ = camera.recenter_camera_rotation(300_000.0, 2.0, 1.0);
            let now = angle(&camera);
            assert!(now <= prev + 1e-9);
            assert!(now >= 90.0 - 1e-6);
            prev = now;
        }
        assert!((prev - 90.0).abs() < 1e-6);
    }

    #[test]
    fn recenter_waits_for_altitude() {
        let (globe, mut pose) = setup(0.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        assert!(!camera.recenter_camera_rotation(2.0e6, 2.0, 1.0));
    }

    #[test]
    fn keep_above_ground_pushes_out() {
        let globe = SphericalGlobe::default();
        let mut pose =
            AnchorPose::from_geodetic(&globe, 0.0, 0.0, 3.0, 0.0, -90.0);
        let mut camera = GlobeCamera::new(&mut pose, &globe);
        assert!(camera.keep_above_ground(3.0, 10.0));
        assert!((camera.height() - 10.0).abs() < 1e-6);
        assert!(!camera.keep_above_ground(10.0, 10.0));
    }
}
