//! Angle helpers for `DVec3`.

use glam::DVec3;

/// Unsigned angle in degrees between two vectors, in `[0, 180]`.
///
/// Returns 0 when either vector has zero length.
#[must_use]
pub fn angle_between(from: DVec3, to: DVec3) -> f64 {
    if from.length_squared() == 0.0 || to.length_squared() == 0.0 {
        return 0.0;
    }
    from.cross(to).length().atan2(from.dot(to)).to_degrees()
}

/// Angle in degrees from `from` to `to`, negative when the rotation runs
/// clockwise when viewed from the tip of `axis`.
#[must_use]
pub fn signed_angle(from: DVec3, to: DVec3, axis: DVec3) -> f64 {
    let angle = angle_between(from, to);
    if from.cross(to).dot(axis) < 0.0 {
        -angle
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_angle() {
        assert!((angle_between(DVec3::X, DVec3::Y) - 90.0).abs() < 1e-12);
        assert!((angle_between(DVec3::X, -DVec3::X) - 180.0).abs() < 1e-12);
        assert_eq!(angle_between(DVec3::X, DVec3::X * 4.0), 0.0);
    }

    #[test]
    fn zero_vectors_give_zero() {
        assert_eq!(angle_between(DVec3::ZERO, DVec3::Y), 0.0);
        assert_eq!(signed_angle(DVec3::X, DVec3::ZERO, DVec3::Z), 0.0);
    }

    #[test]
    fn sign_follows_axis() {
        let up = signed_angle(DVec3::X, DVec3::Y, DVec3::Z);
        let down = signed_angle(DVec3::X, DVec3::Y, -DVec3::Z);
        assert!((up - 90.0).abs() < 1e-12);
        assert!((down + 90.0).abs() < 1e-12);
    }

    #[test]
    fn tiny_angles_stay_accurate() {
        let to = DVec3::new(1.0, 1e-9, 0.0);
        let expected = 1e-9_f64.atan().to_degrees();
        assert!((angle_between(DVec3::X, to) - expected).abs() < 1e-18);
    }
}
