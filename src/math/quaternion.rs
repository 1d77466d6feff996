//! Double-precision quaternion.
//!
//! Single-precision rotations drift by meters at planetary distances, so all
//! globe-relative camera math goes through [`Quaterniond`]. Angles in the
//! public API are degrees; trigonometry runs in radians internally.
//!
//! Axis conventions are right-handed with camera-local +X right, +Y up and
//! −Z forward, the same convention as `glam::DMat4::look_to_rh`.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Index, IndexMut, Mul, Neg};

use glam::{DMat3, DQuat, DVec3, Quat};
use serde::{Deserialize, Serialize};

/// Dot products above this are treated as parallel by slerp, which then
/// falls back to normalized lerp instead of dividing by a vanishing sine.
const SLERP_PARALLEL_DOT: f64 = 1.0 - 1e-10;

/// Unit quaternion `x·i + y·j + z·k + w` with `f64` components.
///
/// Equality is exact field-wise comparison with no epsilon, so two
/// rotations computed along different paths rarely compare equal. Use
/// [`Quaterniond::abs_diff_eq`] or [`Quaterniond::angle`] when comparing
/// computed rotations.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct Quaterniond {
    /// Vector part, i component.
    pub x: f64,
    /// Vector part, j component.
    pub y: f64,
    /// Vector part, k component.
    pub z: f64,
    /// Scalar part.
    pub w: f64,
}

impl Default for Quaterniond {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaterniond {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a quaternion from raw components. Does not normalize.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Component by index (0..=3 → x, y, z, w).
    #[must_use]
    pub fn get(self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            3 => Some(self.w),
            _ => None,
        }
    }

    /// Four-dimensional dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    /// Euclidean norm of the four components.
    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rescale to unit length. A zero quaternion becomes the identity.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            return Self::IDENTITY;
        }
        Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Inverse of a unit quaternion (its conjugate).
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotation of `angle_degrees` around `axis` (right-hand rule).
    ///
    /// The axis is normalized; a zero axis yields the identity.
    #[must_use]
    pub fn angle_axis(angle_degrees: f64, axis: DVec3) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle_degrees.to_radians() * 0.5;
        let (s, c) = half.sin_cos();
        Self::new(s * axis.x, s * axis.y, s * axis.z, c)
    }

    /// Decompose into `(angle_degrees, axis)`.
    ///
    /// A zero rotation returns axis `(1, 0, 0)`.
    #[must_use]
    pub fn to_angle_axis(self) -> (f64, DVec3) {
        let angle = 2.0 * self.w.clamp(-1.0, 1.0).acos();
        let v = DVec3::new(self.x, self.y, self.z);
        let len = v.length();
        if angle == 0.0 || len <= f64::EPSILON {
            return (0.0, DVec3::X);
        }
        (angle.to_degrees(), v / len)
    }

    /// Angle in degrees between two rotations.
    ///
    /// The dot product is clamped before `acos`, so nearly identical
    /// rotations yield 0 rather than NaN.
    #[must_use]
    pub fn angle(a: Self, b: Self) -> f64 {
        let dot = a.dot(b).abs().min(1.0);
        (dot.acos() * 2.0).to_degrees()
    }

    /// Normalized linear interpolation with `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::lerp_unclamped(a, b, t.clamp(0.0, 1.0))
    }

    /// Normalized linear interpolation along the shorter arc.
    #[must_use]
    pub fn lerp_unclamped(a: Self, b: Self, t: f64) -> Self {
        let b = if a.dot(b) < 0.0 { -b } else { b };
        Self::new(
            a.x + t * (b.x - a.x),
            a.y + t * (b.y - a.y),
            a.z + t * (b.z - a.z),
            a.w + t * (b.w - a.w),
        )
        .normalize()
    }

    /// Spherical interpolation with `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn slerp(a: Self, b: Self, t: f64) -> Self {
        Self::slerp_unclamped(a, b, t.clamp(0.0, 1.0))
    }

    /// Spherical interpolation along the shorter arc.
    #[must_use]
    pub fn slerp_unclamped(a: Self, b: Self, t: f64) -> Self {
        let mut dot = a.dot(b);
        let mut b = b;
        if dot < 0.0 {
            dot = -dot;
            b = -b;
        }

        if dot < SLERP_PARALLEL_DOT {
            let angle = dot.acos();
            let inv_sin = 1.0 / angle.sin();
            let wa = (angle * (1.0 - t)).sin() * inv_sin;
            let wb = (angle * t).sin() * inv_sin;
            Self::new(
                a.x * wa + b.x * wb,
                a.y * wa + b.y * wb,
                a.z * wa + b.z * wb,
                a.w * wa + b.w * wb,
            )
        } else {
            Self::lerp_unclamped(a, b, t)
        }
    }

    /// Step from `from` toward `to` by at most `max_degrees_delta`.
    #[must_use]
    pub fn rotate_towards(
        from: Self,
        to: Self,
        max_degrees_delta: f64,
    ) -> Self {
        let angle = Self::angle(from, to);
        if angle == 0.0 {
            return to;
        }
        let t = (max_degrees_delta / angle).min(1.0);
        Self::slerp_unclamped(from, to, t)
    }

    /// Rotation whose forward axis (−Z) points along `forward` and whose up
    /// axis (+Y) lies in the plane of `forward` and `up`.
    ///
    /// A zero `forward` yields the identity; an `up` parallel to `forward`
    /// is replaced by an arbitrary perpendicular.
    #[must_use]
    pub fn look_rotation(forward: DVec3, up: DVec3) -> Self {
        let forward = forward.normalize_or_zero();
        if forward == DVec3::ZERO {
            return Self::IDENTITY;
        }
        let mut right = forward.cross(up).normalize_or_zero();
        if right == DVec3::ZERO {
            right = forward.cross(forward.any_orthonormal_vector()).normalize();
        }
        let up = right.cross(forward);
        Self::from_rotation_axes(right, up, -forward)
    }

    /// Quaternion from an orthonormal basis given as the images of the
    /// local X, Y and Z axes.
    #[must_use]
    pub fn from_rotation_axes(
        x_axis: DVec3,
        y_axis: DVec3,
        z_axis: DVec3,
    ) -> Self {
        // Row-major copy: m[row][col].
        let m = DMat3::from_cols(x_axis, y_axis, z_axis)
            .transpose()
            .to_cols_array_2d();
        let trace = m[0][0] + m[1][1] + m[2][2];

        let mut q = Self::IDENTITY;
        if trace > 0.0 {
            let mut root = (trace + 1.0).sqrt();
            q.w = 0.5 * root;
            root = 0.5 / root;
            q.x = (m[2][1] - m[1][2]) * root;
            q.y = (m[0][2] - m[2][0]) * root;
            q.z = (m[1][0] - m[0][1]) * root;
        } else {
            const NEXT: [usize; 3] = [1, 2, 0];
            let mut i = 0;
            if m[1][1] > m[0][0] {
                i = 1;
            }
            if m[2][2] > m[i][i] {
                i = 2;
            }
            let j = NEXT[i];
            let k = NEXT[j];

            let mut root = (m[i][i] - m[j][j] - m[k][k] + 1.0).sqrt();
            q[i] = 0.5 * root;
            root = 0.5 / root;
            q.w = (m[k][j] - m[j][k]) * root;
            q[j] = (m[j][i] + m[i][j]) * root;
            q[k] = (m[k][i] + m[i][k]) * root;
        }
        q.normalize()
    }

    /// Rotation matrix whose columns are the rotated X, Y and Z axes.
    #[must_use]
    pub fn to_rotation_matrix(self) -> DMat3 {
        DMat3::from_cols(self * DVec3::X, self * DVec3::Y, self * DVec3::Z)
    }

    /// Rotation from Euler angles in degrees: roll around Z first, then
    /// pitch around X, then yaw around Y.
    #[must_use]
    pub fn from_euler_degrees(x: f64, y: f64, z: f64) -> Self {
        let (sx, cx) = (x.to_radians() * 0.5).sin_cos();
        let (sy, cy) = (y.to_radians() * 0.5).sin_cos();
        let (sz, cz) = (z.to_radians() * 0.5).sin_cos();

        let qx = Self::new(sx, 0.0, 0.0, cx);
        let qy = Self::new(0.0, sy, 0.0, cy);
        let qz = Self::new(0.0, 0.0, sz, cz);

        (qy * qx) * qz
    }

    /// Euler angles in degrees, each wrapped into `[0, 360)`.
    ///
    /// Inverse of [`Quaterniond::from_euler_degrees`]. When the pitch reaches
    /// ±90° the roll is folded into the yaw and reported as 0.
    #[must_use]
    pub fn to_euler_degrees(self) -> DVec3 {
        let m = self.to_rotation_matrix();
        // m.col(c)[r] is the element at row r, column c.
        let m12 = m.z_axis.y;

        let mut v = if m12 < 1.0 {
            if m12 > -1.0 {
                DVec3::new(
                    (-m12).asin(),
                    m.z_axis.x.atan2(m.z_axis.z),
                    m.x_axis.y.atan2(m.y_axis.y),
                )
            } else {
                DVec3::new(PI * 0.5, m.y_axis.x.atan2(m.x_axis.x), 0.0)
            }
        } else {
            DVec3::new(-PI * 0.5, (-m.y_axis.x).atan2(m.x_axis.x), 0.0)
        };

        for angle in [&mut v.x, &mut v.y, &mut v.z] {
            if *angle < 0.0 {
                *angle += TAU;
            } else if *angle >= TAU {
                *angle -= TAU;
            }
        }

        DVec3::new(v.x.to_degrees(), v.y.to_degrees(), v.z.to_degrees())
    }

    /// Camera-local right axis (+X) after rotation.
    #[must_use]
    pub fn right(self) -> DVec3 {
        self * DVec3::X
    }

    /// Camera-local up axis (+Y) after rotation.
    #[must_use]
    pub fn up(self) -> DVec3 {
        self * DVec3::Y
    }

    /// Camera-local forward axis (−Z) after rotation.
    #[must_use]
    pub fn forward(self) -> DVec3 {
        self * DVec3::NEG_Z
    }

    /// Component-wise comparison within `max_abs_diff`.
    #[must_use]
    pub fn abs_diff_eq(self, other: Self, max_abs_diff: f64) -> bool {
        (self.x - other.x).abs() <= max_abs_diff
            && (self.y - other.y).abs() <= max_abs_diff
            && (self.z - other.z).abs() <= max_abs_diff
            && (self.w - other.w).abs() <= max_abs_diff
    }

    /// Lossy conversion for single-precision render code.
    #[must_use]
    pub fn as_quat(self) -> Quat {
        Quat::from_xyzw(
            self.x as f32,
            self.y as f32,
            self.z as f32,
            self.w as f32,
        )
    }
}

impl Mul for Quaterniond {
    type Output = Self;

    /// Hamilton product: `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<DVec3> for Quaterniond {
    type Output = DVec3;

    fn mul(self, point: DVec3) -> DVec3 {
        let x2 = self.x * 2.0;
        let y2 = self.y * 2.0;
        let z2 = self.z * 2.0;
        let xx = self.x * x2;
        let yy = self.y * y2;
        let zz = self.z * z2;
        let xy = self.x * y2;
        let xz = self.x * z2;
        let yz = self.y * z2;
        let wx = self.w * x2;
        let wy = self.w * y2;
        let wz = self.w * z2;

        let (x, y, z) = (point.x, point.y, point.z);
        DVec3::new(
            (1.0 - (yy + zz)) * x + (xy - wz) * y + (xz + wy) * z,
            (xy + wz) * x + (1.0 - (xx + zz)) * y + (yz - wx) * z,
            (xz - wy) * x + (yz + wx) * y + (1.0 - (xx + yy)) * z,
        )
    }
}

impl Neg for Quaterniond {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Index<usize> for Quaterniond {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `index > 3`; an out-of-range component is a programming
    /// error.
    #[allow(clippy::panic)]
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Quaterniond index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Quaterniond {
    #[allow(clippy::panic)]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Quaterniond index out of range: {index}"),
        }
    }
}

impl fmt::Display for Quaterniond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl From<DQuat> for Quaterniond {
    fn from(q: DQuat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaterniond> for DQuat {
    fn from(q: Quaterniond) -> Self {
        Self::from_xyzw(q.x, q.y, q.z, q.w)
    }
}
