//! Logarithmic elevation mapping.
//!
//! Zoom feels uniform across six orders of magnitude of altitude when
//! each step moves a fixed amount in log space rather than in meters.

use serde::{Deserialize, Serialize};

/// Map `value` in `[min, max]` to `[0, 1]` on a log scale.
///
/// `value` is clamped to the range first. `max` must exceed `min`.
#[must_use]
pub fn log_normalize(value: f64, min: f64, max: f64) -> f64 {
    let v = value.clamp(min, max);
    (v - min + 1.0).ln() / (max - min + 1.0).ln()
}

/// Inverse of [`log_normalize`].
#[must_use]
pub fn exp_denormalize(normalized: f64, min: f64, max: f64) -> f64 {
    (max - min + 1.0).powf(normalized) + min - 1.0
}

/// An elevation band with log-scale stepping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationCurve {
    /// Lowest elevation in meters.
    pub min: f64,
    /// Highest elevation in meters.
    pub max: f64,
}

impl ElevationCurve {
    /// Create a curve over `[min, max]`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `elevation` along the curve, in `[0, 1]`.
    #[must_use]
    pub fn to_normalized(self, elevation: f64) -> f64 {
        log_normalize(elevation, self.min, self.max)
    }

    /// Elevation at normalized position `t`.
    #[must_use]
    pub fn to_elevation(self, t: f64) -> f64 {
        exp_denormalize(t, self.min, self.max)
    }

    /// Move `elevation` by `delta` in normalized space, saturating at the
    /// ends of the band.
    #[must_use]
    pub fn step(self, elevation: f64, delta: f64) -> f64 {
        let t = (self.to_normalized(elevation) + delta).clamp(0.0, 1.0);
        self.to_elevation(t).clamp(self.min, self.max)
    }
}
