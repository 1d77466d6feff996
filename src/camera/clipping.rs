use serde::{Deserialize, Serialize};

use crate::options::ClippingOptions;

/// Near and far clip distances for the renderer, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipPlanes {
    /// Near plane distance.
    pub near: f64,
    /// Far plane distance.
    pub far: f64,
}

impl ClipPlanes {
    /// Planes for a camera `height` meters above the surface, or `None`
    /// when clipping is disabled.
    #[must_use]
    pub fn for_height(options: &ClippingOptions, height: f64) -> Option<Self> {
        if !options.enabled {
            return None;
        }
        let ratio = if options.altitude_max > 0.0 {
            height.max(0.0) / options.altitude_max
        } else {
            1.0
        };
        Some(Self {
            near: (options.near_max * ratio)
                .clamp(options.near_min, options.near_max),
            far: (options.far_max * ratio)
                .clamp(options.far_min, options.far_max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_with_height() {
        let options = ClippingOptions::default();
        let low = ClipPlanes::for_height(&options, 100.0).unwrap();
        assert_eq!(low.near, 1.0);
        assert_eq!(low.far, 1.0e5);

        let mid = ClipPlanes::for_height(&options, 1.5e7).unwrap();
        assert!((mid.near - 500.0).abs() < 1e-9);
        assert!((mid.far - 5.0e8).abs() < 1e-3);

        let high = ClipPlanes::for_height(&options, 1.0e9).unwrap();
        assert_eq!(high.near, 1000.0);
        assert_eq!(high.far, 1.0e9);
    }

    #[test]
    fn disabled_gives_none() {
        let options = ClippingOptions {
            enabled: false,
            ..ClippingOptions::default()
        };
        assert!(ClipPlanes::for_height(&options, 1.0e6).is_none());
    }
}
