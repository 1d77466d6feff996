//! Shared fixtures for camera tests.

use super::context::CameraContext;
use super::globe::GlobeCamera;
use crate::globe::{AnchorPose, SphericalGlobe};
use crate::input::{CameraInput, InputSource};

/// A spherical Earth, a camera pose and the pointer states.
pub(crate) struct Rig {
    pub(crate) globe: SphericalGlobe,
    pub(crate) pose: AnchorPose,
    pub(crate) input: CameraInput,
}

impl Rig {
    /// Camera at `height` over lon 0, lat 0, heading north, with `pitch`
    /// degrees above the horizon (−90 looks straight down).
    pub(crate) fn new(height: f64, pitch: f64) -> Self {
        let globe = SphericalGlobe::default();
        let pose =
            AnchorPose::from_geodetic(&globe, 0.0, 0.0, height, 0.0, pitch);
        Self {
            globe,
            pose,
            input: CameraInput::new(),
        }
    }

    /// Resample input from `frame`, then run `f` against a fresh context.
    pub(crate) fn with_context<R>(
        &mut self,
        frame: &dyn InputSource,
        delta_time: f64,
        f: impl FnOnce(&mut CameraContext<'_, '_>) -> R,
    ) -> R {
        self.input.update(frame);
        let mut ctx = CameraContext {
            input: &mut self.input,
            camera: GlobeCamera::new(&mut self.pose, &self.globe),
            ray_caster: &self.globe,
            delta_time,
        };
        f(&mut ctx)
    }
}
