use glam::{DVec2, DVec3};

use super::globe::GlobeCamera;
use crate::globe::RayCaster;
use crate::input::CameraInput;

/// Everything an action can read or mutate during one frame.
pub struct CameraContext<'a, 'g> {
    /// Pointer states, already resampled for this frame.
    pub input: &'a mut CameraInput,
    /// The camera being driven.
    pub camera: GlobeCamera<'a, 'g>,
    /// Surface queries.
    pub ray_caster: &'a dyn RayCaster,
    /// Seconds since the previous frame.
    pub delta_time: f64,
}

impl CameraContext<'_, '_> {
    /// Surface hit under `screen` from the camera's current pose.
    #[must_use]
    pub fn cast(&self, screen: DVec2) -> Option<DVec3> {
        self.ray_caster.cast(&self.camera.view(), screen)
    }
}
