//! Per-frame entry point tying input, gestures and the camera together.

use super::actions::ActionKind;
use super::clipping::ClipPlanes;
use super::context::CameraContext;
use super::globe::GlobeCamera;
use super::machine::ActionMachine;
use crate::globe::{height_above_surface, Georeference, GlobeAnchor, RayCaster};
use crate::input::{CameraInput, InputSource};
use crate::options::NavigationOptions;

/// Gesture-driven globe camera controller.
///
/// # Usage
///
/// ```ignore
/// // Once per frame:
/// let frame = collector.finish_frame();
/// controller.update(&frame, &mut anchor, &georeference, &ray_caster, dt);
/// if let Some(clip) = controller.clip_planes(&anchor, &ray_caster) {
///     renderer.set_clip_planes(clip.near, clip.far);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GlobeCameraController {
    input: CameraInput,
    machine: ActionMachine,
    options: NavigationOptions,
}

impl Default for GlobeCameraController {
    fn default() -> Self {
        Self::new(NavigationOptions::default())
    }
}

impl GlobeCameraController {
    /// Create a controller with the gestures listed in `options`.
    #[must_use]
    pub fn new(options: NavigationOptions) -> Self {
        let machine = ActionMachine::new(options.build_actions());
        Self {
            input: CameraInput::new(),
            machine,
            options,
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    /// Replace the options. Any running gesture is dropped without `end`.
    pub fn set_options(&mut self, options: NavigationOptions) {
        if !self.machine.is_idle() {
            log::debug!("options replaced while a gesture was running");
        }
        self.machine = ActionMachine::new(options.build_actions());
        self.options = options;
    }

    /// Pointer states as of the last update.
    #[must_use]
    pub fn input(&self) -> &CameraInput {
        &self.input
    }

    /// The gesture state machine.
    #[must_use]
    pub fn machine(&self) -> &ActionMachine {
        &self.machine
    }

    /// Kind of the running gesture.
    #[must_use]
    pub fn current_action(&self) -> Option<ActionKind> {
        self.machine.current_kind()
    }

    /// Run one frame: resample input, step the gestures, then keep the
    /// camera above ground.
    pub fn update(
        &mut self,
        source: &dyn InputSource,
        anchor: &mut dyn GlobeAnchor,
        georeference: &dyn Georeference,
        ray_caster: &dyn RayCaster,
        delta_time: f64,
    ) {
        self.input.update(source);

        let mut ctx = CameraContext {
            input: &mut self.input,
            camera: GlobeCamera::new(anchor, georeference),
            ray_caster,
            delta_time,
        };
        self.machine.step(&mut ctx);

        let ground = &self.options.ground;
        if ground.prevent_going_underground {
            let camera = &mut ctx.camera;
            let height = height_above_surface(
                ray_caster,
                camera.position(),
                camera.height(),
            );
            let min = ground.min_distance_to_ground;
            if camera.keep_above_ground(height, min) {
                log::trace!("camera lifted to {min} m above ground");
            }
        }
    }

    /// End the running gesture, if any.
    pub fn cancel(
        &mut self,
        anchor: &mut dyn GlobeAnchor,
        georeference: &dyn Georeference,
        ray_caster: &dyn RayCaster,
    ) {
        let mut ctx = CameraContext {
            input: &mut self.input,
            camera: GlobeCamera::new(anchor, georeference),
            ray_caster,
            delta_time: 0.0,
        };
        self.machine.cancel(&mut ctx);
    }

    /// Clip planes for the anchor's current height, or `None` when
    /// clipping is disabled.
    #[must_use]
    pub fn clip_planes(
        &self,
        anchor: &dyn GlobeAnchor,
        ray_caster: &dyn RayCaster,
    ) -> Option<ClipPlanes> {
        let height = height_above_surface(
            ray_caster,
            anchor.position_globe_fixed(),
            anchor.height(),
        );
        ClipPlanes::for_height(&self.options.clipping, height)
    }
}
