use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ActionKind, GestureAction, InterruptPolicy};
use crate::camera::context::CameraContext;
use crate::input::PointerType;
use crate::math::{signed_angle, Quaterniond};

/// Angular speed (degrees per second) below which pan inertia stops.
const INERTIA_STOP_SPEED: f64 = 0.01;

/// Drag the globe so the grabbed surface point stays under the pointer.
///
/// Works with the configured mouse button or a single finger. The camera
/// rotates around the globe center; nothing happens on frames where either
/// ray misses the surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pan", inline)]
#[serde(default)]
pub struct PanAction {
    /// Mouse button index that starts a pan.
    #[schemars(title = "Mouse Button", range(min = 0, max = 2))]
    pub mouse_button: usize,
    /// Keep rotating after release.
    #[schemars(title = "Inertia")]
    pub inertia_enabled: bool,
    /// Inertia decay rate per second.
    #[schemars(
        title = "Inertia Decay",
        range(min = 0.1, max = 20.0),
        extend("step" = 0.1)
    )]
    pub inertia_coefficient: f64,
    /// Cap on the release speed in degrees per second.
    #[schemars(skip)]
    pub max_angular_speed: f64,
    /// Gestures allowed to interrupt a pan.
    #[schemars(skip)]
    pub interrupt: InterruptPolicy,
}

impl Default for PanAction {
    fn default() -> Self {
        Self {
            mouse_button: 0,
            inertia_enabled: false,
            inertia_coefficient: 3.0,
            max_angular_speed: 1000.0,
            interrupt: InterruptPolicy::Any,
        }
    }
}

/// Per-activation pan state.
#[derive(Debug, Clone, PartialEq)]
pub struct PanState {
    /// Pointer that started the pan.
    pub pointer: PointerType,
    /// Surface point under the pointer when the pan began.
    pub anchor_point: Option<DVec3>,
    /// Whether the pointer has been released.
    pub released: bool,
    /// Rotation axis of the most recent drag step.
    pub axis: DVec3,
    /// Angular speed of the most recent drag step, degrees per second.
    pub angular_speed: f64,
}

impl PanAction {
    fn drag(&self, state: &mut PanState, ctx: &mut CameraContext<'_, '_>) {
        let pointer = ctx.input.pointer(state.pointer);
        let (current, last) = (pointer.position(), pointer.last_position());

        let (Some(last_hit), Some(current_hit)) =
            (ctx.cast(last), ctx.cast(current))
        else {
            state.angular_speed = 0.0;
            return;
        };
        let axis = last_hit.cross(current_hit);
        if axis.length_squared() <= f64::EPSILON {
            state.angular_speed = 0.0;
            return;
        }
        let angle = signed_angle(last_hit, current_hit, axis);
        ctx.camera
            .rotate_around_globe_center(Quaterniond::angle_axis(-angle, axis));

        state.axis = axis;
        state.angular_speed = if ctx.delta_time > 0.0 {
            (angle / ctx.delta_time).min(self.max_angular_speed)
        } else {
            0.0
        };
    }

    fn coast(
        &self,
        state: &mut PanState,
        ctx: &mut CameraContext<'_, '_>,
    ) -> bool {
        let t = (ctx.delta_time * self.inertia_coefficient).clamp(0.0, 1.0);
        state.angular_speed *= 1.0 - t;
        if state.angular_speed < INERTIA_STOP_SPEED {
            return true;
        }
        let angle = state.angular_speed * ctx.delta_time;
        let rotation = Quaterniond::angle_axis(-angle, state.axis);
        ctx.camera.rotate_around_globe_center(rotation);
        false
    }
}

impl GestureAction for PanAction {
    type State = PanState;

    fn is_triggered(&self, ctx: &CameraContext<'_, '_>) -> bool {
        ctx.input.mouse.can_use(self.mouse_button)
            || ctx.input.one_touch.can_use()
    }

    fn can_be_interrupted_by(&self, kind: ActionKind) -> bool {
        self.interrupt.permits(kind)
    }

    fn begin(&self, ctx: &mut CameraContext<'_, '_>) -> PanState {
        let pointer = if ctx.input.mouse.can_use(self.mouse_button) {
            PointerType::Mouse
        } else {
            PointerType::Touch
        };
        ctx.input.mouse.claim(self.mouse_button);
        ctx.input.one_touch.claim();

        let begin = ctx.input.pointer(pointer).begin_position();
        let anchor_point = ctx.cast(begin);
        PanState {
            pointer,
            anchor_point,
            released: false,
            axis: DVec3::ZERO,
            angular_speed: 0.0,
        }
    }

    fn update(
        &self,
        state: &mut PanState,
        ctx: &mut CameraContext<'_, '_>,
    ) -> bool {
        state.released |= !ctx.input.pointer(state.pointer).is_active();
        if state.released {
            return !self.inertia_enabled || self.coast(state, ctx);
        }
        self.drag(state, ctx);
        false
    }
}
