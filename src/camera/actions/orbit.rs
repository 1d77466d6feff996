use glam::{DVec2, DVec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ActionKind, GestureAction, InterruptPolicy};
use crate::camera::context::CameraContext;
use crate::input::Pointer;
use crate::math::Quaterniond;

/// Rotate the camera around the surface point under the cursor.
///
/// Horizontal drag spins around the local vertical at the pivot, vertical
/// drag tilts around the camera's right axis. After release the last drag
/// delta keeps rotating the camera and decays to rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit", inline)]
#[serde(default)]
pub struct OrbitAction {
    /// Mouse button index that starts an orbit (0 left, 1 right, 2 middle).
    #[schemars(title = "Mouse Button", range(min = 0, max = 2))]
    pub mouse_button: usize,
    /// Degrees of spin per horizontal pixel.
    #[schemars(
        title = "Yaw Sensitivity",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub yaw_sensitivity: f64,
    /// Degrees of tilt per vertical pixel.
    #[schemars(
        title = "Pitch Sensitivity",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub pitch_sensitivity: f64,
    /// Inertia decay rate per second.
    #[schemars(
        title = "Inertia Decay",
        range(min = 0.5, max = 50.0),
        extend("step" = 0.5)
    )]
    pub inertia_coefficient: f64,
    /// Squared pixel delta below which inertia stops.
    #[schemars(skip)]
    pub inertia_threshold: f64,
    /// Gestures allowed to interrupt an orbit.
    #[schemars(skip)]
    pub interrupt: InterruptPolicy,
}

impl Default for OrbitAction {
    fn default() -> Self {
        Self {
            mouse_button: 2,
            yaw_sensitivity: 0.1,
            pitch_sensitivity: 0.1,
            inertia_coefficient: 10.0,
            inertia_threshold: 1.0,
            interrupt: InterruptPolicy::Any,
        }
    }
}

/// Per-activation orbit state.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    /// Whether the starting press is still held.
    pub dragging: bool,
    /// Surface point under the press, or `None` when the cast missed.
    pub pivot: Option<DVec3>,
    /// Screen delta applied on the most recent frame.
    pub last_delta: DVec2,
}

impl OrbitAction {
    fn apply(
        &self,
        delta: DVec2,
        pivot: DVec3,
        ctx: &mut CameraContext<'_, '_>,
    ) {
        let right = ctx.camera.axes().right;
        let axis = pivot.normalize_or_zero() * (delta.x * self.yaw_sensitivity)
            + right * (-delta.y * self.pitch_sensitivity);
        let angle = axis.length();
        if angle <= f64::EPSILON {
            return;
        }
        log::trace!("orbit {angle:.4} deg around {pivot}");
        ctx.camera
            .rotate_around_pivot(Quaterniond::angle_axis(angle, axis), pivot);
    }
}

impl GestureAction for OrbitAction {
    type State = OrbitState;

    fn is_triggered(&self, ctx: &CameraContext<'_, '_>) -> bool {
        ctx.input.mouse.can_use(self.mouse_button)
    }

    fn can_be_interrupted_by(&self, kind: ActionKind) -> bool {
        self.interrupt.permits(kind)
    }

    fn begin(&self, ctx: &mut CameraContext<'_, '_>) -> OrbitState {
        ctx.input.mouse.claim(self.mouse_button);
        let pivot = ctx.cast(ctx.input.mouse.begin_position());
        if pivot.is_none() {
            log::debug!("orbit press missed the globe; waiting for release");
        }
        OrbitState {
            dragging: true,
            pivot,
            last_delta: DVec2::ZERO,
        }
    }

    fn update(
        &self,
        state: &mut OrbitState,
        ctx: &mut CameraContext<'_, '_>,
    ) -> bool {
        let mouse = &ctx.input.mouse;
        state.dragging &=
            mouse.is_active() && mouse.button() == self.mouse_button;

        let Some(pivot) = state.pivot else {
            return !state.dragging;
        };

        if state.dragging {
            let delta = mouse.delta();
            self.apply(delta, pivot, ctx);
            state.last_delta = delta;
            return false;
        }

        let t = (ctx.delta_time * self.inertia_coefficient).clamp(0.0, 1.0);
        state.last_delta = state.last_delta.lerp(DVec2::ZERO, t);
        if state.last_delta.length_squared() < self.inertia_threshold {
            return true;
        }
        self.apply(state.last_delta, pivot, ctx);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::testing::Rig;
    use crate::input::InputFrame;

    #[test]
    fn missed_press_stays_inert_until_release() {
        let action = OrbitAction::default();
        // Camera looking away from the globe.
        let mut rig = Rig::new(1.0e6, 90.0);
        let before = rig.pose;

        let press = InputFrame::default().at(640.0, 360.0).press(2);
        let mut state = rig.with_context(&press, 0.016, |ctx| {
            assert!(action.is_triggered(ctx));
            action.begin(ctx)
        });
        assert!(state.pivot.is_none());

        let drag = InputFrame::default().at(700.0, 300.0).hold(2);
        let done = rig.with_context(&drag, 0.016, |ctx| {
            action.update(&mut state, ctx)
        });
        assert!(!done);
        assert_eq!(rig.pose, before);

        let release = InputFrame::default().release(2);
        let done = rig.with_context(&release, 0.016, |ctx| {
            action.update(&mut state, ctx)
        });
        assert!(done);
    }

    #[test]
    fn begin_claims_the_button() {
        let action = OrbitAction::default();
        let mut rig = Rig::new(1.0e6, -90.0);
        let press = InputFrame::default().at(640.0, 360.0).press(2);
        let _ = rig.with_context(&press, 0.016, |ctx| {
            let state = action.begin(ctx);
            assert!(!action.is_triggered(ctx));
            state
        });
        assert!(rig.input.mouse.is_claimed());
    }
}
