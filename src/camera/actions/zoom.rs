use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ActionKind, GestureAction, InterruptPolicy};
use crate::camera::context::CameraContext;
use crate::globe::{aim_at_hit_or_center, height_above_surface};
use crate::input::Pointer;
use crate::util::elevation_curve::ElevationCurve;

/// Scroll magnitude below which the wheel counts as idle.
const SCROLL_EPSILON: f64 = 1e-5;

/// Move toward the surface point under the cursor on scroll.
///
/// The target height is picked on a logarithmic curve between
/// `min_elevation` and `max_elevation`, so one wheel notch feels the same
/// at street level and from orbit. Each scroll tick moves at most
/// `step_fraction` of the current height.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Zoom", inline)]
#[serde(default)]
pub struct ZoomAction {
    /// Normalized curve distance per scroll unit.
    #[schemars(
        title = "Zoom Sensitivity",
        range(min = 0.005, max = 0.5),
        extend("step" = 0.005)
    )]
    pub zoom_sensitivity: f64,
    /// Largest move per tick, as a fraction of the current height.
    #[schemars(
        title = "Step Fraction",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub step_fraction: f64,
    /// Lowest zoom target in meters.
    #[schemars(title = "Min Elevation", range(min = 1.0, max = 10000.0))]
    pub min_elevation: f64,
    /// Highest zoom target in meters.
    #[schemars(title = "Max Elevation", range(min = 1000.0, max = 1.0e9))]
    pub max_elevation: f64,
    /// Tilt toward the globe center while zooming at altitude.
    #[schemars(title = "Recenter")]
    pub recenter: bool,
    /// Height at which recentering starts.
    #[schemars(title = "Recenter Elevation", range(min = 0.0, max = 1.0e8))]
    pub start_recenter_elevation: f64,
    /// Recenter degrees per tick.
    #[schemars(
        title = "Recenter Speed",
        range(min = 0.0, max = 45.0),
        extend("step" = 0.5)
    )]
    pub recenter_speed: f64,
    /// Fraction of the recenter step applied per tick.
    #[schemars(skip)]
    pub rotation_lerp: f64,
    /// Gestures allowed to interrupt a zoom.
    #[schemars(skip)]
    pub interrupt: InterruptPolicy,
}

impl Default for ZoomAction {
    fn default() -> Self {
        Self {
            zoom_sensitivity: 0.05,
            step_fraction: 0.2,
            min_elevation: 50.0,
            max_elevation: 3.0e7,
            recenter: true,
            start_recenter_elevation: 300_000.0,
            recenter_speed: 2.0,
            rotation_lerp: 1.0,
            interrupt: InterruptPolicy::Any,
        }
    }
}

/// Per-activation zoom state.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    /// Unit direction of travel toward the surface.
    pub direction: DVec3,
    /// Surface hit under the cursor, `None` when zooming toward the center.
    pub hit: Option<DVec3>,
    /// Height the zoom is heading for.
    pub target_elevation: f64,
}

impl ZoomAction {
    /// Height a `scroll` of wheel units should lead to from `height`.
    /// Positive scroll zooms in.
    #[must_use]
    pub fn target_elevation(&self, height: f64, scroll: f64) -> f64 {
        ElevationCurve::new(self.min_elevation, self.max_elevation)
            .step(height, -scroll * self.zoom_sensitivity)
    }

    fn surface_height(ctx: &CameraContext<'_, '_>) -> f64 {
        let camera = &ctx.camera;
        height_above_surface(ctx.ray_caster, camera.position(), camera.height())
    }
}

impl GestureAction for ZoomAction {
    type State = ZoomState;

    fn is_triggered(&self, ctx: &CameraContext<'_, '_>) -> bool {
        ctx.input.mouse.scroll().abs() > SCROLL_EPSILON
    }

    fn can_be_interrupted_by(&self, kind: ActionKind) -> bool {
        self.interrupt.permits(kind)
    }

    fn begin(&self, ctx: &mut CameraContext<'_, '_>) -> ZoomState {
        let aim = aim_at_hit_or_center(
            ctx.ray_caster,
            &ctx.camera.view(),
            ctx.input.mouse.position(),
        );
        let height = Self::surface_height(ctx);
        let target_elevation =
            self.target_elevation(height, ctx.input.mouse.scroll());
        log::trace!("zoom from {height:.1} m toward {target_elevation:.1} m");
        ZoomState {
            direction: aim.direction,
            hit: aim.hit,
            target_elevation,
        }
    }

    fn update(
        &self,
        state: &mut ZoomState,
        ctx: &mut CameraContext<'_, '_>,
    ) -> bool {
        let height = Self::surface_height(ctx);
        let remaining = state.target_elevation - height;
        let travel = remaining.abs().min(height.max(0.0) * self.step_fraction);
        // Moving along the aim lowers the camera; moving against it raises it.
        let sign = if remaining < 0.0 { 1.0 } else { -1.0 };
        ctx.camera.translate(state.direction * (travel * sign));

        if self.recenter {
            let _ = ctx.camera.recenter_camera_rotation(
                self.start_recenter_elevation,
                self.recenter_speed,
                self.rotation_lerp,
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::testing::Rig;
    use crate::globe::GlobeAnchor;
    use crate::input::InputFrame;

    #[test]
    fn target_is_monotonic_in_scroll() {
        let zoom = ZoomAction::default();
        let h = 1.0e6;
        let inward = zoom.target_elevation(h, 1.0);
        let outward = zoom.target_elevation(h, -1.0);
        assert!(inward < h && h < outward);
        assert!(zoom.target_elevation(h, 3.0) < inward);
    }

    #[test]
    fn target_saturates_at_bounds() {
        let zoom = ZoomAction::default();
        assert_eq!(zoom.target_elevation(60.0, 100.0), zoom.min_elevation);
        assert_eq!(zoom.target_elevation(2.0e7, -100.0), zoom.max_elevation);
    }

    #[test]
    fn one_tick_moves_a_bounded_step_toward_target() {
        let zoom = ZoomAction::default();
        let mut rig = Rig::new(1.0e6, -90.0);
        let frame = InputFrame::default().at(640.0, 360.0).scroll(1.0);
        let (state, done) = rig.with_context(&frame, 0.016, |ctx| {
            assert!(zoom.is_triggered(ctx));
            let mut state = zoom.begin(ctx);
            let done = zoom.update(&mut state, ctx);
            (state, done)
        });
        assert!(done);
        assert!(state.hit.is_some());
        assert!(state.target_elevation < 1.0e6);
        assert!(state.target_elevation >= zoom.min_elevation);
        assert!((rig.pose.height() - 800_000.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_out_raises_camera() {
        let zoom = ZoomAction::default();
        let mut rig = Rig::new(1.0e6, -90.0);
        let frame = InputFrame::default().at(640.0, 360.0).scroll(-1.0);
        rig.with_context(&frame, 0.016, |ctx| {
            let mut state = zoom.begin(ctx);
            assert!(zoom.update(&mut state, ctx));
        });
        assert!(rig.pose.height() > 1.0e6);
    }

    #[test]
    fn miss_aims_at_center() {
        let zoom = ZoomAction::default();
        let mut rig = Rig::new(1.0e6, 90.0);
        let frame = InputFrame::default().at(640.0, 360.0).scroll(1.0);
        let state = rig.with_context(&frame, 0.016, |ctx| zoom.begin(ctx));
        assert!(state.hit.is_none());
        let to_center = -rig.pose.position.normalize();
        assert!((state.direction - to_center).length() < 1e-9);
    }
}
