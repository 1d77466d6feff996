use glam::{DVec2, DVec3};

use super::{CameraView, RayCaster};

/// Where a screen-position gesture points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeAim {
    /// Unit direction from the camera.
    pub direction: DVec3,
    /// Surface hit under the pointer, when the ray hit the globe.
    pub hit: Option<DVec3>,
}

/// Aim from the camera toward the surface under `screen`, or toward the
/// globe center when the ray misses.
#[must_use]
pub fn aim_at_hit_or_center(
    ray_caster: &dyn RayCaster,
    view: &CameraView,
    screen: DVec2,
) -> GlobeAim {
    let hit = ray_caster.cast(view, screen);
    let target = hit.unwrap_or(DVec3::ZERO);
    let mut direction = (target - view.position).normalize_or_zero();
    if direction == DVec3::ZERO {
        direction = view.forward();
    }
    GlobeAim { direction, hit }
}

/// Height of `position` above the surface along the line to the globe
/// center, or `fallback` when the cast misses.
#[must_use]
pub fn height_above_surface(
    ray_caster: &dyn RayCaster,
    position: DVec3,
    fallback: f64,
) -> f64 {
    ray_caster.cast_toward_center(position).unwrap_or(fallback)
}
