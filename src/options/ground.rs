use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ground", inline)]
#[serde(default)]
/// Keeps the camera from sinking below the surface.
pub struct GroundOptions {
    /// Push the camera back above ground after every frame.
    #[schemars(title = "Prevent Going Underground")]
    pub prevent_going_underground: bool,
    /// Smallest allowed height above the surface, in meters.
    #[schemars(
        title = "Min Distance to Ground",
        range(min = 0.0, max = 10000.0),
        extend("step" = 1.0)
    )]
    pub min_distance_to_ground: f64,
}

impl Default for GroundOptions {
    fn default() -> Self {
        Self {
            prevent_going_underground: true,
            min_distance_to_ground: 10.0,
        }
    }
}
