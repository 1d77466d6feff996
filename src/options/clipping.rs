use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Clipping", inline)]
#[serde(default)]
/// Altitude-scaled near/far clip planes.
///
/// Both planes grow linearly with height up to `altitude_max`, clamped to
/// their ranges.
pub struct ClippingOptions {
    /// Compute clip planes at all.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Near plane at ground level.
    #[schemars(title = "Near Min", range(min = 0.01, max = 100.0))]
    pub near_min: f64,
    /// Near plane at `altitude_max`.
    #[schemars(title = "Near Max", range(min = 1.0, max = 100000.0))]
    pub near_max: f64,
    /// Far plane at ground level.
    #[schemars(title = "Far Min", range(min = 1000.0, max = 1.0e8))]
    pub far_min: f64,
    /// Far plane at `altitude_max`.
    #[schemars(title = "Far Max", range(min = 1.0e6, max = 1.0e12))]
    pub far_max: f64,
    /// Height at which both planes reach their maximum.
    #[schemars(skip)]
    pub altitude_max: f64,
}

impl Default for ClippingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            near_min: 1.0,
            near_max: 1000.0,
            far_min: 1.0e5,
            far_max: 1.0e9,
            altitude_max: 3.0e7,
        }
    }
}
