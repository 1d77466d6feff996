//! Navigation options with TOML preset support.
//!
//! Every tunable of the gestures, the ground clamp and the clip planes is
//! consolidated here. Options serialize to/from TOML so hosts can ship
//! presets, and [`NavigationOptions::json_schema`] describes the
//! UI-exposed subset.

mod clipping;
mod ground;

use std::path::Path;

pub use clipping::ClippingOptions;
pub use ground::GroundOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::actions::{
    ActionKind, CameraAction, OrbitAction, PanAction, ZoomAction,
};
use crate::error::NavError;
use crate::input::MOUSE_BUTTON_COUNT;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[zoom]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct NavigationOptions {
    /// Gesture priority, earliest first. Kinds not listed are disabled.
    #[schemars(skip)]
    pub action_order: Vec<ActionKind>,
    /// Orbit gesture.
    pub orbit: OrbitAction,
    /// Pan gesture.
    pub pan: PanAction,
    /// Zoom gesture.
    pub zoom: ZoomAction,
    /// Ground clamp.
    pub ground: GroundOptions,
    /// Clip plane scaling.
    pub clipping: ClippingOptions,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            action_order: vec![
                ActionKind::Orbit,
                ActionKind::Pan,
                ActionKind::Zoom,
            ],
            orbit: OrbitAction::default(),
            pan: PanAction::default(),
            zoom: ZoomAction::default(),
            ground: GroundOptions::default(),
            clipping: ClippingOptions::default(),
        }
    }
}

impl NavigationOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(NavigationOptions)
    }

    /// Parse options from a TOML string and validate them. Missing fields
    /// use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, NavError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| NavError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(NavError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::debug!("Loaded navigation options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), NavError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NavError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(NavError::Io)?;
        }
        std::fs::write(path, content).map_err(NavError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "toml") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        names
    }

    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<(), NavError> {
        let fail = |msg: String| {
            log::warn!("rejected navigation options: {msg}");
            Err(NavError::InvalidOptions(msg))
        };

        if self.action_order.is_empty() {
            return fail("action_order is empty".to_owned());
        }
        let buttons = [
            ("orbit", self.orbit.mouse_button),
            ("pan", self.pan.mouse_button),
        ];
        for (name, button) in buttons {
            if button >= MOUSE_BUTTON_COUNT {
                return fail(format!(
                    "{name}.mouse_button {button} is not 0, 1 or 2"
                ));
            }
        }
        let zoom = &self.zoom;
        let band_ok = zoom.min_elevation >= 0.0
            && zoom.min_elevation < zoom.max_elevation;
        if !band_ok {
            return fail(format!(
                "zoom.min_elevation ({}) must be non-negative and below \
                 zoom.max_elevation ({})",
                zoom.min_elevation, zoom.max_elevation
            ));
        }
        let step_ok = zoom.step_fraction > 0.0 && zoom.step_fraction <= 1.0;
        if !step_ok {
            return fail(format!(
                "zoom.step_fraction ({}) must be in (0, 1]",
                zoom.step_fraction
            ));
        }
        if self.orbit.inertia_coefficient < 0.0
            || self.pan.inertia_coefficient < 0.0
        {
            return fail("inertia coefficients must be non-negative".to_owned());
        }
        let clip = &self.clipping;
        if clip.near_min > clip.near_max || clip.far_min > clip.far_max {
            let msg = "clipping minimums must not exceed maximums";
            return fail(msg.to_owned());
        }
        Ok(())
    }

    /// Build the gesture registry in `action_order`. Repeated kinds keep
    /// their first position.
    #[must_use]
    pub fn build_actions(&self) -> Vec<CameraAction> {
        let mut actions: Vec<CameraAction> =
            Vec::with_capacity(self.action_order.len());
        for &kind in &self.action_order {
            if actions.iter().any(|a| a.kind() == kind) {
                log::warn!("duplicate {} in action_order ignored", kind.name());
                continue;
            }
            actions.push(match kind {
                ActionKind::Orbit => CameraAction::Orbit(self.orbit.clone()),
                ActionKind::Pan => CameraAction::Pan(self.pan.clone()),
                ActionKind::Zoom => CameraAction::Zoom(self.zoom.clone()),
            });
        }
        actions
    }
}
