//! Scripted input replay.
//!
//! A [`ReplayScript`] describes a spherical globe, a starting camera pose,
//! navigation options and a list of input frames. Running it drives a
//! [`GlobeCameraController`] without any platform and records the camera
//! after every frame, which makes gesture tuning reproducible.
//!
//! ```toml
//! [start]
//! height = 1000000.0
//! pitch = -90.0
//!
//! [[frames]]
//! events = [
//!     { type = "cursor_moved", x = 100.0, y = 100.0 },
//!     { type = "mouse_button", button = "middle", pressed = true },
//! ]
//!
//! [[frames]]
//! events = [{ type = "cursor_moved", x = 110.0, y = 100.0 }]
//! repeat = 10
//! ```

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::camera::actions::ActionKind;
use crate::camera::{ClipPlanes, GlobeCameraController};
use crate::error::NavError;
use crate::globe::{AnchorPose, GlobeAnchor, SphericalGlobe, Viewport};
use crate::input::{InputCollector, InputEvent};
use crate::math::Quaterniond;
use crate::options::NavigationOptions;

/// Initial camera pose in geodetic terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartPose {
    /// Degrees east.
    pub longitude: f64,
    /// Degrees north.
    pub latitude: f64,
    /// Meters above the sphere.
    pub height: f64,
    /// Degrees clockwise from north.
    pub heading: f64,
    /// Degrees above the horizon.
    pub pitch: f64,
}

impl Default for StartPose {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            height: 1.0e6,
            heading: 0.0,
            pitch: -90.0,
        }
    }
}

/// Input for one or more consecutive frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayFrame {
    /// Seconds per frame.
    pub delta_time: f64,
    /// Events delivered before the first repetition.
    pub events: Vec<InputEvent>,
    /// How many frames to run; held buttons stay held. Zero runs once.
    pub repeat: u32,
}

impl Default for ReplayFrame {
    fn default() -> Self {
        Self {
            delta_time: 1.0 / 60.0,
            events: Vec::new(),
            repeat: 1,
        }
    }
}

/// The camera after one replayed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// Zero-based frame number.
    pub frame: usize,
    /// Gesture running at the end of the frame.
    pub action: Option<ActionKind>,
    /// Globe-fixed position.
    pub position: DVec3,
    /// East-up-north orientation.
    pub rotation: Quaterniond,
    /// Height above the sphere.
    pub height: f64,
    /// Clip planes, when enabled.
    pub clip: Option<ClipPlanes>,
}

/// A complete replay: globe, start pose, options and input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    /// Sphere radius in meters.
    pub globe_radius: f64,
    /// Viewport for screen rays.
    pub viewport: Viewport,
    /// Initial pose.
    pub start: StartPose,
    /// Navigation options.
    pub options: NavigationOptions,
    /// Input frames in order.
    pub frames: Vec<ReplayFrame>,
}

impl Default for ReplayScript {
    fn default() -> Self {
        Self {
            globe_radius: SphericalGlobe::EARTH_RADIUS,
            viewport: Viewport::default(),
            start: StartPose::default(),
            options: NavigationOptions::default(),
            frames: Vec::new(),
        }
    }
}

impl ReplayScript {
    /// Parse a TOML script.
    pub fn from_toml_str(content: &str) -> Result<Self, NavError> {
        let script: Self = toml::from_str(content)
            .map_err(|e| NavError::ReplayParse(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    /// Parse a JSON script.
    pub fn from_json_str(content: &str) -> Result<Self, NavError> {
        let script: Self = serde_json::from_str(content)
            .map_err(|e| NavError::ReplayParse(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    /// Load a script, choosing JSON for `.json` files and TOML otherwise.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(NavError::Io)?;
        let script = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        log::debug!(
            "Loaded replay script {} ({} frame groups)",
            path.display(),
            script.frames.len()
        );
        Ok(script)
    }

    fn validate(&self) -> Result<(), NavError> {
        let radius_ok = self.globe_radius > 0.0;
        if !radius_ok {
            return Err(NavError::ReplayParse(format!(
                "globe_radius must be positive, got {}",
                self.globe_radius
            )));
        }
        let viewport_ok =
            self.viewport.width > 0.0 && self.viewport.height > 0.0;
        if !viewport_ok {
            let msg = "viewport must have a positive size";
            return Err(NavError::ReplayParse(msg.to_owned()));
        }
        self.options.validate()
    }

    /// Total number of frames the script runs.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.iter().map(|f| f.repeat.max(1) as usize).sum()
    }

    /// Run the script and record the camera after every frame.
    #[must_use]
    pub fn run(&self) -> Vec<FrameRecord> {
        let globe = SphericalGlobe::new(self.globe_radius, self.viewport);
        let start = &self.start;
        let mut pose = AnchorPose::from_geodetic(
            &globe,
            start.longitude,
            start.latitude,
            start.height,
            start.heading,
            start.pitch,
        );
        let mut controller = GlobeCameraController::new(self.options.clone());
        let mut collector = InputCollector::new();
        let mut records = Vec::with_capacity(self.frame_count());

        for group in &self.frames {
            for event in &group.events {
                collector.handle_event(*event);
            }
            for _ in 0..group.repeat.max(1) {
                let input = collector.finish_frame();
                let dt = group.delta_time;
                controller.update(&input, &mut pose, &globe, &globe, dt);
                records.push(FrameRecord {
                    frame: records.len(),
                    action: controller.current_action(),
                    position: pose.position,
                    rotation: pose.rotation,
                    height: pose.height(),
                    clip: controller.clip_planes(&pose, &globe),
                });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORBIT_SCRIPT: &str = r#"
[start]
height = 1000000.0
pitch = -90.0

[[frames]]
delta_time = 0.016
events = [
    { type = "cursor_moved", x = 100.0, y = 100.0 },
    { type = "mouse_button", button = "middle", pressed = true },
]

[[frames]]
delta_time = 0.016
events = [{ type = "cursor_moved", x = 110.0, y = 100.0 }]

[[frames]]
delta_time = 0.016
events = [{ type = "mouse_button", button = "middle", pressed = false }]
repeat = 60
"#;

    #[test]
    fn orbit_script_runs_and_settles() {
        let script = ReplayScript::from_toml_str(ORBIT_SCRIPT).unwrap();
        assert_eq!(script.frame_count(), 62);
        let records = script.run();
        assert_eq!(records.len(), 62);
        assert_eq!(records[0].action, Some(ActionKind::Orbit));
        assert_eq!(records[1].action, Some(ActionKind::Orbit));
        assert_eq!(records.last().unwrap().action, None);
        assert!(records[1].position != records[0].position);
        for r in &records {
            assert!((r.height - 1.0e6).abs() < 1e-3);
        }
    }

    #[test]
    fn zoom_script_descends() {
        let script = ReplayScript::from_toml_str(
            r#"
[[frames]]
events = [
    { type = "cursor_moved", x = 640.0, y = 360.0 },
    { type = "scroll", delta = 1.0 },
]
"#,
        )
        .unwrap();
        let records = script.run();
        assert_eq!(records.len(), 1);
        assert!((records[0].height - 800_000.0).abs() < 1e-3);
        assert!(records[0].clip.is_some());
    }

    #[test]
    fn json_scripts_parse() {
        let script = ReplayScript::from_json_str(
            r#"{"frames":[{"events":[{"type":"scroll","delta":-1.0}],
                "repeat":3}]}"#,
        )
        .unwrap();
        assert_eq!(script.frame_count(), 3);
        assert_eq!(script.start, StartPose::default());
    }

    #[test]
    fn rejects_bad_radius() {
        let err =
            ReplayScript::from_toml_str("globe_radius = -1.0").unwrap_err();
        assert!(matches!(err, NavError::ReplayParse(_)));
    }

    #[test]
    fn rejects_unknown_event() {
        let err = ReplayScript::from_toml_str(
            r#"
[[frames]]
events = [{ type = "key_pressed", key = "Q" }]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, NavError::ReplayParse(_)));
    }

    #[test]
    fn records_serialize_to_json() {
        let script = ReplayScript::from_toml_str("[[frames]]\n").unwrap();
        let records = script.run();
        let line = serde_json::to_string(&records[0]).unwrap();
        assert!(line.contains("\"frame\":0"));
        assert!(line.contains("\"action\":null"));
    }
}
