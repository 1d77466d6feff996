//! Camera gestures.
//!
//! Each gesture is a configuration struct implementing [`GestureAction`];
//! the per-activation data it needs lives in the `State` it returns from
//! `begin`. [`CameraAction`] and [`ActionState`] close the set so the
//! [`ActionMachine`](super::machine::ActionMachine) can hold a registry of
//! mixed gestures without boxing.

mod orbit;
mod pan;
mod zoom;

use glam::DVec3;
pub use orbit::{OrbitAction, OrbitState};
pub use pan::{PanAction, PanState};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use zoom::{ZoomAction, ZoomState};

use super::context::CameraContext;

/// Gesture identifiers, used in the action order and interrupt policies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Rotate around the point under the cursor.
    Orbit,
    /// Drag the globe surface under the pointer.
    Pan,
    /// Scroll toward or away from the surface.
    Zoom,
}

impl ActionKind {
    /// Lower-case name for logs and records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Orbit => "orbit",
            Self::Pan => "pan",
            Self::Zoom => "zoom",
        }
    }
}

/// Which gestures may take over while an action runs.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum InterruptPolicy {
    /// Any triggered gesture may interrupt.
    #[default]
    Any,
    /// The action runs to completion.
    Never,
    /// Only the listed gestures may interrupt.
    Only(Vec<ActionKind>),
}

impl InterruptPolicy {
    /// Whether a triggered `kind` may interrupt.
    #[must_use]
    pub fn permits(&self, kind: ActionKind) -> bool {
        match self {
            Self::Any => true,
            Self::Never => false,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// The contract every gesture implements.
pub trait GestureAction {
    /// Per-activation state created by [`GestureAction::begin`].
    type State;

    /// Whether the current input wants this gesture to start.
    fn is_triggered(&self, ctx: &CameraContext<'_, '_>) -> bool;

    /// Whether a triggered `kind` may interrupt this gesture while it runs.
    fn can_be_interrupted_by(&self, kind: ActionKind) -> bool;

    /// Start the gesture. Claims the pointers it uses.
    fn begin(&self, ctx: &mut CameraContext<'_, '_>) -> Self::State;

    /// Advance one frame. Returns `true` when the gesture has finished.
    fn update(
        &self,
        state: &mut Self::State,
        ctx: &mut CameraContext<'_, '_>,
    ) -> bool;

    /// Called once when the gesture finishes or is interrupted.
    fn end(&self, _state: &mut Self::State, _ctx: &mut CameraContext<'_, '_>) {}
}

/// A configured gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraAction {
    /// See [`OrbitAction`].
    Orbit(OrbitAction),
    /// See [`PanAction`].
    Pan(PanAction),
    /// See [`ZoomAction`].
    Zoom(ZoomAction),
}

/// State of the running gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionState {
    /// See [`OrbitState`].
    Orbit(OrbitState),
    /// See [`PanState`].
    Pan(PanState),
    /// See [`ZoomState`].
    Zoom(ZoomState),
}

impl ActionState {
    /// Globe-fixed point the gesture is anchored on (orbit pivot, pan grab
    /// point, zoom target), if the initial ray cast hit.
    #[must_use]
    pub fn anchor_point(&self) -> Option<DVec3> {
        match self {
            Self::Orbit(s) => s.pivot,
            Self::Pan(s) => s.anchor_point,
            Self::Zoom(s) => s.hit,
        }
    }

    /// Gesture this state belongs to.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Orbit(_) => ActionKind::Orbit,
            Self::Pan(_) => ActionKind::Pan,
            Self::Zoom(_) => ActionKind::Zoom,
        }
    }
}

impl CameraAction {
    /// Gesture identifier.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Orbit(_) => ActionKind::Orbit,
            Self::Pan(_) => ActionKind::Pan,
            Self::Zoom(_) => ActionKind::Zoom,
        }
    }

    /// See [`GestureAction::is_triggered`].
    #[must_use]
    pub fn is_triggered(&self, ctx: &CameraContext<'_, '_>) -> bool {
        match self {
            Self::Orbit(a) => a.is_triggered(ctx),
            Self::Pan(a) => a.is_triggered(ctx),
            Self::Zoom(a) => a.is_triggered(ctx),
        }
    }

    /// See [`GestureAction::can_be_interrupted_by`].
    #[must_use]
    pub fn can_be_interrupted_by(&self, kind: ActionKind) -> bool {
        match self {
            Self::Orbit(a) => a.can_be_interrupted_by(kind),
            Self::Pan(a) => a.can_be_interrupted_by(kind),
            Self::Zoom(a) => a.can_be_interrupted_by(kind),
        }
    }

    /// See [`GestureAction::begin`].
    pub fn begin(&self, ctx: &mut CameraContext<'_, '_>) -> ActionState {
        match self {
            Self::Orbit(a) => ActionState::Orbit(a.begin(ctx)),
            Self::Pan(a) => ActionState::Pan(a.begin(ctx)),
            Self::Zoom(a) => ActionState::Zoom(a.begin(ctx)),
        }
    }

    /// See [`GestureAction::update`]. A state from a different gesture
    /// finishes immediately.
    pub fn update(
        &self,
        state: &mut ActionState,
        ctx: &mut CameraContext<'_, '_>,
    ) -> bool {
        match (self, state) {
            (Self::Orbit(a), ActionState::Orbit(s)) => a.update(s, ctx),
            (Self::Pan(a), ActionState::Pan(s)) => a.update(s, ctx),
            (Self::Zoom(a), ActionState::Zoom(s)) => a.update(s, ctx),
            (action, state) => {
                log::warn!(
                    "{} action received {} state; finishing",
                    action.kind().name(),
                    state.kind().name()
                );
                true
            }
        }
    }

    /// See [`GestureAction::end`].
    pub fn end(
        &self,
        state: &mut ActionState,
        ctx: &mut CameraContext<'_, '_>,
    ) {
        match (self, state) {
            (Self::Orbit(a), ActionState::Orbit(s)) => a.end(s, ctx),
            (Self::Pan(a), ActionState::Pan(s)) => a.end(s, ctx),
            (Self::Zoom(a), ActionState::Zoom(s)) => a.end(s, ctx),
            _ => {}
        }
    }
}
