//! The bundle of pointer states the camera actions read.

use super::pointer::{MousePointer, Pointer, PointerType};
use super::source::InputSource;
use super::touch::TouchGroup;

/// All pointer states, resampled once per frame before the actions run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraInput {
    /// Mouse state.
    pub mouse: MousePointer,
    /// Single-finger touch state.
    pub one_touch: TouchGroup<1>,
    /// Two-finger touch state.
    pub two_touches: TouchGroup<2>,
}

impl CameraInput {
    /// Create with every pointer inactive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resample every pointer from `source`.
    pub fn update(&mut self, source: &dyn InputSource) {
        self.mouse.update(source);
        self.one_touch.update(source);
        self.two_touches.update(source);
    }

    /// The single-pointer state for `kind`.
    #[must_use]
    pub fn pointer(&self, kind: PointerType) -> &dyn Pointer {
        match kind {
            PointerType::Mouse => &self.mouse,
            PointerType::Touch => &self.one_touch,
        }
    }
}
