//! Mouse pointer state and the [`Pointer`] read interface.

use glam::DVec2;

use super::source::{InputSource, MOUSE_BUTTON_COUNT};

/// Which pointer a single-pointer gesture follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// The mouse, bound to whichever button started the gesture.
    Mouse,
    /// A single finger.
    Touch,
}

/// Read access shared by the mouse and single-finger touch states.
pub trait Pointer {
    /// Whether a gesture is in progress on this pointer.
    fn is_active(&self) -> bool;
    /// Position this frame.
    fn position(&self) -> DVec2;
    /// Position when the gesture started.
    fn begin_position(&self) -> DVec2;
    /// Position on the previous frame.
    fn last_position(&self) -> DVec2;

    /// Movement since the previous frame.
    fn delta(&self) -> DVec2 {
        self.position() - self.last_position()
    }
}

/// Mouse gesture state.
///
/// The first button pressed while inactive binds the gesture; it ends when
/// that button is released. Other buttons are ignored while active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MousePointer {
    active: bool,
    claimed: bool,
    button: usize,
    scroll: f64,
    position: DVec2,
    begin_position: DVec2,
    last_position: DVec2,
}

impl MousePointer {
    /// Create an inactive pointer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resample from `source`. Call once per frame.
    pub fn update(&mut self, source: &dyn InputSource) {
        if self.active {
            self.last_position = self.position;
        }
        self.scroll = source.scroll_delta();
        self.position = source.pointer_position();

        if !self.active && !source.ui_has_focus() {
            let pressed =
                (0..MOUSE_BUTTON_COUNT).find(|&b| source.button_down(b));
            if let Some(button) = pressed {
                self.active = true;
                self.claimed = false;
                self.button = button;
                self.begin_position = self.position;
                self.last_position = self.position;
                log::trace!("mouse gesture started on button {button}");
            }
        }
        // A click batched into one frame starts and ends here.
        if self.active && source.button_up(self.button) {
            self.active = false;
        }
    }

    /// Whether an action may take this pointer for `button`.
    #[must_use]
    pub fn can_use(&self, button: usize) -> bool {
        self.active && !self.claimed && self.button == button
    }

    /// Mark the pointer as owned. Has no effect unless `button` is the
    /// bound button.
    pub fn claim(&mut self, button: usize) {
        if self.active && self.button == button {
            self.claimed = true;
        }
    }

    /// Whether an action holds the pointer.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Button bound to the current (or most recent) gesture.
    #[must_use]
    pub fn button(&self) -> usize {
        self.button
    }

    /// Scroll sampled this frame.
    #[must_use]
    pub fn scroll(&self) -> f64 {
        self.scroll
    }
}

impl Pointer for MousePointer {
    fn is_active(&self) -> bool {
        self.active
    }

    fn position(&self) -> DVec2 {
        self.position
    }

    fn begin_position(&self) -> DVec2 {
        self.begin_position
    }

    fn last_position(&self) -> DVec2 {
        self.last_position
    }
}
