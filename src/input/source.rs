//! The per-frame input query surface.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Number of mouse buttons tracked by index (left, right, middle).
pub const MOUSE_BUTTON_COUNT: usize = 3;

/// Per-frame input queries consumed by the pointer states.
///
/// Button indices outside `0..MOUSE_BUTTON_COUNT` report `false`.
pub trait InputSource {
    /// Whether `button` went down this frame.
    fn button_down(&self, button: usize) -> bool;
    /// Whether `button` was released this frame.
    fn button_up(&self, button: usize) -> bool;
    /// Whether `button` is currently held.
    fn button_held(&self, button: usize) -> bool;
    /// Pointer position in viewport pixels, origin bottom-left.
    fn pointer_position(&self) -> DVec2;
    /// Scroll accumulated this frame (positive = zoom in).
    fn scroll_delta(&self) -> f64;
    /// Number of fingers in contact.
    fn touch_count(&self) -> usize;
    /// Position of the `index`-th contact in contact order.
    fn touch_position(&self, index: usize) -> DVec2;
    /// Whether a UI element currently holds input focus.
    fn ui_has_focus(&self) -> bool;
}

/// A snapshot of one frame of input.
///
/// Produced by [`super::InputCollector::finish_frame`] or built directly
/// with the chained helpers:
///
/// ```
/// use globenav::input::{InputFrame, InputSource};
///
/// let frame = InputFrame::default().at(10.0, 20.0).press(2);
/// assert!(frame.button_down(2) && frame.button_held(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    /// Pointer position.
    pub pointer: DVec2,
    /// Buttons pressed this frame.
    pub pressed: [bool; MOUSE_BUTTON_COUNT],
    /// Buttons released this frame.
    pub released: [bool; MOUSE_BUTTON_COUNT],
    /// Buttons held at the end of the frame.
    pub held: [bool; MOUSE_BUTTON_COUNT],
    /// Accumulated scroll.
    pub scroll: f64,
    /// Touch contacts in contact order.
    pub touches: Vec<DVec2>,
    /// Whether the UI holds focus.
    pub ui_focus: bool,
}

impl InputFrame {
    /// Move the pointer.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.pointer = DVec2::new(x, y);
        self
    }

    /// Press `button` this frame (also marks it held).
    #[must_use]
    pub fn press(mut self, button: usize) -> Self {
        if button < MOUSE_BUTTON_COUNT {
            self.pressed[button] = true;
            self.held[button] = true;
        }
        self
    }

    /// Keep `button` held without an edge.
    #[must_use]
    pub fn hold(mut self, button: usize) -> Self {
        if button < MOUSE_BUTTON_COUNT {
            self.held[button] = true;
        }
        self
    }

    /// Release `button` this frame.
    #[must_use]
    pub fn release(mut self, button: usize) -> Self {
        if button < MOUSE_BUTTON_COUNT {
            self.released[button] = true;
            self.held[button] = false;
        }
        self
    }

    /// Add scroll.
    #[must_use]
    pub fn scroll(mut self, delta: f64) -> Self {
        self.scroll += delta;
        self
    }

    /// Replace the touch contacts.
    #[must_use]
    pub fn touches(mut self, touches: &[DVec2]) -> Self {
        self.touches = touches.to_vec();
        self
    }

    /// Set UI focus.
    #[must_use]
    pub fn ui_focus(mut self, focused: bool) -> Self {
        self.ui_focus = focused;
        self
    }
}

impl InputSource for InputFrame {
    fn button_down(&self, button: usize) -> bool {
        self.pressed.get(button).copied().unwrap_or(false)
    }

    fn button_up(&self, button: usize) -> bool {
        self.released.get(button).copied().unwrap_or(false)
    }

    fn button_held(&self, button: usize) -> bool {
        self.held.get(button).copied().unwrap_or(false)
    }

    fn pointer_position(&self) -> DVec2 {
        self.pointer
    }

    fn scroll_delta(&self) -> f64 {
        self.scroll
    }

    fn touch_count(&self) -> usize {
        self.touches.len()
    }

    fn touch_position(&self, index: usize) -> DVec2 {
        self.touches.get(index).copied().unwrap_or(DVec2::ZERO)
    }

    fn ui_has_focus(&self) -> bool {
        self.ui_focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_buttons_are_up() {
        let frame = InputFrame::default().press(7);
        assert!(!frame.button_down(7));
        assert!(!frame.button_held(7));
        assert_eq!(frame.pressed, [false; MOUSE_BUTTON_COUNT]);
    }

    #[test]
    fn missing_touch_reads_origin() {
        let frame = InputFrame::default().touches(&[DVec2::new(3.0, 4.0)]);
        assert_eq!(frame.touch_count(), 1);
        assert_eq!(frame.touch_position(0), DVec2::new(3.0, 4.0));
        assert_eq!(frame.touch_position(1), DVec2::ZERO);
    }
}
