use serde::{Deserialize, Serialize};

/// Platform-agnostic input events.
///
/// These are fed into an [`InputCollector`](super::InputCollector) which
/// folds them into a per-frame [`InputFrame`](super::InputFrame) snapshot.
/// Positions are viewport pixels with the origin at the bottom-left corner.
///
/// # Example
///
/// ```
/// use globenav::input::{InputCollector, InputEvent, MouseButton};
///
/// let mut collector = InputCollector::new();
/// collector.handle_event(InputEvent::CursorMoved { x: 100.0, y: 200.0 });
/// collector.handle_event(InputEvent::MouseButton {
///     button: MouseButton::Middle,
///     pressed: true,
/// });
/// let frame = collector.finish_frame();
/// assert!(frame.pressed[MouseButton::Middle.index()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels, growing upward.
        y: f64,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in wheel notches.
        delta: f64,
    },
    /// A finger touched the screen.
    TouchStart {
        /// Platform touch identifier, stable for the contact's lifetime.
        id: u64,
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
    /// A finger moved.
    TouchMoved {
        /// Platform touch identifier.
        id: u64,
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
    /// A finger lifted or the touch was cancelled.
    TouchEnd {
        /// Platform touch identifier.
        id: u64,
    },
    /// A UI element gained or lost input focus.
    UiFocusChanged {
        /// Whether the UI now holds focus.
        focused: bool,
    },
}

/// Platform-agnostic mouse button identifier.
///
/// The discriminant is the button index used by
/// [`InputSource`](super::InputSource) queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left = 0,
    /// Secondary (right) mouse button.
    Right = 1,
    /// Middle mouse button (wheel click).
    Middle = 2,
}

impl MouseButton {
    /// Button index (0 = left, 1 = right, 2 = middle).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Button for an index, if it is one of the three tracked buttons.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            2 => Some(Self::Middle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_indices_round_trip() {
        let all = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
        for button in all {
            assert_eq!(MouseButton::from_index(button.index()), Some(button));
        }
        assert_eq!(MouseButton::from_index(3), None);
    }

    #[test]
    fn events_use_tagged_json() {
        let json =
            r#"{"type":"mouse_button","button":"middle","pressed":true}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InputEvent::MouseButton {
                button: MouseButton::Middle,
                pressed: true,
            }
        );
        let json =
            serde_json::to_string(&InputEvent::Scroll { delta: 1.5 }).unwrap();
        assert_eq!(json, r#"{"type":"scroll","delta":1.5}"#);
    }
}
