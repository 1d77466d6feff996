//! Folds platform events into per-frame [`InputFrame`] snapshots.
//!
//! The `InputCollector` owns the transient event state between frames
//! (held buttons, the cursor, live touch contacts, UI focus). Edge flags
//! and scroll accumulate until [`InputCollector::finish_frame`] hands them
//! off and clears them.

use glam::DVec2;

use super::event::InputEvent;
use super::source::{InputFrame, MOUSE_BUTTON_COUNT};

/// Accumulates [`InputEvent`]s between frames.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// collector.handle_event(event);
///
/// // Once per frame:
/// let frame = collector.finish_frame();
/// controller.update(&frame, &mut anchor, &globe, &globe, dt);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    pointer: DVec2,
    pressed: [bool; MOUSE_BUTTON_COUNT],
    released: [bool; MOUSE_BUTTON_COUNT],
    held: [bool; MOUSE_BUTTON_COUNT],
    scroll: f64,
    /// Live contacts as `(id, position)` in the order they touched down.
    touches: Vec<(u64, DVec2)>,
    ui_focus: bool,
}

impl InputCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position.
    #[must_use]
    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    /// Record one platform event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.pointer = DVec2::new(x, y);
            }
            InputEvent::MouseButton { button, pressed } => {
                let i = button.index();
                if pressed {
                    if !self.held[i] {
                        self.pressed[i] = true;
                    }
                    self.held[i] = true;
                } else {
                    if self.held[i] {
                        self.released[i] = true;
                    }
                    self.held[i] = false;
                }
            }
            InputEvent::Scroll { delta } => self.scroll += delta,
            InputEvent::TouchStart { id, x, y } => {
                let position = DVec2::new(x, y);
                let existing = self.touches.iter_mut().find(|t| t.0 == id);
                if let Some(touch) = existing {
                    touch.1 = position;
                } else {
                    self.touches.push((id, position));
                }
            }
            InputEvent::TouchMoved { id, x, y } => {
                let existing = self.touches.iter_mut().find(|t| t.0 == id);
                if let Some(touch) = existing {
                    touch.1 = DVec2::new(x, y);
                }
            }
            InputEvent::TouchEnd { id } => self.touches.retain(|t| t.0 != id),
            InputEvent::UiFocusChanged { focused } => self.ui_focus = focused,
        }
    }

    /// Snapshot the frame and clear the per-frame edges and scroll.
    pub fn finish_frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            pointer: self.pointer,
            pressed: self.pressed,
            released: self.released,
            held: self.held,
            scroll: self.scroll,
            touches: self.touches.iter().map(|t| t.1).collect(),
            ui_focus: self.ui_focus,
        };
        self.pressed = [false; MOUSE_BUTTON_COUNT];
        self.released = [false; MOUSE_BUTTON_COUNT];
        self.scroll = 0.0;
        frame
    }
}
