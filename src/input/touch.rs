//! Fixed-size touch groups.

use glam::DVec2;

use super::pointer::Pointer;
use super::source::InputSource;

/// Gesture state for exactly `N` fingers.
///
/// Active only while exactly `N` contacts are down and the UI does not hold
/// focus; any other count ends the gesture immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchGroup<const N: usize> {
    active: bool,
    claimed: bool,
    positions: [DVec2; N],
    begin_positions: [DVec2; N],
    last_positions: [DVec2; N],
}

impl<const N: usize> Default for TouchGroup<N> {
    fn default() -> Self {
        Self {
            active: false,
            claimed: false,
            positions: [DVec2::ZERO; N],
            begin_positions: [DVec2::ZERO; N],
            last_positions: [DVec2::ZERO; N],
        }
    }
}

impl<const N: usize> TouchGroup<N> {
    /// Create an inactive group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resample from `source`. Call once per frame.
    pub fn update(&mut self, source: &dyn InputSource) {
        if source.touch_count() != N || source.ui_has_focus() {
            self.active = false;
            return;
        }

        let positions: [DVec2; N] =
            std::array::from_fn(|i| source.touch_position(i));
        if self.active {
            self.last_positions = self.positions;
            self.positions = positions;
        } else {
            self.active = true;
            self.claimed = false;
            self.positions = positions;
            self.begin_positions = positions;
            self.last_positions = positions;
        }
    }

    /// Whether an action may take this group.
    #[must_use]
    pub fn can_use(&self) -> bool {
        self.active && !self.claimed
    }

    /// Mark the group as owned. Has no effect while inactive.
    pub fn claim(&mut self) {
        if self.active {
            self.claimed = true;
        }
    }

    /// Whether an action holds the group.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Finger positions this frame.
    #[must_use]
    pub fn positions(&self) -> &[DVec2; N] {
        &self.positions
    }

    /// Mean finger position this frame.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        mean(&self.positions)
    }

    /// Mean finger position when the gesture started.
    #[must_use]
    pub fn begin_center(&self) -> DVec2 {
        mean(&self.begin_positions)
    }

    /// Mean finger position on the previous frame.
    #[must_use]
    pub fn last_center(&self) -> DVec2 {
        mean(&self.last_positions)
    }

    /// Last finger minus first finger this frame.
    #[must_use]
    pub fn diff(&self) -> DVec2 {
        spread(&self.positions)
    }

    /// Last finger minus first finger when the gesture started.
    #[must_use]
    pub fn begin_diff(&self) -> DVec2 {
        spread(&self.begin_positions)
    }

    /// Last finger minus first finger on the previous frame.
    #[must_use]
    pub fn last_diff(&self) -> DVec2 {
        spread(&self.last_positions)
    }
}

fn mean(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

fn spread(points: &[DVec2]) -> DVec2 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => *last - *first,
        _ => DVec2::ZERO,
    }
}

impl<const N: usize> Pointer for TouchGroup<N> {
    fn is_active(&self) -> bool {
        self.active
    }

    fn position(&self) -> DVec2 {
        self.center()
    }

    fn begin_position(&self) -> DVec2 {
        self.begin_center()
    }

    fn last_position(&self) -> DVec2 {
        self.last_center()
    }
}
