//! The camera action state machine.
//!
//! At most one gesture runs at a time. Each frame the registry is scanned
//! in order and the first triggered gesture that the running one allows to
//! interrupt takes over; then the running gesture is advanced.

use super::actions::{ActionKind, ActionState, CameraAction};
use super::context::CameraContext;

/// The running gesture and its state.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningAction {
    /// Index into the registry.
    pub index: usize,
    /// Per-activation state.
    pub state: ActionState,
}

/// Ordered gesture registry plus the running slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionMachine {
    actions: Vec<CameraAction>,
    current: Option<RunningAction>,
    activations: u64,
}

impl ActionMachine {
    /// Create an idle machine over `actions` (earlier entries win ties).
    #[must_use]
    pub fn new(actions: Vec<CameraAction>) -> Self {
        Self {
            actions,
            current: None,
            activations: 0,
        }
    }

    /// The registry.
    #[must_use]
    pub fn actions(&self) -> &[CameraAction] {
        &self.actions
    }

    /// The running gesture, if any.
    #[must_use]
    pub fn current(&self) -> Option<&RunningAction> {
        self.current.as_ref()
    }

    /// Kind of the running gesture.
    #[must_use]
    pub fn current_kind(&self) -> Option<ActionKind> {
        self.current
            .as_ref()
            .and_then(|running| self.actions.get(running.index))
            .map(CameraAction::kind)
    }

    /// State of the running gesture.
    #[must_use]
    pub fn current_state(&self) -> Option<&ActionState> {
        self.current.as_ref().map(|running| &running.state)
    }

    /// Number of gestures begun since creation.
    #[must_use]
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Whether no gesture is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Start at most one gesture, then advance the running one.
    pub fn step(&mut self, ctx: &mut CameraContext<'_, '_>) {
        if let Some(index) = self.startable(ctx) {
            self.start(index, ctx);
        }

        let Some(running) = self.current.as_mut() else {
            return;
        };
        let Some(action) = self.actions.get(running.index) else {
            self.current = None;
            return;
        };
        if action.update(&mut running.state, ctx) {
            action.end(&mut running.state, ctx);
            log::debug!("{} finished", action.kind().name());
            self.current = None;
        }
    }

    /// End the running gesture, if any.
    pub fn cancel(&mut self, ctx: &mut CameraContext<'_, '_>) {
        if let Some(mut running) = self.current.take() {
            if let Some(action) = self.actions.get(running.index) {
                action.end(&mut running.state, ctx);
                log::debug!("{} cancelled", action.kind().name());
            }
        }
    }

    fn startable(&self, ctx: &CameraContext<'_, '_>) -> Option<usize> {
        let blocker = self
            .current
            .as_ref()
            .and_then(|running| self.actions.get(running.index));
        self.actions.iter().position(|action| {
            action.is_triggered(ctx)
                && blocker.is_none_or(|running| {
                    running.can_be_interrupted_by(action.kind())
                })
        })
    }

    fn start(&mut self, index: usize, ctx: &mut CameraContext<'_, '_>) {
        let Some(action) = self.actions.get(index) else {
            return;
        };
        if let Some(mut previous) = self.current.take() {
            if previous.index != index {
                if let Some(old) = self.actions.get(previous.index) {
                    old.end(&mut previous.state, ctx);
                    log::debug!(
                        "{} interrupted by {}",
                        old.kind().name(),
                        action.kind().name()
                    );
                }
            }
        }
        let state = action.begin(ctx);
        self.activations += 1;
        log::debug!("{} began", action.kind().name());
        self.current = Some(RunningAction { index, state });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::actions::{
        InterruptPolicy, OrbitAction, PanAction, ZoomAction,
    };
    use crate::camera::testing::Rig;
    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use crate::globe::GlobeAnchor;
    use crate::input::{InputFrame, Pointer, MOUSE_BUTTON_COUNT};
    use crate::options::NavigationOptions;

    fn registry(orbit_interrupt: InterruptPolicy) -> ActionMachine {
        ActionMachine::new(vec![
            CameraAction::Orbit(OrbitAction {
                interrupt: orbit_interrupt,
                ..OrbitAction::default()
            }),
            CameraAction::Pan(PanAction::default()),
            CameraAction::Zoom(ZoomAction::default()),
        ])
    }

    fn step(machine: &mut ActionMachine, rig: &mut Rig, frame: &InputFrame) {
        rig.with_context(frame, 0.016, |ctx| machine.step(ctx));
    }

    #[test]
    fn idle_without_input() {
        let mut machine = registry(InterruptPolicy::Any);
        let mut rig = Rig::new(1.0e6, -90.0);
        step(&mut machine, &mut rig, &InputFrame::default());
        assert!(machine.is_idle());
    }

    #[test]
    fn press_starts_matching_action() {
        let mut machine = registry(InterruptPolicy::Any);
        let mut rig = Rig::new(1.0e6, -90.0);
        let press = InputFrame::default().at(640.0, 360.0).press(2);
        step(&mut machine, &mut rig, &press);
        assert_eq!(machine.current_kind(), Some(ActionKind::Orbit));
        let state = machine.current_state();
        assert!(state.and_then(ActionState::anchor_point).is_some());
    }

    #[test]
    fn zoom_interrupts_orbit_by_default() {
        let mut machine = registry(InterruptPolicy::Any);
        let mut rig = Rig::new(1.0e6, -90.0);
        let at = InputFrame::default().at(640.0, 360.0);
        step(&mut machine, &mut rig, &at.clone().press(2));
        step(&mut machine, &mut rig, &at.hold(2).scroll(1.0));
        // Zoom runs a single step and finishes in the same frame.
        assert!(machine.is_idle());
        assert!(rig.pose.height() < 1.0e6);
    }

    #[test]
    fn never_policy_blocks_interruption() {
        let mut machine = registry(InterruptPolicy::Never);
        let mut rig = Rig::new(1.0e6, -90.0);
        let at = InputFrame::default().at(640.0, 360.0);
        step(&mut machine, &mut rig, &at.clone().press(2));
        step(&mut machine, &mut rig, &at.hold(2).scroll(1.0));
        assert_eq!(machine.current_kind(), Some(ActionKind::Orbit));
        assert!((rig.pose.height() - 1.0e6).abs() < 1e-3);
    }

    #[test]
    fn only_policy_lists_allowed_kinds() {
        let policy = InterruptPolicy::Only(vec![ActionKind::Pan]);
        let mut machine = registry(policy);
        let mut rig = Rig::new(1.0e6, -90.0);
        let at = InputFrame::default().at(640.0, 360.0);
        step(&mut machine, &mut rig, &at.clone().press(2));
        step(&mut machine, &mut rig, &at.hold(2).scroll(1.0));
        assert_eq!(machine.current_kind(), Some(ActionKind::Orbit));
    }

    #[test]
    fn at_most_one_action_runs() {
        let mut machine = registry(InterruptPolicy::Any);
        let mut rig = Rig::new(1.0e6, -90.0);
        // Both mouse buttons down together: the mouse binds the lowest index.
        step(
            &mut machine,
            &mut rig,
            &InputFrame::default().at(640.0, 360.0).press(0).press(2),
        );
        assert_eq!(machine.current_kind(), Some(ActionKind::Pan));
        assert!(!rig.input.mouse.can_use(2));
    }

    fn random_frame(
        rng: &mut StdRng,
        held: &mut [bool; MOUSE_BUTTON_COUNT],
    ) -> InputFrame {
        let mut frame = InputFrame::default().at(
            rng.random_range(0.0..1280.0),
            rng.random_range(0.0..720.0),
        );
        for (button, is_held) in held.iter_mut().enumerate() {
            if *is_held {
                if rng.random_bool(0.3) {
                    frame = frame.release(button);
                    *is_held = false;
                } else {
                    frame = frame.hold(button);
                }
            } else if rng.random_bool(0.3) {
                frame = frame.press(button);
                *is_held = true;
            }
        }
        if rng.random_bool(0.3) {
            frame = frame.scroll(rng.random_range(-2.0..2.0));
        }
        if rng.random_bool(0.2) {
            let finger = DVec2::new(
                rng.random_range(0.0..1280.0),
                rng.random_range(0.0..720.0),
            );
            frame = frame.touches(&[finger]);
        }
        frame
    }

    #[test]
    fn one_begin_per_step_for_any_order_and_input() {
        let mut rng = StdRng::seed_from_u64(0x676c_6f62);
        for _ in 0..50 {
            let mut order =
                vec![ActionKind::Orbit, ActionKind::Pan, ActionKind::Zoom];
            order.shuffle(&mut rng);
            let options = NavigationOptions {
                action_order: order,
                ..NavigationOptions::default()
            };
            let mut machine = ActionMachine::new(options.build_actions());
            let mut rig = Rig::new(1.0e6, -90.0);
            let mut held = [false; MOUSE_BUTTON_COUNT];

            for _ in 0..40 {
                let frame = random_frame(&mut rng, &mut held);
                let before = machine.activations();
                step(&mut machine, &mut rig, &frame);
                assert!(machine.activations() - before <= 1);

                let mouse = &rig.input.mouse;
                let orbit_button = options.orbit.mouse_button;
                if machine.current_kind() == Some(ActionKind::Orbit)
                    && mouse.is_active()
                    && mouse.button() == orbit_button
                {
                    assert!(mouse.is_claimed());
                }
            }
        }
    }

    #[test]
    fn begins_are_counted() {
        let mut machine = registry(InterruptPolicy::Any);
        let mut rig = Rig::new(1.0e6, -90.0);
        let frame = InputFrame::default().at(640.0, 360.0);
        step(&mut machine, &mut rig, &frame.clone().press(2));
        step(&mut machine, &mut rig, &frame.clone().hold(2).scroll(1.0));
        assert_eq!(machine.activations(), 2);
    }

    #[test]
    fn cancel_clears_running_action() {
        let mut machine = registry(InterruptPolicy::Any);
        let mut rig = Rig::new(1.0e6, -90.0);
        let at = InputFrame::default().at(640.0, 360.0);
        step(&mut machine, &mut rig, &at.clone().press(0));
        assert!(!machine.is_idle());
        rig.with_context(&at.hold(0), 0.016, |ctx| {
            machine.cancel(ctx);
        });
        assert!(machine.is_idle());
    }
}
