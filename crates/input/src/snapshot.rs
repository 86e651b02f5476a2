use crate::action::{Action, HeldActions};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Everything the simulation needs to know about input for one frame.
///
/// Plain data: produced once per frame by [`InputState::snapshot`] and
/// consumed by pure update functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub held: HeldActions,
    /// Pointer motion since the previous snapshot, in raw device units.
    /// +x is rightward, +y is downward.
    pub pointer_delta: Vec2,
    /// Scroll since the previous snapshot, in lines (+y away from the user).
    pub scroll: f32,
}

impl InputSnapshot {
    pub fn holding(actions: &[Action]) -> Self {
        let mut held = HeldActions::default();
        for action in actions {
            held.set(*action, true);
        }
        Self {
            held,
            ..Self::default()
        }
    }

    pub fn with_pointer(mut self, dx: f32, dy: f32) -> Self {
        self.pointer_delta = Vec2::new(dx, dy);
        self
    }
}

/// Accumulates window-system input between frames.
///
/// Held state persists across snapshots; pointer and scroll deltas are
/// summed and reset by each snapshot.
#[derive(Debug, Default)]
pub struct InputState {
    held: HeldActions,
    pointer_delta: Vec2,
    scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        if !self.held.is_held(action) {
            tracing::trace!(?action, "pressed");
        }
        self.held.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.held.set(action, false);
    }

    pub fn set(&mut self, action: Action, held: bool) {
        if held {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    pub fn add_pointer_motion(&mut self, dx: f32, dy: f32) {
        self.pointer_delta += Vec2::new(dx, dy);
    }

    pub fn add_scroll(&mut self, lines: f32) {
        self.scroll += lines;
    }

    /// Drop everything held, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held = HeldActions::default();
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.is_held(action)
    }

    /// Capture this frame's input and reset the accumulated deltas.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snap = InputSnapshot {
            held: self.held,
            pointer_delta: self.pointer_delta,
            scroll: self.scroll,
        };
        self.pointer_delta = Vec2::ZERO;
        self.scroll = 0.0;
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_state_survives_snapshots() {
        let mut input = InputState::new();
        input.press(Action::Forward);
        assert!(input.snapshot().held.forward);
        assert!(input.snapshot().held.forward);
        input.release(Action::Forward);
        assert!(!input.snapshot().held.forward);
    }

    #[test]
    fn deltas_accumulate_then_reset() {
        let mut input = InputState::new();
        input.add_pointer_motion(3.0, -1.0);
        input.add_pointer_motion(2.0, 4.0);
        input.add_scroll(1.0);
        let snap = input.snapshot();
        assert_eq!(snap.pointer_delta, Vec2::new(5.0, 3.0));
        assert_eq!(snap.scroll, 1.0);

        let next = input.snapshot();
        assert_eq!(next.pointer_delta, Vec2::ZERO);
        assert_eq!(next.scroll, 0.0);
    }

    #[test]
    fn release_all_clears_held() {
        let mut input = InputState::new();
        input.press(Action::Left);
        input.press(Action::Shoot);
        input.release_all();
        assert_eq!(input.snapshot().held, HeldActions::default());
    }

    #[test]
    fn holding_builder() {
        let snap = InputSnapshot::holding(&[Action::Back, Action::Right]).with_pointer(1.0, 2.0);
        assert!(snap.held.back && snap.held.right);
        assert!(!snap.held.forward);
        assert_eq!(snap.pointer_delta, Vec2::new(1.0, 2.0));
    }
}
