use clap::ValueEnum;
use glam::Vec2;
use showroom_input::{Action, HeldActions, InputSnapshot};

/// Held action names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Shoot,
}

impl From<Key> for Action {
    fn from(key: Key) -> Self {
        match key {
            Key::Forward => Action::Forward,
            Key::Back => Action::Back,
            Key::Left => Action::Left,
            Key::Right => Action::Right,
            Key::Shoot => Action::Shoot,
        }
    }
}

/// Fixed per-frame input for a headless run.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    held: HeldActions,
    look: Vec2,
    scroll: f32,
    /// Tap shoot on every n-th frame (frame 0 included).
    fire_every: Option<u64>,
}

impl InputScript {
    pub fn new(keys: &[Key], look: Vec2, scroll: f32, fire_every: Option<u64>) -> Self {
        let mut held = HeldActions::default();
        for key in keys {
            held.set(Action::from(*key), true);
        }
        Self {
            held,
            look,
            scroll,
            fire_every: fire_every.filter(|n| *n > 0),
        }
    }

    /// Input for frame `index`. Scroll applies on the first frame only.
    pub fn snapshot(&self, index: u64) -> InputSnapshot {
        let mut held = self.held;
        if let Some(n) = self.fire_every {
            held.shoot = index % n == 0;
        }
        InputSnapshot {
            held,
            pointer_delta: self.look,
            scroll: if index == 0 { self.scroll } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_repeat_every_frame() {
        let script = InputScript::new(&[Key::Forward, Key::Left], Vec2::ZERO, 0.0, None);
        for i in 0..3 {
            let snap = script.snapshot(i);
            assert!(snap.held.forward && snap.held.left);
            assert!(!snap.held.shoot);
        }
    }

    #[test]
    fn fire_every_taps_shoot() {
        let script = InputScript::new(&[], Vec2::ZERO, 0.0, Some(3));
        let taps: Vec<bool> = (0..7).map(|i| script.snapshot(i).held.shoot).collect();
        assert_eq!(taps, [true, false, false, true, false, false, true]);
    }

    #[test]
    fn fire_every_overrides_held_shoot() {
        let script = InputScript::new(&[Key::Shoot], Vec2::ZERO, 0.0, Some(2));
        assert!(!script.snapshot(1).held.shoot);
    }

    #[test]
    fn zero_interval_means_no_tapping() {
        let script = InputScript::new(&[Key::Shoot], Vec2::ZERO, 0.0, Some(0));
        assert!(script.snapshot(1).held.shoot);
    }

    #[test]
    fn scroll_only_on_first_frame() {
        let script = InputScript::new(&[], Vec2::new(1.0, 0.0), 4.0, None);
        assert_eq!(script.snapshot(0).scroll, 4.0);
        assert_eq!(script.snapshot(1).scroll, 0.0);
        assert_eq!(script.snapshot(1).pointer_delta, Vec2::new(1.0, 0.0));
    }
}
