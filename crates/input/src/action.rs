use serde::{Deserialize, Serialize};

/// A logical input the demos react to.
///
/// Applications bind physical keys and buttons to actions; the simulation
/// only ever sees actions, never raw window events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Shoot,
    Quit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Back,
        Action::Left,
        Action::Right,
        Action::Shoot,
        Action::Quit,
    ];
}

/// Set of actions held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldActions {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
    pub quit: bool,
}

impl HeldActions {
    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::Forward => self.forward = held,
            Action::Back => self.back = held,
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Shoot => self.shoot = held,
            Action::Quit => self.quit = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Back => self.back,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Shoot => self.shoot,
            Action::Quit => self.quit,
        }
    }

    /// Any of the four movement actions.
    pub fn any_movement(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}
