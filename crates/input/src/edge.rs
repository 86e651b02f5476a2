/// Rising-edge detector for a held input.
///
/// Fires only on the frame where the input goes from released to held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    held_last_frame: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's held state; returns true on a rising edge.
    pub fn update(&mut self, held: bool) -> bool {
        let fired = held && !self.held_last_frame;
        self.held_last_frame = held;
        fired
    }
}
