use crate::tuning::{CombatTuning, STOP_EPSILON};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use showroom_input::HeldActions;

/// The combat player: a position on the arena floor and a facing yaw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Degrees; follows the camera yaw every frame.
    pub yaw: f32,
}

impl Player {
    pub fn new(tuning: &CombatTuning) -> Self {
        Self {
            position: tuning.player_start,
            yaw: 0.0,
        }
    }

    /// Planar walk along camera-relative axes. Returns whether the player
    /// moved this frame.
    pub fn walk(
        &mut self,
        held: &HeldActions,
        forward: Vec3,
        right: Vec3,
        dt: f32,
        tuning: &CombatTuning,
    ) -> bool {
        let mut wish = Vec3::ZERO;
        if held.forward {
            wish += forward;
        }
        if held.back {
            wish -= forward;
        }
        if held.left {
            wish -= right;
        }
        if held.right {
            wish += right;
        }

        let moving = wish.length() > STOP_EPSILON;
        if moving {
            self.position += wish.normalize() * tuning.player_speed * dt;
        }
        let limit = tuning.arena_limit;
        self.position.x = self.position.x.clamp(-limit, limit);
        self.position.z = self.position.z.clamp(-limit, limit);
        moving
    }
}
