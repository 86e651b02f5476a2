use crate::tuning::FlyTuning;
use glam::{Vec2, Vec3};
use showroom_input::HeldActions;

/// Free-fly camera with position, yaw and pitch in degrees.
///
/// Yaw -90 looks down -Z. Pitch is clamped to `±pitch_limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub pitch_limit: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(&FlyTuning::default())
    }
}

impl FlyCamera {
    pub fn new(tuning: &FlyTuning) -> Self {
        Self {
            position: tuning.start_position,
            yaw: tuning.yaw,
            pitch: tuning.pitch,
            speed: tuning.speed,
            sensitivity: tuning.sensitivity,
            pitch_limit: tuning.pitch_limit,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn move_forward(&mut self, dt: f32) {
        self.position += self.forward() * self.speed * dt;
    }

    pub fn move_backward(&mut self, dt: f32) {
        self.position -= self.forward() * self.speed * dt;
    }

    pub fn move_left(&mut self, dt: f32) {
        self.position -= self.right() * self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        self.position += self.right() * self.speed * dt;
    }

    /// Apply every held movement action for one frame.
    pub fn travel(&mut self, held: &HeldActions, dt: f32) {
        if held.forward {
            self.move_forward(dt);
        }
        if held.back {
            self.move_backward(dt);
        }
        if held.left {
            self.move_left(dt);
        }
        if held.right {
            self.move_right(dt);
        }
    }

    /// Pointer look. Downward pointer motion (+y) pitches the view down.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.sensitivity;
        self.pitch -= delta.y * self.sensitivity;
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }
}
