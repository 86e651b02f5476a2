use crate::tuning::ChaseTuning;
use glam::Vec3;

/// Chase camera trailing a vehicle.
///
/// The camera sits `distance` back along its own view direction and
/// `height` above the subject, then aims straight at the subject.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub position: Vec3,
    pub forward: Vec3,
    tuning: ChaseTuning,
}

impl ChaseCamera {
    pub fn new(tuning: ChaseTuning) -> Self {
        Self {
            yaw: tuning.initial_yaw,
            pitch: tuning.pitch,
            position: Vec3::ZERO,
            forward: Vec3::Z,
            tuning,
        }
    }

    pub fn tuning(&self) -> &ChaseTuning {
        &self.tuning
    }

    /// View direction for the current yaw and pitch, using the same
    /// convention as vehicle heading (yaw 0 looks along +Z).
    pub fn view_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn follow(&mut self, subject: Vec3) {
        self.position =
            subject - self.view_direction() * self.tuning.distance + Vec3::Y * self.tuning.height;
        self.forward = (subject - self.position).normalize_or_zero();
    }
}
