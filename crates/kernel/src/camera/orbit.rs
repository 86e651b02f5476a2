use crate::tuning::OrbitTuning;
use glam::{Vec2, Vec3};

/// Third-person camera orbiting a subject at fixed distance and height.
///
/// Yaw is unbounded; pitch is clamped to `±pitch_limit` on every pointer
/// update. Position and forward are derived by [`OrbitCamera::follow`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub position: Vec3,
    pub forward: Vec3,
    tuning: OrbitTuning,
}

impl OrbitCamera {
    pub fn new(tuning: OrbitTuning) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            position: Vec3::new(0.0, tuning.height, tuning.distance),
            forward: Vec3::NEG_Z,
            tuning,
        }
    }

    pub fn tuning(&self) -> &OrbitTuning {
        &self.tuning
    }

    /// Apply a pointer delta: rightward motion swings the camera left around
    /// the subject, downward motion raises it.
    pub fn apply_pointer(&mut self, delta: Vec2) {
        let scaled = delta * self.tuning.sensitivity;
        self.yaw -= scaled.x;
        let limit = self.tuning.pitch_limit;
        self.pitch = (self.pitch + scaled.y).clamp(-limit, limit);
    }

    /// Offset from subject to camera for the current yaw and pitch.
    pub fn offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let d = self.tuning.distance;
        Vec3::new(
            d * sin_yaw * cos_pitch,
            self.tuning.height + d * sin_pitch,
            d * cos_yaw * cos_pitch,
        )
    }

    /// Re-derive position and forward around `subject`.
    pub fn follow(&mut self, subject: Vec3) {
        self.position = subject + self.offset();
        let look_at = self.look_at(subject);
        self.forward = (look_at - self.position).normalize_or_zero();
    }

    pub fn look_at(&self, subject: Vec3) -> Vec3 {
        subject + Vec3::Y * self.tuning.look_height
    }

    /// Planar forward the player walks along: opposite the camera offset.
    pub fn walk_forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(-sin_yaw, 0.0, -cos_yaw)
    }

    /// Planar right for walking, perpendicular to [`OrbitCamera::walk_forward`].
    pub fn walk_right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(OrbitTuning::default())
    }

    #[test]
    fn zero_angles_sit_behind_on_positive_z() {
        let cam = camera();
        let offset = cam.offset();
        assert!((offset - Vec3::new(0.0, 1.5, 3.0)).length() < 1e-6);
    }

    #[test]
    fn offset_matches_closed_form() {
        let mut cam = camera();
        cam.yaw = 30.0;
        cam.pitch = 20.0;
        let (y, p) = (30.0_f32.to_radians(), 20.0_f32.to_radians());
        let expected = Vec3::new(
            3.0 * y.sin() * p.cos(),
            1.5 + 3.0 * p.sin(),
            3.0 * y.cos() * p.cos(),
        );
        assert!((cam.offset() - expected).length() < 1e-5);
    }

    #[test]
    fn pitch_clamped_for_any_delta() {
        let mut cam = camera();
        for dy in [1.0e6_f32, -1.0e6, 450.0, -450.0, 3.0, f32::MAX, -f32::MAX] {
            cam.apply_pointer(Vec2::new(0.0, dy));
            assert!((-45.0..=45.0).contains(&cam.pitch), "pitch {}", cam.pitch);
        }
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut cam = camera();
        for _ in 0..100 {
            cam.apply_pointer(Vec2::new(-100.0, 0.0));
        }
        assert!((cam.yaw - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn rightward_pointer_decreases_yaw() {
        let mut cam = camera();
        cam.apply_pointer(Vec2::new(10.0, 0.0));
        assert!((cam.yaw + 1.0).abs() < 1e-6);
    }

    #[test]
    fn follow_looks_at_point_above_subject() {
        let mut cam = camera();
        let subject = Vec3::new(1.0, 0.0, -2.0);
        cam.follow(subject);
        assert!((cam.position - (subject + Vec3::new(0.0, 1.5, 3.0))).length() < 1e-5);
        let expected = (cam.look_at(subject) - cam.position).normalize();
        assert!((cam.forward - expected).length() < 1e-5);
        assert!((cam.forward.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn walk_axes_are_planar_and_orthogonal() {
        let mut cam = camera();
        cam.yaw = 37.0;
        cam.pitch = 40.0;
        assert_eq!(cam.walk_forward().y, 0.0);
        assert!(cam.walk_forward().dot(cam.walk_right()).abs() < 1e-6);
        // walking forward heads away from the camera
        assert!(cam.walk_forward().dot(cam.offset()) < 0.0);
    }
}
