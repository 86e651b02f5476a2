use crate::camera::{ChaseCamera, Zoom};
use crate::tuning::{CameraCoupling, ChaseTuning, DrivingTuning};
use crate::vehicle::{DriveControls, Vehicle};
use showroom_input::InputSnapshot;

/// State of the driving demo: one vehicle and its chase camera.
#[derive(Debug, Clone)]
pub struct DrivingSim {
    tuning: DrivingTuning,
    vehicle: Vehicle,
    camera: ChaseCamera,
    zoom: Zoom,
    elapsed: f32,
    frames: u64,
}

impl DrivingSim {
    pub fn new(tuning: DrivingTuning, chase: ChaseTuning) -> Self {
        let vehicle = Vehicle::from_tuning(&tuning);
        let mut camera = ChaseCamera::new(chase);
        if chase.coupling == CameraCoupling::HeadingLocked {
            camera.yaw = vehicle.heading;
        }
        camera.follow(vehicle.position);
        Self {
            tuning,
            vehicle,
            camera,
            zoom: Zoom::default(),
            elapsed: 0.0,
            frames: 0,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn tuning(&self) -> &DrivingTuning {
        &self.tuning
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame from a captured input snapshot.
    pub fn step(&mut self, input: &InputSnapshot, dt: f32) {
        let _span = tracing::info_span!("driving_step", frame = self.frames).entered();

        let look = input.pointer_delta.x * self.camera.tuning().sensitivity;
        match self.camera.tuning().coupling {
            CameraCoupling::HeadingLocked => self.vehicle.heading -= look,
            CameraCoupling::Free => self.camera.yaw += look,
        }

        self.vehicle
            .step(DriveControls::from(&input.held), dt, &self.tuning);

        if self.camera.tuning().coupling == CameraCoupling::HeadingLocked {
            self.camera.yaw = self.vehicle.heading;
        }
        self.camera.follow(self.vehicle.position);
        self.zoom.apply_scroll(input.scroll);

        self.elapsed += dt;
        self.frames += 1;
        tracing::trace!(
            speed = self.vehicle.speed,
            heading = self.vehicle.heading,
            "vehicle stepped"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use showroom_input::Action;

    fn sim() -> DrivingSim {
        DrivingSim::new(DrivingTuning::default(), ChaseTuning::default())
    }

    #[test]
    fn starts_at_configured_pose() {
        let s = sim();
        assert_eq!(s.vehicle().position, Vec3::new(112.0, 26.5, -120.0));
        assert_eq!(s.vehicle().heading, 180.0);
        assert_eq!(s.camera().yaw, 180.0);
    }

    #[test]
    fn one_second_of_throttle_reaches_ten() {
        let mut s = sim();
        let input = InputSnapshot::holding(&[Action::Forward]);
        for _ in 0..60 {
            s.step(&input, 1.0 / 60.0);
        }
        assert!((s.vehicle().speed - 10.0).abs() < 1e-3);
        assert_eq!(s.frames(), 60);
    }

    #[test]
    fn heading_lock_turns_vehicle_with_pointer() {
        let mut s = sim();
        s.step(&InputSnapshot::default().with_pointer(50.0, 0.0), 1.0 / 60.0);
        assert!((s.vehicle().heading - 175.0).abs() < 1e-4);
        assert_eq!(s.camera().yaw, s.vehicle().heading);
    }

    #[test]
    fn camera_yaw_tracks_steering() {
        let mut s = sim();
        let input = InputSnapshot::holding(&[Action::Forward, Action::Left]);
        for _ in 0..120 {
            s.step(&input, 1.0 / 60.0);
            assert_eq!(s.camera().yaw, s.vehicle().heading);
        }
        assert!(s.vehicle().heading > 180.0);
    }

    #[test]
    fn free_coupling_leaves_heading_alone() {
        let chase = ChaseTuning {
            coupling: CameraCoupling::Free,
            ..ChaseTuning::default()
        };
        let mut s = DrivingSim::new(DrivingTuning::default(), chase);
        assert_eq!(s.camera().yaw, -90.0);
        s.step(&InputSnapshot::default().with_pointer(50.0, 0.0), 1.0 / 60.0);
        assert_eq!(s.vehicle().heading, 180.0);
        assert!((s.camera().yaw + 85.0).abs() < 1e-4);
    }

    #[test]
    fn camera_trails_behind_vehicle() {
        let mut s = sim();
        s.step(&InputSnapshot::default(), 1.0 / 60.0);
        let v = *s.vehicle();
        let behind = s.camera().position - v.position;
        // Heading 180 faces -Z, so the camera sits on +Z and above.
        assert!(behind.z > 21.0);
        assert!((behind.y - 8.0).abs() < 1e-4);
        assert!(s.camera().forward.dot(v.forward()) > 0.9);
    }

    #[test]
    fn scroll_zooms() {
        let mut s = sim();
        let mut input = InputSnapshot::default();
        input.scroll = 10.0;
        s.step(&input, 0.0);
        assert_eq!(s.zoom().fov, 35.0);
    }
}
