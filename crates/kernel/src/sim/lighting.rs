use crate::camera::{FlyCamera, Zoom};
use crate::lights::{
    DirectionalLight, FieldInstance, MAX_POINT_LIGHTS, PointLight, SpotLight, field_instances,
    point_light_slots,
};
use crate::tuning::LightingTuning;
use showroom_input::InputSnapshot;

/// State of the instanced-lighting demo.
///
/// Only elapsed time and the fly camera change between frames; the light
/// rig and field heights are derived from them.
#[derive(Debug, Clone)]
pub struct LightingSim {
    tuning: LightingTuning,
    camera: FlyCamera,
    zoom: Zoom,
    instances: Vec<FieldInstance>,
    elapsed: f32,
}

impl LightingSim {
    pub fn new(tuning: LightingTuning) -> Self {
        let instances = field_instances(tuning.grid, tuning.spacing);
        tracing::debug!(count = instances.len(), "field instances built");
        Self {
            camera: FlyCamera::new(&tuning.camera),
            zoom: Zoom::default(),
            instances,
            elapsed: 0.0,
            tuning,
        }
    }

    pub fn tuning(&self) -> &LightingTuning {
        &self.tuning
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn instances(&self) -> &[FieldInstance] {
        &self.instances
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time value fed to the field wave this frame.
    pub fn wave_time(&self) -> f32 {
        self.tuning.wave.wave_time(self.elapsed)
    }

    pub fn point_lights(&self) -> [PointLight; MAX_POINT_LIGHTS] {
        point_light_slots(self.elapsed)
    }

    pub fn directional(&self) -> DirectionalLight {
        DirectionalLight::default()
    }

    pub fn spot(&self) -> SpotLight {
        SpotLight::from_camera(self.camera.position, self.camera.forward())
    }

    pub fn step(&mut self, input: &InputSnapshot, dt: f32) {
        let _span = tracing::info_span!("lighting_step", elapsed = self.elapsed).entered();
        self.camera.rotate(input.pointer_delta);
        self.camera.travel(&input.held, dt);
        self.zoom.apply_scroll(input.scroll);
        self.elapsed += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use showroom_input::Action;

    #[test]
    fn default_field_has_grid_squared_instances() {
        let sim = LightingSim::new(LightingTuning::default());
        assert_eq!(sim.instances().len(), 120 * 120);
    }

    #[test]
    fn lights_follow_elapsed_time() {
        let mut sim = LightingSim::new(LightingTuning::default());
        let before = sim.point_lights();
        sim.step(&InputSnapshot::default(), 0.5);
        let after = sim.point_lights();
        assert_ne!(before[0].position, after[0].position);
        assert!(after[3].is_dark());
        assert!((sim.wave_time() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn spotlight_rides_the_camera() {
        let mut sim = LightingSim::new(LightingTuning::default());
        sim.step(&InputSnapshot::holding(&[Action::Forward]), 1.0);
        let spot = sim.spot();
        assert_eq!(spot.position, sim.camera().position);
        assert!((spot.position - Vec3::new(0.0, 6.0, 15.5)).length() < 1e-4);
    }

    #[test]
    fn pointer_turns_camera() {
        let mut sim = LightingSim::new(LightingTuning::default());
        sim.step(&InputSnapshot::default().with_pointer(100.0, 0.0), 0.0);
        assert!((sim.camera().yaw + 80.0).abs() < 1e-4);
    }
}
