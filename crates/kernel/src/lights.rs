//! Light rig and instanced cube field for the lighting demo.
//!
//! Everything here is a closed-form function of elapsed time; nothing is
//! stored between frames.

use crate::tuning::FieldWave;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Slots a renderer reserves for point lights.
pub const MAX_POINT_LIGHTS: usize = 4;

/// Base colours of the three orbiting lights.
pub const ORBIT_COLORS: [Vec3; 3] = [
    Vec3::new(1.0, 0.55, 0.12),
    Vec3::new(0.12, 0.55, 1.0),
    Vec3::new(0.9, 0.2, 0.9),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl PointLight {
    /// A dark light parked below the scene; fills an unused slot.
    pub fn disabled() -> Self {
        Self {
            position: Vec3::new(0.0, -50.0, 0.0),
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.ambient == Vec3::ZERO && self.diffuse == Vec3::ZERO && self.specular == Vec3::ZERO
    }

    /// Colour used for the light's marker cube.
    pub fn color(&self) -> Vec3 {
        self.diffuse / 0.95
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.25),
            ambient: Vec3::new(0.02, 0.02, 0.03),
            diffuse: Vec3::new(0.32, 0.32, 0.36),
            specular: Vec3::splat(0.5),
        }
    }
}

/// Flashlight attached to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cosine of the outer cone angle.
    pub outer_cut_off: f32,
}

impl SpotLight {
    pub fn from_camera(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            cut_off: 12.5_f32.to_radians().cos(),
            outer_cut_off: 15.0_f32.to_radians().cos(),
        }
    }
}

/// The three coloured lights circling the field at `elapsed` seconds.
pub fn orbiting_lights(elapsed: f32) -> [PointLight; 3] {
    std::array::from_fn(|i| {
        let k = i as f32;
        let t = elapsed * (0.3 + 0.08 * k);
        let r = 6.5 + 1.2 * k;
        let swing = t * (0.6 + 0.1 * k);
        let position = Vec3::new(
            r * swing.cos(),
            1.8 + 0.8 * (t * (0.7 + 0.05 * k)).sin(),
            r * swing.sin(),
        );
        let pulse = 0.75 + 0.25 * (0.5 + 0.5 * (t * (0.9 + 0.06 * k)).sin());
        let color = ORBIT_COLORS[i] * pulse;
        PointLight {
            position,
            ambient: color * 0.02,
            diffuse: color * 0.95,
            specular: Vec3::ONE,
            constant: 1.0,
            linear: 0.07,
            quadratic: 0.017,
        }
    })
}

/// The orbiting lights plus one disabled slot.
pub fn point_light_slots(elapsed: f32) -> [PointLight; MAX_POINT_LIGHTS] {
    let [a, b, c] = orbiting_lights(elapsed);
    [a, b, c, PointLight::disabled()]
}

/// Per-instance data for one cube in the field, packed as `(x, z, phase, dist)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldInstance {
    pub x: f32,
    pub z: f32,
    pub phase: f32,
    /// Distance from the field centre on the ground plane.
    pub dist: f32,
}

impl FieldInstance {
    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.z, self.phase, self.dist]
    }
}

/// Row-major `grid × grid` layout centred on the origin.
pub fn field_instances(grid: u32, spacing: f32) -> Vec<FieldInstance> {
    let half = grid as f32 / 2.0;
    let mut out = Vec::with_capacity((grid as usize).pow(2));
    for i in 0..grid {
        for j in 0..grid {
            let x = (i as f32 - half) * spacing;
            let z = (j as f32 - half) * spacing;
            out.push(FieldInstance {
                x,
                z,
                phase: (i as f32 * 0.7 + j as f32 * 1.3) * 0.6,
                dist: (x * x + z * z).sqrt(),
            });
        }
    }
    out
}

impl FieldWave {
    /// Time fed to [`FieldWave::height`] after `elapsed` seconds.
    pub fn wave_time(&self, elapsed: f32) -> f32 {
        elapsed * self.speed
    }

    /// Extra height of a cube at wave time `time`, in `[0, amplitude]`.
    ///
    /// The wgpu field shader evaluates the same expression per vertex.
    pub fn height(&self, inst: &FieldInstance, time: f32) -> f32 {
        let primary = (inst.x * self.primary_freq + time + inst.phase).sin();
        let secondary = (inst.z * self.secondary_freq - time * 1.3).cos();
        let ripple = (inst.dist * self.ripple_freq * 4.0 - time * 2.0).sin();
        let unit = ((primary + secondary + ripple) / 3.0 * 0.5 + 0.5).clamp(0.0, 1.0);
        self.amplitude * unit.powf(self.height_exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_at_time_zero() {
        let lights = orbiting_lights(0.0);
        for (i, light) in lights.iter().enumerate() {
            let r = 6.5 + 1.2 * i as f32;
            assert!((light.position - Vec3::new(r, 1.8, 0.0)).length() < 1e-6);
            // pulse at t = 0 is 0.75 + 0.25 * 0.5
            let expected = ORBIT_COLORS[i] * 0.875;
            assert!((light.color() - expected).length() < 1e-5);
            assert_eq!(light.linear, 0.07);
            assert_eq!(light.quadratic, 0.017);
        }
    }

    #[test]
    fn lights_follow_closed_form() {
        let elapsed = 7.3_f32;
        let lights = orbiting_lights(elapsed);
        let i = 2.0_f32;
        let t = elapsed * (0.3 + 0.08 * i);
        let r = 6.5 + 1.2 * i;
        let expected = Vec3::new(
            r * (t * (0.6 + 0.1 * i)).cos(),
            1.8 + 0.8 * (t * (0.7 + 0.05 * i)).sin(),
            r * (t * (0.6 + 0.1 * i)).sin(),
        );
        assert!((lights[2].position - expected).length() < 1e-4);
    }

    #[test]
    fn lights_stay_on_their_orbit_radius() {
        for step in 0..100 {
            let lights = orbiting_lights(step as f32 * 0.37);
            for (i, light) in lights.iter().enumerate() {
                let planar = Vec3::new(light.position.x, 0.0, light.position.z).length();
                assert!((planar - (6.5 + 1.2 * i as f32)).abs() < 1e-3);
                assert!((0.999..=2.601).contains(&light.position.y));
            }
        }
    }

    #[test]
    fn fourth_slot_is_dark() {
        let slots = point_light_slots(3.0);
        assert!(slots[3].is_dark());
        assert!(slots[..3].iter().all(|l| !l.is_dark()));
    }

    #[test]
    fn spotlight_cone_cosines() {
        let spot = SpotLight::from_camera(Vec3::ZERO, Vec3::NEG_Z);
        assert!(spot.cut_off > spot.outer_cut_off);
        assert!((spot.cut_off - 0.976_296).abs() < 1e-5);
    }

    #[test]
    fn field_layout() {
        let field = field_instances(120, 0.13);
        assert_eq!(field.len(), 14_400);
        let first = field[0];
        assert!((first.x + 60.0 * 0.13).abs() < 1e-5);
        assert!((first.z + 60.0 * 0.13).abs() < 1e-5);
        assert_eq!(first.phase, 0.0);
        // i = 0, j = 1
        let next = field[1];
        assert!((next.phase - 1.3 * 0.6).abs() < 1e-6);
        assert!((next.dist - (next.x * next.x + next.z * next.z).sqrt()).abs() < 1e-6);
        // i = 60, j = 60 sits on the origin
        let centre = field[60 * 120 + 60];
        assert_eq!(centre.to_array()[3], 0.0);
    }

    #[test]
    fn height_bounded_by_amplitude() {
        let wave = FieldWave::default();
        let field = field_instances(16, 0.13);
        for step in 0..50 {
            let time = wave.wave_time(step as f32 * 0.21);
            for inst in &field {
                let h = wave.height(inst, time);
                assert!((0.0..=wave.amplitude + 1e-5).contains(&h), "height {h}");
            }
        }
    }

    #[test]
    fn wave_time_scales_elapsed() {
        let wave = FieldWave::default();
        assert!((wave.wave_time(10.0) - 9.0).abs() < 1e-6);
    }
}
