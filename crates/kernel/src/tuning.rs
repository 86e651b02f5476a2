//! Tunable constants for every demo.
//!
//! Every struct deserializes with `#[serde(default)]`, so a configuration
//! file only needs to name the values it changes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Below this magnitude a vehicle counts as stopped.
pub const STOP_EPSILON: f32 = 0.01;

/// Vehicle kinematics for the driving demo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivingTuning {
    /// Top forward speed, units/s. Reverse is capped at half of this.
    pub max_speed: f32,
    /// units/s²
    pub acceleration: f32,
    /// Deceleration when reversing against forward motion, units/s².
    pub brake: f32,
    /// Steering rate at full speed, degrees/s.
    pub turn_speed: f32,
    /// Coasting deceleration, units/s².
    pub friction: f32,
    /// Fraction of `turn_speed` available while stopped.
    pub inplace_factor: f32,
    /// Half-extent of the drivable square on x and z.
    pub bound: f32,
    pub start_position: Vec3,
    pub start_heading: f32,
}

impl Default for DrivingTuning {
    fn default() -> Self {
        Self {
            max_speed: 15.0,
            acceleration: 10.0,
            brake: 12.0,
            turn_speed: 90.0,
            friction: 4.0,
            inplace_factor: 0.6,
            bound: 500.0,
            start_position: Vec3::new(112.0, 26.5, -120.0),
            start_heading: 180.0,
        }
    }
}

impl DrivingTuning {
    pub fn min_speed(&self) -> f32 {
        -self.max_speed / 2.0
    }
}

/// How the chase camera's yaw relates to the vehicle heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraCoupling {
    /// Camera yaw is the vehicle heading; horizontal pointer motion steers.
    #[default]
    HeadingLocked,
    /// Pointer orbits the camera independently of the vehicle.
    Free,
}

/// Third-person chase camera for the driving demo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseTuning {
    pub distance: f32,
    pub height: f32,
    /// Fixed view pitch, degrees.
    pub pitch: f32,
    /// Initial yaw in free mode, degrees.
    pub initial_yaw: f32,
    /// Degrees per pointer unit.
    pub sensitivity: f32,
    pub coupling: CameraCoupling,
}

impl Default for ChaseTuning {
    fn default() -> Self {
        Self {
            distance: 22.0,
            height: 8.0,
            pitch: 0.0,
            initial_yaw: -90.0,
            sensitivity: 0.1,
            coupling: CameraCoupling::HeadingLocked,
        }
    }
}

/// Orbit camera around the combat player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitTuning {
    pub distance: f32,
    pub height: f32,
    /// Height of the look-at point above the subject.
    pub look_height: f32,
    pub sensitivity: f32,
    /// Symmetric pitch limit, degrees.
    pub pitch_limit: f32,
}

impl Default for OrbitTuning {
    fn default() -> Self {
        Self {
            distance: 3.0,
            height: 1.5,
            look_height: 1.0,
            sensitivity: 0.1,
            pitch_limit: 45.0,
        }
    }
}

/// Player, projectile and target parameters for the combat demo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub player_start: Vec3,
    pub player_speed: f32,
    /// Half-extent of the walkable square on x and z.
    pub arena_limit: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    /// Added to the player position (world axes) to place new projectiles.
    pub muzzle_offset: Vec3,
    pub target_speed: f32,
    pub spawn_interval: f32,
    /// Targets spawn uniformly in `[-spawn_range, spawn_range]` on x and z.
    pub spawn_range: f32,
    pub spawn_height: f32,
    pub min_spawn_distance: f32,
    pub max_spawn_attempts: u32,
    pub hit_distance: f32,
    /// Hits are measured to this point above a target's base.
    pub target_center_height: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            player_start: Vec3::new(0.0, 0.09, 0.0),
            player_speed: 2.5,
            arena_limit: 4.5,
            projectile_speed: 15.0,
            projectile_lifetime: 3.0,
            muzzle_offset: Vec3::new(-0.1, 0.8, 0.0),
            target_speed: 1.2,
            spawn_interval: 3.0,
            spawn_range: 4.0,
            spawn_height: 0.1,
            min_spawn_distance: 2.5,
            max_spawn_attempts: 32,
            hit_distance: 0.3,
            target_center_height: 0.75,
        }
    }
}

/// Free-fly camera for the lighting demo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyTuning {
    pub start_position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub pitch_limit: f32,
}

impl Default for FlyTuning {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 6.0, 18.0),
            yaw: -90.0,
            pitch: 0.0,
            speed: 2.5,
            sensitivity: 0.1,
            pitch_limit: 89.0,
        }
    }
}

/// Height animation of the instanced cube field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWave {
    pub amplitude: f32,
    /// Multiplies elapsed time before it reaches the wave.
    pub speed: f32,
    pub primary_freq: f32,
    pub secondary_freq: f32,
    pub ripple_freq: f32,
    pub height_exponent: f32,
}

impl Default for FieldWave {
    fn default() -> Self {
        Self {
            amplitude: 1.6,
            speed: 0.9,
            primary_freq: 1.8,
            secondary_freq: 0.9,
            ripple_freq: 0.95,
            height_exponent: 0.95,
        }
    }
}

/// Instanced-lighting demo parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingTuning {
    /// Cubes per side; the field holds `grid * grid` instances.
    pub grid: u32,
    pub spacing: f32,
    /// Cube footprint as a fraction of `spacing`.
    pub base_scale: f32,
    pub wave: FieldWave,
    pub camera: FlyTuning,
}

impl Default for LightingTuning {
    fn default() -> Self {
        Self {
            grid: 120,
            spacing: 0.13,
            base_scale: 0.85,
            wave: FieldWave::default(),
            camera: FlyTuning::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_cap_is_half_top_speed() {
        let t = DrivingTuning::default();
        assert_eq!(t.min_speed(), -7.5);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let t: CombatTuning = serde_json::from_str(r#"{ "hit_distance": 0.5 }"#).unwrap();
        assert_eq!(t.hit_distance, 0.5);
        assert_eq!(t.spawn_interval, 3.0);
        assert_eq!(t.min_spawn_distance, 2.5);
    }

    #[test]
    fn coupling_parses_snake_case() {
        let t: ChaseTuning = serde_json::from_str(r#"{ "coupling": "free" }"#).unwrap();
        assert_eq!(t.coupling, CameraCoupling::Free);
        assert_eq!(t.distance, 22.0);
    }
}
