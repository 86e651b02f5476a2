use crate::tuning::{DrivingTuning, STOP_EPSILON};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use showroom_common::{clamp_planar, heading_forward};
use showroom_input::HeldActions;

/// Held driving controls for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveControls {
    pub throttle: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveControls {
    /// +1 steers left, -1 steers right; right wins when both are held.
    pub fn steer(&self) -> f32 {
        if self.right {
            -1.0
        } else if self.left {
            1.0
        } else {
            0.0
        }
    }

    fn pedal(&self) -> bool {
        self.throttle || self.reverse
    }
}

impl From<&HeldActions> for DriveControls {
    fn from(held: &HeldActions) -> Self {
        Self {
            throttle: held.forward,
            reverse: held.back,
            left: held.left,
            right: held.right,
        }
    }
}

/// Vehicle pose and speed.
///
/// `heading` is in degrees about +Y, 0 facing +Z. `speed` is signed:
/// positive forward, negative reverse, and always within
/// `[-max_speed / 2, max_speed]` after [`Vehicle::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub position: Vec3,
    pub heading: f32,
    pub speed: f32,
}

impl Vehicle {
    pub fn at(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            heading,
            speed: 0.0,
        }
    }

    pub fn from_tuning(tuning: &DrivingTuning) -> Self {
        Self::at(tuning.start_position, tuning.start_heading)
    }

    pub fn forward(&self) -> Vec3 {
        heading_forward(self.heading)
    }

    pub fn is_stopped(&self) -> bool {
        self.speed.abs() <= STOP_EPSILON
    }

    /// Advance one frame: pedals, speed clamp, coasting friction, steering,
    /// then position along the new heading.
    pub fn step(&mut self, controls: DriveControls, dt: f32, tuning: &DrivingTuning) {
        if controls.throttle {
            self.speed += tuning.acceleration * dt;
        } else if controls.reverse {
            if self.speed > 0.0 {
                self.speed -= tuning.brake * dt;
            } else {
                self.speed -= tuning.acceleration * dt;
            }
        }
        self.speed = self.speed.clamp(tuning.min_speed(), tuning.max_speed);

        if !controls.pedal() {
            self.speed = coast(self.speed, tuning.friction * dt);
        }

        self.heading += self.turn_rate(controls.steer(), tuning) * dt;
        self.position += self.forward() * self.speed * dt;
        self.position = clamp_planar(self.position, tuning.bound);
    }

    /// Heading change in degrees/s for the given steering input.
    ///
    /// Authority scales with signed speed, so reversing inverts the apparent
    /// steering. A stopped vehicle turns in place at a fixed reduced rate.
    pub fn turn_rate(&self, steer: f32, tuning: &DrivingTuning) -> f32 {
        if self.is_stopped() {
            tuning.turn_speed * tuning.inplace_factor * steer
        } else {
            tuning.turn_speed * (self.speed / tuning.max_speed) * steer
        }
    }
}

/// Decay `speed` toward zero by `decel` without crossing it.
fn coast(speed: f32, decel: f32) -> f32 {
    if speed.abs() <= STOP_EPSILON {
        0.0
    } else if speed > 0.0 {
        (speed - decel).max(0.0)
    } else {
        (speed + decel).min(0.0)
    }
}
