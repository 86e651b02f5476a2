//! Cameras. All angles are degrees.

mod chase;
mod fly;
mod orbit;
mod zoom;

pub use chase::ChaseCamera;
pub use fly::FlyCamera;
pub use orbit::OrbitCamera;
pub use zoom::Zoom;
