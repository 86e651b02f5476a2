//! Shared types for the showroom demos: transforms, heading conventions and
//! frame timing.

mod clock;
mod types;

pub use clock::{FrameClock, FrameTimer};
pub use types::{Transform, clamp_planar, heading_forward};
