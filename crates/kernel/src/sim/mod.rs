//! One explicit state struct per demo. Each consumes an input snapshot and
//! a frame delta; none of them touch windowing or GPU types.

mod driving;
mod lighting;
mod shooter;

pub use driving::DrivingSim;
pub use lighting::LightingSim;
pub use shooter::{CombatReport, CombatSim};
