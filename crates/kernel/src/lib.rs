//! Simulation kernel: per-frame state transitions for the three demos.
//!
//! # Invariants
//! - Every update is a pure function of prior state, an input snapshot,
//!   the frame delta and (for spawning) an injected RNG.
//! - Nothing here allocates GPU or window resources.
//! - Update strictly precedes rendering; renderers read state, never write.

pub mod anim;
pub mod camera;
pub mod combat;
pub mod lights;
pub mod player;
pub mod rng;
pub mod sim;
pub mod spawn;
pub mod tuning;
pub mod vehicle;

pub use anim::{AnimationClip, AnimationPlayer, AnimationRegistry, AnimationSelector, Locomotion};
pub use camera::{ChaseCamera, FlyCamera, OrbitCamera, Zoom};
pub use combat::{CombatEvent, CombatFrame, CombatWorld, Projectile, Target};
pub use player::Player;
pub use rng::{SpawnRng, SplitMix64};
pub use sim::{CombatReport, CombatSim, DrivingSim, LightingSim};
pub use spawn::{SpawnArea, SpawnSample, SpawnTimer};
pub use tuning::{
    CameraCoupling, ChaseTuning, CombatTuning, DrivingTuning, FieldWave, FlyTuning,
    LightingTuning, OrbitTuning,
};
pub use vehicle::{DriveControls, Vehicle};
