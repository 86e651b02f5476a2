//! Input: actions, per-frame snapshots and edge triggers.
//!
//! # Invariants
//! - No windowing types cross this crate; applications translate their own
//!   events into [`Action`]s and pointer/scroll deltas.
//! - A snapshot is taken once per frame and resets the accumulated deltas.

pub mod action;
pub mod edge;
pub mod snapshot;

pub use action::{Action, HeldActions};
pub use edge::EdgeTrigger;
pub use snapshot::{InputSnapshot, InputState};
