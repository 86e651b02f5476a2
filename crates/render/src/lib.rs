//! Rendering adapter: renderer-agnostic frame description.
//!
//! # Invariants
//! - Renderers cannot mutate simulation state; they only see a [`Frame`].
//! - Every frame is derived from simulation state and its camera alone.
//!
//! A GPU backend and the [`DebugTextRenderer`] implement the same
//! [`Renderer`] trait, so headless runs exercise the same frame builders as
//! the window.

mod frame;
mod renderer;
pub mod scene;

pub use frame::{DrawItem, DrawKind, FieldDraw, Frame, GroundGrid, Lighting, RenderView, Sky};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{combat_frame, driving_frame, lighting_frame};
