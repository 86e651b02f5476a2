//! wgpu render backend for showroom frames.
//!
//! Draws a procedural sky, a ground grid, lit instanced cubes and the
//! GPU-animated light field, all from a [`showroom_render::Frame`].
//!
//! # Invariants
//! - The renderer never sees simulation state, only frames.
//! - `uniforms::SceneUniforms` and `struct Scene` in the WGSL sources share
//!   one layout.
//! - The field height in WGSL matches `FieldWave::height` on the CPU.

mod context;
mod gpu;
pub mod shaders;
pub mod uniforms;

pub use context::{GpuContext, GpuInitError};
pub use gpu::{SurfacePass, WgpuRenderer};
