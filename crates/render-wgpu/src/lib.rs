//! wgpu render backend for the random walk visualizer.
//!
//! Draws every walk as a line strip in its palette color, showing only the
//! revealed prefix. The camera looks at the origin from a scroll-adjustable
//! distance while the scene slowly rotates about +Y.
//!
//! # Invariants
//! - Renderer never mutates the walk scene.
//! - Vertex data is uploaded once; per frame only uniforms change.
//! - Shader and pipeline validation failures surface as `InitError`, never panics.

mod camera;
mod context;
mod error;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use context::GpuContext;
pub use error::InitError;
pub use gpu::LineRenderer;
