//! Rendering plumbing for the Arachne scene player
//!
//! This crate owns everything wgpu-facing:
//!
//! - [`context::RenderContext`] - Device, queue, and surface management
//! - [`mesh::MeshRegistry`] - GPU meshes loaded from OBJ files, addressed
//!   by copyable [`mesh::MeshKey`]s
//! - [`pipeline::ScenePipeline`] - Forward pipeline with per-frame
//!   projection/view uniforms and per-draw model/color uniforms
//! - [`matrix_stack::MatrixStack`] - Scoped model-matrix composition for
//!   building each draw's transform
//!
//! The animation core never touches GPU resources directly: it hands the
//! pipeline a list of [`pipeline::DrawCommand`]s holding mesh keys and
//! model matrices.

pub mod context;
pub mod matrix_stack;
pub mod mesh;
pub mod pipeline;

pub use context::{ContextError, RenderContext};
pub use matrix_stack::MatrixStack;
pub use mesh::{Mesh, MeshError, MeshKey, MeshRegistry};
pub use pipeline::{DrawCommand, FrameUniforms, ScenePipeline};
