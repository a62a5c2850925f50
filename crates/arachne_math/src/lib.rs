//! Math types for the Arachne scene player
//!
//! This crate provides the small amount of linear algebra the player needs:
//!
//! - [`Vec3`] - 3D vector used for positions, Euler rotations, and scales
//! - [`mat4`] - Column-major 4x4 matrix helpers for building model, view,
//!   and projection matrices

pub mod mat4;
mod vec3;

pub use mat4::Mat4;
pub use vec3::Vec3;
