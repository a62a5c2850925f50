//! Application systems
//!
//! The simulation system owns time and all mutable scene state; the render
//! system owns the GPU. They meet only through frame snapshots and the
//! physics body list.

mod render;
mod simulation;

pub use render::{RenderError, RenderInitError, RenderSystem};
pub use simulation::SimulationSystem;
