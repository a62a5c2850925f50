//! Arachne - a choreographed real-time scene player
//!
//! The library half of the root crate: configuration, the hard-coded
//! choreography, and the simulation/render systems. The binary in
//! `main.rs` wires these into a winit event loop.

pub mod config;
pub mod scene;
pub mod systems;
