//! Physics collaborator for the Arachne scene player
//!
//! The renderer treats this crate as an opaque simulation: bodies expose
//! `update` and `check_collision`, and [`PhysicsSet`] runs one fixed tick
//! of pairwise checks followed by per-body integration. The fixed-step
//! driver in the application is the only caller of [`PhysicsSet::step`].

mod body;
mod set;

pub use body::PhysicsBody;
pub use set::{PhysicsConfig, PhysicsSet, StepReport};
