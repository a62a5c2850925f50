//! The hard-coded choreography
//!
//! [`script`] holds the spline data (control points and durations) and
//! [`sequencer`] the segment state machine that turns it into one
//! [`sequencer::FrameSnapshot`] per render tick.

pub mod script;
pub mod sequencer;

pub use script::Script;
pub use sequencer::{DrawSet, EyeTableau, FrameSnapshot, Sequencer};
