//! Animation kernel for the Arachne scene player
//!
//! This crate provides the timing machinery the choreography is built on:
//!
//! - [`Spline`] - A quadratic or cubic Bezier path evaluated over a bounded
//!   duration, with its own saturating clock
//! - [`Track`] - An ordered list of splines played back to back, with the
//!   active segment derived from completion state each tick
//! - [`FixedStep`] - A time accumulator that drains variable frame deltas
//!   into whole fixed-size simulation ticks
//!
//! There is deliberately no reset or rewind anywhere: splines and tracks
//! run forward once and then hold their final value.

mod spline;
mod stepper;
mod track;

pub use spline::Spline;
pub use stepper::FixedStep;
pub use track::Track;
