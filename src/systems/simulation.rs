//! Simulation loop: wall-clock time, fixed physics ticks, choreography
//!
//! One call to [`SimulationSystem::update`] per rendered frame. It measures
//! the frame delta, drains whole fixed steps into the physics set, then
//! advances the choreography once with the full frame delta. Physics ticks
//! for a frame therefore always land before that frame's snapshot.

use std::time::Instant;

use arachne_anim::FixedStep;
use arachne_physics::PhysicsSet;

use crate::config::SimulationConfig;
use crate::scene::{FrameSnapshot, Script, Sequencer};

/// Owns all time-dependent scene state
pub struct SimulationSystem {
    last_frame: Instant,
    max_frame_dt: f32,
    stepper: FixedStep,
    sequencer: Sequencer,
    physics: PhysicsSet,
}

impl SimulationSystem {
    /// Create the simulation from config, choreography, and physics set
    pub fn new(config: &SimulationConfig, script: Script, physics: PhysicsSet) -> Self {
        Self {
            last_frame: Instant::now(),
            max_frame_dt: config.max_frame_dt,
            stepper: FixedStep::new(config.physics_step),
            sequencer: Sequencer::new(script),
            physics,
        }
    }

    /// Run one frame against the wall clock
    pub fn update(&mut self) -> FrameSnapshot {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        // Cap dt so the first frame or a window-focus pause does not dump
        // seconds of catch-up work into one frame
        self.advance(raw_dt.min(self.max_frame_dt))
    }

    /// Run one frame with an explicit delta
    ///
    /// Fixed physics ticks drain first, then the choreography advances by
    /// the whole frame delta and yields the frame's snapshot.
    pub fn advance(&mut self, dt: f32) -> FrameSnapshot {
        let step = self.stepper.step();
        for _ in 0..self.stepper.advance(dt) {
            self.physics.step(step);
        }
        self.sequencer.tick(dt)
    }

    /// The physics bodies, for rendering
    pub fn physics(&self) -> &PhysicsSet {
        &self.physics
    }
}
