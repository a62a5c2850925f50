//! Fixed-timestep accumulator

/// Drains variable frame deltas into whole fixed-size simulation ticks
///
/// Each outer frame adds its measured wall-clock delta to an accumulator;
/// the accumulator is then drained in `step`-sized ticks. The simulation
/// always sees the same constant dt regardless of frame-rate jitter, a slow
/// frame yields several ticks (no simulation time is lost), and the
/// remainder stays in the accumulator for the next frame.
#[derive(Clone, Debug)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    /// Create a driver with the given fixed step in seconds
    ///
    /// # Panics
    /// Panics if `step` is not strictly positive.
    pub fn new(step: f32) -> Self {
        assert!(step > 0.0, "fixed step must be positive");
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// The fixed step size in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time currently left in the accumulator, always in `[0, step)`
    /// outside of `advance`
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame's measured delta and return how many fixed ticks to run
    ///
    /// For a given total elapsed time the summed tick count is
    /// `floor(total / step)` no matter how the time was split across
    /// frames. Negative deltas are undefined input and are ignored.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }
}
