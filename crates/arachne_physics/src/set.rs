//! Physics object collection and fixed-tick stepping

use crate::PhysicsBody;

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration (applied to Y-axis, negative = down)
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: -9.8 }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }
}

/// What one fixed tick did, for logging and tests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Number of unordered pairs tested this tick: k·(k−1)/2 for k bodies
    pub pair_checks: usize,
}

/// The set of physics bodies, stepped once per fixed tick
///
/// Bodies are kept in registration order and iterated in that order, so a
/// tick is fully deterministic: every unordered pair (i, j) with i < j is
/// checked exactly once, then every body integrates.
pub struct PhysicsSet {
    bodies: Vec<PhysicsBody>,
    config: PhysicsConfig,
}

impl PhysicsSet {
    /// Create an empty set with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create an empty set with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: Vec::new(),
            config,
        }
    }

    /// Add a body, returning its stable index
    pub fn add_body(&mut self, body: PhysicsBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Number of bodies in the set
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Immutable access to a body by index
    pub fn get_body(&self, index: usize) -> Option<&PhysicsBody> {
        self.bodies.get(index)
    }

    /// Iterate over all bodies in registration order
    pub fn iter(&self) -> impl Iterator<Item = &PhysicsBody> {
        self.bodies.iter()
    }

    /// Run one fixed tick: pairwise collision checks, then per-body updates
    ///
    /// Collision checks strictly precede integration, and both phases walk
    /// bodies in registration order.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let mut pair_checks = 0;

        for i in 0..self.bodies.len() {
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let body = &mut head[i];
            for other in tail.iter_mut() {
                body.check_collision(other);
                pair_checks += 1;
            }
        }

        for body in &mut self.bodies {
            body.update(dt, self.config.gravity);
        }

        log::trace!(
            "physics tick: {} bodies, {} pair checks",
            self.bodies.len(),
            pair_checks
        );

        StepReport { pair_checks }
    }
}

impl Default for PhysicsSet {
    fn default() -> Self {
        Self::new()
    }
}
