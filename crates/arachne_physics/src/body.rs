//! Sphere rigid body

use arachne_math::Vec3;

/// A sphere body with velocity, mass, and a restitution coefficient
#[derive(Clone, Copy, Debug)]
pub struct PhysicsBody {
    /// Center position
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Collision radius
    pub radius: f32,
    /// Mass (used to split positional corrections between a pair)
    pub mass: f32,
    /// Bounciness in [0, 1]
    pub restitution: f32,
    /// Whether gravity accelerates this body
    pub affected_by_gravity: bool,
}

impl PhysicsBody {
    /// Create a sphere body at rest
    pub fn new_sphere(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            mass: 1.0,
            restitution: 0.5,
            affected_by_gravity: true,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the restitution coefficient
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Enable or disable gravity for this body
    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.affected_by_gravity = enabled;
        self
    }

    /// Advance one fixed tick: apply gravity, then integrate velocity
    pub fn update(&mut self, dt: f32, gravity: f32) {
        if self.affected_by_gravity {
            self.velocity.y += gravity * dt;
        }
        self.position += self.velocity * dt;
    }

    /// Pairwise sphere test and response against another body
    ///
    /// On overlap, pushes both bodies apart along the contact normal (split
    /// by mass) and applies an impulse to the normal components of both
    /// velocities. Mutates contact state on both sides, as the caller's
    /// i < j iteration checks each unordered pair exactly once.
    pub fn check_collision(&mut self, other: &mut PhysicsBody) {
        let delta = other.position - self.position;
        let dist_sq = delta.length_squared();
        let min_dist = self.radius + other.radius;

        // Coincident centers produce no usable normal
        if dist_sq >= min_dist * min_dist || dist_sq <= 1e-8 {
            return;
        }

        let dist = dist_sq.sqrt();
        let penetration = min_dist - dist;
        let normal = delta / dist;

        // Positional correction split by mass
        let total_mass = self.mass + other.mass;
        self.position -= normal * (penetration * (other.mass / total_mass));
        other.position += normal * (penetration * (self.mass / total_mass));

        // Impulse along the normal if the pair is closing
        let relative = other.velocity - self.velocity;
        let closing = relative.dot(normal);
        if closing < 0.0 {
            let restitution = 0.5 * (self.restitution + other.restitution);
            let impulse = -(1.0 + restitution) * closing / total_mass;
            self.velocity -= normal * (impulse * other.mass);
            other.velocity += normal * (impulse * self.mass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_application() {
        let mut body = PhysicsBody::new_sphere(Vec3::new(0.0, 10.0, 0.0), 0.5);
        body.update(0.1, -20.0);
        // 0 + (-20) * 0.1 = -2.0
        assert!((body.velocity.y - (-2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_integration() {
        let mut body = PhysicsBody::new_sphere(Vec3::ZERO, 0.5)
            .with_velocity(Vec3::new(10.0, 0.0, 0.0))
            .with_gravity(false);
        body.update(1.0, -20.0);
        assert!((body.position.x - 10.0).abs() < 1e-4);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_gravity_disabled_body() {
        let mut body = PhysicsBody::new_sphere(Vec3::new(0.0, 10.0, 0.0), 0.5)
            .with_gravity(false);
        body.update(1.0, -20.0);
        assert_eq!(body.position.y, 10.0);
    }

    #[test]
    fn test_separated_pair_untouched() {
        let mut a = PhysicsBody::new_sphere(Vec3::ZERO, 0.5);
        let mut b = PhysicsBody::new_sphere(Vec3::new(5.0, 0.0, 0.0), 0.5);
        a.check_collision(&mut b);
        assert_eq!(a.position, Vec3::ZERO);
        assert_eq!(b.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_overlapping_pair_separates() {
        let mut a = PhysicsBody::new_sphere(Vec3::ZERO, 0.5);
        let mut b = PhysicsBody::new_sphere(Vec3::new(0.6, 0.0, 0.0), 0.5);
        a.check_collision(&mut b);
        let distance = (b.position - a.position).length();
        assert!(distance >= 1.0 - 1e-4, "pair should no longer penetrate");
    }

    #[test]
    fn test_correction_split_by_mass() {
        let mut heavy = PhysicsBody::new_sphere(Vec3::ZERO, 0.5).with_mass(10.0);
        let mut light = PhysicsBody::new_sphere(Vec3::new(0.5, 0.0, 0.0), 0.5).with_mass(1.0);
        heavy.check_collision(&mut light);
        // The light body moves much further than the heavy one
        assert!(light.position.x.abs() > heavy.position.x.abs() * 5.0);
    }

    #[test]
    fn test_closing_velocities_reflect() {
        let mut a = PhysicsBody::new_sphere(Vec3::ZERO, 0.5)
            .with_velocity(Vec3::new(1.0, 0.0, 0.0))
            .with_restitution(1.0);
        let mut b = PhysicsBody::new_sphere(Vec3::new(0.9, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(-1.0, 0.0, 0.0))
            .with_restitution(1.0);
        a.check_collision(&mut b);
        // Equal masses, head-on, perfect restitution: velocities swap sign
        assert!(a.velocity.x < 0.0);
        assert!(b.velocity.x > 0.0);
    }

    #[test]
    fn test_receding_pair_keeps_velocity() {
        let mut a = PhysicsBody::new_sphere(Vec3::ZERO, 0.5)
            .with_velocity(Vec3::new(-1.0, 0.0, 0.0));
        let mut b = PhysicsBody::new_sphere(Vec3::new(0.9, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(1.0, 0.0, 0.0));
        a.check_collision(&mut b);
        // Overlapping but already separating: positions correct, velocities keep
        assert_eq!(a.velocity.x, -1.0);
        assert_eq!(b.velocity.x, 1.0);
    }
}
