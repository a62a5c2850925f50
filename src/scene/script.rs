//! Choreography spline data
//!
//! Everything here is compile-time data: the spider's eight-segment primary
//! path, its two auxiliary rotation splines, the hand's rotation spline for
//! the bite, and the six eye-convergence paths. Durations are seconds.

use arachne_anim::{Spline, Track};
use arachne_math::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

/// Resting positions of the eight eyes on the spider's face
pub const EYE_REST: [Vec3; 8] = [
    Vec3::new(-0.02, 0.01, -0.2),
    Vec3::new(-0.005, 0.01, -0.2),
    Vec3::new(0.005, 0.01, -0.2),
    Vec3::new(0.02, 0.01, -0.2),
    Vec3::new(-0.02, 0.0, -0.2),
    Vec3::new(-0.01, 0.0, -0.2),
    Vec3::new(0.01, 0.0, -0.2),
    Vec3::new(0.02, 0.0, -0.2),
];

/// All splines that drive the choreography
pub struct Script {
    /// Primary path: the spider's eight motion segments
    pub spider_path: Track,
    /// Auxiliary rotation splines (x-axis Euler angle in the x component)
    pub spider_rotations: Vec<Spline>,
    /// Hand rotation spline for the bite reaction
    pub hand_rotation: Spline,
    /// Eye convergence paths, in the order
    /// eye1, eye5, eye6 (toward eye 2) then eye4, eye7, eye8 (toward eye 3)
    pub eye_convergence: Vec<Spline>,
}

impl Script {
    /// Build the full choreography
    pub fn new() -> Self {
        let spider_path = Track::new(vec![
            // Lower down toward the hand
            Spline::quadratic(
                Vec3::new(0.0, 2.0, -2.5),
                Vec3::new(0.0, 1.0, -2.5),
                Vec3::new(0.0, 0.5, -2.5),
                2.0,
            ),
            // Slowly settle onto the hand
            Spline::quadratic(
                Vec3::new(0.0, 0.5, -2.5),
                Vec3::new(0.0, 0.25, -2.5),
                Vec3::new(0.0, 0.0, -2.5),
                1.0,
            ),
            // Sit still
            Spline::quadratic(
                Vec3::new(0.0, 0.0, -2.5),
                Vec3::new(0.0, 0.0, -2.5),
                Vec3::new(0.0, 0.0, -2.5),
                0.5,
            ),
            // Hold closer to the camera
            Spline::quadratic(
                Vec3::new(0.0, 0.0, -1.5),
                Vec3::new(0.0, 0.0, -1.5),
                Vec3::new(0.0, 0.0, -1.5),
                1.0,
            ),
            // Quick down-and-up bite
            Spline::quadratic(
                Vec3::new(0.0, 0.0, -1.5),
                Vec3::new(0.0, -0.1, -1.5),
                Vec3::new(0.0, 0.0, -1.5),
                0.1,
            ),
            // Hold after the bite
            Spline::quadratic(
                Vec3::new(0.0, 0.0, -1.5),
                Vec3::new(0.0, 0.0, -1.5),
                Vec3::new(0.0, 0.0, -1.5),
                0.75,
            ),
            // Arcing fall off the hand
            Spline::cubic(
                Vec3::new(0.0, 0.0, -5.0),
                Vec3::new(0.0, 1.0, -4.0),
                Vec3::new(0.0, -1.5, -3.0),
                Vec3::new(0.0, -1.5, -3.0),
                1.5,
            ),
            // Slow zoom toward the face
            Spline::quadratic(
                Vec3::new(0.0, -0.25, -1.0),
                Vec3::new(0.0, -0.125, -0.625),
                Vec3::new(0.0, 0.0, -0.3),
                2.5,
            ),
        ]);

        let spider_rotations = vec![
            // Tip forward onto the hand
            Spline::quadratic(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(-FRAC_PI_4, 0.0, 0.0),
                Vec3::new(-FRAC_PI_2, 0.0, 0.0),
                1.0,
            ),
            // Tumble during the fall
            Spline::quadratic(
                Vec3::new(-FRAC_PI_2, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(FRAC_PI_2, 0.0, 0.0),
                1.0,
            ),
        ];

        // The hand recoils when bitten
        let hand_rotation = Spline::quadratic(
            Vec3::new(FRAC_PI_8, 0.0, 0.0),
            Vec3::new(FRAC_PI_4, 0.0, 0.0),
            Vec3::new(FRAC_PI_8 + FRAC_PI_2, 0.0, 0.0),
            1.0,
        );

        // Eyes 1, 5, 6 converge on eye 2; eyes 4, 7, 8 on eye 3
        let converge = |from: Vec3, to: Vec3| Spline::quadratic(from, to, to, 3.0);
        let eye_convergence = vec![
            converge(EYE_REST[0], EYE_REST[1]),
            converge(EYE_REST[4], EYE_REST[1]),
            converge(EYE_REST[5], EYE_REST[1]),
            converge(EYE_REST[3], EYE_REST[2]),
            converge(EYE_REST[6], EYE_REST[2]),
            converge(EYE_REST[7], EYE_REST[2]),
        ];

        Self {
            spider_path,
            spider_rotations,
            hand_rotation,
            eye_convergence,
        }
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_shape() {
        let script = Script::new();
        assert_eq!(script.spider_path.len(), 8);
        assert_eq!(script.spider_rotations.len(), 2);
        assert_eq!(script.eye_convergence.len(), 6);
    }

    #[test]
    fn test_primary_path_duration() {
        let script = Script::new();
        // 2.0 + 1.0 + 0.5 + 1.0 + 0.1 + 0.75 + 1.5 + 2.5
        assert!((script.spider_path.total_duration() - 9.35).abs() < 1e-5);
    }

    #[test]
    fn test_path_starts_above_hand() {
        let script = Script::new();
        assert_eq!(script.spider_path.value(), Vec3::new(0.0, 2.0, -2.5));
    }

    #[test]
    fn test_convergence_ends_at_targets() {
        let script = Script::new();
        for (i, spline) in script.eye_convergence.iter().enumerate() {
            let mut s = *spline;
            s.update(3.0);
            let target = if i < 3 { EYE_REST[1] } else { EYE_REST[2] };
            assert_eq!(s.position(), target, "convergence spline {}", i);
        }
    }
}
