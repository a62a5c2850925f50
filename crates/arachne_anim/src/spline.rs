//! Time-bounded Bezier path evaluator

use arachne_math::Vec3;

/// Control points of a Bezier spline
///
/// Quadratic splines bend toward a single interior control point; cubic
/// splines take two and can form S-curves.
#[derive(Clone, Copy, Debug)]
enum ControlPoints {
    Quadratic([Vec3; 3]),
    Cubic([Vec3; 4]),
}

impl ControlPoints {
    fn first(&self) -> Vec3 {
        match self {
            ControlPoints::Quadratic(p) => p[0],
            ControlPoints::Cubic(p) => p[0],
        }
    }

    fn last(&self) -> Vec3 {
        match self {
            ControlPoints::Quadratic(p) => p[2],
            ControlPoints::Cubic(p) => p[3],
        }
    }

    /// Evaluate the Bezier blend at normalized time `t` in [0, 1]
    fn evaluate(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        match self {
            ControlPoints::Quadratic([p0, p1, p2]) => {
                *p0 * (u * u) + *p1 * (2.0 * u * t) + *p2 * (t * t)
            }
            ControlPoints::Cubic([p0, p1, p2, p3]) => {
                *p0 * (u * u * u)
                    + *p1 * (3.0 * u * u * t)
                    + *p2 * (3.0 * u * t * t)
                    + *p3 * (t * t * t)
            }
        }
    }
}

/// A Bezier path played over a fixed duration
///
/// The spline owns its clock: [`Spline::update`] advances elapsed time,
/// saturating at the duration, and [`Spline::position`] evaluates the curve
/// at the normalized elapsed time. Once done a spline stays done.
#[derive(Clone, Copy, Debug)]
pub struct Spline {
    points: ControlPoints,
    duration: f32,
    elapsed: f32,
}

impl Spline {
    /// Create a quadratic spline from start, control point, and end
    ///
    /// # Panics
    /// Panics if `duration` is negative. A duration of exactly zero is
    /// allowed: the spline is born done and evaluates to `end`.
    pub fn quadratic(start: Vec3, control: Vec3, end: Vec3, duration: f32) -> Self {
        assert!(duration >= 0.0, "spline duration must not be negative");
        Self {
            points: ControlPoints::Quadratic([start, control, end]),
            duration,
            elapsed: 0.0,
        }
    }

    /// Create a cubic spline from start, two control points, and end
    ///
    /// # Panics
    /// Panics if `duration` is negative.
    pub fn cubic(start: Vec3, control_a: Vec3, control_b: Vec3, end: Vec3, duration: f32) -> Self {
        assert!(duration >= 0.0, "spline duration must not be negative");
        Self {
            points: ControlPoints::Cubic([start, control_a, control_b, end]),
            duration,
            elapsed: 0.0,
        }
    }

    /// Total duration of the path in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Elapsed time in seconds, clamped to `[0, duration]`
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the spline's clock by `dt` seconds, saturating at the duration
    ///
    /// Negative `dt` is undefined input and is clamped to zero rather than
    /// rewinding: completion is monotonic.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Whether the path has run its full duration
    ///
    /// Sticky: once this returns true it stays true for any sequence of
    /// `update` calls. A zero-duration spline is done from birth.
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Evaluate the path at the current normalized time
    ///
    /// At elapsed 0 this is exactly the first control point; at the full
    /// duration it is exactly the last. Zero-duration splines evaluate to
    /// their final point without dividing by zero.
    pub fn position(&self) -> Vec3 {
        if self.duration <= 0.0 {
            return self.points.last();
        }
        let t = self.elapsed / self.duration;
        if t <= 0.0 {
            self.points.first()
        } else if t >= 1.0 {
            self.points.last()
        } else {
            self.points.evaluate(t)
        }
    }
}
