//! Ordered spline segments played back to back

use crate::Spline;
use arachne_math::Vec3;

/// A multi-stage motion: an ordered list of splines where exactly one
/// segment is active at a time
///
/// The active index is never stored; it is derived from completion flags on
/// every call, so a segment finishing mid-tick is reflected immediately.
/// [`Track::advance`] updates only the active segment, which is what makes
/// the segments sequential rather than simultaneous. The machine is strictly
/// forward-only: the active index never decreases, and once the last segment
/// finishes the track holds its final value indefinitely.
#[derive(Clone, Debug)]
pub struct Track {
    segments: Vec<Spline>,
}

impl Track {
    /// Create a track from an ordered list of segments
    ///
    /// # Panics
    /// Panics if `segments` is empty.
    pub fn new(segments: Vec<Spline>) -> Self {
        assert!(!segments.is_empty(), "track must have at least one segment");
        Self { segments }
    }

    /// Number of segments in the track
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Index of the currently active segment
    ///
    /// The first not-yet-done segment, or the last index once every prior
    /// segment has finished. Recomputed from completion flags on every call.
    pub fn active_index(&self) -> usize {
        self.segments
            .iter()
            .position(|s| !s.is_done())
            .unwrap_or(self.segments.len() - 1)
    }

    /// Advance the active segment's clock by `dt` and return the new active
    /// index
    ///
    /// All other segments stay frozen. The index is resolved before the
    /// update, matching the evaluation order of the choreography: a segment
    /// that was already done cedes its slot before any time is applied.
    pub fn advance(&mut self, dt: f32) -> usize {
        let index = self.active_index();
        self.segments[index].update(dt);
        index
    }

    /// Position of the active segment at its current time
    pub fn value(&self) -> Vec3 {
        self.segments[self.active_index()].position()
    }

    /// Whether the final segment has run its full duration
    pub fn is_finished(&self) -> bool {
        self.segments[self.segments.len() - 1].is_done()
    }

    /// Whether the segment at `index` has finished
    ///
    /// # Panics
    /// Panics if `index` is out of bounds; segment indices are fixed at
    /// build time, so this is a programmer error.
    pub fn segment_done(&self, index: usize) -> bool {
        self.segments[index].is_done()
    }

    /// Sum of all segment durations in seconds
    pub fn total_duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_segment_track() -> Track {
        Track::new(vec![
            Spline::quadratic(
                Vec3::new(0.0, 2.0, -2.5),
                Vec3::new(0.0, 1.0, -2.5),
                Vec3::new(0.0, 0.5, -2.5),
                2.0,
            ),
            Spline::quadratic(
                Vec3::new(0.0, 0.5, -2.5),
                Vec3::new(0.0, 0.25, -2.5),
                Vec3::new(0.0, 0.0, -2.5),
                1.0,
            ),
        ])
    }

    #[test]
    fn test_starts_on_first_segment() {
        let track = two_segment_track();
        assert_eq!(track.active_index(), 0);
        assert_eq!(track.value(), Vec3::new(0.0, 2.0, -2.5));
        assert!(!track.is_finished());
    }

    #[test]
    fn test_advances_to_next_segment_on_completion() {
        let mut track = two_segment_track();
        track.advance(2.0);
        // Segment 0 just finished; the next tick resolves index 1
        assert_eq!(track.active_index(), 1);
        assert_eq!(track.value(), Vec3::new(0.0, 0.5, -2.5));
    }

    #[test]
    fn test_terminal_state_is_stable() {
        let mut track = two_segment_track();
        track.advance(2.0);
        track.advance(1.0);
        assert!(track.is_finished());
        assert_eq!(track.active_index(), 1);
        let final_value = track.value();
        assert_eq!(final_value, Vec3::new(0.0, 0.0, -2.5));

        // Repeated ticks with non-negative dt are idempotent
        for _ in 0..10 {
            track.advance(0.5);
            assert_eq!(track.active_index(), 1);
            assert_eq!(track.value(), final_value);
            assert!(track.is_finished());
        }
    }

    #[test]
    fn test_active_index_non_decreasing() {
        let mut track = two_segment_track();
        let mut last_index = 0;
        for _ in 0..400 {
            let index = track.advance(0.01);
            assert!(index >= last_index, "active index must never decrease");
            last_index = index;
        }
        assert_eq!(last_index, 1);
    }

    #[test]
    fn test_reaches_last_index_at_total_prior_duration() {
        let mut track = two_segment_track();
        // Exactly the first segment's duration, applied in uneven chunks
        track.advance(1.3);
        assert_eq!(track.active_index(), 0);
        track.advance(0.7);
        assert_eq!(track.active_index(), 1);
    }

    #[test]
    fn test_only_active_segment_advances() {
        let mut track = two_segment_track();
        track.advance(1.0);
        // Segment 1 has received no time: it still reports not done even
        // though half the first segment's duration has passed
        assert!(!track.segment_done(1));
        assert_eq!(track.active_index(), 0);
    }

    #[test]
    fn test_total_duration() {
        let track = two_segment_track();
        assert!((track.total_duration() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_overshoot_spills_into_nothing() {
        // dt past the end of a segment is *not* carried into the next one;
        // the remainder of the frame is simply absorbed
        let mut track = two_segment_track();
        track.advance(2.5);
        assert_eq!(track.active_index(), 1);
        // Segment 1 has not started yet
        assert_eq!(track.value(), Vec3::new(0.0, 0.5, -2.5));
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn test_empty_track_panics() {
        let _ = Track::new(Vec::new());
    }
}
