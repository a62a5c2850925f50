//! End-to-end choreography playback
//!
//! Drives the full timeline at a render-rate delta and checks the story
//! beats: stage order, pose hand-offs, the eye convergence, and the stable
//! terminal tableau.

use arachne::scene::{DrawSet, EyeTableau, Script, Sequencer};
use arachne_anim::{Spline, Track};
use arachne_math::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

const FRAME_DT: f32 = 1.0 / 60.0;

#[test]
fn full_timeline_plays_every_stage_in_order() {
    let mut seq = Sequencer::new(Script::new());
    let mut seen = Vec::new();
    let mut last_stage = 0;

    // 9.35s of path, 3s of convergence, plus slack
    for _ in 0..(15.0 / FRAME_DT) as usize {
        let frame = seq.tick(FRAME_DT);
        assert!(frame.stage >= last_stage, "stage index must never decrease");
        if seen.last() != Some(&frame.stage) {
            seen.push(frame.stage);
        }
        last_stage = frame.stage;
    }

    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn hand_leaves_the_frame_for_the_finale() {
    let mut seq = Sequencer::new(Script::new());
    let mut hand_drawn_stages = Vec::new();
    for _ in 0..(15.0 / FRAME_DT) as usize {
        let frame = seq.tick(FRAME_DT);
        if frame.draw.contains(DrawSet::HAND) && hand_drawn_stages.last() != Some(&frame.stage) {
            hand_drawn_stages.push(frame.stage);
        }
    }
    assert_eq!(hand_drawn_stages, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn eyes_hidden_until_the_spider_lands() {
    let mut seq = Sequencer::new(Script::new());
    // The eyes stay off screen through the whole path, including the final
    // zoom, and appear on the tick that lands its last segment
    loop {
        let frame = seq.tick(FRAME_DT);
        if seq.path_finished() {
            assert_ne!(frame.eyes, EyeTableau::Hidden);
            break;
        }
        assert_eq!(frame.eyes, EyeTableau::Hidden);
    }
}

#[test]
fn finale_ends_merged_and_stays_merged() {
    let mut seq = Sequencer::new(Script::new());
    let mut frame = seq.tick(0.0);
    for _ in 0..(15.0 / FRAME_DT) as usize {
        frame = seq.tick(FRAME_DT);
    }
    assert_eq!(frame.stage, 7);
    assert_eq!(frame.eyes, EyeTableau::Merged);
    assert_eq!(frame.spider_rotation, Vec3::new(0.0, -FRAC_PI_2, PI));
    let final_position = frame.spider_position;
    assert!(final_position.max_abs_diff(Vec3::new(0.0, 0.0, -0.3)) < 1e-4);

    // Another ten seconds changes nothing
    for _ in 0..(10.0 / FRAME_DT) as usize {
        let frame = seq.tick(FRAME_DT);
        assert_eq!(frame.eyes, EyeTableau::Merged);
        assert_eq!(frame.spider_position, final_position);
    }
}

#[test]
fn two_segment_track_walks_segments_in_order() {
    // A descent in two parts: 2s from y=2 to y=0.5, then 1s to y=0
    let mut track = Track::new(vec![
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
    ]);

    assert_eq!(track.value(), Vec3::new(0.0, 2.0, -2.5));

    let mut ticks = 0;
    while !track.segment_done(0) {
        assert_eq!(track.active_index(), 0);
        track.advance(FRAME_DT);
        ticks += 1;
        assert!(ticks < 200, "first segment must finish in about 120 ticks");
    }
    // Hand-off point: segment 1 takes over at exactly the shared endpoint
    assert_eq!(track.value(), Vec3::new(0.0, 0.5, -2.5));

    while !track.is_finished() {
        assert_eq!(track.active_index(), 1);
        track.advance(FRAME_DT);
    }
    // Saturation lands the final value on the exact last control point
    assert_eq!(track.value(), Vec3::new(0.0, 0.0, -2.5));
}
