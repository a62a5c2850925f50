//! Segment state machine driving the choreography
//!
//! The [`Sequencer`] owns the [`Script`] and, once per simulation tick,
//! advances the primary path plus whatever auxiliary splines the current
//! stage animates, then assembles an immutable [`FrameSnapshot`]. Everything
//! downstream (physics positioning, rendering) reads the snapshot and never
//! touches spline state, so evaluation order cannot change what a frame
//! shows.

use crate::scene::script::{Script, EYE_REST};
use arachne_math::Vec3;
use bitflags::bitflags;
use std::f32::consts::{FRAC_PI_2, PI};

bitflags! {
    /// Which actors are visible during a stage
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DrawSet: u8 {
        const SPIDER = 1 << 0;
        const HAND = 1 << 1;
        const EYES = 1 << 2;
    }
}

/// Where a stage takes the spider's Euler angles from
#[derive(Debug, Clone, Copy)]
enum RotationSource {
    /// A full fixed Euler triple
    Fixed(Vec3),
    /// The x angle from the given auxiliary rotation spline, with the
    /// scene's base y/z orientation
    Curve(usize),
}

/// Per-stage behavior: which splines tick and what the frame shows
///
/// A rotation spline listed in `advance_rotation` only receives time while
/// its stage is active; afterwards it freezes at its final value, which is
/// how an orientation reached in one stage persists through the next.
#[derive(Debug, Clone, Copy)]
struct Stage {
    advance_rotation: Option<usize>,
    spider_rotation: RotationSource,
    hand_position: Vec3,
    animate_hand: bool,
    draw: DrawSet,
}

const HAND_FAR: Vec3 = Vec3::new(0.0, -0.3, -5.0);
const HAND_NEAR: Vec3 = Vec3::new(0.0, -0.3, -4.0);
const HAND_RECOIL: Vec3 = Vec3::new(0.0, -0.3, -7.5);

const STAGES: [Stage; 8] = [
    // Descend toward the hand
    Stage {
        advance_rotation: None,
        spider_rotation: RotationSource::Fixed(Vec3::new(0.0, FRAC_PI_2, FRAC_PI_2)),
        hand_position: HAND_FAR,
        animate_hand: false,
        draw: DrawSet::SPIDER.union(DrawSet::HAND),
    },
    // Settle while tipping forward
    Stage {
        advance_rotation: Some(0),
        spider_rotation: RotationSource::Curve(0),
        hand_position: HAND_FAR,
        animate_hand: false,
        draw: DrawSet::SPIDER.union(DrawSet::HAND),
    },
    // Sit still
    Stage {
        advance_rotation: None,
        spider_rotation: RotationSource::Curve(0),
        hand_position: HAND_FAR,
        animate_hand: false,
        draw: DrawSet::SPIDER.union(DrawSet::HAND),
    },
    // Hold, hand drawn closer
    Stage {
        advance_rotation: None,
        spider_rotation: RotationSource::Curve(0),
        hand_position: HAND_NEAR,
        animate_hand: false,
        draw: DrawSet::SPIDER.union(DrawSet::HAND),
    },
    // Bite
    Stage {
        advance_rotation: None,
        spider_rotation: RotationSource::Curve(0),
        hand_position: HAND_NEAR,
        animate_hand: false,
        draw: DrawSet::SPIDER.union(DrawSet::HAND),
    },
    // Hold after the bite
    Stage {
        advance_rotation: None,
        spider_rotation: RotationSource::Curve(0),
        hand_position: HAND_NEAR,
        animate_hand: false,
        draw: DrawSet::SPIDER.union(DrawSet::HAND),
    },
    // Fall while the hand recoils
    Stage {
        advance_rotation: Some(1),
        spider_rotation: RotationSource::Curve(1),
        hand_position: HAND_RECOIL,
        animate_hand: true,
        draw: DrawSet::SPIDER.union(DrawSet::HAND),
    },
    // Zoom into the face; the eyes take over
    Stage {
        advance_rotation: None,
        spider_rotation: RotationSource::Fixed(Vec3::new(0.0, -FRAC_PI_2, PI)),
        hand_position: HAND_RECOIL,
        animate_hand: false,
        draw: DrawSet::SPIDER.union(DrawSet::EYES),
    },
];

/// Which eyes converge toward which resting slot
///
/// Entry `i` of `Script::eye_convergence` moves the eye at `MOVING_EYES[i]`;
/// the first three head for eye 2, the rest for eye 3, which both stay put.
const MOVING_EYES: [usize; 6] = [0, 4, 5, 3, 6, 7];

/// What the eight eyes are doing this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EyeTableau {
    /// Not visible (the spider has not landed in front of the camera yet)
    Hidden,
    /// Eight individual eyes, each at its current convergence position
    Merging([Vec3; 8]),
    /// Two large composite eyes with pupils
    Merged,
}

/// Immutable per-tick output of the sequencer
///
/// Built once per tick and handed to every consumer; nothing downstream can
/// observe a half-updated choreography.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    /// Active stage index, 0..=7
    pub stage: usize,
    pub spider_position: Vec3,
    /// Spider Euler angles, applied x then y then z
    pub spider_rotation: Vec3,
    pub hand_position: Vec3,
    /// Hand Euler angles
    pub hand_rotation: Vec3,
    pub eyes: EyeTableau,
    pub draw: DrawSet,
}

/// Drives the [`Script`] forward and emits one [`FrameSnapshot`] per tick
pub struct Sequencer {
    script: Script,
}

impl Sequencer {
    pub fn new(script: Script) -> Self {
        Self { script }
    }

    /// Advance the choreography by `dt` seconds and snapshot the result
    ///
    /// The active stage is resolved before any time is applied, so a stage
    /// that finished last tick cedes its slot before this tick's `dt` lands.
    pub fn tick(&mut self, dt: f32) -> FrameSnapshot {
        let stage_index = self.script.spider_path.advance(dt);
        let stage = &STAGES[stage_index];

        if let Some(rotation) = stage.advance_rotation {
            self.script.spider_rotations[rotation].update(dt);
        }
        if stage.animate_hand {
            self.script.hand_rotation.update(dt);
        }

        // Path completion is checked after the path update: the tick that
        // lands the final segment already shows the eyes and spends its dt
        // on the convergence splines
        let eyes = if stage.draw.contains(DrawSet::EYES) && self.script.spider_path.is_finished()
        {
            self.eye_tableau(dt)
        } else {
            EyeTableau::Hidden
        };

        let spider_rotation = match stage.spider_rotation {
            RotationSource::Fixed(euler) => euler,
            RotationSource::Curve(index) => {
                let x = self.script.spider_rotations[index].position().x;
                Vec3::new(x, FRAC_PI_2, FRAC_PI_2)
            }
        };

        FrameSnapshot {
            stage: stage_index,
            spider_position: self.script.spider_path.value(),
            spider_rotation,
            hand_position: stage.hand_position,
            hand_rotation: self.script.hand_rotation.position(),
            eyes,
            draw: stage.draw,
        }
    }

    /// Whether the primary path has played out entirely
    pub fn path_finished(&self) -> bool {
        self.script.spider_path.is_finished()
    }

    /// Whether the eyes have fully merged
    pub fn eyes_merged(&self) -> bool {
        self.script.eye_convergence.iter().all(|s| s.is_done())
    }

    /// Resolve the eye state once the final path segment has landed
    fn eye_tableau(&mut self, dt: f32) -> EyeTableau {
        if self.eyes_merged() {
            return EyeTableau::Merged;
        }
        for spline in &mut self.script.eye_convergence {
            spline.update(dt);
        }
        let mut positions = EYE_REST;
        for (spline, &eye) in self.script.eye_convergence.iter().zip(MOVING_EYES.iter()) {
            positions[eye] = spline.position();
        }
        EyeTableau::Merging(positions)
    }
}
