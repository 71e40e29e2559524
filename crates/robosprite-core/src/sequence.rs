//! Pose sequencer.
//!
//! Expands the hand-authored motion archetypes into ordered pose lists using
//! piecewise-linear angle steps. Every function is pure: identical input
//! always yields an identical sequence, and no angle is ever rejected.

use crate::pose::{FigurePose, RobotPose};

/// Arm swing per gait step, in degrees.
pub const ARM_STEP: f64 = 10.0;

/// Leg swing per gait step, in degrees.
pub const LEG_STEP: f64 = 12.0;

/// Number of frames in a robot walk cycle.
pub const WALK_FRAMES: usize = 13;

/// Number of frames in a rotation sweep (both endpoints included).
pub const ROTATE_FRAMES: usize = 11;

/// Number of frames in an arm check sweep.
pub const CHECK_FRAMES: usize = 19;

/// Arm angle step of the check sweep, in degrees.
pub const CHECK_STEP: f64 = 10.0;

/// Number of frames in a figure walk cycle.
pub const FIGURE_WALK_FRAMES: usize = 20;

/// Head/limb step of the figure walk, in degrees.
pub const FIGURE_LIMB_STEP: f64 = 3.0;

/// Narrowest horizontal scale reached by the figure rotation.
pub const MIN_SCALE: f64 = 0.1;

/// Builds a robot pose whose limbs are `phase` gait steps away from neutral.
///
/// Positive phases raise the left arm and right leg, negative phases the
/// opposite pair.
fn gait(body: f64, phase: f64) -> RobotPose {
    RobotPose::new(
        body,
        phase * ARM_STEP,
        -phase * ARM_STEP,
        -phase * LEG_STEP,
        phase * LEG_STEP,
    )
}

/// Robot walk cycle facing `direction_bias` degrees.
///
/// The limbs swing up for four frames, back down for three, up on the other
/// side for four and back for two. One more step after the last frame lands
/// on the first frame again, so the 13 frames loop seamlessly.
pub fn walk(direction_bias: f64) -> Vec<RobotPose> {
    let mut poses = Vec::with_capacity(WALK_FRAMES);

    for i in 0..4 {
        poses.push(gait(direction_bias, i as f64));
    }
    for i in 0..3 {
        poses.push(gait(direction_bias, (2 - i) as f64));
    }
    for i in 0..4 {
        poses.push(gait(direction_bias, -(i as f64)));
    }
    for i in 0..2 {
        poses.push(gait(direction_bias, -((2 - i) as f64)));
    }

    poses
}

/// Robot rotation from `angle_start` to `angle_end`.
///
/// Produces 11 evenly spaced body angles including both endpoints. The limbs
/// shuffle through a three-phase cycle indexed by `(i % 3) - 1`.
pub fn rotate(angle_start: f64, angle_end: f64) -> Vec<RobotPose> {
    let step = (angle_end - angle_start) / (ROTATE_FRAMES - 1) as f64;

    (0..ROTATE_FRAMES)
        .map(|i| {
            let phase = (i % 3) as f64 - 1.0;
            let body = if i == ROTATE_FRAMES - 1 {
                angle_end
            } else {
                angle_start + i as f64 * step
            };
            gait(body, phase)
        })
        .collect()
}

/// Diagnostic sweep of the right arm from 0 to 90 degrees and back to 0.
///
/// The body stays at `body_bias` and the other limbs stay neutral. Used to
/// eyeball the joint range of the scene, not as a gameplay animation.
pub fn check(body_bias: f64) -> Vec<RobotPose> {
    let up = (0..10).map(|i| i as f64 * CHECK_STEP);
    let down = (0..9).map(|i| (8 - i) as f64 * CHECK_STEP);

    up.chain(down)
        .map(|arm| RobotPose::new(body_bias, 0.0, arm, 0.0, 0.0))
        .collect()
}

/// Figure walk cycle: four five-frame segments at full width.
///
/// Each segment holds one side at full stride (5 steps) while the other side
/// and the head move by one step per frame.
pub fn figure_walk() -> Vec<FigurePose> {
    let s = FIGURE_LIMB_STEP;
    let mut poses = Vec::with_capacity(FIGURE_WALK_FRAMES);

    for i in 0..5 {
        let i = i as f64;
        poses.push(FigurePose::new(0.0, -s * i, i));
    }
    for i in 0..5 {
        let i = i as f64;
        poses.push(FigurePose::new(s * i, -s * 5.0, 4.0 - i));
    }
    for i in 0..5 {
        let i = i as f64;
        poses.push(FigurePose::new(s * 5.0, -s * (4.0 - i), -i));
    }
    for i in 0..5 {
        let i = i as f64;
        poses.push(FigurePose::new(s * (4.0 - i), 0.0, i - 4.0));
    }

    poses
}

/// Horizontal scale of step `step_index` in a figure rotation of
/// `total_steps` frames.
///
/// Sweeps from 1.0 down to [`MIN_SCALE`] at the middle step and back up to
/// 1.0 on the last step (for an odd `total_steps`).
pub fn rotate_scale(step_index: usize, total_steps: usize) -> f64 {
    let half = total_steps / 2;
    if half == 0 {
        return 1.0;
    }

    let half_f = half as f64;
    if step_index < half {
        1.0 - step_index as f64 / half_f
    } else if step_index == half {
        MIN_SCALE
    } else {
        (step_index - half) as f64 / half_f
    }
}

/// Figure "rotation": a neutral pose narrowing and widening again.
pub fn figure_rotate(total_steps: usize) -> Vec<FigurePose> {
    (0..total_steps)
        .map(|i| FigurePose::scaled(rotate_scale(i, total_steps)))
        .collect()
}
