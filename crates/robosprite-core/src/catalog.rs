//! Named animation modes for both characters.
//!
//! Mode names follow the `<motion>_<direction>` convention of the sprite
//! player: `d`own, `u`p, `l`eft, `r`ight. Rotations are named by their start
//! and end direction (`rotate_dr` turns from down to right).

use serde::Serialize;

use crate::pose::{FigurePose, RobotPose};
use crate::sequence;

/// A named, ordered sequence of poses.
///
/// Pose order is playback order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationMode<P> {
    /// Mode name as written to the manifest.
    pub name: String,
    /// Poses in playback order.
    pub poses: Vec<P>,
}

impl<P> AnimationMode<P> {
    /// Creates a mode.
    pub fn new(name: impl Into<String>, poses: Vec<P>) -> Self {
        Self {
            name: name.into(),
            poses,
        }
    }

    /// Number of frames in this mode.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns true if the mode has no frames.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

/// Facing angles of the robot, in degrees.
const DOWN: f64 = 0.0;
const UP: f64 = 180.0;
const RIGHT: f64 = -90.0;
const LEFT: f64 = 90.0;

/// Rotation sweeps as `(name, start, end)`.
///
/// Turns take the short way around: `ru`/`ur` pass -180, `ul`/`lu` pass +180.
const ROTATIONS: [(&str, f64, f64); 8] = [
    ("rotate_dr", 0.0, -90.0),
    ("rotate_ru", -90.0, -180.0),
    ("rotate_ul", 180.0, 90.0),
    ("rotate_ld", 90.0, 0.0),
    ("rotate_dl", 0.0, 90.0),
    ("rotate_lu", 90.0, 180.0),
    ("rotate_ur", -180.0, -90.0),
    ("rotate_rd", -90.0, 0.0),
];

/// The full robot mode set in manifest order.
pub fn robot_catalog() -> Vec<AnimationMode<RobotPose>> {
    let mut modes = Vec::with_capacity(16);

    for (name, bias) in [("walk_d", DOWN), ("walk_u", UP), ("walk_r", RIGHT), ("walk_l", LEFT)] {
        modes.push(AnimationMode::new(name, sequence::walk(bias)));
    }

    for (name, start, end) in ROTATIONS {
        modes.push(AnimationMode::new(name, sequence::rotate(start, end)));
    }

    for (name, bias) in [
        ("check_d", DOWN),
        ("check_r", RIGHT),
        ("check_l", LEFT),
        ("check_u", UP),
    ] {
        modes.push(AnimationMode::new(name, sequence::check(bias)));
    }

    modes
}

/// Number of frames in the figure rotation.
pub const FIGURE_ROTATE_FRAMES: usize = 11;

/// The figure mode set: one walk cycle and one rotation.
pub fn figure_catalog() -> Vec<AnimationMode<FigurePose>> {
    vec![
        AnimationMode::new("walk", sequence::figure_walk()),
        AnimationMode::new("rotate", sequence::figure_rotate(FIGURE_ROTATE_FRAMES)),
    ]
}

/// Modes a robot sprite must provide to be playable.
pub fn required_robot_modes() -> Vec<&'static str> {
    let mut names = vec!["walk_r", "walk_u", "walk_l", "walk_d"];
    names.extend(["check_d", "check_l", "check_u", "check_r"]);
    names.extend(ROTATIONS.iter().map(|(name, _, _)| *name));
    names
}

/// Total number of frames in a catalog.
pub fn frame_total<P>(modes: &[AnimationMode<P>]) -> usize {
    modes.iter().map(AnimationMode::len).sum()
}
