//! Pose tuples consumed by the frame renderers.
//!
//! All angles are in degrees. Poses are plain values: they are produced by the
//! sequencer, handed to a renderer once and never stored.

use serde::Serialize;

/// One frame of the ray-traced robot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RobotPose {
    /// Rotation of the whole body around the vertical axis (facing direction).
    pub body: f64,
    /// Left arm swing.
    pub left_arm: f64,
    /// Right arm swing.
    pub right_arm: f64,
    /// Left leg swing.
    pub left_leg: f64,
    /// Right leg swing.
    pub right_leg: f64,
}

impl RobotPose {
    /// Creates a pose from a body angle and four limb angles.
    pub fn new(body: f64, left_arm: f64, right_arm: f64, left_leg: f64, right_leg: f64) -> Self {
        Self {
            body,
            left_arm,
            right_arm,
            left_leg,
            right_leg,
        }
    }

    /// Returns the four limb angles as `[left_arm, right_arm, left_leg, right_leg]`.
    pub fn limbs(&self) -> [f64; 4] {
        [self.left_arm, self.right_arm, self.left_leg, self.right_leg]
    }
}

/// One frame of the vector "walking man" figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigurePose {
    /// Rotation of the left leg and left hand.
    pub left_limb: f64,
    /// Rotation of the right leg and right hand.
    pub right_limb: f64,
    /// Head tilt; the body tilts the opposite way.
    pub head: f64,
    /// Horizontal scale used to fake turning in place.
    pub scale_x: f64,
}

impl FigurePose {
    /// Creates a pose at full width.
    pub fn new(left_limb: f64, right_limb: f64, head: f64) -> Self {
        Self {
            left_limb,
            right_limb,
            head,
            scale_x: 1.0,
        }
    }

    /// Creates a neutral pose squeezed to `scale_x`.
    pub fn scaled(scale_x: f64) -> Self {
        Self {
            left_limb: 0.0,
            right_limb: 0.0,
            head: 0.0,
            scale_x,
        }
    }
}

impl Default for FigurePose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
