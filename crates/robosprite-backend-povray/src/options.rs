//! Pose parameter include file.
//!
//! The scene reads its joint angles from an include file that is rewritten
//! before every frame:
//!
//! ```text
//! #declare LEFT_ARM_ANGLE  = 10.000000;
//! #declare RIGHT_ARM_ANGLE = -10.000000;
//! #declare BODY_ANGLE      = 0.000000;
//! #declare LEFT_LEG_ANGLE  = -12.000000;
//! #declare RIGHT_LEG_ANGLE = 12.000000;
//! ```

use std::fs;
use std::path::Path;

use robosprite_core::RobotPose;

use crate::error::{PovrayError, PovrayResult};

/// Default include file name, resolved next to the scene.
pub const DEFAULT_OPTIONS_FILE: &str = "robot_options.inc";

/// Scene variables for one robot pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseParameters {
    pose: RobotPose,
}

impl PoseParameters {
    /// Wraps a pose.
    pub fn new(pose: RobotPose) -> Self {
        Self { pose }
    }

    /// `(name, value)` pairs in file order.
    pub fn variables(&self) -> [(&'static str, f64); 5] {
        [
            ("LEFT_ARM_ANGLE", self.pose.left_arm),
            ("RIGHT_ARM_ANGLE", self.pose.right_arm),
            ("BODY_ANGLE", self.pose.body),
            ("LEFT_LEG_ANGLE", self.pose.left_leg),
            ("RIGHT_LEG_ANGLE", self.pose.right_leg),
        ]
    }

    /// File contents, one `#declare` per line.
    pub fn to_include(&self) -> String {
        self.variables()
            .iter()
            .map(|(name, value)| format!("#declare {:<15} = {:.6};\n", name, value))
            .collect()
    }

    /// Writes the include file, replacing any previous one.
    pub fn write_to(&self, path: &Path) -> PovrayResult<()> {
        fs::write(path, self.to_include()).map_err(|source| PovrayError::WriteOptions {
            path: path.to_path_buf(),
            source,
        })
    }
}
