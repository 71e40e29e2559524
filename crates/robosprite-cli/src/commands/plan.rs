//! Plan command implementation
//!
//! Prints the pose sequences a generator would render, without running any
//! external tool.

use std::fmt::Write as _;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use robosprite_core::{
    figure_catalog, frame_total, robot_catalog, AnimationMode, FigurePose, RobotPose,
};
use serde::Serialize;

/// Which character to plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTarget {
    Robot,
    Man,
}

/// Run the plan command
pub fn run(target: PlanTarget, json: bool) -> Result<ExitCode> {
    let text = match (target, json) {
        (PlanTarget::Robot, true) => to_json(&robot_catalog())?,
        (PlanTarget::Man, true) => to_json(&figure_catalog())?,
        (PlanTarget::Robot, false) => render_text(&robot_catalog(), robot_row),
        (PlanTarget::Man, false) => render_text(&figure_catalog(), figure_row),
    };
    print!("{}", text);
    Ok(ExitCode::SUCCESS)
}

fn to_json<P: Serialize>(modes: &[AnimationMode<P>]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(modes)?;
    text.push('\n');
    Ok(text)
}

/// Human-readable listing, one line per pose.
pub fn render_text<P>(modes: &[AnimationMode<P>], row: fn(&P) -> String) -> String {
    let mut out = String::new();
    for mode in modes {
        let _ = writeln!(
            out,
            "{} ({} frames)",
            mode.name.as_str().bold(),
            mode.len()
        );
        for (i, pose) in mode.poses.iter().enumerate() {
            let _ = writeln!(out, "  {:>3}  {}", i, row(pose));
        }
    }
    let _ = writeln!(
        out,
        "{} {} modes, {} frames",
        "->".green(),
        modes.len(),
        frame_total(modes)
    );
    out
}

fn robot_row(pose: &RobotPose) -> String {
    format!(
        "body {:>7.1}  arms {:>6.1} {:>6.1}  legs {:>6.1} {:>6.1}",
        pose.body, pose.left_arm, pose.right_arm, pose.left_leg, pose.right_leg
    )
}

fn figure_row(pose: &FigurePose) -> String {
    format!(
        "limbs {:>6.1} {:>6.1}  head {:>5.1}  scale {:.2}",
        pose.left_limb, pose.right_limb, pose.head, pose.scale_x
    )
}
