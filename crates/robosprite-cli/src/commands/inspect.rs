//! Inspect command implementation
//!
//! Parses a sprite manifest and summarizes its modes, optionally checking
//! that every referenced frame exists and that the robot mode set is
//! complete.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use robosprite_core::{required_robot_modes, Manifest, ManifestFormat};
use serde::Serialize;

/// Summary of one manifest mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSummary {
    pub name: String,
    pub frames: usize,
    /// Frames listed in the manifest but absent on disk.
    pub missing_files: Vec<String>,
}

/// Summary of a whole manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub path: PathBuf,
    pub format: ManifestFormat,
    pub frame_count: usize,
    pub modes: Vec<ModeSummary>,
    /// Required robot modes that are absent (only with `--robot`).
    pub missing_modes: Vec<String>,
}

impl InspectReport {
    /// Builds the report; frame paths are resolved against the manifest's
    /// directory.
    pub fn build(path: &Path, check_robot: bool) -> Result<Self> {
        let format = ManifestFormat::from_path(path)
            .with_context(|| format!("Cannot infer manifest format of {}", path.display()))?;
        let manifest = Manifest::from_file(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        let modes = manifest
            .modes()
            .iter()
            .map(|mode| ModeSummary {
                name: mode.name.clone(),
                frames: mode.frames.len(),
                missing_files: mode
                    .frames
                    .iter()
                    .filter(|frame| !base.join(frame.as_str()).is_file())
                    .cloned()
                    .collect(),
            })
            .collect();

        let missing_modes = if check_robot {
            manifest
                .missing_modes(&required_robot_modes())
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            format,
            frame_count: manifest.frame_count(),
            modes,
            missing_modes,
        })
    }

    /// Whether every frame exists and no required mode is missing.
    pub fn is_complete(&self) -> bool {
        self.missing_modes.is_empty() && self.modes.iter().all(|m| m.missing_files.is_empty())
    }
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 if the manifest is complete, 1 otherwise
pub fn run(path: &str, check_robot: bool, json: bool) -> Result<ExitCode> {
    let report = InspectReport::build(Path::new(path), check_robot)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_report(report: &InspectReport) {
    println!(
        "{} {} ({}, {} modes, {} frames)",
        "Manifest".bold(),
        report.path.display(),
        report.format,
        report.modes.len(),
        report.frame_count
    );

    for mode in &report.modes {
        if mode.missing_files.is_empty() {
            println!("  {} {} ({} frames)", "ok".green(), mode.name, mode.frames);
        } else {
            println!(
                "  {} {} ({} frames, {} missing)",
                "!!".red(),
                mode.name,
                mode.frames,
                mode.missing_files.len()
            );
            for frame in &mode.missing_files {
                println!("     {}", frame.dimmed());
            }
        }
    }

    if !report.missing_modes.is_empty() {
        println!(
            "  {} missing modes: {}",
            "!!".red(),
            report.missing_modes.join(", ")
        );
    }
}
