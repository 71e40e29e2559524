//! Robot command implementation
//!
//! Ray-traces every robot animation mode and writes the sprite manifest.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use robosprite_backend_povray::{RaytraceRenderer, RaytraceTools, SceneConfig};
use robosprite_core::{frame_total, robot_catalog, ManifestFormat};
use robosprite_tool::{SystemRunner, DEFAULT_TIMEOUT_SECS};
use tracing::info;

use super::{default_manifest_path, generate, print_report, PendingManifest};
use crate::config::Config;

/// Command-line overrides for the robot command.
#[derive(Debug, Clone, Default)]
pub struct RobotArgs {
    pub dir: Option<PathBuf>,
    pub scene: Option<PathBuf>,
    pub format: Option<ManifestFormat>,
    pub manifest: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background: Option<String>,
    pub povray: Option<PathBuf>,
    pub convert: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved robot settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotSettings {
    /// Output directory; frames go to `<dir>/robot/`.
    pub dir: PathBuf,
    pub scene: SceneConfig,
    pub format: ManifestFormat,
    pub manifest: PathBuf,
    pub povray: Option<PathBuf>,
    pub convert: Option<PathBuf>,
    pub timeout: Duration,
}

impl RobotArgs {
    /// Merges flags over the config file over built-in defaults.
    ///
    /// Without `--scene`, the scene is `<dir>/robot.pov`.
    pub fn resolve(self, config: &Config) -> RobotSettings {
        let section = &config.robot;
        let dir = self
            .dir
            .or_else(|| section.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let format = self.format.or(section.format).unwrap_or(ManifestFormat::Ini);

        let mut scene = SceneConfig::new(
            self.scene
                .or_else(|| section.scene.clone())
                .unwrap_or_else(|| dir.join("robot.pov")),
        );
        if let Some(width) = self.width.or(section.width) {
            scene.width = width;
        }
        if let Some(height) = self.height.or(section.height) {
            scene.height = height;
        }
        if let Some(background) = self.background.or_else(|| section.background.clone()) {
            scene.background = background;
        }

        let manifest = self
            .manifest
            .or_else(|| section.manifest.clone())
            .unwrap_or_else(|| default_manifest_path(&dir, "robot", format));

        RobotSettings {
            dir,
            scene,
            format,
            manifest,
            povray: self.povray.or_else(|| config.tools.povray.clone()),
            convert: self.convert.or_else(|| config.tools.convert.clone()),
            timeout: Duration::from_secs(
                self.timeout_secs
                    .or(config.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }
}

/// Run the robot command
///
/// # Returns
/// Exit code: 0 when every frame and the manifest were written
pub fn run(args: RobotArgs, config: &Config) -> Result<ExitCode> {
    let settings = args.resolve(config);
    let catalog = robot_catalog();

    if !settings.scene.scene.is_file() {
        anyhow::bail!("Scene file not found: {}", settings.scene.scene.display());
    }

    let tools = RaytraceTools::locate(settings.povray.as_deref(), settings.convert.as_deref())
        .context("Ray-traced frames need POV-Ray and ImageMagick")?;
    info!(povray = %tools.povray.display(), convert = %tools.convert.display(), "Using tools");

    println!(
        "{} Rendering {} robot frames from {}",
        "->".cyan(),
        frame_total(&catalog),
        settings.scene.scene.display()
    );

    let source = settings.scene.source_name();
    let renderer = RaytraceRenderer::new(
        settings.scene.clone(),
        tools,
        SystemRunner::with_timeout(settings.timeout),
        &settings.dir,
    );

    let mut pending = PendingManifest::create(&settings.manifest, settings.format, &settings.dir)?;
    let report = generate(renderer, &catalog, Some(&mut pending), &source)?;
    let manifest_path = pending.commit()?;

    print_report(&report, &settings.dir.join("robot"), Some(&manifest_path));
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RobotSection, ToolPaths};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = RobotArgs::default().resolve(&Config::default());
        assert_eq!(settings.dir, PathBuf::from("."));
        assert_eq!(settings.scene.scene, PathBuf::from("./robot.pov"));
        assert_eq!(settings.scene.width, 500);
        assert_eq!(settings.scene.background, "black");
        assert_eq!(settings.format, ManifestFormat::Ini);
        assert_eq!(settings.manifest, PathBuf::from("./robot.ini"));
        assert_eq!(settings.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            timeout_secs: Some(30),
            tools: ToolPaths {
                povray: Some(PathBuf::from("/opt/povray")),
                ..Default::default()
            },
            robot: RobotSection {
                dir: Some(PathBuf::from("img")),
                format: Some(ManifestFormat::Xml),
                width: Some(256),
                height: Some(256),
                ..Default::default()
            },
            ..Default::default()
        };
        let args = RobotArgs {
            width: Some(64),
            povray: Some(PathBuf::from("/usr/local/bin/povray")),
            ..Default::default()
        };

        let settings = args.resolve(&config);
        assert_eq!(settings.scene.scene, PathBuf::from("img/robot.pov"));
        assert_eq!(settings.scene.width, 64);
        assert_eq!(settings.scene.height, 256);
        assert_eq!(settings.manifest, PathBuf::from("img/robot.xml"));
        assert_eq!(settings.povray, Some(PathBuf::from("/usr/local/bin/povray")));
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_scene_fails_before_tools() {
        let dir = tempfile::tempdir().unwrap();
        let args = RobotArgs {
            dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let err = run(args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("robot.pov"));
        assert!(!dir.path().join("robot.ini").exists());
    }
}
