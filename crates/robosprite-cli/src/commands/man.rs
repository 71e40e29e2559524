//! Man command implementation
//!
//! Draws the vector walking-man frames and rasterizes them with Inkscape.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use robosprite_backend_svg::{InkscapeCli, Rasterizer, VectorRenderer};
use robosprite_core::{figure_catalog, frame_total, ManifestFormat};
use robosprite_tool::{SystemRunner, DEFAULT_TIMEOUT_SECS};
use tracing::info;

use super::{default_manifest_path, generate, print_report, PendingManifest};
use crate::config::Config;

/// Source named in the manifest comment.
const MANIFEST_SOURCE: &str = "robosprite man";

/// Command-line overrides for the man command.
#[derive(Debug, Clone, Default)]
pub struct ManArgs {
    pub dir: Option<PathBuf>,
    /// `none`, `ini` or `xml`.
    pub manifest_format: Option<String>,
    pub manifest: Option<PathBuf>,
    pub inkscape: Option<PathBuf>,
    pub inkscape_cli: Option<InkscapeCli>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved man settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManSettings {
    pub dir: PathBuf,
    /// Manifest format and path, if a manifest is wanted.
    pub manifest: Option<(ManifestFormat, PathBuf)>,
    pub inkscape: Option<PathBuf>,
    pub inkscape_cli: InkscapeCli,
    pub timeout: Duration,
}

impl ManArgs {
    /// Merges flags over the config file over built-in defaults.
    ///
    /// No manifest is written unless a format or a manifest path is given;
    /// a path alone picks the format from its extension.
    pub fn resolve(self, config: &Config) -> Result<ManSettings> {
        let section = &config.man;
        let dir = self
            .dir
            .or_else(|| section.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let path = self.manifest.or_else(|| section.manifest.clone());

        let format = match self.manifest_format.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("none") => None,
            Some(s) => Some(s.parse::<ManifestFormat>()?),
            None => match (section.manifest_format, &path) {
                (Some(format), _) => Some(format),
                (None, Some(path)) => Some(
                    ManifestFormat::from_path(path)
                        .with_context(|| format!("Cannot infer manifest format of {}", path.display()))?,
                ),
                (None, None) => None,
            },
        };

        let manifest = format.map(|format| {
            let path = path
                .clone()
                .unwrap_or_else(|| default_manifest_path(&dir, "man", format));
            (format, path)
        });

        Ok(ManSettings {
            dir,
            manifest,
            inkscape: self.inkscape.or_else(|| config.tools.inkscape.clone()),
            inkscape_cli: self.inkscape_cli.or(section.inkscape_cli).unwrap_or_default(),
            timeout: Duration::from_secs(
                self.timeout_secs
                    .or(config.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

/// Run the man command
///
/// # Returns
/// Exit code: 0 when every frame (and the manifest, if requested) was written
pub fn run(args: ManArgs, config: &Config) -> Result<ExitCode> {
    let settings = args.resolve(config)?;
    let catalog = figure_catalog();

    let rasterizer = Rasterizer::locate(settings.inkscape.as_deref(), settings.inkscape_cli)
        .context("Vector frames need Inkscape")?;
    info!(inkscape = %rasterizer.program.display(), cli = %rasterizer.cli, "Using tools");

    println!(
        "{} Rendering {} figure frames into {}",
        "->".cyan(),
        frame_total(&catalog),
        settings.dir.display()
    );

    let renderer = VectorRenderer::new(
        rasterizer,
        SystemRunner::with_timeout(settings.timeout),
        &settings.dir,
    );

    let (report, manifest_path) = match &settings.manifest {
        Some((format, path)) => {
            let mut pending = PendingManifest::create(path, *format, &settings.dir)?;
            let report = generate(renderer, &catalog, Some(&mut pending), MANIFEST_SOURCE)?;
            (report, Some(pending.commit()?))
        }
        None => (generate(renderer, &catalog, None, MANIFEST_SOURCE)?, None),
    };

    print_report(&report, &settings.dir, manifest_path.as_deref());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManSection;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_write_no_manifest() {
        let settings = ManArgs::default().resolve(&Config::default()).unwrap();
        assert_eq!(settings.dir, PathBuf::from("."));
        assert_eq!(settings.manifest, None);
        assert_eq!(settings.inkscape_cli, InkscapeCli::Legacy);
    }

    #[test]
    fn test_format_flag_uses_default_path() {
        let args = ManArgs {
            dir: Some(PathBuf::from("img")),
            manifest_format: Some("xml".to_string()),
            ..Default::default()
        };
        let settings = args.resolve(&Config::default()).unwrap();
        assert_eq!(
            settings.manifest,
            Some((ManifestFormat::Xml, PathBuf::from("img/man.xml")))
        );
    }

    #[test]
    fn test_path_alone_infers_format() {
        let args = ManArgs {
            manifest: Some(PathBuf::from("sprites/man.ini")),
            ..Default::default()
        };
        let settings = args.resolve(&Config::default()).unwrap();
        assert_eq!(
            settings.manifest,
            Some((ManifestFormat::Ini, PathBuf::from("sprites/man.ini")))
        );
    }

    #[test]
    fn test_none_overrides_config() {
        let config = Config {
            man: ManSection {
                manifest_format: Some(ManifestFormat::Ini),
                inkscape_cli: Some(InkscapeCli::Modern),
                ..Default::default()
            },
            ..Default::default()
        };
        let args = ManArgs {
            manifest_format: Some("none".to_string()),
            ..Default::default()
        };
        let settings = args.resolve(&config).unwrap();
        assert_eq!(settings.manifest, None);
        assert_eq!(settings.inkscape_cli, InkscapeCli::Modern);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let args = ManArgs {
            manifest_format: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(args.resolve(&Config::default()).is_err());
    }
}
