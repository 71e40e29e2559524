//! Inkscape command lines.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use robosprite_tool::{locate, Invocation, ToolResult, ToolSpec};
use serde::{Deserialize, Serialize};

/// Command-line dialect of the installed Inkscape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkscapeCli {
    /// Inkscape 0.92: `-z -e out.png in.svg`.
    #[default]
    Legacy,
    /// Inkscape 1.x: `--export-type=png --export-filename=out.png in.svg`.
    Modern,
}

impl fmt::Display for InkscapeCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InkscapeCli::Legacy => write!(f, "legacy"),
            InkscapeCli::Modern => write!(f, "modern"),
        }
    }
}

impl FromStr for InkscapeCli {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "0.92" => Ok(InkscapeCli::Legacy),
            "modern" | "1" | "1.x" => Ok(InkscapeCli::Modern),
            other => Err(format!(
                "unknown Inkscape CLI '{}', expected 'legacy' or 'modern'",
                other
            )),
        }
    }
}

impl InkscapeCli {
    /// Guesses the dialect from `inkscape --version` output.
    pub fn from_version(version: &str) -> Option<Self> {
        let number = version
            .split_whitespace()
            .find(|w| w.chars().next().is_some_and(|c| c.is_ascii_digit()))?;
        let major: u32 = number.split('.').next()?.parse().ok()?;
        Some(if major >= 1 {
            InkscapeCli::Modern
        } else {
            InkscapeCli::Legacy
        })
    }
}

/// A resolved Inkscape executable plus its dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rasterizer {
    /// Path to the executable.
    pub program: PathBuf,
    /// Command-line dialect.
    pub cli: InkscapeCli,
}

impl Rasterizer {
    /// Creates a rasterizer for a known executable.
    pub fn new(program: impl Into<PathBuf>, cli: InkscapeCli) -> Self {
        Self {
            program: program.into(),
            cli,
        }
    }

    /// Locates Inkscape (explicit path, `ROBOSPRITE_INKSCAPE`, then `PATH`).
    pub fn locate(explicit: Option<&Path>, cli: InkscapeCli) -> ToolResult<Self> {
        let program = locate(&ToolSpec::INKSCAPE, explicit)?;
        Ok(Self::new(program, cli))
    }

    /// Builds the command that converts `svg` into `png`.
    pub fn invocation(&self, svg: &Path, png: &Path) -> Invocation {
        let inv = Invocation::new(ToolSpec::INKSCAPE.name, &self.program);
        match self.cli {
            InkscapeCli::Legacy => inv.arg("-z").arg("-e").arg(png).arg(svg),
            InkscapeCli::Modern => {
                let mut filename = std::ffi::OsString::from("--export-filename=");
                filename.push(png);
                inv.arg("--export-type=png").arg(filename).arg(svg)
            }
        }
    }
}
