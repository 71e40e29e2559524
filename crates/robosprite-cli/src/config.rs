//! Optional JSON configuration file.
//!
//! Every field is optional; command-line flags override file values, and
//! built-in defaults fill whatever is left.
//!
//! ```json
//! {
//!   "timeout_secs": 120,
//!   "tools": { "povray": "/opt/povray/bin/povray" },
//!   "robot": { "scene": "img/robot.pov", "format": "xml", "width": 256, "height": 256 },
//!   "man": { "dir": "img/man", "inkscape_cli": "modern" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use robosprite_backend_svg::InkscapeCli;
use robosprite_core::ManifestFormat;
use serde::{Deserialize, Serialize};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Per-tool timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Explicit tool locations.
    pub tools: ToolPaths,
    /// Ray-traced robot settings.
    pub robot: RobotSection,
    /// Vector figure settings.
    pub man: ManSection,
}

/// Explicit tool locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub inkscape: Option<PathBuf>,
    pub povray: Option<PathBuf>,
    pub convert: Option<PathBuf>,
}

/// Settings for `robosprite robot`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotSection {
    /// Output directory (frames go to `<dir>/robot/`).
    pub dir: Option<PathBuf>,
    /// POV-Ray scene file.
    pub scene: Option<PathBuf>,
    /// Manifest format.
    pub format: Option<ManifestFormat>,
    /// Manifest path.
    pub manifest: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Color keyed out as transparent.
    pub background: Option<String>,
}

/// Settings for `robosprite man`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManSection {
    /// Output directory.
    pub dir: Option<PathBuf>,
    /// Manifest format; no manifest is written when unset.
    pub manifest_format: Option<ManifestFormat>,
    /// Manifest path.
    pub manifest: Option<PathBuf>,
    /// Inkscape command-line dialect.
    pub inkscape_cli: Option<InkscapeCli>,
}

impl Config {
    /// Loads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
