//! Tool discovery.
//!
//! A tool is resolved in this order:
//!
//! 1. An explicitly configured path (CLI flag or config file)
//! 2. The tool's environment variable
//! 3. A `PATH` lookup of each known binary name

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{ToolError, ToolResult};

/// Static description of an external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    /// Display name.
    pub name: &'static str,
    /// Binary names tried on `PATH`, in order.
    pub binaries: &'static [&'static str],
    /// Environment variable holding an override path.
    pub env_var: &'static str,
    /// Argument that prints the version.
    pub version_arg: &'static str,
}

impl ToolSpec {
    /// Inkscape, used for SVG rasterization.
    pub const INKSCAPE: ToolSpec = ToolSpec {
        name: "inkscape",
        binaries: &["inkscape", "inkscape.com", "inkscape.exe"],
        env_var: "ROBOSPRITE_INKSCAPE",
        version_arg: "--version",
    };

    /// POV-Ray, used for ray-traced frames.
    pub const POVRAY: ToolSpec = ToolSpec {
        name: "povray",
        binaries: &["povray", "pvengine64.exe", "pvengine.exe"],
        env_var: "ROBOSPRITE_POVRAY",
        version_arg: "--version",
    };

    /// ImageMagick `convert`, used for background keying.
    pub const CONVERT: ToolSpec = ToolSpec {
        name: "convert",
        binaries: &["convert", "magick"],
        env_var: "ROBOSPRITE_CONVERT",
        version_arg: "-version",
    };

    /// All tools the generators may need.
    pub const ALL: [ToolSpec; 3] = [Self::INKSCAPE, Self::POVRAY, Self::CONVERT];
}

/// Resolves a tool to an executable path.
///
/// An explicit path that does not exist is an error; there is no fallback.
pub fn locate(spec: &ToolSpec, explicit: Option<&Path>) -> ToolResult<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            debug!(tool = spec.name, path = %path.display(), "using configured path");
            return Ok(path.to_path_buf());
        }
        // A bare name like "inkscape" is allowed and looked up on PATH.
        if path.components().count() == 1 {
            if let Ok(found) = which::which(path) {
                return Ok(found);
            }
        }
        return Err(ToolError::ConfiguredPathMissing {
            tool: spec.name.to_string(),
            path: path.to_path_buf(),
        });
    }

    if let Some(value) = std::env::var_os(spec.env_var) {
        let path = PathBuf::from(value);
        if path.exists() {
            debug!(tool = spec.name, env = spec.env_var, path = %path.display(), "using environment override");
            return Ok(path);
        }
        debug!(tool = spec.name, env = spec.env_var, "environment override does not exist");
    }

    for name in spec.binaries {
        if let Ok(path) = which::which(name) {
            debug!(tool = spec.name, path = %path.display(), "found on PATH");
            return Ok(path);
        }
    }

    Err(ToolError::NotFound {
        tool: spec.name.to_string(),
        env_var: spec.env_var.to_string(),
    })
}

/// Runs the tool's version command and returns the first line of output.
pub fn probe_version(spec: &ToolSpec, path: &Path) -> Option<String> {
    let output = Command::new(path)
        .arg(spec.version_arg)
        .stdin(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = if output.stdout.is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        String::from_utf8_lossy(&output.stdout).into_owned()
    };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
