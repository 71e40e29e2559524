//! Doctor command implementation
//!
//! Reports which external tools the generators can find.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use robosprite_backend_svg::InkscapeCli;
use robosprite_tool::{locate, probe_version, ToolError, ToolSpec};

use crate::config::Config;

/// Result of looking for one tool.
#[derive(Debug)]
pub enum ToolStatus {
    /// Found, with its version line if the tool printed one.
    Found {
        path: PathBuf,
        version: Option<String>,
    },
    /// Not installed anywhere we looked.
    NotFound { env_var: &'static str },
    /// Configured path does not exist.
    Misconfigured(ToolError),
}

/// Looks up `spec`, honoring a configured path.
pub fn check_tool(spec: &ToolSpec, configured: Option<&Path>) -> ToolStatus {
    match locate(spec, configured) {
        Ok(path) => {
            let version = probe_version(spec, &path);
            ToolStatus::Found { path, version }
        }
        Err(ToolError::NotFound { .. }) => ToolStatus::NotFound {
            env_var: spec.env_var,
        },
        Err(err) => ToolStatus::Misconfigured(err),
    }
}

/// Run the doctor command
///
/// Checks:
/// - Inkscape (vector frames)
/// - POV-Ray and ImageMagick (ray-traced frames)
///
/// # Returns
/// Exit code: 0 unless a configured tool path is broken
pub fn run(config: &Config) -> Result<ExitCode> {
    println!("{}", "Robosprite Doctor".cyan().bold());
    println!("{}", "=================".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!(
        "  {} robosprite-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Tools:".bold());
    let mut all_ok = true;
    let mut found = Vec::new();

    for spec in ToolSpec::ALL {
        let configured = match spec.name {
            "inkscape" => config.tools.inkscape.as_deref(),
            "povray" => config.tools.povray.as_deref(),
            "convert" => config.tools.convert.as_deref(),
            _ => None,
        };

        match check_tool(&spec, configured) {
            ToolStatus::Found { path, version } => {
                let version = version.unwrap_or_else(|| "version unknown".to_string());
                println!(
                    "  {} {} ({})",
                    "ok".green(),
                    spec.name,
                    path.display()
                );
                println!("     {}", version.dimmed());
                if spec.name == ToolSpec::INKSCAPE.name {
                    if let Some(cli) = InkscapeCli::from_version(&version) {
                        println!("     {}", format!("use --inkscape-cli {}", cli).dimmed());
                    }
                }
                found.push(spec.name);
            }
            ToolStatus::NotFound { env_var } => {
                println!("  {} {} not found", "!!".yellow(), spec.name);
                println!(
                    "     {}",
                    format!("Install it, add it to PATH, or set {}", env_var).dimmed()
                );
            }
            ToolStatus::Misconfigured(err) => {
                println!("  {} {}", "!!".red(), err);
                all_ok = false;
            }
        }
    }

    println!();
    println!("{}", "Generators:".bold());
    let has = |name: &str| found.iter().any(|f| *f == name);
    report_generator("man (vector)", has("inkscape"));
    report_generator("robot (ray-traced)", has("povray") && has("convert"));
    println!();

    if all_ok {
        println!("{} Doctor finished.", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some configured tool paths are broken. See above for details.",
            "FAILED".red().bold()
        );
        Ok(ExitCode::from(1))
    }
}

fn report_generator(name: &str, available: bool) {
    if available {
        println!("  {} {}", "ok".green(), name);
    } else {
        println!("  {} {} (missing tools)", "!!".yellow(), name);
    }
}
