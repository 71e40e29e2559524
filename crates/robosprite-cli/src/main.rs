//! Robosprite CLI - sprite frame generation for a ray-traced robot and a
//! vector walking man
//!
//! This binary renders every animation frame through external tools and
//! writes the manifest a sprite player reads.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use robosprite_backend_svg::InkscapeCli;
use robosprite_core::ManifestFormat;

use robosprite_cli::commands::{self, man::ManArgs, plan::PlanTarget, robot::RobotArgs};
use robosprite_cli::config::Config;
use robosprite_cli::logging;

/// Robosprite - Sprite Frame Generator
#[derive(Parser)]
#[command(name = "robosprite")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log detail (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ray-trace the robot frames and write the manifest
    Robot {
        /// Output directory; frames go to <DIR>/robot/ (default: current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// POV-Ray scene file (default: <DIR>/robot.pov)
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Manifest format (default: ini)
        #[arg(short, long)]
        format: Option<ManifestFormat>,

        /// Manifest path (default: <DIR>/robot.<FORMAT>)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Frame width in pixels (default: 500)
        #[arg(long)]
        width: Option<u32>,

        /// Frame height in pixels (default: 500)
        #[arg(long)]
        height: Option<u32>,

        /// Background color made transparent (default: black)
        #[arg(long)]
        background: Option<String>,

        /// POV-Ray executable
        #[arg(long)]
        povray: Option<PathBuf>,

        /// ImageMagick convert executable
        #[arg(long)]
        convert: Option<PathBuf>,

        /// Per-tool timeout in seconds (default: 300)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Draw the walking-man frames and rasterize them with Inkscape
    Man {
        /// Output directory (default: current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Manifest format (default: none)
        #[arg(long, value_parser = ["none", "ini", "xml"])]
        manifest_format: Option<String>,

        /// Manifest path (default: <DIR>/man.<FORMAT>)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Inkscape executable
        #[arg(long)]
        inkscape: Option<PathBuf>,

        /// Inkscape command-line dialect: legacy (0.92) or modern (1.x)
        #[arg(long)]
        inkscape_cli: Option<InkscapeCli>,

        /// Per-tool timeout in seconds (default: 300)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Print the pose sequences without rendering anything
    Plan {
        /// Which character to plan
        #[arg(value_enum)]
        target: Target,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Summarize a manifest and check that its frames exist
    Inspect {
        /// Path to the manifest (.ini or .xml)
        manifest: String,

        /// Also require every robot animation mode
        #[arg(long)]
        robot: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Check which external tools are available
    Doctor,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// Ray-traced robot
    Robot,
    /// Vector walking man
    Man,
}

impl From<Target> for PlanTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Robot => PlanTarget::Robot,
            Target::Man => PlanTarget::Man,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = Config::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Robot {
            dir,
            scene,
            format,
            manifest,
            width,
            height,
            background,
            povray,
            convert,
            timeout,
        } => commands::robot::run(
            RobotArgs {
                dir,
                scene,
                format,
                manifest,
                width,
                height,
                background,
                povray,
                convert,
                timeout_secs: timeout,
            },
            &config,
        ),
        Commands::Man {
            dir,
            manifest_format,
            manifest,
            inkscape,
            inkscape_cli,
            timeout,
        } => commands::man::run(
            ManArgs {
                dir,
                manifest_format,
                manifest,
                inkscape,
                inkscape_cli,
                timeout_secs: timeout,
            },
            &config,
        ),
        Commands::Plan { target, json } => commands::plan::run(target.into(), json),
        Commands::Inspect {
            manifest,
            robot,
            json,
        } => commands::inspect::run(&manifest, robot, json),
        Commands::Doctor => commands::doctor::run(&config),
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
