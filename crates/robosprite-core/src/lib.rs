//! Robosprite Core Library
//!
//! This crate turns a small, closed set of motion archetypes into sprite
//! animation frames. It owns everything that does not depend on a specific
//! rendering tool.
//!
//! # Overview
//!
//! Every generator run goes through three stages:
//!
//! 1. **Pose sequencing** - [`sequence`] expands walk, rotate and check motions
//!    into ordered pose lists; [`catalog`] names them as animation modes.
//! 2. **Frame rendering** - a [`FrameRenderer`] turns one pose into one raster
//!    file. Concrete renderers live in the backend crates.
//! 3. **Manifest writing** - a [`ManifestWriter`] records the frame paths of
//!    every mode in INI or XML form.
//!
//! [`Generator`] wires the stages together and owns the run-wide frame counter.
//!
//! # Example
//!
//! ```
//! use robosprite_core::sequence;
//!
//! let poses = sequence::rotate(0.0, -90.0);
//! assert_eq!(poses.len(), 11);
//! assert_eq!(poses[10].body, -90.0);
//! ```
//!
//! # Modules
//!
//! - [`pose`]: Robot and figure pose tuples
//! - [`sequence`]: Pose sequencer operations
//! - [`catalog`]: Named animation modes for both characters
//! - [`frame`]: Frame counter and frame file naming
//! - [`render`]: The frame renderer seam
//! - [`manifest`]: Manifest model, writers and parsers
//! - [`pipeline`]: Render-then-record generation loop
//! - [`error`]: Error types

pub mod catalog;
pub mod error;
pub mod frame;
pub mod manifest;
pub mod pipeline;
pub mod pose;
pub mod render;
pub mod sequence;

// Re-export commonly used types at the crate root
pub use catalog::{
    figure_catalog, frame_total, required_robot_modes, robot_catalog, AnimationMode,
};
pub use error::{BackendError, PipelineError, PipelineResult};
pub use frame::{with_suffix, FrameCounter, FrameNaming, FrameSlot, RenderedFrame};
pub use manifest::{
    IniManifestWriter, Manifest, ManifestError, ManifestFormat, ManifestMode, ManifestResult,
    ManifestWriter, XmlManifestWriter,
};
pub use pipeline::{GenerationReport, Generator};
pub use pose::{FigurePose, RobotPose};
pub use render::FrameRenderer;
