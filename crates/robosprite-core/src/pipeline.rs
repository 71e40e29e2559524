//! Render-then-record generation loop.
//!
//! [`Generator`] owns the explicit run state: the global frame counter, the
//! frame renderer and the optional manifest writer. Modes are processed one at
//! a time and each frame is recorded right after it is rendered, so every
//! manifest entry refers to a file that already exists.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::catalog::AnimationMode;
use crate::error::{PipelineError, PipelineResult};
use crate::frame::{FrameCounter, FrameSlot};
use crate::manifest::{Manifest, ManifestWriter};
use crate::render::FrameRenderer;

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Every recorded frame, grouped by mode.
    pub manifest: Manifest,
    /// Number of renderer invocations.
    pub frames_rendered: usize,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

/// Drives a renderer over a mode catalog.
pub struct Generator<'w, R: FrameRenderer> {
    renderer: R,
    counter: FrameCounter,
    manifest: Option<Box<dyn ManifestWriter + 'w>>,
}

impl<'w, R: FrameRenderer> Generator<'w, R> {
    /// Creates a generator that only renders frames.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            counter: FrameCounter::new(),
            manifest: None,
        }
    }

    /// Records every frame through `writer` as well.
    pub fn with_manifest(mut self, writer: Box<dyn ManifestWriter + 'w>) -> Self {
        self.manifest = Some(writer);
        self
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consumes the generator, returning the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Renders and records every mode of `modes` in order.
    ///
    /// The first renderer failure aborts the run. The manifest writer is
    /// finished only when every frame succeeded.
    pub fn run(&mut self, modes: &[AnimationMode<R::Pose>]) -> PipelineResult<GenerationReport> {
        let mut seen = HashSet::new();
        for mode in modes {
            if !seen.insert(mode.name.as_str()) {
                return Err(PipelineError::DuplicateMode(mode.name.clone()));
            }
        }

        let start = Instant::now();
        let first_frame = self.counter.issued();
        let mut collected = Manifest::new();

        self.renderer.prepare().map_err(PipelineError::prepare)?;

        for mode in modes {
            info!(mode = %mode.name, frames = mode.len(), "Generating mode");
            collected.push_mode(mode.name.as_str());
            if let Some(writer) = self.manifest.as_mut() {
                writer.begin_mode(&mode.name)?;
            }

            for (local_index, pose) in mode.poses.iter().enumerate() {
                let slot = FrameSlot {
                    mode: mode.name.clone(),
                    local_index,
                    global_index: self.counter.advance(),
                };

                let frame = self
                    .renderer
                    .render(&slot, pose)
                    .map_err(|e| PipelineError::render(&mode.name, local_index, e))?;
                debug!(frame = %frame.rel_path, global = slot.global_index, "Rendered frame");

                if let Some(writer) = self.manifest.as_mut() {
                    writer.frame(local_index, &frame.rel_path)?;
                }
                collected.push_frame(frame.rel_path);
            }

            if let Some(writer) = self.manifest.as_mut() {
                writer.end_mode()?;
            }
        }

        if let Some(writer) = self.manifest.as_mut() {
            writer.finish()?;
        }

        Ok(GenerationReport {
            manifest: collected,
            frames_rendered: self.counter.issued() - first_frame,
            duration: start.elapsed(),
        })
    }
}
