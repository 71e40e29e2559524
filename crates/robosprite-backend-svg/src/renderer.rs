//! SVG-to-PNG frame renderer.

use std::fs;
use std::path::{Path, PathBuf};

use robosprite_core::{
    with_suffix, FigurePose, FrameNaming, FrameRenderer, FrameSlot, RenderedFrame,
};
use robosprite_tool::CommandRunner;
use tracing::{debug, warn};

use crate::error::{SvgError, SvgResult};
use crate::figure::draw_figure;
use crate::raster::Rasterizer;

/// Renders figure poses by writing an SVG and rasterizing it with Inkscape.
///
/// The SVG is deleted as soon as Inkscape returns, whether or not it
/// succeeded.
pub struct VectorRenderer<R: CommandRunner> {
    rasterizer: Rasterizer,
    runner: R,
    out_dir: PathBuf,
    naming: FrameNaming,
}

impl<R: CommandRunner> VectorRenderer<R> {
    /// Creates a renderer writing `walk-0.png`-style frames into `out_dir`.
    pub fn new(rasterizer: Rasterizer, runner: R, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            rasterizer,
            runner,
            out_dir: out_dir.into(),
            naming: FrameNaming::figure(),
        }
    }

    /// Overrides the frame naming scheme.
    pub fn with_naming(mut self, naming: FrameNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Directory frames are written to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Returns the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn frame_dir(&self) -> PathBuf {
        match self.naming.subdir() {
            Some(sub) => self.out_dir.join(sub),
            None => self.out_dir.clone(),
        }
    }

    fn draw(&self, slot: &FrameSlot, pose: &FigurePose) -> SvgResult<RenderedFrame> {
        let stem = self.naming.stem_path(&self.out_dir, slot);
        let svg_path = with_suffix(&stem, ".svg");
        let png_path = with_suffix(&stem, ".png");

        fs::write(&svg_path, draw_figure(pose)).map_err(|source| SvgError::WriteSvg {
            path: svg_path.clone(),
            source,
        })?;

        let invocation = self.rasterizer.invocation(&svg_path, &png_path);
        debug!(command = %invocation.display(), "rasterizing");
        let outcome = self.runner.run(&invocation);

        let cleanup = fs::remove_file(&svg_path);
        let output = outcome?;
        cleanup.map_err(|source| SvgError::Cleanup {
            path: svg_path,
            source,
        })?;
        if let Err(err) = output.ensure_success() {
            if png_path.exists() {
                if let Err(e) = fs::remove_file(&png_path) {
                    warn!(path = %png_path.display(), error = %e, "Failed to remove partial output");
                }
            }
            return Err(err.into());
        }

        if !png_path.is_file() {
            return Err(SvgError::OutputNotFound { path: png_path });
        }

        Ok(RenderedFrame {
            rel_path: self.naming.rel_path(slot, "png"),
            path: png_path,
        })
    }
}

impl<R: CommandRunner> FrameRenderer for VectorRenderer<R> {
    type Pose = FigurePose;
    type Error = SvgError;

    fn prepare(&mut self) -> SvgResult<()> {
        let dir = self.frame_dir();
        fs::create_dir_all(&dir).map_err(|source| SvgError::CreateDir { path: dir, source })
    }

    fn render(&mut self, slot: &FrameSlot, pose: &FigurePose) -> SvgResult<RenderedFrame> {
        self.draw(slot, pose)
    }
}
