//! POV-Ray frame renderer.
//!
//! Each frame goes through three steps:
//!
//! 1. Write the pose include file next to the scene
//! 2. Ray-trace the scene to `<frame>-tmp.png`
//! 3. Key out the background color into `<frame>.png`
//!
//! The include file and the pre-composited image are removed afterwards.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use robosprite_core::{
    with_suffix, FrameNaming, FrameRenderer, FrameSlot, RenderedFrame, RobotPose,
};
use robosprite_tool::{locate, CommandRunner, Invocation, ToolResult, ToolSpec};
use tracing::{debug, info, warn};

use crate::error::{PovrayError, PovrayResult};
use crate::options::PoseParameters;
use crate::scene::SceneConfig;

/// Resolved executables for the ray tracer and the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaytraceTools {
    /// POV-Ray executable.
    pub povray: PathBuf,
    /// ImageMagick `convert` executable.
    pub convert: PathBuf,
}

impl RaytraceTools {
    /// Locates both tools (explicit path, environment variable, then `PATH`).
    pub fn locate(povray: Option<&Path>, convert: Option<&Path>) -> ToolResult<Self> {
        Ok(Self {
            povray: locate(&ToolSpec::POVRAY, povray)?,
            convert: locate(&ToolSpec::CONVERT, convert)?,
        })
    }
}

/// Renders robot poses with POV-Ray and composites them with ImageMagick.
pub struct RaytraceRenderer<R: CommandRunner> {
    scene: SceneConfig,
    tools: RaytraceTools,
    runner: R,
    out_dir: PathBuf,
    naming: FrameNaming,
}

impl<R: CommandRunner> RaytraceRenderer<R> {
    /// Creates a renderer writing `robot/frame000.png`-style frames into
    /// `out_dir`.
    pub fn new(
        scene: SceneConfig,
        tools: RaytraceTools,
        runner: R,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            scene,
            tools,
            runner,
            out_dir: out_dir.into(),
            naming: FrameNaming::robot(),
        }
    }

    /// Overrides the frame naming scheme.
    pub fn with_naming(mut self, naming: FrameNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Scene settings.
    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    /// Returns the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Builds the POV-Ray command for a frame whose temporary output stem is
    /// `tmp_stem` (POV-Ray appends `.png`).
    pub fn trace_invocation(&self, tmp_stem: &Path) -> PovrayResult<Invocation> {
        let mut output = OsString::from("+O");
        output.push(tmp_stem);
        let mut input = OsString::from("+I");
        input.push(self.scene.scene_file_name()?);

        Ok(Invocation::new(ToolSpec::POVRAY.name, &self.tools.povray)
            .arg("-d")
            .arg(output)
            .arg(format!("+H{}", self.scene.height))
            .arg(format!("+W{}", self.scene.width))
            .arg(input)
            .current_dir(self.scene.scene_dir()))
    }

    /// Builds the compositing command turning `traced` into `frame`.
    pub fn composite_invocation(&self, traced: &Path, frame: &Path) -> Invocation {
        Invocation::new(ToolSpec::CONVERT.name, &self.tools.convert)
            .arg(traced)
            .arg("-transparent")
            .arg(&self.scene.background)
            .arg(frame)
    }

    fn trace(&self, slot: &FrameSlot, pose: &RobotPose) -> PovrayResult<RenderedFrame> {
        let stem = self.naming.stem_path(&self.out_dir, slot);
        let tmp_stem = with_suffix(&stem, "-tmp");
        let traced = with_suffix(&tmp_stem, ".png");
        let frame = with_suffix(&stem, ".png");
        let options = self.scene.options_path();

        PoseParameters::new(*pose).write_to(&options)?;

        let invocation = self.trace_invocation(&tmp_stem)?;
        debug!(command = %invocation.display(), "tracing");
        let outcome = self.runner.run(&invocation);
        let cleanup = fs::remove_file(&options);
        if let Err(err) = outcome.and_then(|output| output.ensure_success()) {
            discard_partial(&traced);
            return Err(err.into());
        }
        cleanup.map_err(|source| PovrayError::Cleanup {
            path: options,
            source,
        })?;

        if !traced.is_file() {
            return Err(PovrayError::OutputNotFound { path: traced });
        }

        let invocation = self.composite_invocation(&traced, &frame);
        debug!(command = %invocation.display(), "compositing");
        let outcome = self.runner.run(&invocation);
        let cleanup = fs::remove_file(&traced);
        if let Err(err) = outcome.and_then(|output| output.ensure_success()) {
            discard_partial(&frame);
            return Err(err.into());
        }
        cleanup.map_err(|source| PovrayError::Cleanup {
            path: traced,
            source,
        })?;

        if !frame.is_file() {
            return Err(PovrayError::OutputNotFound { path: frame });
        }

        Ok(RenderedFrame {
            rel_path: self.naming.rel_path(slot, "png"),
            path: frame,
        })
    }
}

/// Removes output a failed tool may have left half-written.
fn discard_partial(path: &Path) {
    if path.exists() {
        if let Err(err) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "Failed to remove partial output");
        }
    }
}

impl<R: CommandRunner> FrameRenderer for RaytraceRenderer<R> {
    type Pose = RobotPose;
    type Error = PovrayError;

    /// Checks the scene and creates the frame directory.
    ///
    /// Both paths are made absolute because POV-Ray runs inside the scene
    /// directory.
    fn prepare(&mut self) -> PovrayResult<()> {
        if !self.scene.scene.is_file() {
            return Err(PovrayError::SceneNotFound {
                path: self.scene.scene.clone(),
            });
        }
        self.scene.scene_file_name()?;

        let frame_dir = match self.naming.subdir() {
            Some(sub) => self.out_dir.join(sub),
            None => self.out_dir.clone(),
        };
        fs::create_dir_all(&frame_dir).map_err(|source| PovrayError::CreateDir {
            path: frame_dir,
            source,
        })?;

        self.out_dir = fs::canonicalize(&self.out_dir).map_err(|source| PovrayError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;
        self.scene.scene =
            fs::canonicalize(&self.scene.scene).map_err(|_| PovrayError::SceneNotFound {
                path: self.scene.scene.clone(),
            })?;
        info!(
            scene = %self.scene.scene.display(),
            out_dir = %self.out_dir.display(),
            "Ray tracer ready"
        );
        Ok(())
    }

    fn render(&mut self, slot: &FrameSlot, pose: &RobotPose) -> PovrayResult<RenderedFrame> {
        self.trace(slot, pose)
    }
}
