//! Scene and output settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PovrayError, PovrayResult};
use crate::options::DEFAULT_OPTIONS_FILE;

/// Default output width and height in pixels.
pub const DEFAULT_SIZE: u32 = 500;

/// Default color keyed out as transparent.
pub const DEFAULT_BACKGROUND: &str = "black";

/// Where the scene lives and how frames are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// POV-Ray scene file.
    pub scene: PathBuf,
    /// Name of the pose include file, created next to the scene.
    pub options_file: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Color made transparent when compositing.
    pub background: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene: PathBuf::from("robot.pov"),
            options_file: DEFAULT_OPTIONS_FILE.to_string(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl SceneConfig {
    /// Creates a config for `scene` with default settings.
    pub fn new(scene: impl Into<PathBuf>) -> Self {
        Self {
            scene: scene.into(),
            ..Default::default()
        }
    }

    /// Directory POV-Ray runs in.
    pub fn scene_dir(&self) -> &Path {
        match self.scene.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Scene file name, passed to POV-Ray relative to [`Self::scene_dir`].
    pub fn scene_file_name(&self) -> PovrayResult<&Path> {
        self.scene
            .file_name()
            .map(Path::new)
            .ok_or_else(|| PovrayError::InvalidScenePath {
                path: self.scene.clone(),
            })
    }

    /// Location of the pose include file.
    pub fn options_path(&self) -> PathBuf {
        self.scene_dir().join(&self.options_file)
    }

    /// File name the scene was loaded from, for the manifest comment.
    pub fn source_name(&self) -> String {
        self.scene
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.scene.display().to_string())
    }
}
