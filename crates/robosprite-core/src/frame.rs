//! Frame counter and frame file naming.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Run-wide frame counter.
///
/// The counter is advanced exactly once per renderer invocation and never
/// resets mid-run, so globally numbered frames never collide.
#[derive(Debug, Default, Clone)]
pub struct FrameCounter {
    next: usize,
}

impl FrameCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value and advances the counter.
    pub fn advance(&mut self) -> usize {
        let current = self.next;
        self.next += 1;
        current
    }

    /// Number of frames handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}

/// Where a frame sits within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSlot {
    /// Animation mode the frame belongs to.
    pub mode: String,
    /// Zero-based index within the mode.
    pub local_index: usize,
    /// Zero-based index within the whole run.
    pub global_index: usize,
}

/// A frame produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Path recorded in the manifest, relative to the output directory and
    /// always `/`-separated.
    pub rel_path: String,
    /// Location of the file on disk.
    pub path: PathBuf,
}

/// How frame files are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameNaming {
    /// `<subdir>/<prefix><global index, zero padded>`, e.g. `robot/frame007`.
    Global {
        subdir: Option<String>,
        prefix: String,
        width: usize,
    },
    /// `<subdir>/<mode>-<local index>`, e.g. `walk-3`.
    PerMode { subdir: Option<String> },
}

impl FrameNaming {
    /// Naming used by the robot pipeline: `robot/frame000`.
    pub fn robot() -> Self {
        FrameNaming::Global {
            subdir: Some("robot".to_string()),
            prefix: "frame".to_string(),
            width: 3,
        }
    }

    /// Naming used by the figure pipeline: `walk-0`.
    pub fn figure() -> Self {
        FrameNaming::PerMode { subdir: None }
    }

    /// Subdirectory frames are written to, if any.
    pub fn subdir(&self) -> Option<&str> {
        match self {
            FrameNaming::Global { subdir, .. } | FrameNaming::PerMode { subdir } => {
                subdir.as_deref()
            }
        }
    }

    /// File stem of a frame (relative, no extension, `/`-separated).
    pub fn stem(&self, slot: &FrameSlot) -> String {
        let name = match self {
            FrameNaming::Global { prefix, width, .. } => {
                format!("{}{:0width$}", prefix, slot.global_index, width = *width)
            }
            FrameNaming::PerMode { .. } => format!("{}-{}", slot.mode, slot.local_index),
        };

        match self.subdir() {
            Some(dir) if !dir.is_empty() => format!("{}/{}", dir.trim_end_matches('/'), name),
            _ => name,
        }
    }

    /// Relative path of a frame with the given extension.
    pub fn rel_path(&self, slot: &FrameSlot, extension: &str) -> String {
        format!("{}.{}", self.stem(slot), extension)
    }

    /// Absolute path of a frame stem under `out_dir` (no extension).
    pub fn stem_path(&self, out_dir: &Path, slot: &FrameSlot) -> PathBuf {
        let stem = self.stem(slot);
        stem.split('/').fold(out_dir.to_path_buf(), |acc, part| acc.join(part))
    }
}

/// Appends `suffix` to the final path component without touching any dots
/// already in it (`walk.left-2` + `.png` is `walk.left-2.png`).
pub fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
