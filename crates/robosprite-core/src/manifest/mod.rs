//! Sprite manifests.
//!
//! A manifest maps each animation mode to the ordered list of its frame
//! files. Two textual formats are supported and produce the same model:
//!
//! - **INI**: a `[mode]` header followed by `imgN = path` lines.
//! - **XML**: `<sprite>` containing `<mode name="...">` elements with
//!   `<frame img="..."/>` children.
//!
//! Writers are streaming so that each frame can be recorded right after it is
//! rendered. Neither writer checks that the referenced files exist.

mod ini;
mod xml;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ini::IniManifestWriter;
pub use xml::XmlManifestWriter;

/// Result type for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors raised while writing or parsing manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Underlying writer or file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame was recorded before any mode was opened.
    #[error("Frame '{path}' recorded outside of a mode")]
    NoOpenMode { path: String },

    /// A mode was opened while another one was still open.
    #[error("Mode '{name}' opened before '{open}' was closed")]
    ModeStillOpen { name: String, open: String },

    /// Frames of a mode were not numbered 0, 1, 2, ...
    #[error("Mode '{mode}': expected frame index {expected}, found {found}")]
    FrameIndexGap {
        mode: String,
        expected: usize,
        found: usize,
    },

    /// Malformed manifest text.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Format name or file extension not recognized.
    #[error("Unknown manifest format '{0}' (expected ini or xml)")]
    UnknownFormat(String),
}

impl ManifestError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Manifest text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestFormat {
    /// Sectioned key/value format.
    Ini,
    /// Minimal hierarchical markup.
    Xml,
}

impl ManifestFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ManifestFormat::Ini => "ini",
            ManifestFormat::Xml => "xml",
        }
    }

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> ManifestResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }

    /// Creates a streaming writer for this format.
    ///
    /// The generated-file comment naming `source` is written immediately.
    pub fn writer<'a, W: Write + 'a>(
        &self,
        out: W,
        source: &str,
    ) -> ManifestResult<Box<dyn ManifestWriter + 'a>> {
        Ok(match self {
            ManifestFormat::Ini => Box::new(IniManifestWriter::new(out, source)?),
            ManifestFormat::Xml => Box::new(XmlManifestWriter::new(out, source)?),
        })
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ManifestFormat {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ini" => Ok(ManifestFormat::Ini),
            "xml" => Ok(ManifestFormat::Xml),
            other => Err(ManifestError::UnknownFormat(other.to_string())),
        }
    }
}

/// Streaming manifest writer.
///
/// Calls must follow `begin_mode`, `frame`*, `end_mode`, repeated per mode,
/// then a single `finish`.
pub trait ManifestWriter {
    /// Opens a new mode.
    fn begin_mode(&mut self, name: &str) -> ManifestResult<()>;

    /// Records frame `index` of the open mode.
    fn frame(&mut self, index: usize, path: &str) -> ManifestResult<()>;

    /// Closes the open mode.
    fn end_mode(&mut self) -> ManifestResult<()>;

    /// Writes any trailer and flushes.
    fn finish(&mut self) -> ManifestResult<()>;
}

/// Bookkeeping shared by both writers: tracks the open mode and checks that
/// frame indices are contiguous.
#[derive(Debug, Default)]
pub(crate) struct ModeCursor {
    open: Option<String>,
    next_index: usize,
}

impl ModeCursor {
    pub(crate) fn begin(&mut self, name: &str) -> ManifestResult<()> {
        if let Some(open) = &self.open {
            return Err(ManifestError::ModeStillOpen {
                name: name.to_string(),
                open: open.clone(),
            });
        }
        self.open = Some(name.to_string());
        self.next_index = 0;
        Ok(())
    }

    pub(crate) fn frame(&mut self, index: usize, path: &str) -> ManifestResult<()> {
        let Some(mode) = &self.open else {
            return Err(ManifestError::NoOpenMode {
                path: path.to_string(),
            });
        };
        if index != self.next_index {
            return Err(ManifestError::FrameIndexGap {
                mode: mode.clone(),
                expected: self.next_index,
                found: index,
            });
        }
        self.next_index += 1;
        Ok(())
    }

    pub(crate) fn end(&mut self) -> bool {
        self.open.take().is_some()
    }
}

/// One mode of a parsed or collected manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestMode {
    /// Mode name.
    pub name: String,
    /// Frame paths in playback order.
    pub frames: Vec<String>,
}

/// In-memory manifest: modes in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    modes: Vec<ManifestMode>,
}

impl Manifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty mode.
    pub fn push_mode(&mut self, name: impl Into<String>) {
        self.modes.push(ManifestMode {
            name: name.into(),
            frames: Vec::new(),
        });
    }

    /// Appends a frame to the last mode. Returns false if there is no mode yet.
    pub fn push_frame(&mut self, path: impl Into<String>) -> bool {
        match self.modes.last_mut() {
            Some(mode) => {
                mode.frames.push(path.into());
                true
            }
            None => false,
        }
    }

    /// Modes in declaration order.
    pub fn modes(&self) -> &[ManifestMode] {
        &self.modes
    }

    /// Looks up a mode by name.
    pub fn mode(&self, name: &str) -> Option<&ManifestMode> {
        self.modes.iter().find(|m| m.name == name)
    }

    /// Number of modes.
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Total number of frames across all modes.
    pub fn frame_count(&self) -> usize {
        self.modes.iter().map(|m| m.frames.len()).sum()
    }

    /// Names from `required` that this manifest does not declare.
    pub fn missing_modes<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.mode(name).is_none())
            .collect()
    }

    /// Streams the whole manifest through `writer` and finishes it.
    pub fn write_with(&self, writer: &mut dyn ManifestWriter) -> ManifestResult<()> {
        for mode in &self.modes {
            writer.begin_mode(&mode.name)?;
            for (index, path) in mode.frames.iter().enumerate() {
                writer.frame(index, path)?;
            }
            writer.end_mode()?;
        }
        writer.finish()
    }

    /// Renders the manifest as text.
    pub fn to_text(&self, format: ManifestFormat, source: &str) -> ManifestResult<String> {
        let mut buf = Vec::new();
        {
            let mut writer = format.writer(&mut buf, source)?;
            self.write_with(writer.as_mut())?;
        }
        String::from_utf8(buf).map_err(|e| ManifestError::parse(0, e.to_string()))
    }

    /// Parses manifest text in the given format.
    pub fn parse(format: ManifestFormat, text: &str) -> ManifestResult<Self> {
        match format {
            ManifestFormat::Ini => ini::parse(text),
            ManifestFormat::Xml => xml::parse(text),
        }
    }

    /// Parses INI manifest text.
    pub fn parse_ini(text: &str) -> ManifestResult<Self> {
        ini::parse(text)
    }

    /// Parses XML manifest text.
    pub fn parse_xml(text: &str) -> ManifestResult<Self> {
        xml::parse(text)
    }

    /// Reads and parses a manifest file, picking the format from its extension.
    pub fn from_file(path: &Path) -> ManifestResult<Self> {
        let format = ManifestFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        Self::parse(format, &text)
    }
}
