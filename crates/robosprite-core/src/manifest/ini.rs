//! Sectioned key/value manifest format.
//!
//! ```text
//! # This file is generated automatically from robot.pov
//!
//! [walk_d]
//! img0 = robot/frame000.png
//! img1 = robot/frame001.png
//! ```

use std::io::Write;

use super::{Manifest, ManifestError, ManifestResult, ManifestWriter, ModeCursor};

/// Streaming writer for the INI format.
pub struct IniManifestWriter<W: Write> {
    out: W,
    cursor: ModeCursor,
}

impl<W: Write> IniManifestWriter<W> {
    /// Creates a writer and emits the generated-file comment.
    pub fn new(mut out: W, source: &str) -> ManifestResult<Self> {
        writeln!(out, "# This file is generated automatically from {}", source)?;
        writeln!(out)?;
        Ok(Self {
            out,
            cursor: ModeCursor::default(),
        })
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ManifestWriter for IniManifestWriter<W> {
    fn begin_mode(&mut self, name: &str) -> ManifestResult<()> {
        self.cursor.begin(name)?;
        writeln!(self.out, "[{}]", name)?;
        Ok(())
    }

    fn frame(&mut self, index: usize, path: &str) -> ManifestResult<()> {
        self.cursor.frame(index, path)?;
        writeln!(self.out, "img{} = {}", index, path)?;
        Ok(())
    }

    fn end_mode(&mut self) -> ManifestResult<()> {
        self.cursor.end();
        Ok(())
    }

    fn finish(&mut self) -> ManifestResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

pub(super) fn parse(text: &str) -> ManifestResult<Manifest> {
    let mut manifest = Manifest::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| ManifestError::parse(line_no, "unterminated section header"))?
                .trim();
            if name.is_empty() {
                return Err(ManifestError::parse(line_no, "empty section name"));
            }
            manifest.push_mode(name);
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| ManifestError::parse(line_no, format!("expected key = value, got '{}'", line)))?;
        let (key, value) = (key.trim(), value.trim());

        let index: usize = key
            .strip_prefix("img")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| ManifestError::parse(line_no, format!("unexpected key '{}'", key)))?;

        let Some(mode) = manifest.modes.last() else {
            return Err(ManifestError::parse(line_no, "frame outside of a section"));
        };
        if index != mode.frames.len() {
            return Err(ManifestError::FrameIndexGap {
                mode: mode.name.clone(),
                expected: mode.frames.len(),
                found: index,
            });
        }
        manifest.push_frame(value);
    }

    Ok(manifest)
}
