//! CLI command implementations

pub mod doctor;
pub mod inspect;
pub mod man;
pub mod plan;
pub mod robot;

use std::env;
use std::fs;
use std::io::BufWriter;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use robosprite_core::{
    AnimationMode, FrameRenderer, GenerationReport, Generator, ManifestFormat, ManifestResult,
    ManifestWriter,
};
use tempfile::NamedTempFile;

/// A manifest being written to a temporary file next to its destination.
///
/// The destination is only replaced by [`PendingManifest::commit`], so a
/// failed run never leaves a manifest that lists frames which do not exist.
///
/// Frame paths arrive relative to the output directory and are recorded
/// relative to the manifest's own directory.
pub(crate) struct PendingManifest {
    tmp: NamedTempFile,
    path: PathBuf,
    format: ManifestFormat,
    prefix: String,
}

impl PendingManifest {
    pub(crate) fn create(path: &Path, format: ManifestFormat, out_dir: &Path) -> Result<Self> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        let tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary manifest in {}", parent.display()))?;
        let prefix = relative_prefix(parent, out_dir)?;
        Ok(Self {
            tmp,
            path: path.to_path_buf(),
            format,
            prefix,
        })
    }

    pub(crate) fn writer(&mut self, source: &str) -> Result<Box<dyn ManifestWriter + '_>> {
        let out = BufWriter::new(self.tmp.as_file_mut());
        let inner = self.format.writer(out, source)?;
        if self.prefix.is_empty() {
            return Ok(inner);
        }
        Ok(Box::new(RebasedWriter {
            inner,
            prefix: self.prefix.clone(),
        }))
    }

    pub(crate) fn commit(self) -> Result<PathBuf> {
        let path = self.path;
        self.tmp
            .persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(path)
    }
}

/// Prepends a directory prefix to every recorded frame path.
struct RebasedWriter<'a> {
    inner: Box<dyn ManifestWriter + 'a>,
    prefix: String,
}

impl ManifestWriter for RebasedWriter<'_> {
    fn begin_mode(&mut self, name: &str) -> ManifestResult<()> {
        self.inner.begin_mode(name)
    }

    fn frame(&mut self, index: usize, path: &str) -> ManifestResult<()> {
        self.inner.frame(index, &format!("{}{}", self.prefix, path))
    }

    fn end_mode(&mut self) -> ManifestResult<()> {
        self.inner.end_mode()
    }

    fn finish(&mut self) -> ManifestResult<()> {
        self.inner.finish()
    }
}

/// Absolute, lexically normalized form of `path`.
fn normalize(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .context("Failed to read the current directory")?
            .join(path)
    };
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

/// `/`-separated path leading from directory `base` to directory `target`,
/// with a trailing `/`. Empty when both are the same directory.
pub(crate) fn relative_prefix(base: &Path, target: &Path) -> Result<String> {
    let base = normalize(base)?;
    let target = normalize(target)?;

    let base_parts: Vec<Component> = base.components().collect();
    let target_parts: Vec<Component> = target.components().collect();
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    // Different roots (e.g. Windows drives): no relative path exists.
    if common == 0 {
        return Ok(format!("{}/", target.to_string_lossy().replace('\\', "/")));
    }

    let mut prefix = String::new();
    for _ in common..base_parts.len() {
        prefix.push_str("../");
    }
    for part in &target_parts[common..] {
        prefix.push_str(&part.as_os_str().to_string_lossy());
        prefix.push('/');
    }
    Ok(prefix)
}

/// Runs `renderer` over `modes`, recording into `manifest` when given.
pub(crate) fn generate<R: FrameRenderer>(
    renderer: R,
    modes: &[AnimationMode<R::Pose>],
    manifest: Option<&mut PendingManifest>,
    source: &str,
) -> Result<GenerationReport> {
    let mut generator = Generator::new(renderer);
    if let Some(pending) = manifest {
        generator = generator.with_manifest(pending.writer(source)?);
    }
    Ok(generator.run(modes)?)
}

/// Prints the closing summary of a generation run.
pub(crate) fn print_report(report: &GenerationReport, out_dir: &Path, manifest: Option<&Path>) {
    println!(
        "{} Generated {} frames in {} modes ({:.1}s)",
        "SUCCESS".green().bold(),
        report.frames_rendered,
        report.manifest.mode_count(),
        report.duration.as_secs_f64()
    );
    println!("  {} frames: {}", "->".green(), out_dir.display());
    if let Some(path) = manifest {
        println!("  {} manifest: {}", "->".green(), path.display());
    }
}

/// Resolves `<dir>/<stem>.<ext>`.
pub(crate) fn default_manifest_path(dir: &Path, stem: &str, format: ManifestFormat) -> PathBuf {
    dir.join(format!("{}.{}", stem, format.extension()))
}
