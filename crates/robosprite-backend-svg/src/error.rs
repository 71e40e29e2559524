//! Error types for the vector backend.

use std::path::PathBuf;

use robosprite_core::BackendError;
use robosprite_tool::ToolError;
use thiserror::Error;

/// Result type for vector backend operations.
pub type SvgResult<T> = Result<T, SvgError>;

/// Errors that can occur while rendering figure frames.
#[derive(Debug, Error)]
pub enum SvgError {
    /// Inkscape could not be located, spawned, or exited unsuccessfully.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The intermediate SVG could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteSvg {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The intermediate SVG could not be removed.
    #[error("Failed to remove intermediate file {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inkscape reported success but produced no PNG.
    #[error("Expected output file not found: {path}")]
    OutputNotFound { path: PathBuf },
}

impl BackendError for SvgError {
    fn code(&self) -> &'static str {
        match self {
            SvgError::Tool(err) => err.code(),
            SvgError::CreateDir { .. } => "SVG_001",
            SvgError::WriteSvg { .. } => "SVG_002",
            SvgError::Cleanup { .. } => "SVG_003",
            SvgError::OutputNotFound { .. } => "SVG_004",
        }
    }

    fn category(&self) -> &'static str {
        "svg"
    }
}
