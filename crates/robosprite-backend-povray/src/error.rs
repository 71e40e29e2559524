//! Error types for the ray-traced backend.

use std::path::PathBuf;

use robosprite_core::BackendError;
use robosprite_tool::ToolError;
use thiserror::Error;

/// Result type for ray-traced backend operations.
pub type PovrayResult<T> = Result<T, PovrayError>;

/// Errors that can occur while rendering robot frames.
#[derive(Debug, Error)]
pub enum PovrayError {
    /// POV-Ray or ImageMagick could not be located, spawned, or failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The scene file does not exist.
    #[error("Scene file not found: {path}")]
    SceneNotFound { path: PathBuf },

    /// The scene path has no file name.
    #[error("Invalid scene path: {path}")]
    InvalidScenePath { path: PathBuf },

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pose parameter file could not be written.
    #[error("Failed to write pose parameters to {path}: {source}")]
    WriteOptions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An intermediate file could not be removed.
    #[error("Failed to remove intermediate file {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tool reported success but its output file is missing.
    #[error("Expected output file not found: {path}")]
    OutputNotFound { path: PathBuf },
}

impl BackendError for PovrayError {
    fn code(&self) -> &'static str {
        match self {
            PovrayError::Tool(err) => err.code(),
            PovrayError::SceneNotFound { .. } => "POVRAY_001",
            PovrayError::InvalidScenePath { .. } => "POVRAY_002",
            PovrayError::CreateDir { .. } => "POVRAY_003",
            PovrayError::WriteOptions { .. } => "POVRAY_004",
            PovrayError::Cleanup { .. } => "POVRAY_005",
            PovrayError::OutputNotFound { .. } => "POVRAY_006",
        }
    }

    fn category(&self) -> &'static str {
        "povray"
    }
}
