//! Error types for external tool handling.

use std::path::PathBuf;

use robosprite_core::BackendError;
use thiserror::Error;

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while locating or running an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool could not be found anywhere.
    #[error("{tool} not found. Install it and make sure it is in PATH, or set {env_var}")]
    NotFound { tool: String, env_var: String },

    /// An explicitly configured tool path does not exist.
    #[error("{tool} not found at configured path {path}")]
    ConfiguredPathMissing { tool: String, path: PathBuf },

    /// Failed to spawn the process.
    #[error("Failed to spawn {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish in time and was killed.
    #[error("{tool} timed out after {timeout_secs} seconds")]
    Timeout { tool: String, timeout_secs: u64 },

    /// The process exited with a non-zero status.
    #[error("{tool} exited with status {exit_code}: {stderr}")]
    ProcessFailed {
        tool: String,
        exit_code: i32,
        stderr: String,
    },
}

impl ToolError {
    /// Creates a new process failed error.
    pub fn process_failed(tool: impl Into<String>, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            tool: tool.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Name of the tool involved.
    pub fn tool(&self) -> &str {
        match self {
            ToolError::NotFound { tool, .. }
            | ToolError::ConfiguredPathMissing { tool, .. }
            | ToolError::SpawnFailed { tool, .. }
            | ToolError::Timeout { tool, .. }
            | ToolError::ProcessFailed { tool, .. } => tool,
        }
    }
}

impl BackendError for ToolError {
    fn code(&self) -> &'static str {
        match self {
            ToolError::NotFound { .. } => "TOOL_001",
            ToolError::ConfiguredPathMissing { .. } => "TOOL_002",
            ToolError::SpawnFailed { .. } => "TOOL_003",
            ToolError::Timeout { .. } => "TOOL_004",
            ToolError::ProcessFailed { .. } => "TOOL_005",
        }
    }

    fn category(&self) -> &'static str {
        "tool"
    }
}
