//! Error types shared by the pipeline and the rendering backends.

use thiserror::Error;

use crate::manifest::ManifestError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Common interface for errors raised by rendering backends.
///
/// Backends keep their own error enums; this trait lets the pipeline and the
/// CLI report them uniformly with a stable code.
///
/// # Example
///
/// ```ignore
/// use robosprite_core::error::BackendError;
///
/// fn describe<E: BackendError>(err: &E) -> String {
///     format!("[{}] {}", err.code(), err.message())
/// }
/// ```
pub trait BackendError: std::error::Error + Send + Sync + 'static {
    /// Stable error code such as "SVG_002" or "POVRAY_004".
    fn code(&self) -> &'static str;

    /// Human-readable message; defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category, e.g. "svg" or "povray".
    fn category(&self) -> &'static str;
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The renderer failed on a frame. The run stops because a manifest has no
    /// way to express a missing frame.
    #[error("[{code}] Failed to render frame {index} of mode '{mode}': {message}")]
    Render {
        mode: String,
        index: usize,
        code: &'static str,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The renderer could not get ready for the run (missing scene, tool not
    /// found, unwritable output directory).
    #[error("[{code}] Renderer setup failed: {message}")]
    Prepare {
        code: &'static str,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing the manifest failed.
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// A mode was declared twice in one catalog.
    #[error("Duplicate animation mode '{0}'")]
    DuplicateMode(String),
}

impl PipelineError {
    /// Wraps a backend error raised while rendering `index` of `mode`.
    pub fn render<E: BackendError>(mode: impl Into<String>, index: usize, err: E) -> Self {
        Self::Render {
            mode: mode.into(),
            index,
            code: err.code(),
            message: err.message(),
            source: Box::new(err),
        }
    }

    /// Wraps a backend error raised while preparing the renderer.
    pub fn prepare<E: BackendError>(err: E) -> Self {
        Self::Prepare {
            code: err.code(),
            message: err.message(),
            source: Box::new(err),
        }
    }

    /// Returns the backend error code, if a backend caused this error.
    pub fn backend_code(&self) -> Option<&'static str> {
        match self {
            PipelineError::Render { code, .. } | PipelineError::Prepare { code, .. } => Some(code),
            _ => None,
        }
    }
}
