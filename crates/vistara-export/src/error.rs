//! # Export Error Types
//!
//! Every way turning a rendered bill into a document can fail.
//!
//! ## Error Hierarchy
//! ```text
//! ExportError
//! ├── SurfaceUnavailable   - no surface, or the handle was released
//! ├── ExportInFlight       - a second export while one is running
//! ├── Capture(CaptureError)
//! │   ├── TaintedCanvas    - cross-origin image without permission
//! │   └── Unsupported      - empty or oversized canvas
//! ├── Layout               - raster cannot be fitted to a page
//! ├── Document             - PDF assembly failed
//! ├── Io                   - writing the artifact failed
//! └── TaskFailed           - a blocking task panicked
//! ```
//!
//! None of these are swallowed: a failed export always reaches the caller.

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Export error type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The surface handle is missing or no longer registered.
    #[error("Render surface is not available: {0}")]
    SurfaceUnavailable(String),

    /// Another export is still running.
    #[error("An export is already in progress")]
    ExportInFlight,

    /// Rasterizing the surface failed.
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    /// The snapshot cannot be laid out on a page.
    #[error("Page layout failed: {0}")]
    Layout(String),

    /// Building the PDF failed.
    #[error("Document assembly failed: {0}")]
    Document(String),

    /// Persisting the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking capture/assembly task did not complete.
    #[error("Export task failed: {0}")]
    TaskFailed(String),
}

/// Why a surface could not be rasterized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The surface embeds a cross-origin image and the capture did not
    /// allow cross-origin content.
    #[error("surface contains a cross-origin image")]
    TaintedCanvas,

    /// The surface cannot be rasterized at the requested size.
    #[error("unsupported surface: {0}")]
    Unsupported(String),
}

impl From<printpdf::Error> for ExportError {
    fn from(err: printpdf::Error) -> Self {
        ExportError::Document(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExportError::TaskFailed(err.to_string())
    }
}
