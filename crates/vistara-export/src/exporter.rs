//! # Document Exporter
//!
//! Captures a rendered bill and assembles it into a PDF.
//!
//! ## Export Flow
//! ```text
//! export(surface)
//!   │
//!   ├── surface is None ─────────────────► SurfaceUnavailable
//!   ├── another export running ──────────► ExportInFlight
//!   │
//!   ├── 1. capture_snapshot  (blocking pool, export options)
//!   │        └── failure ─► returned as-is, nothing is assembled
//!   │
//!   └── 2. build_document    (blocking pool, only after capture succeeded)
//!            └──► DocumentArtifact "bill_preview.pdf"
//! ```
//!
//! The in-flight flag is cleared on every exit path, so a failed export
//! never blocks the next one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::document::DocumentArtifact;
use crate::error::{ExportError, ExportResult};
use crate::renderer::{CaptureOptions, Renderer, SurfaceHandle};

/// Drives exports against a shared renderer.
pub struct DocumentExporter<R: Renderer> {
    renderer: Arc<R>,
    in_flight: AtomicBool,
}

impl<R: Renderer> DocumentExporter<R> {
    pub fn new(renderer: Arc<R>) -> Self {
        DocumentExporter {
            renderer,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn renderer(&self) -> &Arc<R> {
        &self.renderer
    }

    /// True while an export is running.
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Produces the bill document for a rendered surface.
    ///
    /// Capture and assembly run strictly in that order; the artifact is
    /// returned to the caller and not kept.
    #[instrument(skip_all, fields(surface = surface.map(|s| s.id())))]
    pub async fn export(&self, surface: Option<SurfaceHandle>) -> ExportResult<DocumentArtifact> {
        let surface = surface.ok_or_else(|| {
            warn!("Export requested without a rendered surface");
            ExportError::SurfaceUnavailable("no surface to capture".to_string())
        })?;

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            warn!(%surface, "Export rejected, another export is running");
            ExportError::ExportInFlight
        })?;

        info!(%surface, "Export started");
        let result = self.capture_and_build(surface).await;
        match &result {
            Ok(artifact) => info!(
                %surface,
                file = artifact.file_name(),
                bytes = artifact.bytes().len(),
                height_mm = artifact.layout().height_mm,
                "Export complete"
            ),
            Err(e) => error!(%surface, error = %e, "Export failed"),
        }
        result
    }

    async fn capture_and_build(&self, surface: SurfaceHandle) -> ExportResult<DocumentArtifact> {
        let renderer = Arc::clone(&self.renderer);
        let raster = tokio::task::spawn_blocking(move || {
            renderer.capture_snapshot(surface, &CaptureOptions::for_export())
        })
        .await??;

        let renderer = Arc::clone(&self.renderer);
        tokio::task::spawn_blocking(move || renderer.build_document(&raster)).await?
    }
}

/// Holds the in-flight flag for the duration of one export.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
