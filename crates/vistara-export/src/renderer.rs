//! # Renderer Capability
//!
//! The export pipeline only needs two things from a rendering backend:
//! a raster snapshot of an already-rendered surface, and a document built
//! from that snapshot. Any backend implementing [`Renderer`] can be
//! exported; [`RasterRenderer`](crate::raster::RasterRenderer) is the
//! bundled one.

use std::fmt;

use image::RgbImage;

use crate::document::{self, DocumentArtifact};
use crate::error::ExportResult;

/// Oversampling factor used for exported snapshots.
pub const EXPORT_SCALE: u32 = 2;

// =============================================================================
// Surface Handle
// =============================================================================

/// Opaque reference to a surface a renderer has drawn.
///
/// Only meaningful to the renderer that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    pub const fn new(id: u64) -> Self {
        SurfaceHandle(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

// =============================================================================
// Capture Options
// =============================================================================

/// How a surface is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Include images from other origins instead of refusing to capture.
    pub allow_cross_origin: bool,

    /// Device pixels per logical pixel.
    pub scale: u32,

    /// Undo the surface's vertical scroll so the snapshot starts at the top.
    pub compensate_scroll: bool,
}

impl CaptureOptions {
    /// Options every export uses: cross-origin allowed, 2× oversampling,
    /// scroll compensated.
    pub const fn for_export() -> Self {
        CaptureOptions {
            allow_cross_origin: true,
            scale: EXPORT_SCALE,
            compensate_scroll: true,
        }
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            allow_cross_origin: false,
            scale: 1,
            compensate_scroll: false,
        }
    }
}

// =============================================================================
// Raster Image
// =============================================================================

/// A captured snapshot, RGB 8 bits per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbImage,
}

impl RasterImage {
    pub fn new(pixels: RgbImage) -> Self {
        RasterImage { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbImage {
        self.pixels
    }
}

// =============================================================================
// Renderer Trait
// =============================================================================

/// A rendering backend the exporter can capture from.
///
/// Methods are synchronous and may be slow; the exporter calls them on the
/// blocking pool.
pub trait Renderer: Send + Sync + 'static {
    /// Rasterizes an already-rendered surface.
    ///
    /// Must fail with
    /// [`ExportError::SurfaceUnavailable`](crate::ExportError::SurfaceUnavailable)
    /// for a handle it does not know.
    fn capture_snapshot(
        &self,
        surface: SurfaceHandle,
        options: &CaptureOptions,
    ) -> ExportResult<RasterImage>;

    /// Builds the document for a snapshot.
    ///
    /// Defaults to a single 210 mm wide page with the raster full-bleed.
    fn build_document(&self, raster: &RasterImage) -> ExportResult<DocumentArtifact> {
        document::build_pdf(raster)
    }
}
