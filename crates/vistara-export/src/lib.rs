//! # Vistara Export
//!
//! Turns a rendered bill preview into a downloadable single-page PDF.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          vistara-export                              │
//! │                                                                     │
//! │   Preview ──► layout ──► RasterRenderer ──► SurfaceHandle            │
//! │                               │                   │                 │
//! │                               │ impl Renderer     ▼                 │
//! │                               │           DocumentExporter          │
//! │                               │                   │                 │
//! │                               │  capture_snapshot │ (blocking pool) │
//! │                               ◄───────────────────┤                 │
//! │                                  RasterImage      │                 │
//! │                                                   ▼                 │
//! │                                  build_document ──► DocumentArtifact │
//! │                                                     bill_preview.pdf │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`renderer`] - the capability the exporter captures from
//! - [`layout`] - preview → display list
//! - [`raster`] - the bundled renderer
//! - [`document`] - page geometry and PDF assembly
//! - [`exporter`] - the export flow
//! - [`error`] - export errors

pub mod document;
pub mod error;
pub mod exporter;
pub mod layout;
pub mod raster;
pub mod renderer;

pub use document::{build_pdf, DocumentArtifact, PageLayout, PAGE_WIDTH_MM};
pub use error::{CaptureError, ExportError, ExportResult};
pub use exporter::DocumentExporter;
pub use layout::{ImageOrigin, Logo, DEFAULT_SURFACE_WIDTH};
pub use raster::RasterRenderer;
pub use renderer::{CaptureOptions, RasterImage, Renderer, SurfaceHandle, EXPORT_SCALE};
