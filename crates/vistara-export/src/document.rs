//! # Document Artifact
//!
//! Fits a raster snapshot onto a single page of fixed width and embeds it
//! as a PDF.
//!
//! ## Page Geometry
//! ```text
//!   ◄──────────── W = 210 mm ────────────►
//!  ┌──────────────────────────────────────┐ ▲
//!  │ (0,0)                                │ │
//!  │        raster, full-bleed            │ │ H = raster_h × W / raster_w
//!  │        no crop, no letterbox         │ │
//!  │                                      │ │
//!  └──────────────────────────────────────┘ ▼
//! ```

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::image_crate::DynamicImage;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use tracing::{debug, info};

use vistara_core::EXPORT_FILE_NAME;

use crate::error::{ExportError, ExportResult};
use crate::renderer::RasterImage;

/// Page width in millimetres (A4 width).
pub const PAGE_WIDTH_MM: f32 = 210.0;

const MM_PER_INCH: f32 = 25.4;

// =============================================================================
// Page Layout
// =============================================================================

/// Size of the single page a snapshot is placed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageLayout {
    /// Fits a raster to the fixed page width, preserving aspect ratio.
    ///
    /// ```rust
    /// use vistara_export::PageLayout;
    ///
    /// let page = PageLayout::fit(1200, 1600).unwrap();
    /// assert_eq!(page.width_mm, 210.0);
    /// assert_eq!(page.height_mm, 280.0);
    /// ```
    pub fn fit(raster_width: u32, raster_height: u32) -> ExportResult<Self> {
        if raster_width == 0 || raster_height == 0 {
            return Err(ExportError::Layout(format!(
                "cannot fit a {}x{} raster to a page",
                raster_width, raster_height
            )));
        }

        Ok(PageLayout {
            width_mm: PAGE_WIDTH_MM,
            height_mm: (raster_height as f64 * PAGE_WIDTH_MM as f64 / raster_width as f64) as f32,
        })
    }

    /// DPI at which a raster of this width spans the full page width.
    pub fn dpi_for(&self, raster_width: u32) -> f32 {
        raster_width as f32 * MM_PER_INCH / self.width_mm
    }
}

// =============================================================================
// Document Artifact
// =============================================================================

/// A finished, single-page PDF.
///
/// Handed to the caller and not retained by the exporter.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    file_name: &'static str,
    layout: PageLayout,
    bytes: Vec<u8>,
}

impl DocumentArtifact {
    pub fn new(layout: PageLayout, bytes: Vec<u8>) -> Self {
        DocumentArtifact {
            file_name: EXPORT_FILE_NAME,
            layout,
            bytes,
        }
    }

    /// Always `bill_preview.pdf`.
    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the artifact into `dir` under its fixed name.
    pub async fn save_in(&self, dir: &Path) -> ExportResult<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;

        info!(?path, bytes = self.bytes.len(), "Bill document saved");
        Ok(path)
    }
}

// =============================================================================
// PDF Assembly
// =============================================================================

/// Embeds a raster full-bleed on a single page at the origin.
pub fn build_pdf(raster: &RasterImage) -> ExportResult<DocumentArtifact> {
    let layout = PageLayout::fit(raster.width(), raster.height())?;
    debug!(
        raster_width = raster.width(),
        raster_height = raster.height(),
        height_mm = layout.height_mm,
        "Page layout computed"
    );

    let (doc, page, layer) = PdfDocument::new(
        "Bill Preview",
        Mm(layout.width_mm),
        Mm(layout.height_mm),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(raster.pixels().clone()));
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(layout.dpi_for(raster.width())),
            ..Default::default()
        },
    );

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Document(e.to_string()))?;

    Ok(DocumentArtifact::new(layout, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn raster(width: u32, height: u32) -> RasterImage {
        RasterImage::new(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let page = PageLayout::fit(1200, 1697).unwrap();
        assert_eq!(page.width_mm, PAGE_WIDTH_MM);
        let expected = 1697.0 * 210.0 / 1200.0;
        assert!((page.height_mm - expected).abs() < 1e-3);
    }

    #[test]
    fn test_fit_rejects_empty_raster() {
        assert!(matches!(PageLayout::fit(0, 10), Err(ExportError::Layout(_))));
        assert!(matches!(PageLayout::fit(10, 0), Err(ExportError::Layout(_))));
    }

    #[test]
    fn test_dpi_spans_page_width() {
        let page = PageLayout::fit(1200, 600).unwrap();
        let dpi = page.dpi_for(1200);
        let width_mm = 1200.0 / dpi * MM_PER_INCH;
        assert!((width_mm - PAGE_WIDTH_MM).abs() < 1e-3);
    }

    #[test]
    fn test_build_pdf() {
        let artifact = build_pdf(&raster(40, 80)).unwrap();

        assert_eq!(artifact.file_name(), "bill_preview.pdf");
        assert_eq!(artifact.layout().width_mm, 210.0);
        assert!((artifact.layout().height_mm - 420.0).abs() < 1e-3);
        assert!(artifact.bytes().starts_with(b"%PDF"));
    }

    #[test]
    fn test_rebuild_gives_same_geometry() {
        let snapshot = raster(300, 500);
        let first = build_pdf(&snapshot).unwrap();
        let second = build_pdf(&snapshot).unwrap();
        assert_eq!(first.layout(), second.layout());
    }

    #[tokio::test]
    async fn test_save_in_uses_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = build_pdf(&raster(10, 10)).unwrap();

        let path = artifact.save_in(dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join("bill_preview.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes());
    }
}
