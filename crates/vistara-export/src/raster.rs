//! # Raster Renderer
//!
//! The bundled [`Renderer`]: lays previews out into surfaces, keeps them
//! registered by handle, and rasterizes them on capture.
//!
//! ## Capture
//! ```text
//! capture_snapshot(handle, options)
//!      │
//!      ├── handle unknown? ──────────────► SurfaceUnavailable
//!      ├── cross-origin image, not allowed? ► TaintedCanvas
//!      ├── canvas empty or > 32767 px? ──► Unsupported
//!      │
//!      ▼
//! white canvas (width × scale, height × scale)
//!      │  every op drawn at (x, y − offset) × scale,
//!      │  offset = 0 when scroll is compensated, else the scroll position
//!      ▼
//! RasterImage
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::{debug, instrument};

use vistara_core::Preview;

use crate::error::{CaptureError, ExportError, ExportResult};
use crate::layout::{self, DrawOp, ImageOrigin, Logo, Surface, GLYPH_PX, PAPER};
use crate::renderer::{CaptureOptions, RasterImage, Renderer, SurfaceHandle};

/// Largest canvas side, in device pixels, a capture will allocate.
pub const MAX_CANVAS_SIDE: u32 = 32_767;

/// Renders bill previews to in-memory surfaces.
#[derive(Debug)]
pub struct RasterRenderer {
    width: u32,
    logo: Option<Logo>,
    next_id: AtomicU64,
    surfaces: Mutex<HashMap<SurfaceHandle, Surface>>,
}

impl RasterRenderer {
    /// Creates a renderer producing surfaces `width` logical px wide.
    pub fn new(width: u32) -> Self {
        RasterRenderer {
            width,
            logo: None,
            next_id: AtomicU64::new(1),
            surfaces: Mutex::new(HashMap::new()),
        }
    }

    /// Shows `logo` in the header instead of the placeholder.
    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Lays out a preview and registers the resulting surface.
    #[instrument(skip_all, fields(rows = preview.rows.len()))]
    pub fn render(&self, preview: &Preview) -> SurfaceHandle {
        let surface = layout::layout_preview(preview, self.width, self.logo.as_ref());
        self.insert(surface)
    }

    /// Registers an already laid-out surface.
    pub fn insert(&self, surface: Surface) -> SurfaceHandle {
        let handle = SurfaceHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(%handle, width = surface.width, height = surface.height, "Surface rendered");
        self.lock().insert(handle, surface);
        handle
    }

    /// Sets how far the surface's container is scrolled.
    pub fn scroll_to(&self, handle: SurfaceHandle, scroll_y: u32) -> ExportResult<()> {
        let mut surfaces = self.lock();
        let surface = surfaces
            .get_mut(&handle)
            .ok_or_else(|| unavailable(handle))?;
        surface.scroll_y = scroll_y.min(surface.height);
        Ok(())
    }

    /// Drops a surface. Later captures of the handle fail.
    pub fn release(&self, handle: SurfaceHandle) -> bool {
        self.lock().remove(&handle).is_some()
    }

    /// Size of a registered surface in logical px.
    pub fn surface_size(&self, handle: SurfaceHandle) -> Option<(u32, u32)> {
        self.lock().get(&handle).map(|s| (s.width, s.height))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SurfaceHandle, Surface>> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RasterRenderer {
    fn default() -> Self {
        RasterRenderer::new(layout::DEFAULT_SURFACE_WIDTH)
    }
}

impl Renderer for RasterRenderer {
    #[instrument(skip(self, options), fields(scale = options.scale))]
    fn capture_snapshot(
        &self,
        surface: SurfaceHandle,
        options: &CaptureOptions,
    ) -> ExportResult<RasterImage> {
        let surfaces = self.lock();
        let surface = surfaces.get(&surface).ok_or_else(|| unavailable(surface))?;
        rasterize(surface, options)
    }
}

fn unavailable(handle: SurfaceHandle) -> ExportError {
    ExportError::SurfaceUnavailable(format!("{handle} is not registered"))
}

// =============================================================================
// Rasterization
// =============================================================================

/// Draws a surface's display list onto a fresh canvas.
pub fn rasterize(surface: &Surface, options: &CaptureOptions) -> ExportResult<RasterImage> {
    let scale = options.scale.max(1);

    if !options.allow_cross_origin
        && surface.ops.iter().any(|op| {
            matches!(
                op,
                DrawOp::Image {
                    origin: ImageOrigin::CrossOrigin,
                    ..
                }
            )
        })
    {
        return Err(CaptureError::TaintedCanvas.into());
    }

    let width = surface.width.checked_mul(scale);
    let height = surface.height.checked_mul(scale);
    let (width, height) = match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 && w <= MAX_CANVAS_SIDE && h <= MAX_CANVAS_SIDE => {
            (w, h)
        }
        _ => {
            return Err(CaptureError::Unsupported(format!(
                "{}x{} at {}x exceeds canvas limits",
                surface.width, surface.height, scale
            ))
            .into())
        }
    };

    let offset = if options.compensate_scroll {
        0
    } else {
        surface.scroll_y as i32
    };

    let mut canvas = RgbImage::from_pixel(width, height, PAPER);
    let s = scale as i32;
    for op in &surface.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                size,
                bold,
                color,
            } => draw_text(&mut canvas, x * s, (y - offset) * s, text, size * scale, *bold, *color),
            DrawOp::Rule { x, y, width, color } => {
                fill_rect(&mut canvas, x * s, (y - offset) * s, width * scale, scale, *color)
            }
            DrawOp::Frame {
                x,
                y,
                width,
                height,
                color,
            } => draw_frame(
                &mut canvas,
                x * s,
                (y - offset) * s,
                width * scale,
                height * scale,
                scale,
                *color,
            ),
            DrawOp::Image {
                x,
                y,
                width,
                height,
                image,
                ..
            } => {
                let scaled = imageops::resize(
                    &**image,
                    width * scale,
                    height * scale,
                    FilterType::Triangle,
                );
                imageops::overlay(
                    &mut canvas,
                    &scaled,
                    (x * s) as i64,
                    ((y - offset) * s) as i64,
                );
            }
        }
    }

    Ok(RasterImage::new(canvas))
}

/// Fills a rectangle, clipped to the canvas.
fn fill_rect(canvas: &mut RgbImage, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
    let x0 = x.max(0) as u32;
    let y0 = y.max(0) as u32;
    let x1 = (x.saturating_add(width as i32)).clamp(0, canvas.width() as i32) as u32;
    let y1 = (y.saturating_add(height as i32)).clamp(0, canvas.height() as i32) as u32;

    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn draw_frame(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    stroke: u32,
    color: Rgb<u8>,
) {
    let right = x + width as i32 - stroke as i32;
    let bottom = y + height as i32 - stroke as i32;
    fill_rect(canvas, x, y, width, stroke, color);
    fill_rect(canvas, x, bottom, width, stroke, color);
    fill_rect(canvas, x, y, stroke, height, color);
    fill_rect(canvas, right, y, stroke, height, color);
}

/// Draws text with the 8x8 bitmap font; `dot` is the side of one font
/// pixel in device pixels.
fn draw_text(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    text: &str,
    dot: u32,
    bold: bool,
    color: Rgb<u8>,
) {
    let advance = (GLYPH_PX * dot) as i32;
    // double-strike shifted right for bold
    let strike = if bold { (dot as i32 / 2).max(1) } else { 0 };

    for (i, ch) in text.chars().enumerate() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        let gx = x + i as i32 * advance;

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = gx + col * dot as i32;
                let py = y + row as i32 * dot as i32;
                fill_rect(canvas, px, py, dot, dot, color);
                if strike > 0 {
                    fill_rect(canvas, px + strike, py, dot, dot, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::layout::INK;
    use crate::test_support::preview;

    fn text_surface(scroll_y: u32) -> Surface {
        Surface {
            width: 40,
            height: 30,
            scroll_y,
            ops: vec![DrawOp::Text {
                x: 2,
                y: 2,
                text: "A".to_string(),
                size: 1,
                bold: false,
                color: INK,
            }],
        }
    }

    fn ink_pixels(image: &RasterImage) -> usize {
        image.pixels().pixels().filter(|p| **p != PAPER).count()
    }

    #[test]
    fn test_capture_scales_surface() {
        let renderer = RasterRenderer::default();
        let handle = renderer.render(&preview(2));
        let (w, h) = renderer.surface_size(handle).unwrap();

        let snapshot = renderer
            .capture_snapshot(handle, &CaptureOptions::for_export())
            .unwrap();

        assert_eq!(snapshot.width(), w * 2);
        assert_eq!(snapshot.height(), h * 2);
        assert!(ink_pixels(&snapshot) > 0);
    }

    #[test]
    fn test_unknown_or_released_handle_fails() {
        let renderer = RasterRenderer::default();
        let options = CaptureOptions::for_export();

        assert!(matches!(
            renderer.capture_snapshot(SurfaceHandle::new(42), &options),
            Err(ExportError::SurfaceUnavailable(_))
        ));

        let handle = renderer.render(&preview(1));
        assert!(renderer.release(handle));
        assert!(matches!(
            renderer.capture_snapshot(handle, &options),
            Err(ExportError::SurfaceUnavailable(_))
        ));
    }

    #[test]
    fn test_scroll_compensation() {
        let compensated = CaptureOptions {
            compensate_scroll: true,
            ..CaptureOptions::default()
        };
        let at_top = rasterize(&text_surface(0), &compensated).unwrap();
        let scrolled = rasterize(&text_surface(20), &compensated).unwrap();
        assert_eq!(at_top, scrolled);

        // without compensation the glyph scrolls off the top
        let naive = rasterize(&text_surface(20), &CaptureOptions::default()).unwrap();
        assert!(ink_pixels(&at_top) > 0);
        assert_eq!(ink_pixels(&naive), 0);
    }

    #[test]
    fn test_scroll_to_applies_to_registered_surface() {
        let renderer = RasterRenderer::default();
        let handle = renderer.insert(text_surface(0));
        renderer.scroll_to(handle, 20).unwrap();

        let snapshot = renderer
            .capture_snapshot(handle, &CaptureOptions::for_export())
            .unwrap();
        assert!(ink_pixels(&snapshot) > 0);

        assert!(renderer.scroll_to(SurfaceHandle::new(999), 1).is_err());
    }

    #[test]
    fn test_bold_text_uses_more_ink() {
        let mut bold = text_surface(0);
        if let DrawOp::Text { bold: b, .. } = &mut bold.ops[0] {
            *b = true;
        }
        let options = CaptureOptions::for_export();
        let regular = rasterize(&text_surface(0), &options).unwrap();
        let bold = rasterize(&bold, &options).unwrap();
        assert!(ink_pixels(&bold) > ink_pixels(&regular));
    }

    #[test]
    fn test_cross_origin_image_needs_permission() {
        let mut surface = text_surface(0);
        surface.ops.push(DrawOp::Image {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
            image: Arc::new(RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]))),
            origin: ImageOrigin::CrossOrigin,
        });

        assert!(matches!(
            rasterize(&surface, &CaptureOptions::default()),
            Err(ExportError::Capture(CaptureError::TaintedCanvas))
        ));

        let snapshot = rasterize(&surface, &CaptureOptions::for_export()).unwrap();
        assert_eq!(*snapshot.pixels().get_pixel(1, 1), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_largest_bill_fits_export_canvas() {
        let surface = layout::layout_preview(
            &preview(vistara_core::MAX_ITEMS),
            layout::DEFAULT_SURFACE_WIDTH,
            None,
        );
        assert!(surface.height * crate::EXPORT_SCALE <= MAX_CANVAS_SIDE);
        assert!(surface.width * crate::EXPORT_SCALE <= MAX_CANVAS_SIDE);
    }

    #[test]
    fn test_oversized_or_empty_surface_is_unsupported() {
        let mut huge = text_surface(0);
        huge.height = MAX_CANVAS_SIDE;
        assert!(matches!(
            rasterize(&huge, &CaptureOptions::for_export()),
            Err(ExportError::Capture(CaptureError::Unsupported(_)))
        ));

        let mut empty = text_surface(0);
        empty.width = 0;
        assert!(matches!(
            rasterize(&empty, &CaptureOptions::for_export()),
            Err(ExportError::Capture(CaptureError::Unsupported(_)))
        ));
    }
}
