//! # Bill Layout
//!
//! Lays a [`Preview`] out as a display list in logical pixels. The raster
//! renderer draws the list; nothing here touches pixels.
//!
//! ## Geometry (logical px, default width 600)
//! ```text
//!  ┌ margin ─────────────────────────────────────────────── margin ┐
//!  │ ┌──────────┐                               VISTARA STUDIOS    │  header
//!  │ │Your Logo │                                                  │
//!  │ └──────────┘                                                  │
//!  │ ───────────────────────────────────────────────────────────── │
//!  │ ISSUED TO:                       INVOICE NO: 9876543210       │
//!  │ ...                              DATE: 19/10/2026             │
//!  │ Event Name: ...                                               │
//!  │      Billing Details                                          │
//!  │      ┌──────┬──────────────────────────────┬─────────┐        │  table: 80%
//!  │      │ S.No │ Description                  │  Amount │        │  of width,
//!  │      └──────┴──────────────────────────────┴─────────┘        │  centered
//!  └───────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use image::{Rgb, RgbImage};

use vistara_core::{
    Preview, PresentationRow, ISSUER_LABEL, LOGO_PLACEHOLDER, STUDIO_NAME, TABLE_TITLE,
};

/// Width and height of one glyph at text size 1.
pub const GLYPH_PX: u32 = 8;

/// Default logical width of a bill surface.
pub const DEFAULT_SURFACE_WIDTH: u32 = 600;

const MARGIN: i32 = 24;
const LINE_HEIGHT: i32 = 14;
const ROW_HEIGHT: i32 = 20;
const LOGO_WIDTH: u32 = 96;
const LOGO_HEIGHT: u32 = 48;
const INDEX_COLUMN: i32 = 48;
const AMOUNT_COLUMN: i32 = 96;
const CELL_PADDING: i32 = 6;

pub const INK: Rgb<u8> = Rgb([33, 33, 33]);
pub const MUTED: Rgb<u8> = Rgb([117, 117, 117]);
pub const RULE: Rgb<u8> = Rgb([224, 224, 224]);
pub const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

// =============================================================================
// Display List
// =============================================================================

/// Where an embedded image was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Bundled with or generated by the application.
    SameOrigin,

    /// Fetched from somewhere else; capturing it needs permission.
    CrossOrigin,
}

/// An image shown in the header instead of the logo placeholder.
#[derive(Debug, Clone)]
pub struct Logo {
    pub image: Arc<RgbImage>,
    pub origin: ImageOrigin,
}

/// One drawing instruction. Coordinates are logical pixels from the
/// surface's top-left corner.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// A single line of text; `(x, y)` is the top-left of the first glyph.
    Text {
        x: i32,
        y: i32,
        text: String,
        size: u32,
        bold: bool,
        color: Rgb<u8>,
    },

    /// A 1 px horizontal line.
    Rule {
        x: i32,
        y: i32,
        width: u32,
        color: Rgb<u8>,
    },

    /// A 1 px rectangle outline.
    Frame {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb<u8>,
    },

    /// An image stretched to the given box.
    Image {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        image: Arc<RgbImage>,
        origin: ImageOrigin,
    },
}

/// A laid-out bill: size plus display list.
#[derive(Debug, Clone)]
pub struct Surface {
    pub width: u32,
    pub height: u32,

    /// How far the surface's container is scrolled down, in logical px.
    pub scroll_y: u32,

    pub ops: Vec<DrawOp>,
}

/// Width in logical px of `text` at `size`.
pub fn text_width(text: &str, size: u32) -> i32 {
    (text.chars().count() as u32 * GLYPH_PX * size) as i32
}

/// Cuts `text` to fit `max_width` px at `size`, marking the cut with `...`.
pub fn fit_text(text: &str, size: u32, max_width: i32) -> String {
    let max_chars = (max_width.max(0) as u32 / (GLYPH_PX * size)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut cut: String = text.chars().take(max_chars - 3).collect();
    cut.push_str("...");
    cut
}

// =============================================================================
// Layout
// =============================================================================

/// Accumulates draw ops top to bottom.
struct Builder {
    width: i32,
    y: i32,
    ops: Vec<DrawOp>,
}

impl Builder {
    fn text(&mut self, x: i32, y: i32, text: impl Into<String>, size: u32, bold: bool) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            size,
            bold,
            color: INK,
        });
    }

    fn text_right(&mut self, right: i32, y: i32, text: &str, size: u32, bold: bool) {
        self.text(right - text_width(text, size), y, text, size, bold);
    }

    fn rule(&mut self, x: i32, y: i32, width: i32, color: Rgb<u8>) {
        self.ops.push(DrawOp::Rule {
            x,
            y,
            width: width.max(0) as u32,
            color,
        });
    }

    fn content_width(&self) -> i32 {
        self.width - 2 * MARGIN
    }
}

/// Lays out a preview on a surface `width` logical px wide.
///
/// The surface is as tall as its content; nothing is cropped.
pub fn layout_preview(preview: &Preview, width: u32, logo: Option<&Logo>) -> Surface {
    let mut b = Builder {
        width: width as i32,
        y: MARGIN,
        ops: Vec::new(),
    };

    header(&mut b, logo);
    recipient_and_metadata(&mut b, preview);
    event_details(&mut b, preview);
    billing_table(&mut b, &preview.rows);

    Surface {
        width,
        height: (b.y + MARGIN) as u32,
        scroll_y: 0,
        ops: b.ops,
    }
}

fn header(b: &mut Builder, logo: Option<&Logo>) {
    let top = b.y;
    match logo {
        Some(logo) => b.ops.push(DrawOp::Image {
            x: MARGIN,
            y: top,
            width: LOGO_WIDTH,
            height: LOGO_HEIGHT,
            image: Arc::clone(&logo.image),
            origin: logo.origin,
        }),
        None => {
            b.ops.push(DrawOp::Frame {
                x: MARGIN,
                y: top,
                width: LOGO_WIDTH,
                height: LOGO_HEIGHT,
                color: MUTED,
            });
            let label_x = MARGIN + (LOGO_WIDTH as i32 - text_width(LOGO_PLACEHOLDER, 1)) / 2;
            let label_y = top + (LOGO_HEIGHT as i32 - GLYPH_PX as i32) / 2;
            b.ops.push(DrawOp::Text {
                x: label_x,
                y: label_y,
                text: LOGO_PLACEHOLDER.to_string(),
                size: 1,
                bold: false,
                color: MUTED,
            });
        }
    }

    // narrow surfaces drop to size 1, then truncate, right of the logo slot
    let available = b.content_width() - LOGO_WIDTH as i32 - CELL_PADDING;
    let size = if text_width(STUDIO_NAME, 2) <= available { 2 } else { 1 };
    let studio = fit_text(STUDIO_NAME, size, available);
    let studio_y = top + (LOGO_HEIGHT as i32 - (size * GLYPH_PX) as i32) / 2;
    let right = b.width - MARGIN;
    b.text_right(right, studio_y, &studio, size, true);

    b.y = top + LOGO_HEIGHT as i32 + 12;
    let (x, y, w) = (MARGIN, b.y, b.content_width());
    b.rule(x, y, w, RULE);
    b.y += 16;
}

fn recipient_and_metadata(b: &mut Builder, preview: &Preview) {
    let top = b.y;
    let half = b.content_width() / 2;
    let left = MARGIN;
    let right = MARGIN + half + CELL_PADDING;

    b.text(left, top, ISSUER_LABEL, 1, true);
    for (i, line) in preview.recipient_lines().iter().enumerate() {
        let text = fit_text(line, 1, half - CELL_PADDING);
        b.text(left, top + LINE_HEIGHT * (i as i32 + 1), text, 1, false);
    }

    let details = [
        ("INVOICE NO: ", preview.invoice_number().to_string()),
        ("DATE: ", preview.issue_date_label()),
    ];
    for (i, (label, value)) in details.iter().enumerate() {
        let y = top + LINE_HEIGHT * i as i32;
        b.text(right, y, *label, 1, true);
        let value_x = right + text_width(label, 1);
        let value = fit_text(value, 1, b.width - MARGIN - value_x);
        b.text(value_x, y, value, 1, false);
    }

    b.y = top + LINE_HEIGHT * 4 + 12;
}

fn event_details(b: &mut Builder, preview: &Preview) {
    let max = b.content_width();
    for line in preview.event_lines() {
        let y = b.y;
        b.text(MARGIN, y, fit_text(&line, 1, max), 1, false);
        b.y += LINE_HEIGHT;
    }
    b.y += 12;
}

fn billing_table(b: &mut Builder, rows: &[PresentationRow]) {
    let table_width = b.width * 4 / 5;
    let table_x = (b.width - table_width) / 2;
    let amount_right = table_x + table_width - CELL_PADDING;
    let description_x = table_x + INDEX_COLUMN;
    let description_max = table_width - INDEX_COLUMN - AMOUNT_COLUMN;

    let y = b.y;
    b.text(table_x, y, TABLE_TITLE, 1, true);
    b.y += LINE_HEIGHT + 6;

    let text_offset = (ROW_HEIGHT - GLYPH_PX as i32) / 2;

    // column headings
    let y = b.y;
    b.rule(table_x, y, table_width, RULE);
    b.text(table_x + CELL_PADDING, y + text_offset, "S.No", 1, true);
    b.text(description_x, y + text_offset, "Description", 1, true);
    b.text_right(amount_right, y + text_offset, "Amount", 1, true);
    b.y += ROW_HEIGHT;
    let y = b.y;
    b.rule(table_x, y, table_width, INK);

    for row in rows {
        let y = b.y;
        let bold = row.is_emphasized();
        if let Some(index) = row.display_index() {
            b.text(table_x + CELL_PADDING, y + text_offset, index.to_string(), 1, false);
        }
        let description = fit_text(row.description(), 1, description_max - CELL_PADDING);
        b.text(description_x, y + text_offset, description, 1, bold);
        b.text_right(amount_right, y + text_offset, &row.amount().to_plain_string(), 1, bold);

        b.y += ROW_HEIGHT;
        let y = b.y;
        b.rule(table_x, y, table_width, RULE);
    }
    b.y += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::preview;

    fn texts(surface: &Surface) -> Vec<(&str, bool)> {
        surface
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, bold, .. } => Some((text.as_str(), *bold)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fit_text() {
        assert_eq!(fit_text("Camera", 1, 100), "Camera");
        assert_eq!(fit_text("Wedding photography", 1, 80), "Wedding...");
        assert_eq!(fit_text("abcdef", 1, 16), "ab");
        assert_eq!(fit_text("abc", 1, -5), "");
    }

    #[test]
    fn test_sections_appear_in_reading_order() {
        let surface = layout_preview(&preview(2), DEFAULT_SURFACE_WIDTH, None);
        let texts: Vec<_> = texts(&surface).into_iter().map(|(t, _)| t).collect();

        let position = |needle: &str| {
            texts
                .iter()
                .position(|t| *t == needle)
                .unwrap_or_else(|| panic!("{needle} not drawn"))
        };

        assert!(position("Your Logo") < position("Vistara Studios"));
        assert!(position("Vistara Studios") < position("ISSUED TO:"));
        assert!(position("ISSUED TO:") < position("INVOICE NO: "));
        assert!(position("INVOICE NO: ") < position("Event Name: Wedding"));
        assert!(position("Event Date: 2024-11-02") < position("Billing Details"));
        assert!(position("Item 2") < position("Total"));
        assert!(position("Total") < position("GST (18%)"));
        assert!(position("GST (18%)") < position("Final Amount"));
    }

    #[test]
    fn test_summary_emphasis_is_drawn() {
        let surface = layout_preview(&preview(1), DEFAULT_SURFACE_WIDTH, None);
        let texts = texts(&surface);

        assert!(texts.contains(&("Total", true)));
        assert!(texts.contains(&("GST (18%)", true)));
        assert!(texts.contains(&("Final Amount", false)));
        assert!(texts.contains(&("118.00", false)));
    }

    #[test]
    fn test_height_grows_with_rows() {
        let short = layout_preview(&preview(1), DEFAULT_SURFACE_WIDTH, None);
        let long = layout_preview(&preview(11), DEFAULT_SURFACE_WIDTH, None);
        assert_eq!(long.height - short.height, 10 * ROW_HEIGHT as u32);
    }

    #[test]
    fn test_studio_name_stays_inside_narrow_surface() {
        for width in [200, 320, DEFAULT_SURFACE_WIDTH] {
            let surface = layout_preview(&preview(1), width, None);
            let (x, text, size) = surface
                .ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Text { x, text, size, .. } if text.starts_with("Vis") => {
                        Some((*x, text.as_str(), *size))
                    }
                    _ => None,
                })
                .unwrap();

            assert!(x >= MARGIN + LOGO_WIDTH as i32, "width {width}");
            assert!(x + text_width(text, size) <= width as i32 - MARGIN);
        }

        let wide = layout_preview(&preview(1), DEFAULT_SURFACE_WIDTH, None);
        assert!(texts(&wide).contains(&("Vistara Studios", true)));
    }

    #[test]
    fn test_logo_replaces_placeholder() {
        let logo = Logo {
            image: Arc::new(RgbImage::new(4, 2)),
            origin: ImageOrigin::SameOrigin,
        };
        let surface = layout_preview(&preview(1), DEFAULT_SURFACE_WIDTH, Some(&logo));

        assert!(surface
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { .. })));
        assert!(!texts(&surface).iter().any(|(t, _)| *t == "Your Logo"));
    }
}
