//! Font collaborator: glyph metrics and drawing
//!
//! The pipeline never talks to a font library directly. It goes through
//! [`GlyphRasterizer`], which reports metrics and draws glyphs as white
//! coverage onto a black [`GrayImage`]. [`FontdueRasterizer`] is the
//! production implementation.

use crate::error::{GlyphtoneError, Result};
use fontdue::{Font, FontSettings, Metrics};
use image::GrayImage;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Code points whose advance widths make up [`FontMetrics::advance_widths`]
pub const REFERENCE_RUN: std::ops::Range<u32> = 0..256;

/// Vertical metrics of a face at one size, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalMetrics {
    /// ascent + descent + line gap
    pub line_height: u32,
    /// Distance from the baseline down to the lowest descender
    pub descent: u32,
}

/// Metrics snapshot of a face at one size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetrics {
    /// Advance width of every code point in [`REFERENCE_RUN`], in order
    pub advance_widths: Vec<u32>,
    pub line_height: u32,
    pub descent: u32,
}

/// Pixel size of one glyph cell
///
/// Derived once per conversion from a reference glyph, which assumes the
/// face is monospaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub width: u32,
    pub height: u32,
}

impl CellGeometry {
    /// Width comes from index 1 of the reference run, height from the line height.
    pub fn from_metrics(metrics: &FontMetrics) -> Self {
        Self {
            width: metrics.advance_widths.get(1).copied().unwrap_or(0),
            height: metrics.line_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// A monospace font renderer
///
/// All drawing is white-on-black coverage: a fully covered pixel becomes 255
/// and partially covered pixels keep the brighter of old and new values.
/// `draw_str` and `draw_char` must share one glyph geometry, which the
/// provided implementations guarantee by building on `advance_width` and
/// `draw_char`.
pub trait GlyphRasterizer: Send + Sync {
    /// Family name of the face
    fn family(&self) -> &str;

    /// Horizontal advance of `ch` at `point_size`, in pixels
    fn advance_width(&self, ch: char, point_size: u32) -> u32;

    fn vertical_metrics(&self, point_size: u32) -> VerticalMetrics;

    /// Draw `ch` with its origin at `(x, baseline)`; pixels outside the canvas are clipped.
    fn draw_char(&self, canvas: &mut GrayImage, ch: char, x: i32, baseline: i32, point_size: u32);

    fn metrics(&self, point_size: u32) -> FontMetrics {
        let advance_widths = REFERENCE_RUN
            .filter_map(char::from_u32)
            .map(|ch| self.advance_width(ch, point_size))
            .collect();
        let vertical = self.vertical_metrics(point_size);
        FontMetrics {
            advance_widths,
            line_height: vertical.line_height,
            descent: vertical.descent,
        }
    }

    /// Width of `text` laid out on one line
    fn text_width(&self, text: &str, point_size: u32) -> u32 {
        text.chars().map(|ch| self.advance_width(ch, point_size)).sum()
    }

    fn draw_str(&self, canvas: &mut GrayImage, text: &str, x: i32, baseline: i32, point_size: u32) {
        let mut pen = x;
        for ch in text.chars() {
            self.draw_char(canvas, ch, pen, baseline, point_size);
            pen += self.advance_width(ch, point_size) as i32;
        }
    }
}

/// A face at a given point size; the style is always plain
#[derive(Clone)]
pub struct FontSpec {
    face: Arc<dyn GlyphRasterizer>,
    point_size: u32,
}

impl FontSpec {
    pub fn new(face: Arc<dyn GlyphRasterizer>, point_size: u32) -> Result<Self> {
        if point_size == 0 {
            return Err(GlyphtoneError::Config(
                "font point size must be positive".to_string(),
            ));
        }
        Ok(Self { face, point_size })
    }

    pub fn face(&self) -> &dyn GlyphRasterizer {
        self.face.as_ref()
    }

    pub fn family(&self) -> &str {
        self.face.family()
    }

    pub fn point_size(&self) -> u32 {
        self.point_size
    }

    pub fn metrics(&self) -> FontMetrics {
        self.face.metrics(self.point_size)
    }
}

impl fmt::Debug for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSpec")
            .field("family", &self.family())
            .field("point_size", &self.point_size)
            .finish()
    }
}

/// Copy a coverage bitmap onto `canvas` with its top-left corner at `(left, top)`
pub(crate) fn blit_coverage(
    canvas: &mut GrayImage,
    left: i32,
    top: i32,
    width: usize,
    height: usize,
    coverage: &[u8],
) {
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    for sy in 0..height {
        let ty = top + sy as i32;
        if ty < 0 || ty >= ch {
            continue;
        }
        for sx in 0..width {
            let tx = left + sx as i32;
            if tx < 0 || tx >= cw {
                continue;
            }
            let value = coverage[sy * width + sx];
            let pixel = canvas.get_pixel_mut(tx as u32, ty as u32);
            pixel.0[0] = pixel.0[0].max(value);
        }
    }
}

struct RasterGlyph {
    metrics: Metrics,
    bitmap: Vec<u8>,
}

/// [`GlyphRasterizer`] backed by a `fontdue` face
///
/// Point sizes are used directly as pixel sizes (72 dpi). Rasterized glyphs
/// are cached per (character, size).
pub struct FontdueRasterizer {
    font: Font,
    family: String,
    glyph_cache: RwLock<HashMap<(char, u32), Arc<RasterGlyph>>>,
}

impl FontdueRasterizer {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| GlyphtoneError::Font(e.to_string()))?;
        let family = font.name().unwrap_or("unnamed").to_string();
        log::debug!("Loaded font face '{}' with {} glyphs", family, font.glyph_count());
        Ok(Self {
            font,
            family,
            glyph_cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    fn glyph(&self, ch: char, point_size: u32) -> Arc<RasterGlyph> {
        let key = (ch, point_size);
        if let Some(glyph) = self
            .glyph_cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(glyph);
        }

        let (metrics, bitmap) = self.font.rasterize(ch, point_size as f32);
        let glyph = Arc::new(RasterGlyph { metrics, bitmap });
        self.glyph_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&glyph));
        glyph
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn family(&self) -> &str {
        &self.family
    }

    fn advance_width(&self, ch: char, point_size: u32) -> u32 {
        let advance = self.font.metrics(ch, point_size as f32).advance_width;
        advance.round().max(0.0) as u32
    }

    fn vertical_metrics(&self, point_size: u32) -> VerticalMetrics {
        match self.font.horizontal_line_metrics(point_size as f32) {
            Some(line) => VerticalMetrics {
                line_height: (line.ascent - line.descent + line.line_gap).round().max(0.0) as u32,
                descent: (-line.descent).round().max(0.0) as u32,
            },
            None => VerticalMetrics {
                line_height: 0,
                descent: 0,
            },
        }
    }

    fn draw_char(&self, canvas: &mut GrayImage, ch: char, x: i32, baseline: i32, point_size: u32) {
        let glyph = self.glyph(ch, point_size);
        let metrics = &glyph.metrics;
        if metrics.width == 0 || metrics.height == 0 {
            return;
        }

        // ymin is the offset of the bitmap's bottom edge from the baseline, y up
        let left = x + metrics.xmin;
        let top = baseline - metrics.ymin - metrics.height as i32;
        blit_coverage(canvas, left, top, metrics.width, metrics.height, &glyph.bitmap);
    }
}
