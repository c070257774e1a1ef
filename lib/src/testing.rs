//! Deterministic rasterizer for tests that need exact glyph brightness.

use crate::font::{GlyphRasterizer, VerticalMetrics, blit_coverage};
use image::GrayImage;
use std::collections::HashMap;

/// Draws every character as a solid block filling its whole cell
///
/// Space is black, every other character is white unless given an explicit
/// shade, so a character's profiled brightness equals its shade.
pub struct BlockRasterizer {
    advance: u32,
    line_height: u32,
    descent: u32,
    shades: HashMap<char, u8>,
    advances: HashMap<char, u32>,
}

impl BlockRasterizer {
    pub fn new(advance: u32, line_height: u32, descent: u32) -> Self {
        Self {
            advance,
            line_height,
            descent,
            shades: HashMap::from([(' ', 0)]),
            advances: HashMap::new(),
        }
    }

    /// Give `ch` its own advance instead of the shared one
    pub fn with_advance(mut self, ch: char, advance: u32) -> Self {
        self.advances.insert(ch, advance);
        self
    }

    pub fn with_shade(mut self, ch: char, shade: u8) -> Self {
        self.shades.insert(ch, shade);
        self
    }

    pub fn shade(&self, ch: char) -> u8 {
        self.shades.get(&ch).copied().unwrap_or(255)
    }
}

impl GlyphRasterizer for BlockRasterizer {
    fn family(&self) -> &str {
        "block"
    }

    fn advance_width(&self, ch: char, _point_size: u32) -> u32 {
        self.advances.get(&ch).copied().unwrap_or(self.advance)
    }

    fn vertical_metrics(&self, _point_size: u32) -> VerticalMetrics {
        VerticalMetrics {
            line_height: self.line_height,
            descent: self.descent,
        }
    }

    fn draw_char(&self, canvas: &mut GrayImage, ch: char, x: i32, baseline: i32, _point_size: u32) {
        let (w, h) = (self.advance_width(ch, 0) as usize, self.line_height as usize);
        let top = baseline - (self.line_height as i32 - self.descent as i32);
        let block = vec![self.shade(ch); w * h];
        blit_coverage(canvas, x, top, w, h, &block);
    }
}
