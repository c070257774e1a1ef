use crate::charset::CharacterSet;
use crate::font::{CellGeometry, FontMetrics, FontSpec};
use crate::luminance::grey_level;
use image::GrayImage;
use rayon::prelude::*;

/// Average brightness of each character of a set, in set order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphProfile {
    brightness: Vec<u8>,
    degenerate: bool,
}

impl GlyphProfile {
    /// Profile built from already measured values
    pub fn from_values(brightness: Vec<u8>) -> Self {
        Self {
            brightness,
            degenerate: false,
        }
    }

    fn zeros(len: usize) -> Self {
        Self {
            brightness: vec![0; len],
            degenerate: true,
        }
    }

    pub fn len(&self) -> usize {
        self.brightness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty()
    }

    pub fn values(&self) -> &[u8] {
        &self.brightness
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.brightness.get(index).copied()
    }

    /// Darkest glyph, or 255 for an empty profile
    pub fn min(&self) -> u8 {
        self.brightness.iter().copied().min().unwrap_or(255)
    }

    /// Brightest glyph, or 0 for an empty profile
    pub fn max(&self) -> u8 {
        self.brightness.iter().copied().max().unwrap_or(0)
    }

    /// True when the font gave no usable text box and the profile fell back to zeros
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

/// Measure the brightness of every character in `characters`
///
/// The whole set is drawn once as a single line, baseline-aligned on the
/// font's descent, then cut into `geometry`-sized slices, one per position.
/// Each slice's mean luminance is that character's brightness. Bleed from a
/// neighbouring glyph into a slice is counted as-is.
///
/// A font that yields an empty text box or an empty cell gives an all-zero
/// profile of the right length, flagged as degenerate.
///
/// # Arguments
/// * `characters` - Set to measure, in tie-break order
/// * `font` - Face and point size to draw with
/// * `metrics` - Metrics of `font`, which fix the slice size
///
/// # Returns
/// One brightness in `[0, 255]` per character, in set order
pub fn profile_glyphs(
    characters: &CharacterSet,
    font: &FontSpec,
    metrics: &FontMetrics,
) -> GlyphProfile {
    let text = characters.as_string();
    let text_width = font.face().text_width(&text, font.point_size());
    let text_height = metrics.line_height;
    let geometry = CellGeometry::from_metrics(metrics);

    if text_width == 0 || text_height == 0 || geometry.is_empty() {
        log::warn!(
            "Font '{}' at {}pt gives a {}x{} text box for {} characters, profiling as zeros",
            font.family(),
            font.point_size(),
            text_width,
            text_height,
            characters.len()
        );
        return GlyphProfile::zeros(characters.len());
    }

    // Slices past the drawn text read as background
    let slices_width = geometry.width.saturating_mul(characters.len() as u32);
    let mut canvas = GrayImage::new(text_width.max(slices_width), text_height);
    let baseline = text_height as i32 - metrics.descent as i32;
    font.face().draw_str(&mut canvas, &text, 0, baseline, font.point_size());

    let brightness = (0..characters.len())
        .into_par_iter()
        .map(|position| slice_brightness(&canvas, position as u32 * geometry.width, geometry))
        .collect();

    GlyphProfile {
        brightness,
        degenerate: false,
    }
}

fn slice_brightness(canvas: &GrayImage, left: u32, geometry: CellGeometry) -> u8 {
    let mut sum = 0u64;
    for y in 0..geometry.height {
        for x in left..left + geometry.width {
            sum += grey_level(canvas.get_pixel(x, y)) as u64;
        }
    }
    (sum as f64 / geometry.area() as f64).round() as u8
}
