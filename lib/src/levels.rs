//! Source brightness range and leveling onto the glyph range

use crate::luminance::luminance_image;
use image::{GrayImage, RgbImage};
use rayon::prelude::*;

/// Inclusive brightness range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessRange {
    pub min: u8,
    pub max: u8,
}

impl BrightnessRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// A range with no spread; leveling from or onto it collapses to `min`
    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }
}

/// Luminance image of the source together with its brightness range
#[derive(Debug, Clone)]
pub struct SourceAnalysis {
    pub luminance: GrayImage,
    pub range: BrightnessRange,
}

/// Convert the source to luminance and find its darkest and brightest pixel
///
/// The minimum starts at 255 and the maximum at 0, so an empty image reports
/// the inverted range (255, 0).
pub fn analyze_source(source: &RgbImage) -> SourceAnalysis {
    let luminance = luminance_image(source);
    let width = luminance.width().max(1) as usize;

    let (min, max) = luminance
        .par_chunks(width)
        .map(|row| {
            row.iter()
                .fold((255u8, 0u8), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        })
        .reduce(|| (255, 0), |(a_lo, a_hi), (b_lo, b_hi)| (a_lo.min(b_lo), a_hi.max(b_hi)));

    SourceAnalysis {
        luminance,
        range: BrightnessRange::new(min, max),
    }
}

/// Linear rescale of `value` from `[from_min, from_max]` onto `[to_min, to_max]`
///
/// `to_min + round((value - from_min) / (from_max - from_min) * (to_max - to_min))`
/// with rounding half away from zero. A flat source range maps everything to
/// `to_min`. The result is kept inside the destination range.
///
/// # Arguments
/// * `from_min`, `from_max` - Source range, either order
/// * `value` - Value to rescale
/// * `to_min`, `to_max` - Destination range, either order
///
/// # Returns
/// The rescaled value, between `to_min` and `to_max`
pub fn map_range(from_min: i32, from_max: i32, value: i32, to_min: i32, to_max: i32) -> i32 {
    if from_max == from_min {
        return to_min;
    }

    let ratio = (value - from_min) as f64 / (from_max - from_min) as f64;
    let mapped = to_min + (ratio * (to_max - to_min) as f64).round() as i32;
    mapped.clamp(to_min.min(to_max), to_min.max(to_max))
}

/// Remap every pixel of `luminance` from `from` onto `to`
pub fn level_image(luminance: &GrayImage, from: BrightnessRange, to: BrightnessRange) -> GrayImage {
    // Only 256 possible inputs
    let table: Vec<u8> = (0..=255)
        .map(|v| {
            map_range(from.min as i32, from.max as i32, v, to.min as i32, to.max as i32)
                .clamp(0, 255) as u8
        })
        .collect();

    let mut leveled = luminance.clone();
    let samples: &mut [u8] = &mut leveled;
    samples.par_iter_mut().for_each(|v| *v = table[*v as usize]);
    leveled
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn test_map_range_endpoints() {
        for (from_min, from_max) in [(0, 255), (12, 200), (49, 50)] {
            for (to_min, to_max) in [(0, 255), (30, 180), (7, 7), (200, 10)] {
                assert_eq!(map_range(from_min, from_max, from_min, to_min, to_max), to_min);
                assert_eq!(map_range(from_min, from_max, from_max, to_min, to_max), to_max);
            }
        }
    }

    #[test]
    fn test_map_range_flat_source_maps_to_min() {
        for value in [0, 50, 255] {
            assert_eq!(map_range(50, 50, value, 20, 240), 20);
        }
    }

    #[test]
    fn test_map_range_rounds_half_away_from_zero() {
        // 1/2 * 1 = 0.5 -> 1
        assert_eq!(map_range(0, 2, 1, 0, 1), 1);
        // 1/4 * 10 = 2.5 -> 3
        assert_eq!(map_range(0, 4, 1, 0, 10), 3);
        // 1/3 * 10 = 3.33 -> 3
        assert_eq!(map_range(0, 3, 1, 0, 10), 3);
    }

    #[test]
    fn test_map_range_midpoint() {
        assert_eq!(map_range(0, 255, 128, 0, 255), 128);
        assert_eq!(map_range(100, 200, 150, 0, 100), 50);
    }

    #[test]
    fn test_analyze_source_finds_range() {
        let mut img = RgbImage::from_pixel(4, 3, Rgb([120, 120, 120]));
        img.put_pixel(1, 2, Rgb([10, 10, 10]));
        img.put_pixel(3, 0, Rgb([250, 250, 250]));
        let analysis = analyze_source(&img);

        assert_eq!(analysis.luminance.dimensions(), (4, 3));
        assert_eq!(analysis.range, BrightnessRange::new(10, 250));
    }

    #[test]
    fn test_analyze_source_single_pixel() {
        let img = RgbImage::from_pixel(1, 1, Rgb([0, 255, 0]));
        let analysis = analyze_source(&img);
        assert_eq!(analysis.range, BrightnessRange::new(182, 182));
        assert!(analysis.range.is_flat());
    }

    #[test]
    fn test_analyze_source_empty_image() {
        let analysis = analyze_source(&RgbImage::new(0, 0));
        assert_eq!(analysis.range, BrightnessRange::new(255, 0));
    }

    #[test]
    fn test_level_image_stretches_onto_glyph_range() {
        let mut lum = GrayImage::from_pixel(2, 1, Luma([100]));
        lum.put_pixel(1, 0, Luma([200]));
        let leveled = level_image(
            &lum,
            BrightnessRange::new(100, 200),
            BrightnessRange::new(0, 255),
        );

        assert_eq!(leveled.get_pixel(0, 0), &Luma([0]));
        assert_eq!(leveled.get_pixel(1, 0), &Luma([255]));
    }

    #[test]
    fn test_level_image_flat_source() {
        let lum = GrayImage::from_pixel(3, 3, Luma([50]));
        let leveled = level_image(
            &lum,
            BrightnessRange::new(50, 50),
            BrightnessRange::new(12, 230),
        );
        assert!(leveled.pixels().all(|p| p.0[0] == 12));
    }
}
