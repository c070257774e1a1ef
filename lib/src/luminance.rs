use image::{GrayImage, Luma, Rgb, RgbImage};
use rayon::prelude::*;

/// BT.709 luma weights for R, G and B.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Perceptual brightness of a pixel
///
/// Formula: L = 0.2126*R + 0.7152*G + 0.0722*B, rounded half away from zero.
/// The weights sum to 1.0, so the result always lies in [0, 255] and a grey
/// pixel (v, v, v) maps back to v.
pub fn brightness(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let luma = LUMA_WEIGHTS[0] * r as f64 + LUMA_WEIGHTS[1] * g as f64 + LUMA_WEIGHTS[2] * b as f64;
    luma.round().clamp(0.0, 255.0) as u8
}

/// Calculate the achromatic luminance image of an RGB image
///
/// Rows are converted in parallel; every output pixel is `brightness` of the
/// source pixel at the same position.
pub fn luminance_image(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return output;
    }

    output
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = brightness(*img.get_pixel(x as u32, y as u32));
            }
        });

    output
}

/// Luminance of a single grey pixel
#[inline]
pub fn grey_level(pixel: &Luma<u8>) -> u8 {
    pixel.0[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_extremes() {
        assert_eq!(brightness(Rgb([0, 0, 0])), 0);
        assert_eq!(brightness(Rgb([255, 255, 255])), 255);
    }

    #[test]
    fn test_brightness_grey_is_identity() {
        for v in 0..=255u8 {
            assert_eq!(brightness(Rgb([v, v, v])), v);
        }
    }

    #[test]
    fn test_brightness_primaries() {
        // 0.2126 * 255 = 54.213, 0.7152 * 255 = 182.376, 0.0722 * 255 = 18.411
        assert_eq!(brightness(Rgb([255, 0, 0])), 54);
        assert_eq!(brightness(Rgb([0, 255, 0])), 182);
        assert_eq!(brightness(Rgb([0, 0, 255])), 18);
    }

    #[test]
    fn test_brightness_monotonic_per_channel() {
        for other in [0u8, 77, 200, 255] {
            for channel in 0..3 {
                let mut previous = 0u8;
                for v in 0..=255u8 {
                    let mut px = [other; 3];
                    px[channel] = v;
                    let current = brightness(Rgb(px));
                    assert!(current >= previous, "channel {channel} not monotonic at {v}");
                    previous = current;
                }
            }
        }
    }

    #[test]
    fn test_luminance_image_matches_per_pixel() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(2, 1, Rgb([10, 20, 30]));
        let lum = luminance_image(&img);

        assert_eq!(lum.dimensions(), (3, 2));
        assert_eq!(grey_level(lum.get_pixel(0, 0)), 54);
        let expected = brightness(Rgb([10, 20, 30]));
        assert_eq!(grey_level(lum.get_pixel(2, 1)), expected);
        assert_eq!(grey_level(lum.get_pixel(1, 0)), 0);
    }

    #[test]
    fn test_luminance_image_empty() {
        let lum = luminance_image(&RgbImage::new(0, 0));
        assert_eq!(lum.dimensions(), (0, 0));
    }
}
