//! Shorter-edge rescaling.

use image::imageops::{self, FilterType};

use super::DecodedImage;

/// Compute the `(width, height)` that brings the shorter edge to `scale`.
///
/// The longer edge keeps the aspect ratio and is rounded to the nearest pixel.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn scaled_dimensions(rows: u32, cols: u32, scale: u32) -> (u32, u32) {
    let longer = |long: u32, short: u32| -> u32 {
        // Safe: the ratio of two u32 extents times a u32 target is non-negative
        let scaled = (f64::from(long) * f64::from(scale) / f64::from(short)).round() as u32;
        scaled.max(1)
    };

    if rows > cols {
        (scale, longer(rows, cols))
    } else {
        (longer(cols, rows), scale)
    }
}

/// Rescale an image so its shorter edge equals `scale`, using linear
/// interpolation.
///
/// A non-positive `scale` returns the image untouched.
#[must_use]
pub fn rescale(image: DecodedImage, scale: i64) -> DecodedImage {
    let Ok(scale) = u32::try_from(scale) else {
        return image;
    };
    if scale == 0 {
        return image;
    }

    let (width, height) = scaled_dimensions(image.rows(), image.cols(), scale);
    if (width, height) == (image.cols(), image.rows()) {
        return image;
    }

    tracing::debug!(
        "Rescaling {}x{} -> {width}x{height}",
        image.cols(),
        image.rows()
    );

    match image {
        DecodedImage::Gray(img) => {
            DecodedImage::Gray(imageops::resize(&img, width, height, FilterType::Triangle))
        }
        DecodedImage::Color(img) => {
            DecodedImage::Color(imageops::resize(&img, width, height, FilterType::Triangle))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_scaled_dimensions_landscape() {
        // 480 rows x 640 cols, shorter edge is rows
        assert_eq!(scaled_dimensions(480, 640, 256), (341, 256));
    }

    #[test]
    fn test_scaled_dimensions_portrait() {
        assert_eq!(scaled_dimensions(640, 480, 256), (256, 341));
    }

    #[test]
    fn test_scaled_dimensions_square() {
        assert_eq!(scaled_dimensions(100, 100, 32), (32, 32));
    }

    #[test]
    fn test_scaled_dimensions_rounds_longer_edge() {
        // 4 * 2 / 3 = 2.67 rounds to 3
        assert_eq!(scaled_dimensions(4, 3, 2), (2, 3));
        // 5 * 3 / 4 = 3.75 rounds to 4
        assert_eq!(scaled_dimensions(4, 5, 3), (4, 3));
    }

    #[test]
    fn test_rescale_disabled() {
        let img = DecodedImage::Gray(GrayImage::from_fn(7, 5, |x, y| {
            Luma([u8::try_from(x * 10 + y).unwrap()])
        }));
        assert_eq!(rescale(img.clone(), 0), img);
        assert_eq!(rescale(img.clone(), -1), img);
    }

    #[test]
    fn test_rescale_shorter_edge() {
        let img = DecodedImage::Color(RgbImage::from_pixel(640, 480, Rgb([1, 2, 3])));
        let out = rescale(img, 240);
        assert_eq!(out.rows(), 240);
        assert_eq!(out.cols(), 320);
        assert_eq!(out.channels(), 3);
    }

    #[test]
    fn test_rescale_uniform_image_keeps_values() {
        let img = DecodedImage::Gray(GrayImage::from_pixel(8, 4, Luma([77])));
        let DecodedImage::Gray(out) = rescale(img, 2) else {
            panic!("expected a grayscale image");
        };
        assert_eq!(out.dimensions(), (4, 2));
        assert!(out.pixels().all(|p| p[0] == 77));
    }
}
