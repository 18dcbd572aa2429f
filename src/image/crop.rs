//! Center cropping with clamped bounds.

use image::imageops;

use super::DecodedImage;

/// A rectangle inside an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the centered region for a `height` x `width` request.
///
/// Returns `None` when no crop is needed: either requested extent is
/// non-positive, or the image already has exactly the requested size.
/// Requests larger than the image shrink to the image's own extent.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn crop_region(rows: u32, cols: u32, height: i64, width: i64) -> Option<CropRegion> {
    let (rows_i, cols_i) = (i64::from(rows), i64::from(cols));
    if height <= 0 || width <= 0 || (rows_i == height && cols_i == width) {
        return None;
    }

    // Integer division truncates toward zero, then negative offsets clamp to 0.
    let x = ((cols_i - width) / 2).max(0);
    let y = ((rows_i - height) / 2).max(0);

    // Safe: every value is clamped into [0, u32 extent]
    Some(CropRegion {
        x: x as u32,
        y: y as u32,
        width: width.min(cols_i) as u32,
        height: height.min(rows_i) as u32,
    })
}

/// Crop the centered `height` x `width` region out of `image`.
///
/// Returns the cropped image together with the effective `(height, width)`
/// actually used, which differs from the request when it was clamped. The
/// cropped image is an owned, contiguous copy.
#[must_use]
pub fn center_crop(image: DecodedImage, height: i64, width: i64) -> (DecodedImage, (u32, u32)) {
    let Some(region) = crop_region(image.rows(), image.cols(), height, width) else {
        let size = (image.rows(), image.cols());
        return (image, size);
    };

    tracing::debug!(
        "Cropping {}x{} at ({}, {}) from {}x{}",
        region.width,
        region.height,
        region.x,
        region.y,
        image.cols(),
        image.rows()
    );

    let cropped = match image {
        DecodedImage::Gray(img) => DecodedImage::Gray(
            imageops::crop_imm(&img, region.x, region.y, region.width, region.height).to_image(),
        ),
        DecodedImage::Color(img) => DecodedImage::Color(
            imageops::crop_imm(&img, region.x, region.y, region.width, region.height).to_image(),
        ),
    };

    (cropped, (region.height, region.width))
}
