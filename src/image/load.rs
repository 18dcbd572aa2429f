//! Image loading utilities.

use std::path::Path;

use crate::error::{Error, Result};

use super::DecodedImage;

/// Load an image from disk as 8-bit color or grayscale.
///
/// Color images are converted to RGB, everything else to a single luma
/// channel when `color` is false.
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or has a zero-sized extent.
pub fn load_image<P: AsRef<Path>>(path: P, color: bool) -> Result<DecodedImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(Error::UnsupportedDimensions {
            path: path.to_path_buf(),
            width: img.width(),
            height: img.height(),
        });
    }

    let decoded = if color {
        DecodedImage::Color(img.to_rgb8())
    } else {
        DecodedImage::Gray(img.to_luma8())
    };

    tracing::debug!(
        "Decoded {} as {}x{} with {} channel(s)",
        path.display(),
        decoded.cols(),
        decoded.rows(),
        decoded.channels()
    );

    Ok(decoded)
}
