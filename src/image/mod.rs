//! Image decoding, rescaling, and center cropping.

mod crop;
mod load;
mod resize;

pub use crop::{center_crop, crop_region, CropRegion};
pub use load::load_image;
pub use resize::{rescale, scaled_dimensions};

use image::{GrayImage, RgbImage};

/// Number of channels in color images.
pub const COLOR_CHANNELS: usize = 3;

/// Number of channels in grayscale images.
pub const GRAY_CHANNELS: usize = 1;

/// A decoded 8-bit image with either one or three channels.
///
/// Each pipeline stage takes the image by value and hands a new one to the
/// next stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedImage {
    /// Single luma channel.
    Gray(GrayImage),
    /// Three channels, stored in red, green, blue order.
    Color(RgbImage),
}

impl DecodedImage {
    /// Image width in pixels (number of columns).
    #[must_use]
    pub fn cols(&self) -> u32 {
        match self {
            Self::Gray(img) => img.width(),
            Self::Color(img) => img.width(),
        }
    }

    /// Image height in pixels (number of rows).
    #[must_use]
    pub fn rows(&self) -> u32 {
        match self {
            Self::Gray(img) => img.height(),
            Self::Color(img) => img.height(),
        }
    }

    /// Number of channels per pixel.
    #[must_use]
    pub const fn channels(&self) -> usize {
        match self {
            Self::Gray(_) => GRAY_CHANNELS,
            Self::Color(_) => COLOR_CHANNELS,
        }
    }
}
