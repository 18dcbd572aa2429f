//! Per-channel photometric transform and planar flattening.

use ndarray::Array3;

use crate::image::DecodedImage;

use super::config::{PreprocessConfig, PreprocessStep};

/// One image as a channel-major `(C, H, W)` float array.
pub type FlatImage = Array3<f32>;

/// Per-channel mean subtracted by the `mean` step, in output slot order.
const IMAGENET_MEAN: [f32; 3] = [0.406, 0.456, 0.485];

/// Per-channel standard deviation divided by the `std` step, in output slot order.
const IMAGENET_STD: [f32; 3] = [0.225, 0.224, 0.229];

/// Resolved photometric parameters for each output channel.
///
/// Every output value is `(raw / normalize - mean) / std`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParams {
    pub normalize: [f32; 3],
    pub mean: [f32; 3],
    pub std: [f32; 3],
    pub swap_red_blue: bool,
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            normalize: [1.0; 3],
            mean: [0.0; 3],
            std: [1.0; 3],
            swap_red_blue: false,
        }
    }
}

impl ChannelParams {
    /// Fold the configured steps, in order, into a parameter set.
    ///
    /// Later steps overwrite what earlier steps set.
    #[must_use]
    pub fn from_config(config: &PreprocessConfig) -> Self {
        config
            .steps
            .iter()
            .fold(Self::default(), |params, &step| params.apply(step))
    }

    #[must_use]
    const fn apply(self, step: PreprocessStep) -> Self {
        match step {
            PreprocessStep::Subtract128 => Self {
                normalize: [1.0; 3],
                mean: [128.0; 3],
                std: [1.0; 3],
                ..self
            },
            PreprocessStep::Normalize => Self {
                normalize: [255.0; 3],
                ..self
            },
            PreprocessStep::Mean => Self {
                mean: IMAGENET_MEAN,
                ..self
            },
            PreprocessStep::Std => Self {
                std: IMAGENET_STD,
                ..self
            },
            PreprocessStep::BgrToRgb => Self {
                swap_red_blue: true,
                ..self
            },
        }
    }

    /// Source pixel channel feeding each output slot.
    ///
    /// Decoded color pixels are stored red, green, blue. Output slots are
    /// blue, green, red unless `swap_red_blue` is set.
    const fn source_channels(&self) -> [usize; 3] {
        if self.swap_red_blue {
            [0, 1, 2]
        } else {
            [2, 1, 0]
        }
    }

    #[inline]
    fn transform(&self, slot: usize, raw: u8) -> f32 {
        (f32::from(raw) / self.normalize[slot] - self.mean[slot]) / self.std[slot]
    }
}

/// Apply the photometric transform and flatten to channel-major order.
///
/// Within each channel plane pixels are laid out row by row.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_planar(image: &DecodedImage, params: &ChannelParams) -> FlatImage {
    let shape = (
        image.channels(),
        image.rows() as usize,
        image.cols() as usize,
    );

    // Safe: x and y are bounded by the image's u32 extent
    match image {
        DecodedImage::Gray(img) => Array3::from_shape_fn(shape, |(_, y, x)| {
            params.transform(0, img.get_pixel(x as u32, y as u32)[0])
        }),
        DecodedImage::Color(img) => {
            let sources = params.source_channels();
            Array3::from_shape_fn(shape, |(c, y, x)| {
                params.transform(c, img.get_pixel(x as u32, y as u32)[sources[c]])
            })
        }
    }
}
