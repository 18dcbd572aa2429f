//! Accumulation of per-image buffers into one NCHW batch.

use std::path::Path;

use ndarray::Array4;

use crate::error::{Error, Result};
use crate::tensor::BatchTensor;

use super::transform::FlatImage;

/// Collects channel-major images in input order and packs them into a
/// `(N, C, H, W)` tensor.
///
/// The first image pushed fixes the batch's `(H, W)`; every later image
/// must match it.
#[derive(Debug)]
pub struct BatchPacker {
    channels: usize,
    canonical: Option<(usize, usize)>,
    len: usize,
    data: Vec<f32>,
}

impl BatchPacker {
    /// Create an empty packer for images with `channels` channels.
    #[must_use]
    pub const fn new(channels: usize) -> Self {
        Self {
            channels,
            canonical: None,
            len: 0,
            data: Vec::new(),
        }
    }

    /// The `(H, W)` fixed by the first image, if any.
    #[must_use]
    pub const fn canonical_size(&self) -> Option<(usize, usize)> {
        self.canonical
    }

    /// Number of images pushed so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no image has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one image converted from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the image's channel count or
    /// spatial size differs from the batch.
    pub fn push(&mut self, path: &Path, image: &FlatImage) -> Result<()> {
        let (channels, height, width) = image.dim();
        let expected = self.canonical.unwrap_or((height, width));

        if channels != self.channels || (height, width) != expected {
            return Err(Error::ShapeMismatch {
                input: path.display().to_string(),
                expected: format!("{}x{}x{}", self.channels, expected.0, expected.1),
                actual: format!("{channels}x{height}x{width}"),
            });
        }

        if self.canonical.is_none() {
            tracing::debug!("Batch size fixed at {height}x{width} by {}", path.display());
            self.canonical = Some((height, width));
        }

        self.data.extend(image.iter().copied());
        self.len += 1;
        Ok(())
    }

    /// Pack every pushed image into a single tensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBatch`] if nothing was pushed.
    pub fn finish(self) -> Result<BatchTensor> {
        let Some((height, width)) = self.canonical else {
            return Err(Error::EmptyBatch);
        };

        let shape = (self.len, self.channels, height, width);
        Array4::from_shape_vec(shape, self.data).map_err(|_| Error::ShapeMismatch {
            input: "packed batch".to_string(),
            expected: format!("{shape:?}"),
            actual: "reshape failed".to_string(),
        })
    }
}
