//! Custom error types for img2tensor.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the img2tensor library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to decode an input image.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image dimensions are not supported.
    #[error("unsupported image dimensions {width}x{height} in {path}")]
    UnsupportedDimensions {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// A preprocess step outside the known vocabulary.
    #[error(
        "unsupported preprocess step {step:?}; the supported steps are: \
         subtract128, normalize, mean, std, bgrtorgb"
    )]
    UnsupportedStep { step: String },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Neither an image list nor an image list file was given.
    #[error("no input images specified; set either the image list or the image list file")]
    MissingInput,

    /// Failed to read the file listing input images.
    #[error("failed to read image list {path}: {source}")]
    InputList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image does not share the batch's spatial size.
    #[error("tensor shape mismatch for {input}: expected {expected}, got {actual}")]
    ShapeMismatch {
        input: String,
        expected: String,
        actual: String,
    },

    /// The batch resolved to zero images.
    #[error("no input images to convert")]
    EmptyBatch,

    /// Failed to write the output tensor.
    #[error("failed to write tensor to {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for img2tensor operations.
pub type Result<T> = std::result::Result<T, Error>;
