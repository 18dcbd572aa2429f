//! # img2tensor
//!
//! Converts a batch of images into a single packed NCHW float tensor for
//! inference or training pipelines.
//!
//! Every image is decoded, its shorter edge rescaled, center cropped, run
//! through a configurable set of per-channel photometric steps and flattened
//! channel-major. The images are then packed, in input order, into one
//! `(N, C, H, W)` tensor and written as a `TensorProtos` message.
//!
//! ## Example
//!
//! ```no_run
//! use img2tensor::{Config, CropSize, InputSource, Pipeline};
//!
//! # fn main() -> img2tensor::Result<()> {
//! let config = Config {
//!     input: Some(InputSource::List("cat.jpg,dog.jpg".to_string())),
//!     output: "batch.pb".into(),
//!     preprocess: "normalize,mean,std,bgrtorgb".parse()?,
//!     crop: CropSize { height: 224, width: 224 },
//!     ..Config::default()
//! };
//!
//! let batch = Pipeline::new(config)?.run()?;
//! assert_eq!(batch.shape(), &[2, 3, 224, 224]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod input;
pub mod pipeline;
pub mod report;
pub mod tensor;

pub use error::{Error, Result};
pub use input::InputSource;
pub use pipeline::{Config, CropSize, Pipeline, PreprocessConfig, PreprocessStep};
pub use report::TimeReporter;
pub use tensor::{BatchTensor, OutputFormat};
