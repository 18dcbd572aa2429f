//! Image-to-tensor conversion pipeline.

mod batch;
mod config;
mod convert;
mod transform;

pub use batch::BatchPacker;
pub use config::{Config, CropSize, PreprocessConfig, PreprocessStep};
pub use convert::Pipeline;
pub use transform::{to_planar, ChannelParams, FlatImage};
