//! The packed batch tensor and its on-disk encoding.

mod proto;
mod save;

pub use proto::{DataType, TensorProto, TensorProtos};
pub use save::{save_tensor, to_protos, to_text};

use ndarray::Array4;

/// Packed batch in NCHW format (batch, channels, height, width).
pub type BatchTensor = Array4<f32>;

/// Encoding of the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Protobuf wire format.
    #[default]
    Binary,
    /// Protobuf text format.
    Text,
}
