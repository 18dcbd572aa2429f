//! Protobuf messages for the serialized tensor.
//!
//! Field numbers match Caffe2's `TensorProto` / `TensorProtos`, so the binary
//! output can be read by Caffe2 tooling.

/// Element type of a tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    Undefined = 0,
    Float = 1,
}

/// A single dense tensor.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TensorProto {
    #[prost(int64, repeated, packed = "false", tag = "1")]
    pub dims: Vec<i64>,
    #[prost(enumeration = "DataType", optional, tag = "2")]
    pub data_type: Option<i32>,
    #[prost(float, repeated, tag = "3")]
    pub float_data: Vec<f32>,
}

/// A list of tensors.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TensorProtos {
    #[prost(message, repeated, tag = "1")]
    pub protos: Vec<TensorProto>,
}
