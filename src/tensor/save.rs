//! Tensor saving utilities.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use prost::Message;

use crate::error::{Error, Result};

use super::proto::{DataType, TensorProto, TensorProtos};
use super::{BatchTensor, OutputFormat};

/// Save a batch tensor to `path`.
///
/// The data is written to a sibling temporary file first and then renamed
/// into place, so `path` never holds a partially written tensor.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_tensor<P: AsRef<Path>>(
    tensor: &BatchTensor,
    path: P,
    format: OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    let protos = to_protos(tensor);

    let bytes = match format {
        OutputFormat::Binary => protos.encode_to_vec(),
        OutputFormat::Text => to_text(&protos).into_bytes(),
    };

    tracing::info!(
        "Writing {:?} tensor ({} bytes, {format:?}) to {}",
        tensor.shape(),
        bytes.len(),
        path.display()
    );

    let encode_err = |source: std::io::Error| Error::Encode {
        path: path.to_path_buf(),
        source,
    };

    let temp_path = temp_path(path);
    fs::write(&temp_path, &bytes).map_err(encode_err)?;
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(encode_err(source));
    }

    Ok(())
}

/// Wrap a batch tensor in a single-entry `TensorProtos`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn to_protos(tensor: &BatchTensor) -> TensorProtos {
    // Safe: ndarray extents never exceed isize::MAX
    let dims = tensor.shape().iter().map(|&d| d as i64).collect();

    TensorProtos {
        protos: vec![TensorProto {
            dims,
            data_type: Some(DataType::Float as i32),
            float_data: tensor.iter().copied().collect(),
        }],
    }
}

/// Render `TensorProtos` in protobuf text format.
#[must_use]
pub fn to_text(protos: &TensorProtos) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    for proto in &protos.protos {
        out.push_str("protos {\n");
        for dim in &proto.dims {
            let _ = writeln!(out, "  dims: {dim}");
        }
        if let Some(data_type) = proto.data_type {
            let name = DataType::try_from(data_type)
                .map_or_else(|_| data_type.to_string(), |dt| data_type_name(dt).to_string());
            let _ = writeln!(out, "  data_type: {name}");
        }
        for value in &proto.float_data {
            let _ = writeln!(out, "  float_data: {}", text_float(*value));
        }
        out.push_str("}\n");
    }

    out
}

const fn data_type_name(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Undefined => "UNDEFINED",
        DataType::Float => "FLOAT",
    }
}

fn text_float(value: f32) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{sign}inf")
    } else {
        value.to_string()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
