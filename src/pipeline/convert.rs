//! Batch conversion of image files into one packed tensor.

use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::image;
use crate::tensor::{self, BatchTensor};

use super::batch::BatchPacker;
use super::config::Config;
use super::transform::{self, ChannelParams, FlatImage};

/// Stage name used in timing reports.
const REPORT_KIND: &str = "image_preprocess";

/// Converts image files into a single NCHW tensor.
pub struct Pipeline {
    config: Config,
    params: ChannelParams,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing pipeline with config: {config:?}");

        let params = ChannelParams::from_config(&config.preprocess);
        tracing::debug!("Channel parameters: {params:?}");

        Ok(Self { config, params })
    }

    /// The configuration this pipeline runs with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the configured inputs, convert them, and write the tensor.
    ///
    /// Nothing is written unless every image converts successfully.
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be resolved or converted, or the
    /// output cannot be written.
    pub fn run(&self) -> Result<BatchTensor> {
        let paths = self
            .config
            .input
            .as_ref()
            .ok_or(Error::MissingInput)?
            .resolve()?;

        let batch = self.convert(&paths)?;
        tensor::save_tensor(&batch, &self.config.output, self.config.format)?;

        Ok(batch)
    }

    /// Convert `paths`, in order, into one packed tensor.
    ///
    /// # Errors
    ///
    /// Returns an error if `paths` is empty, an image cannot be decoded, or
    /// the converted images disagree in size.
    pub fn convert<P: AsRef<Path>>(&self, paths: &[P]) -> Result<BatchTensor> {
        if paths.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let pb = if self.config.show_progress {
            ProgressBar::new(paths.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Converting [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("valid template")
                .progress_chars("#>-"),
        );

        let mut packer = BatchPacker::new(self.config.channels());
        for path in paths {
            let path = path.as_ref();
            let image = self.convert_image(path)?;
            packer.push(path, &image)?;
            pb.inc(1);
        }
        pb.finish_and_clear();

        let timer = Instant::now();
        let batch = packer.finish()?;
        self.report(timer, "pack");

        tracing::info!("Packed {} image(s) into {:?}", paths.len(), batch.shape());
        Ok(batch)
    }

    /// Decode, rescale, crop, and transform a single image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be decoded.
    pub fn convert_image(&self, path: &Path) -> Result<FlatImage> {
        tracing::info!("Converting {}", path.display());

        let decoded = image::load_image(path, self.config.color)?;
        let timer = Instant::now();

        let resized = image::rescale(decoded, self.config.scale);
        let crop = self.config.crop;
        let (cropped, (height, width)) = image::center_crop(resized, crop.height, crop.width);
        tracing::debug!("{} cropped to {height}x{width}", path.display());

        let flat = transform::to_planar(&cropped, &self.params);
        self.report(timer, "convert");

        Ok(flat)
    }

    fn report(&self, timer: Instant, metric: &str) {
        if let Some(reporter) = &self.config.report {
            reporter.report(REPORT_KIND, timer.elapsed(), metric);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use ::image::{GrayImage, Luma, Rgb, RgbImage};
    use prost::Message;

    use crate::input::InputSource;
    use crate::pipeline::{CropSize, PreprocessConfig};
    use crate::tensor::{OutputFormat, TensorProtos};

    fn gray_ramp(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        GrayImage::from_fn(width, height, |x, y| {
            Luma([u8::try_from(y * width + x).unwrap()])
        })
        .save(&path)
        .unwrap();
        path
    }

    fn config(dir: &Path, inputs: &[PathBuf]) -> Config {
        let list = inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Config {
            input: Some(InputSource::List(list)),
            output: dir.join("out.pb"),
            scale: 0,
            color: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_gray_passthrough_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = gray_ramp(dir.path(), "ramp.png", 4, 4);
        let config = config(dir.path(), &[input]);
        let output = config.output.clone();

        let batch = Pipeline::new(config).unwrap().run().unwrap();
        assert_eq!(batch.dim(), (1, 1, 4, 4));

        let expected: Vec<f32> = (0..16u8).map(f32::from).collect();
        assert_eq!(batch.iter().copied().collect::<Vec<_>>(), expected);

        let decoded = TensorProtos::decode(std::fs::read(output).unwrap().as_slice()).unwrap();
        assert_eq!(decoded.protos[0].dims, vec![1, 1, 4, 4]);
        assert_eq!(decoded.protos[0].float_data, expected);
    }

    #[test]
    fn test_color_rescale_and_crop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("color.png");
        RgbImage::from_pixel(6, 4, Rgb([30, 20, 10]))
            .save(&path)
            .unwrap();

        let config = Config {
            color: true,
            scale: 2,
            crop: CropSize {
                height: 2,
                width: 2,
            },
            preprocess: "bgrtorgb".parse::<PreprocessConfig>().unwrap(),
            format: OutputFormat::Text,
            ..config(dir.path(), &[path])
        };
        let output = config.output.clone();

        let batch = Pipeline::new(config).unwrap().run().unwrap();
        assert_eq!(batch.dim(), (1, 3, 2, 2));
        for (c, expected) in [30.0, 20.0, 10.0].into_iter().enumerate() {
            assert!(batch
                .index_axis(ndarray::Axis(1), c)
                .iter()
                .all(|&v| (v - expected).abs() < 1e-4));
        }

        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.contains("data_type: FLOAT"));
    }

    #[test]
    fn test_batch_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = gray_ramp(dir.path(), "a.png", 3, 3);
        let second = dir.path().join("b.png");
        GrayImage::from_pixel(3, 3, Luma([200])).save(&second).unwrap();

        let pipeline = Pipeline::new(config(dir.path(), &[])).unwrap();
        let batch = pipeline.convert(&[first, second]).unwrap();

        assert_eq!(batch.dim(), (2, 1, 3, 3));
        assert!((batch[[0, 0, 2, 2]] - 8.0).abs() < 1e-6);
        assert!((batch[[1, 0, 0, 0]] - 200.0).abs() < 1e-6);
    }

    #[test]
    fn test_shape_mismatch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let first = gray_ramp(dir.path(), "a.png", 4, 4);
        let second = gray_ramp(dir.path(), "b.png", 6, 4);
        let config = config(dir.path(), &[first, second]);
        let output = config.output.clone();

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_clamped_crop_converges() {
        let dir = tempfile::tempdir().unwrap();
        let first = gray_ramp(dir.path(), "a.png", 4, 4);
        let second = gray_ramp(dir.path(), "b.png", 4, 4);
        let config = Config {
            crop: CropSize {
                height: 8,
                width: 8,
            },
            ..config(dir.path(), &[first, second])
        };

        let batch = Pipeline::new(config).unwrap().run().unwrap();
        assert_eq!(batch.dim(), (2, 1, 4, 4));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &[]);
        let output = config.output.clone();

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert!(matches!(err, Error::EmptyBatch));
        assert!(!output.exists());
    }

    #[test]
    fn test_decode_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = gray_ramp(dir.path(), "a.png", 4, 4);
        let config = config(dir.path(), &[good, dir.path().join("missing.png")]);
        let output = config.output.clone();

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
        assert!(!output.exists());
    }
}
