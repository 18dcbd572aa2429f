//! Conversion configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::input::InputSource;
use crate::report::TimeReporter;
use crate::tensor::OutputFormat;

/// One photometric preprocessing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessStep {
    /// Subtract 128 from every channel; resets scaling and std.
    Subtract128,
    /// Scale values from [0, 255] down to [0, 1].
    Normalize,
    /// Subtract the `ImageNet` channel means.
    Mean,
    /// Divide by the `ImageNet` channel standard deviations.
    Std,
    /// Emit channels in red, green, blue order instead of blue, green, red.
    BgrToRgb,
}

impl PreprocessStep {
    /// Name of the step as written in a step list.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Subtract128 => "subtract128",
            Self::Normalize => "normalize",
            Self::Mean => "mean",
            Self::Std => "std",
            Self::BgrToRgb => "bgrtorgb",
        }
    }
}

impl FromStr for PreprocessStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "subtract128" => Ok(Self::Subtract128),
            "normalize" => Ok(Self::Normalize),
            "mean" => Ok(Self::Mean),
            "std" => Ok(Self::Std),
            "bgrtorgb" => Ok(Self::BgrToRgb),
            other => Err(Error::UnsupportedStep {
                step: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PreprocessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of preprocessing steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessConfig {
    pub steps: Vec<PreprocessStep>,
}

impl FromStr for PreprocessConfig {
    type Err = Error;

    /// Parse a comma separated step list. Empty entries are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let steps = s
            .split(',')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }
}

/// Requested center crop. A non-positive extent disables cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSize {
    pub height: i64,
    pub width: i64,
}

impl CropSize {
    /// No cropping.
    pub const DISABLED: Self = Self {
        height: -1,
        width: -1,
    };

    /// Whether both extents are positive.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.height > 0 && self.width > 0
    }
}

impl Default for CropSize {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl FromStr for CropSize {
    type Err = Error;

    /// Parse `height,width`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidParameter {
            name: "crop".to_string(),
            reason: format!("expected `height,width`, got {s:?}"),
        };

        let (height, width) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            height: height.trim().parse().map_err(|_| invalid())?,
            width: width.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Configuration for a conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the list of input images comes from.
    pub input: Option<InputSource>,

    /// Destination of the packed tensor.
    pub output: PathBuf,

    /// Photometric steps applied to every pixel.
    pub preprocess: PreprocessConfig,

    /// Center crop applied after rescaling.
    pub crop: CropSize,

    /// Target length of the shorter edge. Non-positive disables rescaling.
    pub scale: i64,

    /// Decode three color channels instead of one luma channel.
    pub color: bool,

    /// Encoding of the output file.
    pub format: OutputFormat,

    /// Optional timing report written to stdout.
    pub report: Option<TimeReporter>,

    /// Show a progress bar while converting.
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: PathBuf::new(),
            preprocess: PreprocessConfig::default(),
            crop: CropSize::DISABLED,
            scale: 256,
            color: true,
            format: OutputFormat::Binary,
            report: None,
            show_progress: false,
        }
    }
}

impl Config {
    /// Number of channels each converted image carries.
    #[must_use]
    pub const fn channels(&self) -> usize {
        if self.color {
            crate::image::COLOR_CHANNELS
        } else {
            crate::image::GRAY_CHANNELS
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no input is set or the output path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.input.is_none() {
            return Err(Error::MissingInput);
        }

        if self.output.as_os_str().is_empty() {
            return Err(Error::InvalidParameter {
                name: "output".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
