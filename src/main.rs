//! img2tensor CLI - Convert images into a packed NCHW tensor.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use img2tensor::{
    Config, CropSize, InputSource, OutputFormat, Pipeline, PreprocessConfig, TimeReporter,
};

/// Convert a batch of images into a single NCHW float tensor.
#[derive(Parser, Debug)]
#[command(name = "img2tensor")]
#[command(version, about, long_about = None)]
struct Args {
    /// Comma separated input images.
    #[arg(long, value_name = "PATHS", conflicts_with = "input_image_file")]
    input_images: Option<String>,

    /// File listing one input image per line.
    #[arg(long, value_name = "FILE")]
    input_image_file: Option<PathBuf>,

    /// Output tensor file, in NCHW order.
    #[arg(long, value_name = "FILE")]
    output_tensor: PathBuf,

    /// Comma separated preprocess steps, applied in sequence: subtract128, normalize, mean, std, bgrtorgb.
    #[arg(long, default_value = "", value_name = "STEPS")]
    preprocess: PreprocessConfig,

    /// Center crop height and width. A value of zero or less disables cropping.
    #[arg(long, default_value = "-1,-1", value_name = "H,W", allow_hyphen_values = true)]
    crop: CropSize,

    /// Scale the shorter edge to this length. Zero or less disables rescaling.
    #[arg(long, default_value_t = 256, value_name = "INT", allow_hyphen_values = true)]
    scale: i64,

    /// Load images in color; `false` loads grayscale.
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    color: bool,

    /// Write the output in protobuf text format.
    #[arg(long)]
    text_output: bool,

    /// Report stage timings to stdout as `json` or `json|<identifier>`.
    #[arg(long, default_value = "", value_name = "TYPE")]
    report_time: String,

    /// Hide the progress bar.
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("img2tensor={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<()> {
    let input = match (args.input_images, args.input_image_file) {
        (Some(list), _) if !list.is_empty() => Some(InputSource::List(list)),
        (_, Some(file)) => Some(InputSource::File(file)),
        _ => None,
    };

    let report = TimeReporter::parse_option(&args.report_time).context("Invalid --report-time")?;

    // Build configuration
    let config = Config {
        input,
        output: args.output_tensor,
        preprocess: args.preprocess,
        crop: args.crop,
        scale: args.scale,
        color: args.color,
        format: if args.text_output {
            OutputFormat::Text
        } else {
            OutputFormat::Binary
        },
        report,
        show_progress: !args.quiet,
    };

    // Create and run pipeline
    let pipeline = Pipeline::new(config).context("Failed to initialize pipeline")?;

    let batch = pipeline.run().context("Failed to convert images")?;

    tracing::info!(
        "Wrote {:?} tensor to {}",
        batch.shape(),
        pipeline.config().output.display()
    );

    Ok(())
}
