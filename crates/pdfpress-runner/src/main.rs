//! PdfPress command-line front-end.
//!
//! Stands in for the GUI layer: derives the output path, submits a single
//! job and prints status lines until the terminal event arrives.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pdfpress_models::{derive_output_path, format_megabytes, JobRequest, Preset, StatusEvent};
use pdfpress_runner::{RunnerConfig, SingleFlightRunner};

#[derive(Debug, Parser)]
#[command(
    name = "pdfpress",
    about = "Resize a PDF by re-distilling it through Ghostscript"
)]
struct Args {
    /// Input PDF file
    input: PathBuf,

    /// Quality preset: screen, ebook, prepress, printer or default
    #[arg(short, long, default_value = "screen")]
    preset: String,

    /// Output file; defaults to <stem>.resized.<preset>.pdf next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON when requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("pdfpress=info".parse().unwrap())
        .add_directive("pdfpress_runner=info".parse().unwrap())
        .add_directive("pdfpress_media=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(false))
            .with(env_filter)
            .init();
    }

    let args = Args::parse();

    let preset: Preset = match args.preset.parse() {
        Ok(preset) => preset,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&args.input, preset));
    info!("Writing output to {}", output.display());

    let config = RunnerConfig::from_env();

    // Fail fast when the default binary is missing; explicit overrides are
    // resolved at spawn time instead.
    if config.gs_binary == "gs" {
        if let Err(e) = pdfpress_media::check_ghostscript() {
            error!("{}", e);
            std::process::exit(1);
        }
    }

    let runner = SingleFlightRunner::new(config);

    let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
    let request = JobRequest::new(args.input, output, preset.as_str());
    runner.submit(
        request,
        Arc::new(move |event: StatusEvent| {
            let _ = events_tx.send(event);
        }),
    );

    while let Some(event) = events_rx.recv().await {
        match event {
            StatusEvent::Line { message, .. } => println!("{}", message),
            StatusEvent::Done {
                input_bytes,
                output_bytes,
            } => {
                info!(
                    "Resize finished: {} -> {}",
                    format_megabytes(input_bytes),
                    format_megabytes(output_bytes)
                );
                return;
            }
            StatusEvent::Failed { message } => {
                error!("Resize failed: {}", message);
                std::process::exit(1);
            }
        }
    }
}
