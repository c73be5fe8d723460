//! ocrblocks - merge Tesseract word boxes into text blocks
//!
//! Reads Tesseract TSV output (`tesseract image.png out tsv`) and prints either
//! the recognized text or a JSON document with the text and the merged blocks.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ocrblocks::ocr::TsvEngine;
use ocrblocks::{OcrBlocksConfig, OcrProcessor};
use tracing_subscriber::EnvFilter;

/// Output format.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Recognized text only
    #[default]
    Text,
    /// Text plus merged boxes as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ocrblocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge the words of one TSV page
    Extract {
        /// Tesseract TSV file, or `-` for stdin
        input: PathBuf,

        #[command(flatten)]
        options: ProcessOptions,
    },

    /// Merge several TSV pages in parallel
    Batch {
        /// Tesseract TSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        options: ProcessOptions,
    },
}

#[derive(Args, Debug)]
struct ProcessOptions {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file (default: nearest ocrblocks.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Return word boxes without merging them
    #[arg(long)]
    no_merge: bool,

    /// Horizontal slack in pixels between boxes of one block
    #[arg(long)]
    horizontal_gap: Option<u32>,

    /// Vertical slack in pixels between boxes of one block
    #[arg(long)]
    vertical_gap: Option<u32>,

    /// Top edges closer than this many pixels share a row
    #[arg(long)]
    row_tolerance: Option<u32>,

    /// Drop words below this confidence
    #[arg(long)]
    min_confidence: Option<f64>,
}

impl ProcessOptions {
    /// Flags > --config file > discovered ocrblocks.toml > defaults.
    fn resolve_config(&self) -> Result<OcrBlocksConfig> {
        let mut config = match &self.config {
            Some(path) => OcrBlocksConfig::from_toml_file(path)?,
            None => OcrBlocksConfig::discover()?.unwrap_or_default(),
        };

        if self.no_merge {
            config.merge.enabled = false;
        }
        if let Some(gap) = self.horizontal_gap {
            config.merge.horizontal_gap = gap;
        }
        if let Some(gap) = self.vertical_gap {
            config.merge.vertical_gap = gap;
        }
        if let Some(tolerance) = self.row_tolerance {
            config.merge.row_tolerance = tolerance;
        }
        if let Some(confidence) = self.min_confidence {
            config.tsv.min_confidence = confidence;
        }

        config.validate()?;
        Ok(config)
    }

    fn processor(&self) -> Result<OcrProcessor<TsvEngine>> {
        let config = self.resolve_config()?;
        tracing::debug!(?config, "resolved configuration");
        Ok(OcrProcessor::new(TsvEngine::new(config.tsv.clone()), config))
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read TSV from stdin")?;
        return Ok(buffer);
    }

    std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn extract(input: &Path, options: &ProcessOptions) -> Result<bool> {
    let processor = options.processor()?;
    let bytes = read_input(input)?;
    let result = processor
        .process_image(&bytes)
        .with_context(|| format!("Failed to process '{}'", input.display()))?;

    let mut stdout = io::stdout().lock();
    match options.format {
        OutputFormat::Text => write!(stdout, "{}", result.text)?,
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?,
    }

    Ok(true)
}

fn batch(inputs: &[PathBuf], options: &ProcessOptions) -> Result<bool> {
    let processor = options.processor()?;
    let results = processor.process_files_batch(inputs);
    let all_ok = results.iter().all(|item| item.success);

    let mut stdout = io::stdout().lock();
    match options.format {
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&results)?)?,
        OutputFormat::Text => {
            for item in &results {
                writeln!(stdout, "==> {} <==", item.source)?;
                match (&item.result, &item.error) {
                    (Some(result), _) => write!(stdout, "{}", result.text)?,
                    (None, Some(error)) => eprintln!("Error processing '{}': {}", item.source, error),
                    (None, None) => {}
                }
            }
        }
    }

    Ok(all_ok)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ok = match &cli.command {
        Command::Extract { input, options } => extract(input, options)?,
        Command::Batch { inputs, options } => batch(inputs, options)?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
