//! Pixel transform CLI tool
//!
//! Command-line interface running one transform per invocation through the
//! unified processor.

use super::config::CliConfigBuilder;
use crate::{
    config::{DEFAULT_BACKGROUND_THRESHOLD, DEFAULT_BRIGHTNESS_THRESHOLD},
    processor::TransformProcessor,
    tracing_config::{TracingConfig, TracingFormat},
    types::TransformResult,
};
use anyhow::{Context, Result};
use clap::{error::ErrorKind, Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Per-pixel RGBA transforms, written out as PNG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "rgba-ops")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (-v: DEBUG with stage progress, -vv: TRACE)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the processing metadata as JSON on stdout after success
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter directives (e.g. "rgba_ops=trace"), overrides -v
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = CliLogFormat::Console)]
    pub log_format: CliLogFormat,
}

/// Transform to run
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Invert r, g and b of every pixel that is not fully transparent
    Invert(PathArgs),

    /// Make pixels whose r, g and b are all below THRESHOLD transparent
    RemoveBackground {
        #[command(flatten)]
        paths: PathArgs,

        /// Per-channel cutoff (0-255)
        #[arg(value_name = "THRESHOLD", default_value_t = DEFAULT_BACKGROUND_THRESHOLD)]
        threshold: u8,
    },

    /// Keep pixels brighter than the threshold, clear the rest to transparent white
    Mask {
        #[command(flatten)]
        paths: PathArgs,

        /// Mean brightness cutoff (0-255)
        #[arg(short, long, default_value_t = DEFAULT_BRIGHTNESS_THRESHOLD)]
        threshold: u8,
    },
}

impl Command {
    /// Input and output paths of the selected transform
    #[must_use]
    pub fn paths(&self) -> &PathArgs {
        match self {
            Command::Invert(paths)
            | Command::RemoveBackground { paths, .. }
            | Command::Mask { paths, .. } => paths,
        }
    }
}

/// Positional input/output pair shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Input image (any decodable format)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output PNG file (parent directory must exist)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliLogFormat {
    Console,
    Compact,
    #[cfg(feature = "tracing-json")]
    Json,
}

impl From<CliLogFormat> for TracingFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Console => TracingFormat::Console,
            CliLogFormat::Compact => TracingFormat::Compact,
            #[cfg(feature = "tracing-json")]
            CliLogFormat::Json => TracingFormat::Json,
        }
    }
}

pub fn main() -> Result<()> {
    let cli = parse_args();

    init_tracing(&cli).context("Failed to initialize tracing")?;

    let config = CliConfigBuilder::from_cli(&cli).context("Invalid CLI arguments")?;
    let transform_name = config.kind.name();
    debug!(transform = %config.kind, verbose = cli.verbose, "Configuration resolved");

    let paths = cli.command.paths();
    let mut processor = TransformProcessor::new(config);
    let result = processor
        .process_file(&paths.input, &paths.output)
        .map_err(|err| {
            let stage = err.stage();
            anyhow::Error::new(err)
                .context(format!("{} failed ({})", transform_name, stage.description()))
        })?;

    if cli.json {
        print_metadata_json(&result)?;
    } else {
        info!("{}", result.summary());
    }

    Ok(())
}

/// Parse arguments, exiting with status 1 on usage errors
///
/// `--help` and `--version` keep clap's zero exit status.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                // A closed stderr must not change the exit status
                let _ = err.print();
                std::process::exit(1);
            },
        },
    }
}

/// Initialize tracing based on verbosity level and filter overrides
fn init_tracing(cli: &Cli) -> Result<()> {
    let mut config = TracingConfig::new()
        .with_verbosity(cli.verbose)
        .with_format(cli.log_format.into());

    if let Some(filter) = &cli.log_filter {
        config = config.with_env_filter(filter.clone());
    }

    config
        .init()
        .context("Failed to initialize tracing subscriber")?;

    debug!(verbosity = cli.verbose, "Tracing initialized");
    Ok(())
}

fn print_metadata_json(result: &TransformResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&result.metadata)
        .context("Failed to serialize processing metadata")?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
