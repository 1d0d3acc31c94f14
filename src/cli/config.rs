//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::{Cli, Command};
use crate::config::{TransformConfig, TransformKind};
use anyhow::{Context, Result};

/// Convert CLI arguments to a `TransformConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build a `TransformConfig` from parsed CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<TransformConfig> {
        let builder = TransformConfig::builder().verbose(cli.verbose > 0);

        // Thresholds were already range-checked by clap's `u8` parser
        let kind = match &cli.command {
            Command::Invert(_) => TransformKind::Invert,
            Command::RemoveBackground { threshold, .. } => TransformKind::RemoveBackground {
                threshold: *threshold,
            },
            Command::Mask { threshold, .. } => TransformKind::BrightnessMask {
                threshold: *threshold,
            },
        };

        builder.kind(kind).build().context("Failed to build transform configuration")
    }
}
