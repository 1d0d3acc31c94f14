#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # rgba-ops
//!
//! Per-pixel transforms over RGBA images, each written out as a PNG so the
//! alpha channel survives:
//!
//! - **Inversion**: `255 - v` on r, g and b of every pixel that is not fully
//!   transparent; alpha is kept.
//! - **Background removal**: pixels whose r, g and b are all below a cutoff
//!   become fully transparent; their color is kept.
//! - **Brightness masking**: pixels whose mean channel value is not above a
//!   cutoff become transparent white.
//!
//! Any input format the `image` crate can decode is accepted and normalized
//! to 8-bit RGBA first.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rgba_ops::{invert, mask_by_brightness, remove_background};
//!
//! # fn example() -> rgba_ops::Result<()> {
//! invert("logo.jpg", "logo-inverted.png")?;
//! remove_background("logo.png", "logo-clear.png", 30)?;
//! let result = mask_by_brightness("logo-inverted.png", "logo-masked.png", 120)?;
//! println!("{}", result.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory usage
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use rgba_ops::{PixelTransform, BackgroundRemover};
//!
//! let mut image = RgbaImage::new(2, 1);
//! image.put_pixel(0, 0, Rgba([10, 10, 10, 255]));
//! image.put_pixel(1, 0, Rgba([200, 50, 50, 255]));
//!
//! let out = BackgroundRemover::new(30).apply(&image);
//! assert_eq!(out.get_pixel(0, 0).0, [10, 10, 10, 0]);
//! assert_eq!(out.get_pixel(1, 0).0, [200, 50, 50, 255]);
//! ```
//!
//! ### Feature Flags
//!
//! - `cli` (default): the `rgba-ops` binary and tracing subscriber setup
//! - `webp-support` (default): WebP input decoding
//! - `tracing-json`: JSON log output for the CLI

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod processor;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod transforms;
pub mod types;

use std::path::Path;

pub use config::{
    TransformConfig, TransformConfigBuilder, TransformKind, DEFAULT_BACKGROUND_THRESHOLD,
    DEFAULT_BRIGHTNESS_THRESHOLD,
};
pub use error::{PixelOpsError, Result};
pub use processor::TransformProcessor;
pub use services::{
    ConsoleProgressReporter, ImageIOService, NoOpProgressReporter, ProcessingStage,
    ProgressReporter, ProgressTracker, ProgressUpdate,
};
pub use transforms::{BackgroundRemover, Inverter, PixelTransform, ThresholdMasker, TransformStats};
pub use types::{Pixel, ProcessingMetadata, ProcessingTimings, TransformResult};

#[cfg(feature = "cli")]
pub use tracing_config::{TracingConfig, TracingFormat};

/// Run one transform from `input_path` to a PNG at `output_path`
pub fn transform_file<P: AsRef<Path>, Q: AsRef<Path>>(
    kind: TransformKind,
    input_path: P,
    output_path: Q,
) -> Result<TransformResult> {
    TransformProcessor::new(TransformConfig::for_kind(kind)).process_file(input_path, output_path)
}

/// Invert the colors of an image while preserving transparency
///
/// Fully transparent pixels come out as `(0, 0, 0, 0)`.
pub fn invert<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
) -> Result<TransformResult> {
    transform_file(TransformKind::Invert, input_path, output_path)
}

/// Make near-black pixels transparent
///
/// See [`DEFAULT_BACKGROUND_THRESHOLD`] for the usual cutoff.
pub fn remove_background<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    threshold: u8,
) -> Result<TransformResult> {
    transform_file(
        TransformKind::RemoveBackground { threshold },
        input_path,
        output_path,
    )
}

/// Keep pixels brighter than `threshold`, make the rest transparent white
///
/// See [`DEFAULT_BRIGHTNESS_THRESHOLD`] for the usual cutoff.
pub fn mask_by_brightness<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    threshold: u8,
) -> Result<TransformResult> {
    transform_file(
        TransformKind::BrightnessMask { threshold },
        input_path,
        output_path,
    )
}
