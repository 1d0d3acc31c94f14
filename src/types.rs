//! Core types for pixel transform operations

use crate::error::Result;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single 8-bit RGBA pixel with named channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black
    pub const TRANSPARENT_BLACK: Self = Self::new(0, 0, 0, 0);

    /// Fully transparent white
    pub const TRANSPARENT_WHITE: Self = Self::new(255, 255, 255, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[must_use]
    pub const fn is_fully_transparent(self) -> bool {
        self.a == 0
    }

    /// Sum of the three color channels, in `0..=765`
    #[must_use]
    pub const fn channel_sum(self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }

    /// Unweighted mean of the color channels
    #[must_use]
    pub fn brightness(self) -> f32 {
        f32::from(self.channel_sum()) / 3.0
    }
}

impl From<Rgba<u8>> for Pixel {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

impl From<Pixel> for Rgba<u8> {
    fn from(px: Pixel) -> Self {
        Rgba([px.r, px.g, px.b, px.a])
    }
}

/// Detailed timing breakdown for a transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingTimings {
    /// Image decode and RGBA normalization (milliseconds)
    pub image_decode_ms: u64,
    /// Per-pixel transform (milliseconds)
    pub transform_ms: u64,
    /// PNG encode and write (milliseconds)
    pub image_encode_ms: u64,
    /// Total processing time (milliseconds)
    pub total_ms: u64,
}

/// Metadata describing what a transform did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    /// Transform name, e.g. `invert`
    pub transform: String,
    /// Threshold used, if the transform takes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,
    /// Color type of the decoded source before normalization
    pub input_color_type: String,
    /// Number of pixels whose value changed
    pub pixels_changed: u64,
    /// Number of output pixels with alpha 0
    pub pixels_transparent: u64,
    /// Timing breakdown
    pub timings: ProcessingTimings,
}

impl ProcessingMetadata {
    /// Create metadata for a transform with empty counters
    #[must_use]
    pub fn new(transform: &str, threshold: Option<u8>) -> Self {
        Self {
            transform: transform.to_string(),
            threshold,
            input_color_type: "Rgba8".to_string(),
            pixels_changed: 0,
            pixels_transparent: 0,
            timings: ProcessingTimings::default(),
        }
    }
}

/// Result of a pixel transform
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// The transformed RGBA image
    pub image: RgbaImage,

    /// Source image dimensions
    pub original_dimensions: (u32, u32),

    /// Processing metadata
    pub metadata: ProcessingMetadata,

    /// Original input path (for logging purposes)
    pub input_path: Option<String>,
}

impl TransformResult {
    /// Create a new transform result
    #[must_use]
    pub fn new(image: RgbaImage, original_dimensions: (u32, u32), metadata: ProcessingMetadata) -> Self {
        Self {
            image,
            original_dimensions,
            metadata,
            input_path: None,
        }
    }

    /// Output dimensions
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at `(x, y)`, if in bounds
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.image.get_pixel_checked(x, y).map(|px| Pixel::from(*px))
    }

    /// Save the result as PNG with alpha channel, atomically
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::services::ImageIOService::save_png(&self.image, path)
    }

    /// Encode the result as PNG bytes
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        crate::services::ImageIOService::encode_png(&self.image)
    }

    /// Get a human-readable summary of the transform
    #[must_use]
    pub fn summary(&self) -> String {
        let (width, height) = self.dimensions();
        let threshold = self
            .metadata
            .threshold
            .map(|t| format!(" (threshold: {})", t))
            .unwrap_or_default();
        format!(
            "{}{}: {}x{}, {} pixels changed, {} transparent, {}ms",
            self.metadata.transform,
            threshold,
            width,
            height,
            self.metadata.pixels_changed,
            self.metadata.pixels_transparent,
            self.metadata.timings.total_ms
        )
    }
}
