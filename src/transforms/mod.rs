//! Per-pixel transforms
//!
//! Every transform is a pure rule from one RGBA pixel to another. Applying a
//! transform to an image builds a fresh buffer of identical dimensions; the
//! input buffer is never modified.

mod background;
mod invert;
mod threshold;

pub use background::BackgroundRemover;
pub use invert::Inverter;
pub use threshold::ThresholdMasker;

use crate::types::Pixel;
use image::{Rgba, RgbaImage};

/// A stateless per-pixel rule
pub trait PixelTransform: Send + Sync {
    /// Short name used in logs and metadata
    fn name(&self) -> &'static str;

    /// Threshold, for the transforms that take one
    fn threshold(&self) -> Option<u8> {
        None
    }

    /// Map a single pixel
    fn apply_pixel(&self, pixel: Pixel) -> Pixel;

    /// Map every pixel of `image` into a new buffer of the same size
    fn apply(&self, image: &RgbaImage) -> RgbaImage {
        let (width, height) = image.dimensions();
        RgbaImage::from_fn(width, height, |x, y| {
            let source = Pixel::from(*image.get_pixel(x, y));
            Rgba::from(self.apply_pixel(source))
        })
    }
}

/// Counts of what a transform did to a buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Pixels whose value changed
    pub changed: u64,
    /// Output pixels with alpha 0
    pub transparent: u64,
}

impl TransformStats {
    /// Compare an input buffer with its transformed output
    ///
    /// Both buffers must have the same dimensions.
    #[must_use]
    pub fn between(input: &RgbaImage, output: &RgbaImage) -> Self {
        input
            .pixels()
            .zip(output.pixels())
            .fold(Self::default(), |mut stats, (before, after)| {
                if before != after {
                    stats.changed += 1;
                }
                if after.0[3] == 0 {
                    stats.transparent += 1;
                }
                stats
            })
    }
}
