//! Dark background removal

use super::PixelTransform;
use crate::config::DEFAULT_BACKGROUND_THRESHOLD;
use crate::types::Pixel;

/// Makes near-black pixels fully transparent
///
/// A pixel is background iff all three color channels are strictly below the
/// threshold. Only alpha is rewritten; RGB always passes through, and so does
/// the alpha of non-background pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundRemover {
    threshold: u8,
}

impl Default for BackgroundRemover {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND_THRESHOLD)
    }
}

impl BackgroundRemover {
    #[must_use]
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Whether `pixel` counts as background under this threshold
    #[must_use]
    pub fn is_background(&self, pixel: Pixel) -> bool {
        pixel.r < self.threshold && pixel.g < self.threshold && pixel.b < self.threshold
    }
}

impl PixelTransform for BackgroundRemover {
    fn name(&self) -> &'static str {
        "remove-background"
    }

    fn threshold(&self) -> Option<u8> {
        Some(self.threshold)
    }

    fn apply_pixel(&self, pixel: Pixel) -> Pixel {
        if self.is_background(pixel) {
            pixel.with_alpha(0)
        } else {
            pixel
        }
    }
}
