//! Brightness threshold masking

use super::PixelTransform;
use crate::config::DEFAULT_BRIGHTNESS_THRESHOLD;
use crate::types::Pixel;

/// Keeps pixels brighter than a threshold and makes the rest transparent white
///
/// Brightness is the unweighted mean `(r + g + b) / 3`. The comparison is
/// strict, so a pixel exactly at the threshold is masked. It is evaluated as
/// `r + g + b > 3 * threshold`, which gives the same answer as comparing the
/// real-valued mean without any rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdMasker {
    threshold: u8,
}

impl Default for ThresholdMasker {
    fn default() -> Self {
        Self::new(DEFAULT_BRIGHTNESS_THRESHOLD)
    }
}

impl ThresholdMasker {
    #[must_use]
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Whether `pixel` is bright enough to keep
    #[must_use]
    pub fn is_kept(&self, pixel: Pixel) -> bool {
        pixel.channel_sum() > 3 * u16::from(self.threshold)
    }
}

impl PixelTransform for ThresholdMasker {
    fn name(&self) -> &'static str {
        "mask"
    }

    fn threshold(&self) -> Option<u8> {
        Some(self.threshold)
    }

    fn apply_pixel(&self, pixel: Pixel) -> Pixel {
        if self.is_kept(pixel) {
            pixel
        } else {
            Pixel::TRANSPARENT_WHITE
        }
    }
}
