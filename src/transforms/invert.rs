//! Color inversion with alpha preservation

use super::PixelTransform;
use crate::types::Pixel;

/// Inverts RGB of every pixel that is not fully transparent
///
/// Fully transparent pixels are normalized to `(0, 0, 0, 0)`; the color
/// hidden under zero alpha is discarded. Inverting twice therefore restores
/// every visible pixel but not the RGB of invisible ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inverter;

impl PixelTransform for Inverter {
    fn name(&self) -> &'static str {
        "invert"
    }

    fn apply_pixel(&self, pixel: Pixel) -> Pixel {
        if pixel.is_fully_transparent() {
            return Pixel::TRANSPARENT_BLACK;
        }

        Pixel::new(
            u8::MAX - pixel.r,
            u8::MAX - pixel.g,
            u8::MAX - pixel.b,
            pixel.a,
        )
    }
}
