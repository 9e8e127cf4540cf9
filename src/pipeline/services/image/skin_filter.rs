use image::{Rgb, RgbImage};
use tracing::debug;

use crate::error::InputError;
use crate::pipeline::domain::SkinScreening;

/// Inclusive chroma window for skin, in 8-bit YCrCb. Luma is unconstrained.
pub const SKIN_CR_RANGE: (u8, u8) = (133, 173);
pub const SKIN_CB_RANGE: (u8, u8) = (77, 127);
/// An image is treated as skin when strictly more than this share of its
/// pixels fall in the chroma window.
pub const SKIN_RATIO_THRESHOLD: f64 = 0.2;

// BT.601 RGB -> YCrCb coefficients in 14-bit fixed point.
const YCC_SHIFT: i32 = 14;
const R2Y: i32 = 4899;
const G2Y: i32 = 9617;
const B2Y: i32 = 1868;
const R2CR: i32 = 11682;
const B2CB: i32 = 9241;
const CHROMA_DELTA: i32 = 128 << YCC_SHIFT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YCrCb {
    pub y: u8,
    pub cr: u8,
    pub cb: u8,
}

/// Color heuristic deciding whether a photograph plausibly shows human skin.
#[derive(Debug, Clone, Default)]
pub struct SkinFilter;

impl SkinFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_ycrcb(&self, px: &Rgb<u8>) -> YCrCb {
        let (r, g, b) = (px[0] as i32, px[1] as i32, px[2] as i32);
        let y = descale(r * R2Y + g * G2Y + b * B2Y);
        let cr = descale((r - y) * R2CR + CHROMA_DELTA);
        let cb = descale((b - y) * B2CB + CHROMA_DELTA);
        YCrCb {
            y: saturate(y),
            cr: saturate(cr),
            cb: saturate(cb),
        }
    }

    pub fn is_skin_pixel(&self, px: &Rgb<u8>) -> bool {
        let ycc = self.to_ycrcb(px);
        (SKIN_CR_RANGE.0..=SKIN_CR_RANGE.1).contains(&ycc.cr)
            && (SKIN_CB_RANGE.0..=SKIN_CB_RANGE.1).contains(&ycc.cb)
    }

    pub fn screen(&self, image: &RgbImage) -> Result<SkinScreening, InputError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(InputError::EmptyImage { width, height });
        }

        let skin_pixels = image.pixels().filter(|px| self.is_skin_pixel(px)).count() as u64;
        let screening = SkinScreening::new(
            skin_pixels,
            width as u64 * height as u64,
            SKIN_RATIO_THRESHOLD,
        );

        debug!(
            "Skin screening: {}/{} pixels ({:.3}), passed={}",
            screening.skin_pixels(),
            screening.total_pixels(),
            screening.ratio(),
            screening.passed()
        );
        Ok(screening)
    }
}

fn descale(x: i32) -> i32 {
    (x + (1 << (YCC_SHIFT - 1))) >> YCC_SHIFT
}

fn saturate(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}
