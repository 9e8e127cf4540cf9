use serde::Serialize;

/// Result of the skin color gate for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinScreening {
    skin_pixels: u64,
    total_pixels: u64,
    ratio: f64,
    passed: bool,
}

impl SkinScreening {
    pub fn new(skin_pixels: u64, total_pixels: u64, threshold: f64) -> Self {
        let ratio = if total_pixels == 0 {
            0.0
        } else {
            skin_pixels as f64 / total_pixels as f64
        };
        Self {
            skin_pixels,
            total_pixels,
            ratio,
            passed: ratio > threshold,
        }
    }

    pub fn skin_pixels(&self) -> u64 {
        self.skin_pixels
    }

    pub fn total_pixels(&self) -> u64 {
        self.total_pixels
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn passed(&self) -> bool {
        self.passed
    }
}
