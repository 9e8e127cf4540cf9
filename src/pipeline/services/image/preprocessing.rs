use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::config::{ModelSettings, TensorLayout};
use crate::error::ModelError;

/// Dense `f32` input for the classifier, batch size 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
    shape: [usize; 4],
    layout: TensorLayout,
}

impl ImageTensor {
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// Channel value at pixel `(x, y)`, independent of layout.
    pub fn value(&self, x: usize, y: usize, channel: usize) -> f32 {
        let offset = match self.layout {
            TensorLayout::Nhwc => (y * self.shape[2] + x) * 3 + channel,
            TensorLayout::Nchw => (channel * self.shape[2] + y) * self.shape[3] + x,
        };
        self.data[offset]
    }
}

/// Resizes and normalizes images into the classifier's input format.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    width: u32,
    height: u32,
    filter: FilterType,
    layout: TensorLayout,
}

impl Preprocessor {
    pub fn new(
        width: u32,
        height: u32,
        filter: FilterType,
        layout: TensorLayout,
    ) -> Result<Self, ModelError> {
        if width == 0 || height == 0 {
            return Err(ModelError::InvalidInputSize { width, height });
        }
        Ok(Self {
            width,
            height,
            filter,
            layout,
        })
    }

    pub fn from_settings(settings: &ModelSettings) -> Result<Self, ModelError> {
        Self::new(
            settings.input_width,
            settings.input_height,
            settings.resize_filter.filter_type(),
            settings.layout,
        )
    }

    /// The tensor shape `prepare` produces.
    pub fn tensor_shape(&self) -> [usize; 4] {
        let (w, h) = (self.width as usize, self.height as usize);
        match self.layout {
            TensorLayout::Nhwc => [1, h, w, 3],
            TensorLayout::Nchw => [1, 3, h, w],
        }
    }

    /// Stretches the image to the input size (aspect ratio is not kept) and
    /// scales every channel from `0..=255` to `0.0..=1.0`.
    pub fn prepare(&self, image: &RgbImage) -> ImageTensor {
        let resized = if image.dimensions() == (self.width, self.height) {
            image.clone()
        } else {
            imageops::resize(image, self.width, self.height, self.filter)
        };

        let data: Vec<f32> = match self.layout {
            TensorLayout::Nhwc => resized
                .as_raw()
                .iter()
                .map(|&v| v as f32 / 255.0)
                .collect(),
            TensorLayout::Nchw => {
                let plane = (self.width * self.height) as usize;
                let mut data = vec![0.0f32; plane * 3];
                for (i, px) in resized.pixels().enumerate() {
                    for c in 0..3 {
                        data[c * plane + i] = px[c] as f32 / 255.0;
                    }
                }
                data
            }
        };

        ImageTensor {
            data,
            shape: self.tensor_shape(),
            layout: self.layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn gradient(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 255]))
    }

    #[test]
    fn default_input_is_nhwc_224() {
        let preprocessor = Preprocessor::from_settings(&ModelSettings::default()).unwrap();
        let photo = ImageBuffer::from_pixel(640, 480, Rgb([255, 0, 51]));
        let tensor = preprocessor.prepare(&photo);

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        assert_eq!(tensor.data().len(), 224 * 224 * 3);
        // One 8-bit step of slack for resampling round-off.
        let step = 1.0 / 255.0 + 1e-6;
        assert!((tensor.value(100, 100, 0) - 1.0).abs() <= step);
        assert!(tensor.value(100, 100, 1).abs() <= step);
        assert!((tensor.value(100, 100, 2) - 0.2).abs() <= step);
    }

    #[test]
    fn values_are_normalized_to_unit_interval() {
        let preprocessor =
            Preprocessor::new(8, 8, FilterType::CatmullRom, TensorLayout::Nhwc).unwrap();
        let tensor = preprocessor.prepare(&gradient(23, 17));
        assert!(tensor.data().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn aspect_ratio_is_not_preserved() {
        let preprocessor =
            Preprocessor::new(4, 4, FilterType::Nearest, TensorLayout::Nhwc).unwrap();
        let wide = ImageBuffer::from_pixel(100, 10, Rgb([10, 20, 30]));
        let tensor = preprocessor.prepare(&wide);
        assert_eq!(tensor.shape(), [1, 4, 4, 3]);
        // No padding: every output pixel comes from the source.
        assert!((0..4).all(|y| (0..4).all(|x| tensor.value(x, y, 2) == 30.0 / 255.0)));
    }

    #[test]
    fn layouts_hold_the_same_pixels() {
        let image = gradient(6, 5);
        let nhwc = Preprocessor::new(6, 5, FilterType::Nearest, TensorLayout::Nhwc)
            .unwrap()
            .prepare(&image);
        let nchw = Preprocessor::new(6, 5, FilterType::Nearest, TensorLayout::Nchw)
            .unwrap()
            .prepare(&image);

        assert_eq!(nchw.shape(), [1, 3, 5, 6]);
        for y in 0..5 {
            for x in 0..6 {
                for c in 0..3 {
                    assert_eq!(nhwc.value(x, y, c), nchw.value(x, y, c));
                }
            }
        }
        assert_eq!(nchw.value(3, 2, 0), 30.0 / 255.0);
        assert_eq!(nchw.value(3, 2, 1), 20.0 / 255.0);
    }

    #[test]
    fn zero_input_size_is_rejected() {
        assert!(matches!(
            Preprocessor::new(0, 224, FilterType::Nearest, TensorLayout::Nhwc),
            Err(ModelError::InvalidInputSize { .. })
        ));
    }
}
