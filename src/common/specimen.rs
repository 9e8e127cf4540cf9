use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use uuid::Uuid;

use crate::error::InputError;

/// Where a specimen came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecimenSource {
    File(PathBuf),
    Dropped(String),
    Memory,
}

impl fmt::Display for SpecimenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecimenSource::File(path) => write!(f, "{}", path.display()),
            SpecimenSource::Dropped(name) => write!(f, "{name}"),
            SpecimenSource::Memory => write!(f, "<memory>"),
        }
    }
}

/// A single submitted skin photograph, decoded to RGB8.
#[derive(Clone)]
pub struct Specimen {
    id: Uuid,
    image: Arc<RgbImage>,
    submitted_at: DateTime<Utc>,
    source: SpecimenSource,
}

impl Specimen {
    /// Wraps an already decoded image. Zero-sized images are rejected here so
    /// nothing downstream has to divide by an empty pixel count.
    pub fn new(image: RgbImage, source: SpecimenSource) -> Result<Self, InputError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(InputError::EmptyImage { width, height });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            image: Arc::new(image),
            submitted_at: Utc::now(),
            source,
        })
    }

    /// Decodes a JPEG or PNG file. The format is sniffed from the content,
    /// so a mislabelled extension still loads.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let read_error = |e: std::io::Error| InputError::Read(e, path.to_path_buf());
        let reader = ImageReader::open(path)
            .map_err(read_error)?
            .with_guessed_format()
            .map_err(read_error)?;
        match reader.format() {
            Some(format) => ensure_supported(format)?,
            None => return Err(InputError::UnsupportedFormat(path.display().to_string())),
        }

        let decoded = reader.decode()?;
        Self::from_dynamic(decoded, SpecimenSource::File(path.to_path_buf()))
    }

    pub fn from_bytes(bytes: &[u8], source: SpecimenSource) -> Result<Self, InputError> {
        if bytes.is_empty() {
            return Err(InputError::NoImage);
        }
        let format = image::guess_format(bytes)?;
        ensure_supported(format)?;

        let decoded = image::load_from_memory_with_format(bytes, format)?;
        Self::from_dynamic(decoded, source)
    }

    fn from_dynamic(image: DynamicImage, source: SpecimenSource) -> Result<Self, InputError> {
        // Alpha and grayscale inputs are flattened to three channels.
        Self::new(image.to_rgb8(), source)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn source(&self) -> &SpecimenSource {
        &self.source
    }
}

fn ensure_supported(format: ImageFormat) -> Result<(), InputError> {
    match format {
        ImageFormat::Jpeg | ImageFormat::Png => Ok(()),
        other => Err(InputError::UnsupportedFormat(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn cloning_specimen_shares_image_buffer() {
        let img = ImageBuffer::from_pixel(16, 16, Rgb([1, 2, 3]));
        let s1 = Specimen::new(img, SpecimenSource::Memory).unwrap();
        let s2 = s1.clone();
        assert!(Arc::ptr_eq(&s1.image, &s2.image));
        assert_eq!(s1.id(), s2.id());
    }

    #[test]
    fn zero_dimension_image_is_rejected() {
        let img: RgbImage = ImageBuffer::new(0, 10);
        assert!(matches!(
            Specimen::new(img, SpecimenSource::Memory),
            Err(InputError::EmptyImage {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn png_bytes_are_decoded() {
        let img = ImageBuffer::from_pixel(4, 3, Rgb([200, 150, 120]));
        let bytes = encode(&img, ImageFormat::Png);
        let specimen =
            Specimen::from_bytes(&bytes, SpecimenSource::Dropped("a.png".into())).unwrap();
        assert_eq!(specimen.image().dimensions(), (4, 3));
        assert_eq!(specimen.image().get_pixel(0, 0), &Rgb([200, 150, 120]));
    }

    #[test]
    fn unsupported_formats_are_rejected() {
        let img = ImageBuffer::from_pixel(4, 4, Rgb([10, 10, 10]));
        let bytes = encode(&img, ImageFormat::Bmp);
        assert!(matches!(
            Specimen::from_bytes(&bytes, SpecimenSource::Memory),
            Err(InputError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn empty_bytes_mean_no_image() {
        assert!(matches!(
            Specimen::from_bytes(&[], SpecimenSource::Memory),
            Err(InputError::NoImage)
        ));
    }

    fn scratch_file(extension: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("dermascan-{}.{extension}", Uuid::new_v4()));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn jpeg_file_is_loaded_from_path() {
        let img = ImageBuffer::from_pixel(40, 30, Rgb([224, 172, 105]));
        let path = scratch_file("jpg", &encode(&img, ImageFormat::Jpeg));

        let specimen = Specimen::from_path(&path).unwrap();
        assert_eq!(specimen.image().dimensions(), (40, 30));
        assert_eq!(specimen.source(), &SpecimenSource::File(path.clone()));
        // Lossy codec: a flat color survives within a few levels.
        let px = specimen.image().get_pixel(20, 15);
        for (decoded, original) in px.0.iter().zip([224u8, 172, 105]) {
            assert!(decoded.abs_diff(original) <= 4, "{px:?}");
        }
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn format_is_taken_from_content_not_extension() {
        let img = ImageBuffer::from_pixel(8, 6, Rgb([90, 60, 40]));
        let path = scratch_file("png", &encode(&img, ImageFormat::Jpeg));

        let specimen = Specimen::from_path(&path).unwrap();
        assert_eq!(specimen.image().dimensions(), (8, 6));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn unsupported_file_content_is_rejected() {
        let img = ImageBuffer::from_pixel(4, 4, Rgb([10, 10, 10]));
        let path = scratch_file("jpg", &encode(&img, ImageFormat::Bmp));

        assert!(matches!(
            Specimen::from_path(&path),
            Err(InputError::UnsupportedFormat(_))
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join(format!("dermascan-{}.jpg", Uuid::new_v4()));
        assert!(matches!(
            Specimen::from_path(&path),
            Err(InputError::Read(_, _))
        ));
    }
}
