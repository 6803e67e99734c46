use crate::domain::decoder_trait::ImageDecoder;
use super::error::InfrastructureError;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;

pub struct RasterDecoder;

impl RasterDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, InfrastructureError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(InfrastructureError::IoError)?;
        let format = reader.format();
        let image = reader.decode().map_err(InfrastructureError::ImageLibError)?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(InfrastructureError::Decoding(format!(
                "decoded image has zero area ({}x{})",
                width, height
            )));
        }
        tracing::debug!(?format, width, height, "Decoded image");
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([12, 34, 56]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_guesses_format() {
        let decoder = RasterDecoder::new();
        for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP] {
            let image = decoder.decode(&encoded(17, 9, format)).unwrap();
            assert_eq!(image.dimensions(), (17, 9), "{:?}", format);
        }
    }

    #[test]
    fn test_decode_invalid_image_data() {
        let decoder = RasterDecoder::new();
        let result = decoder.decode(&[1, 2, 3, 4]);
        match result {
            Err(InfrastructureError::ImageLibError(_)) | Err(InfrastructureError::IoError(_)) => {}
            other => panic!(
                "Expected ImageLibError or IoError, got {:?}",
                other.map(|i| i.dimensions())
            ),
        }
    }
}
