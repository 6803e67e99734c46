use crate::domain::composite::CompositeResult;
use crate::domain::export_format::ExportFormat;
use crate::domain::exporter_trait::Exporter;
use super::error::InfrastructureError;
use std::io::Cursor;

/// Encodes composites with the image crate's built-in encoders. PNG and WebP
/// are lossless; JPEG uses the encoder's default quality.
pub struct RasterExporter;

impl RasterExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for RasterExporter {
    fn export(
        &self,
        surface: &CompositeResult,
        format: ExportFormat,
    ) -> Result<Vec<u8>, InfrastructureError> {
        if surface.width() == 0 || surface.height() == 0 {
            return Err(InfrastructureError::Encoding(format!(
                "cannot encode a {}x{} surface as {}",
                surface.width(),
                surface.height(),
                format
            )));
        }

        let mut buffer = Cursor::new(Vec::new());
        surface
            .to_dynamic()
            .write_to(&mut buffer, format.image_format())
            .map_err(|e| InfrastructureError::Encoding(format!("{}: {}", format, e)))?;

        let bytes = buffer.into_inner();
        tracing::debug!(%format, len = bytes.len(), "Encoded composite");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn test_png_export_is_lossless() {
        let source = gradient(800, 600);
        let surface = CompositeResult::new(source.clone());
        let bytes = RasterExporter::new().export(&surface, ExportFormat::Png).unwrap();

        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (800, 600));
        assert_eq!(decoded.to_rgb8(), source);
    }

    #[test]
    fn test_jpeg_and_webp_exports_decode_to_same_size() {
        let surface = CompositeResult::new(gradient(64, 48));
        let exporter = RasterExporter::new();

        let jpeg = exporter.export(&surface, ExportFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(image::load_from_memory(&jpeg).unwrap().dimensions(), (64, 48));

        let webp = exporter.export(&surface, ExportFormat::WebP).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
        assert_eq!(image::load_from_memory(&webp).unwrap().dimensions(), (64, 48));
    }

    #[test]
    fn test_zero_dimension_surface_fails_to_encode() {
        let surface = CompositeResult::new(RgbImage::new(0, 0));
        match RasterExporter::new().export(&surface, ExportFormat::Png) {
            Err(InfrastructureError::Encoding(msg)) => assert!(msg.contains("0x0")),
            other => panic!("Expected Encoding error, got {:?}", other),
        }
    }
}
