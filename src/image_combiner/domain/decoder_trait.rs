use crate::infrastructure::error::InfrastructureError;
use image::DynamicImage;

#[cfg_attr(test, mockall::automock)]
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, InfrastructureError>;
}
