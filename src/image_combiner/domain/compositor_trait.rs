use crate::domain::composite::CompositeResult;
use crate::domain::error::DomainError;
use image::DynamicImage;

/// Places two rasters side by side, each filling its half, with a separator
/// stroke on the midline.
#[cfg_attr(test, mockall::automock)]
pub trait Compositor {
    fn combine(
        &self,
        left: &DynamicImage,
        right: &DynamicImage,
        separator_width: u32,
    ) -> Result<CompositeResult, DomainError>;
}
