use image::{DynamicImage, RgbImage};
use std::sync::Arc;

/// The opaque surface produced by a combine.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeResult {
    surface: Arc<RgbImage>,
}

impl CompositeResult {
    pub fn new(surface: RgbImage) -> Self {
        Self {
            surface: Arc::new(surface),
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &RgbImage {
        &self.surface
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgb8(self.surface().clone())
    }
}
