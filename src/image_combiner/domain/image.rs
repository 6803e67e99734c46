use image::{DynamicImage, GenericImageView};
use serde::Serialize;
use std::sync::Arc;

/// A decoded image the user picked for one slot.
///
/// The raster and source bytes are shared so that combining or previewing
/// never copies pixel data out of the session.
#[derive(Clone, Debug)]
pub struct SelectedImage {
    pub source_bytes: Arc<[u8]>,
    pub media_type: String,
    pub raster: Arc<DynamicImage>,
    pub display_name: String,
}

impl SelectedImage {
    pub fn new(
        source_bytes: Vec<u8>,
        media_type: String,
        raster: DynamicImage,
        display_name: String,
    ) -> Self {
        Self {
            source_bytes: source_bytes.into(),
            media_type,
            raster: Arc::new(raster),
            display_name,
        }
    }

    pub fn summary(&self) -> ImageSummary {
        let (width, height) = self.raster.dimensions();
        ImageSummary {
            display_name: self.display_name.clone(),
            media_type: self.media_type.clone(),
            width,
            height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub display_name: String,
    pub media_type: String,
    pub width: u32,
    pub height: u32,
}
