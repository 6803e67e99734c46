use super::error::DomainError;
use image::ImageFormat as InnerImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const EXPORT_FILE_STEM: &str = "combined-image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    WebP,
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::WebP => "image/webp",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::WebP => "webp",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.{}", EXPORT_FILE_STEM, self.extension())
    }

    pub fn image_format(self) -> InnerImageFormat {
        match self {
            ExportFormat::WebP => InnerImageFormat::WebP,
            ExportFormat::Png => InnerImageFormat::Png,
            ExportFormat::Jpeg => InnerImageFormat::Jpeg,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "webp" => Ok(ExportFormat::WebP),
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            other => Err(DomainError::InvalidInput(format!(
                "unsupported export format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
