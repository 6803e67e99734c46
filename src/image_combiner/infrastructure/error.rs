use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Image decoding failed: {0}")]
    Decoding(String),

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    #[error("Invalid data URL: {0}")]
    DataUrl(String),

    #[error("Underlying image library error")]
    ImageLibError(#[from] image::ImageError),

    #[error("Underlying I/O error")]
    IoError(#[from] std::io::Error),

    #[error("Base64 decode error")]
    Base64DecodeError(#[from] base64::DecodeError),
}
