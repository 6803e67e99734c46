pub mod composite;
pub mod compositor_trait;
pub mod decoder_trait;
pub mod error;
pub mod export_format;
pub mod exporter_trait;
pub mod image;
pub mod selection;
pub mod session;
pub mod slot;
