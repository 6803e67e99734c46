pub mod axum_handler;
pub mod data_url;
pub mod error;
pub mod image_compositor;
pub mod image_decoder;
pub mod image_exporter;
pub mod selection_logger;
