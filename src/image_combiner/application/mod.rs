pub mod combiner_service;
pub mod error;
