use thiserror::Error;
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    NotReady(String),

    #[error("Nothing to export: combine two images first")]
    NothingToExport,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to build response: {0}")]
    Response(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Background task failed: {0}")]
    BackgroundTask(String),

    #[error("Domain error occurred: {0}")]
    DomainError(#[from] DomainError),

    #[error("Infrastructure error occurred: {0}")]
    InfrastructureError(#[from] InfrastructureError),
}

use axum::response::{IntoResponse, Response};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApplicationError::NotReady(_) | ApplicationError::NothingToExport => {
                StatusCode::CONFLICT
            }
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApplicationError::Upload(_) => StatusCode::BAD_REQUEST,
            ApplicationError::BackgroundTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApplicationError::DomainError(_) => StatusCode::BAD_REQUEST,
            ApplicationError::InfrastructureError(infra_err) => match infra_err {
                InfrastructureError::Decoding(_)
                | InfrastructureError::ImageLibError(_)
                | InfrastructureError::DataUrl(_)
                | InfrastructureError::Base64DecodeError(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
