use crate::application::error::ApplicationError;
use axum::{
    body::Body,
    extract::{Json, Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::combiner_service::{CombinerService, LoadOutcome, SessionSnapshot};
use crate::domain::export_format::ExportFormat;
use crate::domain::slot::Slot;
use super::data_url::parse_data_url;

#[derive(Clone)]
pub struct AppState {
    pub combiner_service: Arc<CombinerService>,
}

#[derive(Serialize, Debug)]
pub struct LoadResponse {
    pub outcome: LoadOutcome,
    pub ignored: bool,
    pub session: SessionSnapshot,
}

#[derive(Deserialize, Debug)]
pub struct DataUrlParams {
    #[serde(rename = "dataUrl")]
    pub data_url: String,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CombineParams {
    #[serde(rename = "separatorWidth")]
    pub separator_width: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct FormatParams {
    pub format: ExportFormat,
}

#[derive(Deserialize, Debug)]
pub struct DownloadParams {
    pub format: Option<String>,
}

async fn load_response(
    service: &CombinerService,
    outcome: LoadOutcome,
) -> Json<LoadResponse> {
    Json(LoadResponse {
        outcome,
        ignored: outcome == LoadOutcome::Ignored,
        session: service.snapshot().await,
    })
}

pub async fn state_handler(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.combiner_service.snapshot().await)
}

/// Takes the first file field of the form. Fields without an `image/*`
/// content type are ignored without touching the slot.
pub async fn upload_image_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    mut multipart: Multipart,
) -> Result<Json<LoadResponse>, ApplicationError> {
    let slot = Slot::try_from(index)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApplicationError::Upload(format!("Multipart error: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let media_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| {
                ApplicationError::Upload(format!("Failed to read multipart field: {}", e))
            })?;

        let outcome = state
            .combiner_service
            .load_image(slot, data.to_vec(), &media_type, file_name)
            .await?;
        return Ok(load_response(&state.combiner_service, outcome).await);
    }

    Err(ApplicationError::Upload("no file field in form".to_string()))
}

pub async fn upload_data_url_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(params): Json<DataUrlParams>,
) -> Result<Json<LoadResponse>, ApplicationError> {
    let slot = Slot::try_from(index)?;
    let parsed = parse_data_url(&params.data_url)?;
    let name = params.name.unwrap_or_else(|| format!("image-{}", slot.index() + 1));

    let outcome = state
        .combiner_service
        .load_image(slot, parsed.bytes, &parsed.media_type, name)
        .await?;
    Ok(load_response(&state.combiner_service, outcome).await)
}

pub async fn slot_preview_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, ApplicationError> {
    let slot = Slot::try_from(index)?;
    let (bytes, media_type) = state
        .combiner_service
        .slot_preview(slot)
        .await
        .ok_or_else(|| ApplicationError::NotFound(format!("no image selected in slot {}", index)))?;

    Response::builder()
        .header(header::CONTENT_TYPE, media_type)
        .body(Body::from(bytes.to_vec()))
        .map_err(|e| ApplicationError::Response(format!("Failed to build preview response: {}", e)))
}

pub async fn combine_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CombineParams>,
) -> Result<Json<SessionSnapshot>, ApplicationError> {
    let snapshot = state.combiner_service.combine(params.separator_width).await?;
    Ok(Json(snapshot))
}

pub async fn result_preview_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApplicationError> {
    let exported = state.combiner_service.export(Some(ExportFormat::Png)).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, exported.mime_type)
        .body(Body::from(exported.bytes))
        .map_err(|e| ApplicationError::Response(format!("Failed to build preview response: {}", e)))
}

pub async fn set_format_handler(
    State(state): State<Arc<AppState>>,
    Json(params): Json<FormatParams>,
) -> Json<SessionSnapshot> {
    Json(state.combiner_service.set_format(params.format).await)
}

pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, ApplicationError> {
    let format = params
        .format
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?;
    let exported = state.combiner_service.export(format).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, exported.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exported.file_name),
        )
        .body(Body::from(exported.bytes))
        .map_err(|e| {
            ApplicationError::Response(format!("Failed to build download response: {}", e))
        })
}

pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.combiner_service.reset().await)
}
