use super::error::ApplicationError;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::compositor_trait::Compositor;
use crate::domain::decoder_trait::ImageDecoder;
use crate::domain::export_format::ExportFormat;
use crate::domain::exporter_trait::Exporter;
use crate::domain::image::SelectedImage;
use crate::domain::selection::{SelectionSlots, SelectionSnapshot};
use crate::domain::session::{Session, SessionState};
use crate::domain::slot::Slot;

pub const NOT_READY_WARNING: &str = "Please select two images first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOutcome {
    /// Decoded and stored in the slot.
    Loaded,
    /// Not an image media type; nothing changed.
    Ignored,
    /// A newer selection for the same slot arrived first; this one was dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub selection: SelectionSnapshot,
    pub format: ExportFormat,
    pub result: Option<ResultSummary>,
}

#[derive(Debug)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: String,
}

pub struct CombinerService {
    session: Mutex<Session>,
    decoder: Arc<dyn ImageDecoder + Send + Sync>,
    compositor: Arc<dyn Compositor + Send + Sync>,
    exporter: Arc<dyn Exporter + Send + Sync>,
    separator_width: u32,
}

fn is_image_media_type(media_type: &str) -> bool {
    media_type.trim().to_ascii_lowercase().starts_with("image/")
}

fn join_error(e: tokio::task::JoinError) -> ApplicationError {
    ApplicationError::BackgroundTask(e.to_string())
}

impl CombinerService {
    pub fn new(
        selection: SelectionSlots,
        decoder: Arc<dyn ImageDecoder + Send + Sync>,
        compositor: Arc<dyn Compositor + Send + Sync>,
        exporter: Arc<dyn Exporter + Send + Sync>,
        separator_width: u32,
        default_format: ExportFormat,
    ) -> Self {
        Self {
            session: Mutex::new(Session::new(selection, default_format)),
            decoder,
            compositor,
            exporter,
            separator_width,
        }
    }

    fn snapshot_of(session: &Session) -> SessionSnapshot {
        SessionSnapshot {
            state: session.state(),
            selection: session.selection.snapshot(),
            format: session.format(),
            result: session.composite().map(|c| ResultSummary {
                width: c.width(),
                height: c.height(),
            }),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        Self::snapshot_of(&*self.session.lock().await)
    }

    /// Decodes `bytes` off the async executor and stores the result in
    /// `slot`, unless another selection for the same slot started meanwhile.
    /// The session lock is not held while decoding.
    pub async fn load_image(
        &self,
        slot: Slot,
        bytes: Vec<u8>,
        media_type: &str,
        display_name: String,
    ) -> Result<LoadOutcome, ApplicationError> {
        if !is_image_media_type(media_type) {
            tracing::debug!(?slot, media_type, name = %display_name, "Ignoring non-image file");
            return Ok(LoadOutcome::Ignored);
        }

        let ticket = self.session.lock().await.selection.begin_load(slot);
        tracing::info!(
            ?slot,
            generation = ticket.generation,
            name = %display_name,
            size = bytes.len(),
            "Loading image"
        );

        let decoder = Arc::clone(&self.decoder);
        let (raster, bytes) = tokio::task::spawn_blocking(move || {
            decoder.decode(&bytes).map(|raster| (raster, bytes))
        })
        .await
        .map_err(join_error)??;

        let media_type = media_type.trim().to_ascii_lowercase();
        let image = SelectedImage::new(bytes, media_type, raster, display_name);
        let mut session = self.session.lock().await;
        if session.selection.complete_load(ticket, image) {
            Ok(LoadOutcome::Loaded)
        } else {
            Ok(LoadOutcome::Superseded)
        }
    }

    /// Composites both selected images. The session stays locked until the
    /// new result is stored, so a reset cannot interleave with a combine.
    pub async fn combine(
        &self,
        separator_width: Option<u32>,
    ) -> Result<SessionSnapshot, ApplicationError> {
        let separator_width = separator_width.unwrap_or(self.separator_width);
        let mut session = self.session.lock().await;

        let (left, right) = match session.selection.pair() {
            Some((left, right)) => (Arc::clone(&left.raster), Arc::clone(&right.raster)),
            None => {
                tracing::warn!(
                    selected = session.selection.populated(),
                    "Combine requested before two images were selected"
                );
                return Err(ApplicationError::NotReady(NOT_READY_WARNING.to_string()));
            }
        };

        let compositor = Arc::clone(&self.compositor);
        let composite = tokio::task::spawn_blocking(move || {
            compositor.combine(&left, &right, separator_width)
        })
        .await
        .map_err(join_error)??;

        tracing::info!(
            width = composite.width(),
            height = composite.height(),
            separator_width,
            "Combined images"
        );
        session.store_composite(composite);
        Ok(Self::snapshot_of(&session))
    }

    /// Encodes the current composite. Without an explicit format the
    /// session's selected format is used.
    pub async fn export(
        &self,
        format: Option<ExportFormat>,
    ) -> Result<ExportedImage, ApplicationError> {
        let session = self.session.lock().await;
        let format = format.unwrap_or_else(|| session.format());
        let surface = session
            .composite()
            .cloned()
            .ok_or(ApplicationError::NothingToExport)?;

        let exporter = Arc::clone(&self.exporter);
        let bytes = tokio::task::spawn_blocking(move || exporter.export(&surface, format))
            .await
            .map_err(join_error)??;

        tracing::info!(%format, len = bytes.len(), "Exported composite");
        Ok(ExportedImage {
            bytes,
            mime_type: format.mime_type(),
            file_name: format.file_name(),
        })
    }

    pub async fn set_format(&self, format: ExportFormat) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.set_format(format);
        Self::snapshot_of(&session)
    }

    pub async fn reset(&self) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.reset();
        tracing::info!("Session reset");
        Self::snapshot_of(&session)
    }

    /// Original bytes and media type of the image in `slot`.
    pub async fn slot_preview(&self, slot: Slot) -> Option<(Arc<[u8]>, String)> {
        let session = self.session.lock().await;
        session
            .selection
            .get(slot)
            .map(|image| (Arc::clone(&image.source_bytes), image.media_type.clone()))
    }
}
