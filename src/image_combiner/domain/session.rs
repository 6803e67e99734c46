use crate::domain::composite::CompositeResult;
use crate::domain::export_format::ExportFormat;
use crate::domain::selection::SelectionSlots;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Empty,
    OneSelected,
    TwoSelected,
    Combined,
}

/// Selection, the latest composite and the chosen export format.
///
/// Replacing an image after a combine keeps the previous composite until the
/// next combine or reset, so the state stays `Combined`.
pub struct Session {
    pub selection: SelectionSlots,
    composite: Option<CompositeResult>,
    format: ExportFormat,
}

impl Session {
    pub fn new(selection: SelectionSlots, format: ExportFormat) -> Self {
        Self {
            selection,
            composite: None,
            format,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.composite.is_some() {
            return SessionState::Combined;
        }
        match self.selection.populated() {
            0 => SessionState::Empty,
            1 => SessionState::OneSelected,
            _ => SessionState::TwoSelected,
        }
    }

    pub fn composite(&self) -> Option<&CompositeResult> {
        self.composite.as_ref()
    }

    pub fn store_composite(&mut self, composite: CompositeResult) {
        self.composite = Some(composite);
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    /// Back to `Empty`. The export format is kept.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.composite = None;
    }
}
