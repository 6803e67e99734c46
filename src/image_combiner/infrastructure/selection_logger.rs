use crate::domain::image::ImageSummary;
use crate::domain::selection::{SelectionObserver, SelectionSnapshot};

/// Reports selection changes to the log.
pub struct SelectionLogger;

fn display_name(slot: &Option<ImageSummary>) -> Option<&str> {
    slot.as_ref().map(|image| image.display_name.as_str())
}

impl SelectionObserver for SelectionLogger {
    fn selection_changed(&self, snapshot: &SelectionSnapshot) {
        tracing::info!(
            first = ?display_name(&snapshot.first),
            second = ?display_name(&snapshot.second),
            ready = snapshot.ready,
            "Selection changed"
        );
    }
}
