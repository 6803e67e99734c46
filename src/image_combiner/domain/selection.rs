use crate::domain::image::{ImageSummary, SelectedImage};
use crate::domain::slot::Slot;
use serde::Serialize;
use std::sync::Arc;

/// Receives a snapshot after every mutation of the selection.
///
/// Called synchronously, before the mutating method returns.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionObserver {
    fn selection_changed(&self, snapshot: &SelectionSnapshot);
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub first: Option<ImageSummary>,
    pub second: Option<ImageSummary>,
    pub ready: bool,
}

/// Issued when a load for a slot starts. Only the most recent ticket for a
/// slot may populate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub slot: Slot,
    pub generation: u64,
}

#[derive(Default)]
struct SlotEntry {
    image: Option<SelectedImage>,
    generation: u64,
}

impl SlotEntry {
    fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

#[derive(Default)]
pub struct SelectionSlots {
    first: SlotEntry,
    second: SlotEntry,
    observer: Option<Arc<dyn SelectionObserver + Send + Sync>>,
}

impl SelectionSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: Arc<dyn SelectionObserver + Send + Sync>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::default()
        }
    }

    fn entry(&self, slot: Slot) -> &SlotEntry {
        match slot {
            Slot::First => &self.first,
            Slot::Second => &self.second,
        }
    }

    fn entry_mut(&mut self, slot: Slot) -> &mut SlotEntry {
        match slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&SelectedImage> {
        self.entry(slot).image.as_ref()
    }

    /// Both images, when both slots are populated.
    pub fn pair(&self) -> Option<(&SelectedImage, &SelectedImage)> {
        Some((self.first.image.as_ref()?, self.second.image.as_ref()?))
    }

    pub fn populated(&self) -> usize {
        self.first.image.is_some() as usize + self.second.image.is_some() as usize
    }

    pub fn is_ready(&self) -> bool {
        self.populated() == 2
    }

    /// Replaces the slot unconditionally. Any load already in flight for
    /// this slot is superseded.
    pub fn set_image(&mut self, slot: Slot, image: SelectedImage) {
        let entry = self.entry_mut(slot);
        entry.bump();
        entry.image = Some(image);
        self.notify();
    }

    pub fn clear(&mut self) {
        for entry in [&mut self.first, &mut self.second] {
            entry.bump();
            entry.image = None;
        }
        self.notify();
    }

    pub fn begin_load(&mut self, slot: Slot) -> LoadTicket {
        let generation = self.entry_mut(slot).bump();
        LoadTicket { slot, generation }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.entry(ticket.slot).generation == ticket.generation
    }

    /// Stores the image if `ticket` is still the latest load for its slot.
    /// Returns false, leaving the slot untouched, when the ticket is stale.
    pub fn complete_load(&mut self, ticket: LoadTicket, image: SelectedImage) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                slot = ?ticket.slot,
                generation = ticket.generation,
                current = self.entry(ticket.slot).generation,
                "Discarding stale image load"
            );
            return false;
        }
        self.entry_mut(ticket.slot).image = Some(image);
        self.notify();
        true
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            first: self.first.image.as_ref().map(SelectedImage::summary),
            second: self.second.image.as_ref().map(SelectedImage::summary),
            ready: self.is_ready(),
        }
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer.selection_changed(&self.snapshot());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn image(name: &str, width: u32, height: u32) -> SelectedImage {
        SelectedImage::new(
            vec![0u8; 4],
            "image/png".to_string(),
            DynamicImage::ImageRgb8(RgbImage::new(width, height)),
            name.to_string(),
        )
    }

    #[test]
    fn test_ready_only_when_both_slots_populated() {
        let mut slots = SelectionSlots::new();
        assert!(!slots.is_ready());

        slots.set_image(Slot::First, image("a.png", 4, 3));
        assert!(!slots.is_ready());

        slots.set_image(Slot::First, image("b.png", 4, 3));
        assert!(!slots.is_ready());
        assert_eq!(slots.get(Slot::First).unwrap().display_name, "b.png");

        slots.set_image(Slot::Second, image("c.png", 6, 3));
        assert!(slots.is_ready());

        slots.clear();
        assert!(!slots.is_ready());
        assert_eq!(slots.populated(), 0);

        slots.set_image(Slot::Second, image("d.png", 6, 3));
        assert!(!slots.is_ready());
        assert!(slots.get(Slot::First).is_none());
    }

    #[test]
    fn test_readiness_over_mixed_sequence() {
        let mut slots = SelectionSlots::new();
        let ops: [(Option<Slot>, bool); 7] = [
            (Some(Slot::Second), false),
            (Some(Slot::Second), false),
            (Some(Slot::First), true),
            (None, false),
            (Some(Slot::First), false),
            (Some(Slot::Second), true),
            (Some(Slot::First), true),
        ];
        for (op, expected) in ops {
            match op {
                Some(slot) => slots.set_image(slot, image("x.png", 2, 2)),
                None => slots.clear(),
            }
            assert_eq!(slots.is_ready(), expected);
            assert_eq!(slots.is_ready(), slots.pair().is_some());
        }
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut slots = SelectionSlots::new();
        let slow = slots.begin_load(Slot::First);
        let fast = slots.begin_load(Slot::First);

        assert!(slots.complete_load(fast, image("newer.png", 2, 2)));
        assert!(!slots.complete_load(slow, image("older.png", 2, 2)));
        assert_eq!(slots.get(Slot::First).unwrap().display_name, "newer.png");
    }

    #[test]
    fn test_loads_for_other_slot_are_independent() {
        let mut slots = SelectionSlots::new();
        let first = slots.begin_load(Slot::First);
        let second = slots.begin_load(Slot::Second);

        assert!(slots.complete_load(second, image("b.png", 2, 2)));
        assert!(slots.complete_load(first, image("a.png", 2, 2)));
        assert!(slots.is_ready());
    }

    #[test]
    fn test_clear_supersedes_in_flight_load() {
        let mut slots = SelectionSlots::new();
        let ticket = slots.begin_load(Slot::Second);
        slots.clear();

        assert!(!slots.complete_load(ticket, image("late.png", 2, 2)));
        assert!(slots.get(Slot::Second).is_none());
    }

    #[test]
    fn test_direct_set_supersedes_in_flight_load() {
        let mut slots = SelectionSlots::new();
        let ticket = slots.begin_load(Slot::First);
        slots.set_image(Slot::First, image("direct.png", 2, 2));

        assert!(!slots.complete_load(ticket, image("late.png", 2, 2)));
        assert_eq!(slots.get(Slot::First).unwrap().display_name, "direct.png");
    }

    #[test]
    fn test_observer_notified_on_each_mutation() {
        let mut observer = MockSelectionObserver::new();
        let mut seq = mockall::Sequence::new();
        observer
            .expect_selection_changed()
            .withf(|s| s.first.is_some() && s.second.is_none() && !s.ready)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        observer
            .expect_selection_changed()
            .withf(|s| s.ready && s.second.as_ref().map(|i| i.width) == Some(6))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        observer
            .expect_selection_changed()
            .withf(|s| s.first.is_none() && s.second.is_none() && !s.ready)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut slots = SelectionSlots::with_observer(Arc::new(observer));
        slots.set_image(Slot::First, image("a.png", 4, 3));
        let ticket = slots.begin_load(Slot::Second);
        assert!(slots.complete_load(ticket, image("b.png", 6, 3)));
        slots.clear();
    }

    #[test]
    fn test_observer_not_notified_for_stale_load() {
        let mut observer = MockSelectionObserver::new();
        observer.expect_selection_changed().times(1).return_const(());

        let mut slots = SelectionSlots::with_observer(Arc::new(observer));
        let stale = slots.begin_load(Slot::First);
        let current = slots.begin_load(Slot::First);
        assert!(slots.complete_load(current, image("a.png", 2, 2)));
        assert!(!slots.complete_load(stale, image("b.png", 2, 2)));
    }
}
