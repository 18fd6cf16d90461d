//! Banner/panel state machine over a [`ConsentStore`].

use crate::store::{ConsentRecord, ConsentStore, StoreError};

/// Visibility state of the consent UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    Hidden,
    BannerVisible,
    PanelOpen,
}

/// Drives banner/panel visibility and persists the user's choices.
///
/// Transitions not listed in the state machine are no-ops: calling
/// `accept_all` while hidden neither re-shows the banner nor re-persists.
#[derive(Debug)]
pub struct ConsentController<S: ConsentStore> {
    store: S,
    state: BannerState,
    record_exists: bool,
}

impl<S: ConsentStore> ConsentController<S> {
    /// A first visit (no persisted record) starts at the banner; a
    /// returning visitor starts hidden.
    pub fn new(store: S) -> Self {
        let record_exists = store.exists();
        let state = if record_exists {
            BannerState::Hidden
        } else {
            BannerState::BannerVisible
        };
        Self {
            store,
            state,
            record_exists,
        }
    }

    pub fn state(&self) -> BannerState {
        self.state
    }

    /// Current record as the preference panel shows it.
    pub fn current(&self) -> ConsentRecord {
        self.store.load()
    }

    /// Banner: grant all categories and hide.
    pub fn accept_all(&mut self) -> Result<(), StoreError> {
        if self.state != BannerState::BannerVisible {
            return Ok(());
        }
        self.persist(ConsentRecord::accept_all())
    }

    /// Banner: reject the non-essential categories and hide.
    pub fn reject_all(&mut self) -> Result<(), StoreError> {
        if self.state != BannerState::BannerVisible {
            return Ok(());
        }
        self.persist(ConsentRecord::default())
    }

    /// Banner: open the detailed preference panel.
    pub fn open_preferences(&mut self) {
        if self.state == BannerState::BannerVisible {
            self.state = BannerState::PanelOpen;
        }
    }

    /// Panel: merge the two editable categories onto the current record,
    /// persist, and hide. `essential` is not an input.
    pub fn save_preferences(&mut self, analytics: bool, marketing: bool) -> Result<(), StoreError> {
        if self.state != BannerState::PanelOpen {
            return Ok(());
        }
        let mut record = self.store.load();
        record.analytics = analytics;
        record.marketing = marketing;
        self.persist(record)
    }

    /// Panel: discard edits. Falls back to the banner when no record is
    /// stored, otherwise hides.
    pub fn cancel(&mut self) {
        if self.state != BannerState::PanelOpen {
            return;
        }
        self.state = if self.record_exists {
            BannerState::Hidden
        } else {
            BannerState::BannerVisible
        };
    }

    /// "Manage cookies" with no stored choice: drop the record and
    /// re-surface the banner, from any state.
    pub fn external_clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.record_exists = false;
        self.state = BannerState::BannerVisible;
        Ok(())
    }

    fn persist(&mut self, record: ConsentRecord) -> Result<(), StoreError> {
        self.store.save(&record)?;
        self.record_exists = true;
        self.state = BannerState::Hidden;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.save(&ConsentRecord::default()).unwrap();
        store
    }

    #[test]
    fn test_fresh_session_shows_banner() {
        let controller = ConsentController::new(MemoryStore::new());
        assert_eq!(controller.state(), BannerState::BannerVisible);
    }

    #[test]
    fn test_returning_visitor_starts_hidden() {
        let controller = ConsentController::new(seeded_store());
        assert_eq!(controller.state(), BannerState::Hidden);
    }

    #[test]
    fn test_accept_all_persists_and_hides() {
        let mut controller = ConsentController::new(MemoryStore::new());
        controller.accept_all().unwrap();
        assert_eq!(controller.state(), BannerState::Hidden);
        assert_eq!(controller.current(), ConsentRecord::accept_all());
    }

    #[test]
    fn test_reject_all_persists_and_hides() {
        let mut controller = ConsentController::new(MemoryStore::new());
        controller.reject_all().unwrap();
        assert_eq!(controller.state(), BannerState::Hidden);
        let record = controller.current();
        assert!(record.essential);
        assert!(!record.analytics);
        assert!(!record.marketing);
    }

    #[test]
    fn test_open_preferences_from_banner_only() {
        let mut controller = ConsentController::new(MemoryStore::new());
        controller.open_preferences();
        assert_eq!(controller.state(), BannerState::PanelOpen);

        let mut hidden = ConsentController::new(seeded_store());
        hidden.open_preferences();
        assert_eq!(hidden.state(), BannerState::Hidden);
    }

    #[test]
    fn test_save_preferences_merges_and_hides() {
        let mut controller = ConsentController::new(MemoryStore::new());
        controller.open_preferences();
        controller.save_preferences(true, false).unwrap();
        assert_eq!(controller.state(), BannerState::Hidden);

        let record = controller.current();
        assert!(record.essential);
        assert!(record.analytics);
        assert!(!record.marketing);
    }

    #[test]
    fn test_cancel_returns_to_banner_without_persisting() {
        let mut controller = ConsentController::new(MemoryStore::new());
        controller.open_preferences();
        controller.cancel();
        assert_eq!(controller.state(), BannerState::BannerVisible);
        assert_eq!(controller.current(), ConsentRecord::default());
    }

    #[test]
    fn test_external_clear_resurfaces_banner() {
        let mut controller = ConsentController::new(seeded_store());
        assert_eq!(controller.state(), BannerState::Hidden);
        controller.external_clear().unwrap();
        assert_eq!(controller.state(), BannerState::BannerVisible);
        assert_eq!(controller.current(), ConsentRecord::default());
    }

    #[test]
    fn test_cancel_after_clear_keeps_banner() {
        let mut controller = ConsentController::new(seeded_store());
        controller.external_clear().unwrap();
        controller.open_preferences();
        controller.cancel();
        assert_eq!(controller.state(), BannerState::BannerVisible);
    }

    #[test]
    fn test_hidden_actions_are_noops() {
        let mut controller = ConsentController::new(seeded_store());
        controller.accept_all().unwrap();
        controller.reject_all().unwrap();
        controller.save_preferences(true, true).unwrap();
        controller.cancel();
        assert_eq!(controller.state(), BannerState::Hidden);
        // Nothing was persisted by the no-op calls.
        assert_eq!(controller.current(), ConsentRecord::default());
    }

    #[test]
    fn test_full_banner_cycle() {
        let mut controller = ConsentController::new(MemoryStore::new());
        controller.open_preferences();
        controller.save_preferences(false, true).unwrap();
        assert_eq!(controller.state(), BannerState::Hidden);

        controller.external_clear().unwrap();
        assert_eq!(controller.state(), BannerState::BannerVisible);

        controller.accept_all().unwrap();
        assert_eq!(controller.state(), BannerState::Hidden);
        assert_eq!(controller.current(), ConsentRecord::accept_all());
    }
}
