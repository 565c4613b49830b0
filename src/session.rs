//! The single writer in front of the progress store.
//!
//! Every operation is forwarded to the store; if persisted state changed,
//! the session writes it to the save slot. Saving is best effort: a failed
//! write is logged and in-memory progress stands.

use std::sync::Arc;

use log::{info, warn};

use crate::campaign::Campaign;
use crate::error::ProgressError;
use crate::progress::{ProgressActions, ProgressEvent, ProgressStore, Tool};
use crate::save::SaveSlot;

pub struct Session {
    store: ProgressStore,
    slot: Option<SaveSlot>,
    saved_revision: u64,
}

impl Session {
    /// Resumes from `slot` if it holds a readable save, otherwise starts
    /// fresh.
    pub fn open(campaign: Arc<Campaign>, slot: SaveSlot) -> Self {
        let store = match slot.load() {
            Ok(Some(data)) => {
                info!("resuming from {}", slot.path().display());
                ProgressStore::restore(campaign, data)
            }
            Ok(None) => ProgressStore::new(campaign),
            Err(e) => {
                warn!(
                    "ignoring unreadable save at {}: {e}",
                    slot.path().display()
                );
                ProgressStore::new(campaign)
            }
        };
        let saved_revision = store.revision();
        Session {
            store,
            slot: Some(slot),
            saved_revision,
        }
    }

    pub fn in_memory(campaign: Arc<Campaign>) -> Self {
        Session {
            store: ProgressStore::new(campaign),
            slot: None,
            saved_revision: 0,
        }
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    fn persist(&mut self) {
        if self.store.revision() == self.saved_revision {
            return;
        }
        self.saved_revision = self.store.revision();
        let Some(slot) = &self.slot else {
            return;
        };
        if let Err(e) = slot.store(&self.store.snapshot()) {
            warn!("could not save progress to {}: {e}", slot.path().display());
        }
    }

    pub fn validate_answer(&mut self, day: u32, answer: &str) -> bool {
        let matched = self.store.validate_answer(day, answer);
        self.persist();
        matched
    }

    pub fn complete_day(&mut self, day: u32) -> Result<(), ProgressError> {
        let result = self.store.complete_day(day);
        self.persist();
        result
    }

    pub fn unlock_day(&mut self, day: u32) -> Result<(), ProgressError> {
        let result = self.store.unlock_day(day);
        self.persist();
        result
    }

    pub fn set_current_day(&mut self, day: u32) {
        self.store.set_current_day(day);
        self.persist();
    }

    pub fn next_hint(&mut self, day: u32) -> Result<String, ProgressError> {
        let hint = self.store.next_hint(day);
        self.persist();
        hint
    }

    pub fn toggle_tool(&mut self, tool: Tool) {
        self.store.toggle_tool(tool);
    }

    pub fn toggle_mute(&mut self) {
        self.store.toggle_mute();
        self.persist();
    }

    pub fn update_puzzle_progress(&mut self, day: u32, percent: u8) {
        self.store.update_puzzle_progress(day, percent);
    }

    /// Starts over and removes the save file. If the file cannot be
    /// removed it is overwritten with the fresh state instead; if that fails
    /// too, the reset stays pending and the next change or [`flush`] writes
    /// it.
    ///
    /// [`flush`]: Session::flush
    pub fn reset(&mut self) {
        self.store.reset();
        let Some(slot) = &self.slot else {
            self.saved_revision = self.store.revision();
            return;
        };
        let result = slot.clear().or_else(|e| {
            warn!(
                "could not clear save at {}: {e}; overwriting it",
                slot.path().display()
            );
            slot.store(&self.store.snapshot())
        });
        match result {
            Ok(()) => self.saved_revision = self.store.revision(),
            Err(e) => warn!("reset not saved to {}: {e}", slot.path().display()),
        }
    }

    /// True when the slot holds an older state than the store.
    pub fn has_unsaved_changes(&self) -> bool {
        self.slot.is_some() && self.store.revision() != self.saved_revision
    }

    /// Writes pending changes, if any.
    pub fn flush(&mut self) {
        self.persist();
    }

    pub fn drain_events(&mut self) -> Vec<ProgressEvent> {
        self.store.drain_events()
    }
}

impl ProgressActions for Session {
    fn progress(&self) -> &ProgressStore {
        &self.store
    }

    fn validate_answer(&mut self, day: u32, answer: &str) -> bool {
        Session::validate_answer(self, day, answer)
    }

    fn complete_day(&mut self, day: u32) -> Result<(), ProgressError> {
        Session::complete_day(self, day)
    }

    fn next_hint(&mut self, day: u32) -> Result<String, ProgressError> {
        Session::next_hint(self, day)
    }

    fn toggle_tool(&mut self, tool: Tool) {
        Session::toggle_tool(self, tool)
    }
}
