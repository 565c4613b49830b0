pub mod hints;
pub mod inventory;
pub mod store;
pub mod tools;

pub use hints::HintDispenser;
pub use inventory::{reward_id, InventoryItem};
pub use store::{DayStatus, ProgressEvent, ProgressStore, Summary};
pub use tools::{ActiveTool, Tool};

use crate::error::ProgressError;

/// The write surface collaborators (puzzle widgets, the companion) drive
/// progression through. Implemented by the bare store and by the session
/// that persists after each change.
pub trait ProgressActions {
    fn progress(&self) -> &ProgressStore;
    fn validate_answer(&mut self, day: u32, answer: &str) -> bool;
    fn complete_day(&mut self, day: u32) -> Result<(), ProgressError>;
    fn next_hint(&mut self, day: u32) -> Result<String, ProgressError>;
    fn toggle_tool(&mut self, tool: Tool);
}

impl ProgressActions for ProgressStore {
    fn progress(&self) -> &ProgressStore {
        self
    }

    fn validate_answer(&mut self, day: u32, answer: &str) -> bool {
        ProgressStore::validate_answer(self, day, answer)
    }

    fn complete_day(&mut self, day: u32) -> Result<(), ProgressError> {
        ProgressStore::complete_day(self, day)
    }

    fn next_hint(&mut self, day: u32) -> Result<String, ProgressError> {
        ProgressStore::next_hint(self, day)
    }

    fn toggle_tool(&mut self, tool: Tool) {
        ProgressStore::toggle_tool(self, tool)
    }
}
