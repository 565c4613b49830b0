use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use log::{debug, error, info};

use super::hints::HintDispenser;
use super::inventory::InventoryItem;
use super::tools::{ActiveTool, Tool};
use crate::campaign::{normalize_answer, Campaign, Day};
use crate::error::ProgressError;
use crate::save::{HintCursor, SaveData};

/// Per-day state, derived from the unlock and completion sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Locked,
    Active,
    Solved,
}

/// Things the UI should surface after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    DayCompleted { day: u32, reward: Option<String> },
    DayUnlocked(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub solved: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Authoritative progression state for one play session.
///
/// Fields are private; every change goes through a named operation so the
/// unlock and completion invariants hold after each call.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    campaign: Arc<Campaign>,
    current_day: u32,
    unlocked: BTreeSet<u32>,
    completed: BTreeSet<u32>,
    inventory: Vec<InventoryItem>,
    hints: HintDispenser,
    active_tool: ActiveTool,
    muted: bool,
    puzzle_progress: BTreeMap<u32, u8>,
    events: VecDeque<ProgressEvent>,
    revision: u64,
}

impl ProgressStore {
    pub fn new(campaign: Arc<Campaign>) -> Self {
        ProgressStore {
            campaign,
            current_day: 1,
            unlocked: BTreeSet::from([1]),
            completed: BTreeSet::new(),
            inventory: Vec::new(),
            hints: HintDispenser::new(),
            active_tool: ActiveTool::None,
            muted: false,
            puzzle_progress: BTreeMap::new(),
            events: VecDeque::new(),
            revision: 0,
        }
    }

    fn day(&self, n: u32) -> Result<&Day, ProgressError> {
        self.campaign.get_day(n).ok_or_else(|| {
            error!("reference to day {n}, which is not in the campaign");
            ProgressError::UnknownDay(n)
        })
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Normalizes `answer` and compares it with the day's solution. A match
    /// completes the day. A miss, a day without a typed solution, an
    /// unknown day, or a locked day returns `false` and changes nothing.
    pub fn validate_answer(&mut self, day: u32, answer: &str) -> bool {
        if self.day_status(day) == DayStatus::Locked {
            debug!("answer for locked or unknown day {day} ignored");
            return false;
        }
        let candidate = normalize_answer(answer);
        if !self.campaign.is_solution(day, &candidate) {
            debug!("day {day}: answer did not match");
            return false;
        }
        if let Err(e) = self.complete_day(day) {
            error!("day {day} matched but could not be completed: {e}");
            return false;
        }
        true
    }

    /// Marks `day` solved, grants its reward and unlocks its successor.
    /// Repeated calls are no-ops, as is completing a locked day.
    pub fn complete_day(&mut self, day: u32) -> Result<(), ProgressError> {
        let record = self.day(day)?;
        if self.completed.contains(&day) {
            debug!("day {day} already completed");
            return Ok(());
        }
        if !self.unlocked.contains(&day) {
            debug!("day {day} is locked; completion refused");
            return Ok(());
        }

        let item = InventoryItem::reward_for(record);
        let reward = item.as_ref().map(|i| i.name.clone());
        if let Some(item) = item {
            if !self.has_item(&item.id) {
                info!("day {day}: collected {}", item.name);
                self.inventory.push(item);
            }
        }
        self.completed.insert(day);
        self.puzzle_progress.insert(day, 100);
        info!("day {day} completed");
        self.events
            .push_back(ProgressEvent::DayCompleted { day, reward });

        let next = day + 1;
        if self.campaign.contains(next) && self.unlocked.insert(next) {
            info!("day {next} unlocked");
            self.events.push_back(ProgressEvent::DayUnlocked(next));
        }
        self.touch();
        Ok(())
    }

    /// Force-unlocks a day that is not gated by its predecessor.
    pub fn unlock_day(&mut self, day: u32) -> Result<(), ProgressError> {
        self.day(day)?;
        if self.unlocked.insert(day) {
            info!("day {day} unlocked by override");
            self.events.push_back(ProgressEvent::DayUnlocked(day));
            self.touch();
        }
        Ok(())
    }

    /// Switches to `day` if it is unlocked; otherwise does nothing.
    /// Unsolved transient progress of the day being left is discarded.
    pub fn set_current_day(&mut self, day: u32) {
        if !self.unlocked.contains(&day) {
            debug!("day {day} is locked; staying on day {}", self.current_day);
            return;
        }
        if day == self.current_day {
            return;
        }
        let previous = self.current_day;
        if !self.completed.contains(&previous) {
            self.puzzle_progress.remove(&previous);
        }
        self.current_day = day;
        debug!("moved from day {previous} to day {day}");
        self.touch();
    }

    /// Next hint for `day`, saturating at the last authored hint.
    pub fn next_hint(&mut self, day: u32) -> Result<String, ProgressError> {
        let campaign = Arc::clone(&self.campaign);
        let record = campaign.get_day(day).ok_or_else(|| {
            error!("hint requested for day {day}, which is not in the campaign");
            ProgressError::UnknownDay(day)
        })?;
        let before = self.hints.seen(day);
        let hint = self
            .hints
            .next(day, record.hints())
            .ok_or(ProgressError::UnknownDay(day))?
            .to_string();
        if self.hints.seen(day) != before {
            self.touch();
        }
        Ok(hint)
    }

    pub fn toggle_tool(&mut self, tool: Tool) {
        self.active_tool = self.active_tool.toggled(tool);
        debug!("active tool: {}", self.active_tool.label());
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.touch();
    }

    /// Records partial progress (0..=100) of an unsolved minigame.
    pub fn update_puzzle_progress(&mut self, day: u32, percent: u8) {
        if self.completed.contains(&day) || !self.unlocked.contains(&day) {
            return;
        }
        self.puzzle_progress.insert(day, percent.min(100));
    }

    /// Back to a fresh session. The only operation that shrinks progress.
    pub fn reset(&mut self) {
        let campaign = Arc::clone(&self.campaign);
        let revision = self.revision;
        *self = ProgressStore::new(campaign);
        self.revision = revision + 1;
        info!("progress reset");
    }

    pub fn drain_events(&mut self) -> Vec<ProgressEvent> {
        self.events.drain(..).collect()
    }

    // Selectors

    pub fn campaign(&self) -> &Arc<Campaign> {
        &self.campaign
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn current_day_data(&self) -> Option<&Day> {
        self.campaign.get_day(self.current_day)
    }

    pub fn unlocked_days(&self) -> Vec<u32> {
        self.unlocked.iter().copied().collect()
    }

    pub fn completed_days(&self) -> Vec<u32> {
        self.completed.iter().copied().collect()
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i.id == id)
    }

    pub fn is_unlocked(&self, day: u32) -> bool {
        self.unlocked.contains(&day)
    }

    pub fn is_completed(&self, day: u32) -> bool {
        self.completed.contains(&day)
    }

    pub fn day_status(&self, day: u32) -> DayStatus {
        if self.completed.contains(&day) {
            DayStatus::Solved
        } else if self.unlocked.contains(&day) {
            DayStatus::Active
        } else {
            DayStatus::Locked
        }
    }

    pub fn hints_seen(&self, day: u32) -> usize {
        self.hints.seen(day)
    }

    pub fn active_tool(&self) -> ActiveTool {
        self.active_tool
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn puzzle_progress(&self, day: u32) -> u8 {
        self.puzzle_progress.get(&day).copied().unwrap_or(0)
    }

    pub fn summary(&self) -> Summary {
        let solved = self.completed.len() as u32;
        let total = self.campaign.len();
        let percentage = if total == 0 {
            0
        } else {
            (solved * 100 + total / 2) / total
        };
        Summary {
            solved,
            total,
            percentage,
        }
    }

    pub fn is_campaign_complete(&self) -> bool {
        self.completed.len() as u32 == self.campaign.len()
    }

    /// Bumped by every change to persisted state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // Persistence

    pub fn snapshot(&self) -> SaveData {
        SaveData {
            current_day: self.current_day,
            unlocked_days: self.unlocked_days(),
            completed_days: self.completed_days(),
            muted: self.muted,
            inventory: self.inventory.clone(),
            hint_cursors: self
                .hints
                .cursors()
                .iter()
                .map(|(&day, &next)| HintCursor { day, next })
                .collect(),
        }
    }

    /// Rebuilds a store from saved data, dropping anything the campaign
    /// does not know and re-establishing the invariants a hand-edited or
    /// stale save may have broken.
    pub fn restore(campaign: Arc<Campaign>, data: SaveData) -> Self {
        let mut store = ProgressStore::new(campaign);
        let campaign = Arc::clone(&store.campaign);

        store.unlocked.extend(
            data.unlocked_days
                .iter()
                .copied()
                .filter(|&d| campaign.contains(d)),
        );
        for day in data.completed_days {
            if campaign.contains(day) {
                store.completed.insert(day);
                store.unlocked.insert(day);
                store.puzzle_progress.insert(day, 100);
            } else {
                debug!("dropping unknown completed day {day} from save");
            }
        }
        // A completed day always opens its successor.
        let successors: Vec<u32> = store
            .completed
            .iter()
            .map(|d| d + 1)
            .filter(|&d| campaign.contains(d))
            .collect();
        store.unlocked.extend(successors);

        for item in data.inventory {
            if campaign.contains(item.day_found) && !store.has_item(&item.id) {
                store.inventory.push(item);
            }
        }
        for cursor in data.hint_cursors {
            if let Some(day) = campaign.get_day(cursor.day) {
                store
                    .hints
                    .restore(cursor.day, cursor.next, day.hints().len());
            }
        }
        store.muted = data.muted;
        if store.unlocked.contains(&data.current_day) {
            store.current_day = data.current_day;
        }
        store
    }
}
