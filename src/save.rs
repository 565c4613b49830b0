//! Save slot on disk.
//!
//! Only the persisted subset of progress lives here: day pointers, the
//! inventory, the mute flag and the hint cursors. Open panels, chat
//! history and in-progress minigame state are session-scoped.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::SaveError;
use crate::progress::InventoryItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub current_day: u32,
    pub unlocked_days: Vec<u32>,
    pub completed_days: Vec<u32>,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub hint_cursors: Vec<HintCursor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintCursor {
    pub day: u32,
    pub next: usize,
}

pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SaveSlot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<SaveData>, SaveError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let data = toml::from_str(&content)?;
        debug!("loaded save from {}", self.path.display());
        Ok(Some(data))
    }

    /// Writes to a temp file next to the slot and renames it over the old
    /// save, so a crash mid-write never leaves a truncated file.
    pub fn store(&self, data: &SaveData) -> Result<(), SaveError> {
        let encoded = toml::to_string(data)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        debug!("saved progress to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SaveError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("cleared save at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SaveData {
        SaveData {
            current_day: 2,
            unlocked_days: vec![1, 2],
            completed_days: vec![1],
            muted: true,
            inventory: vec![InventoryItem {
                id: "reward_day_1".into(),
                name: "Blue Vial".into(),
                day_found: 1,
                description: "Evidence from Day 1: The Wreckage".into(),
            }],
            hint_cursors: vec![HintCursor { day: 1, next: 2 }],
        }
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("save.toml"));
        assert!(slot.load().unwrap().is_none());
        slot.clear().unwrap();
    }

    #[test]
    fn store_then_load_returns_same_data() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("nested").join("save.toml"));
        slot.store(&sample()).unwrap();
        assert_eq!(slot.load().unwrap(), Some(sample()));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.toml");
        std::fs::write(&path, "current_day = \"tomorrow\"").unwrap();
        let slot = SaveSlot::new(path);
        assert!(matches!(slot.load(), Err(SaveError::Decode(_))));
    }
}
