//! Level gate driven by quest unlocks
//!
//! Some capabilities unlock at a level only once a quest is completed; until
//! then the agent behaves as if it were just below that level.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockEntry {
    pub level: u8,
    pub quest: u32,
}

#[derive(Debug, Deserialize)]
struct UnlockFile {
    #[serde(default)]
    unlock: Vec<UnlockEntry>,
}

/// Fixed unlock table plus the set of quests known to be completed
#[derive(Debug, Clone, Default)]
pub struct UnlockGate {
    entries: Vec<UnlockEntry>,
    completed: AHashSet<u32>,
}

impl UnlockGate {
    pub fn new(mut entries: Vec<UnlockEntry>) -> Self {
        entries.sort_by_key(|e| e.level);
        Self {
            entries,
            completed: AHashSet::new(),
        }
    }

    pub fn entries(&self) -> &[UnlockEntry] {
        &self.entries
    }

    pub fn mark_completed(&mut self, quest: u32) {
        self.completed.insert(quest);
    }

    pub fn is_completed(&self, quest: u32) -> bool {
        self.completed.contains(&quest)
    }

    /// Effective level: capped just below the first unlock still pending
    ///
    /// Monotone non-decreasing in `raw_level`.
    pub fn adjust_level(&self, raw_level: u8) -> u8 {
        self.entries
            .iter()
            .take_while(|e| e.level <= raw_level)
            .find(|e| !self.is_completed(e.quest))
            .map_or(raw_level, |e| e.level.saturating_sub(1))
    }
}

/// Parse `[[unlock]]` tables from TOML text
pub fn parse_unlock_table(contents: &str) -> Result<Vec<UnlockEntry>> {
    let file: UnlockFile = toml::from_str(contents)?;
    Ok(file.unlock)
}

/// Load an unlock table from a TOML file
pub fn load_unlock_table(path: &Path) -> Result<Vec<UnlockEntry>> {
    let contents = fs::read_to_string(path)?;
    parse_unlock_table(&contents)
}
