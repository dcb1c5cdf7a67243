//! Compatibility report types, serialized for the build summary panel.

use serde::{Deserialize, Serialize};

/// Severity of a compatibility note. Ordered so that `max` picks the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Ok,
    Warn,
    Error,
}

/// Identifies which pairwise rule produced a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    SocketMatch,
    RamType,
    PcieSlot,
    CaseFormFactor,
    CoolerSocket,
    StorageInterface,
    PsuWattage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub rule: RuleId,
    pub level: Level,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// Notes in rule order
    pub notes: Vec<Note>,
    /// Worst level across notes; `None` when no rule could be evaluated
    pub level: Option<Level>,
}

impl CompatibilityReport {
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let level = notes.iter().map(|n| n.level).max();
        Self { notes, level }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.level == Some(Level::Error)
    }

    pub fn notes_at(&self, level: Level) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter().filter(move |n| n.level == level)
    }

    pub fn note_for(&self, rule: RuleId) -> Option<&Note> {
        self.notes.iter().find(|n| n.rule == rule)
    }
}
