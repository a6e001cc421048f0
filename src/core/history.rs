// RaidTally - core/history.rs
//
// Append-only log of past attendance checks.
// Entries are deletable by position, not by timestamp: two checks run in
// the same minute carry identical timestamp strings, so a positional index
// is the only identity that deletes exactly one entry.

use crate::core::model::{AttendanceResult, HistoryEntry};
use crate::util::constants;

/// Ordered list of completed attendance checks, oldest first.
/// No deduplication, no size cap; bounded only by session memory.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty history log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a pre-built entry.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Append a new entry for a just-completed check, stamped with the
    /// current local wall-clock time at minute resolution.
    pub fn record(&mut self, source: String, results: Vec<AttendanceResult>) -> &HistoryEntry {
        let timestamp = chrono::Local::now()
            .format(constants::TIMESTAMP_FORMAT)
            .to_string();
        self.entries.push(HistoryEntry {
            timestamp,
            source,
            results,
        });

        tracing::debug!(entries = self.entries.len(), "Attendance check recorded");

        // Just pushed, so the list is non-empty; index directly.
        &self.entries[self.entries.len() - 1]
    }

    /// Remove and return the entry at `index`.
    ///
    /// An out-of-range index is a defined no-op returning `None`, never a
    /// panic; the entry may have been deleted between render and click.
    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            tracing::debug!(index, len = self.entries.len(), "History remove out of range");
            None
        }
    }

    /// Iterate entries newest first, paired with their positional index
    /// (for deletion). Display order for the history panel.
    pub fn newest_first(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        self.entries.iter().enumerate().rev()
    }
}
