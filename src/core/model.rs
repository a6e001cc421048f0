// RaidTally - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no network dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Player record (roster unit)
// =============================================================================

/// One registered guild member and the in-game characters they may log in on.
///
/// Created via form entry, CSV import, or spreadsheet import; destroyed via
/// explicit deletion or wholesale roster replacement. `characters` is
/// guaranteed non-empty at creation time (the add/import paths enforce it);
/// nothing re-validates it retroactively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// The member's real identity (whatever the guild calls them).
    pub name: String,

    /// In-game character names, in the order the member listed them.
    pub characters: Vec<String>,
}

// =============================================================================
// Attendance result (derived, never mutated)
// =============================================================================

/// Per-player outcome of one attendance check.
///
/// Derived by `core::attendance::compute_attendance` and never mutated
/// afterwards. `attended == (count > 0)` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceResult {
    /// Player name, copied from the roster record.
    pub player: String,

    /// All of the player's characters, in roster order.
    pub characters: Vec<String>,

    /// True iff at least one character appeared in the participant list.
    pub attended: bool,

    /// The characters that appeared, preserving their roster order.
    pub attended_characters: Vec<String>,

    /// Number of attending characters.
    pub count: usize,
}

// =============================================================================
// History entry (append-only snapshot)
// =============================================================================

/// One completed attendance check, stamped at minute resolution.
///
/// Entries are appended by the run-check handler and individually deletable
/// by position. No deduplication, no size cap (session memory only).
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// Local wall-clock time of the check, formatted `%Y-%m-%d %H:%M`.
    pub timestamp: String,

    /// Where the participants came from: a report banner or a manual-entry
    /// label.
    pub source: String,

    /// The full result set of the check.
    pub results: Vec<AttendanceResult>,
}

// =============================================================================
// Report summary (Report Client success payload)
// =============================================================================

/// Participant list and descriptive metadata fetched for one report.
///
/// Transient: consumed by the next attendance check and replaced by the
/// next fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Character names of the human players recorded in the report.
    pub participants: Vec<String>,

    /// Report title as entered by its uploader.
    pub title: Option<String>,

    /// `"{zone} - {start time}"`, zone falling back to "Unknown" and the
    /// start time formatted as UTC `%Y-%m-%d %H:%M`.
    pub context: Option<String>,
}

// =============================================================================
// Participant source
// =============================================================================

/// Which input mode supplies the participant list for a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticipantSource {
    /// Fetched from a Warcraft Logs report.
    #[default]
    Report,

    /// Pasted as a comma-separated character list.
    Manual,
}

impl ParticipantSource {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ParticipantSource::Report => "Warcraft Logs report",
            ParticipantSource::Manual => "Manual list",
        }
    }
}

// =============================================================================
// Roster import outcome
// =============================================================================

/// What a lenient roster import produced: the rows that resolved to records
/// and a count of the rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct RosterImport {
    /// Rows that carried both a name and at least one character.
    pub players: Vec<PlayerRecord>,

    /// Rows skipped for missing either field (or failing to parse at all).
    pub skipped: usize,
}
