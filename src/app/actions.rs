// RaidTally - app/actions.rs
//
// Command handlers: every user action is one function that mutates
// AppState. Errors are caught here, rendered on the status line, and
// logged; nothing propagates out of the update loop and nothing retries.
// Panels call these and otherwise only read state.

use crate::app::state::AppState;
use crate::core::attendance::compute_attendance;
use crate::core::csv_io;
use crate::core::model::{AttendanceResult, ParticipantSource, RosterImport};
use crate::core::roster::split_characters;
use crate::net::sheets::SheetsClient;
use crate::net::wcl;
use crate::util::constants;
use crate::util::error::{ConfigError, ExportError, ImportError, Result, ValidationError};
use std::fs::File;
use std::path::Path;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Add a player from the form inputs. The form is cleared only on success.
pub fn add_player(state: &mut AppState) {
    let added = state
        .roster
        .add(&state.player_name_input, &state.player_characters_input)
        .map(|player| (player.name.clone(), player.characters.len()));

    match added {
        Ok((name, characters)) => {
            state.player_name_input.clear();
            state.player_characters_input.clear();
            state.set_status_success(format!("{name} added with {characters} character(s)"));
        }
        Err(e) => state.report_error(&e.into()),
    }
}

/// Delete the player at `index`. Out-of-range is a silent no-op.
pub fn delete_player(state: &mut AppState, index: usize) {
    if let Some(removed) = state.roster.remove(index) {
        state.set_status_info(format!("Removed {}", removed.name));
    }
}

// ---------------------------------------------------------------------------
// Report fetch and attendance
// ---------------------------------------------------------------------------

/// Fetch participants for the report link currently in the form.
///
/// On success the fetched list replaces the previous one; on failure the
/// previous fetch is left intact.
pub fn fetch_report_participants(state: &mut AppState) {
    let code = match wcl::extract_report_id(state.report_link_input.trim()) {
        Some(code) => code,
        None => {
            let url = state.report_link_input.trim().to_string();
            state.report_error(&ValidationError::InvalidReportLink { url }.into());
            return;
        }
    };

    match state.report_client.fetch_participants(&code) {
        Ok(summary) => {
            let count = summary.participants.len();
            state.participants = summary.participants;
            state.report_title = summary.title;
            state.report_context = summary.context;

            let title = state
                .report_title
                .as_deref()
                .unwrap_or(constants::REPORT_SOURCE_FALLBACK);
            state.set_status_success(format!("Found {count} participant(s) in '{title}'"));
        }
        Err(e) => state.report_error(&e),
    }
}

/// Run one attendance check against the roster and append it to history.
///
/// The participant list comes from the selected source: the last fetched
/// report, or the manual comma-separated field. Exactly one history entry
/// is appended per invocation.
pub fn run_attendance_check(state: &mut AppState) {
    let participants = match state.participant_source {
        ParticipantSource::Report => state.participants.clone(),
        ParticipantSource::Manual => split_characters(&state.manual_participants_input),
    };

    if participants.is_empty() {
        state.report_error(&ValidationError::NoParticipants.into());
        return;
    }

    let results = compute_attendance(state.roster.players(), &participants);
    let attended = results.iter().filter(|r| r.attended).count();
    let total = results.len();

    let source = match state.participant_source {
        ParticipantSource::Report => report_source_label(state),
        ParticipantSource::Manual => constants::MANUAL_SOURCE_LABEL.to_string(),
    };

    state.last_results = results.clone();
    state.history.record(source, results);

    tracing::info!(attended, total, "Attendance check recorded");
    state.set_status_success(format!(
        "Attendance recorded: {attended} of {total} players attended"
    ));
}

/// History source label for a report-based check, mirroring the report
/// banner: `{title} - {context}` when both are known.
fn report_source_label(state: &AppState) -> String {
    match (&state.report_title, &state.report_context) {
        (Some(title), Some(context)) => format!("{title} - {context}"),
        (Some(title), None) => title.clone(),
        (None, Some(context)) => context.clone(),
        (None, None) => constants::REPORT_SOURCE_FALLBACK.to_string(),
    }
}

/// Delete the history entry at `index`. Out-of-range is a silent no-op.
pub fn delete_history_entry(state: &mut AppState, index: usize) {
    if let Some(removed) = state.history.remove(index) {
        state.set_status_info(format!("Deleted history entry from {}", removed.timestamp));
    }
}

// ---------------------------------------------------------------------------
// Google Sheets
// ---------------------------------------------------------------------------

/// Establish the Sheets connection from the configured service account.
pub fn connect_sheets(state: &mut AppState) {
    let Some(key) = state.secrets.google_service_account.clone() else {
        state.report_error(&ConfigError::MissingServiceAccount.into());
        return;
    };

    match SheetsClient::connect(&key, state.config.timeout_secs) {
        Ok(client) => {
            state.sheets = Some(client);
            state.set_status_success("Connected to Google Sheets");
        }
        Err(e) => state.report_error(&e),
    }
}

/// Replace the roster with the rows of the worksheet named in the form.
pub fn import_from_sheets(state: &mut AppState) {
    let Some(sheets) = &state.sheets else {
        state.report_error(&ConfigError::NotConnected.into());
        return;
    };

    let outcome = sheets.import_from_spreadsheet(
        state.sheet_url_input.trim(),
        state.worksheet_input.trim(),
    );
    match outcome {
        Ok(import) => {
            let message = import_message(&import, "worksheet");
            state.roster.replace(import.players);
            state.set_status_success(message);
        }
        Err(e) => state.report_error(&e),
    }
}

// ---------------------------------------------------------------------------
// CSV import/export
// ---------------------------------------------------------------------------

/// Replace the roster from a CSV file chosen by the user.
pub fn import_roster_from_path(state: &mut AppState, path: &Path) {
    match open_and_import(path) {
        Ok(import) => {
            let message = import_message(&import, "file");
            state.roster.replace(import.players);
            state.set_status_success(message);
        }
        Err(e) => state.report_error(&e),
    }
}

/// Export the roster to a CSV file chosen by the user.
pub fn export_roster_to_path(state: &mut AppState, path: &Path) {
    match write_roster(state, path) {
        Ok(count) => {
            state.set_status_success(format!(
                "Exported {count} player(s) to '{}'",
                path.display()
            ));
        }
        Err(e) => state.report_error(&e),
    }
}

/// Export the most recent check's results.
pub fn export_last_results(state: &mut AppState, path: &Path) {
    if state.last_results.is_empty() {
        state.set_status_info("No results to export. Run an attendance check first.");
        return;
    }

    let outcome = write_results(&state.last_results, path);
    finish_results_export(state, outcome, path);
}

/// Export one history entry's results. A vanished index is a silent no-op.
pub fn export_history_entry(state: &mut AppState, index: usize, path: &Path) {
    let outcome = match state.history.entries().get(index) {
        Some(entry) => write_results(&entry.results, path),
        None => {
            tracing::debug!(index, "Export requested for missing history entry");
            return;
        }
    };
    finish_results_export(state, outcome, path);
}

fn finish_results_export(state: &mut AppState, outcome: Result<usize>, path: &Path) {
    match outcome {
        Ok(count) => {
            state.set_status_success(format!(
                "Exported {count} result row(s) to '{}'",
                path.display()
            ));
        }
        Err(e) => state.report_error(&e),
    }
}

fn open_and_import(path: &Path) -> Result<RosterImport> {
    let file = File::open(path).map_err(|e| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(csv_io::import_roster_csv(file, path)?)
}

fn write_roster(state: &AppState, path: &Path) -> Result<usize> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(csv_io::export_roster_csv(state.roster.players(), file, path)?)
}

fn write_results(results: &[AttendanceResult], path: &Path) -> Result<usize> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(csv_io::export_results_csv(results, file, path)?)
}

fn import_message(import: &RosterImport, source: &str) -> String {
    if import.skipped > 0 {
        format!(
            "Imported {} player(s) from {source} ({} row(s) skipped)",
            import.players.len(),
            import.skipped
        )
    } else {
        format!("Imported {} player(s) from {source}", import.players.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::StatusTone;
    use crate::platform::config::AppConfig;
    use crate::platform::secrets::Secrets;

    fn make_state() -> AppState {
        AppState::new(AppConfig::default(), Secrets::default(), false)
    }

    fn add(state: &mut AppState, name: &str, characters: &str) {
        state.player_name_input = name.to_string();
        state.player_characters_input = characters.to_string();
        add_player(state);
        assert_eq!(state.status_tone, StatusTone::Success, "add failed: {}", state.status_message);
    }

    #[test]
    fn test_add_player_clears_form_on_success() {
        let mut state = make_state();
        add(&mut state, "Bob", "Arthas, Illidan");

        assert_eq!(state.roster.len(), 1);
        assert!(state.player_name_input.is_empty());
        assert!(state.player_characters_input.is_empty());
    }

    #[test]
    fn test_add_player_rejected_input_is_preserved() {
        let mut state = make_state();
        state.player_name_input = "   ".to_string();
        state.player_characters_input = "Arthas".to_string();
        add_player(&mut state);

        assert_eq!(state.status_tone, StatusTone::Error);
        assert!(state.roster.is_empty());
        // The user fixes the form instead of retyping it.
        assert_eq!(state.player_characters_input, "Arthas");
    }

    #[test]
    fn test_delete_player_out_of_range_is_noop() {
        let mut state = make_state();
        add(&mut state, "Bob", "Arthas");
        delete_player(&mut state, 5);
        assert_eq!(state.roster.len(), 1);
    }

    #[test]
    fn test_manual_check_records_history_exactly_once() {
        let mut state = make_state();
        add(&mut state, "Bob", "Arthas, Illidan");
        add(&mut state, "Alice", "Jaina");

        state.participant_source = ParticipantSource::Manual;
        state.manual_participants_input = "arthas, Sylvanas".to_string();
        run_attendance_check(&mut state);

        assert_eq!(state.status_tone, StatusTone::Success);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.last_results.len(), 2);
        assert!(state.last_results[0].attended);
        assert!(!state.last_results[1].attended);

        let entry = &state.history.entries()[0];
        assert_eq!(entry.source, constants::MANUAL_SOURCE_LABEL);
        assert_eq!(entry.results, state.last_results);
    }

    #[test]
    fn test_check_without_participants_is_rejected() {
        let mut state = make_state();
        add(&mut state, "Bob", "Arthas");

        state.participant_source = ParticipantSource::Manual;
        state.manual_participants_input = " , ,".to_string();
        run_attendance_check(&mut state);

        assert_eq!(state.status_tone, StatusTone::Error);
        assert!(state.history.is_empty());
        assert!(state.last_results.is_empty());
    }

    #[test]
    fn test_report_check_uses_fetched_participants_and_banner_source() {
        let mut state = make_state();
        add(&mut state, "Bob", "Arthas");

        state.participant_source = ParticipantSource::Report;
        state.participants = vec!["ARTHAS".to_string()];
        state.report_title = Some("Molten Core clear".to_string());
        state.report_context = Some("Molten Core - 2023-11-14 22:13".to_string());
        run_attendance_check(&mut state);

        assert_eq!(state.history.len(), 1);
        let entry = &state.history.entries()[0];
        assert_eq!(entry.source, "Molten Core clear - Molten Core - 2023-11-14 22:13");
        assert!(entry.results[0].attended);
    }

    #[test]
    fn test_report_check_source_falls_back_without_metadata() {
        let mut state = make_state();
        state.participant_source = ParticipantSource::Report;
        state.participants = vec!["Arthas".to_string()];
        run_attendance_check(&mut state);

        assert_eq!(
            state.history.entries()[0].source,
            constants::REPORT_SOURCE_FALLBACK
        );
    }

    #[test]
    fn test_fetch_with_invalid_link_is_validation_error() {
        let mut state = make_state();
        state.report_link_input = "https://www.warcraftlogs.com/".to_string();
        fetch_report_participants(&mut state);

        assert_eq!(state.status_tone, StatusTone::Error);
        assert!(state.participants.is_empty());
    }

    #[test]
    fn test_roster_csv_round_trip_through_actions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");

        let mut state = make_state();
        add(&mut state, "Bob", "Arthas, Illidan");
        add(&mut state, "Alice", "Jaina");
        export_roster_to_path(&mut state, &path);
        assert_eq!(state.status_tone, StatusTone::Success);

        let mut restored = make_state();
        import_roster_from_path(&mut restored, &path);
        assert_eq!(restored.status_tone, StatusTone::Success);
        assert_eq!(restored.roster.players(), state.roster.players());
    }

    #[test]
    fn test_import_replaces_roster_and_counts_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(&path, "name,characters\nBob,Arthas\n,Jaina\n").unwrap();

        let mut state = make_state();
        add(&mut state, "Old", "Gone");
        import_roster_from_path(&mut state, &path);

        assert_eq!(state.roster.len(), 1);
        assert_eq!(state.roster.players()[0].name, "Bob");
        assert!(state.status_message.contains("1 row(s) skipped"));
    }

    #[test]
    fn test_import_missing_file_is_import_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = make_state();
        add(&mut state, "Bob", "Arthas");
        import_roster_from_path(&mut state, &dir.path().join("absent.csv"));

        assert_eq!(state.status_tone, StatusTone::Error);
        // A failed import never clobbers the roster.
        assert_eq!(state.roster.len(), 1);
    }

    #[test]
    fn test_export_last_results_without_results_is_informational() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = make_state();
        export_last_results(&mut state, &dir.path().join("attendance.csv"));
        assert_eq!(state.status_tone, StatusTone::Info);
    }

    #[test]
    fn test_export_history_entry_writes_that_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.csv");

        let mut state = make_state();
        add(&mut state, "Bob", "Arthas");
        state.participant_source = ParticipantSource::Manual;
        state.manual_participants_input = "Arthas".to_string();
        run_attendance_check(&mut state);

        export_history_entry(&mut state, 0, &path);
        assert_eq!(state.status_tone, StatusTone::Success);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Bob"));

        // Vanished index writes nothing.
        export_history_entry(&mut state, 9, &dir.path().join("none.csv"));
        assert!(!dir.path().join("none.csv").exists());
    }

    #[test]
    fn test_delete_history_entry_is_positional() {
        let mut state = make_state();
        add(&mut state, "Bob", "Arthas");
        state.participant_source = ParticipantSource::Manual;
        state.manual_participants_input = "Arthas".to_string();
        run_attendance_check(&mut state);
        run_attendance_check(&mut state);
        assert_eq!(state.history.len(), 2);

        delete_history_entry(&mut state, 0);
        assert_eq!(state.history.len(), 1);
        delete_history_entry(&mut state, 5);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_connect_sheets_without_key_is_config_error() {
        let mut state = make_state();
        connect_sheets(&mut state);
        assert_eq!(state.status_tone, StatusTone::Error);
        assert!(!state.sheets_connected());
    }

    #[test]
    fn test_import_from_sheets_before_connect_is_config_error() {
        let mut state = make_state();
        import_from_sheets(&mut state);
        assert_eq!(state.status_tone, StatusTone::Error);
        assert!(state.status_message.contains("Connect"));
    }
}
