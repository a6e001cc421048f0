// RaidTally - app/state.rs
//
// Application state management. Holds the roster, history, fetched
// participants, form inputs, and remote clients for one session.
// Owned by the eframe::App implementation.

use crate::core::history::HistoryLog;
use crate::core::model::{AttendanceResult, ParticipantSource};
use crate::core::roster::Roster;
use crate::net::sheets::SheetsClient;
use crate::net::wcl::ReportClient;
use crate::platform::config::AppConfig;
use crate::platform::secrets::Secrets;
use crate::util::error::TallyError;

/// Colour category of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Info,
    Success,
    Error,
}

/// Top-level application state.
///
/// Mutated only by the action handlers in [`crate::app::actions`] and the
/// form widgets bound to the input fields; panels otherwise read it.
#[derive(Debug)]
pub struct AppState {
    // -- Session data --
    /// Registered players and their characters.
    pub roster: Roster,

    /// Past attendance checks, oldest first.
    pub history: HistoryLog,

    /// Results of the most recent check (empty until one has run).
    pub last_results: Vec<AttendanceResult>,

    // -- Remote clients --
    /// Warcraft Logs client (holds the key, if configured).
    pub report_client: ReportClient,

    /// Connected Sheets client. None until a successful connect.
    pub sheets: Option<SheetsClient>,

    // -- Settings and credentials --
    pub config: AppConfig,
    pub secrets: Secrets,

    // -- Add-player form --
    pub player_name_input: String,
    pub player_characters_input: String,

    // -- Attendance form --
    /// Where the participant list comes from.
    pub participant_source: ParticipantSource,
    /// Pasted report link.
    pub report_link_input: String,
    /// Free-text comma-separated participant list.
    pub manual_participants_input: String,

    // -- Worksheet-import form --
    pub sheet_url_input: String,
    pub worksheet_input: String,

    // -- Fetched report --
    /// Participants of the last fetched report.
    pub participants: Vec<String>,
    pub report_title: Option<String>,
    pub report_context: Option<String>,

    // -- Status line --
    pub status_message: String,
    pub status_tone: StatusTone,

    /// Whether the setup-guide window is open.
    pub show_guide: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state from loaded configuration and credentials.
    pub fn new(config: AppConfig, secrets: Secrets, debug_mode: bool) -> Self {
        let report_client = ReportClient::new(secrets.wcl_api_key.clone(), config.timeout_secs);

        Self {
            roster: Roster::new(),
            history: HistoryLog::new(),
            last_results: Vec::new(),
            report_client,
            sheets: None,
            config,
            secrets,
            player_name_input: String::new(),
            player_characters_input: String::new(),
            participant_source: ParticipantSource::default(),
            report_link_input: String::new(),
            manual_participants_input: String::new(),
            sheet_url_input: String::new(),
            worksheet_input: String::new(),
            participants: Vec::new(),
            report_title: None,
            report_context: None,
            status_message: "Ready. Add players or import a roster to begin.".to_string(),
            status_tone: StatusTone::Info,
            show_guide: false,
            debug_mode,
        }
    }

    /// Whether report fetching is possible (API key configured).
    pub fn wcl_configured(&self) -> bool {
        self.report_client.is_configured()
    }

    /// Whether a service-account key is configured (connection may still
    /// be pending or failed).
    pub fn sheets_available(&self) -> bool {
        self.secrets.google_service_account.is_some()
    }

    /// Whether a Sheets connection has been established this session.
    pub fn sheets_connected(&self) -> bool {
        self.sheets.is_some()
    }

    pub fn set_status_info(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_tone = StatusTone::Info;
    }

    pub fn set_status_success(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_tone = StatusTone::Success;
    }

    pub fn set_status_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_tone = StatusTone::Error;
    }

    /// Render an error on the status line and log it.
    ///
    /// Validation problems are routine user input and logged at debug;
    /// everything else is a warning.
    pub fn report_error(&mut self, error: &TallyError) {
        match error {
            TallyError::Validation(_) => tracing::debug!(%error, "Action rejected"),
            _ => tracing::warn!(%error, "Action failed"),
        }
        self.set_status_error(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> AppState {
        AppState::new(AppConfig::default(), Secrets::default(), false)
    }

    #[test]
    fn test_initial_state_is_empty_and_unconfigured() {
        let state = make_state();
        assert!(state.roster.is_empty());
        assert!(state.history.is_empty());
        assert!(state.last_results.is_empty());
        assert!(!state.wcl_configured());
        assert!(!state.sheets_available());
        assert!(!state.sheets_connected());
        assert_eq!(state.status_tone, StatusTone::Info);
    }

    #[test]
    fn test_key_in_secrets_configures_report_client() {
        let secrets = Secrets {
            wcl_api_key: Some("abc123".to_string()),
            google_service_account: None,
        };
        let state = AppState::new(AppConfig::default(), secrets, false);
        assert!(state.wcl_configured());
    }

    #[test]
    fn test_status_setters_track_tone() {
        let mut state = make_state();
        state.set_status_success("done");
        assert_eq!(state.status_tone, StatusTone::Success);
        state.set_status_error("bad");
        assert_eq!(state.status_tone, StatusTone::Error);
        state.set_status_info("note");
        assert_eq!(state.status_tone, StatusTone::Info);
    }

    #[test]
    fn test_report_error_surfaces_message() {
        use crate::util::error::ValidationError;
        let mut state = make_state();
        state.report_error(&ValidationError::MissingPlayerName.into());
        assert_eq!(state.status_tone, StatusTone::Error);
        assert!(state.status_message.contains("player name"));
    }
}
