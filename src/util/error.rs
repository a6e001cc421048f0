// RaidTally - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error is caught at the action boundary and rendered on the status
// line; nothing propagates out of the update loop and nothing is retried.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all RaidTally operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum TallyError {
    /// Bad user input. Recoverable by re-entry, never fatal.
    Validation(ValidationError),

    /// Missing or unusable credential. The feature stays disabled until
    /// the configuration is fixed externally.
    Config(ConfigError),

    /// The remote service reported an application-level failure.
    Remote(RemoteError),

    /// Transport-level failure (timeout, connection refused, bad status).
    Network(NetworkError),

    /// Roster import from CSV or a worksheet failed.
    Import(ImportError),

    /// CSV export failed.
    Export(ExportError),
}

impl fmt::Display for TallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "Validation error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Remote(e) => write!(f, "Remote error: {e}"),
            Self::Network(e) => write!(f, "Network error: {e}"),
            Self::Import(e) => write!(f, "Import error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for TallyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Remote(e) => Some(e),
            Self::Network(e) => Some(e),
            Self::Import(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// User-input problems. Reported on the status line; no state change occurs.
#[derive(Debug)]
pub enum ValidationError {
    /// The add-player form was submitted without a player name.
    MissingPlayerName,

    /// The add-player form produced no characters after splitting and
    /// trimming the comma-separated input.
    MissingCharacters,

    /// A pasted report link does not contain a `reports/<code>` segment.
    InvalidReportLink { url: String },

    /// A report code contains characters outside `[a-zA-Z0-9]` and cannot
    /// be embedded in a query.
    InvalidReportCode { code: String },

    /// An attendance check was requested with no participants supplied.
    NoParticipants,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPlayerName => write!(f, "Enter a player name"),
            Self::MissingCharacters => {
                write!(f, "Enter at least one character name (comma-separated)")
            }
            Self::InvalidReportLink { url } => {
                write!(f, "'{url}' does not contain a report code")
            }
            Self::InvalidReportCode { code } => {
                write!(f, "Report code '{code}' must be alphanumeric")
            }
            Self::NoParticipants => {
                write!(f, "Fetch a report or enter participants before running a check")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for TallyError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Missing or unusable credentials. Each degrades one feature, never the
/// whole application.
#[derive(Debug)]
pub enum ConfigError {
    /// No Warcraft Logs API key is configured in secrets.toml.
    MissingWclKey,

    /// No `[google_service_account]` table is configured in secrets.toml.
    MissingServiceAccount,

    /// The service-account key is missing a required field.
    IncompleteServiceAccount { field: &'static str },

    /// The service-account private key could not be parsed or used to sign.
    InvalidServiceAccountKey {
        source: jsonwebtoken::errors::Error,
    },

    /// A spreadsheet import was requested before a successful connection.
    NotConnected,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWclKey => write!(
                f,
                "No Warcraft Logs API key configured. Add 'wcl_api_key' to secrets.toml"
            ),
            Self::MissingServiceAccount => write!(
                f,
                "No Google service account configured. Add a [google_service_account] \
                 table to secrets.toml"
            ),
            Self::IncompleteServiceAccount { field } => {
                write!(f, "Service-account key is missing '{field}'")
            }
            Self::InvalidServiceAccountKey { source } => {
                write!(f, "Service-account private key rejected: {source}")
            }
            Self::NotConnected => {
                write!(f, "Connect to Google Sheets before importing")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidServiceAccountKey { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for TallyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Remote errors
// ---------------------------------------------------------------------------

/// Application-level failures reported by a remote service.
/// Messages are surfaced verbatim to the user.
#[derive(Debug)]
pub enum RemoteError {
    /// The log-analytics service returned a GraphQL errors payload.
    Api { message: String },

    /// The report code resolved to no report (expired, private, or mistyped).
    ReportNotFound { code: String },

    /// A success response could not be decoded into the expected shape.
    MalformedResponse {
        endpoint: &'static str,
        source: serde_json::Error,
    },

    /// The OAuth token endpoint rejected the service-account assertion.
    TokenExchange { message: String },

    /// The Sheets API reported a failure (bad spreadsheet id, missing
    /// worksheet, revoked credential).
    Sheets { message: String },

    /// A spreadsheet URL does not contain a `spreadsheets/d/<id>` segment.
    SpreadsheetUrl { url: String },
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { message } => write!(f, "{message}"),
            Self::ReportNotFound { code } => {
                write!(f, "Report '{code}' was not found on Warcraft Logs")
            }
            Self::MalformedResponse { endpoint, source } => {
                write!(f, "Unexpected response from {endpoint}: {source}")
            }
            Self::TokenExchange { message } => {
                write!(f, "Google token exchange failed: {message}")
            }
            Self::Sheets { message } => write!(f, "Sheets API: {message}"),
            Self::SpreadsheetUrl { url } => {
                write!(f, "'{url}' does not contain a spreadsheet id")
            }
        }
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedResponse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RemoteError> for TallyError {
    fn from(e: RemoteError) -> Self {
        Self::Remote(e)
    }
}

// ---------------------------------------------------------------------------
// Network errors
// ---------------------------------------------------------------------------

/// Transport-level failures. A generic message is surfaced; the user
/// re-triggers the action manually (no automatic retry anywhere).
#[derive(Debug)]
pub enum NetworkError {
    /// The request never completed: timeout, DNS, or connection failure.
    Transport {
        operation: &'static str,
        source: reqwest::Error,
    },

    /// The service answered with a non-success status and no parseable
    /// application payload.
    Status {
        operation: &'static str,
        status: u16,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { operation, source } => {
                write!(f, "{operation} failed: {source}")
            }
            Self::Status { operation, status } => {
                write!(f, "{operation} failed with HTTP status {status}")
            }
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<NetworkError> for TallyError {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Roster import failures. Individual malformed rows are skipped, not
/// errors; these variants cover failures of the whole import.
#[derive(Debug)]
pub enum ImportError {
    /// The source has no header row with the required columns.
    MissingColumns {
        source_name: String,
        expected: &'static str,
    },

    /// The CSV reader failed structurally (not a per-row problem).
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error reading the import file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns {
                source_name,
                expected,
            } => write!(
                f,
                "'{source_name}' has no header row with {expected} columns"
            ),
            Self::Csv { path, source } => {
                write!(f, "CSV import error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Import I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ImportError> for TallyError {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// CSV export failures with path context.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for TallyError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for RaidTally results.
pub type Result<T> = std::result::Result<T, TallyError>;
