// RaidTally - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "RaidTally";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "RaidTally";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Warcraft Logs API
// =============================================================================

/// Warcraft Logs v2 GraphQL endpoint. One POST per report fetch.
pub const WCL_API_URL: &str = "https://www.warcraftlogs.com/api/v2/client";

/// Actor `subType` value identifying human players in a report's master data.
/// Pets, NPCs, and environment actors carry other subtypes and are excluded.
pub const PLAYER_ACTOR_SUBTYPE: &str = "Human";

/// Zone label used when a report carries no zone metadata.
pub const UNKNOWN_ZONE: &str = "Unknown";

// =============================================================================
// Google Sheets API
// =============================================================================

/// Base URL for the Sheets v4 values API. The spreadsheet id and worksheet
/// title are appended as path segments.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// OAuth scope requested for the service-account token (read-only).
pub const SHEETS_OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Token endpoint used when the service-account key does not name one.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// `grant_type` for the service-account JWT assertion exchange.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime of the signed JWT assertion in seconds (Google caps this at 1 h).
pub const JWT_ASSERTION_LIFETIME_SECS: i64 = 3_600;

// =============================================================================
// Network limits
// =============================================================================

/// Default timeout for a single blocking HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Minimum user-configurable request timeout (seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable request timeout (seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// Roster CSV format
// =============================================================================

/// Header of the player-name column in roster CSV files.
pub const CSV_NAME_HEADER: &str = "name";

/// Header of the character-list column in roster CSV files.
pub const CSV_CHARACTERS_HEADER: &str = "characters";

/// Separator used when joining a character list into a single CSV field.
/// Import splits on ',' and trims, so the round trip is lossless for
/// comma-free names.
pub const CHARACTER_JOIN_SEPARATOR: &str = ", ";

/// Suggested file name for roster exports.
pub const ROSTER_EXPORT_FILE_NAME: &str = "roster.csv";

/// Suggested file name for attendance-result exports.
pub const RESULTS_EXPORT_FILE_NAME: &str = "attendance.csv";

// =============================================================================
// Spreadsheet worksheet format
// =============================================================================

/// Header of the player-name column in an imported worksheet.
pub const SHEET_PLAYER_HEADER: &str = "Player";

/// Header of the character-list column in an imported worksheet.
pub const SHEET_CHARACTERS_HEADER: &str = "Characters";

// =============================================================================
// Timestamps and labels
// =============================================================================

/// Minute-resolution wall-clock format used for history entries and
/// report start times.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// History source label for manually entered participant lists.
pub const MANUAL_SOURCE_LABEL: &str = "Manual entry";

/// History source label fallback when a report carries no title or context.
pub const REPORT_SOURCE_FALLBACK: &str = "Warcraft Logs report";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name (non-secret tuning).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Secrets file name (API key + service-account table).
pub const SECRETS_FILE_NAME: &str = "secrets.toml";
