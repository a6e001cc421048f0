// RaidTally - net/sheets.rs
//
// Google Sheets read-only client: service-account JWT assertion exchanged
// for a bearer token, then one values GET per worksheet import.
//
// The JWT flow is two steps: sign a short-lived RS256 assertion with the
// service-account private key, POST it to the token endpoint, keep the
// returned access token for the session. Response decoding lives in pure
// functions so the error mapping is testable without a network.

use crate::core::model::{PlayerRecord, RosterImport};
use crate::core::roster::split_characters;
use crate::platform::secrets::ServiceAccountKey;
use crate::util::constants;
use crate::util::error::{ConfigError, ImportError, NetworkError, RemoteError, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

/// Operation labels used in transport/status errors.
const TOKEN_OPERATION: &str = "Google token exchange";
const VALUES_OPERATION: &str = "Worksheet fetch";

/// JWT assertion claims for the service-account grant.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    /// Issuer: the service-account email.
    iss: &'a str,
    /// Requested OAuth scope (read-only).
    scope: &'a str,
    /// Audience: the token endpoint itself.
    aud: &'a str,
    /// Issued-at (Unix seconds).
    iat: i64,
    /// Expiry (Unix seconds, at most one hour after `iat`).
    exp: i64,
}

/// Connected Sheets client holding a session access token.
///
/// Construction IS the connection: [`SheetsClient::connect`] performs the
/// token exchange, so any instance can serve imports. The token is not
/// refreshed; when it expires the user reconnects.
pub struct SheetsClient {
    access_token: String,
    timeout: Duration,
}

impl SheetsClient {
    /// Exchange the service-account key for a read-scoped access token.
    ///
    /// Blocks for up to the configured timeout. Key problems surface as
    /// `ConfigError` before any request is made.
    pub fn connect(key: &ServiceAccountKey, timeout_secs: u64) -> Result<Self> {
        if key.client_email.trim().is_empty() {
            return Err(ConfigError::IncompleteServiceAccount {
                field: "client_email",
            }
            .into());
        }
        if key.private_key.trim().is_empty() {
            return Err(ConfigError::IncompleteServiceAccount {
                field: "private_key",
            }
            .into());
        }

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| ConfigError::InvalidServiceAccountKey { source: e })?;

        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &key.client_email,
            scope: constants::SHEETS_OAUTH_SCOPE,
            aud: &key.token_uri,
            iat: now,
            exp: now + constants::JWT_ASSERTION_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| ConfigError::InvalidServiceAccountKey { source: e })?;

        tracing::info!("Exchanging service-account assertion for access token");

        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::Transport {
                operation: TOKEN_OPERATION,
                source: e,
            })?;

        let response = client
            .post(&key.token_uri)
            .form(&[
                ("grant_type", constants::JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .map_err(|e| NetworkError::Transport {
                operation: TOKEN_OPERATION,
                source: e,
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| NetworkError::Transport {
            operation: TOKEN_OPERATION,
            source: e,
        })?;

        let access_token = parse_token_response(&body, status)?;
        tracing::info!("Sheets access token acquired");

        Ok(Self {
            access_token,
            timeout,
        })
    }

    /// Read the named worksheet of a spreadsheet and convert its rows into
    /// roster records.
    ///
    /// `spreadsheet_url` is the browser URL; the id is extracted from its
    /// `spreadsheets/d/<id>` segment.
    pub fn import_from_spreadsheet(
        &self,
        spreadsheet_url: &str,
        worksheet: &str,
    ) -> Result<RosterImport> {
        let spreadsheet_id =
            extract_spreadsheet_id(spreadsheet_url).ok_or_else(|| RemoteError::SpreadsheetUrl {
                url: spreadsheet_url.to_string(),
            })?;

        tracing::info!(worksheet, "Importing roster from worksheet");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NetworkError::Transport {
                operation: VALUES_OPERATION,
                source: e,
            })?;

        let response = client
            .get(values_url(&spreadsheet_id, worksheet))
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| NetworkError::Transport {
                operation: VALUES_OPERATION,
                source: e,
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| NetworkError::Transport {
            operation: VALUES_OPERATION,
            source: e,
        })?;

        let rows = parse_values_response(&body, status)?;
        let import = rows_to_players(&rows, worksheet)?;

        tracing::info!(
            players = import.players.len(),
            skipped = import.skipped,
            "Worksheet rows converted"
        );

        Ok(import)
    }
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token never appears in Debug output.
        f.debug_struct("SheetsClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Extract the spreadsheet id from a browser URL.
///
/// Accepts anything containing a `spreadsheets/d/<id>` segment (ids may
/// carry `-` and `_`); trailing `/edit#gid=...` parts are ignored.
pub fn extract_spreadsheet_id(url: &str) -> Option<String> {
    static SPREADSHEET_ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = SPREADSHEET_ID_RE.get_or_init(|| {
        Regex::new(r"spreadsheets/d/([a-zA-Z0-9_-]+)").expect("invalid spreadsheet id regex")
    });
    re.captures(url).map(|caps| caps[1].to_string())
}

/// Build the values-API URL. Pushing the worksheet title as a path segment
/// percent-encodes titles containing spaces or unicode.
fn values_url(spreadsheet_id: &str, worksheet: &str) -> reqwest::Url {
    let mut url =
        reqwest::Url::parse(constants::SHEETS_API_BASE).expect("invalid Sheets API base URL");
    url.path_segments_mut()
        .expect("Sheets API base URL cannot be a base")
        .push(spreadsheet_id)
        .push("values")
        .push(worksheet);
    url
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OAuth error bodies carry `error` and optionally `error_description`.
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl OAuthErrorBody {
    fn message(&self) -> Option<String> {
        match (&self.error, &self.error_description) {
            (Some(e), Some(d)) => Some(format!("{e}: {d}")),
            (Some(e), None) => Some(e.clone()),
            (None, Some(d)) => Some(d.clone()),
            (None, None) => None,
        }
    }
}

fn parse_token_response(body: &str, status: reqwest::StatusCode) -> Result<String> {
    if status.is_success() {
        let token: TokenResponse =
            serde_json::from_str(body).map_err(|e| RemoteError::MalformedResponse {
                endpoint: "Google OAuth",
                source: e,
            })?;
        return Ok(token.access_token);
    }

    if let Ok(err) = serde_json::from_str::<OAuthErrorBody>(body) {
        if let Some(message) = err.message() {
            return Err(RemoteError::TokenExchange { message }.into());
        }
    }

    Err(NetworkError::Status {
        operation: TOKEN_OPERATION,
        status: status.as_u16(),
    }
    .into())
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    /// Absent entirely when the worksheet is empty.
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Google API error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    message: String,
}

fn parse_values_response(body: &str, status: reqwest::StatusCode) -> Result<Vec<Vec<String>>> {
    if status.is_success() {
        let values: ValuesResponse =
            serde_json::from_str(body).map_err(|e| RemoteError::MalformedResponse {
                endpoint: "Google Sheets",
                source: e,
            })?;
        return Ok(values.values);
    }

    if let Ok(err) = serde_json::from_str::<GoogleErrorBody>(body) {
        if !err.error.message.is_empty() {
            return Err(RemoteError::Sheets {
                message: err.error.message,
            }
            .into());
        }
    }

    Err(NetworkError::Status {
        operation: VALUES_OPERATION,
        status: status.as_u16(),
    }
    .into())
}

/// Convert worksheet rows into roster records.
///
/// The first row is the header; `Player` and `Characters` columns are
/// located case-insensitively. Later rows are read leniently: a row
/// yields a record only with a non-empty name and at least one character,
/// everything else is skipped and counted.
fn rows_to_players(
    rows: &[Vec<String>],
    worksheet: &str,
) -> std::result::Result<RosterImport, ImportError> {
    let Some((header, data_rows)) = rows.split_first() else {
        return Err(ImportError::MissingColumns {
            source_name: format!("worksheet '{worksheet}'"),
            expected: "'Player' and 'Characters'",
        });
    };

    let player_idx = find_column(header, constants::SHEET_PLAYER_HEADER);
    let characters_idx = find_column(header, constants::SHEET_CHARACTERS_HEADER);
    let (player_idx, characters_idx) = match (player_idx, characters_idx) {
        (Some(p), Some(c)) => (p, c),
        _ => {
            return Err(ImportError::MissingColumns {
                source_name: format!("worksheet '{worksheet}'"),
                expected: "'Player' and 'Characters'",
            })
        }
    };

    let mut import = RosterImport::default();
    for row in data_rows {
        let name = row.get(player_idx).map(|s| s.trim()).unwrap_or("");
        let characters = split_characters(row.get(characters_idx).map(String::as_str).unwrap_or(""));
        if name.is_empty() || characters.is_empty() {
            import.skipped += 1;
            continue;
        }

        import.players.push(PlayerRecord {
            name: name.to_string(),
            characters,
        });
    }

    Ok(import)
}

fn find_column(header: &[String], wanted: &str) -> Option<usize> {
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::TallyError;
    use reqwest::StatusCode;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_extract_spreadsheet_id_from_url() {
        let url = "https://docs.google.com/spreadsheets/d/1aBc-DEF_123/edit#gid=0";
        assert_eq!(
            extract_spreadsheet_id(url),
            Some("1aBc-DEF_123".to_string())
        );
    }

    #[test]
    fn test_extract_spreadsheet_id_rejects_other_urls() {
        assert_eq!(extract_spreadsheet_id("https://docs.google.com/"), None);
        assert_eq!(extract_spreadsheet_id("1aBc-DEF_123"), None);
    }

    #[test]
    fn test_values_url_encodes_worksheet_title() {
        let url = values_url("sheet1", "Raid Roster");
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet1/values/Raid%20Roster"
        );
    }

    #[test]
    fn test_parse_token_success() {
        let body = r#"{"access_token": "tok123", "expires_in": 3599, "token_type": "Bearer"}"#;
        let token = parse_token_response(body, StatusCode::OK).unwrap();
        assert_eq!(token, "tok123");
    }

    #[test]
    fn test_parse_token_oauth_error() {
        let body = r#"{"error": "invalid_grant", "error_description": "Invalid JWT signature."}"#;
        let err = parse_token_response(body, StatusCode::BAD_REQUEST).unwrap_err();
        match err {
            TallyError::Remote(RemoteError::TokenExchange { message }) => {
                assert_eq!(message, "invalid_grant: Invalid JWT signature.");
            }
            other => panic!("expected TokenExchange, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_token_opaque_failure_is_status() {
        let err = parse_token_response("<html>502</html>", StatusCode::BAD_GATEWAY).unwrap_err();
        assert!(matches!(
            err,
            TallyError::Network(NetworkError::Status { status: 502, .. })
        ));
    }

    #[test]
    fn test_parse_values_success_and_empty() {
        let body = r#"{"range": "A1:B3", "values": [["Player", "Characters"], ["Bob", "Arthas"]]}"#;
        let values = parse_values_response(body, StatusCode::OK).unwrap();
        assert_eq!(values.len(), 2);

        // An empty worksheet omits `values` entirely.
        let empty = parse_values_response(r#"{"range": "A1"}"#, StatusCode::OK).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_values_google_error() {
        let body = r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#;
        let err = parse_values_response(body, StatusCode::NOT_FOUND).unwrap_err();
        match err {
            TallyError::Remote(RemoteError::Sheets { message }) => {
                assert_eq!(message, "Requested entity was not found.");
            }
            other => panic!("expected Sheets error, got {other:?}"),
        }
    }

    #[test]
    fn test_rows_to_players_maps_and_skips() {
        let rows = rows(&[
            &["player", "characters"],
            &["Bob", "Arthas, Illidan"],
            &["", "Jaina"],
            &["Carol", ""],
            &["Dave", "Uther"],
        ]);
        let import = rows_to_players(&rows, "Roster").unwrap();
        assert_eq!(import.skipped, 2);
        assert_eq!(import.players.len(), 2);
        assert_eq!(import.players[0].characters, vec!["Arthas", "Illidan"]);
    }

    #[test]
    fn test_rows_to_players_handles_short_rows() {
        let rows = rows(&[&["Player", "Characters"], &["Bob"]]);
        let import = rows_to_players(&rows, "Roster").unwrap();
        assert!(import.players.is_empty());
        assert_eq!(import.skipped, 1);
    }

    #[test]
    fn test_rows_without_required_headers_fail() {
        let no_header = rows(&[&["Who", "Mains"], &["Bob", "Arthas"]]);
        assert!(matches!(
            rows_to_players(&no_header, "Roster"),
            Err(ImportError::MissingColumns { .. })
        ));

        let empty: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            rows_to_players(&empty, "Roster"),
            Err(ImportError::MissingColumns { .. })
        ));
    }

    #[test]
    fn test_connect_rejects_incomplete_key() {
        let key = ServiceAccountKey {
            client_email: String::new(),
            private_key: "pem".to_string(),
            ..Default::default()
        };
        let err = SheetsClient::connect(&key, 15).unwrap_err();
        assert!(matches!(
            err,
            TallyError::Config(ConfigError::IncompleteServiceAccount {
                field: "client_email"
            })
        ));

        let key = ServiceAccountKey {
            client_email: "bot@project.iam".to_string(),
            private_key: String::new(),
            ..Default::default()
        };
        let err = SheetsClient::connect(&key, 15).unwrap_err();
        assert!(matches!(
            err,
            TallyError::Config(ConfigError::IncompleteServiceAccount {
                field: "private_key"
            })
        ));
    }

    #[test]
    fn test_connect_rejects_garbage_private_key() {
        // Signing-key parse happens before any request is built.
        let key = ServiceAccountKey {
            client_email: "bot@project.iam".to_string(),
            private_key: "not a pem block".to_string(),
            ..Default::default()
        };
        let err = SheetsClient::connect(&key, 15).unwrap_err();
        assert!(matches!(
            err,
            TallyError::Config(ConfigError::InvalidServiceAccountKey { .. })
        ));
    }
}
