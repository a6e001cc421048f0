// RaidTally - net/wcl.rs
//
// Warcraft Logs v2 GraphQL client. One blocking POST per report fetch,
// no caching, no retry; the caller re-triggers on failure.
//
// Response decoding is kept in a pure function so the error mapping is
// testable without a network.

use crate::core::model::ReportSummary;
use crate::util::constants;
use crate::util::error::{
    ConfigError, NetworkError, RemoteError, Result, TallyError, ValidationError,
};
use chrono::{TimeZone, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

/// Operation label used in transport/status errors.
const FETCH_OPERATION: &str = "Report fetch";

/// Client for fetching report participants from Warcraft Logs.
///
/// Holds the API key (if one is configured) and the request timeout.
/// Cheap to construct; the underlying HTTP client is built per request.
#[derive(Debug, Clone)]
pub struct ReportClient {
    api_key: Option<String>,
    timeout: Duration,
}

impl ReportClient {
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Returns `true` when an API key is available. Without one the
    /// report-fetch feature is disabled and fetches fail fast.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the player participants of one report.
    ///
    /// `code` is the bare report code, not a URL (see [`extract_report_id`]).
    /// Blocks the calling thread for up to the configured timeout.
    pub fn fetch_participants(&self, code: &str) -> Result<ReportSummary> {
        let api_key = match &self.api_key {
            Some(k) => k.as_str(),
            None => return Err(ConfigError::MissingWclKey.into()),
        };

        // The code is embedded in the query string, so anything outside
        // [a-zA-Z0-9] is rejected before a request is built.
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidReportCode {
                code: code.to_string(),
            }
            .into());
        }

        tracing::info!(code, "Fetching report participants");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NetworkError::Transport {
                operation: FETCH_OPERATION,
                source: e,
            })?;

        let response = client
            .post(constants::WCL_API_URL)
            .bearer_auth(api_key)
            .json(&serde_json::json!({ "query": build_query(code) }))
            .send()
            .map_err(|e| NetworkError::Transport {
                operation: FETCH_OPERATION,
                source: e,
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| NetworkError::Transport {
            operation: FETCH_OPERATION,
            source: e,
        })?;

        match parse_report_response(&body, code) {
            // An undecodable body on a failed request (HTML error page,
            // gateway message) is a transport problem, not a protocol one.
            Err(TallyError::Remote(RemoteError::MalformedResponse { .. }))
                if !status.is_success() =>
            {
                Err(NetworkError::Status {
                    operation: FETCH_OPERATION,
                    status: status.as_u16(),
                }
                .into())
            }
            result => result,
        }
    }
}

/// Extract the report code from a pasted Warcraft Logs URL.
///
/// Accepts anything containing a `reports/<code>` segment; trailing path
/// parts, fragments, and query strings are ignored. Returns `None` when no
/// code is present.
pub fn extract_report_id(url: &str) -> Option<String> {
    static REPORT_ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = REPORT_ID_RE
        .get_or_init(|| Regex::new(r"reports/([a-zA-Z0-9]+)").expect("invalid report id regex"));
    re.captures(url).map(|caps| caps[1].to_string())
}

/// Build the GraphQL query for one report. `code` must already be
/// validated as alphanumeric.
fn build_query(code: &str) -> String {
    format!(
        r#"{{
    reportData {{
        report(code: "{code}") {{
            masterData(translate: true) {{
                actors(type: "player") {{
                    name
                    subType
                }}
            }}
            startTime
            title
            zone {{
                name
            }}
        }}
    }}
}}"#
    )
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<DataBody>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataBody {
    #[serde(default)]
    report_data: Option<ReportDataBody>,
}

#[derive(Debug, Deserialize)]
struct ReportDataBody {
    #[serde(default)]
    report: Option<ReportBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody {
    #[serde(default)]
    master_data: Option<MasterData>,
    #[serde(default)]
    start_time: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    zone: Option<Zone>,
}

#[derive(Debug, Deserialize)]
struct MasterData {
    #[serde(default)]
    actors: Vec<Actor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Actor {
    name: String,
    #[serde(default)]
    sub_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    #[serde(default)]
    name: Option<String>,
}

/// Decode a GraphQL response body into a [`ReportSummary`].
///
/// Precedence: a GraphQL `errors` payload wins over everything, then a
/// null report means the code resolved to nothing, then the report body
/// is read leniently (missing zone falls back to "Unknown").
fn parse_report_response(body: &str, code: &str) -> Result<ReportSummary> {
    let response: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::MalformedResponse {
            endpoint: "Warcraft Logs",
            source: e,
        })?;

    if let Some(errors) = response.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(RemoteError::Api {
                message: first.message,
            }
            .into());
        }
    }

    let report = response
        .data
        .and_then(|d| d.report_data)
        .and_then(|rd| rd.report)
        .ok_or_else(|| RemoteError::ReportNotFound {
            code: code.to_string(),
        })?;

    let participants: Vec<String> = report
        .master_data
        .map(|md| md.actors)
        .unwrap_or_default()
        .into_iter()
        .filter(|a| a.sub_type.as_deref() == Some(constants::PLAYER_ACTOR_SUBTYPE))
        .map(|a| a.name)
        .collect();

    let zone = report
        .zone
        .and_then(|z| z.name)
        .unwrap_or_else(|| constants::UNKNOWN_ZONE.to_string());
    let context = report
        .start_time
        .and_then(format_start_time)
        .map(|start| format!("{zone} - {start}"));

    tracing::debug!(
        participants = participants.len(),
        title = ?report.title,
        "Report decoded"
    );

    Ok(ReportSummary {
        participants,
        title: report.title,
        context,
    })
}

/// Millisecond epoch to minute-resolution UTC wall clock.
fn format_start_time(epoch_ms: i64) -> Option<String> {
    Utc.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.format(constants::TIMESTAMP_FORMAT).to_string())
}
