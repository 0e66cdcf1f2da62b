// Draft-history retrieval from the NBA stats API.
//
// One GET per selected season, with the fixed browser-impersonation headers
// the endpoint requires. The payload's `resultSets[0]` carries an ordered
// `headers` list and a `rowSet` of positional rows; each row is zipped
// against the headers to produce one flat record, preserving row order.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

// ---------------------------------------------------------------------------
// Record field names
// ---------------------------------------------------------------------------

/// Upstream field holding the short team token (e.g. "Lakers").
pub const TEAM_NAME_FIELD: &str = "TEAM_NAME";

/// Upstream field holding the draft round number.
pub const ROUND_NUMBER_FIELD: &str = "ROUND_NUMBER";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or timeout while talking to the stats endpoint.
    #[error("draft history request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("draft history request returned status {status}")]
    Status { status: reqwest::StatusCode },

    /// The payload did not have the expected result-set shape.
    #[error("unexpected draft history payload: {0}")]
    Shape(String),
}

// ---------------------------------------------------------------------------
// DraftRecord
// ---------------------------------------------------------------------------

/// One row of draft-history data, keyed by upstream field name.
///
/// The record is treated as an opaque mapping; only the team-name and
/// round-number fields are ever consumed by the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRecord {
    pub fields: serde_json::Map<String, Value>,
}

impl DraftRecord {
    pub fn new(fields: serde_json::Map<String, Value>) -> Self {
        DraftRecord { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A field's value coerced to its string form.
    ///
    /// Numbers stringify (round `2` becomes `"2"`) so selections from the
    /// UI, which are always strings, compare by exact equality.
    pub fn field_str(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn team_name(&self) -> Option<String> {
        self.field_str(TEAM_NAME_FIELD)
    }

    pub fn round_number(&self) -> Option<String> {
        self.field_str(ROUND_NUMBER_FIELD)
    }
}

// ---------------------------------------------------------------------------
// RecordSource trait
// ---------------------------------------------------------------------------

/// Source of a season's draft records. Implemented by `StatsClient` for the
/// live endpoint and by stubs in tests.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_draft_history(&self, year: i32) -> Result<Vec<DraftRecord>, FetchError>;
}

// ---------------------------------------------------------------------------
// StatsClient
// ---------------------------------------------------------------------------

/// HTTP client for the stats endpoint.
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
    league_id: String,
}

impl StatsClient {
    /// Build a client with the configured base URL, league identifier, and
    /// request timeout.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(browser_headers())
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()?;

        Ok(StatsClient {
            http,
            base_url: config.upstream.base_url.clone(),
            league_id: config.upstream.league_id.clone(),
        })
    }
}

#[async_trait]
impl RecordSource for StatsClient {
    /// Fetch one season's draft history. Single attempt, no retries.
    async fn fetch_draft_history(&self, year: i32) -> Result<Vec<DraftRecord>, FetchError> {
        let url = format!("{}/drafthistory", self.base_url);
        debug!(year, url, "fetching draft history");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("LeagueID", self.league_id.as_str()),
                ("Season", &year.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let payload: Value = response.json().await?;
        let records = parse_result_set(&payload)?;
        info!(year, count = records.len(), "draft history fetched");
        Ok(records)
    }
}

/// The fixed header set the stats endpoint requires to accept a request as
/// browser-originated.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://stats.nba.com/draft/history/"),
    );
    headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));
    headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
    headers
}

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

/// Validate the `resultSets[0]` shape and zip each row against the header
/// list, preserving row order.
///
/// This is the single schema-validation step: any missing or mistyped part
/// of the expected shape is reported as `FetchError::Shape` instead of
/// surfacing as an uncaught missing-key fault downstream.
pub fn parse_result_set(payload: &Value) -> Result<Vec<DraftRecord>, FetchError> {
    let result_set = payload
        .get("resultSets")
        .and_then(|v| v.as_array())
        .and_then(|sets| sets.first())
        .ok_or_else(|| FetchError::Shape("missing resultSets[0]".into()))?;

    let headers = result_set
        .get("headers")
        .and_then(|v| v.as_array())
        .ok_or_else(|| FetchError::Shape("missing resultSets[0].headers".into()))?;

    let header_names: Vec<String> = headers
        .iter()
        .map(|h| {
            h.as_str()
                .map(str::to_string)
                .ok_or_else(|| FetchError::Shape("non-string header name".into()))
        })
        .collect::<Result<_, _>>()?;

    let rows = result_set
        .get("rowSet")
        .and_then(|v| v.as_array())
        .ok_or_else(|| FetchError::Shape("missing resultSets[0].rowSet".into()))?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .as_array()
            .ok_or_else(|| FetchError::Shape("rowSet entry is not an array".into()))?;

        let mut fields = serde_json::Map::with_capacity(header_names.len());
        for (name, cell) in header_names.iter().zip(cells.iter()) {
            fields.insert(name.clone(), cell.clone());
        }
        records.push(DraftRecord::new(fields));
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
