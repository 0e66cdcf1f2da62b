// Integration tests for the draft explorer.
//
// These tests exercise the full system end-to-end using the library crate's
// public API. They verify that the major subsystems (stats fetch and payload
// parsing, filtering, session transitions, LLM prompt construction, and
// summary generation) work together correctly.

use std::sync::Arc;

use draft_explorer::app::{self, AppState, NO_MATCHES_MESSAGE, SUMMARY_DISABLED_MESSAGE};
use draft_explorer::config::*;
use draft_explorer::filter::{self, ALL_ROUNDS, ALL_TEAMS};
use draft_explorer::llm::client::{GeminiClient, LlmClient};
use draft_explorer::llm::prompt;
use draft_explorer::protocol::*;
use draft_explorer::stats::{DraftRecord, FetchError, RecordSource, StatsClient};

use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Build a test-ready Config with inline settings (no files).
fn inline_config(base_url: &str, api_key: Option<&str>) -> Config {
    Config {
        upstream: UpstreamConfig {
            base_url: base_url.to_string(),
            league_id: "00".into(),
            timeout_secs: 10,
        },
        seasons: SeasonsConfig {
            latest: 2023,
            earliest: 1947,
        },
        llm: LlmConfig {
            model: "gemini-1.5-flash".into(),
            instruction: None,
        },
        credentials: CredentialsConfig {
            gemini_api_key: api_key.map(str::to_string),
        },
    }
}

/// A draft-history payload in the upstream shape: headers zipped per row.
fn draft_history_payload() -> serde_json::Value {
    json!({
        "resource": "drafthistory",
        "resultSets": [{
            "name": "DraftHistory",
            "headers": [
                "PERSON_ID", "PLAYER_NAME", "SEASON", "ROUND_NUMBER",
                "ROUND_PICK", "OVERALL_PICK", "TEAM_NAME", "ORGANIZATION"
            ],
            "rowSet": [
                [1641705, "Victor Wembanyama", "2023", 1, 1, 1, "Spurs", "Metropolitans 92"],
                [1641706, "Brandon Miller", "2023", 1, 2, 2, "Hornets", "Alabama"],
                [1641707, "Jalen Hood-Schifino", "2023", 1, 17, 17, "Lakers", "Indiana"],
                [1641708, "Maxwell Lewis", "2023", 2, 10, 40, "Lakers", "Pepperdine"]
            ]
        }]
    })
}

/// Serve a single canned HTTP response on a fresh local port.
async fn one_shot_server(body: String, status_line: &'static str) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Read the request (discard it).
        let mut buf = vec![0u8; 8192];
        let _ = socket.read(&mut buf).await;

        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len(),
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
    });

    addr
}

/// Stub source serving a fixed season for 2023 and failing for other years.
struct FixtureSource;

#[async_trait]
impl RecordSource for FixtureSource {
    async fn fetch_draft_history(&self, year: i32) -> Result<Vec<DraftRecord>, FetchError> {
        if year == 2023 {
            draft_explorer::stats::parse_result_set(&draft_history_payload())
        } else {
            Err(FetchError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }
}

// ===========================================================================
// Stats fetch over HTTP
// ===========================================================================

#[tokio::test]
async fn stats_client_fetches_and_parses_a_season() {
    let addr = one_shot_server(draft_history_payload().to_string(), "HTTP/1.1 200 OK").await;
    let config = inline_config(&format!("http://{addr}"), None);
    let client = StatsClient::new(&config).unwrap();

    let records = client.fetch_draft_history(2023).await.expect("fetch");

    assert_eq!(records.len(), 4);
    // Row order is preserved.
    assert_eq!(
        records[0].field_str("PLAYER_NAME").as_deref(),
        Some("Victor Wembanyama")
    );
    assert_eq!(records[0].team_name().as_deref(), Some("Spurs"));
    assert_eq!(records[0].round_number().as_deref(), Some("1"));
    assert_eq!(records[3].team_name().as_deref(), Some("Lakers"));
    assert_eq!(records[3].round_number().as_deref(), Some("2"));
}

#[tokio::test]
async fn stats_client_reports_upstream_error_status() {
    let addr = one_shot_server("{}".to_string(), "HTTP/1.1 500 Internal Server Error").await;
    let config = inline_config(&format!("http://{addr}"), None);
    let client = StatsClient::new(&config).unwrap();

    let err = client.fetch_draft_history(2023).await.unwrap_err();
    match err {
        FetchError::Status { status } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected Status error, got: {other}"),
    }
}

#[tokio::test]
async fn stats_client_surfaces_network_failure_as_request_error() {
    // Accept the connection but never answer, so the client's own timeout
    // has to fire.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        drop(socket);
    });

    let mut config = inline_config(&format!("http://{addr}"), None);
    config.upstream.timeout_secs = 1;
    let client = StatsClient::new(&config).unwrap();

    let err = client.fetch_draft_history(2023).await.unwrap_err();
    match err {
        FetchError::Request(e) => assert!(e.is_timeout() || e.is_connect()),
        other => panic!("expected Request error, got: {other}"),
    }
}

#[tokio::test]
async fn stats_client_surfaces_refused_connection_as_request_error() {
    // Bind then drop the listener so the port is closed when the client
    // connects.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = inline_config(&format!("http://{addr}"), None);
    let client = StatsClient::new(&config).unwrap();

    let err = client.fetch_draft_history(2023).await.unwrap_err();
    assert!(matches!(err, FetchError::Request(_)));
}

#[tokio::test]
async fn stats_client_rejects_malformed_payload() {
    let addr = one_shot_server(json!({ "unexpected": true }).to_string(), "HTTP/1.1 200 OK").await;
    let config = inline_config(&format!("http://{addr}"), None);
    let client = StatsClient::new(&config).unwrap();

    let err = client.fetch_draft_history(2023).await.unwrap_err();
    assert!(matches!(err, FetchError::Shape(_)));
}

// ===========================================================================
// Session transitions end-to-end
// ===========================================================================

#[tokio::test]
async fn year_then_team_then_round_narrows_the_view() {
    let (summary_tx, _summary_rx) = mpsc::channel(8);
    let mut state = AppState::new(
        inline_config("http://unused", None),
        Arc::new(FixtureSource),
        LlmClient::Disabled,
        summary_tx,
    );

    let update = state.select_year(2023).await.expect("should update");
    match update {
        UiUpdate::SeasonLoaded {
            year,
            filtered,
            season_total,
        } => {
            assert_eq!(year, 2023);
            assert_eq!(season_total, 4);
            // Sentinel selections: filtered == full season.
            assert_eq!(filtered.len(), 4);
        }
        other => panic!("expected SeasonLoaded, got: {other:?}"),
    }

    // Full franchise name resolves to the stored token.
    let update = state.select_team("Los Angeles Lakers".into());
    match update {
        UiUpdate::FilterApplied { filtered } => {
            assert_eq!(filtered.len(), 2);
            assert!(filtered
                .iter()
                .all(|r| r.team_name().as_deref() == Some("Lakers")));
        }
        other => panic!("expected FilterApplied, got: {other:?}"),
    }

    let update = state.select_round("2".into());
    match update {
        UiUpdate::FilterApplied { filtered } => {
            assert_eq!(filtered.len(), 1);
            assert_eq!(
                filtered[0].field_str("PLAYER_NAME").as_deref(),
                Some("Maxwell Lewis")
            );
        }
        other => panic!("expected FilterApplied, got: {other:?}"),
    }

    // Back to the sentinel restores the whole round range for the team.
    let update = state.select_round(ALL_ROUNDS.into());
    match update {
        UiUpdate::FilterApplied { filtered } => assert_eq!(filtered.len(), 2),
        other => panic!("expected FilterApplied, got: {other:?}"),
    }
}

#[tokio::test]
async fn failed_fetch_leaves_loaded_season_intact() {
    let (summary_tx, _summary_rx) = mpsc::channel(8);
    let mut state = AppState::new(
        inline_config("http://unused", None),
        Arc::new(FixtureSource),
        LlmClient::Disabled,
        summary_tx,
    );

    state.select_year(2023).await;
    assert_eq!(state.records().len(), 4);

    let update = state.select_year(1999).await.expect("should update");
    assert!(matches!(update, UiUpdate::FetchFailed { year: 1999, .. }));

    // The 2023 season and its filtered view are still available.
    assert_eq!(state.loaded_year, Some(2023));
    assert_eq!(state.records().len(), 4);
    assert_eq!(state.filtered().len(), 4);
}

#[tokio::test]
async fn run_loop_serves_commands_until_quit() {
    let (summary_tx, summary_rx) = mpsc::channel(8);
    let state = AppState::new(
        inline_config("http://unused", None),
        Arc::new(FixtureSource),
        LlmClient::Disabled,
        summary_tx,
    );

    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (ui_tx, mut ui_rx) = mpsc::channel(32);

    let handle = tokio::spawn(app::run(cmd_rx, summary_rx, ui_tx, state));

    // Startup: availability notice, then the latest season loads implicitly.
    let first = ui_rx.recv().await.unwrap();
    assert_eq!(first, UiUpdate::SummaryAvailability { enabled: false });
    let second = ui_rx.recv().await.unwrap();
    assert!(matches!(
        second,
        UiUpdate::SeasonLoaded {
            year: 2023,
            season_total: 4,
            ..
        }
    ));

    cmd_tx
        .send(UserCommand::SelectTeam("San Antonio Spurs".into()))
        .await
        .unwrap();
    match ui_rx.recv().await.unwrap() {
        UiUpdate::FilterApplied { filtered } => assert_eq!(filtered.len(), 1),
        other => panic!("expected FilterApplied, got: {other:?}"),
    }

    // Summary without a key fails visibly but keeps the loop alive.
    cmd_tx.send(UserCommand::RequestSummary).await.unwrap();
    match ui_rx.recv().await.unwrap() {
        UiUpdate::SummaryFailed { message } => assert_eq!(message, SUMMARY_DISABLED_MESSAGE),
        other => panic!("expected SummaryFailed, got: {other:?}"),
    }

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    handle.await.unwrap().unwrap();
}

// ===========================================================================
// Filtering properties
// ===========================================================================

#[tokio::test]
async fn sentinel_filters_are_the_identity() {
    let records = draft_explorer::stats::parse_result_set(&draft_history_payload()).unwrap();
    let filtered = filter::filter_records(&records, ALL_TEAMS, ALL_ROUNDS);
    assert_eq!(filtered, records);
}

#[tokio::test]
async fn unmatched_team_yields_empty_not_error() {
    let records = draft_explorer::stats::parse_result_set(&draft_history_payload()).unwrap();
    let filtered = filter::filter_records(&records, "Springfield Isotopes", ALL_ROUNDS);
    assert!(filtered.is_empty());
}

// ===========================================================================
// Summary pipeline
// ===========================================================================

#[tokio::test]
async fn prompt_embeds_at_most_five_records() {
    let mut records = Vec::new();
    for i in 0..8 {
        let mut fields = serde_json::Map::new();
        fields.insert("PLAYER_NAME".into(), json!(format!("Player {i}")));
        records.push(DraftRecord::new(fields));
    }

    let text = prompt::build_summary_prompt(&records, prompt::DEFAULT_INSTRUCTION);
    assert!(text.contains("Player 0"));
    assert!(text.contains("Player 4"));
    assert!(!text.contains("Player 5"));
}

#[tokio::test]
async fn summary_request_runs_against_mock_provider() {
    let body = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Wembanyama headlines the class." }] }
        }]
    })
    .to_string();
    let addr = one_shot_server(body, "HTTP/1.1 200 OK").await;

    let llm_client = LlmClient::Active(GeminiClient::with_base_url(
        "test-key".into(),
        "gemini-1.5-flash".into(),
        format!("http://{addr}"),
    ));

    let (summary_tx, mut summary_rx) = mpsc::channel(8);
    let mut state = AppState::new(
        inline_config("http://unused", Some("test-key")),
        Arc::new(FixtureSource),
        llm_client,
        summary_tx,
    );
    state.select_year(2023).await;

    let update = state.request_summary();
    assert_eq!(update, UiUpdate::SummaryStarted);

    let event = summary_rx.recv().await.expect("task reports back");
    match state.handle_summary_event(event) {
        Some(UiUpdate::SummaryReady { text }) => {
            assert_eq!(text, "Wembanyama headlines the class.");
        }
        other => panic!("expected SummaryReady, got: {other:?}"),
    }
}

#[tokio::test]
async fn summary_request_with_no_matches_short_circuits() {
    let (summary_tx, mut summary_rx) = mpsc::channel(8);
    let mut state = AppState::new(
        inline_config("http://unused", Some("test-key")),
        Arc::new(FixtureSource),
        LlmClient::Active(GeminiClient::new(
            "test-key".into(),
            "gemini-1.5-flash".into(),
        )),
        summary_tx,
    );
    state.select_year(2023).await;
    state.select_team("Boston Celtics".into());

    let update = state.request_summary();
    match update {
        UiUpdate::SummaryFailed { message } => assert_eq!(message, NO_MATCHES_MESSAGE),
        other => panic!("expected SummaryFailed, got: {other:?}"),
    }

    // No task was spawned, so nothing arrives on the channel.
    assert!(summary_rx.try_recv().is_err());
}
