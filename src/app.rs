// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI and
// completion events from spawned summary tasks. Owns the selection state and
// the cached season records, and pushes UI updates to the TUI render loop.
//
// Session state machine: Idle (no data yet) -> Loaded (records for the
// loaded year held) / Error (last fetch failed). A year change is the only
// transition that re-fetches; team/round changes just re-filter.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;
use crate::filter::{self, ALL_ROUNDS, ALL_TEAMS};
use crate::llm::client::LlmClient;
use crate::llm::prompt;
use crate::protocol::{SessionPhase, SummaryEvent, UiUpdate, UserCommand};
use crate::stats::{DraftRecord, RecordSource};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentinel text shown in the summary panel when generation fails.
pub const SUMMARY_FAILURE_TEXT: &str = "An error occurred while generating the summary.";

/// Message shown when the filtered result is empty.
pub const NO_MATCHES_MESSAGE: &str = "No draft picks match the selected criteria.";

/// Message shown when a summary is requested without a configured API key.
pub const SUMMARY_DISABLED_MESSAGE: &str =
    "Summary generation is disabled: set gemini_api_key in config/credentials.toml.";

// ---------------------------------------------------------------------------
// SelectionState
// ---------------------------------------------------------------------------

/// The user's current selections. Owned by the controller and mutated only
/// by selection transitions; no hidden per-session store.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub year: i32,
    /// Full franchise name, or the "All Teams" sentinel.
    pub team: String,
    /// Round string "0".."10", or the "All Rounds" sentinel.
    pub round: String,
}

impl SelectionState {
    pub fn new(year: i32) -> Self {
        SelectionState {
            year,
            team: ALL_TEAMS.to_string(),
            round: ALL_ROUNDS.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    /// Season record source (live stats client, or a stub in tests).
    source: Arc<dyn RecordSource>,
    /// Summary client. Wrapped in Arc for sharing with spawned tasks.
    pub llm_client: Arc<LlmClient>,
    /// Sender for summary events; spawned tasks use a clone of this sender
    /// to report completion back to the main event loop.
    summary_tx: mpsc::Sender<SummaryEvent>,
    pub selection: SelectionState,
    pub phase: SessionPhase,
    /// The year whose records are currently cached. Stays untouched when a
    /// fetch for a different year fails.
    pub loaded_year: Option<i32>,
    /// The loaded season's full record set, immutable until the year
    /// changes again.
    records: Vec<DraftRecord>,
    current_summary_task: Option<tokio::task::JoinHandle<()>>,
    /// Monotonically increasing counter identifying the current summary
    /// task. Events from stale generations are discarded.
    pub summary_generation: u64,
}

impl AppState {
    pub fn new(
        config: Config,
        source: Arc<dyn RecordSource>,
        llm_client: LlmClient,
        summary_tx: mpsc::Sender<SummaryEvent>,
    ) -> Self {
        let selection = SelectionState::new(config.seasons.latest);
        AppState {
            config,
            source,
            llm_client: Arc::new(llm_client),
            summary_tx,
            selection,
            phase: SessionPhase::Idle,
            loaded_year: None,
            records: Vec::new(),
            current_summary_task: None,
            summary_generation: 0,
        }
    }

    /// The loaded season's record set.
    pub fn records(&self) -> &[DraftRecord] {
        &self.records
    }

    /// The filtered view of the loaded season under the current selection.
    pub fn filtered(&self) -> Vec<DraftRecord> {
        filter::filter_records(&self.records, &self.selection.team, &self.selection.round)
    }

    /// Handle a year selection. Re-fetches exactly when `year` differs from
    /// the loaded year; a failed fetch reports an error but leaves the
    /// previously loaded records (and `loaded_year`) intact.
    pub async fn select_year(&mut self, year: i32) -> Option<UiUpdate> {
        self.selection.year = year;

        if self.loaded_year == Some(year) {
            // Already holding this season; nothing to do.
            return None;
        }

        info!(year, "fetching draft history for selected year");
        match self.source.fetch_draft_history(year).await {
            Ok(records) => {
                self.records = records;
                self.loaded_year = Some(year);
                self.phase = SessionPhase::Loaded;
                Some(UiUpdate::SeasonLoaded {
                    year,
                    filtered: self.filtered(),
                    season_total: self.records.len(),
                })
            }
            Err(e) => {
                warn!(year, "draft history fetch failed: {e}");
                self.phase = SessionPhase::Error;
                Some(UiUpdate::FetchFailed {
                    year,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Handle a team selection. Filter-only; never fetches.
    pub fn select_team(&mut self, team: String) -> UiUpdate {
        self.selection.team = team;
        UiUpdate::FilterApplied {
            filtered: self.filtered(),
        }
    }

    /// Handle a round selection. Filter-only; never fetches.
    pub fn select_round(&mut self, round: String) -> UiUpdate {
        self.selection.round = round;
        UiUpdate::FilterApplied {
            filtered: self.filtered(),
        }
    }

    /// Handle a summary request.
    ///
    /// Only valid with a non-empty filtered result and a configured client;
    /// otherwise the request resolves to an immediate visible failure
    /// without spawning a task. On success, cancels any in-flight summary
    /// task and spawns a new one tagged with a fresh generation.
    pub fn request_summary(&mut self) -> UiUpdate {
        let filtered = self.filtered();
        if filtered.is_empty() {
            return UiUpdate::SummaryFailed {
                message: NO_MATCHES_MESSAGE.to_string(),
            };
        }

        if !self.llm_client.is_enabled() {
            return UiUpdate::SummaryFailed {
                message: SUMMARY_DISABLED_MESSAGE.to_string(),
            };
        }

        self.cancel_summary_task();
        self.summary_generation += 1;
        let generation = self.summary_generation;

        let instruction = self
            .config
            .llm
            .instruction
            .clone()
            .unwrap_or_else(|| prompt::DEFAULT_INSTRUCTION.to_string());
        let user_prompt = prompt::build_summary_prompt(&filtered, &instruction);

        let client = Arc::clone(&self.llm_client);
        let tx = self.summary_tx.clone();

        let handle = tokio::spawn(async move {
            let event = match client.generate(&user_prompt).await {
                Ok(text) => SummaryEvent::Completed { text, generation },
                Err(e) => SummaryEvent::Failed {
                    message: e.to_string(),
                    generation,
                },
            };
            let _ = tx.send(event).await;
        });

        self.current_summary_task = Some(handle);
        info!(generation, picks = filtered.len(), "summary task spawned");
        UiUpdate::SummaryStarted
    }

    /// Cancel the current summary task if one is running.
    pub fn cancel_summary_task(&mut self) {
        if let Some(handle) = self.current_summary_task.take() {
            handle.abort();
            info!("cancelled previous summary task");
        }
    }

    /// Handle a completion event from a summary task. Events from stale
    /// generations (superseded requests) are discarded.
    pub fn handle_summary_event(&mut self, event: SummaryEvent) -> Option<UiUpdate> {
        if event.generation() != self.summary_generation {
            info!(
                stale = event.generation(),
                current = self.summary_generation,
                "discarding stale summary event"
            );
            return None;
        }

        match event {
            SummaryEvent::Completed { text, .. } => Some(UiUpdate::SummaryReady { text }),
            SummaryEvent::Failed { message, .. } => {
                warn!("summary generation failed: {message}");
                Some(UiUpdate::SummaryFailed { message })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Performs the implicit startup year selection (latest configured season),
/// then listens on two channels with `tokio::select!`: user commands from
/// the TUI and completion events from summary tasks. Every failure path
/// ends in a `UiUpdate`, never in loop termination.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut summary_rx: mpsc::Receiver<SummaryEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("application event loop started");

    let _ = ui_tx
        .send(UiUpdate::SummaryAvailability {
            enabled: state.llm_client.is_enabled(),
        })
        .await;

    // Implicit startup transition: Idle -> Loaded/Error for the default year.
    let startup_year = state.selection.year;
    if let Some(update) = state.select_year(startup_year).await {
        let _ = ui_tx.send(update).await;
    }

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("quit command received, shutting down");
                        break;
                    }
                    Some(UserCommand::SelectYear(year)) => {
                        if let Some(update) = state.select_year(year).await {
                            let _ = ui_tx.send(update).await;
                        }
                    }
                    Some(UserCommand::SelectTeam(team)) => {
                        let update = state.select_team(team);
                        let _ = ui_tx.send(update).await;
                    }
                    Some(UserCommand::SelectRound(round)) => {
                        let update = state.select_round(round);
                        let _ = ui_tx.send(update).await;
                    }
                    Some(UserCommand::RequestSummary) => {
                        let update = state.request_summary();
                        let _ = ui_tx.send(update).await;
                    }
                    None => {
                        info!("command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Summary task events ---
            event = summary_rx.recv() => {
                match event {
                    Some(event) => {
                        if let Some(update) = state.handle_summary_event(event) {
                            let _ = ui_tx.send(update).await;
                        }
                    }
                    None => {
                        info!("summary channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    state.cancel_summary_task();
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
