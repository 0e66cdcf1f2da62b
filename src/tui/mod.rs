// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors relevant parts of the application
// state. The controller pushes `UiUpdate` messages over an mpsc channel;
// the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::app::{NO_MATCHES_MESSAGE, SUMMARY_FAILURE_TEXT};
use crate::config::Config;
use crate::filter::{ALL_TEAMS, ROUND_OPTIONS};
use crate::protocol::{SummaryStatus, UiUpdate, UserCommand};
use crate::stats::DraftRecord;
use crate::teams;

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Which panel keyboard navigation currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Years,
    Teams,
    Rounds,
    Results,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Years => Focus::Teams,
            Focus::Teams => Focus::Rounds,
            Focus::Rounds => Focus::Results,
            Focus::Results => Focus::Years,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Years => Focus::Results,
            Focus::Teams => Focus::Years,
            Focus::Rounds => Focus::Teams,
            Focus::Results => Focus::Rounds,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the controller. The
/// `render_frame` function reads this struct to draw the dashboard.
pub struct ViewState {
    /// Selectable years, newest first.
    pub years: Vec<i32>,
    pub year_index: usize,
    /// "All Teams" plus every franchise name.
    pub team_options: Vec<String>,
    pub team_index: usize,
    /// "All Rounds" plus rounds "0".."10".
    pub round_options: Vec<String>,
    pub round_index: usize,
    pub focus: Focus,
    /// Filtered records currently on display.
    pub filtered: Vec<DraftRecord>,
    /// Total rows in the loaded season (pre-filter).
    pub season_total: usize,
    pub loaded_year: Option<i32>,
    /// Last fetch error, shown in the status bar until the next successful
    /// load.
    pub fetch_error: Option<String>,
    pub summary_text: String,
    pub summary_status: SummaryStatus,
    /// Detail message for the last summary failure.
    pub summary_error: Option<String>,
    pub summary_enabled: bool,
    pub results_scroll: usize,
    pub summary_scroll: usize,
    pub confirm_quit: bool,
}

impl ViewState {
    /// Build the initial view from config: selector option lists with the
    /// newest year, "All Teams", and "All Rounds" preselected.
    pub fn new(config: &Config) -> Self {
        let years = config.seasons.years();
        let mut team_options = vec![ALL_TEAMS.to_string()];
        team_options.extend(teams::franchise_names().map(str::to_string));
        let round_options: Vec<String> = ROUND_OPTIONS.iter().map(|r| r.to_string()).collect();

        ViewState {
            years,
            year_index: 0,
            team_options,
            team_index: 0,
            round_options,
            round_index: 0,
            focus: Focus::Years,
            filtered: Vec::new(),
            season_total: 0,
            loaded_year: None,
            fetch_error: None,
            summary_text: String::new(),
            summary_status: SummaryStatus::Idle,
            summary_error: None,
            summary_enabled: false,
            results_scroll: 0,
            summary_scroll: 0,
            confirm_quit: false,
        }
    }

    pub fn selected_year(&self) -> i32 {
        self.years[self.year_index.min(self.years.len() - 1)]
    }

    pub fn selected_team(&self) -> &str {
        &self.team_options[self.team_index.min(self.team_options.len() - 1)]
    }

    pub fn selected_round(&self) -> &str {
        &self.round_options[self.round_index.min(self.round_options.len() - 1)]
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::SeasonLoaded {
            year,
            filtered,
            season_total,
        } => {
            state.loaded_year = Some(year);
            state.filtered = filtered;
            state.season_total = season_total;
            state.fetch_error = None;
            state.results_scroll = 0;
        }
        UiUpdate::FilterApplied { filtered } => {
            state.filtered = filtered;
            state.results_scroll = 0;
        }
        UiUpdate::FetchFailed { message, .. } => {
            // Previously loaded records stay on display; only the status
            // line changes.
            state.fetch_error = Some(message);
        }
        UiUpdate::SummaryStarted => {
            state.summary_text.clear();
            state.summary_error = None;
            state.summary_status = SummaryStatus::Pending;
            state.summary_scroll = 0;
        }
        UiUpdate::SummaryReady { text } => {
            state.summary_text = text;
            state.summary_status = SummaryStatus::Complete;
        }
        UiUpdate::SummaryFailed { message } => {
            state.summary_text = SUMMARY_FAILURE_TEXT.to_string();
            state.summary_error = Some(message);
            state.summary_status = SummaryStatus::Error;
        }
        UiUpdate::SummaryAvailability { enabled } => {
            state.summary_enabled = enabled;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render_status_bar(
        frame,
        layout.status_bar,
        state.loaded_year,
        state.season_total,
        state.filtered.len(),
        state.summary_enabled,
        state.fetch_error.as_deref(),
    );

    render_selectors(frame, &layout, state);

    widgets::results::render_results(
        frame,
        layout.results,
        &state.filtered,
        state.results_scroll,
        NO_MATCHES_MESSAGE,
    );

    widgets::summary::render_summary(
        frame,
        layout.summary,
        &state.summary_text,
        state.summary_status,
        state.summary_enabled,
        state.summary_scroll,
    );

    render_help_bar(frame, &layout, state);
}

fn render_selectors(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let year_items: Vec<String> = state.years.iter().map(|y| y.to_string()).collect();
    widgets::selectors::render_selector(
        frame,
        layout.year_selector,
        " Year ",
        &year_items,
        state.year_index,
        state.focus == Focus::Years,
    );
    widgets::selectors::render_selector(
        frame,
        layout.team_selector,
        " Team ",
        &state.team_options,
        state.team_index,
        state.focus == Focus::Teams,
    );
    widgets::selectors::render_selector(
        frame,
        layout.round_selector,
        " Round ",
        &state.round_options,
        state.round_index,
        state.focus == Focus::Rounds,
    );
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.confirm_quit {
        " Quit? y:confirm  n/Esc:cancel"
    } else {
        " Tab:Focus | Up/Down/j/k:Select | s:Summary | [ ]:Scroll summary | q:Quit"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    // Render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // UI updates from the controller
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quitting = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse events, resize events, etc. -- ignore
                    }
                    Some(Err(_)) | None => {
                        // Input error or stream ended -- break out
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CredentialsConfig, LlmConfig, SeasonsConfig, UpstreamConfig};
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            upstream: UpstreamConfig {
                base_url: "https://stats.nba.com/stats".into(),
                league_id: "00".into(),
                timeout_secs: 10,
            },
            seasons: SeasonsConfig {
                latest: 2023,
                earliest: 2020,
            },
            llm: LlmConfig {
                model: "gemini-1.5-flash".into(),
                instruction: None,
            },
            credentials: CredentialsConfig {
                gemini_api_key: None,
            },
        }
    }

    fn record(team: &str) -> DraftRecord {
        let mut fields = serde_json::Map::new();
        fields.insert("TEAM_NAME".into(), json!(team));
        DraftRecord::new(fields)
    }

    #[test]
    fn view_state_initial_selections_are_sentinels() {
        let state = ViewState::new(&test_config());
        assert_eq!(state.years, vec![2023, 2022, 2021, 2020]);
        assert_eq!(state.selected_year(), 2023);
        assert_eq!(state.selected_team(), ALL_TEAMS);
        assert_eq!(state.selected_round(), "All Rounds");
        assert_eq!(state.focus, Focus::Years);
        assert!(state.filtered.is_empty());
        assert!(!state.summary_enabled);
        assert_eq!(state.summary_status, SummaryStatus::Idle);
        assert!(!state.confirm_quit);
    }

    #[test]
    fn view_state_team_options_start_with_sentinel() {
        let state = ViewState::new(&test_config());
        assert_eq!(state.team_options[0], ALL_TEAMS);
        assert!(state
            .team_options
            .iter()
            .any(|t| t == "Los Angeles Lakers"));
    }

    #[test]
    fn focus_cycle_visits_all_panels() {
        let mut focus = Focus::Years;
        let mut seen = vec![focus];
        for _ in 0..3 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![Focus::Years, Focus::Teams, Focus::Rounds, Focus::Results]
        );
        assert_eq!(focus.next(), Focus::Years);
        assert_eq!(Focus::Years.prev(), Focus::Results);
    }

    #[test]
    fn apply_season_loaded_resets_error_and_scroll() {
        let mut state = ViewState::new(&test_config());
        state.fetch_error = Some("old error".into());
        state.results_scroll = 5;

        apply_ui_update(
            &mut state,
            UiUpdate::SeasonLoaded {
                year: 2022,
                filtered: vec![record("Lakers")],
                season_total: 58,
            },
        );

        assert_eq!(state.loaded_year, Some(2022));
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.season_total, 58);
        assert!(state.fetch_error.is_none());
        assert_eq!(state.results_scroll, 0);
    }

    #[test]
    fn apply_fetch_failed_keeps_prior_records() {
        let mut state = ViewState::new(&test_config());
        apply_ui_update(
            &mut state,
            UiUpdate::SeasonLoaded {
                year: 2023,
                filtered: vec![record("Lakers")],
                season_total: 58,
            },
        );

        apply_ui_update(
            &mut state,
            UiUpdate::FetchFailed {
                year: 1999,
                message: "status 500".into(),
            },
        );

        // Display still shows the 2023 data alongside the error.
        assert_eq!(state.loaded_year, Some(2023));
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.fetch_error.as_deref(), Some("status 500"));
    }

    #[test]
    fn apply_filter_applied_replaces_rows() {
        let mut state = ViewState::new(&test_config());
        state.results_scroll = 3;
        apply_ui_update(
            &mut state,
            UiUpdate::FilterApplied {
                filtered: vec![record("Celtics")],
            },
        );
        assert_eq!(state.filtered, vec![record("Celtics")]);
        assert_eq!(state.results_scroll, 0);
    }

    #[test]
    fn summary_lifecycle_updates_status() {
        let mut state = ViewState::new(&test_config());

        apply_ui_update(&mut state, UiUpdate::SummaryStarted);
        assert_eq!(state.summary_status, SummaryStatus::Pending);
        assert!(state.summary_text.is_empty());

        apply_ui_update(
            &mut state,
            UiUpdate::SummaryReady {
                text: "A fine class.".into(),
            },
        );
        assert_eq!(state.summary_status, SummaryStatus::Complete);
        assert_eq!(state.summary_text, "A fine class.");
    }

    #[test]
    fn summary_failure_shows_sentinel_text_and_detail() {
        let mut state = ViewState::new(&test_config());
        apply_ui_update(&mut state, UiUpdate::SummaryStarted);
        apply_ui_update(
            &mut state,
            UiUpdate::SummaryFailed {
                message: "quota exceeded".into(),
            },
        );
        assert_eq!(state.summary_status, SummaryStatus::Error);
        assert_eq!(state.summary_text, SUMMARY_FAILURE_TEXT);
        assert_eq!(state.summary_error.as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn summary_failure_leaves_filtered_rows_displayed() {
        let mut state = ViewState::new(&test_config());
        apply_ui_update(
            &mut state,
            UiUpdate::SeasonLoaded {
                year: 2023,
                filtered: vec![record("Lakers")],
                season_total: 58,
            },
        );
        apply_ui_update(
            &mut state,
            UiUpdate::SummaryFailed {
                message: "network".into(),
            },
        );
        assert_eq!(state.filtered.len(), 1);
    }

    #[test]
    fn summary_availability_toggles_flag() {
        let mut state = ViewState::new(&test_config());
        apply_ui_update(&mut state, UiUpdate::SummaryAvailability { enabled: true });
        assert!(state.summary_enabled);
    }
}
