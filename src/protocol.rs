// Message types exchanged between the controller, the summary tasks, and
// the TUI render loop.

use crate::stats::DraftRecord;

// ---------------------------------------------------------------------------
// User commands (TUI -> controller)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// A new draft year was selected. Re-fetches only if it differs from the
    /// loaded year.
    SelectYear(i32),
    /// A new team selection (full franchise name or the "All Teams"
    /// sentinel). Filter-only, no fetch.
    SelectTeam(String),
    /// A new round selection ("0".."10" or the "All Rounds" sentinel).
    /// Filter-only, no fetch.
    SelectRound(String),
    /// Request an AI summary of the current filtered result.
    RequestSummary,
    Quit,
}

// ---------------------------------------------------------------------------
// UI updates (controller -> TUI)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A season fetch succeeded. Carries the filtered view of the new
    /// records plus the season's total row count.
    SeasonLoaded {
        year: i32,
        filtered: Vec<DraftRecord>,
        season_total: usize,
    },
    /// A selection change re-filtered the loaded season.
    FilterApplied { filtered: Vec<DraftRecord> },
    /// A season fetch failed. Previously loaded records stay displayed.
    FetchFailed { year: i32, message: String },
    /// A summary task was spawned; clears stale summary text.
    SummaryStarted,
    SummaryReady { text: String },
    SummaryFailed { message: String },
    /// Whether the summary feature is available (API key configured).
    SummaryAvailability { enabled: bool },
}

// ---------------------------------------------------------------------------
// Summary task events (spawned task -> controller)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryEvent {
    Completed { text: String, generation: u64 },
    Failed { message: String, generation: u64 },
}

impl SummaryEvent {
    pub fn generation(&self) -> u64 {
        match self {
            SummaryEvent::Completed { generation, .. } => *generation,
            SummaryEvent::Failed { generation, .. } => *generation,
        }
    }
}

// ---------------------------------------------------------------------------
// Display status
// ---------------------------------------------------------------------------

/// State of the summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStatus {
    Idle,
    Pending,
    Complete,
    Error,
}

/// Session phase with respect to the season fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No data fetched yet.
    Idle,
    /// Records for the loaded year are held.
    Loaded,
    /// The last fetch failed.
    Error,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
