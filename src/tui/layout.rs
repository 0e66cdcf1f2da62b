// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the explorer dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +----------------+---------------------------------+
// | Year (fill)    | Results (60%)                    |
// +----------------+                                  |
// | Team (fill)    +---------------------------------+
// +----------------+ Summary (40%)                    |
// | Round (fill)   |                                  |
// +----------------+---------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: loaded season, pick counts, summary availability, errors.
    pub status_bar: Rect,
    /// Left sidebar top: draft year selector.
    pub year_selector: Rect,
    /// Left sidebar middle: franchise selector.
    pub team_selector: Rect,
    /// Left sidebar bottom: round selector.
    pub round_selector: Rect,
    /// Right side top: filtered draft picks table.
    pub results: Rect,
    /// Right side bottom: AI summary panel.
    pub summary: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
///
/// The layout uses fixed heights for the status and help bars, with the
/// remaining space split between the selector sidebar and the results
/// column.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // middle section (selectors + results)
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    // Horizontal: selector sidebar (30%) | results column (70%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(middle);

    let sidebar = horizontal[0];
    let results_column = horizontal[1];

    // Sidebar vertical: year (40%) | team (40%) | round (20%)
    let sidebar_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(sidebar);

    let year_selector = sidebar_sections[0];
    let team_selector = sidebar_sections[1];
    let round_selector = sidebar_sections[2];

    // Results column vertical: results (60%) | summary (40%)
    let results_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(results_column);

    let results = results_sections[0];
    let summary = results_sections[1];

    AppLayout {
        status_bar,
        year_selector,
        team_selector,
        round_selector,
        results,
        summary,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
