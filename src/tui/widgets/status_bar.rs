// Top status bar: loaded season, result counts, and the last error.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Compose the status line text.
pub fn status_text(
    loaded_year: Option<i32>,
    season_total: usize,
    filtered_count: usize,
    summary_enabled: bool,
    fetch_error: Option<&str>,
) -> String {
    let season = match loaded_year {
        Some(year) => format!("Draft {year}: {filtered_count}/{season_total} picks"),
        None => "No season loaded".to_string(),
    };
    let ai = if summary_enabled { "AI: ready" } else { "AI: off" };

    match fetch_error {
        Some(err) => format!(" {season} | {ai} | ERROR: {err}"),
        None => format!(" {season} | {ai}"),
    }
}

pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    loaded_year: Option<i32>,
    season_total: usize,
    filtered_count: usize,
    summary_enabled: bool,
    fetch_error: Option<&str>,
) {
    let text = status_text(
        loaded_year,
        season_total,
        filtered_count,
        summary_enabled,
        fetch_error,
    );

    let fg = if fetch_error.is_some() {
        Color::Red
    } else {
        Color::White
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(fg),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
