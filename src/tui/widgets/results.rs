// Filtered draft picks table.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::stats::DraftRecord;

/// Columns displayed in the results table, in order: (header, record field).
const COLUMNS: &[(&str, &str)] = &[
    ("Pick", "OVERALL_PICK"),
    ("Rnd", "ROUND_NUMBER"),
    ("Player", "PLAYER_NAME"),
    ("Team", "TEAM_NAME"),
    ("From", "ORGANIZATION"),
];

/// Extract the display cells for one record, in column order. Missing
/// fields render as "--".
pub fn row_cells(record: &DraftRecord) -> Vec<String> {
    COLUMNS
        .iter()
        .map(|(_, field)| record.field_str(field).unwrap_or_else(|| "--".to_string()))
        .collect()
}

/// Render the filtered picks, scrolled by `offset` rows. When the filtered
/// result is empty, shows the no-matches message instead of an empty table.
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    filtered: &[DraftRecord],
    offset: usize,
    no_matches_message: &str,
) {
    let title = format!(" Draft Picks ({}) ", filtered.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if filtered.is_empty() {
        let paragraph = Paragraph::new(no_matches_message)
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(
        COLUMNS
            .iter()
            .map(|(name, _)| Cell::from(*name))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = filtered
        .iter()
        .skip(offset)
        .map(|record| Row::new(row_cells(record).into_iter().map(Cell::from).collect::<Vec<_>>()))
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
