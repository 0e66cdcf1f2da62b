// Year/team/round selector lists.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

/// Render one selector list with the current choice highlighted.
///
/// The focused selector gets a cyan border and a bold highlight so the user
/// can tell which list Up/Down will move.
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[String],
    selected: usize,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list_items: Vec<ListItem> = items.iter().map(|i| ListItem::new(i.as_str())).collect();

    let highlight = if focused {
        Style::default()
            .bg(Color::Cyan)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        )
        .highlight_style(highlight);

    let mut state = ListState::default();
    state.select(Some(selected.min(items.len().saturating_sub(1))));

    frame.render_stateful_widget(list, area, &mut state);
}
