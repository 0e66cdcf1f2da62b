// AI summary panel.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::protocol::SummaryStatus;

/// Render the summary panel: generated prose, a pending spinner line, or
/// the failure text, depending on status.
pub fn render_summary(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    status: SummaryStatus,
    enabled: bool,
    scroll: usize,
) {
    let (title, style) = match status {
        SummaryStatus::Idle => (" AI Summary ", Style::default()),
        SummaryStatus::Pending => (" AI Summary (generating...) ", Style::default().fg(Color::Cyan)),
        SummaryStatus::Complete => (" AI Summary ", Style::default()),
        SummaryStatus::Error => (" AI Summary (failed) ", Style::default().fg(Color::Red)),
    };

    let content = if !text.is_empty() {
        text.to_string()
    } else if !enabled {
        "Summary generation is disabled (no API key configured). \
         Draft browsing is unaffected."
            .to_string()
    } else {
        match status {
            SummaryStatus::Pending => "Waiting for the model...".to_string(),
            _ => "Press 's' to generate an AI summary of the filtered picks.".to_string(),
        }
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(paragraph, area);
}
