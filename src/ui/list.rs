// File list rendering.
// Grouped project sections with loading and empty states.

use ratatui::{prelude::*, widgets::*};

use crate::figma::ProjectFiles;
use crate::format::TimeAgo;
use crate::state::{FileListState, Row};

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Highlight used by every selectable list.
pub fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn row_item<'a>(row: Row<'a>, time_ago: &TimeAgo) -> ListItem<'a> {
    match row {
        Row::Section { name, files } => ListItem::new(Line::from(vec![
            Span::styled(
                name,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", files), Style::default().fg(Color::DarkGray)),
        ])),
        Row::File(file) => ListItem::new(Line::from(vec![
            Span::raw("  "),
            Span::raw(file.name.as_str()),
            Span::raw("  "),
            Span::styled(
                time_ago.format(&file.last_modified),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
    }
}

/// Render the team's files grouped by project.
pub fn render_file_list(
    frame: &mut Frame,
    area: Rect,
    sections: &[ProjectFiles],
    list: &mut FileListState,
    time_ago: &TimeAgo,
    loading: bool,
) {
    let block = Block::default().borders(Borders::ALL).title(" Files ");
    let rows = list.rows(sections);

    if rows.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if loading {
            render_loading(frame, inner, "Loading files");
        } else if list.filter().is_empty() {
            render_empty(frame, inner, "No files found");
        } else {
            render_empty(frame, inner, "No files match the filter");
        }
        return;
    }

    let items: Vec<ListItem> = rows.into_iter().map(|row| row_item(row, time_ago)).collect();
    let list_widget = List::new(items)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut list.list_state);
}
