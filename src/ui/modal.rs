// Modal UI components.
// Page submenu drawn on top of the file list.

use ratatui::{prelude::*, widgets::*};

use super::list::{highlight_style, render_empty, render_loading};
use crate::figma::Node;
use crate::state::{Collection, PageMenu};

/// Centered rectangle of at most `width` x `height` within `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the page submenu of `menu.file`.
pub fn draw_page_menu(frame: &mut Frame, menu: &mut PageMenu, pages: Option<&Collection<Node>>) {
    let modal_area = centered(frame.area(), 60, 16);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Page list
            Constraint::Length(1), // Instructions
        ])
        .split(modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Pages of {} ", menu.file.name));

    let items = pages.map(|c| c.items()).unwrap_or_default();
    let loading = pages.is_none_or(|c| c.is_loading());

    if items.is_empty() {
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        if loading {
            render_loading(frame, inner, "Loading pages");
        } else {
            render_empty(frame, inner, "No pages");
        }
    } else {
        let list_items: Vec<ListItem> = items
            .iter()
            .map(|page| ListItem::new(format!("  {}", page.name)))
            .collect();

        let list_widget = List::new(list_items)
            .block(block)
            .highlight_style(highlight_style())
            .highlight_symbol("> ");

        frame.render_stateful_widget(list_widget, chunks[0], &mut menu.list_state);
    }

    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" = Open page  ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" = Navigate  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Close ", Style::default().fg(Color::DarkGray)),
    ]);

    let instructions_widget = Paragraph::new(instructions)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(instructions_widget, chunks[1]);
}
