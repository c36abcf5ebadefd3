// UI module for rendering the TUI.
// Header, filter bar, file list, page submenu, status line, and help overlay.

mod list;
mod modal;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, InputMode};
use crate::figma::FigmaApi;
use crate::notify::{ActiveToast, ToastStyle};

/// Main draw function that renders the entire UI.
pub fn draw<A: FigmaApi>(frame: &mut Frame, app: &mut App<A>) {
    let show_filter = app.input_mode == InputMode::Filter || !app.list.filter().is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                      // Header
            Constraint::Length(u16::from(show_filter)), // Filter bar
            Constraint::Min(1),                         // File list
            Constraint::Length(1),                      // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    if show_filter {
        draw_filter_bar(frame, app, chunks[1]);
    }

    list::render_file_list(
        frame,
        chunks[2],
        app.files.items(),
        &mut app.list,
        &app.time_ago,
        app.files.is_loading(),
    );

    draw_status_bar(frame, app, chunks[3]);

    if let Some(menu) = app.menu.as_mut() {
        let pages = app.pages.get(&menu.file.key);
        modal::draw_page_menu(frame, menu, pages);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame, app.dev_mode);
    }
}

/// Draw the title with the loading indicator and snapshot age.
fn draw_header<A: FigmaApi>(frame: &mut Frame, app: &App<A>, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " Figma Files ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("team {}", app.team_id),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if app.files.is_loading() {
        spans.push(Span::styled("  ⏳ Loading", Style::default().fg(Color::Yellow)));
    }
    if let Some(cached_at) = app.files.cached_at() {
        spans.push(Span::styled(
            format!("  cached {}", app.time_ago.format(&cached_at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn draw_filter_bar<A: FigmaApi>(frame: &mut Frame, app: &App<A>, area: Rect) {
    let mut search_line = vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(app.list.filter()),
    ];
    if app.input_mode == InputMode::Filter {
        search_line.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    let filter_widget =
        Paragraph::new(Line::from(search_line)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(filter_widget, area);
}

fn toast_line(active: &ActiveToast) -> Line<'_> {
    let toast = &active.toast;
    let (icon, color) = match toast.style {
        ToastStyle::Animated => ("⏳", Color::Yellow),
        ToastStyle::Success => ("✓", Color::Green),
        ToastStyle::Failure => ("✗", Color::Red),
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color)),
        Span::styled(toast.title.as_str(), Style::default().fg(color)),
    ];
    if let Some(message) = &toast.message {
        spans.push(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Draw the status bar with the current toast or keybinding hints.
fn draw_status_bar<A: FigmaApi>(frame: &mut Frame, app: &App<A>, area: Rect) {
    if let Some(toast) = &app.toast {
        frame.render_widget(Paragraph::new(toast_line(toast)), area);
        return;
    }

    let hints = if app.input_mode == InputMode::Filter {
        vec![
            Span::raw(" Type to filter  ↵ "),
            Span::styled("Done", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Clear", Style::default().fg(Color::DarkGray)),
        ]
    } else if app.menu.is_some() {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Open page", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Close", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        let mut hints = vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Open", Style::default().fg(Color::DarkGray)),
            Span::raw("  b "),
            Span::styled("Browser", Style::default().fg(Color::DarkGray)),
            Span::raw("  c "),
            Span::styled("Copy link", Style::default().fg(Color::DarkGray)),
            Span::raw("  p "),
            Span::styled("Pages", Style::default().fg(Color::DarkGray)),
            Span::raw("  / "),
            Span::styled("Filter", Style::default().fg(Color::DarkGray)),
        ];
        if app.dev_mode {
            hints.push(Span::raw("  X "));
            hints.push(Span::styled("Clear cache", Style::default().fg(Color::DarkGray)));
        }
        hints.push(Span::raw("  ? "));
        hints.push(Span::styled("Help", Style::default().fg(Color::DarkGray)));
        hints.push(Span::raw("  q "));
        hints.push(Span::styled("Quit", Style::default().fg(Color::DarkGray)));
        hints
    };

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn help_entry(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame, dev_mode: bool) {
    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        help_entry("↑/↓ or j/k", "Navigate files"),
        help_entry("Enter", "Open in Figma"),
        help_entry("b", "Open in browser"),
        help_entry("c", "Copy link"),
        help_entry("p", "Show pages"),
        help_entry("/", "Filter by name"),
        help_entry("Esc", "Clear filter / close"),
    ];
    if dev_mode {
        help_text.push(help_entry("X", "Clear cache"));
    }
    help_text.extend([
        help_entry("?", "Show/hide this help"),
        help_entry("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ]);

    let popup_area = modal::centered(frame.area(), 50, help_text.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
