// UI module for rendering the TUI.
// Contains the tab bar, tables, charts and per-panel loading and error states.

mod charts;
mod tables;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::LoadingState;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);
}

/// Draw the main content area based on active tab.
fn draw_content(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.dashboard;
    match app.active_tab {
        Tab::Categories => match &dashboard.categories {
            LoadingState::Loaded(categories) => tables::render_categories(frame, categories, area),
            other => render_state(frame, other, " Categories ", "categories", area),
        },
        Tab::Topics => match &dashboard.topics {
            LoadingState::Loaded(window) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(1)])
                    .split(area);
                charts::render_summary(frame, dashboard, window, chunks[0]);
                if dashboard.show_raw {
                    tables::render_topics(frame, &window.topics, chunks[1]);
                } else if window.is_empty() {
                    render_empty(frame, " Topics ", "No topics in this window", chunks[1]);
                } else {
                    charts::render_topic_charts(frame, dashboard, window, chunks[1]);
                }
            }
            other => {
                let title = format!(" Topics, last {} ", dashboard.window.label());
                render_state(frame, other, &title, "topics", area)
            }
        },
        Tab::Posts => match &dashboard.posts {
            LoadingState::Loaded(posts) if posts.is_empty() => {
                render_empty(frame, " Latest posts ", "No posts", area)
            }
            LoadingState::Loaded(posts) => tables::render_posts(frame, posts, area),
            other => render_state(frame, other, " Latest posts ", "posts", area),
        },
    }
}

/// Render a panel that has nothing loaded yet, or failed to load.
fn render_state<T>(frame: &mut Frame, state: &LoadingState<T>, title: &str, what: &str, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let (text, color) = match state {
        LoadingState::Idle => (format!("Waiting to load {}", what), Color::DarkGray),
        LoadingState::Loading => (format!("⏳ Loading {}...", what), Color::Yellow),
        LoadingState::Error(e) => (format!("❌ Failed to load {}: {}", what, e), Color::Red),
        LoadingState::Loaded(_) => (String::new(), Color::White),
    };
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_empty(frame: &mut Frame, title: &str, message: &str, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let text = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" Tab "),
        Span::styled("Switch", Style::default().fg(Color::DarkGray)),
    ];
    if app.active_tab == Tab::Topics {
        hints.extend([
            Span::raw("  ←→ "),
            Span::styled("Window", Style::default().fg(Color::DarkGray)),
            Span::raw("  c "),
            Span::styled("Category", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Raw table", Style::default().fg(Color::DarkGray)),
        ]);
    }
    hints.extend([
        Span::raw("  u "),
        Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ]);

    if app.dashboard.is_loading() {
        hints.push(Span::styled("  ⏳ loading", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
