// Tab bar rendering.
// Marks the active tab and flags tabs whose panel failed to load.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::LoadingState;

fn has_error(app: &App, tab: Tab) -> bool {
    match tab {
        Tab::Categories => matches!(app.dashboard.categories, LoadingState::Error(_)),
        Tab::Topics => matches!(app.dashboard.topics, LoadingState::Error(_)),
        Tab::Posts => matches!(app.dashboard.posts, LoadingState::Error(_)),
    }
}

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let failed = has_error(app, *tab);
            let title = if failed {
                format!("{} (!)", tab.title())
            } else {
                tab.title().to_string()
            };

            let style = if *tab == app.active_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if failed {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(Span::styled(title, style))
        })
        .collect();

    let selected_index = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" forum-stats ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
