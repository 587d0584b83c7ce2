// Topic charts: time-of-week and time-of-day bins, category counts and size histograms.

use ratatui::{prelude::*, widgets::*};

use crate::discourse::TopicWindow;
use crate::state::DashboardState;
use crate::state::stats::{self, Summary, TimeField};

const MAX_BINS: usize = 20;

fn bar_chart<'a>(title: String, data: &'a [(String, u64)], bar_width: u16) -> BarChart<'a> {
    let bars: Vec<Bar> = data
        .iter()
        .map(|(label, value)| Bar::default().label(Line::from(label.as_str())).value(*value))
        .collect();

    BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
}

/// Widest bar that fits `count` bars with gaps in `area`.
fn fit_width(area: Rect, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let inner = area.width.saturating_sub(2);
    (inner / count as u16).saturating_sub(1).clamp(1, 9)
}

fn time_chart(frame: &mut Frame, title: String, data: &[(String, u64)], area: Rect) {
    frame.render_widget(bar_chart(title, data, fit_width(area, data.len())), area);
}

/// Most recent bins that fit `area` with bars wide enough for a `MM-DD` label.
fn recent_days(area: Rect, data: &[(String, u64)]) -> &[(String, u64)] {
    let fits = (area.width.saturating_sub(2) / 6).max(1) as usize;
    &data[data.len().saturating_sub(fits)..]
}

pub fn render_summary(frame: &mut Frame, state: &DashboardState, window: &TopicWindow, area: Rect) {
    let summary = Summary::of(&window.topics);
    let filter = state.category_filter.as_deref().unwrap_or("all");

    let line = Line::from(vec![
        Span::styled(" Window ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.window.label(), Style::default().fg(Color::Yellow)),
        Span::styled("  since ", Style::default().fg(Color::DarkGray)),
        Span::raw(window.threshold.format("%Y-%m-%d %H:%M UTC").to_string()),
        Span::styled("  topics ", Style::default().fg(Color::DarkGray)),
        Span::raw(summary.topics.to_string()),
        Span::styled("  pages ", Style::default().fg(Color::DarkGray)),
        Span::raw(window.pages_fetched.to_string()),
        Span::styled("  views ", Style::default().fg(Color::DarkGray)),
        Span::raw(summary.views.to_string()),
        Span::styled("  posts ", Style::default().fg(Color::DarkGray)),
        Span::raw(summary.posts.to_string()),
        Span::styled("  likes ", Style::default().fg(Color::DarkGray)),
        Span::raw(summary.likes.to_string()),
        Span::styled("  category ", Style::default().fg(Color::DarkGray)),
        Span::styled(filter.to_string(), Style::default().fg(Color::Magenta)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Grid of charts for the loaded window.
pub fn render_topic_charts(
    frame: &mut Frame,
    state: &DashboardState,
    window: &TopicWindow,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    let filtered = stats::filter_by_category(&window.topics, state.category_filter.as_deref());

    for (row, field) in [TimeField::LastPosted, TimeField::Created].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(40),
            ])
            .split(rows[row]);

        let dates = stats::by_date(&filtered, field);
        let dates = recent_days(cols[0], &dates);
        frame.render_widget(bar_chart(format!(" By {} date ", field.title()), dates, 5), cols[0]);

        let days = stats::by_weekday(&filtered, field);
        time_chart(frame, format!(" By {} day-of-week ", field.title()), &days, cols[1]);

        let hours = stats::by_hour(&filtered, field);
        time_chart(frame, format!(" By {} hour (UTC) ", field.title()), &hours, cols[2]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(rows[2]);

    let categories = stats::by_category(&window.topics);
    let chart = bar_chart(" By category ".to_string(), &categories, 1)
        .direction(Direction::Horizontal)
        .bar_gap(0);
    frame.render_widget(chart, bottom[0]);

    let likes: Vec<u64> = window.topics.iter().map(|t| t.like_count).collect();
    let likes = stats::histogram(&likes, MAX_BINS);
    time_chart(frame, " By likes ".to_string(), &likes, bottom[1]);

    let posts: Vec<u64> = window.topics.iter().map(|t| t.posts_count).collect();
    let posts = stats::histogram(&posts, MAX_BINS);
    time_chart(frame, " By number of posts ".to_string(), &posts, bottom[2]);
}
