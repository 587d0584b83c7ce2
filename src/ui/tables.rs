// Table views for categories, posts and raw topics.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::discourse::{CategoryTable, Post, Topic};

fn header(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.to_vec()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// First line of `text`, cut to `max` characters.
fn excerpt(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}

pub fn render_categories(frame: &mut Frame, categories: &CategoryTable, area: Rect) {
    let rows = categories.iter().map(|c| {
        Row::new(vec![
            c.name.clone(),
            c.id.to_string(),
            c.topic_count.to_string(),
            c.post_count.to_string(),
            c.topics_day.to_string(),
            c.topics_week.to_string(),
            c.topics_month.to_string(),
            c.topics_year.to_string(),
            c.topics_all_time.to_string(),
        ])
    });

    let widths = [
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header(&[
            "Name", "Id", "Topics", "Posts", "Day", "Week", "Month", "Year", "All time",
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Categories ({}) ", categories.len())),
        );
    frame.render_widget(table, area);
}

pub fn render_posts(frame: &mut Frame, posts: &[Post], area: Rect) {
    let rows = posts.iter().map(|p| {
        let user = Span::styled(
            p.display_username.clone().unwrap_or_default(),
            if p.staff {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            },
        );
        Row::new(vec![
            Cell::from(p.id.to_string()),
            Cell::from(user),
            Cell::from(format_time(&p.created_at)),
            Cell::from(format!("#{}", p.post_number)),
            Cell::from(p.reads.to_string()),
            Cell::from(excerpt(&p.raw, 80)),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Length(16),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["Id", "User", "Created", "No.", "Reads", "Text"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Latest posts ({}) ", posts.len())),
        );
    frame.render_widget(table, area);
}

pub fn render_topics(frame: &mut Frame, topics: &[Topic], area: Rect) {
    let rows = topics.iter().map(|t| {
        Row::new(vec![
            excerpt(&t.title, 60),
            t.last_posted_at.as_ref().map(format_time).unwrap_or_default(),
            format_time(&t.created_at),
            t.category.clone().unwrap_or_default(),
            t.views.to_string(),
            t.posts_count.to_string(),
            t.like_count.to_string(),
        ])
    });

    let widths = [
        Constraint::Min(24),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(20),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header(&[
            "Title", "Last post", "Created", "Category", "Views", "Posts", "Likes",
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Topics ({}) ", topics.len())),
        );
    frame.render_widget(table, area);
}
