// App state and main event loop.
// Manages tabs, keyboard input, and blocking loads of dashboard data.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing::{error, info};

use crate::discourse::{Fetch, Forum, LookbackWindow};
use crate::error::Result;
use crate::state::DashboardState;
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    Categories,
    #[default]
    Topics,
    Posts,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Categories, Tab::Topics, Tab::Posts];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Categories => "Categories",
            Tab::Topics => "Topics",
            Tab::Posts => "Posts",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Categories => Tab::Topics,
            Tab::Topics => Tab::Posts,
            Tab::Posts => Tab::Categories,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Categories => Tab::Posts,
            Tab::Topics => Tab::Categories,
            Tab::Posts => Tab::Topics,
        }
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    pub dashboard: DashboardState,
    /// Drop cached responses and reload every panel on the next frame.
    pub refresh_requested: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(window: LookbackWindow) -> Self {
        Self {
            active_tab: Tab::default(),
            dashboard: DashboardState::new(window),
            refresh_requested: false,
            should_quit: false,
        }
    }

    /// Main event loop. Loads block the loop; a frame showing the loading state
    /// is drawn before each one.
    pub fn run<F: Fetch>(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        forum: &Forum<F>,
        runtime: &Runtime,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if self.refresh_requested {
                self.refresh_requested = false;
                forum.cache().clear();
                self.dashboard.reload();
                continue;
            }
            if self.dashboard.begin_pending() {
                continue;
            }
            if self.dashboard.is_loading() {
                self.load(forum, runtime);
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Fetch every panel that is marked as loading.
    fn load<F: Fetch>(&mut self, forum: &Forum<F>, runtime: &Runtime) {
        let dashboard = &mut self.dashboard;

        if dashboard.categories.is_loading() {
            let result = runtime.block_on(forum.categories_table());
            dashboard.categories = logged("categories", result).into();
        }
        if dashboard.topics.is_loading() {
            let window = dashboard.window;
            info!(days = window.days(), "loading topics window");
            let result = runtime.block_on(forum.fetch_topics_within(window.duration()));
            dashboard.topics = logged("topics", result).into();
        }
        if dashboard.posts.is_loading() {
            let result = runtime.block_on(forum.latest_posts_page(0));
            dashboard.posts = logged("posts", result).into();
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.prev(),
            KeyCode::Left => {
                let window = self.dashboard.window.shorter();
                self.dashboard.set_window(window);
            }
            KeyCode::Right => {
                let window = self.dashboard.window.longer();
                self.dashboard.set_window(window);
            }
            KeyCode::Char('c') => self.dashboard.cycle_category(),
            KeyCode::Char('r') => self.dashboard.toggle_raw(),
            KeyCode::Char('u') => self.refresh_requested = true,
            _ => {}
        }
    }
}

fn logged<T>(panel: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!(panel, error = %e, "load failed");
    }
    result
}
