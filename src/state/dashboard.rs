// Dashboard state.
// Tracks what each panel has loaded and the user's current window and filter choices.

use crate::discourse::{CategoryTable, LookbackWindow, Post, TopicWindow};
use crate::error::Result;

/// Loading state for data fetched on demand.
#[derive(Debug, Clone)]
pub enum LoadingState<T> {
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> Default for LoadingState<T> {
    fn default() -> Self {
        LoadingState::Idle
    }
}

impl<T> LoadingState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadingState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Idle becomes Loading. Returns whether anything changed.
    fn begin(&mut self) -> bool {
        if self.is_idle() {
            *self = LoadingState::Loading;
            true
        } else {
            false
        }
    }
}

impl<T> From<Result<T>> for LoadingState<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => LoadingState::Loaded(data),
            Err(e) => LoadingState::Error(e.to_string()),
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub categories: LoadingState<CategoryTable>,
    pub topics: LoadingState<TopicWindow>,
    pub posts: LoadingState<Vec<Post>>,
    /// Lookback window for the topics panel.
    pub window: LookbackWindow,
    /// Category the time charts are restricted to.
    pub category_filter: Option<String>,
    /// Show the raw topics table instead of charts.
    pub show_raw: bool,
}

impl DashboardState {
    pub fn new(window: LookbackWindow) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }

    /// Move every idle panel to Loading. Returns whether any did.
    pub fn begin_pending(&mut self) -> bool {
        let categories = self.categories.begin();
        let topics = self.topics.begin();
        let posts = self.posts.begin();
        categories || topics || posts
    }

    pub fn is_loading(&self) -> bool {
        self.categories.is_loading() || self.topics.is_loading() || self.posts.is_loading()
    }

    /// Change the lookback window; the topics panel reloads if it changed.
    pub fn set_window(&mut self, window: LookbackWindow) {
        if window != self.window {
            self.window = window;
            self.topics = LoadingState::Idle;
        }
    }

    /// Step the category filter: all, then each category name in order, then back to all.
    pub fn cycle_category(&mut self) {
        let names: Vec<&str> = match self.categories.data() {
            Some(table) => table.iter().map(|c| c.name.as_str()).collect(),
            None => return,
        };

        let next = match &self.category_filter {
            None => names.first().copied(),
            Some(current) => names
                .iter()
                .position(|n| *n == current.as_str())
                .and_then(|i| names.get(i + 1).copied()),
        };
        self.category_filter = next.map(str::to_string);
    }

    pub fn toggle_raw(&mut self) {
        self.show_raw = !self.show_raw;
    }

    /// Drop everything so the next frame reloads all panels.
    pub fn reload(&mut self) {
        self.categories = LoadingState::Idle;
        self.topics = LoadingState::Idle;
        self.posts = LoadingState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discourse::Category;
    use crate::error::ForumError;

    fn categories(names: &[&str]) -> CategoryTable {
        CategoryTable::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Category {
                    id: i as u64,
                    name: name.to_string(),
                    topic_count: 0,
                    post_count: 0,
                    topics_day: 0,
                    topics_week: 0,
                    topics_month: 0,
                    topics_year: 0,
                    topics_all_time: 0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_begin_pending_once() {
        let mut state = DashboardState::default();
        assert!(state.begin_pending());
        assert!(state.is_loading());
        assert!(!state.begin_pending());

        state.categories = LoadingState::from(Ok::<_, ForumError>(categories(&["Bugs"])));
        state.topics = LoadingState::from(Err::<TopicWindow, _>(ForumError::Config("x".into())));
        state.posts = LoadingState::Loaded(Vec::new());
        assert!(!state.is_loading());
        assert!(matches!(&state.topics, LoadingState::Error(msg) if msg.contains("x")));
    }

    #[test]
    fn test_set_window_invalidates_topics() {
        let mut state = DashboardState::default();
        state.topics = LoadingState::Error("stale".into());

        state.set_window(state.window);
        assert!(!state.topics.is_idle());

        state.set_window(state.window.longer());
        assert!(state.topics.is_idle());
        assert_eq!(state.window.days(), 10);
    }

    #[test]
    fn test_cycle_category() {
        let mut state = DashboardState::default();
        state.cycle_category();
        assert_eq!(state.category_filter, None);

        state.categories = LoadingState::Loaded(categories(&["Bugs", "Deployment"]));
        state.cycle_category();
        assert_eq!(state.category_filter.as_deref(), Some("Bugs"));
        state.cycle_category();
        assert_eq!(state.category_filter.as_deref(), Some("Deployment"));
        state.cycle_category();
        assert_eq!(state.category_filter, None);
    }

    #[test]
    fn test_reload() {
        let mut state = DashboardState::default();
        state.begin_pending();
        state.reload();
        assert!(state.categories.is_idle() && state.topics.is_idle() && state.posts.is_idle());
    }
}
