// Time-window aggregation over the paginated latest topics listing.
//
// Pages are walked from 0 until one has no topic newer than the threshold. This relies on
// the listing being ordered by `last_posted_at`, newest first; an upstream that interleaves
// older and newer topics across pages makes the walk stop early.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::cache::CacheKey;
use crate::error::{ForumError, Result};

use super::client::Fetch;
use super::forum::Forum;
use super::types::Topic;

/// Topics whose last post falls inside a window, in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicWindow {
    pub threshold: DateTime<Utc>,
    /// Pages requested, including the terminal one.
    pub pages_fetched: u32,
    pub topics: Vec<Topic>,
}

impl TopicWindow {
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

impl<F: Fetch> Forum<F> {
    /// Topics with a post newer than `now - window`.
    ///
    /// Any page failure aborts the whole walk; there are no partial results.
    pub async fn fetch_topics_within(&self, window: Duration) -> Result<TopicWindow> {
        let key = CacheKey::new("topics_within", &window.num_seconds())?;
        self.cache()
            .get_or_compute_async(key, || self.collect_topics_within(window))
            .await
    }

    async fn collect_topics_within(&self, window: Duration) -> Result<TopicWindow> {
        let threshold = self
            .clock()
            .now()
            .checked_sub_signed(window)
            .ok_or_else(|| {
                ForumError::Config(format!("window of {}s is out of range", window.num_seconds()))
            })?;
        let mut topics = Vec::new();
        let mut page: u32 = 0;

        loop {
            if self.max_pages().is_some_and(|max| page >= max) {
                warn!(pages = page, "page limit reached before window was exhausted");
                return Err(ForumError::PaginationLimitExceeded { pages: page });
            }

            let batch = self.latest_topics_page(page).await?;
            let recent: Vec<Topic> = batch
                .into_iter()
                .filter(|t| t.posted_after(threshold))
                .collect();

            if recent.is_empty() {
                break;
            }

            debug!(page, matched = recent.len(), "topics page in window");
            topics.extend(recent);
            page += 1;
        }

        info!(
            %threshold,
            pages = page + 1,
            topics = topics.len(),
            "collected topics window"
        );

        Ok(TopicWindow {
            threshold,
            pages_fetched: page + 1,
            topics,
        })
    }
}
