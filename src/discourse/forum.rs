// Cached access to the Discourse listing endpoints.
// Every fetch and every normalization goes through the shared response cache.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheKey, Clock, ResponseCache};
use crate::error::Result;
use crate::table::{FromRow, normalize};

use super::client::{Fetch, RawResponse};
use super::types::{LatestResponse, Post, PostsResponse, RawTopic, Topic};

pub const POSTS_PATH: &str = "posts.json";
pub const LATEST_PATH: &str = "latest.json";

/// Default bound on pages walked by the window aggregator.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Forum statistics source: a fetcher plus the cache and clock it runs against.
pub struct Forum<F> {
    fetcher: F,
    cache: Arc<ResponseCache>,
    clock: Arc<dyn Clock>,
    max_pages: Option<u32>,
}

impl<F: Fetch> Forum<F> {
    pub fn new(fetcher: F, cache: Arc<ResponseCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher,
            cache,
            clock,
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }

    /// Bound the aggregator's page walk. `None` walks until a terminal page.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    /// GET `path` with `query`, cached by both.
    pub async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        let key = CacheKey::new("fetch", &(path, query))?;
        self.cache
            .get_or_compute_async(key, || self.fetcher.fetch(path, query))
            .await
    }

    /// One page of the latest posts listing.
    pub async fn latest_posts_page(&self, page: u32) -> Result<Vec<Post>> {
        let response = self.fetch(POSTS_PATH, &[("page", page.to_string())]).await?;
        let body: PostsResponse = response.json()?;

        let key = CacheKey::new("posts_table", &body.latest_posts)?;
        self.cache
            .get_or_compute(key, || normalize(&body.latest_posts, &Post::SCHEMA)?.records())
    }

    /// One page of the latest topics listing, with category names resolved.
    pub async fn latest_topics_page(&self, page: u32) -> Result<Vec<Topic>> {
        let response = self.fetch(LATEST_PATH, &[("page", page.to_string())]).await?;
        let body: LatestResponse = response.json()?;
        let categories = self.categories_by_id().await?;

        let records = &body.topic_list.topics;
        let key = CacheKey::new("topics_table", records)?;
        self.cache.get_or_compute(key, || {
            let raw: Vec<RawTopic> = normalize(records, &RawTopic::SCHEMA)?.records()?;
            debug!(page, count = raw.len(), "normalized topics page");
            Ok(raw.into_iter().map(|t| t.resolve(&categories)).collect())
        })
    }
}
