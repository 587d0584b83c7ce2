// Discourse API response types.
// Envelope structs for the listing endpoints and typed records built from normalized rows.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::table::{FromRow, Row, Schema};

use super::categories::CategoryIndex;

/// Envelope of `GET /categories.json`.
#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    pub category_list: CategoryList,
}

#[derive(Debug, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<Value>,
}

/// Envelope of `GET /posts.json`.
#[derive(Debug, Deserialize)]
pub struct PostsResponse {
    pub latest_posts: Vec<Value>,
}

/// Envelope of `GET /latest.json`.
#[derive(Debug, Deserialize)]
pub struct LatestResponse {
    pub topic_list: TopicList,
}

#[derive(Debug, Deserialize)]
pub struct TopicList {
    pub topics: Vec<Value>,
}

/// Forum category with its activity counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub topic_count: u64,
    pub post_count: u64,
    pub topics_day: u64,
    pub topics_week: u64,
    pub topics_month: u64,
    pub topics_year: u64,
    pub topics_all_time: u64,
}

impl FromRow for Category {
    const SCHEMA: Schema = Schema::new(
        &[
            "id",
            "name",
            "topic_count",
            "post_count",
            "topics_day",
            "topics_week",
            "topics_month",
            "topics_year",
            "topics_all_time",
        ],
        &[],
    );

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.u64("id")?,
            name: row.text("name")?.to_string(),
            topic_count: row.u64("topic_count")?,
            post_count: row.u64("post_count")?,
            topics_day: row.u64("topics_day")?,
            topics_week: row.u64("topics_week")?,
            topics_month: row.u64("topics_month")?,
            topics_year: row.u64("topics_year")?,
            topics_all_time: row.u64("topics_all_time")?,
        })
    }
}

/// Topic as listed by `latest.json`, before its category is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTopic {
    pub title: String,
    pub last_posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub category_id: Option<u64>,
    pub views: u64,
    pub posts_count: u64,
    pub like_count: u64,
}

impl FromRow for RawTopic {
    const SCHEMA: Schema = Schema::new(
        &[
            "title",
            "last_posted_at",
            "created_at",
            "category_id",
            "views",
            "posts_count",
            "like_count",
        ],
        &["created_at", "last_posted_at"],
    );

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            title: row.text("title")?.to_string(),
            last_posted_at: row.opt_timestamp("last_posted_at")?,
            created_at: row.timestamp("created_at")?,
            category_id: row.opt_u64("category_id")?,
            views: row.u64("views")?,
            posts_count: row.u64("posts_count")?,
            like_count: row.u64("like_count")?,
        })
    }
}

impl RawTopic {
    /// Attach the category name. Unknown ids leave the category empty.
    pub fn resolve(self, categories: &CategoryIndex) -> Topic {
        let category = self
            .category_id
            .and_then(|id| categories.name_of(id))
            .map(str::to_string);

        Topic {
            title: self.title,
            last_posted_at: self.last_posted_at,
            created_at: self.created_at,
            category,
            views: self.views,
            posts_count: self.posts_count,
            like_count: self.like_count,
        }
    }
}

/// Topic row with a human-readable category.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub title: String,
    pub last_posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub category: Option<String>,
    pub views: u64,
    pub posts_count: u64,
    pub like_count: u64,
}

impl Topic {
    /// Whether the last post is strictly newer than `threshold`.
    pub fn posted_after(&self, threshold: DateTime<Utc>) -> bool {
        self.last_posted_at.is_some_and(|ts| ts > threshold)
    }
}

/// Post from the latest posts listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: u64,
    pub display_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub raw: String,
    pub staff: bool,
    pub reads: u64,
    pub post_number: u64,
}

impl FromRow for Post {
    const SCHEMA: Schema = Schema::new(
        &[
            "id",
            "display_username",
            "created_at",
            "raw",
            "staff",
            "reads",
            "post_number",
        ],
        &["created_at"],
    );

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.u64("id")?,
            display_username: row.opt_text("display_username")?.map(str::to_string),
            created_at: row.timestamp("created_at")?,
            raw: row.text("raw")?.to_string(),
            staff: row.bool("staff")?,
            reads: row.u64("reads")?,
            post_number: row.u64("post_number")?,
        })
    }
}
