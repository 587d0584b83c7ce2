// Category resolution.
// Name-indexed category table and id-to-name lookup, both derived from one cached fetch.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::debug;

use crate::cache::CacheKey;
use crate::error::Result;
use crate::table::{FromRow, Schema, normalize};

use super::client::Fetch;
use super::forum::Forum;
use super::types::{CategoriesResponse, Category};

pub const CATEGORIES_PATH: &str = "categories.json";

/// Just enough of a category to label topics.
const ID_NAME_SCHEMA: Schema = Schema::new(&["id", "name"], &[]);

/// Categories in fetch order, looked up by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    categories: Vec<Category>,
    by_name: HashMap<String, usize>,
}

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut by_name = HashMap::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            by_name.entry(category.name.clone()).or_insert(i);
        }
        Self {
            categories,
            by_name,
        }
    }

    /// Look up by name. With duplicate names the first fetched wins.
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.by_name.get(name).map(|&i| &self.categories[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Category id to name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    names: BTreeMap<u64, String>,
}

impl CategoryIndex {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u64, String)>) -> Self {
        Self {
            names: pairs.into_iter().collect(),
        }
    }

    /// Name for `id`, or `None` when the id is unknown.
    pub fn name_of(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<F: Fetch> Forum<F> {
    async fn category_records(&self) -> Result<Vec<Value>> {
        let response = self.fetch(CATEGORIES_PATH, &[]).await?;
        let body: CategoriesResponse = response.json()?;
        Ok(body.category_list.categories)
    }

    /// All categories, indexed by name.
    pub async fn categories_table(&self) -> Result<CategoryTable> {
        let records = self.category_records().await?;
        let key = CacheKey::new("categories_table", &records)?;
        self.cache().get_or_compute(key, || {
            let categories = normalize(&records, &Category::SCHEMA)?.records()?;
            debug!(count = records.len(), "built category table");
            Ok(CategoryTable::new(categories))
        })
    }

    /// Category id to name lookup for annotating topics.
    pub async fn categories_by_id(&self) -> Result<CategoryIndex> {
        let records = self.category_records().await?;
        let key = CacheKey::new("categories_by_id", &records)?;
        self.cache().get_or_compute(key, || {
            let table = normalize(&records, &ID_NAME_SCHEMA)?;
            let pairs = table
                .iter()
                .map(|row| Ok((row.u64("id")?, row.text("name")?.to_string())))
                .collect::<Result<Vec<_>>>()?;
            Ok(CategoryIndex::from_pairs(pairs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discourse::testing::{MockFetcher, forum_with};
    use serde_json::json;

    fn category(id: u64, name: &str, topics: u64) -> Value {
        json!({
            "id": id,
            "name": name,
            "slug": name.to_lowercase(),
            "topic_count": topics,
            "post_count": topics * 3,
            "topics_day": 1,
            "topics_week": 2,
            "topics_month": 3,
            "topics_year": 4,
            "topics_all_time": topics,
        })
    }

    fn categories_body() -> Value {
        json!({"category_list": {"categories": [
            category(5, "Bugs", 10),
            category(7, "Show the Community!", 4),
        ]}})
    }

    #[tokio::test]
    async fn test_categories_table_indexed_by_name() {
        let fetcher = MockFetcher::new().route(CATEGORIES_PATH, &[], categories_body());
        let (forum, _clock) = forum_with(fetcher);

        let table = forum.categories_table().await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Bugs").unwrap().id, 5);
        assert_eq!(table.get("Show the Community!").unwrap().post_count, 12);
        assert!(table.get("Missing").is_none());

        let names: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bugs", "Show the Community!"]);
    }

    #[tokio::test]
    async fn test_by_id_and_table_share_one_fetch() {
        let fetcher = MockFetcher::new().route(CATEGORIES_PATH, &[], categories_body());
        let (forum, _clock) = forum_with(fetcher);

        let index = forum.categories_by_id().await.unwrap();
        let _ = forum.categories_table().await.unwrap();
        let _ = forum.categories_by_id().await.unwrap();

        assert_eq!(index.name_of(5), Some("Bugs"));
        assert_eq!(index.name_of(99), None);
        assert_eq!(forum.fetcher().calls_to(CATEGORIES_PATH), 1);
    }

    #[test]
    fn test_index_keeps_duplicate_names_per_id() {
        let index = CategoryIndex::from_pairs([
            (3, "Using Streamlit".to_string()),
            (1, "Bugs".to_string()),
            (2, "Bugs".to_string()),
        ]);
        assert_eq!(index.name_of(1), Some("Bugs"));
        assert_eq!(index.name_of(2), Some("Bugs"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_table_first_duplicate_wins() {
        let make = |id, name: &str| Category {
            id,
            name: name.to_string(),
            topic_count: 0,
            post_count: 0,
            topics_day: 0,
            topics_week: 0,
            topics_month: 0,
            topics_year: 0,
            topics_all_time: 0,
        };
        let table = CategoryTable::new(vec![make(1, "General"), make(2, "General")]);
        assert_eq!(table.get("General").unwrap().id, 1);
    }
}
