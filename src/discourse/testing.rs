// Test doubles for the fetch seam.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::cache::{DEFAULT_TTL, ManualClock, ResponseCache};
use crate::error::Result;

use super::client::{Fetch, RawResponse};
use super::forum::Forum;

fn route_key<'a>(path: &str, query: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let query: Vec<String> = query.into_iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

/// Serves canned responses and records every request it sees.
#[derive(Default)]
pub struct MockFetcher {
    routes: HashMap<String, RawResponse>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, query: &[(&str, &str)], body: Value) -> Self {
        self.respond(path, query, 200, body.to_string())
    }

    pub fn status(self, path: &str, query: &[(&str, &str)], status: u16) -> Self {
        self.respond(path, query, status, String::from("error"))
    }

    fn respond(mut self, path: &str, query: &[(&str, &str)], status: u16, body: String) -> Self {
        let key = route_key(path, query.iter().copied());
        let response = RawResponse {
            status,
            url: format!("https://forum.test/{}", key),
            body,
        };
        self.routes.insert(key, response);
        self
    }

    /// Number of requests made for `path`, any query.
    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| *p == path)
            .count()
    }
}

impl Fetch for MockFetcher {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        let key = route_key(path, query.iter().map(|(k, v)| (*k, v.as_str())));
        self.calls.lock().unwrap().push(path.to_string());

        Ok(self.routes.get(&key).cloned().unwrap_or_else(|| RawResponse {
            status: 404,
            url: format!("https://forum.test/{}", key),
            body: String::new(),
        }))
    }
}

/// Fixed "now" for forum tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 10, 0, 0, 0).unwrap()
}

/// Forum over `fetcher` with a manual clock set to [`now`] and the default TTL.
pub fn forum_with(fetcher: MockFetcher) -> (Forum<MockFetcher>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(now()));
    let cache = Arc::new(ResponseCache::new(DEFAULT_TTL, clock.clone()));
    (Forum::new(fetcher, cache, clock.clone()), clock)
}
