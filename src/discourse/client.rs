// Discourse API HTTP client.
// Builds request URLs from the configured base and returns raw responses without judging status.

use std::time::Duration;

use reqwest::{
    Client, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ForumError, Result};

/// A response as received: status, final URL and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON. Fails with [`ForumError::Status`] on a non-2xx status.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(ForumError::Status {
                status: self.status,
                url: self.url.clone(),
            });
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Anything that can GET a path relative to the forum base URL.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse>;
}

/// Read-only Discourse client.
pub struct DiscourseClient {
    client: Client,
    base_url: Url,
}

impl DiscourseClient {
    /// Create a client for `base_url` with an explicit request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("forum-stats"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ForumError::Network)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url.clone(), config.request_timeout)
    }

    /// Join `path` onto the base URL and append the query, if any.
    pub fn url_for(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ForumError::Config(format!("invalid path {}: {}", path, e)))?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

impl Fetch for DiscourseClient {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        let url = self.url_for(path, query)?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            warn!(status, %url, "non-success response");
        }

        Ok(RawResponse { status, url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DiscourseClient {
        DiscourseClient::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_without_query() {
        let client = client("https://discuss.streamlit.io");
        let url = client.url_for("categories.json", &[]).unwrap();
        assert_eq!(url.as_str(), "https://discuss.streamlit.io/categories.json");
    }

    #[test]
    fn test_url_with_query() {
        let client = client("https://discuss.streamlit.io/");
        let url = client
            .url_for("latest.json", &[("page", 2.to_string()), ("order", "a b".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://discuss.streamlit.io/latest.json?page=2&order=a+b"
        );
    }

    #[test]
    fn test_json_rejects_error_status() {
        let response = RawResponse {
            status: 404,
            url: "https://example.com/latest.json".to_string(),
            body: "{}".to_string(),
        };
        assert!(!response.is_success());
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(ForumError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_json_decodes_body() {
        let response = RawResponse {
            status: 200,
            url: "https://example.com/posts.json".to_string(),
            body: r#"{"latest_posts": []}"#.to_string(),
        };
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["latest_posts"], serde_json::json!([]));

        let garbage = RawResponse {
            body: "<html>".to_string(),
            ..response
        };
        assert!(matches!(
            garbage.json::<serde_json::Value>(),
            Err(ForumError::Json(_))
        ));
    }
}
