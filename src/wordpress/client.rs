//! Blocking HTTP client for the WordPress REST API.
//!
//! Authentication uses HTTP Basic with a WordPress application password.
//! Every call targets `{site}/wp-json/wp/v2/{rest_base}`; the rest base
//! defaults to `posts` and can be switched for custom post types.

use std::time::Duration;

use crate::batch::SubmitError;
use crate::config::WpConfig;
use crate::error::PressmapError;
use crate::wordpress::PostPayload;

/// How much of an error response body to keep in error messages.
const BODY_SNIPPET_LEN: usize = 200;

impl SubmitError {
    fn http(status: u16, body: &str) -> Self {
        let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
        Self {
            status: Some(status),
            detail: format!("HTTP {}: {}", status, snippet.trim()),
        }
    }

    fn transport(err: &reqwest::Error) -> Self {
        Self {
            status: None,
            detail: format!("network error: {}", err),
        }
    }
}

/// Ensure the site URL has a scheme and no trailing slash.
pub fn normalize_site_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Client for one WordPress site.
pub struct WpClient {
    http: reqwest::blocking::Client,
    base_url: String,
    rest_base: String,
    username: String,
    app_password: String,
}

impl WpClient {
    /// Build a client from connection settings. `rest_base` selects the
    /// post-type collection (`posts` for standard posts).
    pub fn new(config: &WpConfig, rest_base: &str) -> Result<Self, PressmapError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PressmapError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: normalize_site_url(&config.site_url),
            rest_base: rest_base.to_string(),
            username: config.username.clone(),
            app_password: config.app_password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/wp-json/wp/v2/{}", self.base_url, self.rest_base)
    }

    /// Cheap reachability and credential check before a batch starts:
    /// fetches the site's post-type index.
    pub fn check_connection(&self) -> Result<(), SubmitError> {
        let url = format!("{}/wp-json/wp/v2/types", self.base_url);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.app_password))
            .send()
            .map_err(|e| SubmitError::transport(&e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().unwrap_or_default();
            Err(SubmitError::http(status.as_u16(), &body))
        }
    }

    /// Create a new post from the payload, returning the created post id.
    pub fn create_post(&self, payload: &PostPayload) -> Result<u64, SubmitError> {
        self.send_post(&self.collection_url(), payload)
    }

    /// Update an existing post. WordPress accepts POST on the item route.
    pub fn update_post(&self, id: u64, payload: &PostPayload) -> Result<u64, SubmitError> {
        self.send_post(&format!("{}/{}", self.collection_url(), id), payload)
    }

    /// Find a post id by exact slug, across all statuses. `None` when no
    /// post carries the slug.
    pub fn find_post_by_slug(&self, slug: &str) -> Result<Option<u64>, SubmitError> {
        let url = self.collection_url();
        let response = self
            .http
            .get(&url)
            .query(&[("slug", slug), ("status", "any"), ("per_page", "1")])
            .basic_auth(&self.username, Some(&self.app_password))
            .send()
            .map_err(|e| SubmitError::transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SubmitError::http(status.as_u16(), &body));
        }

        let posts: serde_json::Value = response.json().map_err(|e| SubmitError {
            status: Some(status.as_u16()),
            detail: format!("unreadable response body: {}", e),
        })?;
        Ok(posts
            .as_array()
            .and_then(|a| a.first())
            .and_then(|p| p.get("id"))
            .and_then(serde_json::Value::as_u64))
    }

    fn send_post(&self, url: &str, payload: &PostPayload) -> Result<u64, SubmitError> {
        let response = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.app_password))
            .json(payload)
            .send()
            .map_err(|e| SubmitError::transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SubmitError::http(status.as_u16(), &body));
        }

        let body: serde_json::Value = response.json().map_err(|e| SubmitError {
            status: Some(status.as_u16()),
            detail: format!("unreadable response body: {}", e),
        })?;
        body.get("id")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| SubmitError {
                status: Some(status.as_u16()),
                detail: "response carried no post id".to_string(),
            })
    }
}
