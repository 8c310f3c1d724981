//! HTTP client for the institution directory.
//!
//! Searches go to `{base}inst/search` and return JSON of the form
//! `{"result": {"institutions": [{"instid": .., "name": ..}, ..]}}`.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::directory::{Institution, InstitutionDirectory};
use crate::error::{LookupError, Result};

/// Public institution directory API.
pub const DEFAULT_LOOKUP_URL: &str = "https://www.lookup.cam.ac.uk/api/v1/";

/// Username for unauthenticated directory access.
const ANONYMOUS_USER: &str = "anonymous";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    institutions: Vec<Institution>,
}

/// Blocking client for the institution directory search API.
pub struct LookupClient {
    /// HTTP client.
    client: Client,
    /// API root, always ending in `/`.
    base_url: Url,
    /// Basic auth user sent with each request.
    username: Option<String>,
}

impl LookupClient {
    /// Create a client for the directory rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut root = base_url.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let base_url =
            Url::parse(&root).map_err(|err| LookupError::InvalidUrl(format!("{root}: {err}")))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url,
            username: Some(ANONYMOUS_USER.to_string()),
        })
    }

    /// Override the basic auth user (`None` sends no credentials).
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Build the search URL for a query.
    pub fn search_url(&self, query: &str, approximate: bool) -> Result<Url> {
        let mut url = self
            .base_url
            .join("inst/search")
            .map_err(|err| LookupError::InvalidUrl(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("approxMatches", if approximate { "true" } else { "false" })
            .append_pair("format", "json");
        Ok(url)
    }
}

impl InstitutionDirectory for LookupClient {
    fn search(&self, query: &str, approximate: bool) -> Result<Vec<Institution>> {
        let url = self.search_url(query, approximate)?;
        debug!(query, approximate, "searching institution directory");

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, format!("iar-migrate/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json");
        if let Some(username) = &self.username {
            request = request.basic_auth(username, None::<&str>);
        }
        let response = request.send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LookupError::Api { status, message });
        }

        let body = response.text()?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!(
            query,
            matches = parsed.result.institutions.len(),
            "directory search complete"
        );
        Ok(parsed.result.institutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let client = LookupClient::new("https://directory.example.org/api/v1").unwrap();
        let url = client.search_url("Department of Foo", true).unwrap();
        assert_eq!(
            url.as_str(),
            "https://directory.example.org/api/v1/inst/search?query=Department+of+Foo&approxMatches=true&format=json"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            LookupClient::new("not a url"),
            Err(LookupError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"result": {"entityCount": 1, "institutions": [{"instid": "FOO", "name": "Department of Foo", "cancelled": false}]}}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.result.institutions,
            vec![Institution::new("FOO", "Department of Foo")]
        );
    }

    #[test]
    fn test_empty_result_parsing() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"result": {}}"#).unwrap();
        assert!(parsed.result.institutions.is_empty());
    }
}
