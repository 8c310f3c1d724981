//! Registry HTTP client.
//!
//! The reconciler talks to the registry through [`RegistryClient`] so that
//! tests can script responses without a server.

use std::time::Duration;

use iar_model::AssetPayload;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// Default HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpRegistryClient`].
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Bearer token sent with every request.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            token: None,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Status and decoded body of a registry response.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryResponse {
    pub status: u16,
    /// JSON body, the raw text as a string when it is not JSON, or null when
    /// empty.
    pub body: Value,
}

impl RegistryResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Decode a response body leniently.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self::new(status, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Identifier assigned by the registry, if the body carries one.
    pub fn resource_id(&self) -> Option<String> {
        match self.body.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// Operations the reconciler needs from a registry.
///
/// An `Err` means no response was received; any HTTP status is `Ok`.
pub trait RegistryClient {
    /// POST a new asset to the collection URL.
    fn create(&self, url: &str, payload: &AssetPayload<'_>) -> Result<RegistryResponse>;

    /// GET a resource URL to check that it still exists.
    fn exists(&self, url: &str) -> Result<RegistryResponse>;

    /// PUT an asset over an existing resource URL.
    fn update(&self, url: &str, payload: &AssetPayload<'_>) -> Result<RegistryResponse>;
}

impl<C: RegistryClient + ?Sized> RegistryClient for &C {
    fn create(&self, url: &str, payload: &AssetPayload<'_>) -> Result<RegistryResponse> {
        (**self).create(url, payload)
    }

    fn exists(&self, url: &str) -> Result<RegistryResponse> {
        (**self).exists(url)
    }

    fn update(&self, url: &str, payload: &AssetPayload<'_>) -> Result<RegistryResponse> {
        (**self).update(url, payload)
    }
}

/// Blocking JSON client for the asset registry.
pub struct HttpRegistryClient {
    /// HTTP client.
    client: Client,
    /// Bearer token sent with every request.
    token: Option<String>,
}

impl HttpRegistryClient {
    pub fn new(options: &UploadOptions) -> Result<Self> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self {
            client,
            token: options.token.clone(),
        })
    }

    fn send(&self, request: RequestBuilder) -> Result<RegistryResponse> {
        let mut request = request
            .header(USER_AGENT, concat!("iar/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        decode(response)
    }
}

fn decode(response: Response) -> Result<RegistryResponse> {
    let status = response.status().as_u16();
    let text = response.text()?;
    debug!(status, bytes = text.len(), "registry response");
    Ok(RegistryResponse::from_text(status, &text))
}

impl RegistryClient for HttpRegistryClient {
    fn create(&self, url: &str, payload: &AssetPayload<'_>) -> Result<RegistryResponse> {
        debug!(url, "POST");
        self.send(self.client.post(url).json(payload))
    }

    fn exists(&self, url: &str) -> Result<RegistryResponse> {
        debug!(url, "GET");
        self.send(self.client.get(url))
    }

    fn update(&self, url: &str, payload: &AssetPayload<'_>) -> Result<RegistryResponse> {
        debug!(url, "PUT");
        self.send(self.client.put(url).json(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_decode_leniently() {
        let json = RegistryResponse::from_text(201, r#"{"id": "d1"}"#);
        assert_eq!(json.resource_id().as_deref(), Some("d1"));
        assert!(json.is_success());

        let text = RegistryResponse::from_text(502, "Bad Gateway");
        assert_eq!(text.body, Value::String("Bad Gateway".to_string()));
        assert_eq!(text.resource_id(), None);

        let empty = RegistryResponse::from_text(404, "");
        assert_eq!(empty.body, Value::Null);
        assert!(empty.is_not_found());
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let response = RegistryResponse::from_text(200, r#"{"id": 42}"#);
        assert_eq!(response.resource_id().as_deref(), Some("42"));
    }
}
