use std::fmt;

use reqwest::Url;

use crate::error::{Result, UploadError};

/// Collection URL of the registry, validated before any upload starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Validate an endpoint URL.
    ///
    /// # Errors
    ///
    /// Fails when the text does not end with `/` or does not parse as a URL.
    pub fn parse(text: &str) -> Result<Self> {
        if !text.ends_with('/') {
            return Err(UploadError::EndpointFormat(text.to_string()));
        }
        Url::parse(text).map_err(|err| UploadError::InvalidUrl(format!("{text}: {err}")))?;
        Ok(Self {
            url: text.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// URL of one registry resource: `{endpoint}{dest_id}/`.
    pub fn item_url(&self, dest_id: &str) -> String {
        format!("{}{dest_id}/", self.url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_trailing_separator() {
        let err = Endpoint::parse("https://iar.example/assets").unwrap_err();
        assert!(matches!(err, UploadError::EndpointFormat(_)));
    }

    #[test]
    fn rejects_non_urls() {
        let err = Endpoint::parse("not a url/").unwrap_err();
        assert!(matches!(err, UploadError::InvalidUrl(_)));
    }

    #[test]
    fn item_url_appends_id_and_separator() {
        let endpoint = Endpoint::parse("https://iar.example/assets/").unwrap();
        assert_eq!(endpoint.item_url("d1"), "https://iar.example/assets/d1/");
        assert_eq!(endpoint.as_str(), "https://iar.example/assets/");
    }
}
