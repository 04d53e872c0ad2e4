//! Upstream resource routing.

use places_model::{DATA_DICTIONARY_ID, Release};

/// Base URL of the Socrata v3 views API on data.cdc.gov.
pub const DEFAULT_BASE_URL: &str = "https://data.cdc.gov/api/v3/views/";

/// Immutable routing table from resources to query URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Routes requests under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query URL of an arbitrary resource: `<base>/<resource_id>/query.json`.
    #[must_use]
    pub fn resource_url(&self, resource_id: &str) -> String {
        format!(
            "{}/{}/query.json",
            self.base_url.trim_end_matches('/'),
            resource_id
        )
    }

    /// Query URL of the data dictionary.
    #[must_use]
    pub fn data_dictionary_url(&self) -> String {
        self.resource_url(DATA_DICTIONARY_ID)
    }

    /// Query URL of the county dataset for `release`.
    #[must_use]
    pub fn release_url(&self, release: Release) -> String {
        self.resource_url(release.resource_id())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.data_dictionary_url(),
            "https://data.cdc.gov/api/v3/views/m35w-spkz/query.json"
        );
        assert_eq!(
            endpoints.release_url(Release::Y2024),
            "https://data.cdc.gov/api/v3/views/fu4u-a9bh/query.json"
        );
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let endpoints = Endpoints::new("http://localhost:8080/views");
        assert_eq!(
            endpoints.resource_url("abcd-1234"),
            "http://localhost:8080/views/abcd-1234/query.json"
        );
    }
}
