//! High-level client facade.

use places_ingest::{
    Endpoints, Fetch, load_county_data, load_county_release, load_measure_list,
};
use places_model::{MeasureCatalogEntry, Release, Result, Table};

use crate::config::ClientConfig;
use crate::http::HttpFetcher;

/// Entry point for loading PLACES datasets.
///
/// The fetcher is generic so tests and offline tools can substitute canned data for
/// the HTTP transport.
#[derive(Debug, Clone)]
pub struct PlacesClient<F: Fetch = HttpFetcher> {
    fetch: F,
    endpoints: Endpoints,
}

impl PlacesClient<HttpFetcher> {
    /// Creates a client for the public API authenticated with `app_token`.
    pub fn new(app_token: &str) -> Result<Self> {
        Self::from_config(&ClientConfig::new(app_token))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let fetch = HttpFetcher::from_config(config)?;
        tracing::debug!(base_url = %config.base_url, "Created PLACES client");
        Ok(Self::with_fetcher(fetch, config.endpoints()))
    }
}

impl<F: Fetch> PlacesClient<F> {
    pub fn with_fetcher(fetch: F, endpoints: Endpoints) -> Self {
        Self { fetch, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn fetcher(&self) -> &F {
        &self.fetch
    }

    /// Lists the health-outcome and health-risk-behavior measures.
    pub fn get_measure_list(&self) -> Result<Vec<MeasureCatalogEntry>> {
        load_measure_list(&self.fetch, &self.endpoints)
    }

    /// Loads county observations for a release year such as `"2025"`.
    ///
    /// # Errors
    ///
    /// [`PlacesError::InvalidArgument`](places_model::PlacesError::InvalidArgument) for an
    /// unsupported release, before any request is made.
    pub fn get_county_data(&self, release: &str) -> Result<Table> {
        load_county_data(&self.fetch, &self.endpoints, release)
    }

    pub fn get_county_release(&self, release: Release) -> Result<Table> {
        load_county_release(&self.fetch, &self.endpoints, release)
    }
}
