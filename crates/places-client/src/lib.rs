//! Client for the CDC PLACES county health data API.
//!
//! [`PlacesClient`] ties the HTTP transport ([`HttpFetcher`]) to the loaders in
//! `places-ingest`. Requests carry the Socrata application token in the
//! `X-App-Token` header.
//!
//! ```no_run
//! use places_client::PlacesClient;
//!
//! let client = PlacesClient::new("my-app-token")?;
//! let table = client.get_county_data("2025")?;
//! println!("{} rows", table.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod error;
mod http;

pub use client::PlacesClient;
pub use config::ClientConfig;
pub use error::ConfigError;
pub use http::HttpFetcher;

pub use places_ingest::{DEFAULT_BASE_URL, Endpoints, Fetch};
pub use places_model::{PlacesError, Release, Result, UpstreamError};
