//! PLACES data ingestion.
//!
//! This crate turns upstream JSON records into a typed [`Table`] and loads the two datasets
//! the client cares about. It never talks HTTP itself: loaders take any [`Fetch`]
//! implementation and an [`Endpoints`] routing table.
//!
//! # Example
//!
//! ```
//! use places_ingest::{Endpoints, StaticFetch, load_county_data};
//! use serde_json::json;
//!
//! let fetch = StaticFetch::from_json(json!([
//!     {"measureid": "STROKE", "categoryid": "HLTHOUT", "data_value": "3.7", "locationid": "55039"}
//! ]))
//! .unwrap();
//!
//! let table = load_county_data(&fetch, &Endpoints::default(), "2022").unwrap();
//! assert_eq!(table.rows()[0].data_value, Some(3.7));
//! ```
//!
//! [`Table`]: places_model::Table

mod endpoints;
mod fetch;
mod loaders;
mod normalize;

pub use endpoints::{DEFAULT_BASE_URL, Endpoints};
pub use fetch::{Fetch, StaticFetch};
pub use loaders::{load_county_data, load_county_release, load_measure_list};
pub use normalize::normalize;

pub use places_model::{PlacesError, Result};
