//! Data model for the CDC PLACES client.
//!
//! This crate defines the shapes every other PLACES crate works with:
//!
//! - [`RawRecord`]: a loosely-typed JSON object exactly as the upstream API sends it
//! - [`Record`] / [`Table`]: the normalized, typed row schema with a passthrough side-channel
//! - [`Release`]: the supported yearly releases and their upstream resource identifiers
//! - [`Category`]: the two measure categories the client covers
//! - [`MeasureCatalogEntry`]: one row of the measure catalog
//! - [`PlacesError`]: the shared error taxonomy

mod catalog;
mod category;
mod error;
mod record;
mod release;
mod table;

pub use catalog::MeasureCatalogEntry;
pub use category::{COVERED_CATEGORY_IDS, Category};
pub use error::{PlacesError, Result, UpstreamError};
pub use record::{METADATA_COLUMNS, NUMERIC_COLUMNS, RawRecord, Record, TEXT_COLUMNS};
pub use release::{DATA_DICTIONARY_ID, Release};
pub use table::Table;
