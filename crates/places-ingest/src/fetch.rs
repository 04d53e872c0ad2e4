//! The fetch capability loaders are parameterized over.

use std::cell::RefCell;

use places_model::{RawRecord, UpstreamError};
use serde_json::Value;

/// Retrieves a sequence of raw records from a URL.
///
/// Implementations own every HTTP concern (authentication, transport, status handling)
/// and report failures as [`UpstreamError`].
pub trait Fetch {
    /// Fetches `url` with optional query `params`.
    fn fetch(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Vec<RawRecord>, UpstreamError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Vec<RawRecord>, UpstreamError> {
        (**self).fetch(url, params)
    }
}

/// A [`Fetch`] that serves canned records and remembers which URLs were requested.
///
/// Useful for offline fixtures and for asserting that an operation did not reach the network.
#[derive(Debug, Default)]
pub struct StaticFetch {
    records: Vec<RawRecord>,
    requests: RefCell<Vec<String>>,
}

impl StaticFetch {
    /// Serves `records` for every request.
    #[must_use]
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            requests: RefCell::default(),
        }
    }

    /// Serves the objects of a JSON array.
    pub fn from_json(value: Value) -> std::result::Result<Self, UpstreamError> {
        let records =
            serde_json::from_value(value).map_err(|e| UpstreamError::Decode {
                url: "static".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(records))
    }

    /// URLs requested so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetch for StaticFetch {
    fn fetch(
        &self,
        url: &str,
        _params: &[(&str, &str)],
    ) -> std::result::Result<Vec<RawRecord>, UpstreamError> {
        self.requests.borrow_mut().push(url.to_string());
        Ok(self.records.clone())
    }
}
