//! Blocking HTTP transport for the PLACES API.

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use places_ingest::Fetch;
use places_model::{RawRecord, UpstreamError};

use crate::config::ClientConfig;

/// Header carrying the Socrata application token.
const APP_TOKEN_HEADER: &str = "X-App-Token";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("places-client/", env!("CARGO_PKG_VERSION"));

/// Longest response body excerpt kept on a status error.
const MAX_BODY_EXCERPT: usize = 512;

/// [`Fetch`] implementation backed by a blocking `reqwest` client.
///
/// Every request carries the `X-App-Token` header. A non-success status is reported as
/// [`UpstreamError::Status`] and never parsed as data.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a fetcher that authenticates with `app_token`.
    pub fn new(app_token: &str) -> Result<Self, UpstreamError> {
        Self::from_config(&ClientConfig::new(app_token))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, UpstreamError> {
        let mut token = HeaderValue::from_str(&config.app_token)
            .map_err(|e| UpstreamError::Client(format!("invalid app token: {e}")))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(APP_TOKEN_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::blocking::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Client(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<RawRecord>, UpstreamError> {
        let request_url = build_url(url, params)?;
        tracing::debug!(url = %request_url, params = params.len(), "Fetching PLACES resource");

        let response = self
            .client
            .get(request_url)
            .send()
            .map_err(|e| UpstreamError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| UpstreamError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "PLACES API returned an error status");
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let records = parse_records(url, &body)?;
        tracing::debug!(url, records = records.len(), "Fetched PLACES records");
        Ok(records)
    }
}

fn build_url(url: &str, params: &[(&str, &str)]) -> Result<Url, UpstreamError> {
    let parsed = if params.is_empty() {
        Url::parse(url)
    } else {
        Url::parse_with_params(url, params)
    };
    parsed.map_err(|e| UpstreamError::Client(format!("invalid URL {url}: {e}")))
}

/// Parses a response body holding a JSON array of record objects.
fn parse_records(url: &str, body: &str) -> Result<Vec<RawRecord>, UpstreamError> {
    let decode = |message: String| UpstreamError::Decode {
        url: url.to_string(),
        message,
    };

    let value: Value = serde_json::from_str(body).map_err(|e| decode(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(decode("expected a JSON array of records".to_string()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(decode(format!(
                "record {index} is not an object: {other}"
            ))),
        })
        .collect()
}

fn excerpt(body: &str) -> String {
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
