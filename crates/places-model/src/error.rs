//! Error types shared by the PLACES crates.

use thiserror::Error;

/// Errors surfaced by the PLACES loaders and table operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlacesError {
    /// The caller passed an argument the operation cannot accept.
    ///
    /// Always detected before any network access.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The fetch collaborator reported a failure.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A value in a declared-numeric column could not be read as a number.
    #[error("column '{column}' row {row}: cannot convert {value} to a number")]
    DataFormat {
        /// Numeric column name.
        column: String,
        /// Zero-based row index in the fetched sequence.
        row: usize,
        /// The offending value, rendered as JSON.
        value: String,
    },

    /// A column the operation depends on is absent from a non-empty table.
    #[error("column '{column}' not found in table")]
    MissingColumn {
        /// The missing column name.
        column: String,
    },

    /// DataFrame conversion failed.
    #[error("DataFrame operation failed: {0}")]
    Frame(String),
}

impl PlacesError {
    /// Builds an [`PlacesError::InvalidArgument`].
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`PlacesError::MissingColumn`].
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Returns a short message suitable for a terminal user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidArgument { .. } => "The request was rejected before contacting the API.",
            Self::Upstream(err) => err.user_message(),
            Self::DataFormat { .. } => "The API returned a non-numeric value in a numeric column.",
            Self::MissingColumn { .. } => "The data does not contain a column this operation needs.",
            Self::Frame(_) => "An unexpected error occurred.",
        }
    }
}

/// Failure reported by a fetch implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpstreamError {
    /// The API answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The request never produced a response.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The response body was not a JSON array of objects.
    #[error("response from {url} is not a JSON record array: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error description.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl UpstreamError {
    /// HTTP status code, when the API answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether a caller-side retry might succeed.
    ///
    /// The PLACES crates never retry on their own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Transport { .. } => true,
            Self::Decode { .. } | Self::Client(_) => false,
        }
    }

    /// Returns a short message suitable for a terminal user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Status { status: 401 | 403, .. } => {
                "The API rejected the application token. Check X-App-Token."
            }
            Self::Status { status: 404, .. } => "The requested dataset was not found.",
            Self::Status { .. } => "The API returned an error response.",
            Self::Transport { .. } => {
                "Could not reach data.cdc.gov. Please check your internet connection."
            }
            Self::Decode { .. } => "The API response could not be read.",
            Self::Client(_) => "The HTTP client could not be configured.",
        }
    }
}

/// Result type for PLACES operations.
pub type Result<T> = std::result::Result<T, PlacesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlacesError::missing_column("measureid");
        assert_eq!(err.to_string(), "column 'measureid' not found in table");

        let err = PlacesError::DataFormat {
            column: "data_value".to_string(),
            row: 4,
            value: "\"n/a\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'data_value' row 4: cannot convert \"n/a\" to a number"
        );
    }

    #[test]
    fn test_upstream_passes_through_display() {
        let err: PlacesError = UpstreamError::Status {
            url: "https://data.cdc.gov/x".to_string(),
            status: 503,
            body: String::new(),
        }
        .into();
        assert_eq!(err.to_string(), "https://data.cdc.gov/x returned HTTP 503: ");
        assert!(matches!(err, PlacesError::Upstream(_)));
    }

    #[test]
    fn test_retryable() {
        let status = |status| UpstreamError::Status {
            url: String::new(),
            status,
            body: String::new(),
        };
        assert!(status(500).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(
            UpstreamError::Transport {
                url: String::new(),
                message: "timed out".to_string(),
            }
            .is_retryable()
        );
        assert!(!UpstreamError::Client("bad header".to_string()).is_retryable());
    }

    #[test]
    fn test_user_messages() {
        let err = UpstreamError::Status {
            url: String::new(),
            status: 403,
            body: String::new(),
        };
        assert!(err.user_message().contains("X-App-Token"));
        assert_eq!(err.status(), Some(403));

        let err = PlacesError::invalid_argument("release", "unsupported");
        assert!(err.user_message().contains("before contacting"));
    }
}
