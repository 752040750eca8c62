//! Departure feed error types

use thiserror::Error;

/// Errors that can occur while fetching departures
#[derive(Debug, Error)]
pub enum DepartureFeedError {
    /// Connection to the departures service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The departures service answered with a non-success status
    #[error("Request failed with HTTP {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// The response body was not a well-formed departures document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl DepartureFeedError {
    /// True when the feed could not be reached or refused the request
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed { .. } | Self::Timeout { .. }
        )
    }

    /// True when the feed answered but the document could not be read
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }
}
