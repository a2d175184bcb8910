use thiserror::Error;

/// Failures at the recommender boundary.
///
/// Each variant maps to a stable [`code`](UpstreamError::code) so callers can
/// pick a backoff policy without parsing messages. Messages never include raw
/// upstream response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The service throttled the caller (HTTP 429).
    #[error("recommender rate limit exceeded")]
    RateLimited {
        /// Seconds to wait before retrying, when advertised.
        retry_after_secs: Option<u64>,
    },
    /// The account has run out of credit or quota (HTTP 402).
    #[error("recommender quota exhausted")]
    QuotaExceeded,
    /// Credentials were missing or refused (HTTP 401/403).
    #[error("recommender rejected the credentials")]
    Unauthorized,
    /// Any other non-success HTTP status.
    #[error("recommender request failed with status {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },
    /// The request did not complete in time.
    #[error("recommender request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service could not be reached.
    #[error("recommender unreachable: {message}")]
    Network {
        /// Transport-level description.
        message: String,
    },
    /// The reply could not be interpreted as a list of destinations.
    #[error("recommender returned a malformed payload: {message}")]
    MalformedPayload {
        /// What was wrong with the payload.
        message: String,
    },
}

impl UpstreamError {
    /// Stable, documented identifier for the failure.
    ///
    /// # Examples
    /// ```
    /// use tripwise_core::UpstreamError;
    ///
    /// let err = UpstreamError::RateLimited { retry_after_secs: Some(30) };
    /// assert_eq!(err.code(), "rate_limited");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limited",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Unauthorized => "unauthorized",
            Self::Http { .. } => "upstream_failure",
            Self::Timeout { .. } => "upstream_timeout",
            Self::Network { .. } => "upstream_unreachable",
            Self::MalformedPayload { .. } => "malformed_payload",
        }
    }

    /// Report whether retrying later may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network { .. }
        ) || matches!(self, Self::Http { status } if *status >= 500)
    }
}
