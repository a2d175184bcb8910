//! `Recommender` backed by an OpenAI-compatible chat-completions gateway.
//!
//! The [`Recommender`] trait is synchronous. This provider bridges its async
//! HTTP call to that interface by blocking on a Tokio runtime it owns.

use std::fmt;
use std::time::Duration;

use log::debug;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tripwise_core::{RecommendationBatch, Recommender, TripQuery, UpstreamError};

use super::gateway::{ChatRequest, ChatResponse, parse_recommendations};

/// Errors raised while constructing an [`HttpRecommender`].
#[derive(Debug, Error)]
pub enum RecommenderBuildError {
    /// A required setting was empty.
    #[error("recommender setting `{name}` must not be empty")]
    MissingSetting {
        /// Name of the setting.
        name: &'static str,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for gateway requests.
pub const DEFAULT_USER_AGENT: &str = "tripwise-recommender/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRecommender`].
///
/// The `Debug` output redacts the API key.
#[derive(Clone)]
pub struct HttpRecommenderConfig {
    /// Gateway base URL, e.g. `"https://gateway.example.com/v1"`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier passed through to the gateway.
    pub model: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for HttpRecommenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRecommenderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpRecommenderConfig {
    /// Create a configuration with default timeout and user agent.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn check(&self) -> Result<(), RecommenderBuildError> {
        let settings = [
            ("base_url", &self.base_url),
            ("api_key", &self.api_key),
            ("model", &self.model),
        ];
        match settings.iter().find(|(_, value)| value.trim().is_empty()) {
            Some(&(name, _)) => Err(RecommenderBuildError::MissingSetting { name }),
            None => Ok(()),
        }
    }
}

/// Recommender that asks a chat-completions gateway for destinations.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the recommender blocks on its own
/// current-thread runtime. Inside a multi-threaded runtime it uses that
/// runtime's handle with [`tokio::task::block_in_place`]. Inside a
/// `current_thread` runtime it falls back to its own runtime, which may
/// deadlock if the caller's runtime drives IO this request depends on.
pub struct HttpRecommender {
    client: Client,
    config: HttpRecommenderConfig,
    runtime: Runtime,
}

impl fmt::Debug for HttpRecommender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRecommender")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRecommender {
    /// Create a recommender with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a required setting is empty or if the HTTP client
    /// or Tokio runtime fails to build.
    pub fn with_config(config: HttpRecommenderConfig) -> Result<Self, RecommenderBuildError> {
        config.check()?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(RecommenderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(RecommenderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HttpRecommenderConfig {
        &self.config
    }

    /// The chat-completions endpoint URL.
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn recommend_async(&self, query: &TripQuery) -> Result<RecommendationBatch, UpstreamError> {
        let url = self.completions_url();
        let body = ChatRequest::for_query(&self.config.model, query);
        debug!(
            "requesting recommendations for '{}' from {url}",
            query.start_location
        );

        let sent = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let response = check_status(sent)?;

        let completion: ChatResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                self.timeout_error()
            } else {
                UpstreamError::MalformedPayload {
                    message: "response body is not a chat completion".to_owned(),
                }
            }
        })?;
        let content = completion
            .first_content()
            .ok_or_else(|| UpstreamError::MalformedPayload {
                message: "chat completion has no choices".to_owned(),
            })?;
        parse_recommendations(content)
    }

    fn timeout_error(&self) -> UpstreamError {
        UpstreamError::Timeout {
            timeout_secs: self.config.timeout.as_secs(),
        }
    }

    /// Convert a transport-level reqwest error to an `UpstreamError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            return self.timeout_error();
        }
        if let Some(status) = error.status() {
            return status_error(status, None);
        }
        let message = if error.is_connect() {
            "connection failed"
        } else {
            "request could not be sent"
        };
        UpstreamError::Network {
            message: message.to_owned(),
        }
    }
}

/// Pass successful responses through and map the rest onto `UpstreamError`.
fn check_status(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    Err(status_error(status, retry_after))
}

/// Map a non-success HTTP status onto `UpstreamError`.
fn status_error(status: StatusCode, retry_after_secs: Option<u64>) -> UpstreamError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited { retry_after_secs },
        StatusCode::PAYMENT_REQUIRED => UpstreamError::QuotaExceeded,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => UpstreamError::Unauthorized,
        other => UpstreamError::Http {
            status: other.as_u16(),
        },
    }
}

impl Recommender for HttpRecommender {
    /// Ask the gateway for destinations suited to `query`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded. See the type-level documentation for details.
    fn recommend(&self, query: &TripQuery) -> Result<RecommendationBatch, UpstreamError> {
        let future = self.recommend_async(query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
