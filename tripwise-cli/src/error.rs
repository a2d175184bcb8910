//! Error types emitted by the Tripwise CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tripwise_core::{PlanError, ValidationError};
use tripwise_data::recommender::RecommenderBuildError;

/// Errors emitted by the Tripwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag naming the value.
        field: &'static str,
        /// Environment variable carrying the value.
        env: &'static str,
    },
    /// The request path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the value.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The request path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the value.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The request path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the value.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the trip request file failed.
    #[error("failed to open trip request at {path:?}: {source}")]
    OpenTripRequest {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Trip request JSON could not be decoded.
    #[error("failed to parse trip request JSON at {path:?}: {source}")]
    ParseTripRequest {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The trip request failed validation.
    #[error("trip request in {path:?} failed validation: {source}")]
    InvalidTripRequest {
        /// Offending path.
        path: Utf8PathBuf,
        /// The validation failure.
        #[source]
        source: ValidationError,
    },
    /// The request has no destinations and no gateway is configured.
    #[error("request has no destinations; set --{field} or {env} to use a recommender")]
    MissingGateway {
        /// Flag naming the value.
        field: &'static str,
        /// Environment variable carrying the value.
        env: &'static str,
    },
    /// Constructing the recommender failed.
    #[error("failed to build recommender for {base_url:?}: {source}")]
    BuildRecommender {
        /// Gateway base URL.
        base_url: String,
        /// Underlying build failure.
        #[source]
        source: RecommenderBuildError,
    },
    /// Planning failed, including recommender failures.
    #[error("planning failed ({}): {source}", .source.code())]
    Plan {
        /// The planning failure.
        #[source]
        source: PlanError,
    },
    /// Serializing the trip plan failed.
    #[error("failed to serialize trip plan: {0}")]
    SerializeTripPlan(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
