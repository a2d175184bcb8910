//! Plan command implementation for the Tripwise CLI.

use std::io::{self, BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripwise_core::{
    PlanError, Planner, Recommender, TripPlan, TripRequest, TripRequestPayload, format_minutes,
};
use tripwise_data::recommender::{HttpRecommender, HttpRecommenderConfig};
use tripwise_scorer::FeasibilityScorer;
use tripwise_solver_greedy::GreedyPlanner;

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_FORMAT, ARG_PLAN_GATEWAY_API_KEY, ARG_PLAN_GATEWAY_MODEL,
    ARG_PLAN_GATEWAY_TIMEOUT_SECS, ARG_PLAN_GATEWAY_URL, ARG_PLAN_REQUEST, CliError,
    ENV_PLAN_GATEWAY_API_KEY, ENV_PLAN_GATEWAY_MODEL, ENV_PLAN_GATEWAY_URL, ENV_PLAN_REQUEST,
};

/// Gateway timeout applied when none is configured.
pub(crate) const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;

/// How the plan is written to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Pretty-printed `TripPlan` JSON.
    #[default]
    Json,
    /// A human-readable itinerary.
    Text,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a trip from a JSON request. When the request lists no \
                 destinations, candidates are fetched from a chat-completions \
                 gateway configured through flags, environment variables or \
                 a configuration file.",
    about = "Plan a time-boxed trip"
)]
#[ortho_config(prefix = "TRIPWISE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a trip request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Output format.
    #[arg(long = ARG_PLAN_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Base URL of the recommendation gateway (e.g. "https://gateway.example.com/v1").
    #[arg(long = ARG_PLAN_GATEWAY_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) gateway_url: Option<String>,
    /// API key sent to the gateway as a bearer token.
    #[arg(long = ARG_PLAN_GATEWAY_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) gateway_api_key: Option<String>,
    /// Model identifier requested from the gateway.
    #[arg(long = ARG_PLAN_GATEWAY_MODEL, value_name = "model")]
    #[serde(default)]
    pub(crate) gateway_model: Option<String>,
    /// Gateway request timeout in seconds.
    #[arg(long = ARG_PLAN_GATEWAY_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) gateway_timeout_secs: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) format: OutputFormat,
    pub(crate) gateway_url: Option<String>,
    pub(crate) gateway_api_key: Option<String>,
    pub(crate) gateway_model: Option<String>,
    pub(crate) gateway_timeout_secs: Option<u64>,
}

/// Gateway settings, present only once every required value is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GatewayConfig {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) timeout: Duration,
}

impl GatewayConfig {
    fn recommender_config(&self) -> HttpRecommenderConfig {
        HttpRecommenderConfig::new(&self.base_url, &self.api_key, &self.model)
            .with_timeout(self.timeout)
    }
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_PLAN_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }

    /// Gateway settings needed to source candidates from a recommender.
    pub(crate) fn gateway(&self) -> Result<GatewayConfig, CliError> {
        let base_url = self
            .gateway_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or(CliError::MissingGateway {
                field: ARG_PLAN_GATEWAY_URL,
                env: ENV_PLAN_GATEWAY_URL,
            })?;
        let api_key = self.gateway_api_key.clone().ok_or(CliError::MissingArgument {
            field: ARG_PLAN_GATEWAY_API_KEY,
            env: ENV_PLAN_GATEWAY_API_KEY,
        })?;
        let model = self.gateway_model.clone().ok_or(CliError::MissingArgument {
            field: ARG_PLAN_GATEWAY_MODEL,
            env: ENV_PLAN_GATEWAY_MODEL,
        })?;
        Ok(GatewayConfig {
            base_url,
            api_key,
            model,
            timeout: Duration::from_secs(
                self.gateway_timeout_secs
                    .unwrap_or(DEFAULT_GATEWAY_TIMEOUT_SECS),
            ),
        })
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        Ok(Self {
            request_path,
            format: args.format.unwrap_or_default(),
            gateway_url: args.gateway_url,
            gateway_api_key: args.gateway_api_key,
            gateway_model: args.gateway_model,
            gateway_timeout_secs: args.gateway_timeout_secs,
        })
    }
}

/// Builds the planner and, on demand, the recommender for one invocation.
pub(crate) trait PlanServices {
    fn planner(&self) -> Box<dyn Planner>;
    fn recommender(&self, gateway: &GatewayConfig) -> Result<Box<dyn Recommender>, CliError>;
}

pub(crate) struct DefaultPlanServices;

impl PlanServices for DefaultPlanServices {
    fn planner(&self) -> Box<dyn Planner> {
        Box::new(GreedyPlanner::new(FeasibilityScorer::new()))
    }

    fn recommender(&self, gateway: &GatewayConfig) -> Result<Box<dyn Recommender>, CliError> {
        let recommender =
            HttpRecommender::with_config(gateway.recommender_config()).map_err(|source| {
                CliError::BuildRecommender {
                    base_url: gateway.base_url.clone(),
                    source,
                }
            })?;
        Ok(Box::new(recommender))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    run_plan_with(args, &DefaultPlanServices, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    services: &dyn PlanServices,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let plan = execute_plan(&config, services)?;
    write_plan(writer, &plan, config.format)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(config: &PlanConfig, services: &dyn PlanServices) -> Result<TripPlan, CliError> {
    let payload = load_trip_payload(&config.request_path)?;
    let request = build_request(config, payload, services)?;
    services
        .planner()
        .plan(&request)
        .map_err(|source| CliError::Plan { source })
}

fn build_request(
    config: &PlanConfig,
    payload: TripRequestPayload,
    services: &dyn PlanServices,
) -> Result<TripRequest, CliError> {
    let invalid = |source| CliError::InvalidTripRequest {
        path: config.request_path.clone(),
        source,
    };
    if payload.destinations.is_some() {
        return TripRequest::try_from(payload).map_err(invalid);
    }

    let (query, _) = payload.into_query().map_err(invalid)?;
    let gateway = config.gateway()?;
    info!(
        "request lists no destinations; asking {} for recommendations",
        gateway.base_url
    );
    let batch = services
        .recommender(&gateway)?
        .recommend(&query)
        .map_err(|err| CliError::Plan {
            source: PlanError::Upstream(err),
        })?;
    Ok(TripRequest::from_recommendations(query, batch))
}

/// Loads a JSON-encoded trip request from disk.
pub(crate) fn load_trip_payload(path: &Utf8Path) -> Result<TripRequestPayload, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenTripRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseTripRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan(
    writer: &mut dyn Write,
    plan: &TripPlan,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload =
                serde_json::to_string_pretty(plan).map_err(CliError::SerializeTripPlan)?;
            writer
                .write_all(payload.as_bytes())
                .and_then(|()| writer.write_all(b"\n"))
                .map_err(CliError::WritePlanOutput)
        }
        OutputFormat::Text => writer
            .write_all(render_text(plan).as_bytes())
            .map_err(CliError::WritePlanOutput),
    }
}

/// Render `plan` as a human-readable itinerary.
pub(crate) fn render_text(plan: &TripPlan) -> String {
    let mut lines = vec![format!(
        "Trip from {} back to {}",
        plan.start_location, plan.home_address
    )];

    if plan.optimized_route.is_empty() {
        lines.push("No stops fit the available time.".to_owned());
    } else {
        lines.push("Route:".to_owned());
        lines.extend(plan.optimized_route.iter().zip(1..).map(|(stop, position)| {
            let destination = &stop.destination;
            format!(
                "  {position}. {} (score {:.3}): {} on site, {} to get there",
                destination.name,
                stop.score,
                format_minutes(destination.visit_time),
                format_minutes(destination.travel_time_from_source),
            )
        }));
    }

    if !plan.skipped_destinations.is_empty() {
        lines.push("Skipped:".to_owned());
        lines.extend(
            plan.skipped_destinations
                .iter()
                .map(|s| format!("  - {} (score {:.3})", s.destination.name, s.score)),
        );
    }

    if !plan.excluded_records.is_empty() {
        lines.push("Excluded recommendations:".to_owned());
        lines.extend(
            plan.excluded_records
                .iter()
                .map(|e| format!("  - entry {}: {}", e.index, e.reason)),
        );
    }

    let summary = &plan.summary;
    lines.push(format!(
        "Return home: {}",
        format_minutes(plan.estimated_return_time)
    ));
    lines.push(format!(
        "Total trip time: {}",
        format_minutes(summary.total_trip_time)
    ));
    lines.push(format!(
        "Time remaining: {}",
        format_minutes(plan.remaining_time)
    ));
    if summary.total_locations > 0 {
        lines.push(format!(
            "{} stops, {:.1} km from the start in total, average rating {:.2}",
            summary.total_locations, summary.total_distance, summary.average_rating
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
