//! Command-line interface for planning trips with the Tripwise engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};
#[cfg(test)]
use plan::{
    DEFAULT_GATEWAY_TIMEOUT_SECS, DefaultPlanServices, GatewayConfig, OutputFormat, PlanConfig,
    PlanServices, config_from_layers_for_test, load_trip_payload, render_text, run_plan_with,
};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_GATEWAY_URL: &str = "gateway-url";
const ARG_PLAN_GATEWAY_API_KEY: &str = "gateway-api-key";
const ARG_PLAN_GATEWAY_MODEL: &str = "gateway-model";
const ARG_PLAN_GATEWAY_TIMEOUT_SECS: &str = "gateway-timeout-secs";
const ARG_PLAN_FORMAT: &str = "format";
const ENV_PLAN_REQUEST: &str = "TRIPWISE_CMDS_PLAN_REQUEST_PATH";
const ENV_PLAN_GATEWAY_URL: &str = "TRIPWISE_CMDS_PLAN_GATEWAY_URL";
const ENV_PLAN_GATEWAY_API_KEY: &str = "TRIPWISE_CMDS_PLAN_GATEWAY_API_KEY";
const ENV_PLAN_GATEWAY_MODEL: &str = "TRIPWISE_CMDS_PLAN_GATEWAY_MODEL";

/// Environment variable holding `env_logger` filter directives.
pub const ENV_LOG: &str = "TRIPWISE_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the stderr logger for the binary.
///
/// Filter directives are read from [`ENV_LOG`] and default to `warn`.
///
/// # Errors
/// Returns [`log::SetLoggerError`] when a logger is already installed.
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    let directives = std::env::var(ENV_LOG).ok();
    let logger = build_logger(directives.as_deref());
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}

fn build_logger(directives: Option<&str>) -> env_logger::Logger {
    env_logger::Builder::new()
        .parse_filters(directives.unwrap_or(DEFAULT_LOG_FILTER))
        .build()
}

/// Run the Tripwise CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, request
/// loading, planning or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tripwise",
    about = "Plan time-boxed trips from scored destination candidates",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a trip from a JSON request.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
