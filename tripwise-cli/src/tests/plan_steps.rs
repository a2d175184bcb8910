//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{
    StubPlanServices, paris_destinations, temp_workspace, trip_request, write_utf8,
};
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use tempfile::TempDir;
use tripwise_core::test_support::StubRecommender;
use tripwise_core::{DestinationRecord, RecommendationBatch, UpstreamError, ValidationError};

#[derive(Debug)]
struct PlanWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    recommender: RefCell<StubRecommender>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        let (tmp, root) = temp_workspace();
        Self {
            _tmp: tmp,
            request_path: root.join("request.json"),
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            recommender: RefCell::new(StubRecommender::with_batch(RecommendationBatch::default())),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["tripwise".to_owned(), "plan".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn write_request(&self, request: &Value) {
        let payload = serde_json::to_string_pretty(request).expect("serialize request");
        write_utf8(&self.request_path, payload.as_bytes());
    }

    fn configure_gateway(&self, recommender: StubRecommender) {
        self.cli_args.borrow_mut().extend(
            [
                format!("--{ARG_PLAN_GATEWAY_URL}"),
                "http://gateway.test/v1".to_owned(),
                format!("--{ARG_PLAN_GATEWAY_API_KEY}"),
                "sk-test".to_owned(),
                format!("--{ARG_PLAN_GATEWAY_MODEL}"),
                "model-x".to_owned(),
            ],
        );
        *self.recommender.borrow_mut() = recommender;
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |outcome| {
            outcome
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn json_plan(&self) -> Value {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON trip plan")
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

#[given("a trip request for {hours:f64} hours listing the Paris candidates")]
fn request_with_paris(#[from(world)] world: &PlanWorld, hours: f64) {
    world.write_request(&trip_request(hours, Some(paris_destinations())));
}

#[given("a trip request for {hours:f64} hours without destinations")]
fn request_without_destinations(#[from(world)] world: &PlanWorld, hours: f64) {
    world.write_request(&trip_request(hours, None));
}

#[given("the trip request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the trip request path")]
fn omit_request_path(#[from(world)] world: &PlanWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I ask for text output")]
fn ask_for_text(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_FORMAT}"), "text".to_owned()]);
}

#[given("a configured gateway recommending Notre-Dame and one malformed entry")]
fn gateway_recommending(#[from(world)] world: &PlanWorld) {
    let notre_dame = DestinationRecord {
        name: Some("Notre-Dame".to_owned()),
        visit_time: Some(40.0),
        travel_time_from_source: Some(10.0),
        distance_from_source: Some(1.0),
        distance_to_source: Some(1.0),
        rating: Some(4.8),
        category: Some("historical".to_owned()),
        popularity: Some(9.0),
    };
    let batch = RecommendationBatch::from_records([
        Ok(notre_dame),
        Err("invalid type: string, expected struct".to_owned()),
    ]);
    world.configure_gateway(StubRecommender::with_batch(batch));
}

#[given("a configured gateway that is rate limited")]
fn gateway_rate_limited(#[from(world)] world: &PlanWorld) {
    world.configure_gateway(StubRecommender::with_error(UpstreamError::RateLimited {
        retry_after_secs: Some(30),
    }));
}

#[when("I run the plan command")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Plan(args) => {
            let services = StubPlanServices {
                recommender: world.recommender.borrow().clone(),
            };
            let mut buffer = world.stdout.borrow_mut();
            run_plan_with(args, &services, &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and the JSON route is {names}")]
fn json_route_is(#[from(world)] world: &PlanWorld, names: String) {
    let plan = world.json_plan();
    let route: Vec<&str> = plan["optimizedRoute"]
        .as_array()
        .expect("route array")
        .iter()
        .filter_map(|stop| stop["name"].as_str())
        .collect();
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    assert_eq!(route, expected);
}

#[then("the JSON plan keeps {minutes:f64} minutes in reserve")]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating point values"
)]
fn json_remaining(#[from(world)] world: &PlanWorld, minutes: f64) {
    let remaining = world.json_plan()["remainingTime"]
        .as_f64()
        .expect("remainingTime");
    assert!(
        (remaining - minutes).abs() < 1e-6,
        "remaining {remaining} != {minutes}"
    );
}

#[then("the JSON plan reports excluded entry {index}")]
fn json_excluded(#[from(world)] world: &PlanWorld, index: u64) {
    let plan = world.json_plan();
    let indices: Vec<u64> = plan["excludedRecords"]
        .as_array()
        .expect("excludedRecords array")
        .iter()
        .filter_map(|entry| entry["index"].as_u64())
        .collect();
    assert_eq!(indices, vec![index]);
}

#[then("the command succeeds and the text lists stop {position} as {name}")]
fn text_lists_stop(#[from(world)] world: &PlanWorld, position: usize, name: String) {
    let borrowed = world.result.borrow();
    if let Some(Err(err)) = borrowed.as_ref() {
        panic!("expected success, found {err:?}");
    }
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    assert!(stdout.starts_with("Trip from Paris back to Paris"));
    assert!(
        stdout.contains(&format!("  {position}. {name} (score ")),
        "missing stop {position} in:\n{stdout}"
    );
}

#[then("the command fails because the request JSON is invalid")]
fn fails_invalid_json(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::ParseTripRequest { .. } => {}
        other => panic!("expected ParseTripRequest, found {other:?}"),
    }
}

#[then("the command fails because availableTime is invalid")]
fn fails_invalid_request(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::InvalidTripRequest { source, .. } => assert!(matches!(
            source,
            ValidationError::InvalidField {
                field: "availableTime",
                ..
            }
        )),
        other => panic!("expected InvalidTripRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn fails_missing_request_path(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_PLAN_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because no gateway is configured")]
fn fails_without_gateway(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::MissingGateway { field, .. } => assert_eq!(*field, ARG_PLAN_GATEWAY_URL),
        other => panic!("expected MissingGateway, found {other:?}"),
    }
}

#[then("the command fails with planning code {code}")]
fn fails_with_code(#[from(world)] world: &PlanWorld, code: String) {
    match &*world.error() {
        CliError::Plan { source } => assert_eq!(source.code(), code.trim_matches('"')),
        other => panic!("expected Plan, found {other:?}"),
    }
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: PlanWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(plan_happy_path, "planning a request with destinations");
register_plan_scenario!(plan_text_output, "rendering the plan as text");
register_plan_scenario!(plan_invalid_json, "rejecting invalid JSON input");
register_plan_scenario!(plan_invalid_request, "rejecting invalid trip requests");
register_plan_scenario!(plan_missing_request, "rejecting missing request paths");
register_plan_scenario!(
    plan_requires_gateway,
    "requiring a gateway when destinations are absent"
);
register_plan_scenario!(
    plan_recommended_destinations,
    "planning over recommended destinations"
);
register_plan_scenario!(plan_upstream_failure, "surfacing recommender failures");
