//! Behavioural tests for [`HttpRecommender`].
//!
//! Each scenario points the recommender at a loopback [`StubGateway`] that
//! answers one request, so no real gateway is needed.

use std::cell::RefCell;
use std::net::TcpListener;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tripwise_core::{RecommendationBatch, Recommender, TripQuery, UpstreamError};
use tripwise_data::recommender::test_support::{CapturedRequest, StubGateway, completion_body};
use tripwise_data::recommender::{HttpRecommender, HttpRecommenderConfig};

const API_KEY: &str = "sk-behaviour";

const TWO_DESTINATIONS: &str = r#"[
  {"name": "Belém Tower", "visitTime": 45, "travelTimeFromSource": 20,
   "distanceFromSource": 6, "distanceToSource": 6, "rating": 4.5,
   "category": "historical", "popularity": 8},
  {"name": "LX Factory", "visitTime": 60, "travelTimeFromSource": 15,
   "distanceFromSource": 4, "rating": 4.2, "category": "shopping"}
]"#;

const ONE_MALFORMED: &str = r#"[
  {"name": "Belém Tower", "visitTime": 45, "travelTimeFromSource": 20,
   "distanceFromSource": 6, "rating": 4.5},
  {"name": "Nowhere", "visitTime": -5, "travelTimeFromSource": 20,
   "distanceFromSource": 6, "rating": 4.5}
]"#;

#[derive(Debug, Default)]
struct GatewayWorld {
    gateway: RefCell<Option<StubGateway>>,
    base_url: RefCell<String>,
    outcome: RefCell<Option<Result<RecommendationBatch, UpstreamError>>>,
    captured: RefCell<Option<CapturedRequest>>,
}

impl GatewayWorld {
    fn serve(&self, status: u16, headers: &[(&str, &str)], body: &str) {
        let gateway = StubGateway::respond(status, headers, body).expect("bind stub gateway");
        *self.base_url.borrow_mut() = gateway.base_url().to_owned();
        *self.gateway.borrow_mut() = Some(gateway);
    }

    fn failure(&self) -> UpstreamError {
        match self.outcome.borrow().as_ref() {
            Some(Err(err)) => err.clone(),
            other => panic!("expected an upstream error, found {other:?}"),
        }
    }

    fn batch<R>(&self, check: impl FnOnce(&RecommendationBatch) -> R) -> R {
        match self.outcome.borrow().as_ref() {
            Some(Ok(batch)) => check(batch),
            other => panic!("expected recommendations, found {other:?}"),
        }
    }
}

#[fixture]
fn world() -> GatewayWorld {
    GatewayWorld::default()
}

// --- Given steps ---

#[given("a gateway replying with two valid destinations")]
fn two_valid(world: &GatewayWorld) {
    world.serve(200, &[], &completion_body(TWO_DESTINATIONS));
}

#[given("a gateway replying with one valid and one malformed destination")]
fn one_malformed(world: &GatewayWorld) {
    world.serve(200, &[], &completion_body(&format!("```json\n{ONE_MALFORMED}\n```")));
}

#[given("a gateway that rate limits with a retry after {secs} seconds")]
fn rate_limited(world: &GatewayWorld, secs: u64) {
    let retry_after = secs.to_string();
    world.serve(429, &[("retry-after", &retry_after)], r#"{"error": "slow down"}"#);
}

#[given("a gateway answering with status {status}")]
fn answering_with(world: &GatewayWorld, status: u16) {
    world.serve(status, &[], r#"{"error": "refused"}"#);
}

#[given("a gateway replying with prose instead of JSON")]
fn prose_reply(world: &GatewayWorld) {
    world.serve(200, &[], &completion_body("Sure! Here are some lovely places."));
}

#[given("a gateway that is not listening")]
fn not_listening(world: &GatewayWorld) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind spare listener");
    let addr = listener.local_addr().expect("spare address");
    drop(listener);
    *world.base_url.borrow_mut() = format!("http://{addr}/v1");
}

// --- When steps ---

#[when("I ask for recommendations around {place}")]
fn ask(world: &GatewayWorld, place: String) {
    let config = HttpRecommenderConfig::new(world.base_url.borrow().as_str(), API_KEY, "model-x")
        .with_timeout(Duration::from_secs(5));
    let recommender = HttpRecommender::with_config(config).expect("recommender should build");
    let query = TripQuery::new(place.trim_matches('"'), 4.0);
    *world.outcome.borrow_mut() = Some(recommender.recommend(&query));
    if let Some(gateway) = world.gateway.borrow_mut().take() {
        *world.captured.borrow_mut() = Some(gateway.finish().expect("stub gateway served"));
    }
}

// --- Then steps ---

#[then("{count} destinations are returned")]
fn destinations_returned(world: &GatewayWorld, count: usize) {
    world.batch(|batch| assert_eq!(batch.destinations().len(), count));
}

#[then("entry {index} is reported as excluded")]
fn entry_excluded(world: &GatewayWorld, index: usize) {
    world.batch(|batch| {
        let indices: Vec<_> = batch.excluded().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![index]);
    });
}

#[then("the request carried the bearer token")]
fn bearer_token(world: &GatewayWorld) {
    let captured = world.captured.borrow();
    let request = captured.as_ref().expect("a request was captured");
    assert!(request.request_line.starts_with("POST /v1/chat/completions"));
    assert_eq!(
        request.header("authorization"),
        Some(format!("Bearer {API_KEY}").as_str())
    );
    assert!(request.body.contains("Lisbon"));
}

#[then("the failure code is {code}")]
fn failure_code(world: &GatewayWorld, code: String) {
    assert_eq!(world.failure().code(), code.trim_matches('"'));
}

#[then("the retry hint is {secs} seconds")]
fn retry_hint(world: &GatewayWorld, secs: u64) {
    assert_eq!(
        world.failure(),
        UpstreamError::RateLimited {
            retry_after_secs: Some(secs)
        }
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/http_recommender.feature", name = $title)]
        fn $fn_name(world: GatewayWorld) {
            let _ = world;
        }
    };
}

register_scenario!(well_formed_reply, "receiving well-formed recommendations");
register_scenario!(
    malformed_entries,
    "excluding malformed entries individually"
);
register_scenario!(rate_limited_gateway, "handling a rate-limited gateway");
register_scenario!(exhausted_quota, "handling an exhausted quota");
register_scenario!(refused_credentials, "handling refused credentials");
register_scenario!(prose_payload, "handling a reply that is not JSON");
register_scenario!(unreachable_gateway, "handling an unreachable gateway");
