//! Test helpers for writing trip requests into temporary workspaces.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;
use tripwise_core::test_support::StubRecommender;
use tripwise_core::{Planner, Recommender};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn temp_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// The two Paris candidates used across the planner's tests.
pub(super) fn paris_destinations() -> Value {
    json!([
        {
            "name": "A", "visitTime": 60, "travelTimeFromSource": 15,
            "distanceFromSource": 2, "distanceToSource": 2, "rating": 4.5,
            "category": "cultural"
        },
        {
            "name": "B", "visitTime": 90, "travelTimeFromSource": 20,
            "distanceFromSource": 3, "distanceToSource": 3, "rating": 4.8,
            "category": "nature"
        }
    ])
}

pub(super) fn trip_request(hours: f64, destinations: Option<Value>) -> Value {
    let mut request = json!({
        "startLocation": "Paris",
        "availableTime": hours,
    });
    if let (Some(list), Some(object)) = (destinations, request.as_object_mut()) {
        object.insert("destinations".to_owned(), list);
    }
    request
}

/// Services using the real planner and a canned recommender.
pub(super) struct StubPlanServices {
    pub(super) recommender: StubRecommender,
}

impl PlanServices for StubPlanServices {
    fn planner(&self) -> Box<dyn Planner> {
        DefaultPlanServices.planner()
    }

    fn recommender(&self, _gateway: &GatewayConfig) -> Result<Box<dyn Recommender>, CliError> {
        Ok(Box::new(self.recommender.clone()))
    }
}
