//! Trip requests and their validation.
//!
//! [`TripRequestPayload`] mirrors the JSON accepted at the boundary, with
//! every field optional. Converting it into a [`TripRequest`] checks the
//! required fields and every destination record, failing fast with a
//! [`ValidationError`] that names the offending field.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Destination, DestinationError, DestinationRecord, ExcludedRecord, Preferences};
use crate::{RecommendationBatch, time_format::MINUTES_PER_HOUR};

/// Errors raised when a trip request is incomplete or out of range.
///
/// Validation failures are never retried; they describe caller mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required request field was absent.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },
    /// A request field was present but unusable.
    #[error("field `{field}` {reason}")]
    InvalidField {
        /// Wire name of the field.
        field: &'static str,
        /// Constraint the value broke.
        reason: &'static str,
    },
    /// A destination record failed validation.
    #[error("destinations[{index}]: {source}")]
    Destination {
        /// Position of the record in the request.
        index: usize,
        /// Field-level failure.
        #[source]
        source: DestinationError,
    },
}

/// The request-level parameters of a trip, independent of its candidates.
///
/// This is also the travel context handed to a
/// [`Recommender`](crate::Recommender).
///
/// # Examples
/// ```
/// use tripwise_core::{Preferences, TripQuery};
///
/// let query = TripQuery::new("Gare du Nord", 2.5)
///     .with_home_address("Montmartre")
///     .with_preferences(Preferences::new(["food"]));
/// assert_eq!(query.available_minutes(), 150.0);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TripQuery {
    /// Where the trip begins.
    pub start_location: String,
    /// Where the trip ends; defaults to the start location.
    pub home_address: String,
    /// Time budget in hours.
    pub available_hours: f64,
    /// Preference tags matched against categories.
    pub preferences: Preferences,
}

impl TripQuery {
    /// Build a query that returns to its start location.
    #[must_use]
    pub fn new(start_location: impl Into<String>, available_hours: f64) -> Self {
        let start = start_location.into();
        Self {
            home_address: start.clone(),
            start_location: start,
            available_hours,
            preferences: Preferences::default(),
        }
    }

    /// Set a home address distinct from the start location.
    #[must_use]
    pub fn with_home_address(mut self, home_address: impl Into<String>) -> Self {
        self.home_address = home_address.into();
        self
    }

    /// Attach preference tags.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// The time budget converted to minutes.
    #[expect(
        clippy::float_arithmetic,
        reason = "budgets are supplied in hours and consumed in minutes"
    )]
    #[must_use]
    pub fn available_minutes(&self) -> f64 {
        self.available_hours * MINUTES_PER_HOUR
    }

    /// Check the request-level invariants.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidField`] when the start location is
    /// blank or the time budget is not a positive finite number of hours.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_location.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "startLocation",
                reason: "must not be blank",
            });
        }
        if !self.available_hours.is_finite() || self.available_hours <= 0.0 {
            return Err(ValidationError::InvalidField {
                field: "availableTime",
                reason: "must be a positive number of hours",
            });
        }
        Ok(())
    }
}

/// A validated trip request: the query plus the candidates to plan over.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Request-level parameters.
    pub query: TripQuery,
    /// Candidate destinations.
    pub destinations: Vec<Destination>,
    /// Recommender entries dropped before planning.
    pub excluded: Vec<ExcludedRecord>,
}

impl TripRequest {
    /// Pair a query with directly supplied candidates.
    #[must_use]
    pub const fn new(query: TripQuery, destinations: Vec<Destination>) -> Self {
        Self {
            query,
            destinations,
            excluded: Vec::new(),
        }
    }

    /// Pair a query with candidates produced by a recommender, carrying its
    /// exclusions forward so they can be reported with the plan.
    #[must_use]
    pub fn from_recommendations(query: TripQuery, batch: RecommendationBatch) -> Self {
        let (destinations, excluded) = batch.into_parts();
        Self {
            query,
            destinations,
            excluded,
        }
    }

    /// Check the query and every candidate.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.query.validate()?;
        for (index, destination) in self.destinations.iter().enumerate() {
            destination
                .check()
                .map_err(|source| ValidationError::Destination { index, source })?;
        }
        Ok(())
    }
}

/// A trip request as received on the wire.
///
/// `availableTime` is expressed in hours. When `destinations` is absent the
/// caller is expected to source candidates from a recommender.
///
/// # Examples
/// ```
/// use tripwise_core::{TripRequest, TripRequestPayload, ValidationError};
///
/// let payload = TripRequestPayload {
///     start_location: Some("Paris".into()),
///     available_time: Some(3.0),
///     destinations: Some(Vec::new()),
///     ..TripRequestPayload::default()
/// };
/// let request = TripRequest::try_from(payload)?;
/// assert_eq!(request.query.home_address, "Paris");
/// # Ok::<(), ValidationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TripRequestPayload {
    /// Where the trip begins.
    pub start_location: Option<String>,
    /// Where the trip ends.
    pub home_address: Option<String>,
    /// Time budget in hours.
    pub available_time: Option<f64>,
    /// Preference tags.
    pub user_preferences: Option<Vec<String>>,
    /// Candidate destinations, when supplied directly.
    pub destinations: Option<Vec<DestinationRecord>>,
}

impl TripRequestPayload {
    /// Validate the request-level fields, returning the query together with
    /// any destination records still awaiting validation.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] when `startLocation` or
    /// `availableTime` is absent, and [`ValidationError::InvalidField`] when
    /// either is unusable.
    pub fn into_query(self) -> Result<(TripQuery, Option<Vec<DestinationRecord>>), ValidationError> {
        let start_location = self
            .start_location
            .ok_or(ValidationError::MissingField {
                field: "startLocation",
            })?;
        let available_hours = self
            .available_time
            .ok_or(ValidationError::MissingField {
                field: "availableTime",
            })?;
        let mut query = TripQuery::new(start_location, available_hours)
            .with_preferences(Preferences::new(self.user_preferences.unwrap_or_default()));
        if let Some(home) = self.home_address.filter(|home| !home.trim().is_empty()) {
            query = query.with_home_address(home);
        }
        query.validate()?;
        Ok((query, self.destinations))
    }
}

impl TryFrom<TripRequestPayload> for TripRequest {
    type Error = ValidationError;

    fn try_from(payload: TripRequestPayload) -> Result<Self, Self::Error> {
        let (query, maybe_records) = payload.into_query()?;
        let records = maybe_records.ok_or(ValidationError::MissingField {
            field: "destinations",
        })?;
        let destinations = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .validate()
                    .map_err(|source| ValidationError::Destination { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(query, destinations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn payload() -> TripRequestPayload {
        TripRequestPayload {
            start_location: Some("Paris".into()),
            home_address: None,
            available_time: Some(3.0),
            user_preferences: Some(vec!["Nature".into()]),
            destinations: Some(vec![DestinationRecord {
                name: Some("Jardin du Luxembourg".into()),
                visit_time: Some(45.0),
                travel_time_from_source: Some(10.0),
                distance_from_source: Some(1.5),
                distance_to_source: Some(1.5),
                rating: Some(4.7),
                category: Some("nature".into()),
                popularity: None,
            }]),
        }
    }

    #[rstest]
    fn complete_payload_converts(payload: TripRequestPayload) {
        let request = TripRequest::try_from(payload).expect("valid payload");
        assert_eq!(request.query.start_location, "Paris");
        assert_eq!(request.query.home_address, "Paris");
        assert_eq!(request.query.available_minutes(), 180.0);
        assert_eq!(request.destinations.len(), 1);
        assert!(request.excluded.is_empty());
    }

    #[rstest]
    fn explicit_home_address_is_kept(payload: TripRequestPayload) {
        let with_home = TripRequestPayload {
            home_address: Some("Versailles".into()),
            ..payload
        };
        let request = TripRequest::try_from(with_home).expect("valid payload");
        assert_eq!(request.query.home_address, "Versailles");
    }

    #[rstest]
    fn blank_home_address_falls_back_to_start(payload: TripRequestPayload) {
        let blank = TripRequestPayload {
            home_address: Some("   ".into()),
            ..payload
        };
        let request = TripRequest::try_from(blank).expect("valid payload");
        assert_eq!(request.query.home_address, "Paris");
    }

    #[rstest]
    #[case::start("startLocation")]
    #[case::time("availableTime")]
    #[case::destinations("destinations")]
    fn missing_fields_are_named(payload: TripRequestPayload, #[case] field: &'static str) {
        let mut broken = payload;
        match field {
            "startLocation" => broken.start_location = None,
            "availableTime" => broken.available_time = None,
            _ => broken.destinations = None,
        }
        assert_eq!(
            TripRequest::try_from(broken),
            Err(ValidationError::MissingField { field })
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-2.0)]
    #[case(f64::INFINITY)]
    fn non_positive_budget_is_rejected(payload: TripRequestPayload, #[case] hours: f64) {
        let broken = TripRequestPayload {
            available_time: Some(hours),
            ..payload
        };
        assert!(matches!(
            TripRequest::try_from(broken),
            Err(ValidationError::InvalidField {
                field: "availableTime",
                ..
            })
        ));
    }

    #[rstest]
    fn blank_start_is_rejected(payload: TripRequestPayload) {
        let broken = TripRequestPayload {
            start_location: Some(String::new()),
            ..payload
        };
        assert!(matches!(
            TripRequest::try_from(broken),
            Err(ValidationError::InvalidField {
                field: "startLocation",
                ..
            })
        ));
    }

    #[rstest]
    fn malformed_destination_reports_index_and_field(payload: TripRequestPayload) {
        let mut broken = payload;
        let mut records = broken.destinations.take().unwrap_or_default();
        records.push(DestinationRecord {
            name: Some("Catacombs".into()),
            visit_time: None,
            ..DestinationRecord::default()
        });
        broken.destinations = Some(records);

        let err = TripRequest::try_from(broken).expect_err("second record is malformed");
        assert_eq!(
            err,
            ValidationError::Destination {
                index: 1,
                source: DestinationError::MissingField { field: "visitTime" },
            }
        );
        assert_eq!(
            err.to_string(),
            "destinations[1]: missing required field `visitTime`"
        );
    }

    #[rstest]
    fn into_query_leaves_destinations_optional(payload: TripRequestPayload) {
        let without = TripRequestPayload {
            destinations: None,
            ..payload
        };
        let (query, records) = without.into_query().expect("query is valid");
        assert!(records.is_none());
        assert_eq!(query.preferences.len(), 1);
    }

    #[rstest]
    fn request_validation_rechecks_destinations() {
        let query = TripQuery::new("Lyon", 2.0);
        let request = TripRequest::new(query, vec![Destination::new("Bad", -5.0, 0.0, 0.0, 3.0)]);
        assert!(matches!(
            request.validate(),
            Err(ValidationError::Destination { index: 0, .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn payload_deserialises_camel_case_json() {
        let json = r#"{
            "startLocation": "Paris",
            "availableTime": 3,
            "userPreferences": ["cultural"],
            "destinations": [
                {"name": "A", "visitTime": 60, "travelTimeFromSource": 15,
                 "distanceFromSource": 2, "distanceToSource": 2, "rating": 4.5,
                 "category": "cultural"}
            ]
        }"#;
        let payload: TripRequestPayload = serde_json::from_str(json).expect("valid JSON");
        let request = TripRequest::try_from(payload).expect("valid payload");
        assert_eq!(request.destinations.first().map(|d| d.visit_time), Some(60.0));
    }
}
