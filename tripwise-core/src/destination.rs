//! Candidate destinations and the raw records they are decoded from.
//!
//! A [`Destination`] is a stop the planner may admit into a trip. Inputs
//! arrive as [`DestinationRecord`]s with every field optional so that a
//! malformed entry can be reported against the exact field at fault rather
//! than failing inside the deserializer.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Popularity assumed when a destination does not report one.
pub const DEFAULT_POPULARITY: f64 = 5.0;

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

const MIN_POPULARITY: f64 = 1.0;
const MAX_POPULARITY: f64 = 10.0;

/// Broad kind of place a destination belongs to.
///
/// # Examples
/// ```
/// use std::str::FromStr;
/// use tripwise_core::Category;
///
/// assert_eq!(Category::from_str("Nature"), Ok(Category::Nature));
/// assert_eq!(Category::Historical.to_string(), "historical");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Category {
    /// Museums, galleries and performing arts.
    Cultural,
    /// Parks, gardens and landscapes.
    Nature,
    /// Outdoor and physical activities.
    Adventure,
    /// Restaurants, markets and tastings.
    Food,
    /// Shopping streets and malls.
    Shopping,
    /// Shows, nightlife and amusement.
    Entertainment,
    /// Monuments and heritage sites.
    Historical,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Cultural,
        Self::Nature,
        Self::Adventure,
        Self::Food,
        Self::Shopping,
        Self::Entertainment,
        Self::Historical,
    ];

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cultural => "cultural",
            Self::Nature => "nature",
            Self::Adventure => "adventure",
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Historical => "historical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label names none of the known [`Category`] values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategoryError(pub String);

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
            .ok_or_else(|| UnknownCategoryError(s.to_owned()))
    }
}

/// A candidate stop for a trip.
///
/// Times are minutes and distances are kilometres. `distance_to_source`
/// measures the way back to the *home address*, which differs from the start
/// location when a trip does not end where it began.
///
/// # Examples
/// ```
/// use tripwise_core::{Category, Destination};
///
/// let louvre = Destination::new("Louvre", 120.0, 15.0, 2.5, 4.7)
///     .with_distance_to_source(2.5)
///     .with_category(Category::Cultural);
/// assert_eq!(louvre.combined_minutes(), 135.0);
/// assert_eq!(louvre.popularity_or_default(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Destination {
    /// Display label.
    pub name: String,
    /// Minutes expected on site.
    pub visit_time: f64,
    /// Minutes of travel from the trip's starting point.
    pub travel_time_from_source: f64,
    /// Kilometres from the trip's starting point.
    pub distance_from_source: f64,
    /// Kilometres back to the home address, when known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub distance_to_source: Option<f64>,
    /// Visitor rating in `0.0..=5.0`.
    pub rating: f64,
    /// Kind of place, when recognised.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub category: Option<Category>,
    /// Popularity in `1.0..=10.0`, when reported.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub popularity: Option<f64>,
}

impl Destination {
    /// Construct a destination from its required fields.
    ///
    /// No range checks are applied here; see [`Destination::check`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        visit_time: f64,
        travel_time_from_source: f64,
        distance_from_source: f64,
        rating: f64,
    ) -> Self {
        Self {
            name: name.into(),
            visit_time,
            travel_time_from_source,
            distance_from_source,
            distance_to_source: None,
            rating,
            category: None,
            popularity: None,
        }
    }

    /// Set the distance back to the home address.
    #[must_use]
    pub const fn with_distance_to_source(mut self, km: f64) -> Self {
        self.distance_to_source = Some(km);
        self
    }

    /// Set the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the popularity.
    #[must_use]
    pub const fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Minutes this stop adds to a trip: time on site plus the inbound leg.
    #[expect(
        clippy::float_arithmetic,
        reason = "elapsed time is the sum of two minute values"
    )]
    #[must_use]
    pub fn combined_minutes(&self) -> f64 {
        self.visit_time + self.travel_time_from_source
    }

    /// Popularity, falling back to [`DEFAULT_POPULARITY`].
    #[must_use]
    pub fn popularity_or_default(&self) -> f64 {
        self.popularity.unwrap_or(DEFAULT_POPULARITY)
    }

    /// Verify every field lies in its documented range.
    ///
    /// # Errors
    /// Returns [`DestinationError::InvalidField`] naming the first field
    /// that is blank, non-finite or out of range.
    pub fn check(&self) -> Result<(), DestinationError> {
        if self.name.trim().is_empty() {
            return Err(DestinationError::InvalidField {
                field: "name",
                reason: "must not be blank",
            });
        }
        check_non_negative("visitTime", self.visit_time)?;
        check_non_negative("travelTimeFromSource", self.travel_time_from_source)?;
        check_non_negative("distanceFromSource", self.distance_from_source)?;
        if let Some(km) = self.distance_to_source {
            check_non_negative("distanceToSource", km)?;
        }
        check_range(
            "rating",
            self.rating,
            0.0..=MAX_RATING,
            "must be between 0 and 5",
        )?;
        if let Some(popularity) = self.popularity {
            check_range(
                "popularity",
                popularity,
                MIN_POPULARITY..=MAX_POPULARITY,
                "must be between 1 and 10",
            )?;
        }
        Ok(())
    }
}

/// Errors raised while validating a single destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    /// A required field was absent.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },
    /// A field was present but unusable.
    #[error("field `{field}` {reason}")]
    InvalidField {
        /// Wire name of the field.
        field: &'static str,
        /// Constraint the value broke.
        reason: &'static str,
    },
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), DestinationError> {
    if !value.is_finite() {
        return Err(DestinationError::InvalidField {
            field,
            reason: "must be a finite number",
        });
    }
    if value < 0.0 {
        return Err(DestinationError::InvalidField {
            field,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn check_range(
    field: &'static str,
    value: f64,
    bounds: RangeInclusive<f64>,
    reason: &'static str,
) -> Result<(), DestinationError> {
    if bounds.contains(&value) {
        Ok(())
    } else {
        Err(DestinationError::InvalidField { field, reason })
    }
}

/// A destination as received on the wire, before validation.
///
/// Every field is optional so that absence can be reported precisely.
///
/// # Examples
/// ```
/// use tripwise_core::{DestinationError, DestinationRecord};
///
/// let record = DestinationRecord {
///     name: Some("Sainte-Chapelle".into()),
///     visit_time: Some(45.0),
///     travel_time_from_source: Some(10.0),
///     distance_from_source: Some(1.2),
///     rating: None,
///     ..DestinationRecord::default()
/// };
/// assert_eq!(
///     record.validate(),
///     Err(DestinationError::MissingField { field: "rating" })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DestinationRecord {
    /// Display label.
    pub name: Option<String>,
    /// Minutes expected on site.
    pub visit_time: Option<f64>,
    /// Minutes of travel from the start.
    pub travel_time_from_source: Option<f64>,
    /// Kilometres from the start.
    pub distance_from_source: Option<f64>,
    /// Kilometres back to the home address.
    pub distance_to_source: Option<f64>,
    /// Visitor rating.
    pub rating: Option<f64>,
    /// Free-form category label.
    pub category: Option<String>,
    /// Popularity on a one-to-ten scale.
    pub popularity: Option<f64>,
}

impl DestinationRecord {
    /// Validate the record and convert it into a [`Destination`].
    ///
    /// Unrecognised or missing categories are not an error; the destination
    /// simply carries no category.
    ///
    /// # Errors
    /// Returns [`DestinationError::MissingField`] when a required field is
    /// absent and [`DestinationError::InvalidField`] when a value is out of
    /// range.
    pub fn validate(self) -> Result<Destination, DestinationError> {
        let destination = Destination {
            name: required("name", self.name)?,
            visit_time: required("visitTime", self.visit_time)?,
            travel_time_from_source: required(
                "travelTimeFromSource",
                self.travel_time_from_source,
            )?,
            distance_from_source: required("distanceFromSource", self.distance_from_source)?,
            distance_to_source: self.distance_to_source,
            rating: required("rating", self.rating)?,
            category: self
                .category
                .as_deref()
                .and_then(|label| Category::from_str(label).ok()),
            popularity: self.popularity,
        };
        destination.check()?;
        Ok(destination)
    }
}

impl From<Destination> for DestinationRecord {
    fn from(destination: Destination) -> Self {
        Self {
            name: Some(destination.name),
            visit_time: Some(destination.visit_time),
            travel_time_from_source: Some(destination.travel_time_from_source),
            distance_from_source: Some(destination.distance_from_source),
            distance_to_source: destination.distance_to_source,
            rating: Some(destination.rating),
            category: destination.category.map(|c| c.as_str().to_owned()),
            popularity: destination.popularity,
        }
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, DestinationError> {
    value.ok_or(DestinationError::MissingField { field })
}
