//! Per-entry validation of recommender output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Destination, DestinationRecord};

/// A recommender entry that was dropped before planning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExcludedRecord {
    /// Position of the entry in the recommender's reply.
    pub index: usize,
    /// Why the entry was unusable.
    pub reason: String,
}

/// Destinations returned by a recommender, split into usable candidates and
/// excluded entries.
///
/// Malformed entries never fail the whole batch; they are set aside and
/// reported alongside the plan.
///
/// # Examples
/// ```
/// use tripwise_core::{DestinationRecord, RecommendationBatch};
///
/// let good = DestinationRecord {
///     name: Some("Arc de Triomphe".into()),
///     visit_time: Some(30.0),
///     travel_time_from_source: Some(10.0),
///     distance_from_source: Some(2.0),
///     rating: Some(4.6),
///     ..DestinationRecord::default()
/// };
/// let batch = RecommendationBatch::from_records(vec![
///     Ok(good),
///     Err("expected an object".to_owned()),
///     Ok(DestinationRecord::default()),
/// ]);
/// assert_eq!(batch.destinations().len(), 1);
/// assert_eq!(batch.excluded().len(), 2);
/// assert_eq!(batch.excluded()[1].index, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationBatch {
    destinations: Vec<Destination>,
    excluded: Vec<ExcludedRecord>,
}

impl RecommendationBatch {
    /// Wrap destinations that are already validated.
    #[must_use]
    pub const fn new(destinations: Vec<Destination>) -> Self {
        Self {
            destinations,
            excluded: Vec::new(),
        }
    }

    /// Validate decoded entries one by one.
    ///
    /// `Err` items carry a decoding failure for that entry; `Ok` items are
    /// validated with [`DestinationRecord::validate`]. Either kind of failure
    /// excludes only the affected entry.
    #[must_use]
    pub fn from_records<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Result<DestinationRecord, String>>,
    {
        let mut batch = Self::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match entry.and_then(|record| record.validate().map_err(|err| err.to_string())) {
                Ok(destination) => batch.destinations.push(destination),
                Err(reason) => batch.excluded.push(ExcludedRecord { index, reason }),
            }
        }
        batch
    }

    /// Usable candidates.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Entries that were set aside.
    #[must_use]
    pub fn excluded(&self) -> &[ExcludedRecord] {
        &self.excluded
    }

    /// Split the batch into candidates and exclusions.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Destination>, Vec<ExcludedRecord>) {
        (self.destinations, self.excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn validation_failures_name_the_field() {
        let batch = RecommendationBatch::from_records(vec![Ok(DestinationRecord {
            name: Some("Panthéon".into()),
            ..DestinationRecord::default()
        })]);
        let excluded = batch.excluded().first().expect("record is excluded");
        assert_eq!(excluded.index, 0);
        assert_eq!(excluded.reason, "missing required field `visitTime`");
        assert!(batch.destinations().is_empty());
    }

    #[rstest]
    fn empty_input_yields_empty_batch() {
        let batch = RecommendationBatch::from_records(Vec::new());
        assert_eq!(batch, RecommendationBatch::default());
    }
}
