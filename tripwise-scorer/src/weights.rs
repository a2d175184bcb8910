//! Policy constants for feasibility scoring.

/// Relative importance of each scoring signal.
///
/// The weights sum to one so that a candidate scoring perfectly on every
/// signal receives `1.0`. They are fixed policy, exposed so callers can
/// reproduce a score by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of the normalised visitor rating.
    pub rating: f64,
    /// Weight of proximity to the start location.
    pub distance: f64,
    /// Weight of the combined visit and travel time.
    pub time: f64,
    /// Weight of the preference match.
    pub preference: f64,
    /// Weight of reported popularity.
    pub popularity: f64,
}

impl ScoreWeights {
    /// The weighting applied by [`FeasibilityScorer`](crate::FeasibilityScorer).
    pub const POLICY: Self = Self {
        rating: 0.30,
        distance: 0.25,
        time: 0.20,
        preference: 0.15,
        popularity: 0.10,
    };

    /// Sum of all weights.
    #[expect(
        clippy::float_arithmetic,
        reason = "the total is a plain sum of the weights"
    )]
    #[must_use]
    pub fn total(self) -> f64 {
        self.rating + self.distance + self.time + self.preference + self.popularity
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::POLICY
    }
}

/// Preference signal values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceScores {
    /// A preference tag matched the candidate's category.
    pub matched: f64,
    /// Preferences were given but none matched.
    pub unmatched: f64,
    /// The traveller expressed no preferences.
    pub neutral: f64,
}

impl PreferenceScores {
    /// The values applied by [`FeasibilityScorer`](crate::FeasibilityScorer).
    pub const POLICY: Self = Self {
        matched: 1.0,
        unmatched: 0.3,
        neutral: 0.5,
    };
}
