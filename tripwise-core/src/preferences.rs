//! Visitor preference tags matched against destination categories.
//!
//! Matching is case-insensitive substring containment in either direction, so
//! `"historic"` matches `historical` and `"cultural sites"` matches `cultural`.
//!
//! Blank tags are dropped. A request whose tags are all blank has no
//! preferences, so it gets the neutral preference level instead of matching
//! every category.

use crate::Category;

/// Free-form preference tags supplied with a trip request.
///
/// # Examples
/// ```
/// use tripwise_core::{Category, Preferences};
///
/// let preferences = Preferences::new(["Historic", "  "]);
/// assert_eq!(preferences.len(), 1);
/// assert!(preferences.matches(Category::Historical));
/// assert!(!preferences.matches(Category::Food));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preferences {
    tags: Vec<String>,
}

impl Preferences {
    /// Build preferences from raw tags, dropping blank entries.
    ///
    /// Tags are trimmed and lowercased first. Passing only blank tags yields
    /// the same value as passing none.
    #[must_use]
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(Into::into)
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    /// Report whether no tags were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of usable tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Iterate over the normalised tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Report whether any tag matches `category`.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        let label = category.as_str();
        self.tags
            .iter()
            .any(|tag| label.contains(tag.as_str()) || tag.contains(label))
    }
}
