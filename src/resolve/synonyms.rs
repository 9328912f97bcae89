//! Synonym expansion for alternate device names

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::normalize::{CanonicalName, normalize};

/// Synonym sets used when none are configured
const DEFAULT_SYNONYMS: &[&[&str]] = &[&["light", "lamp", "lights"]];

/// Groups of interchangeable single-word tokens
///
/// Members are normalized on construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct SynonymTable {
    sets: Vec<Vec<String>>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_SYNONYMS
                .iter()
                .map(|set| set.iter().map(ToString::to_string).collect::<Vec<_>>()),
        )
    }
}

impl From<Vec<Vec<String>>> for SynonymTable {
    fn from(sets: Vec<Vec<String>>) -> Self {
        Self::new(sets)
    }
}

impl From<SynonymTable> for Vec<Vec<String>> {
    fn from(table: SynonymTable) -> Self {
        table.sets
    }
}

impl SynonymTable {
    /// Build a table from synonym sets
    ///
    /// Empty members and duplicate members within a set are dropped
    #[must_use]
    pub fn new<I, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = String>,
    {
        let sets = sets
            .into_iter()
            .map(|set| {
                set.into_iter()
                    .map(|member| normalize(&member))
                    .filter(|member| !member.is_empty())
                    .collect::<IndexSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>()
            })
            .filter(|set| set.len() > 1)
            .collect();

        Self { sets }
    }

    /// A table with no synonyms
    #[must_use]
    pub const fn empty() -> Self {
        Self { sets: Vec::new() }
    }

    /// Configured synonym sets
    #[must_use]
    pub fn sets(&self) -> &[Vec<String>] {
        &self.sets
    }

    /// Alternate names for `name`, excluding `name` itself
    ///
    /// Each alternate substitutes exactly one token with another member of
    /// the same synonym set. Substitutions from different sets are never
    /// combined
    #[must_use]
    pub fn expand(&self, name: &CanonicalName) -> IndexSet<CanonicalName> {
        let tokens: Vec<&str> = name.tokens().collect();
        let mut alternates = IndexSet::new();

        for set in &self.sets {
            for (position, token) in tokens.iter().enumerate() {
                if !set.iter().any(|member| member == token) {
                    continue;
                }

                for member in set.iter().filter(|member| member != token) {
                    let mut substituted = tokens.clone();
                    substituted[position] = member.as_str();
                    alternates.insert(CanonicalName::new(&substituted.join(" ")));
                }
            }
        }

        alternates.shift_remove(name);
        alternates
    }
}
