//! Registry index from canonical names to things

use indexmap::IndexMap;

use super::normalize::CanonicalName;
use super::synonyms::SynonymTable;
use crate::things::Thing;

/// Lookup table from canonical name to registered thing
///
/// Several names (title plus synonym alternates) may point at the same
/// thing. A later registration under an existing name replaces the earlier
/// one. The index is immutable once built; refreshing the registry builds a
/// new one
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    things: Vec<Thing>,
    names: IndexMap<CanonicalName, usize>,
}

impl RegistryIndex {
    /// Build an index from a registry snapshot
    ///
    /// Things without a title or without a `properties` field are skipped
    #[must_use]
    pub fn build(things: impl IntoIterator<Item = Thing>, synonyms: &SynonymTable) -> Self {
        let mut index = Self::default();

        for thing in things {
            let Some(title) = thing.title.as_deref() else {
                tracing::debug!(
                    properties = thing.properties().count(),
                    "skipping thing without title"
                );
                continue;
            };

            if thing.properties.is_none() {
                tracing::debug!(title, "skipping thing without properties");
                continue;
            }

            let name = CanonicalName::new(title);
            let alternates = synonyms.expand(&name);
            let slot = index.things.len();

            tracing::trace!(%name, alternates = alternates.len(), "indexing thing");

            index.insert(name, slot);
            for alternate in alternates {
                index.insert(alternate, slot);
            }
            index.things.push(thing);
        }

        tracing::debug!(
            things = index.things.len(),
            names = index.names.len(),
            "built registry index"
        );

        index
    }

    fn insert(&mut self, name: CanonicalName, slot: usize) {
        if let Some(previous) = self.names.insert(name, slot)
            && previous != slot
        {
            tracing::debug!(previous, slot, "registry name reassigned to later thing");
        }
    }

    /// Find the thing registered under `name`
    #[must_use]
    pub fn lookup(&self, name: &CanonicalName) -> Option<&Thing> {
        self.names.get(name).map(|&slot| &self.things[slot])
    }

    /// All resolvable names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &CanonicalName> {
        self.names.keys()
    }

    /// Indexed things in registry order
    #[must_use]
    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    /// Number of resolvable names
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are resolvable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
