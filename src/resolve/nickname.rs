//! User nicknames applied before registry lookup

use std::collections::HashMap;
use std::fmt::Debug;

use super::normalize::CanonicalName;

/// Maps a spoken name onto the name the registry knows
///
/// Consulted before the registry index, in front of synonym matching
pub trait Nicknames: Debug + Send + Sync {
    /// Registry name for `name`, or `name` unchanged
    fn resolve(&self, name: CanonicalName) -> CanonicalName;
}

/// Pass-through: nicknames are not learned yet
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNicknames;

impl Nicknames for NoNicknames {
    fn resolve(&self, name: CanonicalName) -> CanonicalName {
        name
    }
}

/// Fixed alias table, e.g. from configuration
#[derive(Debug, Clone, Default)]
pub struct NicknameTable {
    aliases: HashMap<CanonicalName, CanonicalName>,
}

impl NicknameTable {
    /// Build from `(nickname, registry name)` pairs
    ///
    /// Nicknames are compared after normalization; when two pairs collide
    /// the later one wins
    #[must_use]
    pub fn new<I, K, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::default();

        for (nickname, name) in aliases {
            let nickname = CanonicalName::new(nickname.as_ref());
            let name = CanonicalName::new(name.as_ref());

            if let Some(previous) = table.aliases.insert(nickname.clone(), name.clone())
                && previous != name
            {
                tracing::warn!(
                    %nickname,
                    %previous,
                    %name,
                    "conflicting nickname, keeping the later target"
                );
            }
        }

        table
    }
}

impl Nicknames for NicknameTable {
    fn resolve(&self, name: CanonicalName) -> CanonicalName {
        self.aliases.get(&name).cloned().unwrap_or(name)
    }
}
