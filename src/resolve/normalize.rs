//! Canonical names for device and attribute matching

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize free text into the canonical matching form
///
/// Lowercases and trims surrounding whitespace. Internal whitespace is left
/// as-is, so "kitchen  light" and "kitchen light" stay distinct
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A normalized name; the only key space used for matching
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CanonicalName(String);

impl CanonicalName {
    /// Normalize `name` into a canonical name
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(normalize(name))
    }

    /// Borrow as a plain string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Space-separated tokens
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }
}

impl From<&str> for CanonicalName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CanonicalName {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<CanonicalName> for String {
    fn from(name: CanonicalName) -> Self {
        name.0
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Kitchen Light \t"), "kitchen light");
        assert_eq!(normalize("ON/OFF"), "on/off");
    }

    #[test]
    fn keeps_internal_whitespace() {
        assert_eq!(normalize(" Living  Room "), "living  room");
    }

    #[test]
    fn idempotent() {
        for s in ["", "   ", "Kitchen Light", " ÄRGER Lamp ", "a\tb", "already normal"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn canonical_name_normalizes_on_construction() {
        let name = CanonicalName::from(" Porch Light");
        assert_eq!(name, "porch light");
        assert_eq!(name.tokens().collect::<Vec<_>>(), ["porch", "light"]);
        assert_eq!(CanonicalName::new(name.as_str()), name);
    }

    #[test]
    fn deserialize_normalizes() {
        let name: CanonicalName = serde_json::from_str(r#"" Hall Lamp ""#).unwrap();
        assert_eq!(name.to_string(), "hall lamp");
    }
}
