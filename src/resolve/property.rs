//! Property matching and mutation descriptors

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::normalize::normalize;
use crate::things::{Property, Thing};

/// Property assumed when a request names no attribute
pub const DEFAULT_ATTRIBUTE: &str = "level";

/// Well-known attributes produced by the voice layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolicAttribute {
    Brightness,
    Color,
    ColorTemperature,
    Temperature,
}

impl SymbolicAttribute {
    /// Name compared against property keys and titles
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Color => "color",
            Self::ColorTemperature => "color temperature",
            Self::Temperature => "temperature",
        }
    }
}

/// Attribute named in a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attribute {
    Symbolic(SymbolicAttribute),
    Named(String),
}

impl Attribute {
    /// Canonical form used for matching
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Named(name) => normalize(name),
            Self::Symbolic(symbolic) => symbolic.as_str().to_string(),
        }
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for Attribute {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<SymbolicAttribute> for Attribute {
    fn from(symbolic: SymbolicAttribute) -> Self {
        Self::Symbolic(symbolic)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Symbolic(symbolic) => f.write_str(symbolic.as_str()),
        }
    }
}

/// HTTP method of a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Put,
}

impl Method {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully formed request that changes a property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationDescriptor {
    pub method: Method,
    /// Href of the property's first link; empty when it has none
    pub url: String,
    /// `{property_key: value}`
    pub payload: Map<String, Value>,
}

/// Finds the property a request refers to
#[derive(Debug, Clone)]
pub struct PropertyMatcher {
    default_attribute: String,
}

impl Default for PropertyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRIBUTE)
    }
}

impl PropertyMatcher {
    /// Create a matcher that falls back to `default_attribute`
    #[must_use]
    pub fn new(default_attribute: &str) -> Self {
        Self {
            default_attribute: normalize(default_attribute),
        }
    }

    /// Attribute used when a request names none
    #[must_use]
    pub fn default_attribute(&self) -> &str {
        &self.default_attribute
    }

    /// First property whose key or title matches `attribute`
    ///
    /// Properties are scanned in record order
    #[must_use]
    pub fn find<'a>(
        &self,
        thing: &'a Thing,
        attribute: Option<&Attribute>,
    ) -> Option<(&'a str, &'a Property)> {
        let wanted = attribute.map_or_else(|| self.default_attribute.clone(), Attribute::canonical);

        thing
            .properties()
            .find(|(key, property)| {
                normalize(key) == wanted
                    || property.title.as_deref().is_some_and(|title| normalize(title) == wanted)
            })
            .map(|(key, property)| (key.as_str(), property))
    }

    /// Build the mutation that writes `value` to the matching property
    ///
    /// Returns `None` if no property matches
    #[must_use]
    pub fn descriptor(
        &self,
        thing: &Thing,
        attribute: Option<&Attribute>,
        value: Option<Value>,
    ) -> Option<MutationDescriptor> {
        let Some((key, property)) = self.find(thing, attribute) else {
            tracing::debug!(
                thing = thing.title.as_deref().unwrap_or_default(),
                attribute = %attribute.map_or_else(|| self.default_attribute.clone(), ToString::to_string),
                "no matching property"
            );
            return None;
        };

        let url = property.href().unwrap_or_default().to_string();
        if url.is_empty() {
            tracing::warn!(property = key, "matched property has no links");
        }

        let mut payload = Map::new();
        payload.insert(key.to_string(), value.unwrap_or(Value::Null));

        Some(MutationDescriptor {
            method: Method::Put,
            url,
            payload,
        })
    }
}
