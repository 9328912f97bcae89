//! Things API wire types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A registered device as returned by `GET /things/`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thing {
    /// Human-readable name; records without one are not indexed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Controllable properties in record order; `None` when the record
    /// carries no `properties` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Property>>,
}

impl Thing {
    /// Create a titled thing with no properties
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            properties: Some(IndexMap::new()),
        }
    }

    /// Add a property, keeping record order
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, property: Property) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), property);
        self
    }

    /// Properties in record order, empty if the record has none
    pub fn properties(&self) -> impl Iterator<Item = (&String, &Property)> {
        self.properties.iter().flatten()
    }
}

/// A controllable attribute of a thing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Property {
    /// Display title (e.g. "Brightness Level")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Links usable to read or mutate the property
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Property {
    /// Create a titled property with a single link
    #[must_use]
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            links: vec![Link {
                href: href.into(),
                rel: None,
            }],
        }
    }

    /// Href of the first link, if any
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.links.first().map(|l| l.href.as_str())
    }
}

/// Link descriptor on a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Empty when the record omits it
    #[serde(default)]
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
}
