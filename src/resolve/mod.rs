//! Device name resolution and command translation
//!
//! Turns a structured voice request (entity, action, attribute, value) into a
//! property mutation against the Things API:
//!
//! ```text
//! entity ──normalize──► nicknames ──► RegistryIndex ──► Thing
//!                                                        │
//! action, attribute, value ──translate──► PropertyMatcher ──► MutationDescriptor
//! ```

mod action;
mod index;
mod nickname;
mod normalize;
mod property;
mod synonyms;

pub use action::{Action, translate};
pub use index::RegistryIndex;
pub use nickname::{NicknameTable, Nicknames, NoNicknames};
pub use normalize::{CanonicalName, normalize};
pub use property::{
    Attribute, DEFAULT_ATTRIBUTE, Method, MutationDescriptor, PropertyMatcher, SymbolicAttribute,
};
pub use synonyms::SynonymTable;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::things::Thing;

/// Structured request from the voice layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Free-text device name as spoken
    pub entity: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ActionRequest {
    /// Create a request with no attribute or value
    #[must_use]
    pub fn new(entity: impl Into<String>, action: Action) -> Self {
        Self {
            entity: entity.into(),
            action,
            attribute: None,
            value: None,
        }
    }

    /// Set the attribute
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Set the value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Outcome of resolving a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Request maps onto a property mutation
    Handled(MutationDescriptor),
    /// No thing is registered under the name
    UnknownDevice(CanonicalName),
    /// Thing found but no property matches the attribute
    NoMatchingProperty,
    /// Action is not a device mutation; another handler should take it
    Deferred(Action),
}

impl Resolution {
    /// Whether this resolver can satisfy the request
    #[must_use]
    pub const fn can_handle(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    /// The mutation, if handled
    #[must_use]
    pub const fn descriptor(&self) -> Option<&MutationDescriptor> {
        match self {
            Self::Handled(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// Take the mutation, if handled
    #[must_use]
    pub fn into_descriptor(self) -> Option<MutationDescriptor> {
        match self {
            Self::Handled(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

/// Resolves requests against one registry snapshot
#[derive(Debug)]
pub struct Resolver {
    index: RegistryIndex,
    matcher: PropertyMatcher,
    nicknames: Box<dyn Nicknames>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(RegistryIndex::default(), PropertyMatcher::default())
    }
}

impl Resolver {
    /// Create a resolver over a built index
    #[must_use]
    pub fn new(index: RegistryIndex, matcher: PropertyMatcher) -> Self {
        Self {
            index,
            matcher,
            nicknames: Box::new(NoNicknames),
        }
    }

    /// Build a resolver from a registry snapshot with the default matcher
    #[must_use]
    pub fn from_things(things: impl IntoIterator<Item = Thing>, synonyms: &SynonymTable) -> Self {
        Self::new(RegistryIndex::build(things, synonyms), PropertyMatcher::default())
    }

    /// Replace the nickname layer
    #[must_use]
    pub fn with_nicknames(mut self, nicknames: impl Nicknames + 'static) -> Self {
        self.nicknames = Box::new(nicknames);
        self
    }

    /// Underlying registry index
    #[must_use]
    pub const fn index(&self) -> &RegistryIndex {
        &self.index
    }

    /// Find the thing a spoken name refers to
    #[must_use]
    pub fn lookup(&self, entity: &str) -> Option<&Thing> {
        let name = self.nicknames.resolve(CanonicalName::new(entity));
        self.index.lookup(&name)
    }

    /// Resolve a request into a property mutation
    #[must_use]
    pub fn resolve(&self, request: &ActionRequest) -> Resolution {
        let name = self.nicknames.resolve(CanonicalName::new(&request.entity));

        let Some(thing) = self.index.lookup(&name) else {
            tracing::debug!(entity = %name, "unknown device");
            return Resolution::UnknownDevice(name);
        };

        if !request.action.is_device_action() {
            tracing::debug!(entity = %name, action = %request.action, "deferring action");
            return Resolution::Deferred(request.action);
        }

        let (attribute, value) = translate(
            request.action,
            request.attribute.clone(),
            request.value.clone(),
        );

        match self.matcher.descriptor(thing, attribute.as_ref(), value) {
            Some(descriptor) => {
                tracing::debug!(
                    entity = %name,
                    action = %request.action,
                    url = %descriptor.url,
                    "resolved request"
                );
                Resolution::Handled(descriptor)
            }
            None => Resolution::NoMatchingProperty,
        }
    }

    /// Names this resolver can resolve, for registration with the voice layer
    pub fn entities(&self) -> impl Iterator<Item = &CanonicalName> {
        self.index.names()
    }
}
