//! Things API: wire types and HTTP collaborator
//!
//! The registry is read once per snapshot with `GET {host}/things/`; property
//! mutations are issued as `PUT {href}` with a `{key: value}` JSON body

mod client;
mod types;

pub use client::{DEFAULT_TIMEOUT, ThingsClient};
pub use types::{Link, Property, Thing};

use async_trait::async_trait;

use crate::Result;
use crate::resolve::MutationDescriptor;

/// Remote side of the gateway
#[async_trait]
pub trait ThingsApi: Send + Sync {
    /// Fetch the current registry snapshot
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RegistryUnavailable`] if the registry cannot be
    /// read, so callers can tell an empty registry from an unreachable one
    async fn things(&self) -> Result<Vec<Thing>>;

    /// Apply a property mutation
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected
    async fn put(&self, descriptor: &MutationDescriptor) -> Result<()>;

    /// Collaborator name for logging
    fn name(&self) -> &'static str;
}
