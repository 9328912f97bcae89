//! Voice skill surface over the resolver
//!
//! Owns the Things API collaborator and the resolver built from its latest
//! registry snapshot. Reconfiguring builds a complete new snapshot before
//! replacing the old one, so lookups never observe a half-built index

use std::time::Duration;

use secrecy::SecretString;

use crate::config::Config;
use crate::resolve::{
    ActionRequest, CanonicalName, MutationDescriptor, NicknameTable, PropertyMatcher,
    RegistryIndex, Resolution, Resolver, SynonymTable,
};
use crate::things::{ThingsApi, ThingsClient};
use crate::Result;

/// Request protocol version this skill understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequestVersion {
    V1,
    V2,
    V3,
}

/// Result of handling a request end to end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Mutation was sent to the Things API
    Dispatched(MutationDescriptor),
    /// Request is not for this skill
    NotHandled(Resolution),
}

impl Outcome {
    /// Whether the request was dispatched
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// Things skill: registry snapshot plus dispatch
pub struct ThingsSkill {
    api: Box<dyn ThingsApi>,
    resolver: Resolver,
    synonyms: SynonymTable,
    matcher: PropertyMatcher,
    nicknames: NicknameTable,
}

impl std::fmt::Debug for ThingsSkill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThingsSkill")
            .field("api", &self.api.name())
            .field("entities", &self.resolver.index().len())
            .field("synonyms", &self.synonyms)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl ThingsSkill {
    /// Create a skill with an empty registry
    ///
    /// Call [`Self::refresh`] to load the registry
    #[must_use]
    pub fn new(api: impl ThingsApi + 'static, config: &Config) -> Self {
        Self {
            api: Box::new(api),
            resolver: Resolver::default(),
            synonyms: config.synonyms.clone(),
            matcher: PropertyMatcher::new(&config.default_attribute),
            nicknames: NicknameTable::new(&config.nicknames),
        }
    }

    /// Connect to the configured gateway and load its registry
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be built or the registry cannot be
    /// fetched
    pub async fn connect(config: &Config) -> Result<Self> {
        let client =
            ThingsClient::new(config.host.as_deref(), config.token.as_ref(), config.timeout)?;
        let mut skill = Self::new(client, config);
        skill.refresh().await?;
        Ok(skill)
    }

    /// Rebuild against a new host and token
    ///
    /// On failure the previous client and registry stay in place
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be built or the registry cannot be
    /// fetched
    pub async fn reconfigure(
        &mut self,
        host: Option<&str>,
        token: Option<&SecretString>,
        timeout: Duration,
    ) -> Result<usize> {
        let client = ThingsClient::new(host, token, timeout)?;
        self.replace_api(Box::new(client)).await
    }

    /// Swap in a new collaborator and rebuild the registry from it
    ///
    /// On failure the previous collaborator and registry stay in place
    ///
    /// # Errors
    ///
    /// Returns error if the registry cannot be fetched
    pub async fn replace_api(&mut self, api: Box<dyn ThingsApi>) -> Result<usize> {
        let resolver = self.build_resolver(api.as_ref()).await?;
        self.api = api;
        Ok(self.install(resolver))
    }

    /// Re-fetch the registry from the current collaborator
    ///
    /// On failure the previous registry stays in place
    ///
    /// # Errors
    ///
    /// Returns error if the registry cannot be fetched
    pub async fn refresh(&mut self) -> Result<usize> {
        let resolver = self.build_resolver(self.api.as_ref()).await?;
        Ok(self.install(resolver))
    }

    async fn build_resolver(&self, api: &dyn ThingsApi) -> Result<Resolver> {
        let things = api.things().await.inspect_err(|e| {
            tracing::warn!(api = api.name(), error = %e, "failed to fetch registry");
        })?;

        let index = RegistryIndex::build(things, &self.synonyms);
        Ok(Resolver::new(index, self.matcher.clone()).with_nicknames(self.nicknames.clone()))
    }

    fn install(&mut self, resolver: Resolver) -> usize {
        let entities = resolver.index().len();
        tracing::info!(
            api = self.api.name(),
            things = resolver.index().things().len(),
            entities,
            "registry rebuilt"
        );
        self.resolver = resolver;
        entities
    }

    /// Current resolver
    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Names to register with the voice layer
    #[must_use]
    pub fn entities(&self) -> Vec<CanonicalName> {
        self.resolver.entities().cloned().collect()
    }

    /// Scene names to register; scenes are not supported
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn scenes(&self) -> Vec<CanonicalName> {
        Vec::new()
    }

    /// Request protocol version
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn supported_request_version(&self) -> RequestVersion {
        RequestVersion::V3
    }

    /// Resolve without dispatching
    #[must_use]
    pub fn can_handle(&self, request: &ActionRequest) -> Resolution {
        self.resolver.resolve(request)
    }

    /// Resolve and dispatch
    ///
    /// Unresolvable requests return [`Outcome::NotHandled`] so the caller can
    /// pass them to other handlers
    ///
    /// # Errors
    ///
    /// Returns error if the mutation is rejected or cannot be sent
    pub async fn handle(&self, request: &ActionRequest) -> Result<Outcome> {
        match self.resolver.resolve(request) {
            Resolution::Handled(descriptor) => {
                self.api.put(&descriptor).await.inspect_err(|e| {
                    tracing::warn!(entity = %request.entity, error = %e, "dispatch failed");
                })?;
                tracing::info!(
                    entity = %request.entity,
                    action = %request.action,
                    url = %descriptor.url,
                    "dispatched"
                );
                Ok(Outcome::Dispatched(descriptor))
            }
            other => Ok(Outcome::NotHandled(other)),
        }
    }
}
