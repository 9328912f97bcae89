//! Things Gateway - voice device control for the Things API
//!
//! This library resolves spoken device references into property mutations:
//! - Name normalization and synonym expansion
//! - Registry index over a Things API snapshot
//! - Action translation and property matching
//! - Dispatch through the Things HTTP API
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              Voice layer (intent parsing)            │
//! └────────────────────┬────────────────────────────────┘
//!                      │ ActionRequest
//! ┌────────────────────▼────────────────────────────────┐
//! │                   ThingsSkill                        │
//! │  Resolver: normalize │ index │ translate │ match     │
//! └────────────────────┬────────────────────────────────┘
//!                      │ MutationDescriptor
//! ┌────────────────────▼────────────────────────────────┐
//! │              Things API (GET / PUT)                  │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod resolve;
pub mod skill;
pub mod things;

pub use config::Config;
pub use error::{Error, Result};
pub use resolve::{
    Action, ActionRequest, Attribute, CanonicalName, MutationDescriptor, Resolution, Resolver,
    SymbolicAttribute, SynonymTable, normalize,
};
pub use skill::{Outcome, RequestVersion, ThingsSkill};
pub use things::{Property, Thing, ThingsApi, ThingsClient};
