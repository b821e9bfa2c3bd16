//! Provider abstraction over remote transcoding services.
//!
//! Callers describe work with a provider-agnostic [`TranscodeRequest`] and get
//! back a canonical [`Status`]; each backend translates to and from its own
//! API.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition and shared data types.
//! - [`providers`] -- Concrete provider implementations.
//! - [`registry`] -- Name-to-factory lookup used to pick a backend.
//! - [`error`] -- Error type shared by providers and the registry.

pub mod error;
pub mod provider;
pub mod providers;
pub mod registry;

pub use error::{ProviderError, Result};
pub use provider::{JobStatus, PresetSummary, Status, TranscodeRequest, TranscodingProvider};
pub use registry::{ProviderFactory, ProviderRegistry};
