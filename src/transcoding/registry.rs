//! Registry of provider factories keyed by provider name.
//!
//! The [`ProviderRegistry`] is built once at startup and passed by reference
//! to whatever needs to instantiate providers. Selecting a backend is a plain
//! lookup on the configured name.

use std::collections::BTreeMap;

use super::error::{ProviderError, Result};
use super::provider::TranscodingProvider;
use super::providers::elementalconductor;
use crate::config::Config;

/// Constructor for a provider. Returns [`ProviderError::InvalidConfig`] when
/// `config` lacks what the provider needs.
pub type ProviderFactory = fn(&Config) -> Result<Box<dyn TranscodingProvider>>;

/// A registry mapping provider names to their factories.
///
/// # Examples
///
/// ```rust,ignore
/// use transcoding_api::transcoding::ProviderRegistry;
///
/// let registry = ProviderRegistry::with_builtin();
/// let provider = registry.create("elementalconductor", &config)?;
/// let status = provider.job_status("42").await?;
/// ```
pub struct ProviderRegistry {
    factories: BTreeMap<&'static str, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create an empty registry with no factories.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry holding every provider shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(elementalconductor::NAME, elementalconductor::factory);
        registry
    }

    /// Register `factory` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: &'static str, factory: ProviderFactory) {
        self.factories.insert(name, factory);
    }

    /// Look up the factory registered under `name`.
    pub fn factory(&self, name: &str) -> Result<ProviderFactory> {
        self.factories
            .get(name)
            .copied()
            .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))
    }

    /// Look up `name` and build a provider from `config`.
    pub fn create(&self, name: &str, config: &Config) -> Result<Box<dyn TranscodingProvider>> {
        let factory = self.factory(name)?;
        factory(config)
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcoding::provider::{JobStatus, PresetSummary, TranscodeRequest};
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    /// A minimal stub provider used for testing.
    struct StubProvider;

    #[async_trait]
    impl TranscodingProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn transcode(&self, _request: &TranscodeRequest) -> Result<JobStatus> {
            Err(ProviderError::invalid_request("not implemented"))
        }

        async fn job_status(&self, _job_id: &str) -> Result<JobStatus> {
            Err(ProviderError::invalid_request("not implemented"))
        }

        async fn cancel_job(&self, _job_id: &str) -> Result<()> {
            Ok(())
        }

        async fn list_presets(&self) -> Result<Vec<PresetSummary>> {
            Ok(Vec::new())
        }

        async fn healthcheck(&self) -> Result<()> {
            Ok(())
        }
    }

    fn stub_factory(_config: &Config) -> Result<Box<dyn TranscodingProvider>> {
        Ok(Box::new(StubProvider))
    }

    fn rejecting_factory(_config: &Config) -> Result<Box<dyn TranscodingProvider>> {
        Err(ProviderError::InvalidConfig)
    }

    #[test]
    fn empty_registry() {
        let registry = ProviderRegistry::new();
        assert!(registry.names().is_empty());
        assert_matches!(
            registry.factory("elementalconductor").err(),
            Some(ProviderError::UnknownProvider(ref name)) if name == "elementalconductor"
        );
    }

    #[test]
    fn builtin_includes_elemental_conductor() {
        let registry = ProviderRegistry::with_builtin();
        assert!(registry.factory(elementalconductor::NAME).is_ok());
        assert_eq!(registry.names(), vec!["elementalconductor"]);
    }

    #[test]
    fn register_and_create() {
        let mut registry = ProviderRegistry::new();
        registry.register("stub", stub_factory);

        let provider = registry.create("stub", &Config::default()).unwrap();
        assert_eq!(provider.name(), "stub");
    }

    #[test]
    fn create_propagates_factory_errors() {
        let mut registry = ProviderRegistry::new();
        registry.register("picky", rejecting_factory);

        assert_matches!(
            registry.create("picky", &Config::default()).err(),
            Some(ProviderError::InvalidConfig)
        );
    }

    #[test]
    fn create_unknown_name_is_an_error() {
        let registry = ProviderRegistry::with_builtin();
        assert_matches!(
            registry.create("zencoder", &Config::default()).err(),
            Some(ProviderError::UnknownProvider(_))
        );
    }

    #[test]
    fn register_replaces_existing_factory() {
        let mut registry = ProviderRegistry::new();
        registry.register("stub", rejecting_factory);
        registry.register("stub", stub_factory);

        assert!(registry.create("stub", &Config::default()).is_ok());
        assert_eq!(registry.names(), vec!["stub"]);
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = ProviderRegistry::new();
        registry.register("zeta", stub_factory);
        registry.register("alpha", stub_factory);
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
    }
}
