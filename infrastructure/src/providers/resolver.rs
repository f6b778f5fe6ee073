//! Credentials-backed provider resolution for model overrides.

use crate::config::ProvidersFileConfig;
use crate::providers::openai_compat::OpenAiCompatProvider;
use roundtable_application::ports::llm_provider::LlmProviderPort;
use roundtable_application::ports::provider_resolver::ProviderResolverPort;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves model overrides to providers using the credentials config.
///
/// A model with no matching provider prefix, or whose provider has no usable
/// API key, resolves to `None`; the caller falls back to its parent provider.
pub struct CredentialResolver {
    config: ProvidersFileConfig,
}

impl CredentialResolver {
    pub fn new(config: ProvidersFileConfig) -> Self {
        Self { config }
    }
}

impl ProviderResolverPort for CredentialResolver {
    fn resolve(&self, model: &str) -> Option<Arc<dyn LlmProviderPort>> {
        let (name, credentials) = self.config.provider_for_model(model)?;
        let Some(api_key) = credentials.resolve_api_key() else {
            warn!("Provider '{}' matched model '{}' but has no API key", name, model);
            return None;
        };
        debug!("Resolved model '{}' to provider '{}'", model, name);
        Some(Arc::new(OpenAiCompatProvider::new(
            credentials.api_base.clone(),
            Some(api_key),
            model,
        )))
    }
}
