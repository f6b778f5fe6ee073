//! Provider resolver port
//!
//! The debate orchestrator resolves a model override to a provider through
//! this port. `None` means no credential is configured for that model; the
//! orchestrator then falls back to the parent provider with a warning.

use crate::ports::llm_provider::LlmProviderPort;
use std::sync::Arc;

/// Port for constructing providers bound to specific models
pub trait ProviderResolverPort: Send + Sync {
    /// Resolve a provider for `model`, or `None` if no credential is
    /// configured for it.
    fn resolve(&self, model: &str) -> Option<Arc<dyn LlmProviderPort>>;
}

/// Resolver that never resolves anything.
///
/// Every model override falls back to the parent provider.
pub struct NoOverrideResolver;

impl ProviderResolverPort for NoOverrideResolver {
    fn resolve(&self, _model: &str) -> Option<Arc<dyn LlmProviderPort>> {
        None
    }
}
