//! Infrastructure layer: external adapters.
//!
//! Concrete implementations of the application ports: TOML roundtable
//! definitions on disk, figment-merged provider credentials, and an
//! OpenAI-compatible HTTP provider with a credentials-backed resolver.

pub mod config;
pub mod providers;
pub mod roundtables;

pub use config::{ConfigLoader, ProviderCredentials, ProvidersFileConfig};
#[cfg(feature = "http-provider")]
pub use providers::{CredentialResolver, OpenAiCompatProvider};
pub use roundtables::RoundtableStore;
