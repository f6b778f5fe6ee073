//! Configuration loading for providers and roundtable locations.

pub mod file_config;
pub mod loader;

pub use file_config::{ProviderCredentials, ProvidersFileConfig};
pub use loader::ConfigLoader;
