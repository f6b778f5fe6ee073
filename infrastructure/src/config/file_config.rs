//! Provider configuration from TOML (`[providers.*]` sections)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Credentials and routing for one OpenAI-compatible endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCredentials {
    /// Direct API key (not recommended; prefer the env var).
    pub api_key: Option<String>,
    /// Environment variable name to read the API key from.
    pub api_key_env: Option<String>,
    /// Base URL of the chat completions endpoint.
    pub api_base: String,
    /// Model name prefixes routed to this provider.
    pub model_prefixes: Vec<String>,
}

impl Default for ProviderCredentials {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model_prefixes: Vec::new(),
        }
    }
}

impl ProviderCredentials {
    /// Resolve the API key: direct value first, then the env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key
            && !key.is_empty()
        {
            return Some(key.clone());
        }
        self.api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty())
    }
}

/// Full providers configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersFileConfig {
    /// Model to use when no override is given.
    pub default_model: Option<String>,
    /// Directory of roundtable definition files. Absent means the
    /// per-user default location.
    pub roundtables_dir: Option<std::path::PathBuf>,
    /// Named providers, each with its own credentials and model prefixes.
    pub providers: HashMap<String, ProviderCredentials>,
}

impl ProvidersFileConfig {
    /// Find the provider responsible for `model` by longest matching model
    /// prefix across all providers.
    pub fn provider_for_model(&self, model: &str) -> Option<(&str, &ProviderCredentials)> {
        self.providers
            .iter()
            .filter_map(|(name, creds)| {
                creds
                    .model_prefixes
                    .iter()
                    .filter(|prefix| model.starts_with(prefix.as_str()))
                    .map(|prefix| (prefix.len(), name.as_str(), creds))
                    .max_by_key(|(len, _, _)| *len)
            })
            .max_by_key(|(len, _, _)| *len)
            .map(|(_, name, creds)| (name, creds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(providers: Vec<(&str, Vec<&str>)>) -> ProvidersFileConfig {
        ProvidersFileConfig {
            providers: providers
                .into_iter()
                .map(|(name, prefixes)| {
                    (
                        name.to_string(),
                        ProviderCredentials {
                            model_prefixes: prefixes.into_iter().map(String::from).collect(),
                            ..Default::default()
                        },
                    )
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_longest_prefix_wins() {
        let config = config_with(vec![
            ("openai", vec!["gpt-"]),
            ("azure", vec!["gpt-4.1-azure"]),
        ]);
        let (name, _) = config.provider_for_model("gpt-4.1-azure-eu").unwrap();
        assert_eq!(name, "azure");
        let (name, _) = config.provider_for_model("gpt-4o").unwrap();
        assert_eq!(name, "openai");
    }

    #[test]
    fn test_unmatched_model_resolves_to_none() {
        let config = config_with(vec![("openai", vec!["gpt-"])]);
        assert!(config.provider_for_model("claude-sonnet").is_none());
    }

    #[test]
    fn test_direct_api_key_wins_over_env() {
        let creds = ProviderCredentials {
            api_key: Some("sk-direct".to_string()),
            api_key_env: Some("SOME_UNSET_VAR_FOR_TEST".to_string()),
            ..Default::default()
        };
        assert_eq!(creds.resolve_api_key().as_deref(), Some("sk-direct"));
    }

    #[test]
    fn test_missing_key_resolves_to_none() {
        let creds = ProviderCredentials {
            api_key_env: Some("ROUNDTABLE_TEST_NO_SUCH_KEY".to_string()),
            ..Default::default()
        };
        assert!(creds.resolve_api_key().is_none());
    }

    #[test]
    fn test_toml_section_parses() {
        let config: ProvidersFileConfig = toml::from_str(
            r#"
            default_model = "gpt-4.1"

            [providers.openrouter]
            api_key_env = "OPENROUTER_API_KEY"
            api_base = "https://openrouter.ai/api/v1"
            model_prefixes = ["openrouter/", "deepseek/"]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_model.as_deref(), Some("gpt-4.1"));
        let (name, creds) = config.provider_for_model("deepseek/deepseek-chat").unwrap();
        assert_eq!(name, "openrouter");
        assert_eq!(creds.api_base, "https://openrouter.ai/api/v1");
    }
}
