//! Configuration file loader with multi-source merging

use super::file_config::ProvidersFileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./roundtable.toml` or `./.roundtable.toml`
    /// 3. Global: `~/.config/roundtable/config.toml` (platform equivalent)
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<ProvidersFileConfig, Box<figment::Error>> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(ProvidersFileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> ProvidersFileConfig {
        ProvidersFileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("roundtable").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["roundtable.toml", ".roundtable.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Default directory holding roundtable definitions, unless the config
    /// overrides it.
    pub fn default_roundtables_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("roundtable").join("roundtables"))
    }
}
