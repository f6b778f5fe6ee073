//! Roundtable definition loader.
//!
//! Reads declarative roundtable definitions from a directory of `*.toml`
//! files. The filename stem is the definition key; the `name` field inside
//! is the display name.

use roundtable_application::ports::roundtable_source::RoundtableSourcePort;
use roundtable_domain::RoundtableConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory-backed store of roundtable definitions.
pub struct RoundtableStore {
    dir: PathBuf,
}

impl RoundtableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn parse_file(path: &Path) -> Option<RoundtableConfig> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Cannot read roundtable file {}: {}", path.display(), e);
                return None;
            }
        };
        match toml::from_str(&text) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Skipping invalid roundtable file {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl RoundtableSourcePort for RoundtableStore {
    /// Load every parsable definition, sorted by filename. Unreadable or
    /// invalid files are skipped with a warning.
    fn list(&self) -> Vec<RoundtableConfig> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("No roundtables directory at {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        paths.iter().filter_map(|path| Self::parse_file(path)).collect()
    }

    fn load(&self, key: &str) -> Option<RoundtableConfig> {
        let path = self.dir.join(format!("{key}.toml"));
        if !path.exists() {
            return None;
        }
        Self::parse_file(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_definition(dir: &Path, key: &str, body: &str) {
        fs::write(dir.join(format!("{key}.toml")), body).unwrap();
    }

    const VALID: &str = r#"
        name = "Architecture Review"
        description = "Design tradeoff analysis"

        [[personas]]
        name = "Architect"
        system_prompt = "You design systems."

        [[personas]]
        name = "Skeptic"
        system_prompt = "You poke holes."
        tools = ["web_search"]
    "#;

    #[test]
    fn test_load_by_filename_stem() {
        let dir = tempfile::tempdir().unwrap();
        write_definition(dir.path(), "arch_review", VALID);

        let store = RoundtableStore::new(dir.path());
        let rt = store.load("arch_review").unwrap();
        assert_eq!(rt.name, "Architecture Review");
        assert_eq!(rt.personas.len(), 2);
        assert_eq!(rt.personas[1].tools, vec!["web_search"]);
        assert_eq!(rt.rounds.max, 3);
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoundtableStore::new(dir.path());
        assert!(store.load("nonexistent").is_none());
    }

    #[test]
    fn test_list_skips_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        write_definition(dir.path(), "good", VALID);
        write_definition(dir.path(), "broken", "name = [unclosed");
        fs::write(dir.path().join("notes.txt"), "not a definition").unwrap();

        let store = RoundtableStore::new(dir.path());
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Architecture Review");
    }

    #[test]
    fn test_list_is_sorted_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_definition(dir.path(), "b_second", "name = \"Second\"");
        write_definition(dir.path(), "a_first", "name = \"First\"");

        let store = RoundtableStore::new(dir.path());
        let names: Vec<_> = store.list().into_iter().map(|rt| rt.name).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn test_missing_directory_lists_empty() {
        let store = RoundtableStore::new("/nonexistent/roundtables");
        assert!(store.list().is_empty());
    }
}
