//! Roundtable definition source port
//!
//! A directory-like store of declarative roundtable definitions, keyed by a
//! stable identifier (e.g. filename stem). Loading one definition yields a
//! config or an error that the lister swallows.

use roundtable_domain::RoundtableConfig;

/// Port for enumerating and loading roundtable definitions
pub trait RoundtableSourcePort: Send + Sync {
    /// All loadable definitions, in listing order. A single unparsable
    /// definition is skipped (with a warning at the adapter), never aborts
    /// the listing.
    fn list(&self) -> Vec<RoundtableConfig>;

    /// Load one definition by its key (filename stem), if present.
    fn load(&self, key: &str) -> Option<RoundtableConfig>;
}
