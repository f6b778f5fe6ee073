//! Roundtable definition storage.

pub mod loader;

pub use loader::RoundtableStore;
