//! Tool domain types

pub mod entities;

pub use entities::ToolDefinition;
