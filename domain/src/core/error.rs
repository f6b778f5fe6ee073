//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Roundtable '{0}' not found")]
    RoundtableNotFound(String),

    #[error("No roundtables configured")]
    NoRoundtables,

    #[error("Roundtable '{0}' has no personas")]
    NoPersonas(String),

    #[error("Invalid roundtable definition: {0}")]
    InvalidDefinition(String),
}
