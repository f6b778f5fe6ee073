//! Ports consumed by the agent execution core.
//!
//! The core does not implement transports, tools, or definition storage;
//! it depends on these narrow contracts. Adapters live in the
//! infrastructure layer (or in the embedding application).

pub mod llm_provider;
pub mod progress;
pub mod provider_resolver;
pub mod roundtable_source;
pub mod tool_provider;
