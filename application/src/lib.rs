//! Application layer: ports and use cases.
//!
//! Defines the outward-facing ports (LLM provider, tool capabilities,
//! roundtable sources, progress sinks) and the use cases built on them: the
//! tool execution loop, debate personas, and the debate orchestrator.

pub mod ports;
pub mod use_cases;

pub use ports::llm_provider::{GenerationParams, LlmProviderPort, ProviderError};
pub use ports::progress::{NoProgress, ProgressSink, ToolCallSink};
pub use ports::provider_resolver::{NoOverrideResolver, ProviderResolverPort};
pub use ports::roundtable_source::RoundtableSourcePort;
pub use ports::tool_provider::{NoTools, ToolCapabilityPort, ToolSubset};
pub use use_cases::persona::Persona;
pub use use_cases::run_debate::{
    BLOCKED_PERSONA_TOOLS, DebateOrchestrator, RunDebateError,
};
pub use use_cases::run_tool_loop::{DEFAULT_MAX_ITERATIONS, LoopOutcome, ToolLoop};
