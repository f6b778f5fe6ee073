//! LLM provider adapters.

#[cfg(feature = "http-provider")]
pub mod openai_compat;
#[cfg(feature = "http-provider")]
pub mod resolver;

#[cfg(feature = "http-provider")]
pub use openai_compat::OpenAiCompatProvider;
#[cfg(feature = "http-provider")]
pub use resolver::CredentialResolver;
