//! AI Enhancement
//!
//! Provider adapters and the non-destructive enhancement pass applied
//! to generated documentation sections.
//!
//! ## Modules
//!
//! - `provider`: LlmProvider trait and the closed adapter set
//! - `prompt`: system context and per-section instruction templates
//! - `enhancer`: model-id parsing and the enhancement entry point

pub mod enhancer;
pub mod prompt;
pub mod provider;

pub use enhancer::{AiEnhancer, parse_model_id};
pub use provider::{
    AzureProvider, LlmProvider, OllamaProvider, OpenAiProvider, ProviderConfig, ProviderKind,
    SharedProvider, create_provider,
};
