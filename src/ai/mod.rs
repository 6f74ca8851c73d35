//! AI Integration Layer
//!
//! Prompt rendering, the model client, and boundary validation of what the
//! model sends back.

pub mod prompt;
pub mod provider;
pub mod validation;

pub use prompt::{PromptPair, render_create, render_edit, summarize_sources};
pub use provider::{
    LlmProvider, LlmResponse, OpenAiProvider, ResponseMetadata, ResponseTiming, SharedProvider,
    TokenUsage, create_provider,
};
pub use validation::{check_document, extract_json_object};
