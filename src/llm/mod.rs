//! LLM integration module.
//!
//! Provides an OpenAI-compatible client for LLM API calls and
//! the prompt used to align claims against source documents.

mod client;
mod prompts;

pub use client::{LlmClient, LlmResponse, Message, Role, TokenUsage};
pub(crate) use client::extract_json;
pub use prompts::Prompts;
