//! OpenAI Chat Completions boundary: wire types and HTTP client.

pub(crate) mod client;
pub(crate) mod types;

pub use client::{ChatModel, OpenAiClient, OpenAiError};
