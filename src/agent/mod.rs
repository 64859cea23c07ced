//! Minimal tool-calling agent: instructions + tools, driven by a chat model until it answers.

pub(crate) mod runner;
mod tool;

pub use runner::run;
pub use tool::Tool;

use crate::openai::OpenAiError;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("{0}")]
    Provider(#[from] OpenAiError),

    #[error("Max turns ({0}) exceeded")]
    MaxTurnsExceeded(usize),
}

/// Per-run agent identity. Holds no conversation state.
pub struct Agent<'a, T> {
    pub name: &'static str,
    pub instructions: String,
    pub model: String,
    pub tools: Vec<&'a T>,
}
