use tracing::{info, warn};

use crate::agent::{self, Agent, Tool};
use crate::classify::{Language, detect_language};
use crate::openai::ChatModel;
use crate::session::{Role, Turn};

pub const AGENT_NAME: &str = "BasketballAssistant";

/// Number of most recent user turns forwarded to the agent.
const CONTEXT_TURNS: usize = 3;

const LITHUANIAN_INSTRUCTIONS: &str = "Tu esi naudingas asistentas, specializuojiesi krepšinyje, ypač Lietuvos krepšinio lygoje (LKL), Eurolygoje ir NBA. \
Atsakyk lietuviškai. Jei nežinai atsakymo, naudok web_search įrankį. Cituok šaltinius.";

const ENGLISH_INSTRUCTIONS: &str = "You are a helpful assistant specialized in basketball, especially Lithuanian basketball (LKL), Euroleague, and NBA. \
For every answer, always use the web_search tool to find and cite a source, even if you think you know the answer. \
Cite sources as clickable links.";

pub fn instructions_for(language: Language) -> &'static str {
    match language {
        Language::Lithuanian => LITHUANIAN_INSTRUCTIONS,
        Language::English => ENGLISH_INSTRUCTIONS,
    }
}

/// Joins the last three user turns, oldest first, with newlines.
pub fn build_context(history: &[Turn]) -> String {
    let user_turns: Vec<&str> = history
        .iter()
        .filter(|t| t.role() == Role::User)
        .map(Turn::content)
        .collect();
    let start = user_turns.len().saturating_sub(CONTEXT_TURNS);
    user_turns[start..].join("\n")
}

/// Builds a fresh agent per turn and runs it over the recent user context.
pub struct Orchestrator<M, T> {
    model: M,
    search: T,
    model_id: String,
    max_turns: usize,
}

impl<M: ChatModel, T: Tool> Orchestrator<M, T> {
    pub fn new(model: M, search: T, model_id: impl Into<String>, max_turns: usize) -> Self {
        Self {
            model,
            search,
            model_id: model_id.into(),
            max_turns,
        }
    }

    #[cfg(test)]
    pub(crate) fn model(&self) -> &M {
        &self.model
    }

    /// Returns the agent's answer, or empty text after passing any failure to `report_error`.
    pub async fn respond(&self, history: &[Turn], report_error: impl FnOnce(&str)) -> String {
        let context = build_context(history);
        let language = detect_language(&context);

        let agent = Agent {
            name: AGENT_NAME,
            instructions: instructions_for(language).to_string(),
            model: self.model_id.clone(),
            tools: vec![&self.search],
        };

        match agent::run(&self.model, &agent, &context, self.max_turns).await {
            Ok(result) => {
                info!(?language, tool_calls = result.tool_calls, "agent run complete");
                result.final_output.unwrap_or_default()
            }
            Err(e) => {
                warn!(error = %e, "agent run failed");
                report_error(&format!("Error calling OpenAI Agent: {e}"));
                String::new()
            }
        }
    }
}
