use tracing::info;

use crate::agent::Tool;
use crate::classify::is_in_domain;
use crate::openai::ChatModel;
use crate::respond::Orchestrator;
use crate::session::Session;

pub const OFF_DOMAIN_REFUSAL: &str =
    "Sorry, I am only a basketball fanatic and can only answer basketball-related questions.";

/// Outcome of one user message.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Off-topic message; the fixed refusal was recorded without calling the agent.
    Refused,
    Answered(String),
    /// The agent produced nothing (or failed); no assistant turn was recorded.
    Unanswered,
}

impl Reply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Refused => Some(OFF_DOMAIN_REFUSAL),
            Reply::Answered(text) => Some(text),
            Reply::Unanswered => None,
        }
    }
}

/// Owns the transcript and routes each message through the topic gate and the orchestrator.
pub struct Chat<M, T> {
    session: Session,
    orchestrator: Orchestrator<M, T>,
}

impl<M: ChatModel, T: Tool> Chat<M, T> {
    pub fn new(orchestrator: Orchestrator<M, T>) -> Self {
        Self {
            session: Session::initialize(),
            orchestrator,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub async fn submit(&mut self, text: &str, report_error: impl FnOnce(&str)) -> Reply {
        self.session.append_user(text);

        if !is_in_domain(text) {
            info!("off-domain question refused");
            self.session.append_assistant(OFF_DOMAIN_REFUSAL);
            return Reply::Refused;
        }

        let response = self
            .orchestrator
            .respond(self.session.turns(), report_error)
            .await;

        if response.is_empty() {
            return Reply::Unanswered;
        }
        self.session.append_assistant(response.as_str());
        Reply::Answered(response)
    }
}
