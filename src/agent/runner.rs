use tracing::{debug, warn};

use super::{Agent, AgentError, Tool};
use crate::openai::ChatModel;
use crate::openai::types::{ChatRequest, Message};

#[derive(Debug, Default)]
pub struct RunResult {
    /// Text of the model's final message, `None` when it produced no content.
    pub final_output: Option<String>,
    /// Number of tool invocations made during the run.
    pub tool_calls: usize,
}

/// Drives `agent` from a single user `input` until the model replies without tool calls.
pub async fn run<M: ChatModel, T: Tool>(
    model: &M,
    agent: &Agent<'_, T>,
    input: &str,
    max_turns: usize,
) -> Result<RunResult, AgentError> {
    let mut request = ChatRequest {
        model: agent.model.clone(),
        messages: vec![Message::system(&agent.instructions), Message::user(input)],
        tools: agent.tools.iter().map(|t| t.spec()).collect(),
    };
    let mut tool_calls = 0;

    for turn in 1..=max_turns {
        debug!(agent = agent.name, turn, "requesting completion");
        let reply = model.complete(&request).await?;

        if reply.requested_calls().is_empty() {
            let final_output = reply.content.filter(|c| !c.is_empty());
            return Ok(RunResult {
                final_output,
                tool_calls,
            });
        }

        let calls = reply.requested_calls().to_vec();
        request.messages.push(reply);

        for call in calls {
            let output = match find_tool(agent, &call.function.name) {
                Some(tool) => {
                    debug!(tool = %call.function.name, id = %call.id, "calling tool");
                    tool.call(&call.function.arguments).await
                }
                None => {
                    warn!(tool = %call.function.name, "model requested unknown tool");
                    format!("Tool '{}' does not exist.", call.function.name)
                }
            };
            tool_calls += 1;
            request.messages.push(Message::tool_result(call.id, output));
        }
    }

    Err(AgentError::MaxTurnsExceeded(max_turns))
}

fn find_tool<'a, T: Tool>(agent: &Agent<'a, T>, name: &str) -> Option<&'a T> {
    agent.tools.iter().copied().find(|t| t.name() == name)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::openai::types::{ChatRequest, FunctionCall, Message, MessageRole, ToolCall};
    use crate::openai::{ChatModel, OpenAiError};

    /// Chat model replaying queued replies and recording every request it receives.
    pub(crate) struct MockModel {
        replies: Mutex<VecDeque<Result<Message, OpenAiError>>>,
        requests: Mutex<Vec<serde_json::Value>>,
    }

    impl MockModel {
        pub(crate) fn with_replies(replies: Vec<Result<Message, OpenAiError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn answering(text: &str) -> Self {
            Self::with_replies(vec![Ok(assistant(Some(text)))])
        }

        /// Requests as serialized JSON, in call order.
        pub(crate) fn requests(&self) -> Vec<serde_json::Value> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ChatModel for MockModel {
        async fn complete(&self, request: &ChatRequest) -> Result<Message, OpenAiError> {
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request).unwrap());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(OpenAiError::RateLimited))
        }
    }

    pub(crate) fn assistant(content: Option<&str>) -> Message {
        Message {
            role: MessageRole::Assistant,
            content: content.map(Into::into),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub(crate) fn calling(calls: &[(&str, &str, &str)]) -> Message {
        Message {
            tool_calls: Some(
                calls
                    .iter()
                    .map(|(id, name, arguments)| ToolCall {
                        id: id.to_string(),
                        kind: "function".into(),
                        function: FunctionCall {
                            name: name.to_string(),
                            arguments: arguments.to_string(),
                        },
                    })
                    .collect(),
            ),
            ..assistant(None)
        }
    }
}
