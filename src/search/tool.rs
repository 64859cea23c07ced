use serde::Deserialize;
use tracing::warn;

use super::{SearchProvider, web_search};
use crate::agent::Tool;

#[derive(Deserialize)]
struct WebSearchArgs {
    query: String,
}

/// Exposes `web_search` to the agent.
pub struct WebSearchTool<P> {
    provider: P,
}

impl<P: SearchProvider> WebSearchTool<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: SearchProvider> Tool for WebSearchTool<P> {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web with DuckDuckGo. Returns up to 5 numbered results with titles, snippets, and clickable source links."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                }
            },
            "required": ["query"],
            "additionalProperties": false
        })
    }

    async fn call(&self, arguments: &str) -> String {
        match serde_json::from_str::<WebSearchArgs>(arguments) {
            Ok(args) => web_search(&self.provider, &args.query).await,
            Err(e) => {
                warn!(error = %e, arguments, "invalid web_search arguments");
                format!("Invalid arguments for web_search: {e}. Expected {{\"query\": \"...\"}}.")
            }
        }
    }
}
