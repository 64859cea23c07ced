//! Web search: DuckDuckGo client, result formatting, and the `web_search` agent tool.

use tracing::{info, warn};

pub(crate) mod duckduckgo;
pub(crate) mod format;
mod tool;

pub use duckduckgo::DuckDuckGo;
pub use tool::WebSearchTool;

/// Number of results requested per query.
pub const MAX_RESULTS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search provider returned status {0}")]
    Status(u16),

    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: Option<String>,
}

/// Abstraction over the text search provider.
/// Implemented by `DuckDuckGo` for production; mock implementations used in tests.
pub trait SearchProvider {
    async fn text(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

/// Runs a search and renders it for the agent. Never fails: provider errors become text.
pub async fn web_search(provider: &impl SearchProvider, query: &str) -> String {
    match provider.text(query, MAX_RESULTS).await {
        Ok(results) => {
            info!(query, results = results.len(), "web search complete");
            format::format_results(query, &results)
        }
        Err(e) => {
            warn!(query, error = %e, "web search failed");
            format!("Error performing web search: {e}")
        }
    }
}
