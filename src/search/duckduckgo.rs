use dom_query::Document;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::{SearchError, SearchProvider, SearchResult};

const HTML_BASE: &str = "https://html.duckduckgo.com";
const LINK_ORIGIN: &str = "https://duckduckgo.com";

/// DuckDuckGo HTML endpoint client. Needs no API key.
#[derive(Clone)]
pub struct DuckDuckGo {
    http: Client,
    base_url: String,
}

impl DuckDuckGo {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: HTML_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }
}

impl SearchProvider for DuckDuckGo {
    async fn text(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = Url::parse_with_params(&format!("{}/html/", self.base_url), &[("q", query)])?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        // 202 carries the anomaly page served when the client is rate limited.
        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = %status, "DuckDuckGo search failed");
            return Err(SearchError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let results = parse_results(&html, max_results);
        debug!(query, results = results.len(), bytes = html.len(), "duckduckgo page parsed");
        Ok(results)
    }
}

/// Extracts organic results from the HTML result page, skipping ads.
pub(crate) fn parse_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Document::from(html);
    let mut results = Vec::new();

    for node in document.select("div.result").iter() {
        if results.len() >= max_results {
            break;
        }
        if node.has_class("result--ad") {
            continue;
        }

        let link = node.select("a.result__a");
        if !link.exists() {
            continue;
        }

        let title = collapse_whitespace(&link.text());
        let snippet = collapse_whitespace(&node.select(".result__snippet").text());
        let url = link.attr("href").and_then(|href| resolve_href(&href));

        results.push(SearchResult {
            title,
            snippet,
            url,
        });
    }

    results
}

/// Unwraps `/l/?uddg=` redirect links and makes relative links absolute.
fn resolve_href(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let resolved = Url::parse(LINK_ORIGIN).ok()?.join(raw).ok()?;
    let is_redirect = resolved
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && resolved.path() == "/l/";

    if is_redirect
        && let Some((_, target)) = resolved.query_pairs().find(|(k, _)| k == "uddg")
    {
        let target = target.trim();
        return (!target.is_empty()).then(|| target.to_string());
    }

    Some(resolved.to_string())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
