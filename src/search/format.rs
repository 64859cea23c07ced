use crate::markdown::{escape_bold, escape_md_link};

use super::SearchResult;

const SOURCE_LABEL: &str = "Šaltinis";
const SOURCE_NOT_FOUND: &str = "(šaltinio nuoroda nerasta)";

/// Numbered, source-cited rendering of search results in provider order.
pub fn format_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No search results found for: {query}");
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| format_entry(i + 1, r))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_entry(number: usize, result: &SearchResult) -> String {
    let citation = match result.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        // Link destinations keep the raw href; CommonMark accepts balanced parentheses there.
        Some(url) => format!("[{SOURCE_LABEL}: {}]({url})", escape_md_link(url)),
        None => SOURCE_NOT_FOUND.to_string(),
    };
    format!(
        "{number}. **{}**\n{}\n{citation}",
        escape_bold(&result.title),
        result.snippet
    )
}
