//! Web search fallback.
//!
//! Scrapes the DuckDuckGo HTML endpoint and formats the first few hits as
//! plain text. Like the AI providers, the search surface is total:
//! failures render into the returned string rather than propagating.

use anyhow::Result;
use reqwest::{Client, header};
use scraper::{Html, Selector};

/// Maximum number of hits included in a result listing.
pub const RESULT_LIMIT: usize = 5;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// The web-search seam used by the dispatcher.
pub trait Searcher: Send + Sync + 'static {
    /// Run a search and return a display-ready result listing.
    fn search(&self, query: &str) -> impl Future<Output = String> + Send;
}

/// DuckDuckGo HTML-endpoint searcher.
#[derive(Clone)]
pub struct WebSearcher {
    client: Client,
    base_url: String,
    limit: usize,
}

impl WebSearcher {
    /// Create a searcher against the hosted endpoint.
    pub fn new(client: Client) -> Self {
        Self::custom(client, SEARCH_URL, RESULT_LIMIT)
    }

    /// Create a searcher against a custom endpoint URL.
    pub fn custom(client: Client, base_url: &str, limit: usize) -> Self {
        Self {
            client,
            base_url: base_url.to_owned(),
            limit,
        }
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(format!("Error performing web search: {}", status.as_u16()));
        }

        let body = response.text().await?;
        let hits = parse_results(&body, self.limit);
        tracing::debug!("parsed {} search hits", hits.len());
        Ok(format_results(&hits))
    }
}

impl Searcher for WebSearcher {
    async fn search(&self, query: &str) -> String {
        match self.fetch(query).await {
            Ok(results) => results,
            Err(e) => format!("Error during web search: {e}"),
        }
    }
}

/// One scraped search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Extract hits from a results page.
///
/// The limit applies to result blocks before filtering, so a block missing
/// its title or snippet consumes a slot without producing a hit.
pub fn parse_results(html: &str, limit: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let result_sel = Selector::parse("div.result").expect("static selector");
    let title_sel = Selector::parse("a.result__a").expect("static selector");
    let snippet_sel = Selector::parse("a.result__snippet").expect("static selector");

    let mut hits = Vec::new();
    for result in document.select(&result_sel).take(limit) {
        let Some(title_el) = result.select(&title_sel).next() else {
            continue;
        };
        let Some(snippet_el) = result.select(&snippet_sel).next() else {
            continue;
        };
        let Some(link) = title_el.value().attr("href") else {
            continue;
        };
        hits.push(SearchHit {
            title: title_el.text().collect::<String>().trim().to_owned(),
            snippet: snippet_el.text().collect::<String>().trim().to_owned(),
            link: link.to_owned(),
        });
    }
    hits
}

/// Format hits as a numbered plain-text listing.
pub fn format_results(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results found.".to_owned();
    }

    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, hit.title));
        out.push_str(&format!("   {}\n", hit.snippet));
        out.push_str(&format!("   Link: {}\n\n", hit.link));
    }
    out
}
