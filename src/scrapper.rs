use reqwest::Client;
use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::{ScrapeError, error_chain};

/// Desktop Chrome; the HTML results page turns away obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36";
pub const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_SNIPPETS: usize = 3;

// The results page is not ours and its class names drift. Keep every known
// variant here, highest priority first.
pub const RESULT_SELECTORS: &[&str] = &["div.result", "div.web-result"];
// `.result__body` wraps the title and the snippet on DuckDuckGo, so a single
// any-of lookup in document order would return the whole block. Trying
// `.result__snippet` first yields the bare snippet.
pub const SNIPPET_SELECTORS: &[&str] = &[".result__snippet", ".result__body"];
pub const TITLE_SELECTORS: &[&str] = &[".result__title a", ".result__a"];

/// Compiled selectors for one results-page layout.
///
/// Result containers are matched with any-of semantics and visited in
/// document order. Snippet and title lookups try each selector in turn and
/// take the first match with non-empty text.
#[derive(Debug)]
pub struct SelectorSet {
    results: Selector,
    snippets: Vec<Selector>,
    titles: Vec<Selector>,
}

impl SelectorSet {
    pub fn new(
        results: &[&str],
        snippets: &[&str],
        titles: &[&str],
    ) -> Result<Self, ScrapeError> {
        Ok(SelectorSet {
            results: parse_selector(&results.join(", "))?,
            snippets: snippets
                .iter()
                .map(|s| parse_selector(s))
                .collect::<Result<_, _>>()?,
            titles: titles
                .iter()
                .map(|s| parse_selector(s))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn duckduckgo() -> Result<Self, ScrapeError> {
        Self::new(RESULT_SELECTORS, SNIPPET_SELECTORS, TITLE_SELECTORS)
    }
}

fn parse_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Pulls up to `cap` snippets out of a results page, in page order.
///
/// Each result yields `"- <snippet>"`, or `"- <title> (Title only)"` when it
/// has no usable snippet. Results with neither are skipped and do not use up
/// a slot.
pub fn extract_snippets(html: &str, selectors: &SelectorSet, cap: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let candidates: Vec<ElementRef> = document.select(&selectors.results).collect();
    log::debug!("found {} potential result elements", candidates.len());

    let mut snippets = Vec::with_capacity(cap);
    for result in candidates {
        if snippets.len() >= cap {
            break;
        }
        if let Some(text) = first_text(result, &selectors.snippets) {
            log::debug!("extracted snippet: {text}");
            snippets.push(format!("- {text}"));
        } else if let Some(title) = first_text(result, &selectors.titles) {
            log::debug!("extracted title as fallback: {title}");
            snippets.push(format!("- {title} (Title only)"));
        }
    }
    snippets
}

fn first_text(element: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .flat_map(|selector| element.select(selector))
        .map(element_text)
        .find(|text| !text.is_empty())
}

// Collapses runs of whitespace the way a browser renders them.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scrapes a search engine's HTML results page for short text snippets.
#[derive(Debug, Clone)]
pub struct Scrapper {
    client: Client,
    search_url: Url,
    selectors: Arc<SelectorSet>,
    max_snippets: usize,
    timeout: Duration,
}

impl Scrapper {
    pub fn new(client: Client, search_url: &str) -> Result<Scrapper, ScrapeError> {
        Ok(Scrapper {
            client,
            search_url: Url::parse(search_url)?,
            selectors: Arc::new(SelectorSet::duckduckgo()?),
            max_snippets: MAX_SNIPPETS,
            timeout: SCRAPE_TIMEOUT,
        })
    }

    pub fn with_selectors(mut self, selectors: SelectorSet) -> Scrapper {
        self.selectors = Arc::new(selectors);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Scrapper {
        self.timeout = timeout;
        self
    }

    pub fn max_snippets(&self) -> usize {
        self.max_snippets
    }

    /// `<search_url>?q=<form-encoded query>`
    pub fn search_url_for(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }

    /// Best-effort search: any failure is logged and comes back as no
    /// snippets, so the caller falls back to the raw message.
    pub async fn search(&self, query: &str) -> Vec<String> {
        match self.try_search(query).await {
            Ok(snippets) => snippets,
            Err(ScrapeError::NoSnippets) => {
                log::warn!("no snippets extracted from search results page for query: {query}");
                Vec::new()
            }
            Err(e) => {
                log::error!(
                    "web scraping failed for query '{query}', error: {}",
                    error_chain(&e)
                );
                Vec::new()
            }
        }
    }

    pub async fn try_search(&self, query: &str) -> Result<Vec<String>, ScrapeError> {
        let url = self.search_url_for(query);
        log::info!("attempting to scrape search results from: {url}");

        let body = self.fetch_page(url).await?;

        // `Html` is !Send; it is created and dropped inside this sync call.
        let snippets = extract_snippets(&body, &self.selectors, self.max_snippets);
        if snippets.is_empty() {
            return Err(ScrapeError::NoSnippets);
        }
        Ok(snippets)
    }

    async fn fetch_page(&self, url: Url) -> Result<String, ScrapeError> {
        let res = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status));
        }
        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_form_encoded() {
        let scrapper = Scrapper::new(Client::new(), "https://html.duckduckgo.com/html/").unwrap();
        let url = scrapper.search_url_for("price of gold & silver");
        assert_eq!(
            url.as_str(),
            "https://html.duckduckgo.com/html/?q=price+of+gold+%26+silver"
        );
    }

    #[test]
    fn test_bad_selector_is_an_error() {
        let err =
            SelectorSet::new(&["div..result"], SNIPPET_SELECTORS, TITLE_SELECTORS).unwrap_err();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let selectors = SelectorSet::duckduckgo().unwrap();
        let html = r#"<div class="result"><a class="result__snippet">  Acme
            <b>up</b>   2%  </a></div>"#;
        assert_eq!(extract_snippets(html, &selectors, 3), vec!["- Acme up 2%"]);
    }
}
