//! HTML-scraping course providers.
//!
//! Each provider issues one GET with a randomized user agent and a short timeout,
//! then extracts (title, link) pairs with its own selector rules. Parsing is kept
//! in plain functions so it can be tested against captured markup.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{Client, StatusCode, Url};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::CourseRecommendation;
use crate::recommendations::{CourseProvider, ProviderError};

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

const DUCKDUCKGO_ENDPOINT: &str = "https://duckduckgo.com/html/";
const DUCKDUCKGO_BASE: &str = "https://duckduckgo.com";
const DUCKDUCKGO_RESULT_SELECTOR: &str = "a.result__a";
/// Query parameter DuckDuckGo uses to wrap the real destination of a result.
const REDIRECT_PARAM: &str = "uddg";

const COURSERA_ENDPOINT: &str = "https://www.coursera.org/search";
const COURSERA_BASE: &str = "https://www.coursera.org";
const COURSERA_CARD_SELECTOR: &str = r#"a[data-click-key="search.search.click.search_card"]"#;

// ────────────────────────────────────────────────────────────────────────────
// Shared HTTP
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client shared by the scraping providers. Cheap to clone.
#[derive(Clone)]
pub struct SearchHttp {
    client: Client,
}

impl SearchHttp {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// GETs `endpoint` with the given query and returns the body of a 200 response.
    async fn get_html(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(endpoint)
            .query(query)
            .header(reqwest::header::USER_AGENT, random_user_agent())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

// ────────────────────────────────────────────────────────────────────────────
// DuckDuckGo (primary)
// ────────────────────────────────────────────────────────────────────────────

pub struct DuckDuckGoProvider {
    http: SearchHttp,
    endpoint: String,
}

impl DuckDuckGoProvider {
    pub const NAME: &'static str = "duckduckgo";
    const MAX_RESULTS: usize = 2;

    pub fn new(http: SearchHttp) -> Self {
        Self::with_endpoint(http, DUCKDUCKGO_ENDPOINT)
    }

    pub fn with_endpoint(http: SearchHttp, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CourseProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn max_results(&self) -> usize {
        Self::MAX_RESULTS
    }

    async fn search(&self, skill: &str) -> Result<Vec<CourseRecommendation>, ProviderError> {
        let query = format!("top online courses for {skill}");
        let body = self
            .http
            .get_html(&self.endpoint, &[("q", query.as_str())])
            .await?;
        let results = parse_duckduckgo(&body, Self::MAX_RESULTS)?;
        debug!(skill, "duckduckgo parsed {} result(s)", results.len());
        Ok(results)
    }
}

/// Considers the first `limit` result anchors; unwraps redirect links and keeps
/// only absolute http(s) destinations.
pub(crate) fn parse_duckduckgo(
    html: &str,
    limit: usize,
) -> Result<Vec<CourseRecommendation>, ProviderError> {
    let selector = parse_selector(DUCKDUCKGO_RESULT_SELECTOR)?;
    let base = parse_url(DUCKDUCKGO_BASE)?;
    let document = Html::parse_document(html);

    let results = document
        .select(&selector)
        .take(limit)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href").unwrap_or_default();
            let link = unwrap_redirect(&base, href);
            link.starts_with("http").then(|| CourseRecommendation {
                title: anchor_text(&anchor),
                link,
                source: DuckDuckGoProvider::NAME.to_string(),
            })
        })
        .collect();

    Ok(results)
}

/// Returns the destination hidden in a `uddg` query parameter, or `href` unchanged.
fn unwrap_redirect(base: &Url, href: &str) -> String {
    base.join(href)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == REDIRECT_PARAM)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_else(|| href.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Coursera (fallback)
// ────────────────────────────────────────────────────────────────────────────

pub struct CourseraProvider {
    http: SearchHttp,
    endpoint: String,
}

impl CourseraProvider {
    pub const NAME: &'static str = "coursera";
    const MAX_RESULTS: usize = 1;

    pub fn new(http: SearchHttp) -> Self {
        Self::with_endpoint(http, COURSERA_ENDPOINT)
    }

    pub fn with_endpoint(http: SearchHttp, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CourseProvider for CourseraProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn max_results(&self) -> usize {
        Self::MAX_RESULTS
    }

    async fn search(&self, skill: &str) -> Result<Vec<CourseRecommendation>, ProviderError> {
        let body = self.http.get_html(&self.endpoint, &[("query", skill)]).await?;
        let results = parse_coursera(&body, Self::MAX_RESULTS)?;
        debug!(skill, "coursera parsed {} result(s)", results.len());
        Ok(results)
    }
}

/// Search cards carry site-relative links; they are resolved against the catalog root.
pub(crate) fn parse_coursera(
    html: &str,
    limit: usize,
) -> Result<Vec<CourseRecommendation>, ProviderError> {
    let selector = parse_selector(COURSERA_CARD_SELECTOR)?;
    let base = parse_url(COURSERA_BASE)?;
    let document = Html::parse_document(html);

    let results = document
        .select(&selector)
        .take(limit)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let link = base.join(href).ok()?;
            Some(CourseRecommendation {
                title: anchor_text(&anchor),
                link: link.to_string(),
                source: CourseraProvider::NAME.to_string(),
            })
        })
        .collect();

    Ok(results)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_selector(raw: &str) -> Result<Selector, ProviderError> {
    Selector::parse(raw).map_err(|e| ProviderError::Parse(format!("selector {raw}: {e}")))
}

fn parse_url(raw: &str) -> Result<Url, ProviderError> {
    Url::parse(raw).map_err(|e| ProviderError::Parse(format!("url {raw}: {e}")))
}

fn anchor_text(anchor: &ElementRef<'_>) -> String {
    anchor
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
