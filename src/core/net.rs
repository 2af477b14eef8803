// src/core/net.rs
//
// MediaWiki transport. One batched `action=query` request returns the
// rendered HTML of several pages; results come back keyed by page id, so
// callers match them to what they asked for by title.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::consts::{API_PATH, TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// One fetched page: the title the wiki reports and its rendered HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedPage {
    pub title: String,
    pub html: String,
}

/// Anything that can hand back rendered pages by title.
/// Results are unordered; pages that do not exist are simply absent.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_pages(&self, titles: &[String]) -> Result<Vec<FetchedPage>>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<ApiQuery>,
}

#[derive(Debug, Deserialize)]
struct ApiQuery {
    #[serde(default)]
    pages: HashMap<String, ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    title: String,
    #[serde(default)]
    missing: Option<serde_json::Value>,
    #[serde(default)]
    revisions: Vec<ApiRevision>,
}

#[derive(Debug, Deserialize)]
struct ApiRevision {
    #[serde(rename = "*")]
    content: String,
}

/// Parse an `action=query&prop=revisions` answer into pages.
pub fn parse_query_response(body: &str) -> Result<Vec<FetchedPage>> {
    let resp: ApiResponse = serde_json::from_str(body)?;
    let query = resp
        .query
        .ok_or_else(|| Error::MalformedResponse(s!("no `query` object")))?;

    let mut pages = Vec::with_capacity(query.pages.len());
    for (id, page) in query.pages {
        if page.missing.is_some() {
            logw!("Page does not exist: {}", page.title);
            continue;
        }
        let Some(rev) = page.revisions.into_iter().next() else {
            return Err(Error::MalformedResponse(format!(
                "page {id} ({}) has no revisions",
                page.title
            )));
        };
        pages.push(FetchedPage { title: page.title, html: rev.content });
    }
    Ok(pages)
}

pub struct WikiClient {
    http: Client,
    api_url: Url,
}

impl WikiClient {
    pub fn new(api_url: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, api_url })
    }

    /// Client for the wiki that serves `page_url`.
    pub fn for_page(page_url: &Url) -> Result<Self> {
        let api_url = page_url.join(API_PATH)?;
        Self::new(api_url)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Plain GET of a rendered page (the page being augmented).
    pub async fn fetch_document(&self, url: &Url) -> Result<String> {
        logd!("GET {url}");
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            loge!("GET {url} answered {status}");
            return Err(Error::Status { status: status.as_u16(), url: url.to_string() });
        }
        Ok(resp.text().await?)
    }
}

impl PageSource for WikiClient {
    async fn fetch_pages(&self, titles: &[String]) -> Result<Vec<FetchedPage>> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }
        let joined = titles.join("|");
        logd!("Querying {} page(s): {joined}", titles.len());

        let resp = self
            .http
            .get(self.api_url.clone())
            .query(&[
                ("format", "json"),
                ("action", "query"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("rvparse", "1"),
                ("titles", joined.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            loge!("Query for {} page(s) answered {status}", titles.len());
            return Err(Error::Status { status: status.as_u16(), url: self.api_url.to_string() });
        }
        let body = resp.text().await?;
        let pages = parse_query_response(&body)?;
        logf!("Received {} of {} requested page(s)", pages.len(), titles.len());
        Ok(pages)
    }
}
