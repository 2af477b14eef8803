// src/specs/criteria.rs
//! Relevance criteria read from the page being augmented.
//!
//! A support-table row belongs on the page when it links to the page (or a
//! parent of it), links to the page's primary declaration header, declares a
//! feature-test-macro anchor the page documents, or cites a paper /
//! defect-report number the page lists.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use url::Url;

use crate::config::consts::{DCL_HEADER_LINK_SELECTOR, DR_HEADER, FTM_HEADER_PREFIX};
use crate::core::html;
use crate::core::sanitize::normalize_url;
use crate::table::{tabulate_element, Grid, Row};

/// Immutable snapshot of everything that makes a row relevant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Current page URL, normalized (no fragment, no trailing `/`).
    pub page_url: String,
    /// Target of the primary declaration header link, if the page has one.
    pub header_link: Option<String>,
    /// Feature-test-macro tokens such as `cpp_concepts_201907L`.
    pub anchors: BTreeSet<String>,
    /// Canonical paper / defect-report numbers such as `P0734` or `CWG2518`.
    pub papers: BTreeSet<String>,
}

impl Criteria {
    pub fn for_url(page_url: &Url) -> Self {
        Self { page_url: normalize_url(page_url), ..Self::default() }
    }

    /// Is `link` the page itself or one of its parents?
    pub fn links_to_page(&self, link: &str) -> bool {
        let link = link.trim_end_matches('/');
        !link.is_empty() && format!("{}/", self.page_url).starts_with(&format!("{link}/"))
    }
}

/// Build the criteria from the current page.
pub fn build_criteria(doc: &Html, page_url: &Url) -> Criteria {
    let mut criteria = Criteria::for_url(page_url);

    criteria.header_link = html::first_in_doc(doc, DCL_HEADER_LINK_SELECTOR)
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| html::resolve_href(page_url, href));
    if criteria.header_link.is_none() {
        logd!("No declaration header on page; header-link criterion skipped");
    }

    for table in html::select_doc(doc, "table") {
        let grid = tabulate_element(table, page_url);
        let Some(first) = grid.get(0, 0).map(|c| c.text().to_ascii_lowercase()) else {
            continue;
        };
        if first.starts_with(FTM_HEADER_PREFIX) {
            criteria.anchors.extend(ftm_tokens(&grid));
        } else if first.eq_ignore_ascii_case(DR_HEADER) {
            criteria.papers.extend(dr_papers(&grid));
        }
    }

    logf!(
        "Criteria: page={} header={:?} anchors={} papers={}",
        criteria.page_url,
        criteria.header_link,
        criteria.anchors.len(),
        criteria.papers.len()
    );
    criteria
}

static FTM_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d+)L\b").expect("static regex"));

/// `__cpp_concepts` + `201907L` → `cpp_concepts_201907L`.
pub fn ftm_token(macro_text: &str, value_text: &str) -> Option<String> {
    let name = macro_text.split_whitespace().next()?.trim_start_matches('_');
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let value = FTM_VALUE.captures(value_text)?.get(1)?.as_str();
    Some(format!("{name}_{value}L"))
}

fn ftm_tokens(grid: &Grid) -> Vec<String> {
    let value_col = grid.rows[0]
        .cells
        .iter()
        .position(|c| c.as_ref().is_some_and(|c| c.text().eq_ignore_ascii_case("value")))
        .unwrap_or(1);

    grid.rows
        .iter()
        .skip(1)
        .filter_map(|row| {
            let name = row.cells.first()?.as_ref()?;
            let value = row.cells.get(value_col)?.as_ref()?;
            ftm_token(name.text(), value.text())
        })
        .collect()
}

fn dr_papers(grid: &Grid) -> Vec<String> {
    grid.rows
        .iter()
        .skip(1)
        .flat_map(|row| row.cells.iter().flatten())
        .flat_map(|cell| cell.papers().iter().cloned())
        .collect()
}

/// Does `row` belong on the page described by `criteria`?
pub fn is_relevant(row: &Row, criteria: &Criteria) -> bool {
    if row.links().any(|link| criteria.links_to_page(link)) {
        return true;
    }
    if let Some(header) = &criteria.header_link {
        if row.links().any(|link| link == header.as_str()) {
            return true;
        }
    }
    if row.ids().any(|id| criteria.anchors.contains(id)) {
        return true;
    }
    row.papers().any(|p| criteria.papers.contains(p))
}
