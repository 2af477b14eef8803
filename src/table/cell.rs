// src/table/cell.rs
use std::rc::Rc;

use scraper::ElementRef;
use url::Url;

use crate::config::consts::{MAX_COL_SPAN, MAX_ROW_SPAN, PLACEHOLDER_CLASS, PLACEHOLDER_TEXT};
use crate::core::html;
use crate::core::sanitize::{normalize_ws, paper_numbers};

pub type CellRef = Rc<Cell>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CellTag {
    Th,
    #[default]
    Td,
}

impl CellTag {
    pub fn as_str(self) -> &'static str {
        match self {
            CellTag::Th => "th",
            CellTag::Td => "td",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    tag: CellTag,
    class: Option<String>,
    html: String,
    text: String,
    links: Vec<String>,
    ids: Vec<String>,
    papers: Vec<String>,
    row_span: usize,
    col_span: usize,
}

impl Cell {
    /// Plain data cell with the given text and no spans.
    pub fn new(text: &str) -> Self {
        let text = normalize_ws(text);
        Self {
            html: text.clone(),
            papers: paper_numbers(&text),
            text,
            row_span: 1,
            col_span: 1,
            ..Self::default()
        }
    }

    /// Header cell with the given text.
    pub fn header(text: &str) -> Self {
        Self { tag: CellTag::Th, ..Self::new(text) }
    }

    /// Filler for a grid position no source cell covers.
    pub fn blank() -> Self {
        Self::new("")
    }

    /// "Not applicable" filler for a column a row never had.
    pub fn placeholder() -> Self {
        Self {
            class: Some(s!(PLACEHOLDER_CLASS)),
            html: format!("<small>{PLACEHOLDER_TEXT}</small>"),
            ..Self::new(PLACEHOLDER_TEXT)
        }
    }

    pub fn from_element(el: ElementRef<'_>, base: &Url) -> Self {
        let tag = if el.value().name().eq_ignore_ascii_case("th") { CellTag::Th } else { CellTag::Td };
        let text = html::text_of(el);
        let links = html::links_in(el, base);

        let mut papers = paper_numbers(&text);
        for link in &links {
            for p in paper_numbers(link) {
                if !papers.contains(&p) { papers.push(p); }
            }
        }

        Self {
            tag,
            class: el.value().attr("class").map(str::to_string),
            html: el.inner_html(),
            text,
            links,
            ids: html::ids_in(el),
            papers,
            row_span: html::span_attr(el, "rowspan", MAX_ROW_SPAN),
            col_span: html::span_attr(el, "colspan", MAX_COL_SPAN),
        }
    }

    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links.extend(links.into_iter().map(Into::into));
        for link in &self.links {
            for p in paper_numbers(link) {
                if !self.papers.contains(&p) { self.papers.push(p); }
            }
        }
        self
    }

    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// `0` rows means "down to the last row of the table".
    pub fn with_span(mut self, rows: usize, cols: usize) -> Self {
        self.row_span = rows;
        self.col_span = cols;
        self
    }

    pub fn tag(&self) -> CellTag { self.tag }
    pub fn class(&self) -> Option<&str> { self.class.as_deref() }
    /// Inner markup as found in the source page.
    pub fn html(&self) -> &str { &self.html }
    /// Whitespace-normalized text; what merge compares.
    pub fn text(&self) -> &str { &self.text }
    pub fn links(&self) -> &[String] { &self.links }
    pub fn ids(&self) -> &[String] { &self.ids }
    pub fn papers(&self) -> &[String] { &self.papers }
    pub fn row_span(&self) -> usize { self.row_span }
    pub fn col_span(&self) -> usize { self.col_span }

    /// Merge equality: same normalized text.
    pub fn same_text(&self, other: &Cell) -> bool {
        self.text == other.text
    }
}
