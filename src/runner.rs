// src/runner.rs
use std::path::PathBuf;

use scraper::Html;
use url::Url;

use crate::{
    config::consts::NOTE,
    config::options::{Language, OutputFormat, RunOptions},
    core::net::{FetchedPage, PageSource, WikiClient},
    core::sanitize::normalize_title,
    error::Result,
    file, render,
    specs::{self, Criteria, SupportKind},
    table::{merge, TableSection},
};

/// The page being augmented: where it lives and its rendered HTML.
#[derive(Clone, Debug)]
pub struct CurrentPage {
    pub url: Url,
    pub html: String,
}

/// What the host inserts into the page: two merged sections and a note.
#[derive(Clone, Debug, Default)]
pub struct Augmentation {
    pub compiler: TableSection,
    pub library: TableSection,
    pub note: &'static str,
}

impl Augmentation {
    /// Nothing worth inserting.
    pub fn is_empty(&self) -> bool {
        self.compiler.body.is_empty() && self.library.body.is_empty()
    }
}

/// Criteria and in-scope revisions of the current page, read in one go so
/// the parsed document never outlives this call.
pub fn inspect_page(page: &CurrentPage, lang: Language) -> (Criteria, Vec<&'static str>) {
    let doc = Html::parse_document(&page.html);
    let criteria = specs::build_criteria(&doc, &page.url);
    let markers = specs::discover_markers(&doc, lang);
    let revisions = specs::select_revisions(lang.catalog(), &markers);
    logf!("Revisions in scope: {}", revisions.join(", "));
    (criteria, revisions)
}

fn find_page<'p>(pages: &'p [FetchedPage], title: &str) -> Option<&'p FetchedPage> {
    let wanted = normalize_title(title);
    pages.iter().find(|p| normalize_title(&p.title) == wanted)
}

/// Fold the relevant rows of every support page, in catalog order.
pub fn collect_support(
    titles: &[String],
    pages: &[FetchedPage],
    base: &Url,
    criteria: &Criteria,
) -> (TableSection, TableSection) {
    let mut compiler = TableSection::default();
    let mut library = TableSection::default();

    for title in titles {
        let Some(page) = find_page(pages, title) else {
            logd!("No content for {title}");
            continue;
        };
        let doc = Html::parse_document(&page.html);
        let c = specs::filter_rows(&doc, SupportKind::Compiler, base, criteria);
        let l = specs::filter_rows(&doc, SupportKind::Library, base, criteria);
        logf!("{title}: {} compiler row(s), {} library row(s)", c.body.len(), l.body.len());
        merge(&mut compiler, c);
        merge(&mut library, l);
    }
    (compiler, library)
}

async fn fetch_xref<S: PageSource>(
    source: &S,
    xref_page: Option<&str>,
    criteria: &Criteria,
) -> Result<Vec<FetchedPage>> {
    match xref_page {
        Some(title) if !criteria.papers.is_empty() => source.fetch_pages(&[s!(title)]).await,
        _ => Ok(Vec::new()),
    }
}

/// Build the augmentation for `page`: read the page, fetch the support
/// pages of the revisions in scope (and the cross-reference page, if any)
/// concurrently, then filter and merge page by page.
pub async fn augment<S: PageSource>(
    source: &S,
    page: &CurrentPage,
    lang: Language,
    xref_page: Option<&str>,
) -> Result<Augmentation> {
    let (mut criteria, revisions) = inspect_page(page, lang);
    let titles: Vec<String> = revisions.iter().map(|rev| lang.support_page_title(rev)).collect();

    let (pages, xref) = futures::try_join!(
        source.fetch_pages(&titles),
        fetch_xref(source, xref_page, &criteria),
    )?;

    for xp in &xref {
        let doc = Html::parse_document(&xp.html);
        let extra = specs::xref::related_papers(&doc, &page.url, &criteria.papers);
        logf!("Cross-reference {} adds {} paper number(s)", xp.title, extra.len());
        criteria.papers.extend(extra);
    }

    let (compiler, library) = collect_support(&titles, &pages, &page.url, &criteria);
    Ok(Augmentation { compiler, library, note: NOTE })
}

/// Render `aug` in the requested format; `None` when there is nothing to show.
pub fn render_output(aug: &Augmentation, format: OutputFormat) -> Result<Option<String>> {
    Ok(match format.delim() {
        None => render::to_html(aug),
        Some(sep) => render::to_delimited(aug, sep)?,
    })
}

/// Load the current page from disk or the network.
pub async fn load_current_page(opts: &RunOptions, client: &WikiClient) -> Result<CurrentPage> {
    let url = Url::parse(&opts.page_url)?;
    let html = match &opts.page_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => client.fetch_document(&url).await?,
    };
    Ok(CurrentPage { url, html })
}

/// Top-level runner used by the CLI. Returns the written path, if any
/// (stdout reports `None`).
pub async fn run(opts: &RunOptions) -> Result<Option<PathBuf>> {
    let page_url = Url::parse(&opts.page_url)?;
    let client = match &opts.api_url {
        Some(api) => WikiClient::new(Url::parse(api)?)?,
        None => WikiClient::for_page(&page_url)?,
    };
    let lang = opts.language();
    logf!("Augmenting {} ({:?}) via {}", page_url, lang, client.api_url());

    let page = load_current_page(opts, &client).await?;
    let aug = augment(&client, &page, lang, opts.xref_page.as_deref()).await?;

    let Some(out) = render_output(&aug, opts.format)? else {
        logw!("No relevant support rows for {}", page_url);
        return Ok(None);
    };
    Ok(file::write_output(opts.out.as_deref(), &out)?)
}
