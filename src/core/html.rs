// src/core/html.rs
//
// Thin query layer over `scraper`. Selectors used by the crate are constants,
// so a selector that fails to parse simply matches nothing.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::sanitize::{normalize_url, normalize_ws};

pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// All elements under `root` matching `css`, in document order.
pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    selector(css)
        .map(|sel| root.select(&sel).collect())
        .unwrap_or_default()
}

/// All elements of the document matching `css`, in document order.
pub fn select_doc<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    selector(css)
        .map(|sel| doc.select(&sel).collect())
        .unwrap_or_default()
}

pub fn first_in_doc<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    let found = doc.select(&sel).next();
    found
}

pub fn has_any_class(el: ElementRef<'_>, names: &[&str]) -> bool {
    el.value().classes().any(|c| names.contains(&c))
}

/// True when some ancestor of `el` (below `stop`, if given) carries one of `classes`.
pub fn has_ancestor_with_class(el: ElementRef<'_>, classes: &[&str], stop: Option<ElementRef<'_>>) -> bool {
    for node in el.ancestors() {
        if stop.is_some_and(|s| s.id() == node.id()) {
            return false;
        }
        if let Some(anc) = ElementRef::wrap(node) {
            if has_any_class(anc, classes) {
                return true;
            }
        }
    }
    false
}

/// Visible text, whitespace collapsed and trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

fn is_tag(el: ElementRef<'_>, names: &[&str]) -> bool {
    let name = el.value().name();
    names.iter().any(|n| name.eq_ignore_ascii_case(n))
}

fn child_elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap)
}

/// `el` itself when it is a table, otherwise the first table inside it.
pub fn find_table(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if is_tag(el, &["table"]) {
        return Some(el);
    }
    select_all(el, "table").into_iter().next()
}

/// Rows that belong to `table` itself (direct or via thead/tbody/tfoot);
/// rows of nested tables are not included.
pub fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in child_elements(table) {
        if is_tag(child, &["tr"]) {
            rows.push(child);
        } else if is_tag(child, &["thead", "tbody", "tfoot"]) {
            rows.extend(child_elements(child).filter(|c| is_tag(*c, &["tr"])));
        }
    }
    rows
}

/// `th`/`td` children of a row, left to right.
pub fn row_cells(tr: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    child_elements(tr).filter(|c| is_tag(*c, &["th", "td"])).collect()
}

/// Span attribute value; missing or unparsable → 1, anything above `max`
/// → `max`. `0` is kept (rowspan: "to the end"); callers decide what it means.
pub fn span_attr(el: ElementRef<'_>, attr: &str, max: usize) -> usize {
    el.value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
        .map(|v| v.parse::<usize>().unwrap_or(max).min(max))
        .unwrap_or(1)
}

/// Absolute, normalized link target. In-page anchors (`#...`) and
/// non-navigating schemes are not links for our purposes.
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let url = base.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(normalize_url(&url)),
        _ => None,
    }
}

/// Every resolvable `a[href]` under `el`.
pub fn links_in(el: ElementRef<'_>, base: &Url) -> Vec<String> {
    select_all(el, "a[href]")
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_href(base, href))
        .collect()
}

/// `id` of `el` and of every element inside it.
pub fn ids_in(el: ElementRef<'_>) -> Vec<String> {
    let mut ids: Vec<String> = el.value().id().map(str::to_string).into_iter().collect();
    ids.extend(
        select_all(el, "[id]")
            .into_iter()
            .filter_map(|e| e.value().id().map(str::to_string)),
    );
    ids
}
