// src/specs/revisions.rs
//! Which standard revisions (and so which support pages) apply to a page.
//!
//! Pages tag declarations with classes such as `t-since-cxx17` or
//! `t-until-c23`. Each tagged element gives one [`MarkerSet`]; the selected
//! range is the union of all of them, where a set without `since` starts at
//! the first catalog entry and a set without `until` runs to the last one.

use scraper::{ElementRef, Html};

use crate::config::consts::{
    DCL_BLOCK_CLASS, DCL_CLASS, MARK_REV_CLASS, NESTED_DCL_CLASSES, TITLE_MARKER_SELECTOR,
};
use crate::config::options::Language;
use crate::core::html;

/// Optional since/until indices into a revision catalog (inclusive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkerSet {
    pub since: Option<usize>,
    pub until: Option<usize>,
}

impl MarkerSet {
    pub fn since(i: usize) -> Self { Self { since: Some(i), until: None } }
    pub fn until(i: usize) -> Self { Self { since: None, until: Some(i) } }
    pub fn range(since: usize, until: usize) -> Self { Self { since: Some(since), until: Some(until) } }

    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }
}

/// Catalog entries covered by the union of `markers`, in catalog order.
/// No markers at all selects the whole catalog.
pub fn select_revisions<'a>(catalog: &[&'a str], markers: &[MarkerSet]) -> Vec<&'a str> {
    let Some(last) = catalog.len().checked_sub(1) else {
        return Vec::new();
    };
    if markers.is_empty() {
        return catalog.to_vec();
    }
    let since = markers.iter().map(|m| m.since.unwrap_or(0)).min().unwrap_or(0);
    let until = markers.iter().map(|m| m.until.unwrap_or(last)).max().unwrap_or(last).min(last);
    if since > until {
        return Vec::new();
    }
    catalog[since..=until].to_vec()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Since,
    Until,
}

/// Catalog index for a revision named by a marker. Revisions without a
/// support page snap inwards: `since` to the next catalog entry, `until` to
/// the previous one (or the first, when none is older).
fn resolve(lang: Language, rev: &str, bound: Bound) -> Option<usize> {
    let catalog = lang.catalog();
    if let Some(i) = catalog.iter().position(|r| *r == rev) {
        return Some(i);
    }
    let order = lang.ordering();
    let Some(pos) = order.iter().position(|r| *r == rev) else {
        logd!("Unknown revision marker {rev:?} ignored");
        return None;
    };
    let rank = |r: &&str| order.iter().position(|o| o == r).unwrap_or(usize::MAX);
    match bound {
        Bound::Since => catalog.iter().position(|r| rank(r) >= pos).or(Some(catalog.len().saturating_sub(1))),
        Bound::Until => catalog.iter().rposition(|r| rank(r) <= pos).or(Some(0)),
    }
}

/// Marker set carried by one class attribute list.
fn marker_from_classes<'c>(lang: Language, classes: impl Iterator<Item = &'c str>) -> MarkerSet {
    let since_prefix = format!("t-since-{}", lang.marker_prefix());
    let until_prefix = format!("t-until-{}", lang.marker_prefix());
    let mut set = MarkerSet::default();
    for class in classes {
        if let Some(rev) = class.strip_prefix(&since_prefix).filter(|r| is_rev(r)) {
            set.since = resolve(lang, rev, Bound::Since).or(set.since);
        } else if let Some(rev) = class.strip_prefix(&until_prefix).filter(|r| is_rev(r)) {
            set.until = resolve(lang, rev, Bound::Until).or(set.until);
        }
    }
    set
}

// `t-since-c11` must not be read as C when the page is `t-since-cxx11`.
fn is_rev(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn element_marker(lang: Language, el: ElementRef<'_>) -> MarkerSet {
    marker_from_classes(lang, el.value().classes())
}

/// Marker sets found on the page.
///
/// A single revision marker on the page title decides alone. Otherwise every
/// top-level declaration block is scanned: each declaration yields its own
/// classes combined with the revision notes inside it, and each revision note
/// outside a declaration yields one set of its own.
pub fn discover_markers(doc: &Html, lang: Language) -> Vec<MarkerSet> {
    let title: Vec<MarkerSet> = html::select_doc(doc, TITLE_MARKER_SELECTOR)
        .into_iter()
        .map(|el| element_marker(lang, el))
        .filter(|m| !m.is_unbounded())
        .collect();
    if title.len() == 1 {
        logd!("Title marker decides revisions: {:?}", title[0]);
        return title;
    }

    let mut sets = Vec::new();
    let block_sel = format!(".{DCL_BLOCK_CLASS}");
    for block in html::select_doc(doc, &block_sel) {
        if html::has_ancestor_with_class(block, NESTED_DCL_CLASSES, None) {
            continue;
        }

        for dcl in html::select_all(block, &format!(".{DCL_CLASS}")) {
            if html::has_ancestor_with_class(dcl, NESTED_DCL_CLASSES, Some(block)) {
                continue;
            }
            let mut set = element_marker(lang, dcl);
            for mark in html::select_all(dcl, &format!(".{MARK_REV_CLASS}")) {
                let m = element_marker(lang, mark);
                set.since = set.since.or(m.since);
                set.until = set.until.or(m.until);
            }
            sets.push(set);
        }

        for mark in html::select_all(block, &format!(".{MARK_REV_CLASS}")) {
            let inside_dcl = html::has_ancestor_with_class(mark, &[DCL_CLASS], Some(block));
            let nested = html::has_ancestor_with_class(mark, NESTED_DCL_CLASSES, Some(block));
            if !inside_dcl && !nested {
                sets.push(element_marker(lang, mark));
            }
        }
    }
    logd!("Discovered {} marker set(s)", sets.len());
    sets
}
