// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// URL as compared by the relevance rules: no fragment, no trailing `/`.
pub fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.as_str().trim_end_matches('/').to_string()
}

/// MediaWiki treats `_` and ` ` alike in titles.
pub fn normalize_title(title: &str) -> String {
    normalize_ws(&title.replace('_', " "))
}

static PAPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:([PN])(\d{4})|(CWG|LWG)\s?(\d+))(?:R\d+)?\b").expect("static regex")
});

/// Paper / defect-report numbers cited in `s`, canonical form
/// (`P0734R0` → `P0734`, `cwg 1234` → `CWG1234`), in order of appearance.
pub fn paper_numbers(s: &str) -> Vec<String> {
    PAPER
        .captures_iter(s)
        .filter_map(|c| {
            let (kind, num) = match (c.get(1), c.get(2), c.get(3), c.get(4)) {
                (Some(k), Some(n), _, _) | (_, _, Some(k), Some(n)) => (k, n),
                _ => return None,
            };
            Some(join!(&kind.as_str().to_ascii_uppercase(), num.as_str()))
        })
        .collect()
}
