// src/specs/support.rs
//! Reading one "compiler support" / "library support" table from a fetched
//! support page.
//!
//! The first row is the header, the last row is the footer; every row in
//! between is a candidate and survives only if [`is_relevant`] says so.
//! A page without the table contributes an empty section.

use scraper::Html;
use url::Url;

use super::criteria::{is_relevant, Criteria};
use crate::core::html;
use crate::table::{tabulate_element, Grid, Row, TableSection};

/// Which support table of a page to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupportKind {
    Compiler,
    Library,
}

impl SupportKind {
    pub fn selector(self) -> &'static str {
        use crate::config::consts::{COMPILER_SUPPORT_SELECTOR, LIBRARY_SUPPORT_SELECTOR};
        match self {
            SupportKind::Compiler => COMPILER_SUPPORT_SELECTOR,
            SupportKind::Library => LIBRARY_SUPPORT_SELECTOR,
        }
    }
}

/// Relevant rows of the `kind` table on `doc`, header first.
pub fn filter_rows(doc: &Html, kind: SupportKind, base: &Url, criteria: &Criteria) -> TableSection {
    let table = html::first_in_doc(doc, kind.selector()).and_then(html::find_table);
    let Some(table) = table else {
        logd!("No {:?} support table on page", kind);
        return TableSection::default();
    };
    filter_grid(tabulate_element(table, base), criteria)
}

/// Header + relevant middle rows of an already tabulated table.
pub fn filter_grid(grid: Grid, criteria: &Criteria) -> TableSection {
    let mut rows = grid.rows.into_iter().map(Row::from_grid_row);
    let Some(head) = rows.next() else {
        return TableSection::default();
    };

    let mut candidates: Vec<Row> = rows.collect();
    candidates.pop(); // footer

    let total = candidates.len();
    let body: Vec<Row> = candidates.into_iter().filter(|r| is_relevant(r, criteria)).collect();
    logd!("Kept {} of {} candidate row(s)", body.len(), total);

    TableSection { head: Some(head), body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{tabulate, Cell, SourceRow};

    fn criteria() -> Criteria {
        Criteria::for_url(&Url::parse("https://site/w/cpp/language/lambda").unwrap())
    }

    fn row(feature: &str, href: &str, gcc: &str) -> SourceRow {
        SourceRow::new(vec![Cell::new(feature).with_links([href]), Cell::new(gcc)])
    }

    #[test]
    fn keeps_relevant_rows_between_header_and_footer() {
        let grid = tabulate(vec![
            SourceRow::new(vec![Cell::header("C++20 feature"), Cell::header("GCC")]),
            row("lambda capture", "https://site/w/cpp/language/lambda", "8"),
            row("modules", "https://site/w/cpp/language/modules", "11"),
            row("template lambda", "https://site/w/cpp/language/lambda", "8"),
            // footer links to the page too, but is never a candidate
            row("C++20 feature", "https://site/w/cpp/language/lambda", "GCC"),
        ]);
        let section = filter_grid(grid, &criteria());

        assert_eq!(section.head_texts(), vec!["C++20 feature", "GCC"]);
        assert_eq!(
            section.body_texts(),
            vec![vec!["lambda capture", "8"], vec!["template lambda", "8"]]
        );
    }

    #[test]
    fn header_only_table_has_no_body() {
        let grid = tabulate(vec![SourceRow::new(vec![Cell::header("Feature")])]);
        let section = filter_grid(grid, &criteria());
        assert!(section.head.is_some());
        assert!(section.is_empty());
    }

    #[test]
    fn missing_table_contributes_nothing() {
        let doc = Html::parse_document("<html><body><p>no tables</p></body></html>");
        let base = Url::parse("https://site/w/cpp").unwrap();
        let section = filter_rows(&doc, SupportKind::Library, &base, &criteria());
        assert!(section.head.is_none());
        assert!(section.body.is_empty());
    }

    #[test]
    fn selector_may_point_at_a_wrapper() {
        let doc = Html::parse_document(
            r#"<html><body><div class="t-compiler-support-top"><table>
                 <tr><th>Feature</th><th>GCC</th></tr>
                 <tr><td><a href="/w/cpp/language/lambda">lambda</a></td><td>8</td></tr>
                 <tr><th>Feature</th><th>GCC</th></tr>
               </table></div></body></html>"#,
        );
        let base = Url::parse("https://site/w/cpp/language/lambda").unwrap();
        let section = filter_rows(&doc, SupportKind::Compiler, &base, &criteria());
        assert_eq!(section.body_texts(), vec![vec!["lambda", "8"]]);
    }

    #[test]
    fn rowspanned_link_makes_every_covered_row_relevant() {
        let grid = tabulate(vec![
            SourceRow::new(vec![Cell::header("Feature"), Cell::header("Paper"), Cell::header("GCC")]),
            SourceRow::new(vec![
                Cell::new("lambdas").with_links(["https://site/w/cpp/language/lambda"]).with_span(2, 1),
                Cell::new("P0428R2"),
                Cell::new("8"),
            ]),
            SourceRow::new(vec![Cell::new("P0624R2"), Cell::new("9")]),
            SourceRow::new(vec![Cell::new("footer")]),
        ]);
        let section = filter_grid(grid, &criteria());
        assert_eq!(section.body.len(), 2);
        assert_eq!(section.body[1].texts(), vec!["lambdas", "P0624R2", "9"]);
    }
}
