// src/specs/xref.rs
// Paper cross-reference page: rows that tie defect reports to the papers
// that resolved them (or papers to their predecessors).

use std::collections::BTreeSet;

use scraper::Html;
use url::Url;

use crate::core::html;
use crate::table::tabulate_element;

/// Numbers that share a row with any of `papers` on the cross-reference page
/// and are not in `papers` yet. One pass; no transitive closure.
pub fn related_papers(doc: &Html, base: &Url, papers: &BTreeSet<String>) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    for table in html::select_doc(doc, "table") {
        let grid = tabulate_element(table, base);
        for row in &grid.rows {
            let cited: BTreeSet<&str> = row
                .cells
                .iter()
                .flatten()
                .flat_map(|c| c.papers().iter().map(String::as_str))
                .collect();
            if cited.iter().any(|p| papers.contains(*p)) {
                found.extend(cited.into_iter().filter(|p| !papers.contains(*p)).map(str::to_string));
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_numbers_sharing_a_row() {
        let doc = Html::parse_document(
            r#"<html><body><table>
                 <tr><th>Issue</th><th>Resolved by</th></tr>
                 <tr><td>CWG 2518</td><td><a href="https://wg21.link/P2593R1">P2593R1</a></td></tr>
                 <tr><td>LWG 3545</td><td>P2273R3</td></tr>
               </table></body></html>"#,
        );
        let base = Url::parse("https://en.cppreference.com/w/cpp").unwrap();
        let papers: BTreeSet<String> = [s!("CWG2518")].into_iter().collect();

        let found = related_papers(&doc, &base, &papers);
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["P2593"]);
    }
}
