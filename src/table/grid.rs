// src/table/grid.rs
use std::mem::take;
use std::rc::Rc;

use scraper::ElementRef;
use url::Url;

use super::cell::{Cell, CellRef};
use crate::config::consts::MAX_COL_SPAN;
use crate::core::html;

/// A source row before span expansion.
#[derive(Clone, Debug, Default)]
pub struct SourceRow {
    /// Identifiers declared on the row element itself.
    pub ids: Vec<String>,
    pub cells: Vec<Cell>,
}

impl SourceRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { ids: Vec::new(), cells }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GridRow {
    pub ids: Vec<String>,
    /// `None` marks a position no cell covers (malformed spans).
    pub cells: Vec<Option<CellRef>>,
}

/// Span-expanded table. All rows have the same width.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn height(&self) -> usize { self.rows.len() }
    pub fn width(&self) -> usize { self.rows.first().map_or(0, |r| r.cells.len()) }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellRef> {
        self.rows.get(row)?.cells.get(col)?.as_ref()
    }
}

/// Expand row/column spans. Each cell goes to the first free column of its
/// row, then the same `Rc` fills every position its span covers. Positions
/// already claimed by an earlier span are left to that span.
pub fn tabulate(mut rows: Vec<SourceRow>) -> Grid {
    let n = rows.len();
    let mut out: Vec<GridRow> = rows
        .iter_mut()
        .map(|r| GridRow { ids: take(&mut r.ids), cells: Vec::new() })
        .collect();

    for (r, row) in rows.into_iter().enumerate() {
        let mut col = 0usize;
        for cell in row.cells {
            let rs = match cell.row_span() {
                0 => n - r,
                k => k.min(n - r),
            };
            let cs = cell.col_span().clamp(1, MAX_COL_SPAN);
            let cell = Rc::new(cell);

            while out[r].cells.get(col).is_some_and(Option::is_some) {
                col += 1;
            }

            let end = col.saturating_add(cs);
            for grid_row in &mut out[r..r + rs] {
                if grid_row.cells.len() < end {
                    grid_row.cells.resize(end, None);
                }
                for slot in &mut grid_row.cells[col..end] {
                    if slot.is_none() {
                        *slot = Some(Rc::clone(&cell));
                    }
                }
            }
            col = end;
        }
    }

    let width = out.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    for row in &mut out {
        row.cells.resize(width, None);
    }
    Grid { rows: out }
}

/// Read `table`'s own rows (not nested tables') and tabulate them.
pub fn tabulate_element(table: ElementRef<'_>, base: &Url) -> Grid {
    let rows = html::table_rows(table)
        .into_iter()
        .map(|tr| SourceRow {
            ids: tr.value().id().map(str::to_string).into_iter().collect(),
            cells: html::row_cells(tr)
                .into_iter()
                .map(|td| Cell::from_element(td, base))
                .collect(),
        })
        .collect();
    tabulate(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn texts(grid: &Grid) -> Vec<Vec<String>> {
        grid.rows
            .iter()
            .map(|r| {
                r.cells
                    .iter()
                    .map(|c| c.as_ref().map_or(s!("-"), |c| s!(c.text())))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn empty_table_is_empty_grid() {
        let grid = tabulate(Vec::new());
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
    }

    #[test]
    fn column_span_repeats_cell() {
        let grid = tabulate(vec![
            SourceRow::new(vec![Cell::header("Feature"), Cell::header("GCC").with_span(1, 2)]),
            SourceRow::new(vec![Cell::new("a"), Cell::new("10"), Cell::new("11")]),
        ]);
        assert_eq!(texts(&grid), vec![vec!["Feature", "GCC", "GCC"], vec!["a", "10", "11"]]);
        assert!(Rc::ptr_eq(grid.get(0, 1).unwrap(), grid.get(0, 2).unwrap()));
    }

    #[test]
    fn vertical_span_pushes_later_cells_right() {
        let grid = tabulate(vec![
            SourceRow::new(vec![Cell::new("x").with_span(2, 1), Cell::new("a"), Cell::new("b")]),
            SourceRow::new(vec![Cell::new("c"), Cell::new("d")]),
        ]);
        assert_eq!(texts(&grid), vec![vec!["x", "a", "b"], vec!["x", "c", "d"]]);
    }

    #[test]
    fn block_span_fills_rectangle() {
        let grid = tabulate(vec![
            SourceRow::new(vec![Cell::new("big").with_span(2, 2), Cell::new("r0")]),
            SourceRow::new(vec![Cell::new("r1")]),
            SourceRow::new(vec![Cell::new("p"), Cell::new("q"), Cell::new("r")]),
        ]);
        assert_eq!(
            texts(&grid),
            vec![vec!["big", "big", "r0"], vec!["big", "big", "r1"], vec!["p", "q", "r"]]
        );
        let big = grid.get(0, 0).unwrap();
        for (r, c) in [(0, 1), (1, 0), (1, 1)] {
            assert!(Rc::ptr_eq(big, grid.get(r, c).unwrap()));
        }
    }

    #[test]
    fn overlong_rowspan_is_clipped_and_zero_means_rest() {
        let grid = tabulate(vec![
            SourceRow::new(vec![Cell::new("a").with_span(9, 1), Cell::new("b").with_span(0, 1)]),
            SourceRow::new(vec![]),
        ]);
        assert_eq!(grid.height(), 2);
        assert_eq!(texts(&grid), vec![vec!["a", "b"], vec!["a", "b"]]);
    }

    #[test]
    fn oversized_colspan_is_capped() {
        let doc = Html::parse_fragment(
            r#"<table>
                 <tr><th>Feature</th><th colspan="18446744073709551615">GCC</th></tr>
                 <tr><td>a</td><td colspan="1000000000">10</td></tr>
               </table>"#,
        );
        let table = html::first_in_doc(&doc, "table").unwrap();
        let base = Url::parse("https://en.cppreference.com/w/cpp").unwrap();
        let grid = tabulate_element(table, &base);

        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 1 + MAX_COL_SPAN);
        assert_eq!(grid.get(1, MAX_COL_SPAN).unwrap().text(), "10");

        let builder = tabulate(vec![SourceRow::new(vec![Cell::new("x").with_span(1, usize::MAX)])]);
        assert_eq!(builder.width(), MAX_COL_SPAN);
    }

    #[test]
    fn ragged_rows_leave_gaps() {
        let grid = tabulate(vec![
            SourceRow::new(vec![Cell::new("a"), Cell::new("b"), Cell::new("c")]),
            SourceRow::new(vec![Cell::new("d")]),
        ]);
        assert_eq!(texts(&grid), vec![vec!["a", "b", "c"], vec!["d", "-", "-"]]);
    }

    #[test]
    fn reads_html_spans_and_row_ids() {
        let doc = Html::parse_fragment(
            r#"<table>
                 <tr><th rowspan="2">Feature</th><th colspan="2">GCC</th></tr>
                 <tr id="row-2"><th>libstdc++</th><th>gcc</th></tr>
               </table>"#,
        );
        let table = html::first_in_doc(&doc, "table").unwrap();
        let base = Url::parse("https://en.cppreference.com/w/cpp").unwrap();
        let grid = tabulate_element(table, &base);
        assert_eq!(
            texts(&grid),
            vec![vec!["Feature", "GCC", "GCC"], vec!["Feature", "libstdc++", "gcc"]]
        );
        assert_eq!(grid.rows[1].ids, vec!["row-2"]);
    }
}
