// src/table/section.rs
use std::rc::Rc;

use super::cell::{Cell, CellRef};
use super::grid::GridRow;

/// One table row: the row element's own identifiers plus its cells.
#[derive(Clone, Debug, Default)]
pub struct Row {
    pub ids: Vec<String>,
    pub cells: Vec<CellRef>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { ids: Vec::new(), cells: cells.into_iter().map(Rc::new).collect() }
    }

    /// Gaps left by malformed spans become blank cells.
    pub fn from_grid_row(row: GridRow) -> Self {
        Self {
            ids: row.ids,
            cells: row
                .cells
                .into_iter()
                .map(|c| c.unwrap_or_else(|| Rc::new(Cell::blank())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| s!(c.text())).collect()
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().flat_map(|c| c.links().iter().map(String::as_str))
    }

    /// Row-level identifiers followed by those declared inside its cells.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids
            .iter()
            .map(String::as_str)
            .chain(self.cells.iter().flat_map(|c| c.ids().iter().map(String::as_str)))
    }

    pub fn papers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().flat_map(|c| c.papers().iter().map(String::as_str))
    }
}

/// Header row plus the body rows collected under it.
/// `head == None` means nothing has been collected yet.
#[derive(Clone, Debug, Default)]
pub struct TableSection {
    pub head: Option<Row>,
    pub body: Vec<Row>,
}

impl TableSection {
    /// Nothing to contribute: no header or no body rows.
    pub fn is_empty(&self) -> bool {
        self.head.is_none() || self.body.is_empty()
    }

    pub fn width(&self) -> usize {
        self.head.as_ref().map_or(0, Row::len)
    }

    pub fn head_texts(&self) -> Vec<String> {
        self.head.as_ref().map(Row::texts).unwrap_or_default()
    }

    pub fn body_texts(&self) -> Vec<Vec<String>> {
        self.body.iter().map(Row::texts).collect()
    }

    /// See [`merge`].
    pub fn merge(&mut self, incoming: TableSection) {
        merge(self, incoming)
    }
}

/// Fold `incoming` into `acc`.
///
/// - `incoming` empty: nothing happens.
/// - `acc` has no header yet: it takes `incoming` as is.
/// - otherwise both column sets are reconciled (columns missing on one side
///   are inserted there with placeholder cells), `incoming` is reordered to
///   `acc`'s column order and its rows are appended after `acc`'s rows.
///
/// Column 0 is the row key on both sides and is never reconciled.
/// Columns match by normalized text; with duplicates the first unused match wins.
pub fn merge(acc: &mut TableSection, mut incoming: TableSection) {
    if incoming.is_empty() {
        return;
    }
    let Some(acc_head) = acc.head.as_ref() else {
        *acc = incoming;
        return;
    };

    let acc_cells = acc_head.cells.clone();
    let incoming_cells = incoming.head.as_ref().map(|h| h.cells.clone()).unwrap_or_default();

    let added = fill_missing_columns(acc, &incoming_cells);
    if added > 0 {
        logd!("Added {added} column(s) to accumulated table");
    }

    let reconciled: Vec<CellRef> = acc.head.as_ref().map(|h| h.cells.clone()).unwrap_or(acc_cells);
    fill_missing_columns(&mut incoming, &reconciled);
    align_columns(&mut incoming, &reconciled);

    acc.body.append(&mut incoming.body);
}

/// Insert every `src_head` column `dst` lacks. A column found at index `i` of
/// `src_head` goes in front of what was `dst`'s column `i` before this call
/// (or at the end when `dst` was narrower); every body row gets a
/// placeholder at the same index. Returns the number of inserted columns.
fn fill_missing_columns(dst: &mut TableSection, src_head: &[CellRef]) -> usize {
    let TableSection { head, body } = dst;
    let Some(head) = head.as_mut() else { return 0 };

    let snapshot: Vec<CellRef> = head.cells.clone();
    let original_len = snapshot.len();
    let mut used = vec![false; original_len];
    if let Some(key) = used.first_mut() {
        *key = true;
    }

    let mut inserted = 0usize;
    for (i, src_cell) in src_head.iter().enumerate().skip(1) {
        let matched = (0..original_len).find(|&j| !used[j] && snapshot[j].same_text(src_cell));
        if let Some(j) = matched {
            used[j] = true;
            continue;
        }

        let at = if i < original_len { i + inserted } else { head.cells.len() };
        head.cells.insert(at, Rc::clone(src_cell));
        for row in body.iter_mut() {
            let at = at.min(row.cells.len());
            row.cells.insert(at, Rc::new(Cell::placeholder()));
        }
        inserted += 1;
    }
    inserted
}

/// Reorder `section`'s columns to follow `target` (by text, first unused
/// match). Column 0 stays in place. A target column with no counterpart gets
/// placeholders; columns `target` does not name are dropped.
fn align_columns(section: &mut TableSection, target: &[CellRef]) {
    let TableSection { head, body } = section;
    let Some(head) = head.as_mut() else { return };

    let mut used = vec![false; head.cells.len()];
    let mut order: Vec<Option<usize>> = Vec::with_capacity(target.len());
    for (j, want) in target.iter().enumerate() {
        let found = if j == 0 && !head.cells.is_empty() {
            Some(0)
        } else {
            (1..head.cells.len()).find(|&k| !used[k] && head.cells[k].same_text(want))
        };
        if let Some(k) = found {
            used[k] = true;
        }
        order.push(found);
    }

    let identity = order.len() == head.cells.len()
        && order.iter().enumerate().all(|(j, k)| *k == Some(j));
    if identity {
        return;
    }

    let pick = |cells: &[CellRef], k: Option<usize>| -> CellRef {
        k.and_then(|k| cells.get(k).cloned())
            .unwrap_or_else(|| Rc::new(Cell::placeholder()))
    };
    head.cells = order
        .iter()
        .zip(target)
        .map(|(k, want)| k.and_then(|k| head.cells.get(k).cloned()).unwrap_or_else(|| Rc::clone(want)))
        .collect();
    for row in body.iter_mut() {
        row.cells = order.iter().map(|&k| pick(&row.cells, k)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(head: &[&str], body: &[&[&str]]) -> TableSection {
        TableSection {
            head: Some(Row::new(head.iter().map(|t| Cell::header(t)).collect())),
            body: body
                .iter()
                .map(|r| Row::new(r.iter().map(|t| Cell::new(t)).collect()))
                .collect(),
        }
    }

    #[test]
    fn empty_incoming_is_noop() {
        let mut acc = section(&["Feature", "X"], &[&["f1", "v1"]]);
        merge(&mut acc, TableSection::default());
        merge(&mut acc, section(&["Feature", "Y"], &[]));
        assert_eq!(acc.head_texts(), vec!["Feature", "X"]);
        assert_eq!(acc.body_texts(), vec![vec!["f1", "v1"]]);
    }

    #[test]
    fn empty_acc_adopts_incoming_by_reference() {
        let incoming = section(&["Feature", "X"], &[&["f1", "v1"]]);
        let first = Rc::clone(&incoming.body[0].cells[0]);
        let mut acc = TableSection::default();
        merge(&mut acc, incoming);
        assert!(Rc::ptr_eq(&acc.body[0].cells[0], &first));
    }

    #[test]
    fn disjoint_columns_get_placeholders() {
        let mut acc = section(&["Feature", "X"], &[&["f1", "v1"]]);
        merge(&mut acc, section(&["Feature", "Y"], &[&["f2", "v2"]]));

        assert_eq!(acc.head_texts(), vec!["Feature", "Y", "X"]);
        assert_eq!(
            acc.body_texts(),
            vec![vec!["f1", "N/A", "v1"], vec!["f2", "v2", "N/A"]]
        );
        assert_eq!(acc.body[0].cells[1].class(), Some("table-na"));
    }

    #[test]
    fn two_new_columns_keep_rows_aligned() {
        let mut acc = section(&["Feature", "A", "B"], &[&["f1", "a1", "b1"]]);
        merge(&mut acc, section(&["Feature", "X", "Y"], &[&["f2", "x2", "y2"]]));

        assert_eq!(acc.head_texts(), vec!["Feature", "X", "A", "Y", "B"]);
        assert_eq!(
            acc.body_texts(),
            vec![
                vec!["f1", "N/A", "a1", "N/A", "b1"],
                vec!["f2", "x2", "N/A", "y2", "N/A"],
            ]
        );
    }

    #[test]
    fn same_columns_in_other_order_are_realigned() {
        let mut acc = section(&["Feature", "GCC", "Clang"], &[&["f1", "g1", "c1"]]);
        merge(&mut acc, section(&["Feature", "Clang", "GCC"], &[&["f2", "c2", "g2"]]));
        assert_eq!(acc.head_texts(), vec!["Feature", "GCC", "Clang"]);
        assert_eq!(acc.body_texts(), vec![vec!["f1", "g1", "c1"], vec!["f2", "g2", "c2"]]);
    }

    #[test]
    fn duplicate_headers_pair_up_in_order() {
        let mut acc = section(&["Feature", "GCC", "GCC"], &[&["f1", "lib", "core"]]);
        merge(&mut acc, section(&["Feature", "GCC", "GCC", "GCC"], &[&["f2", "a", "b", "c"]]));
        assert_eq!(acc.head_texts(), vec!["Feature", "GCC", "GCC", "GCC"]);
        assert_eq!(
            acc.body_texts(),
            vec![vec!["f1", "lib", "core", "N/A"], vec!["f2", "a", "b", "c"]]
        );
    }

    #[test]
    fn header_text_is_compared_trimmed() {
        let mut acc = section(&["Feature", " MSVC "], &[&["f1", "19.2"]]);
        merge(&mut acc, section(&["Feature", "MSVC"], &[&["f2", "19.3"]]));
        assert_eq!(acc.width(), 2);
    }

    #[test]
    fn column_set_is_commutative_row_order_is_not() {
        let a = || section(&["Feature", "X", "Z"], &[&["fa", "x", "z"]]);
        let b = || section(&["Feature", "Y", "Z"], &[&["fb", "y", "z"]]);

        let mut ab = a();
        merge(&mut ab, b());
        let mut ba = b();
        merge(&mut ba, a());

        let mut cols_ab = ab.head_texts();
        let mut cols_ba = ba.head_texts();
        cols_ab.sort();
        cols_ba.sort();
        assert_eq!(cols_ab, cols_ba);

        assert_eq!(ab.body[0].cells[0].text(), "fa");
        assert_eq!(ba.body[0].cells[0].text(), "fb");
    }

    #[test]
    fn width_invariant_holds_over_many_merges() {
        let mut acc = TableSection::default();
        merge(&mut acc, section(&["Feature", "GCC"], &[&["a", "1"]]));
        merge(&mut acc, section(&["Feature", "Clang", "MSVC"], &[&["b", "2", "3"], &["c", "4", "5"]]));
        merge(&mut acc, section(&["Feature", "MSVC", "EDG"], &[&["d", "6", "7"]]));
        merge(&mut acc, section(&["Feature", "GCC"], &[&["e", "8"]]));

        assert_eq!(acc.width(), 5);
        assert!(acc.body.iter().all(|r| r.len() == acc.width()));
        let keys: Vec<_> = acc.body.iter().map(|r| s!(r.cells[0].text())).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d", "e"]);
    }
}
