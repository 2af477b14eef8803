// src/render.rs
//
// Host-facing output. The only place that turns table sections back into
// markup (or delimited text); spans were expanded by tabulation, so every
// grid position is emitted as its own cell.

use std::io::{self, Write};

use crate::config::consts::{COMPILER_CAPTION, FEATURE_HEADER, LIBRARY_CAPTION, SECTION_HEADING};
use crate::csv::write_row;
use crate::runner::Augmentation;
use crate::table::{Cell, Row, TableSection};

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

fn write_cell(out: &mut String, cell: &Cell, inner: &str) {
    let tag = cell.tag().as_str();
    let open = match cell.class() {
        Some(class) => format!("<{tag} class=\"{}\">", escape_attr(class)),
        None => format!("<{tag}>"),
    };
    out.push_str(&open);
    out.push_str(inner);
    out.push_str(&format!("</{tag}>"));
}

fn write_row_html(out: &mut String, row: &Row, is_head: bool) {
    out.push_str("<tr>");
    for (i, cell) in row.cells.iter().enumerate() {
        let inner = if is_head && i == 0 { FEATURE_HEADER } else { cell.html() };
        write_cell(out, cell, inner);
    }
    out.push_str("</tr>\n");
}

/// One `wikitable` for a non-empty section.
pub fn section_to_html(section: &TableSection) -> Option<String> {
    let head = section.head.as_ref().filter(|_| !section.body.is_empty())?;
    let mut out = s!("<table class=\"wikitable support-info-table\">\n<tbody>\n");
    write_row_html(&mut out, head, true);
    for row in &section.body {
        write_row_html(&mut out, row, false);
    }
    out.push_str("</tbody>\n</table>\n");
    Some(out)
}

/// Heading, note and both tables; `None` when neither section has rows.
pub fn to_html(aug: &Augmentation) -> Option<String> {
    if aug.is_empty() {
        return None;
    }
    let mut out = format!("<h3>{SECTION_HEADING}</h3>\n<p>{}</p>\n", aug.note);
    for section in [&aug.compiler, &aug.library] {
        if let Some(table) = section_to_html(section) {
            out.push_str(&table);
        }
    }
    Some(out)
}

/// Both sections as CSV/TSV, each under its caption, blank line between.
pub fn to_delimited(aug: &Augmentation, sep: char) -> io::Result<Option<String>> {
    if aug.is_empty() {
        return Ok(None);
    }
    let mut buf: Vec<u8> = Vec::new();
    write_delimited(&mut buf, aug, sep)?;
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Stream the non-empty sections of `aug` to `w` as CSV/TSV.
pub fn write_delimited<W: Write>(mut w: W, aug: &Augmentation, sep: char) -> io::Result<()> {
    let mut first = true;
    for (caption, section) in [(COMPILER_CAPTION, &aug.compiler), (LIBRARY_CAPTION, &aug.library)] {
        let Some(head) = section.head.as_ref().filter(|_| !section.body.is_empty()) else {
            continue;
        };
        if !first {
            writeln!(w)?;
        }
        first = false;

        write_row(&mut w, &[s!(caption)], sep)?;
        let mut head_texts = head.texts();
        if let Some(key) = head_texts.first_mut() {
            *key = s!(FEATURE_HEADER);
        }
        write_row(&mut w, &head_texts, sep)?;
        for row in &section.body {
            write_row(&mut w, &row.texts(), sep)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::NOTE;
    use crate::table::merge;

    fn section(head: &[&str], body: &[&[&str]]) -> TableSection {
        TableSection {
            head: Some(Row::new(head.iter().map(|t| Cell::header(t)).collect())),
            body: body.iter().map(|r| Row::new(r.iter().map(|t| Cell::new(t)).collect())).collect(),
        }
    }

    #[test]
    fn empty_augmentation_renders_nothing() {
        let aug = Augmentation { note: NOTE, ..Augmentation::default() };
        assert_eq!(to_html(&aug), None);
        assert_eq!(to_delimited(&aug, ',').unwrap(), None);
    }

    #[test]
    fn html_skips_empty_section_and_renames_key_column() {
        let aug = Augmentation {
            compiler: section(&["C++20 feature", "GCC"], &[&["concepts", "10"]]),
            library: TableSection::default(),
            note: NOTE,
        };
        let html = to_html(&aug).unwrap();
        assert!(html.starts_with("<h3>Support status</h3>"));
        assert_eq!(html.matches("<table").count(), 1);
        assert!(html.contains("<tr><th>Feature</th><th>GCC</th></tr>"));
        assert!(html.contains("<tr><td>concepts</td><td>10</td></tr>"));
    }

    #[test]
    fn placeholders_render_with_class() {
        let mut acc = section(&["Feature", "X"], &[&["f1", "v1"]]);
        merge(&mut acc, section(&["Feature", "Y"], &[&["f2", "v2"]]));
        let html = section_to_html(&acc).unwrap();
        assert!(html.contains(r#"<td class="table-na"><small>N/A</small></td>"#));
    }

    #[test]
    fn delimited_output_has_captions_and_quotes() {
        let aug = Augmentation {
            compiler: section(&["C++17 feature", "GCC"], &[&["if constexpr", "7"]]),
            library: section(&["C++17 feature", "MSVC STL"], &[&["std::optional, std::variant", "19.10"]]),
            note: NOTE,
        };
        let csv = to_delimited(&aug, ',').unwrap().unwrap();
        assert_eq!(
            csv,
            "Compiler support\nFeature,GCC\nif constexpr,7\n\n\
             Library support\nFeature,MSVC STL\n\"std::optional, std::variant\",19.10\n"
        );
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn delimited_write_errors_propagate() {
        let aug = Augmentation {
            compiler: section(&["C++17 feature", "GCC"], &[&["if constexpr", "7"]]),
            library: TableSection::default(),
            note: NOTE,
        };
        let err = write_delimited(Closed, &aug, '\t').unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
