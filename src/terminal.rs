//! Plain-text surface for the `rcat` CLI.
//!
//! The controller repaints on every interaction; this surface keeps only
//! the latest frame and prints it once the command has finished.

use std::io::{self, Write};

use research_catalog_core::{Cell, Surface, TableModel, YearOption};

/// Widest a column may grow before its text is cut with `…`.
const MAX_COLUMN_WIDTH: usize = 48;

#[derive(Debug, Default)]
pub struct TerminalSurface {
    pub meta: String,
    pub status: String,
    pub years: Vec<YearOption>,
    pub count: String,
    pub table: Option<TableModel>,
}

impl Surface for TerminalSurface {
    fn set_meta(&mut self, meta: &str) {
        self.meta = meta.to_string();
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn set_year_options(&mut self, options: &[YearOption]) {
        self.years = options.to_vec();
    }

    fn set_count(&mut self, count: &str) {
        self.count = count.to_string();
    }

    fn paint_table(&mut self, table: &TableModel) {
        self.table = Some(table.clone());
    }
}

impl TerminalSurface {
    /// Write meta, table, and count lines.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        if !self.meta.is_empty() {
            writeln!(out, "{}", self.meta)?;
            writeln!(out)?;
        }
        if let Some(table) = &self.table {
            write!(out, "{}", table_text(table))?;
            writeln!(out)?;
        }
        if !self.count.is_empty() {
            writeln!(out, "{}", self.count)?;
        }
        Ok(())
    }
}

/// Aligned plain-text table: header, rule, one line per row.
pub fn table_text(table: &TableModel) -> String {
    let header: Vec<String> = table.headers.iter().map(|h| clip(h)).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| clip(&cell_text(c))).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, text) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(text.chars().count());
            }
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Link { href, .. } => href.clone(),
        other => other.display_text().to_string(),
    }
}

/// Single-line, width-capped text.
fn clip(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_COLUMN_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(MAX_COLUMN_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(text, w)| {
            let pad = w.saturating_sub(text.chars().count());
            format!("{}{}", text, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_catalog_core::CollectionKind;

    fn table() -> TableModel {
        TableModel {
            kind: CollectionKind::Manuals,
            headers: vec!["ID".into(), "Título".into(), "PDF".into()],
            rows: vec![
                vec![
                    Cell::Code { text: "M-1".into() },
                    Cell::Text {
                        text: "Guía\nde uso".into(),
                    },
                    Cell::Link {
                        href: "docs/guia.pdf".into(),
                        label: "Ver PDF".into(),
                    },
                ],
                vec![
                    Cell::Code { text: String::new() },
                    Cell::Text { text: "x".repeat(80) },
                    Cell::Placeholder { text: "—".into() },
                ],
            ],
        }
    }

    #[test]
    fn test_columns_align() {
        let text = table_text(&table());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID   Título"));
        assert!(lines[2].contains("Guía de uso"));
        assert!(lines[2].ends_with("docs/guia.pdf"));
        assert!(lines[3].ends_with('—'));
    }

    #[test]
    fn test_long_cells_are_clipped() {
        let text = table_text(&table());
        let long = text.lines().nth(3).unwrap();
        assert!(long.contains('…'));
        assert!(!long.contains(&"x".repeat(MAX_COLUMN_WIDTH)));
    }

    #[test]
    fn test_print_includes_count() {
        let surface = TerminalSurface {
            meta: "v1 · hoy".into(),
            count: "2 de 2 registros".into(),
            table: Some(table()),
            ..Default::default()
        };
        let mut out = Vec::new();
        surface.print(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("v1 · hoy\n\n"));
        assert!(text.trim_end().ends_with("2 de 2 registros"));
    }
}
