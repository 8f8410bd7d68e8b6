//! View renderer: records to a structured table model.
//!
//! [`render`] decides *what* to display; painting is left to the surface
//! ([`crate::html`] for markup, a terminal printer in the CLI). Cell text is
//! kept raw and every painter escapes it for its own medium.
//!
//! # Columns
//!
//! | Collection | Columns |
//! |------------|---------|
//! | projects | ID, Title, Investigators, Year, Status, Area, DICIHT, CIA |
//! | articles | ID, Title, Investigators, Year, Status, DICIHT, Link |
//! | manuals  | ID, Title, Year, Summary, PDF |

use serde::Serialize;

use crate::extract::{extract_year, join_investigators};
use crate::labels::Labels;
use crate::models::{CollectionKind, Record};

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    /// Plain text.
    Text { text: String },
    /// Identifier-like text shown in a monospace face.
    Code { text: String },
    /// Classification label shown as a badge.
    Badge { text: String },
    /// Boolean attribute with its localized yes/no text.
    Flag { value: bool, text: String },
    /// External resource, opened in a new browsing context.
    Link { href: String, label: String },
    /// Muted marker standing in for a missing link.
    Placeholder { text: String },
}

impl Cell {
    fn text(value: impl Into<String>) -> Cell {
        Cell::Text { text: value.into() }
    }

    fn code(value: Option<&str>) -> Cell {
        Cell::Code {
            text: value.unwrap_or_default().to_string(),
        }
    }

    fn badge(value: Option<&str>) -> Cell {
        Cell::Badge {
            text: value.unwrap_or_default().to_string(),
        }
    }

    /// A link when `target` has non-blank content, a placeholder otherwise.
    fn link_or_placeholder(target: Option<&str>, label: &str, labels: &Labels) -> Cell {
        let href = target.unwrap_or_default().trim();
        if href.is_empty() {
            Cell::Placeholder {
                text: labels.empty.to_string(),
            }
        } else {
            Cell::Link {
                href: href.to_string(),
                label: label.to_string(),
            }
        }
    }

    /// Unescaped display text, as a terminal would show it.
    pub fn display_text(&self) -> &str {
        match self {
            Cell::Text { text }
            | Cell::Code { text }
            | Cell::Badge { text }
            | Cell::Flag { text, .. }
            | Cell::Placeholder { text } => text,
            Cell::Link { href, .. } => href,
        }
    }
}

/// Header plus body rows for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableModel {
    pub kind: CollectionKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Column headers for `kind`.
pub fn headers(kind: CollectionKind, labels: &Labels) -> Vec<String> {
    let cols: &[&str] = match kind {
        CollectionKind::Projects => &[
            labels.id,
            labels.title,
            labels.investigators,
            labels.year,
            labels.status,
            labels.area,
            labels.dicith,
            labels.cia,
        ],
        CollectionKind::Articles => &[
            labels.id,
            labels.title,
            labels.investigators,
            labels.year,
            labels.status,
            labels.dicith,
            labels.link,
        ],
        CollectionKind::Manuals => &[
            labels.id,
            labels.title,
            labels.year,
            labels.summary,
            labels.pdf,
        ],
    };
    cols.iter().map(|c| c.to_string()).collect()
}

/// Build the table for `records`, one row per record in the given order.
///
/// Columns follow `kind`; a record lacking a column's field shows an empty
/// cell (or a placeholder for link columns).
pub fn render(kind: CollectionKind, records: &[Record<'_>], labels: &Labels) -> TableModel {
    TableModel {
        kind,
        headers: headers(kind, labels),
        rows: records.iter().map(|r| row(kind, *r, labels)).collect(),
    }
}

fn row(kind: CollectionKind, record: Record<'_>, labels: &Labels) -> Vec<Cell> {
    match kind {
        CollectionKind::Projects => vec![
            Cell::code(record.id()),
            Cell::text(record.title().unwrap_or_default()),
            Cell::text(join_investigators(record.investigators())),
            Cell::text(extract_year(record)),
            Cell::badge(record.status()),
            Cell::text(record.area().unwrap_or_default()),
            Cell::code(record.dicith()),
            Cell::Flag {
                value: record.is_cia(),
                text: labels.yes_no(record.is_cia()).to_string(),
            },
        ],
        CollectionKind::Articles => vec![
            Cell::code(record.id()),
            Cell::text(record.title().unwrap_or_default()),
            Cell::text(join_investigators(record.investigators())),
            Cell::text(extract_year(record)),
            Cell::badge(record.status()),
            Cell::code(record.dicith()),
            Cell::link_or_placeholder(record.link(), labels.open, labels),
        ],
        CollectionKind::Manuals => vec![
            Cell::code(record.id()),
            Cell::text(record.title().unwrap_or_default()),
            Cell::text(extract_year(record)),
            Cell::text(record.summary().unwrap_or_default()),
            Cell::link_or_placeholder(record.pdf(), labels.view_pdf, labels),
        ],
    }
}
