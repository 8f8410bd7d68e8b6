//! Markup painter for [`TableModel`]s.
//!
//! All record text is untrusted. Text content goes through [`escape_html`];
//! attribute values (link targets) go through [`escape_attr`], which also
//! percent-encodes spaces. Links open in a new browsing context with
//! `rel="noopener noreferrer"` so the opened page gets no handle back to ours.

use crate::table::{Cell, TableModel};

/// Escape `&`, `<`, `>`, `"` and `'` for insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// [`escape_html`] plus `%20` for spaces, for `href` values.
pub fn escape_attr(text: &str) -> String {
    escape_html(text).replace(' ', "%20")
}

/// Markup for one cell's contents (without the surrounding `<td>`).
pub fn cell_html(cell: &Cell) -> String {
    match cell {
        Cell::Text { text } | Cell::Code { text } | Cell::Flag { text, .. } => escape_html(text),
        Cell::Badge { text } => format!(
            r#"<span class="badge badge-soft">{}</span>"#,
            escape_html(text)
        ),
        Cell::Link { href, label } => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_attr(href),
            escape_html(label)
        ),
        Cell::Placeholder { text } => {
            format!(r#"<span class="text-muted">{}</span>"#, escape_html(text))
        }
    }
}

/// `<tr>` of `<th>` cells.
pub fn thead_html(table: &TableModel) -> String {
    let mut out = String::from("<tr>");
    for header in &table.headers {
        out.push_str("<th>");
        out.push_str(&escape_html(header));
        out.push_str("</th>");
    }
    out.push_str("</tr>");
    out
}

/// One `<tr>` per row.
pub fn tbody_html(table: &TableModel) -> String {
    let mut out = String::new();
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            if matches!(cell, Cell::Code { .. }) {
                out.push_str(r#"<td class="mono">"#);
            } else {
                out.push_str("<td>");
            }
            out.push_str(&cell_html(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out
}

/// Full `<table>` element.
pub fn table_html(table: &TableModel) -> String {
    format!(
        "<table class=\"table\" data-view=\"{}\">\n<thead>{}</thead>\n<tbody>\n{}</tbody>\n</table>",
        table.kind,
        thead_html(table),
        tbody_html(table)
    )
}
