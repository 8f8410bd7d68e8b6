//! HTML surface and page shell for the web server.
//!
//! The page works without scripts: tabs are links, the search box and year
//! selector live in a `GET` form, and "clear filters" is a link that drops
//! both parameters. Every interpolated value is escaped with
//! [`escape_html`] / [`escape_attr`].

use research_catalog_core::html::{escape_attr, escape_html, table_html};
use research_catalog_core::{CollectionKind, Controller, Surface, TableModel, YearOption};

/// Collects the controller's output for one page render.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    pub meta: String,
    pub status: String,
    pub years: Vec<YearOption>,
    pub count: String,
    pub table: Option<String>,
    pub query: String,
    pub year: String,
}

impl Surface for HtmlSurface {
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
        self.table = Some(table_html(table));
    }

    fn set_filters(&mut self, query: &str, year: &str) {
        self.query = query.to_string();
        self.year = year.to_string();
    }
}

/// Page-level options that do not come from the controller.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Set `<base href="/site/">` so relative PDF paths resolve against the
    /// served site root.
    pub site_base: bool,
}

/// `/?view=..&q=..&year=..`, omitting empty filters.
pub fn view_href(kind: CollectionKind, query: &str, year: &str) -> String {
    let mut href = format!("/?view={}", kind.as_str());
    if !query.is_empty() {
        href.push_str("&q=");
        href.push_str(&urlencoding::encode(query));
    }
    if !year.is_empty() {
        href.push_str("&year=");
        href.push_str(&urlencoding::encode(year));
    }
    href
}

/// Render the full page for the controller's current state.
pub fn render_page(controller: &Controller<HtmlSurface>, options: &PageOptions) -> String {
    let labels = controller.labels();
    let state = controller.state();
    let surface = controller.surface();
    let active = state.active();

    let base = if options.site_base {
        r#"<base href="/site/">"#
    } else {
        ""
    };

    let tabs: String = CollectionKind::ALL
        .iter()
        .map(|kind| {
            let class = if *kind == active { "tab active" } else { "tab" };
            format!(
                r#"<a class="{}" data-view="{}" href="{}">{}</a>"#,
                class,
                kind.as_str(),
                escape_attr(&view_href(*kind, state.query(), state.year())),
                escape_html(labels.tab(*kind))
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    let year_options: String = surface
        .years
        .iter()
        .map(|opt| {
            let selected = if opt.value == state.year() {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&opt.value),
                selected,
                escape_html(&opt.label)
            )
        })
        .collect();

    let table = surface.table.as_deref().unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  {base}
  <title>Research Catalog</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 2rem; }}
    .mono {{ font-family: ui-monospace, monospace; }}
    .badge {{ padding: .1rem .5rem; border-radius: .5rem; background: #eef; }}
    .text-muted {{ color: #888; }}
    .tab {{ margin-right: 1rem; }}
    .tab.active {{ font-weight: bold; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ text-align: left; padding: .3rem .6rem; border-bottom: 1px solid #ddd; }}
  </style>
</head>
<body>
  <header>
    <div id="meta">{meta}</div>
    <nav id="tabs">
      {tabs}
    </nav>
  </header>
  <form id="filters" method="get" action="/">
    <input type="hidden" name="view" value="{view}">
    <input id="q" type="search" name="q" value="{query}" placeholder="{search}">
    <select id="year" name="year" onchange="this.form.submit()">{year_options}</select>
    <button type="submit">{search}</button>
    <a id="clear" href="{clear_href}">{clear}</a>
  </form>
  <div id="status">{status}</div>
  <div id="count">{count}</div>
  {table}
</body>
</html>
"#,
        lang = labels.lang,
        base = base,
        meta = escape_html(&surface.meta),
        tabs = tabs,
        view = active.as_str(),
        query = escape_html(state.query()),
        search = escape_html(labels.search),
        year_options = year_options,
        clear_href = escape_attr(&view_href(active, "", "")),
        clear = escape_html(labels.clear),
        status = escape_html(&surface.status),
        count = escape_html(&surface.count),
        table = table,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_catalog_core::{Dataset, DisplayOptions};

    fn controller() -> Controller<HtmlSurface> {
        let ds = Dataset::from_json(
            r#"{"version": "3", "projects": [
                {"id": "P-1", "title": "<b>Solar</b>", "year": 2020},
                {"id": "P-2", "title": "Agua & Vida", "year": 2021}
            ]}"#,
        )
        .unwrap();
        let mut ctl = Controller::new(HtmlSurface::default(), DisplayOptions::default());
        ctl.start(ds);
        ctl
    }

    #[test]
    fn test_view_href_encodes_filters() {
        assert_eq!(
            view_href(CollectionKind::Articles, "energía solar", "2021"),
            "/?view=articles&q=energ%C3%ADa%20solar&year=2021"
        );
        assert_eq!(view_href(CollectionKind::Manuals, "", ""), "/?view=manuals");
    }

    #[test]
    fn test_page_escapes_and_marks_active_tab() {
        let mut ctl = controller();
        ctl.set_query("\"><script>");
        let html = render_page(&ctl, &PageOptions::default());
        assert!(html.contains(r#"<a class="tab active" data-view="projects""#));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(!html.contains("\"><script>"));
        assert!(html.contains(r#"<div id="count">0 de 2 registros</div>"#));
    }

    #[test]
    fn test_page_selects_year_and_lists_rows() {
        let mut ctl = controller();
        ctl.set_year("2021");
        let html = render_page(&ctl, &PageOptions::default());
        assert!(html.contains(r#"<option value="2021" selected>2021</option>"#));
        assert!(html.contains("Agua &amp; Vida"));
        assert!(!html.contains("&lt;b&gt;Solar"));
        assert!(html.contains(r#"<div id="count">1 de 2 registros</div>"#));
    }

    #[test]
    fn test_site_base_is_optional() {
        let ctl = controller();
        let with = render_page(&ctl, &PageOptions { site_base: true });
        assert!(with.contains(r#"<base href="/site/">"#));
        let without = render_page(&ctl, &PageOptions::default());
        assert!(!without.contains("<base"));
    }

    #[test]
    fn test_failed_load_page_has_status_and_no_table() {
        let mut ctl = Controller::new(HtmlSurface::default(), DisplayOptions::default());
        ctl.begin_loading();
        ctl.fail("data/data.json");
        let html = render_page(&ctl, &PageOptions::default());
        assert!(html.contains("confirma que existe data/data.json"));
        assert!(!html.contains("<table"));
    }
}
