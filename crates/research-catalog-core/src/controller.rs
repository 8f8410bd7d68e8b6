//! Application state and the controller that drives a [`Surface`].
//!
//! The controller is the single owner of the loaded dataset and the filter
//! inputs. Every mutation synchronously re-runs the pipeline:
//!
//! ```text
//! mutate state ─▶ filter::filter ─▶ table::render ─▶ Surface::set_count
//!                                                  └▶ Surface::paint_table
//! ```
//!
//! Before a dataset is loaded (or after a load failure) rendering is a
//! no-op: the surface receives no rows and no count.
//!
//! # Example
//!
//! ```rust
//! use research_catalog_core::controller::{Controller, DisplayOptions, Surface, YearOption};
//! use research_catalog_core::{Dataset, TableModel};
//!
//! #[derive(Default)]
//! struct Count(String);
//!
//! impl Surface for Count {
//!     fn set_meta(&mut self, _: &str) {}
//!     fn set_status(&mut self, _: &str) {}
//!     fn set_year_options(&mut self, _: &[YearOption]) {}
//!     fn set_count(&mut self, count: &str) { self.0 = count.to_string(); }
//!     fn paint_table(&mut self, _: &TableModel) {}
//! }
//!
//! let ds = Dataset::from_json(r#"{"projects": [{"year": 2020}, {"year": 2021}]}"#).unwrap();
//! let mut ctl = Controller::new(Count::default(), DisplayOptions::default());
//! ctl.start(ds);
//! ctl.set_year("2021");
//! assert_eq!(ctl.surface().0, "1 de 2 registros");
//! ```

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use serde::Serialize;

use crate::extract::extract_year;
use crate::filter::filter;
use crate::labels::{Labels, Locale};
use crate::models::{CollectionKind, Dataset};
use crate::table::{self, TableModel};

/// Default display form of the publish timestamp.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Where the controller's output goes.
///
/// Implementations only store or paint what they receive; they never call
/// back into the controller.
pub trait Surface {
    /// Version and publish timestamp line.
    fn set_meta(&mut self, meta: &str);
    /// Loading / error message; `""` clears it.
    fn set_status(&mut self, status: &str);
    /// Year selector options, "all years" first.
    fn set_year_options(&mut self, options: &[YearOption]);
    /// `"<matched> de <total> registros"`.
    fn set_count(&mut self, count: &str);
    /// Replace the displayed table.
    fn paint_table(&mut self, table: &TableModel);
    /// Reflect the current filter inputs (e.g. after [`Controller::clear`]).
    fn set_filters(&mut self, _query: &str, _year: &str) {}
}

/// One entry of the year selector. The "all years" entry has an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearOption {
    pub value: String,
    pub label: String,
}

/// How dates and labels are presented.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub locale: Locale,
    /// chrono `strftime` pattern for the publish timestamp.
    pub timestamp_format: String,
    /// Zone that zoned timestamps are converted into before formatting.
    pub utc_offset: FixedOffset,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            locale: Locale::Es,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            utc_offset: Utc.fix(),
        }
    }
}

/// Everything the controller owns.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    dataset: Option<Dataset>,
    active: CollectionKind,
    query: String,
    year: String,
}

impl AppState {
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn active(&self) -> CollectionKind {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Selected year, `""` for all years.
    pub fn year(&self) -> &str {
        &self.year
    }
}

/// Result of the most recent render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub table: TableModel,
    pub matched: usize,
    pub total: usize,
    pub count_line: String,
}

pub struct Controller<S: Surface> {
    state: AppState,
    surface: S,
    labels: &'static Labels,
    options: DisplayOptions,
    view: Option<View>,
}

impl<S: Surface> Controller<S> {
    pub fn new(surface: S, options: DisplayOptions) -> Self {
        Self {
            state: AppState::default(),
            surface,
            labels: Labels::for_locale(options.locale),
            options,
            view: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn labels(&self) -> &'static Labels {
        self.labels
    }

    /// The last rendered view, `None` until a dataset is loaded.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Show the loading status while the dataset is being fetched.
    pub fn begin_loading(&mut self) {
        self.surface.set_status(self.labels.loading);
    }

    /// Install a freshly loaded dataset and perform the initial render.
    ///
    /// Shows metadata, populates the year selector, clears the status line
    /// and renders the active collection with the current filters.
    pub fn start(&mut self, dataset: Dataset) {
        let meta = meta_line(&dataset, &self.options);
        self.state.dataset = Some(dataset);
        self.surface.set_meta(&meta);
        self.populate_year_options();
        self.surface.set_status("");
        self.render();
    }

    /// Record a load failure for the dataset at `location`.
    ///
    /// No data is kept or shown; the status line tells the user where to look.
    pub fn fail(&mut self, location: &str) {
        self.state.dataset = None;
        self.view = None;
        self.surface.set_status(&self.labels.load_failed(location));
    }

    /// Switch the active collection. Query and year are kept.
    pub fn select_collection(&mut self, kind: CollectionKind) {
        self.state.active = kind;
        self.render();
    }

    pub fn set_query(&mut self, text: &str) {
        self.state.query = text.to_string();
        self.render();
    }

    /// Select a year; `""` or `"all"` removes the constraint.
    pub fn set_year(&mut self, value: &str) {
        let value = value.trim();
        self.state.year = if value.eq_ignore_ascii_case("all") {
            String::new()
        } else {
            value.to_string()
        };
        self.render();
    }

    /// Reset query and year.
    pub fn clear(&mut self) {
        self.state.query.clear();
        self.state.year.clear();
        self.render();
    }

    /// Compute the year options over all collections and send them to the
    /// surface. Empty before a dataset is loaded.
    pub fn populate_year_options(&mut self) -> Vec<YearOption> {
        let options = match &self.state.dataset {
            Some(dataset) => year_options(dataset, self.labels),
            None => Vec::new(),
        };
        self.surface.set_year_options(&options);
        options
    }

    fn render(&mut self) {
        let Some(dataset) = self.state.dataset.as_ref() else {
            return;
        };
        let kind = self.state.active;
        let records = filter(dataset, kind, &self.state.query, &self.state.year);
        let total = dataset.len(kind);
        let view = View {
            table: table::render(kind, &records, self.labels),
            matched: records.len(),
            total,
            count_line: self.labels.count_line(records.len(), total),
        };

        self.surface.set_filters(&self.state.query, &self.state.year);
        self.surface.set_count(&view.count_line);
        self.surface.paint_table(&view.table);
        self.view = Some(view);
    }
}

/// Distinct non-empty years across all collections, newest first, preceded
/// by the "all years" option.
pub fn year_options(dataset: &Dataset, labels: &Labels) -> Vec<YearOption> {
    let mut seen = HashSet::new();
    let mut years: Vec<String> = dataset
        .all_records()
        .map(extract_year)
        .filter(|y| !y.is_empty() && seen.insert(y.clone()))
        .collect();

    years.sort_by(|a, b| {
        let a: f64 = a.parse().unwrap_or(0.0);
        let b: f64 = b.parse().unwrap_or(0.0);
        b.total_cmp(&a)
    });

    std::iter::once(YearOption {
        value: String::new(),
        label: labels.all_years.to_string(),
    })
    .chain(years.into_iter().map(|y| YearOption {
        label: y.clone(),
        value: y,
    }))
    .collect()
}

/// `"v<version> · <timestamp>"`.
pub fn meta_line(dataset: &Dataset, options: &DisplayOptions) -> String {
    let version = dataset.version.as_deref().unwrap_or_default();
    let stamp = dataset
        .published_at
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|raw| format_timestamp(raw, &options.timestamp_format, &options.utc_offset))
        .unwrap_or_default();
    format!("v{} · {}", version, stamp)
}

/// Human form of a publish timestamp.
///
/// RFC 3339 values are converted to `offset`; naive date-times and bare
/// dates are shown as written. Anything unparseable is returned verbatim.
pub fn format_timestamp(raw: &str, format: &str, offset: &FixedOffset) -> String {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(offset).format(format).to_string();
    }

    for pattern in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return naive.format(format).to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_time(NaiveTime::MIN).format(format).to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, Manual, Project};
    use crate::table::Cell;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        meta: String,
        status: String,
        years: Vec<YearOption>,
        count: String,
        rows: Option<usize>,
        paints: usize,
        filters: (String, String),
    }

    impl Surface for Recorder {
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
            self.rows = Some(table.rows.len());
            self.paints += 1;
        }
        fn set_filters(&mut self, query: &str, year: &str) {
            self.filters = (query.to_string(), year.to_string());
        }
    }

    fn project(id: &str, title: &str, year: serde_json::Value) -> Project {
        Project {
            id: Some(id.into()),
            title: Some(title.into()),
            year: Some(year),
            ..Default::default()
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            version: Some("2.1".into()),
            published_at: Some("2024-05-06T07:08:09Z".into()),
            projects: vec![
                project("P-1", "Energía Solar", json!(2020)),
                project("P-2", "Agua", json!("2021")),
            ],
            articles: vec![Article {
                year: Some(json!(2018)),
                ..Default::default()
            }],
            manuals: vec![
                Manual {
                    year: Some(json!("2023")),
                    ..Default::default()
                },
                Manual {
                    year: Some(json!("2021")),
                    ..Default::default()
                },
                Manual {
                    year: Some(json!("s/f")),
                    ..Default::default()
                },
            ],
        }
    }

    fn started() -> Controller<Recorder> {
        let mut ctl = Controller::new(Recorder::default(), DisplayOptions::default());
        ctl.begin_loading();
        ctl.start(dataset());
        ctl
    }

    #[test]
    fn test_start_renders_everything() {
        let ctl = started();
        let s = ctl.surface();
        assert_eq!(s.meta, "v2.1 · 06/05/2024, 07:08:09");
        assert_eq!(s.status, "");
        assert_eq!(s.count, "2 de 2 registros");
        assert_eq!(s.rows, Some(2));
        assert_eq!(ctl.state().active(), CollectionKind::Projects);
    }

    #[test]
    fn test_year_filter_end_to_end() {
        let mut ctl = started();
        ctl.set_year("2021");
        assert_eq!(ctl.surface().count, "1 de 2 registros");
        assert_eq!(ctl.surface().rows, Some(1));
        let view = ctl.view().unwrap();
        assert_eq!(view.table.rows[0][0], Cell::Code { text: "P-2".into() });
    }

    #[test]
    fn test_year_options_span_all_collections_descending() {
        let ctl = started();
        let values: Vec<&str> = ctl.surface().years.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["", "2023", "2021", "2020", "2018"]);
        assert_eq!(ctl.surface().years[0].label, "Todos");
    }

    #[test]
    fn test_select_collection_keeps_filters() {
        let mut ctl = started();
        ctl.set_year("2021");
        ctl.select_collection(CollectionKind::Manuals);
        assert_eq!(ctl.state().year(), "2021");
        assert_eq!(ctl.surface().count, "1 de 3 registros");
    }

    #[test]
    fn test_query_then_clear() {
        let mut ctl = started();
        ctl.set_query("energia");
        assert_eq!(ctl.surface().count, "1 de 2 registros");
        ctl.set_year("2020");
        assert_eq!(ctl.surface().filters, ("energia".to_string(), "2020".to_string()));
        ctl.clear();
        assert_eq!(ctl.state().query(), "");
        assert_eq!(ctl.state().year(), "");
        assert_eq!(ctl.surface().filters, (String::new(), String::new()));
        assert_eq!(ctl.surface().count, "2 de 2 registros");
    }

    #[test]
    fn test_all_year_value_removes_constraint() {
        let mut ctl = started();
        ctl.set_year("2020");
        ctl.set_year("all");
        assert_eq!(ctl.state().year(), "");
        assert_eq!(ctl.surface().rows, Some(2));
    }

    #[test]
    fn test_every_mutation_repaints() {
        let mut ctl = started();
        let before = ctl.surface().paints;
        ctl.set_query("a");
        ctl.set_year("2020");
        ctl.select_collection(CollectionKind::Articles);
        ctl.clear();
        assert_eq!(ctl.surface().paints, before + 4);
    }

    #[test]
    fn test_no_render_before_load() {
        let mut ctl = Controller::new(Recorder::default(), DisplayOptions::default());
        ctl.set_query("x");
        ctl.select_collection(CollectionKind::Articles);
        assert_eq!(ctl.surface().paints, 0);
        assert!(ctl.view().is_none());
        assert!(ctl.populate_year_options().is_empty());
    }

    #[test]
    fn test_fail_sets_status_and_shows_nothing() {
        let mut ctl = Controller::new(Recorder::default(), DisplayOptions::default());
        ctl.begin_loading();
        assert_eq!(ctl.surface().status, "Cargando datos...");
        ctl.fail("data/data.json");
        ctl.set_query("x");
        assert!(ctl.surface().status.contains("data/data.json"));
        assert_eq!(ctl.surface().rows, None);
        assert_eq!(ctl.surface().count, "");
    }

    #[test]
    fn test_format_timestamp_variants() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let minus3 = FixedOffset::west_opt(3 * 3600).unwrap();
        let fmt = DEFAULT_TIMESTAMP_FORMAT;
        assert_eq!(
            format_timestamp("2024-01-02T03:04:05Z", fmt, &minus3),
            "02/01/2024, 00:04:05"
        );
        assert_eq!(
            format_timestamp("2024-01-02 03:04:05", fmt, &utc),
            "02/01/2024, 03:04:05"
        );
        assert_eq!(format_timestamp("2024-01-02", fmt, &utc), "02/01/2024, 00:00:00");
        assert_eq!(format_timestamp("mañana", fmt, &utc), "mañana");
    }

    #[test]
    fn test_meta_line_without_metadata() {
        let ds = Dataset::default();
        assert_eq!(meta_line(&ds, &DisplayOptions::default()), "v · ");
    }
}
