//! End-to-end controller flow: load a dataset file, then click tabs, type,
//! pick years, and clear, checking what the surface ends up showing.

use std::fs;
use tempfile::TempDir;

use research_catalog::loader::FileSource;
use research_catalog::session::{boot, Interaction};
use research_catalog::terminal::TerminalSurface;
use research_catalog_core::{Cell, CollectionKind, Controller, DisplayOptions, Locale};

const DATASET: &str = r#"{
  "version": "1.3",
  "fecha_publicacion": "2024-06-30",
  "projects": [
    {"id": "P-1", "title": "Energía Solar", "investigators": ["Ana Pérez", "Luis Gómez"], "year": 2021, "status": "Activo", "area": "Energía", "dicith": "D-1", "isCIA": 1},
    {"id": "P-2", "title": "Agua", "investigators": null, "year": "2019", "status": null}
  ],
  "articles": [
    {"id": "A-1", "title": "Radiación solar", "investigators": ["Ana Pérez"], "year": 2021.0, "link": "https://doi.org/10.1/x"},
    {"id": "A-2", "title": "Suelos", "year": "s/f", "link": ""}
  ],
  "manuals": [
    {"id": "M-1", "title": "Guía", "year": 2020, "summary": "Paneles solares", "pdf": "docs/guia.pdf"},
    "not a record"
  ]
}"#;

async fn started(locale: Locale) -> (TempDir, Controller<TerminalSurface>) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    fs::write(&path, DATASET).unwrap();

    let options = DisplayOptions {
        locale,
        ..Default::default()
    };
    let mut controller = Controller::new(TerminalSurface::default(), options);
    boot(&mut controller, &FileSource::new(&path)).await.unwrap();
    (tmp, controller)
}

fn row_ids(controller: &Controller<TerminalSurface>) -> Vec<String> {
    controller
        .view()
        .unwrap()
        .table
        .rows
        .iter()
        .map(|row| row[0].display_text().to_string())
        .collect()
}

#[tokio::test]
async fn test_initial_render() {
    let (_tmp, ctl) = started(Locale::Es).await;
    let surface = ctl.surface();

    assert_eq!(surface.meta, "v1.3 · 30/06/2024, 00:00:00");
    assert!(surface.status.is_empty());
    assert_eq!(surface.count, "2 de 2 registros");
    assert_eq!(row_ids(&ctl), vec!["P-1", "P-2"]);

    let years: Vec<&str> = surface.years.iter().map(|y| y.label.as_str()).collect();
    assert_eq!(years, vec!["Todos", "2021", "2020", "2019"]);
}

#[tokio::test]
async fn test_year_filter_counts_against_collection_total() {
    let (_tmp, mut ctl) = started(Locale::Es).await;

    ctl.set_year("2021");
    assert_eq!(ctl.surface().count, "1 de 2 registros");
    assert_eq!(ctl.surface().table.as_ref().unwrap().rows.len(), 1);
    assert_eq!(row_ids(&ctl), vec!["P-1"]);
}

#[tokio::test]
async fn test_filters_survive_tab_switch() {
    let (_tmp, mut ctl) = started(Locale::Es).await;

    Interaction {
        collection: None,
        query: Some("SOLAR".into()),
        year: None,
    }
    .apply(&mut ctl);
    assert_eq!(row_ids(&ctl), vec!["P-1"]);

    ctl.select_collection(CollectionKind::Articles);
    assert_eq!(row_ids(&ctl), vec!["A-1"]);
    assert_eq!(ctl.surface().count, "1 de 2 registros");

    ctl.select_collection(CollectionKind::Manuals);
    assert_eq!(row_ids(&ctl), vec!["M-1"]);
    assert_eq!(ctl.surface().count, "1 de 2 registros");
}

#[tokio::test]
async fn test_accent_insensitive_search_on_investigators() {
    let (_tmp, mut ctl) = started(Locale::Es).await;

    ctl.set_query("luis gomez");
    assert_eq!(row_ids(&ctl), vec!["P-1"]);

    ctl.set_query("perez");
    ctl.select_collection(CollectionKind::Articles);
    assert_eq!(row_ids(&ctl), vec!["A-1"]);
}

#[tokio::test]
async fn test_clear_restores_everything() {
    let (_tmp, mut ctl) = started(Locale::Es).await;

    ctl.set_query("agua");
    ctl.set_year("2019");
    assert_eq!(row_ids(&ctl), vec!["P-2"]);

    ctl.clear();
    assert_eq!(ctl.state().query(), "");
    assert_eq!(ctl.state().year(), "");
    assert_eq!(row_ids(&ctl), vec!["P-1", "P-2"]);
}

#[tokio::test]
async fn test_article_cells() {
    let (_tmp, mut ctl) = started(Locale::Es).await;
    ctl.select_collection(CollectionKind::Articles);

    let rows = &ctl.view().unwrap().table.rows;
    assert_eq!(rows[0][3], Cell::Text { text: "2021".into() });
    assert_eq!(
        rows[0][6],
        Cell::Link {
            href: "https://doi.org/10.1/x".into(),
            label: "Abrir".into(),
        }
    );
    assert_eq!(rows[1][3], Cell::Text { text: String::new() });
    assert_eq!(rows[1][6], Cell::Placeholder { text: "—".into() });
}

#[tokio::test]
async fn test_project_flags_and_missing_fields() {
    let (_tmp, ctl) = started(Locale::En).await;
    let rows = &ctl.view().unwrap().table.rows;

    assert_eq!(
        rows[0][7],
        Cell::Flag {
            value: true,
            text: "Yes".into(),
        }
    );
    assert_eq!(
        rows[1][2],
        Cell::Text {
            text: String::new()
        }
    );
    assert_eq!(
        rows[1][7],
        Cell::Flag {
            value: false,
            text: "No".into(),
        }
    );
    assert_eq!(ctl.surface().count, "2 of 2 records");
}

#[tokio::test]
async fn test_terminal_output() {
    let (_tmp, mut ctl) = started(Locale::Es).await;
    ctl.select_collection(CollectionKind::Manuals);

    let mut out = Vec::new();
    ctl.surface().print(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("v1.3 · "));
    assert!(text.contains("docs/guia.pdf"));
    assert!(text.trim_end().ends_with("2 de 2 registros"));
}
