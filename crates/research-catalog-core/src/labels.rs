//! User-facing strings per locale.
//!
//! Spanish is the default; the dataset and its audience are Spanish-speaking.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::CollectionKind;

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale '{0}'. Use es or en.")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// Every string the views display.
#[derive(Debug)]
pub struct Labels {
    /// BCP 47 language tag for the page.
    pub lang: &'static str,
    pub id: &'static str,
    pub title: &'static str,
    pub investigators: &'static str,
    pub year: &'static str,
    pub status: &'static str,
    pub area: &'static str,
    pub dicith: &'static str,
    pub cia: &'static str,
    pub link: &'static str,
    pub summary: &'static str,
    pub pdf: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub open: &'static str,
    pub view_pdf: &'static str,
    pub empty: &'static str,
    pub all_years: &'static str,
    pub search: &'static str,
    pub clear: &'static str,
    pub loading: &'static str,
    projects_tab: &'static str,
    articles_tab: &'static str,
    manuals_tab: &'static str,
    count_joiner: &'static str,
    count_noun: &'static str,
    load_failed: &'static str,
}

static ES: Labels = Labels {
    lang: "es",
    id: "ID",
    title: "Título",
    investigators: "Investigadores",
    year: "Año",
    status: "Estado",
    area: "Área",
    dicith: "DICIHT",
    cia: "CIA",
    link: "Enlace",
    summary: "Resumen",
    pdf: "PDF",
    yes: "Sí",
    no: "No",
    open: "Abrir",
    view_pdf: "Ver PDF",
    empty: "—",
    all_years: "Todos",
    search: "Buscar",
    clear: "Limpiar filtros",
    loading: "Cargando datos...",
    projects_tab: "Proyectos",
    articles_tab: "Artículos",
    manuals_tab: "Manuales",
    count_joiner: "de",
    count_noun: "registros",
    load_failed: "Error cargando datos. Revisa consola y confirma que existe",
};

static EN: Labels = Labels {
    lang: "en",
    id: "ID",
    title: "Title",
    investigators: "Investigators",
    year: "Year",
    status: "Status",
    area: "Area",
    dicith: "DICIHT",
    cia: "CIA",
    link: "Link",
    summary: "Summary",
    pdf: "PDF",
    yes: "Yes",
    no: "No",
    open: "Open",
    view_pdf: "View PDF",
    empty: "—",
    all_years: "All",
    search: "Search",
    clear: "Clear filters",
    loading: "Loading data...",
    projects_tab: "Projects",
    articles_tab: "Articles",
    manuals_tab: "Manuals",
    count_joiner: "of",
    count_noun: "records",
    load_failed: "Error loading data. Check the console and confirm this file exists:",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::Es => &ES,
            Locale::En => &EN,
        }
    }

    /// `"<matched> de <total> registros"`.
    pub fn count_line(&self, matched: usize, total: usize) -> String {
        format!(
            "{} {} {} {}",
            matched, self.count_joiner, total, self.count_noun
        )
    }

    /// Status shown when the dataset at `location` could not be loaded.
    pub fn load_failed(&self, location: &str) -> String {
        format!("{} {}", self.load_failed, location)
    }

    pub fn yes_no(&self, value: bool) -> &'static str {
        if value {
            self.yes
        } else {
            self.no
        }
    }

    pub fn tab(&self, kind: CollectionKind) -> &'static str {
        match kind {
            CollectionKind::Projects => self.projects_tab,
            CollectionKind::Articles => self.articles_tab,
            CollectionKind::Manuals => self.manuals_tab,
        }
    }
}
