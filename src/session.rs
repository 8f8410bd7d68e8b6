//! One page load: fetch the dataset, start the controller, replay the
//! user's interactions.
//!
//! Both front ends (CLI and HTTP) go through [`boot`] and [`Interaction`], so
//! a request like `?view=articles&q=energia&year=2021` drives the controller
//! exactly as clicking a tab, typing, and picking a year would.

use tracing::error;

use research_catalog_core::{CollectionKind, Controller, Surface};

use crate::loader::{self, DatasetSource, LoadError};

/// Show the loading status, fetch the dataset, and start the controller.
///
/// On failure the controller is left idle with an error status and the
/// detailed error is logged.
pub async fn boot<S: Surface>(
    controller: &mut Controller<S>,
    source: &dyn DatasetSource,
) -> Result<(), LoadError> {
    controller.begin_loading();
    match loader::load(source).await {
        Ok(dataset) => {
            controller.start(dataset);
            Ok(())
        }
        Err(e) => {
            error!("failed to load dataset: {}", e);
            controller.fail(source.location());
            Err(e)
        }
    }
}

/// User input to replay after the initial render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    pub collection: Option<CollectionKind>,
    pub query: Option<String>,
    pub year: Option<String>,
}

impl Interaction {
    /// Apply tab, search, and year in that order. Absent parts are skipped.
    pub fn apply<S: Surface>(&self, controller: &mut Controller<S>) {
        if let Some(kind) = self.collection {
            controller.select_collection(kind);
        }
        if let Some(query) = &self.query {
            controller.set_query(query);
        }
        if let Some(year) = &self.year {
            controller.set_year(year);
        }
    }
}
