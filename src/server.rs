//! Local web front end.
//!
//! Every request re-fetches the dataset and replays the query parameters
//! through a fresh [`Controller`], so the page always reflects the current
//! published document.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Catalog page (`view`, `q`, `year` query params) |
//! | `GET`  | `/api/table` | Same view as JSON: table model, counts, year options |
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/site/*` | Static files from `server.site_root`, when configured |
//!
//! # Error Contract
//!
//! JSON errors use one shape:
//!
//! ```json
//! { "error": { "code": "load_failed", "message": "request to ... failed with status 404" } }
//! ```
//!
//! Error codes: `bad_request` (400), `load_failed` (502), `internal` (500).
//! The HTML page never returns a JSON error; a failed load renders the page
//! with the status line set, no table, and status 502.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use research_catalog_core::{CollectionKind, Controller, DisplayOptions, TableModel, YearOption};

use crate::config::Config;
use crate::loader::{source_from_location, LoadError};
use crate::page::{render_page, HtmlSurface, PageOptions};
use crate::session::{boot, Interaction};

/// Shared state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    display: DisplayOptions,
    page: PageOptions,
}

/// Build the router for `config`. Split from [`run_server`] so tests can
/// serve it on an ephemeral port.
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let state = AppState {
        config: Arc::new(config.clone()),
        display: config.display_options()?,
        page: PageOptions {
            site_base: config.server.site_root.is_some(),
        },
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/", get(handle_page))
        .route("/api/table", get(handle_table))
        .route("/health", get(handle_health));

    if let Some(root) = &config.server.site_root {
        if !root.is_dir() {
            warn!("server.site_root {} is not a directory", root.display());
        }
        app = app.nest_service("/site", ServeDir::new(root));
    }

    Ok(app.layer(cors).with_state(state))
}

/// Serve the catalog on `[server].bind` until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let app = build_router(config)?;
    let bind_addr = config.server.bind.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        "catalog listening on http://{} (data: {})",
        bind_addr, config.data.source
    );
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn load_failed(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "load_failed".to_string(),
        message: message.into(),
    }
}

fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ Query parameters ============

/// `?view=articles&q=energia&year=2021`. All parameters are optional.
#[derive(Debug, Default, Deserialize)]
struct ViewParams {
    view: Option<String>,
    q: Option<String>,
    year: Option<String>,
}

impl ViewParams {
    fn interaction(self) -> Result<Interaction, AppError> {
        let collection = match self.view.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) => Some(
                v.parse::<CollectionKind>()
                    .map_err(|e| bad_request(e.to_string()))?,
            ),
        };
        Ok(Interaction {
            collection,
            query: self.q,
            year: self.year,
        })
    }
}

/// Load the dataset and replay `interaction` on a fresh controller.
async fn drive(
    state: &AppState,
    interaction: &Interaction,
) -> (Controller<HtmlSurface>, Result<(), LoadError>) {
    let mut controller = Controller::new(HtmlSurface::default(), state.display.clone());
    let source = source_from_location(&state.config.data.source);
    let loaded = boot(&mut controller, source.as_ref()).await;
    if loaded.is_ok() {
        interaction.apply(&mut controller);
    }
    (controller, loaded)
}

// ============ GET / ============

async fn handle_page(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Response, AppError> {
    let interaction = params.interaction()?;
    let (controller, loaded) = drive(&state, &interaction).await;
    let html = Html(render_page(&controller, &state.page));

    Ok(match loaded {
        Ok(()) => html.into_response(),
        Err(_) => (StatusCode::BAD_GATEWAY, html).into_response(),
    })
}

// ============ GET /api/table ============

#[derive(Serialize)]
struct TableResponse {
    view: CollectionKind,
    query: String,
    year: String,
    meta: String,
    matched: usize,
    total: usize,
    count: String,
    years: Vec<YearOption>,
    table: TableModel,
}

async fn handle_table(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Json<TableResponse>, AppError> {
    let interaction = params.interaction()?;
    let (controller, loaded) = drive(&state, &interaction).await;
    loaded.map_err(|e| load_failed(e.to_string()))?;

    let view = controller
        .view()
        .cloned()
        .ok_or_else(|| internal_error("dataset loaded but nothing was rendered"))?;
    let app_state = controller.state();
    let surface = controller.surface();

    Ok(Json(TableResponse {
        view: app_state.active(),
        query: app_state.query().to_string(),
        year: app_state.year().to_string(),
        meta: surface.meta.clone(),
        matched: view.matched,
        total: view.total,
        count: view.count_line,
        years: surface.years.clone(),
        table: view.table,
    }))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_parse_view() {
        let params = ViewParams {
            view: Some("manuales".into()),
            q: Some("guía".into()),
            year: None,
        };
        let interaction = params.interaction().ok().unwrap();
        assert_eq!(interaction.collection, Some(CollectionKind::Manuals));
        assert_eq!(interaction.query.as_deref(), Some("guía"));
    }

    #[test]
    fn test_params_empty_view_keeps_default() {
        let interaction = ViewParams::default().interaction().ok().unwrap();
        assert_eq!(interaction, Interaction::default());
    }

    #[test]
    fn test_params_reject_unknown_view() {
        let params = ViewParams {
            view: Some("theses".into()),
            ..Default::default()
        };
        let err = params.interaction().err().unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "bad_request");
    }
}
