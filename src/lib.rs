//! # Research Catalog
//!
//! Browse a published catalog of research projects, articles, and manuals.
//!
//! The catalog is a single JSON document (`data/data.json` by default, or any
//! `http(s)://` URL). Research Catalog fetches it, lets you pick a collection,
//! search it accent-insensitively, narrow it to a year, and shows the result
//! as a table in the terminal or on a local web page.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌──────────────┐
//! │    Loader    │──▶│    Controller (core)     │──▶│   Surface    │
//! │ file / HTTP  │   │ filter → table → counts  │   │ terminal/page│
//! └──────────────┘   └──────────────────────────┘   └──────┬───────┘
//!                                                          │
//!                                       ┌──────────────────┤
//!                                       ▼                  ▼
//!                                  ┌──────────┐      ┌──────────┐
//!                                  │   CLI    │      │   HTTP   │
//!                                  │  (rcat)  │      │  (axum)  │
//!                                  └──────────┘      └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! rcat show                                  # projects, no filters
//! rcat show --collection articles --query energia --year 2021
//! rcat years                                 # year selector contents
//! rcat serve                                 # http://127.0.0.1:8080
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`loader`] | Fetch and parse the dataset (file or HTTP) |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`session`] | Boot a controller and replay user input |
//! | [`terminal`] | Plain-text surface for the CLI |
//! | [`page`] | HTML surface and page shell |
//! | [`server`] | Local web server |
//!
//! Filtering, table rendering, and the controller live in
//! [`research_catalog_core`].

pub mod config;
pub mod loader;
pub mod logging;
pub mod page;
pub mod server;
pub mod session;
pub mod terminal;
