//! # Research Catalog Core
//!
//! Shared, WASM-safe logic for Research Catalog: dataset models, text
//! normalization, field extraction, the filter engine, the table renderer,
//! and the view controller that ties them together.
//!
//! This crate contains no tokio, reqwest, filesystem I/O, or other
//! native-only dependencies. Fetching the dataset and painting the result
//! are left to the caller through [`controller::Surface`].
//!
//! ## Pipeline
//!
//! ```text
//! Dataset ──▶ filter (normalize + extract) ──▶ table::render ──▶ Surface
//!                     ▲                                            ▲
//!                     └──────────── Controller state ──────────────┘
//! ```

pub mod controller;
pub mod extract;
pub mod filter;
pub mod html;
pub mod labels;
pub mod models;
pub mod normalize;
pub mod table;

pub use controller::{AppState, Controller, DisplayOptions, Surface, View, YearOption};
pub use labels::{Labels, Locale};
pub use models::{Article, CollectionKind, Dataset, Manual, Project, Record};
pub use table::{Cell, TableModel};
