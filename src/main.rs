//! # Research Catalog CLI (`rcat`)
//!
//! The `rcat` binary loads the published catalog and shows it as a table,
//! or serves it as a local web page.
//!
//! ## Usage
//!
//! ```bash
//! rcat --config ./config/rcat.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rcat show` | Print one collection, optionally filtered by text and year |
//! | `rcat years` | List the years offered by the year selector |
//! | `rcat serve` | Start the local web server |
//! | `rcat completions <shell>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! # Articles mentioning "energía" (accents optional) from 2021
//! rcat show --collection articles --query energia --year 2021
//!
//! # Same view as JSON
//! rcat show -c articles -q energia -y 2021 --json
//!
//! # Read a remote catalog instead of the configured one
//! rcat --source https://example.org/data/data.json show
//! ```

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::{self, Write};
use std::path::PathBuf;

use research_catalog::config;
use research_catalog::loader::source_from_location;
use research_catalog::logging;
use research_catalog::server;
use research_catalog::session::{boot, Interaction};
use research_catalog::terminal::TerminalSurface;
use research_catalog_core::{CollectionKind, Controller};

/// Research Catalog CLI: browse research projects, articles, and manuals.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/rcat.example.toml` for a full example. A missing file
/// means defaults.
#[derive(Parser)]
#[command(
    name = "rcat",
    about = "Browse a published catalog of research projects, articles, and manuals",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/rcat.toml")]
    config: PathBuf,

    /// Dataset location (path or http(s) URL). Overrides `data.source`.
    #[arg(long, global = true)]
    source: Option<String>,

    /// Log at debug level. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one collection as a table.
    ///
    /// Filters are applied the same way the web page applies them: pick the
    /// collection, type the query, then select the year.
    Show {
        /// `projects`, `articles`, or `manuals` (Spanish names accepted).
        #[arg(short, long, default_value = "projects")]
        collection: CollectionKind,

        /// Free-text search, case- and accent-insensitive.
        #[arg(short, long)]
        query: Option<String>,

        /// Exact year, e.g. `2021`. `all` disables the year filter.
        #[arg(short, long)]
        year: Option<String>,

        /// Print the rendered view as JSON instead of a text table.
        #[arg(long)]
        json: bool,
    },

    /// List the years offered by the year selector, newest first.
    Years,

    /// Serve the catalog as a web page on `[server].bind`.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "rcat", &mut io::stdout());
        return Ok(());
    }

    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(source) = cli.source {
        cfg.data.source = source;
        config::validate(&cfg)?;
    }

    match cli.command {
        Commands::Show {
            collection,
            query,
            year,
            json,
        } => {
            let interaction = Interaction {
                collection: Some(collection),
                query,
                year,
            };
            let controller = open(&cfg, &interaction).await?;
            let mut out = io::stdout().lock();
            if json {
                if let Some(view) = controller.view() {
                    serde_json::to_writer_pretty(&mut out, view)?;
                    writeln!(out)?;
                }
            } else {
                controller.surface().print(&mut out)?;
            }
        }
        Commands::Years => {
            let controller = open(&cfg, &Interaction::default()).await?;
            let mut out = io::stdout().lock();
            for option in &controller.surface().years {
                writeln!(out, "{}", option.label)?;
            }
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load the dataset into a terminal controller and replay `interaction`.
///
/// A failed load returns the status line as the error, with the loader's
/// error as its cause.
async fn open(
    cfg: &config::Config,
    interaction: &Interaction,
) -> anyhow::Result<Controller<TerminalSurface>> {
    let mut controller = Controller::new(TerminalSurface::default(), cfg.display_options()?);
    let source = source_from_location(&cfg.data.source);

    if let Err(e) = boot(&mut controller, source.as_ref()).await {
        let status = controller.surface().status.clone();
        return Err(e).context(status);
    }

    interaction.apply(&mut controller);
    Ok(controller)
}
