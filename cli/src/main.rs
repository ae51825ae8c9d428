//! errcat - search the door-operator error-code catalogue.

mod interactive;
mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use errcat_core::cache::CatalogueCache;
use errcat_core::loader::{CatalogueLoader, LoadReport};
use errcat_core::types::{AppConfig, Config};
use errcat_search::{SearchConfig, SearchEngine, UiState};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "errcat")]
#[command(about = "Search the door-operator error-code catalogue", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding config.toml and the catalogue cache
    #[arg(long, global = true, env = "ERRCAT_DATA_DIR", default_value = ".errcat")]
    data_dir: PathBuf,

    /// CSV file read when no catalogue is cached (overrides the config)
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List matching records
    Search(QueryArgs),

    /// Show the manufacturer and device-type options for a query
    Facets(QueryArgs),

    /// Read queries from stdin, one per line, with debouncing
    Interactive,

    /// List all error codes for autocompletion
    Suggest,

    /// Replace the cached catalogue with a CSV file
    Import {
        /// CSV file with a header row
        file: PathBuf,
    },

    /// Drop the cached catalogue
    Reset,

    /// Show what is cached
    Info,
}

#[derive(Args)]
struct QueryArgs {
    /// Search words; each must be a whole word of the code or keywords
    query: Vec<String>,

    /// Manufacturer to restrict to
    #[arg(short, long, default_value = "")]
    manufacturer: String,

    /// Device type to restrict to
    #[arg(short = 't', long, default_value = "")]
    device_type: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl QueryArgs {
    fn ui_state(&self) -> UiState {
        UiState::new(
            self.query.join(" "),
            self.manufacturer.as_str(),
            self.device_type.as_str(),
        )
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config {
        base_path: cli.data_dir.clone(),
    };
    let app_config = load_app_config(&config)?;

    let cache = if app_config.catalogue.cache_enabled {
        Some(CatalogueCache::open(&config).context("failed to open catalogue cache")?)
    } else {
        None
    };
    let fallback = cli
        .catalogue
        .clone()
        .unwrap_or_else(|| app_config.catalogue.default_path.clone());
    let mut loader = CatalogueLoader::new(cache, fallback);
    let search_config = SearchConfig::from(&app_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Search(args) => {
            let engine = load_engine(&mut loader, search_config)?;
            let outcome = engine.run(&args.ui_state());
            if args.json {
                render::json(&mut out, &outcome)?;
            } else {
                render::outcome(&mut out, &outcome)?;
            }
        }
        Command::Facets(args) => {
            let engine = load_engine(&mut loader, search_config)?;
            let outcome = engine.run(&args.ui_state());
            if args.json {
                render::json(&mut out, &outcome)?;
            } else {
                render::facets(&mut out, &outcome.facets)?;
            }
        }
        Command::Interactive => {
            let engine = load_engine(&mut loader, search_config)?;
            drop(out);
            interactive::run(&engine)?;
        }
        Command::Suggest => {
            let engine = load_engine(&mut loader, search_config)?;
            for code in engine.code_suggestions() {
                writeln!(out, "{code}")?;
            }
        }
        Command::Import { file } => {
            let report = loader
                .import(&file, SystemTime::now())
                .with_context(|| format!("failed to import {}", file.display()))?;
            report_parse_failure(&report);
            if report.is_parsed() {
                writeln!(
                    out,
                    "{} loaded: {} records",
                    file.display(),
                    report.catalogue.len()
                )?;
            }
        }
        Command::Reset => {
            if loader.reset()? {
                writeln!(out, "Cached catalogue removed.")?;
            } else {
                writeln!(out, "Nothing cached.")?;
            }
        }
        Command::Info => match loader.cache() {
            None => writeln!(out, "Catalogue cache is disabled.")?,
            Some(cache) => match cache.entry()? {
                None => writeln!(out, "Nothing cached.")?,
                Some(entry) => render::cache_entry(&mut out, &entry)?,
            },
        },
    }

    Ok(())
}

fn load_app_config(config: &Config) -> Result<AppConfig> {
    let path = config.config_path();
    let app_config = AppConfig::load(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    for problem in app_config.validate() {
        warn!(path = %path.display(), "{problem}; using default");
    }
    Ok(app_config.with_defaults_for_invalid())
}

fn load_engine(loader: &mut CatalogueLoader, config: SearchConfig) -> Result<SearchEngine> {
    let report = loader.load(SystemTime::now()).with_context(|| {
        format!(
            "error list could not be loaded from {}",
            loader.fallback_path().display()
        )
    })?;
    report_parse_failure(&report);
    Ok(SearchEngine::new(report.catalogue, config))
}

fn report_parse_failure(report: &LoadReport) {
    if let Some(err) = &report.parse_error {
        eprintln!("Parsing the catalogue failed: {err}");
    }
}
