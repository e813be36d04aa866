//! namedex: build and query the language-name search index.
//!
//! ```bash
//! # Build the index and write it as JSON
//! namedex build --language-data lib/jquery.uls.data.js --names names.json -o index.json
//!
//! # Add local alternates on top of the built-in ones
//! namedex build --language-data data.json --names names.json --special-cases extra.json
//!
//! # Try a query against a freshly built index
//! namedex search --language-data data.json --names names.json eng
//! ```
//!
//! Bucket statistics and logs go to stderr, so stdout only carries the index
//! (or search results). Set `RUST_LOG` to change the log level.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use namedex_core::catalog::{LanguageData, NameCatalog, SpecialCases};
use namedex_core::Index;
use namedex_types::{IndexConfig, DEFAULT_INFIX_SEPARATOR};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "namedex")]
#[command(version)]
#[command(about = "Build a search index over multilingual language names")]
#[command(long_about = None)]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and write it as JSON
    Build {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Build the index in memory and print codes matching a query
    Search {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Partial language name, in any script
        #[arg(value_name = "QUERY")]
        query: String,

        /// Maximum number of codes to print
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Args)]
struct CatalogArgs {
    /// Language metadata table (JSON, or the language-data .js script)
    #[arg(long, value_name = "PATH")]
    language_data: PathBuf,

    /// Name table: {writtenIn: {target: name}}
    #[arg(long, value_name = "PATH")]
    names: PathBuf,

    /// Extra alternates, applied after the built-in ones: {code: [alternate]}
    #[arg(long, value_name = "PATH")]
    special_cases: Option<PathBuf>,

    /// Skip the built-in alternates
    #[arg(long)]
    no_builtin_special_cases: bool,

    /// Text between the matched word and the full name of infix entries
    #[arg(long, default_value = DEFAULT_INFIX_SEPARATOR)]
    separator: String,
}

impl CatalogArgs {
    fn build_index(&self) -> Result<Index> {
        let language_data = LanguageData::from_path(&self.language_data).with_context(|| {
            format!(
                "loading language data from {}",
                self.language_data.display()
            )
        })?;
        let names = NameCatalog::from_path(&self.names)
            .with_context(|| format!("loading names from {}", self.names.display()))?;

        let mut special_cases = if self.no_builtin_special_cases {
            SpecialCases::empty()
        } else {
            SpecialCases::builtin()
        };
        if let Some(path) = &self.special_cases {
            special_cases
                .extend_from_path(path)
                .with_context(|| format!("loading special cases from {}", path.display()))?;
        }

        info!(
            records = language_data.len(),
            names = names.len(),
            special_cases = special_cases.len(),
            "catalogs loaded"
        );

        Ok(namedex_core::build(
            &language_data,
            &names,
            &special_cases,
            IndexConfig::with_separator(self.separator.as_str()),
        ))
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the index and writes it out. Nothing is written unless every
/// catalog loads.
fn run_build(catalog: &CatalogArgs, output: Option<&Path>, pretty: bool) -> Result<()> {
    let index = catalog.build_index()?;
    eprintln!("{}", index.stats());

    let mut json = Vec::new();
    index
        .write_json(&mut json, pretty)
        .context("serializing index")?;
    json.push(b'\n');

    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("writing index to {}", path.display()))?;
            info!(path = %path.display(), bytes = json.len(), "index written");
        }
        None => {
            io::stdout()
                .lock()
                .write_all(&json)
                .context("writing index to stdout")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            catalog,
            output,
            pretty,
        } => run_build(&catalog, output.as_deref(), pretty)?,

        Commands::Search {
            catalog,
            query,
            limit,
        } => {
            let index = catalog.build_index()?;
            let mut stdout = io::stdout().lock();
            for code in index.search(&query, limit) {
                writeln!(stdout, "{code}").context("writing results")?;
            }
        }
    }

    Ok(())
}
