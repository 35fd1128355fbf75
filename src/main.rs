//! amdec - boiler FMECA decision support
//!
//! Command-line front end over the library pipeline.
//!
//! # Usage
//!
//! ```bash
//! # FMECA workbook from a stoppage history
//! amdec fmeca historique.xlsx --output data/models/amdec.xlsx
//!
//! # Work order for one part, criticality looked up in a generated FMECA
//! amdec plan "Économiseur BT" "Épingle" --fmeca data/models/amdec.xlsx
//!
//! # Retrieval over generated documents
//! amdec index rebuild
//! amdec index search "corrosion collecteur"
//!
//! # Assistant
//! amdec chat "quelle est la criticité du surchauffeur HT ?"
//! ```
//!
//! # Environment Variables
//!
//! - `AMDEC_CONFIG`: Path to the TOML configuration file (default: ./amdec.toml)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use boiler_amdec::acquisition;
use boiler_amdec::config::{self, AppConfig};
use boiler_amdec::context::{IndexSettings, Retriever, VectorDb};
use boiler_amdec::render;
use boiler_amdec::{ChatBot, FmecaBuilder, FmecaTable, Planner};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "amdec")]
#[command(about = "Boiler FMECA (AMDEC) analysis, maintenance work orders and knowledge retrieval")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the FMECA workbook of a stoppage history (.xlsx or .csv)
    Fmeca {
        input: PathBuf,
        /// Output workbook (default: <models_dir>/amdec_generated.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the normalised history next to the input
        #[arg(long)]
        normalized: bool,
        /// Register the workbook in the retrieval index
        #[arg(long)]
        index: bool,
    },

    /// Write the normalised history of a stoppage file
    Normalize {
        input: PathBuf,
        /// Output workbook (default: <input>_normalized_<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Criticality of a (component, subcomponent) pair
    Criticality {
        component: String,
        subcomponent: String,
        /// FMECA workbook consulted before the built-in table
        #[arg(long)]
        fmeca: Option<PathBuf>,
    },

    /// Generate a maintenance work order (.docx)
    Plan {
        component: String,
        subcomponent: String,
        /// Use this criticality instead of looking it up
        #[arg(short, long)]
        criticality: Option<u32>,
        /// FMECA workbook consulted before the built-in table
        #[arg(long)]
        fmeca: Option<PathBuf>,
        /// Output document (default: <maintenance_dir>/gamme_<component>_<subcomponent>.docx)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Register the work order in the retrieval index
        #[arg(long)]
        index: bool,
    },

    /// Retrieval index maintenance and queries
    Index {
        #[command(subcommand)]
        action: IndexAction,
    },

    /// Ask the maintenance assistant one question
    Chat {
        /// Question words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// FMECA workbook consulted for criticality answers
        #[arg(long)]
        fmeca: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum IndexAction {
    /// Re-scan the models and maintenance directories and refit
    Rebuild,
    /// Add one document
    Add { path: PathBuf },
    /// Most similar documents with their relevant passages
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        /// Ranked documents only, without passage extraction
        #[arg(long)]
        raw: bool,
    },
    /// Print an indexed document
    Get { id: String },
}

// ============================================================================
// Commands
// ============================================================================

fn load_fmeca_table(path: &Path) -> Result<FmecaTable> {
    render::load_fmeca(path).with_context(|| format!("Failed to load FMECA workbook {}", path.display()))
}

fn open_index(config: &AppConfig) -> Result<VectorDb> {
    VectorDb::open(IndexSettings::from_config(config)).context("Failed to open the retrieval index")
}

fn register(config: &AppConfig, path: &Path) -> Result<()> {
    let mut db = open_index(config)?;
    if db.add_file(path).context("Failed to update the retrieval index")? {
        info!(path = %path.display(), documents = db.len(), "Document indexed");
    } else {
        warn!(path = %path.display(), "Document could not be indexed");
    }
    Ok(())
}

fn run_fmeca(config: &AppConfig, input: &Path, output: Option<PathBuf>, normalized: bool, index: bool) -> Result<()> {
    let records = acquisition::parse(input).with_context(|| format!("Failed to parse {}", input.display()))?;
    if normalized {
        let path = acquisition::default_normalized_path(input);
        acquisition::save_normalized(&records, &path).context("Failed to write the normalised history")?;
    }

    let table = FmecaBuilder::from_config(config).generate(&records);
    let output = output.unwrap_or_else(|| config.paths.fmeca_output());
    render::save_fmeca(&table, &output).context("Failed to write the FMECA workbook")?;
    println!("{}", render::fmeca_text(&table));

    if index {
        register(config, &output)?;
    }
    Ok(())
}

fn run_plan(
    config: &AppConfig,
    component: &str,
    subcomponent: &str,
    criticality: Option<u32>,
    fmeca: Option<&Path>,
    output: Option<PathBuf>,
    index: bool,
) -> Result<()> {
    let mut planner = Planner::from_config(config);
    if let Some(path) = fmeca {
        planner = planner.with_fmeca(load_fmeca_table(path)?);
    }
    let plan = planner.generate_plan(component, subcomponent, criticality);
    let output = output.unwrap_or_else(|| render::default_plan_path(&config.paths.maintenance_dir, &plan));
    render::save_plan(&plan, &output).context("Failed to write the work order")?;
    println!("{}", render::plan_text(&plan));

    if index {
        register(config, &output)?;
    }
    Ok(())
}

fn run_index(config: &AppConfig, action: IndexAction) -> Result<()> {
    match action {
        IndexAction::Rebuild => {
            let mut db = VectorDb::empty(IndexSettings::from_config(config));
            db.rebuild().context("Failed to rebuild the retrieval index")?;
            println!("{} documents indexed", db.len());
        }
        IndexAction::Add { path } => register(config, &path)?,
        IndexAction::Search { query, top_k, raw } => {
            let db = open_index(config)?;
            let query = query.join(" ");
            if raw {
                let hits = db.search(&query, top_k.unwrap_or(config.retrieval.search_top_k));
                for hit in hits {
                    println!("{:.3}  {} ({})", hit.similarity, hit.document.id, hit.document.kind);
                }
                return Ok(());
            }

            let top_k = top_k.unwrap_or(config.retrieval.retrieve_top_k);
            let results = Retriever::with_config(&db, config).retrieve(&query, top_k);
            if results.is_empty() {
                println!("Aucun document pertinent.");
            }
            for result in results {
                println!("{} ({}) similarity {:.3}", result.id, result.kind, result.similarity);
                for segment in &result.segments {
                    println!("  > {segment}");
                }
            }
        }
        IndexAction::Get { id } => {
            let db = open_index(config)?;
            let document = db
                .get_document_by_id(&id)
                .with_context(|| format!("No indexed document with id {id}"))?;
            println!("{} ({}) {}\n\n{}", document.id, document.kind, document.path.display(), document.text);
        }
    }
    Ok(())
}

fn run_chat(config: &AppConfig, query: &str, fmeca: Option<&Path>) -> Result<()> {
    let mut bot = ChatBot::from_config(config);
    if let Some(path) = fmeca {
        bot = bot.with_fmeca(load_fmeca_table(path)?);
    }
    let answer = if bot.is_farewell(query) { bot.farewell() } else { bot.generate_response(query) };
    println!("{answer}");
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    config::init(AppConfig::load());
    let config = config::get();

    match args.command {
        Command::Fmeca { input, output, normalized, index } => run_fmeca(config, &input, output, normalized, index),
        Command::Normalize { input, output } => {
            let records =
                acquisition::parse(&input).with_context(|| format!("Failed to parse {}", input.display()))?;
            let output = output.unwrap_or_else(|| acquisition::default_normalized_path(&input));
            acquisition::save_normalized(&records, &output).context("Failed to write the normalised history")?;
            println!("{} records written to {}", records.len(), output.display());
            Ok(())
        }
        Command::Criticality { component, subcomponent, fmeca } => {
            let mut planner = Planner::from_config(config);
            if let Some(path) = fmeca {
                planner = planner.with_fmeca(load_fmeca_table(&path)?);
            }
            println!("{}", planner.get_criticality(&component, &subcomponent));
            Ok(())
        }
        Command::Plan { component, subcomponent, criticality, fmeca, output, index } => run_plan(
            config,
            &component,
            &subcomponent,
            criticality,
            fmeca.as_deref(),
            output,
            index,
        ),
        Command::Index { action } => run_index(config, action),
        Command::Chat { query, fmeca } => run_chat(config, &query.join(" "), fmeca.as_deref()),
    }
}
