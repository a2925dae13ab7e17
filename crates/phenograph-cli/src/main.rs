//! Phenograph CLI
//!
//! - `translate`: character-matrix dataset (JSON) → statement graph (JSON)
//! - `decompose`: print the compositional form of ontology classes
//! - `check`: load ontologies, datasets and graphs and report what they hold

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use phenograph_ingest_matrix::{
    DatasetTranslator, InMemoryOntology, OntologyClassDecomposer, TranslatorConfig,
};
use phenograph_model::{Dataset, StatementGraph};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "phenograph")]
#[command(
    author,
    version,
    about = "Phenograph: character matrices to phenotype statement graphs"
)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a dataset into a statement graph.
    Translate {
        /// Dataset JSON
        #[arg(long)]
        dataset: PathBuf,
        /// Ontology (`.obo` or `.json`)
        #[arg(long)]
        ontology: PathBuf,
        /// Translator config JSON; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output graph JSON (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Write the translation report JSON here
        #[arg(long)]
        report: Option<PathBuf>,
        /// Mint deterministic `<prefix><kind>-<n>` instance ids
        #[arg(long, value_name = "PREFIX", num_args = 0..=1, default_missing_value = "")]
        sequential_ids: Option<String>,
        /// Source id stamped on created instance nodes
        #[arg(long)]
        source_id: Option<String>,
        /// Label phenotype nodes from ontology class names
        #[arg(long)]
        label_descriptions: bool,
    },

    /// Decompose ontology classes and print their canonical form and id.
    Decompose {
        #[arg(long)]
        ontology: PathBuf,
        #[arg(required = true)]
        class_ids: Vec<String>,
        /// Print the descriptions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load inputs and report their contents.
    Check {
        #[arg(long)]
        ontology: Option<PathBuf>,
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// A translated graph; reported dangling references must all be
        /// external ontology ids
        #[arg(long)]
        graph: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Translate {
            dataset,
            ontology,
            config,
            out,
            report,
            sequential_ids,
            source_id,
            label_descriptions,
        } => {
            let mut config = match config {
                Some(path) => TranslatorConfig::from_json_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => TranslatorConfig::default(),
            };
            if let Some(prefix) = sequential_ids {
                config = config.with_sequential_ids(prefix);
            }
            if source_id.is_some() {
                config.source_id = source_id;
            }
            if label_descriptions {
                config.label_descriptions = true;
            }
            cmd_translate(
                &dataset,
                &ontology,
                config,
                out.as_deref(),
                report.as_deref(),
            )?;
        }
        Commands::Decompose {
            ontology,
            class_ids,
            json,
        } => {
            cmd_decompose(&ontology, &class_ids, json)?;
        }
        Commands::Check {
            ontology,
            dataset,
            graph,
        } => {
            cmd_check(ontology.as_deref(), dataset.as_deref(), graph.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_ontology(path: &Path) -> Result<InMemoryOntology> {
    InMemoryOntology::from_path(path)
        .with_context(|| format!("loading ontology {}", path.display()))
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing dataset {}", path.display()))
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn cmd_translate(
    dataset_path: &Path,
    ontology_path: &Path,
    config: TranslatorConfig,
    out: Option<&Path>,
    report_out: Option<&Path>,
) -> Result<()> {
    eprintln!("{} {}", "Translating".green().bold(), dataset_path.display());

    let ontology = load_ontology(ontology_path)?;
    let dataset = load_dataset(dataset_path)?;
    let translator = DatasetTranslator::with_config(&ontology, config);
    let translation = translator.translate_with_report(&dataset)?;

    let report = &translation.report;
    eprintln!(
        "  Taxa: {} ({} skipped)",
        report.taxa, report.taxa_skipped
    );
    eprintln!(
        "  Characters: {}, states: {}",
        report.characters, report.states
    );
    eprintln!(
        "  Phenotypes: {} ({} incomplete, {} mirrored)",
        report.phenotypes, report.phenotypes_incomplete, report.symmetric_mirrors
    );
    eprintln!("  Annotations: {}", report.annotations);

    let json = serde_json::to_string_pretty(&translation.graph)?;
    match out {
        Some(path) => {
            write_json(path, &json)?;
            eprintln!(
                "  {} {} (nodes={}, statements={})",
                "→".cyan(),
                path.display(),
                translation.graph.node_count(),
                translation.graph.statement_count()
            );
        }
        None => println!("{json}"),
    }
    if let Some(path) = report_out {
        write_json(path, &serde_json::to_string_pretty(report)?)?;
        eprintln!("  {} {}", "→".cyan(), path.display());
    }

    Ok(())
}

fn cmd_decompose(ontology_path: &Path, class_ids: &[String], json: bool) -> Result<()> {
    let ontology = load_ontology(ontology_path)?;
    let mut decomposer = OntologyClassDecomposer::new(&ontology);

    let mut descriptions = Vec::with_capacity(class_ids.len());
    for class_id in class_ids {
        let description = decomposer
            .decompose(class_id)
            .with_context(|| format!("decomposing {class_id}"))?;
        descriptions.push(description);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptions)?);
        return Ok(());
    }
    for description in &descriptions {
        let kind = if description.is_atom() {
            "atom".normal()
        } else {
            "intersection".yellow()
        };
        println!(
            "{} {} [{}]",
            description.id().cyan(),
            description.canonical_form(),
            kind
        );
    }
    Ok(())
}

fn cmd_check(
    ontology: Option<&Path>,
    dataset: Option<&Path>,
    graph: Option<&Path>,
) -> Result<()> {
    if ontology.is_none() && dataset.is_none() && graph.is_none() {
        return Err(anyhow!(
            "nothing to check: pass --ontology, --dataset or --graph"
        ));
    }

    if let Some(path) = ontology {
        println!("{} {}", "Checking ontology".green().bold(), path.display());
        let ontology = load_ontology(path)?;
        println!("  Classes: {}", ontology.len());
        println!("  Post-composed: {}", ontology.post_composed_count());
    }

    if let Some(path) = dataset {
        println!("{} {}", "Checking dataset".green().bold(), path.display());
        let dataset = load_dataset(path)?;
        let states: usize = dataset.characters.iter().map(|c| c.states.len()).sum();
        let phenotypes: usize = dataset
            .characters
            .iter()
            .flat_map(|c| &c.states)
            .map(|s| s.phenotypes.len())
            .sum();
        println!("  Taxa: {}", dataset.taxa.len());
        println!("  Characters: {}", dataset.characters.len());
        println!("  States: {}", states);
        println!("  Phenotypes: {}", phenotypes);
        println!("  Matrix cells: {}", dataset.matrix.len());
    }

    if let Some(path) = graph {
        println!("{} {}", "Checking graph".green().bold(), path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading graph {}", path.display()))?;
        let graph: StatementGraph = serde_json::from_str(&text)
            .with_context(|| format!("parsing graph {}", path.display()))?;
        println!("  Nodes: {}", graph.node_count());
        println!("  Statements: {}", graph.statement_count());
        let dangling = graph.dangling_references();
        println!("  External references: {}", dangling.len());
        for id in &dangling {
            println!("    {}", id.yellow());
        }
    }

    println!("{}", "Valid.".green());
    Ok(())
}
