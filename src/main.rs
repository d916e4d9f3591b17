//! Command line entry point: prints gene and trait posteriors for a pedigree.

use clap::{Parser, ValueEnum};
use heredity::logging::{init_logging, LoggingConfig};
use heredity::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Infer how likely each family member is to carry a gene and show its trait
#[derive(Parser)]
#[command(name = "heredity")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Pedigree CSV with name, mother, father and trait columns
    #[arg(value_name = "DATA")]
    data: PathBuf,

    /// JSON file overriding the model probabilities
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Worker threads to split the enumeration across
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn load_model(path: &Path) -> Result<Model> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Model::from_reader(file)
}

fn run(cli: Cli) -> Result<()> {
    let model = match &cli.model {
        Some(path) => load_model(path)?,
        None => Model::default(),
    };
    let pedigree = load_pedigree(&cli.data)?;

    let marginals = if cli.jobs > 1 {
        pedigree.infer_sharded(&model, cli.jobs)?
    } else {
        pedigree.infer(&model)?
    };
    info!(people = marginals.len(), "inference complete");

    let report = Report::new(&marginals);
    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        use_json: cli.log_json,
        ..LoggingConfig::from_verbosity(cli.verbose)
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
