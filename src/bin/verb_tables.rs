use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context};
use clap::Parser;
use verb_engine::{
    conjugation::Conjugator, parsing::PersistedTables, saying::VerbSayer, VerbManagerPaths,
};

/// Generates the verb parse tables ahead of time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding conjugations.tsv, modalities.txt and modal_past_tense.txt
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Where to write the tables, defaults to verb_parses.json in the data directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing tables
    #[arg(short, long)]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let paths = VerbManagerPaths::from_data_dir(&args.data_dir);
    let output = args.output.unwrap_or_else(|| paths.verb_parses().clone());
    if output.exists() && !args.force {
        bail!("{} already exists, pass --force to overwrite it", output.display());
    }

    let conjugator = Arc::new(
        Conjugator::from_file(paths.conjugations()).context("Failed to load conjugations")?,
    );
    let sayer = VerbSayer::from_files(conjugator, paths.modalities(), paths.modal_past_tense())
        .context("Failed to load modality tables")?;

    let tables = PersistedTables::generate(&sayer).context("Failed to generate lookup tables")?;
    tables
        .write(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote {} 'to be', {} pro-verb and {} field index keys to {}",
        tables.to_be.len(),
        tables.pro_verbs.len(),
        tables.fir.len(),
        output.display()
    );
    Ok(())
}
