use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use adclick_datasets::{CsvOptions, FeatureHasher};
use clap::Parser;
use log::info;

use crate::config::GridConfig;
use crate::error::Result;
use crate::grid_search::{GridSearch, GridSearchResult};
use crate::holdout::Holdout;
use crate::submission::write_submission;

/// Tune an FTRL-Proximal click predictor on a click log and score a test log
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(name = "adclick")]
#[command(version)]
pub struct Args {
    /// Training click log (CSV, `.gz` is decompressed)
    #[arg(short, long)]
    pub train: PathBuf,

    /// Test click log to predict
    #[arg(short = 'p', long = "test")]
    pub test: PathBuf,

    /// Output file for the `id,click` predictions
    #[arg(short, long)]
    pub submission: PathBuf,

    /// Hold out every n-th training record for validation
    #[arg(long, default_value_t = 100)]
    pub holdout: usize,

    /// Size of the hashed feature space as a power of two, from 1 to 32
    #[arg(
        short,
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(1..=32)
    )]
    pub bits: u32,

    /// Number of hyperparameter combinations trained concurrently
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// JSON file with the hyperparameter grid, keys `alpha`, `beta`, `lambda1` and `lambda2`
    #[arg(short, long)]
    pub grid: Option<PathBuf>,
}

/// Run the grid search on the training log and write the predictions of the best learner
pub fn run(args: &Args) -> Result<GridSearchResult> {
    let grid = match &args.grid {
        Some(path) => GridConfig::load(path)?,
        None => GridConfig::default(),
    };
    let hasher = FeatureHasher::with_bits(args.bits)?;
    let holdout = Holdout::every(args.holdout)?;
    let options = CsvOptions::default();

    let search = GridSearch::new(grid, hasher.n_coordinates(), holdout).jobs(args.jobs);
    let result = search.run(|| adclick_datasets::open(&args.train, hasher, &options))?;

    let test = adclick_datasets::open(&args.test, hasher, &options)?;
    let writer = BufWriter::new(File::create(&args.submission)?);
    let written = write_submission(&result.model, test, writer)?;
    info!(
        "wrote {} predictions to {}",
        written,
        args.submission.display()
    );

    Ok(result)
}
