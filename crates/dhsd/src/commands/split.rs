use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::annotations::write_annotations;
use crate::prelude::*;
use crate::split::stratified_split;

const DEFAULT_TRAIN_FRACTION: f64 = 0.8;
const DEFAULT_SEED: u64 = 42;

/// Write a writer-stratified train/test partition of the annotation
/// table.
#[derive(Debug, Default, Parser)]
pub(crate) struct Split {
    /// Run verbosely. Print additional progress information to the
    /// standard error stream. This option conflicts with the
    /// `--quiet` option.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Operate quietly; do not show progress. This option conflicts
    /// with the `--verbose` option.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Fraction of each writer group assigned to the train split.
    #[arg(long, value_name = "fraction")]
    train_fraction: Option<f64>,

    /// Seed of the per-writer shuffles.
    #[arg(long, value_name = "seed")]
    seed: Option<u64>,

    /// Write `train.csv` and `test.csv` into `directory` instead of
    /// the dataset root.
    #[arg(short, long, value_name = "directory")]
    output: Option<PathBuf>,
}

impl Split {
    pub(crate) fn execute(self) -> DhsdResult<()> {
        let dataset = Dataset::discover()?;
        let config = dataset.config()?;
        let records = dataset.annotations()?;

        if records.is_empty() {
            return Err(DhsdError::EmptyDataset);
        }

        let defaults = config.split.unwrap_or_default();
        let train_fraction = self
            .train_fraction
            .or(defaults.train_fraction)
            .unwrap_or(DEFAULT_TRAIN_FRACTION);
        let seed = self.seed.or(defaults.seed).unwrap_or(DEFAULT_SEED);

        if self.verbose {
            eprintln!(
                "Splitting {} records (train fraction {}, seed {}).",
                records.len(),
                train_fraction,
                seed
            );
        }

        let (train, test) =
            stratified_split(&records, train_fraction, seed)?;

        let out_dir = match self.output {
            Some(dir) => dir,
            None => dataset.base_dir().clone(),
        };

        let train_path = out_dir.join(Dataset::TRAIN);
        let test_path = out_dir.join(Dataset::TEST);

        // Stage both files, then rename; a failed run must not leave
        // one fresh and one stale output behind.
        let train_tmp = train_path.with_extension("csv.tmp");
        let test_tmp = test_path.with_extension("csv.tmp");

        write_annotations(&train_tmp, &train)?;
        if let Err(e) = write_annotations(&test_tmp, &test) {
            let _ = fs::remove_file(&train_tmp);
            return Err(e);
        }

        fs::rename(&train_tmp, &train_path)?;
        fs::rename(&test_tmp, &test_path)?;

        if !self.quiet {
            let total = records.len() as f64;
            eprintln!(
                "train: {} records ({:.1}%)",
                train.len(),
                100.0 * train.len() as f64 / total
            );
            eprintln!(
                "test: {} records ({:.1}%)",
                test.len(),
                100.0 * test.len() as f64 / total
            );
        }

        Ok(())
    }
}
