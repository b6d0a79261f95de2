use clap::Parser;
use glob::glob_with;
use hashbrown::HashSet;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::prelude::*;
use crate::utils::relpath;

const PBAR_VERIFY: &str =
    "Verifying images: {human_pos} ({percent}%) | \
        elapsed: {elapsed_precise}{msg}";

/// Verify that the image inventory matches the annotation table.
#[derive(Debug, Default, Parser)]
pub(crate) struct Verify {
    /// Run verbosely. Print additional progress information to the
    /// standard error stream. This option conflicts with the
    /// `--quiet` option.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Operate quietly; do not show progress. This option conflicts
    /// with the `--verbose` option.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Verify {
    pub(crate) fn execute(self) -> DhsdResult<()> {
        let dataset = Dataset::discover()?;
        let base_dir = dataset.base_dir();
        let records = dataset.annotations()?;

        let pbar = ProgressBarBuilder::new(PBAR_VERIFY, self.quiet)
            .len(records.len() as u64)
            .build();

        records
            .par_iter()
            .progress_with(pbar)
            .try_for_each(|record| -> DhsdResult<()> {
                if !base_dir.join(&record.file_name).is_file() {
                    bail!(
                        "verification failed: image not found \
                            (file_name = {:?})",
                        record.file_name
                    );
                }

                Ok(())
            })?;

        let referenced: HashSet<&str> =
            records.iter().map(|r| r.file_name.as_str()).collect();

        let pattern =
            format!("{}/**/*.png", dataset.image_dir().display());

        let mut untracked: Vec<String> =
            glob_with(&pattern, Default::default())
                .map_err(|e| DhsdError::Other(e.to_string()))?
                .filter_map(Result::ok)
                .map(|path| relpath(path, base_dir))
                .filter(|path| !referenced.contains(path.as_str()))
                .collect();
        untracked.sort();

        for path in &untracked {
            eprintln!("warning: untracked image '{path}'");
        }

        if self.verbose {
            eprintln!("OK, verified {} images.", records.len());
        }

        Ok(())
    }
}
