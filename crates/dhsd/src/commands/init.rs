use std::ffi::OsStr;
use std::path::PathBuf;
use std::{env, fs};

use clap::Parser;
use semver::Version;

use crate::prelude::*;

const GITIGNORE: &str = "# dhsd\n/train.csv\n/test.csv\n";

/// Initialize a new or re-initialize an existing dataset directory.
#[derive(Debug, Parser)]
pub(crate) struct Init {
    /// The name of the dataset.
    #[arg(short, long)]
    name: Option<String>,

    /// The version of the dataset.
    #[arg(long, default_value = "0.1.0")]
    version: Version,

    /// A short blurb about the dataset.
    #[arg(short, long)]
    description: Option<String>,

    /// A list of people or organizations, which are considered as the
    /// authors of the dataset.
    #[arg(short, long = "author")]
    authors: Vec<String>,

    /// Whether to overwrite config with default values or not.
    #[arg(short, long)]
    force: bool,

    /// Run verbosely. Print additional progress information to the
    /// standard error stream. This option conflicts with the
    /// `--quiet` option.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Operate quietly; do not show progress. This option conflicts
    /// with the `--verbose` option.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// The location of the dataset.
    #[arg(default_value = ".")]
    path: PathBuf,
}

impl Init {
    pub(crate) fn execute(self) -> DhsdResult<()> {
        let root_dir = env::current_dir()?.join(self.path);
        let image_dir = root_dir.join(Dataset::IMAGE_DIR);
        let config = root_dir.join(Dataset::CONFIG);

        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;

            if self.verbose {
                eprintln!(
                    "Initialize new dataset in {}",
                    root_dir.display()
                );
            }
        } else if self.verbose {
            eprintln!(
                "Re-Initialize existing dataset in {}",
                root_dir.display()
            );
        }

        if !image_dir.exists() {
            fs::create_dir_all(&image_dir)?;
        }

        if !root_dir.join(".gitignore").is_file() {
            fs::write(root_dir.join(".gitignore"), GITIGNORE)?;
        }

        if !config.exists() || self.force {
            let mut config = Config::create(config)?;
            config.metadata.description = self.description;
            config.metadata.authors = self.authors;
            config.metadata.version = self.version;
            config.metadata.name = self.name.unwrap_or(
                root_dir
                    .file_name()
                    .and_then(OsStr::to_str)
                    .unwrap_or_default()
                    .to_string(),
            );

            config.save()?;
        }

        Ok(())
    }
}
