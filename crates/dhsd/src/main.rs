use std::io::ErrorKind;
use std::process;

use clap::Parser;
use cli::{Args, Command};
use dataset::Dataset;
use error::{DhsdError, DhsdResult};
use rayon::ThreadPoolBuilder;

pub(crate) mod prelude {
    pub(crate) use crate::config::Config;
    pub(crate) use crate::dataset::Dataset;
    pub(crate) use crate::error::{bail, DhsdError, DhsdResult};
    pub(crate) use crate::progress::ProgressBarBuilder;
}

mod annotations;
mod cli;
mod commands;
mod config;
mod dataset;
mod error;
mod progress;
mod split;
mod summary;
mod utils;

fn num_threads(args: &Args) -> usize {
    if let Some(num_threads) = args.num_jobs {
        return num_threads;
    }

    if let Ok(config) = Dataset::discover().and_then(|ds| ds.config())
    {
        if let Some(runtime) = config.runtime {
            if let Some(num_threads) = runtime.num_jobs {
                return num_threads;
            }
        }
    }

    0
}

fn run(args: Args) -> DhsdResult<()> {
    match args.cmd {
        Command::Completions(cmd) => cmd.execute(),
        Command::Init(cmd) => cmd.execute(),
        Command::Split(cmd) => cmd.execute(),
        Command::Summary(cmd) => cmd.execute(),
        Command::Verify(cmd) => cmd.execute(),
    }
}

fn main() {
    let args = Args::parse();

    ThreadPoolBuilder::new()
        .num_threads(num_threads(&args))
        .build_global()
        .unwrap();

    match run(args) {
        Ok(()) => process::exit(0),
        Err(DhsdError::IO(e))
            if e.kind() == ErrorKind::BrokenPipe =>
        {
            process::exit(0)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}
