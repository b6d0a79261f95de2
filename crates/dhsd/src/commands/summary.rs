use clap::Parser;
use comfy_table::{presets, Row, Table};

use crate::prelude::*;
use crate::summary::DatasetSummary;

/// Prints a summary of the annotation table.
#[derive(Debug, Default, Parser)]
pub(crate) struct Summary {
    /// Run verbosely. Print additional progress information to the
    /// standard error stream. This option conflicts with the
    /// `--quiet` option.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Operate quietly; do not show progress. This option conflicts
    /// with the `--verbose` option.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Number of entries shown in the character frequency ranking.
    #[arg(long, value_name = "n", default_value = "20")]
    top_chars: usize,
}

impl Summary {
    pub(crate) fn execute(self) -> DhsdResult<()> {
        let dataset = Dataset::discover()?;
        let records = dataset.annotations()?;
        let summary = DatasetSummary::from_records(&records)?;

        if self.verbose {
            let config = dataset.config()?;
            eprintln!(
                "dataset '{}', version {}.\n",
                config.metadata.name, config.metadata.version
            );
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_header(Row::from(vec!["metric", "value"]));
        table.add_row([
            "images".to_string(),
            summary.total_images.to_string(),
        ]);
        table.add_row([
            "writers".to_string(),
            summary.total_writers.to_string(),
        ]);
        table.add_row([
            "unique words".to_string(),
            summary.unique_words.to_string(),
        ]);
        table.add_row([
            "samples/writer (min)".to_string(),
            summary.min_samples_per_writer.to_string(),
        ]);
        table.add_row([
            "samples/writer (max)".to_string(),
            summary.max_samples_per_writer.to_string(),
        ]);
        table.add_row([
            "samples/writer (avg)".to_string(),
            format!("{:.1}", summary.avg_samples_per_writer),
        ]);
        table.add_row([
            "word length (min)".to_string(),
            summary.min_word_length.to_string(),
        ]);
        table.add_row([
            "word length (max)".to_string(),
            summary.max_word_length.to_string(),
        ]);
        table.add_row([
            "word length (avg)".to_string(),
            format!("{:.1}", summary.avg_word_length),
        ]);
        println!("{table}");

        let mut writers = Table::new();
        writers.load_preset(presets::UTF8_FULL_CONDENSED);
        writers.set_header(Row::from(vec!["writer", "samples"]));
        for (writer_id, count) in &summary.writer_counts {
            writers.add_row([
                writer_id.to_string(),
                count.to_string(),
            ]);
        }
        println!("{writers}");

        let mut chars = Table::new();
        chars.load_preset(presets::UTF8_FULL_CONDENSED);
        chars.set_header(Row::from(vec!["char", "count"]));
        for (c, count) in summary.top_chars(self.top_chars) {
            let display = if c.is_whitespace() {
                format!("{c:?}")
            } else {
                c.to_string()
            };
            chars.add_row([display, count.to_string()]);
        }
        println!("{chars}");

        let missing = summary.missing_chars();
        if missing.is_empty() {
            println!("All required characters are covered.");
        } else {
            let missing: Vec<String> =
                missing.iter().map(char::to_string).collect();
            println!("Missing characters: {}", missing.join(" "));
        }

        Ok(())
    }
}
