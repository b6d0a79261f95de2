use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::annotations::AnnotationRecord;
use crate::error::{DhsdError, DhsdResult};

/// Characters every complete annotation table is expected to cover.
pub(crate) const REQUIRED_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzäöüßABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Aggregate statistics over an annotation table.
///
/// Character-level figures (lengths, alphabet, frequencies) are
/// computed on NFC-normalized transcriptions; the distinct-word count
/// compares the raw transcriptions case-sensitively.
#[derive(Debug)]
pub(crate) struct DatasetSummary {
    /// Total number of annotated images.
    pub(crate) total_images: usize,

    /// Number of distinct writers.
    pub(crate) total_writers: usize,

    /// Number of distinct transcriptions.
    pub(crate) unique_words: usize,

    /// Per-writer sample counts, ordered by writer id.
    pub(crate) writer_counts: BTreeMap<u32, usize>,

    pub(crate) min_samples_per_writer: usize,
    pub(crate) max_samples_per_writer: usize,
    pub(crate) avg_samples_per_writer: f64,

    pub(crate) min_word_length: usize,
    pub(crate) max_word_length: usize,
    pub(crate) avg_word_length: f64,

    /// All characters observed across the transcriptions.
    pub(crate) alphabet: BTreeSet<char>,

    /// Per-character occurrence counts.
    pub(crate) char_freq: BTreeMap<char, u64>,
}

impl DatasetSummary {
    /// Computes the summary of a non-empty sequence of records.
    pub(crate) fn from_records(
        records: &[AnnotationRecord],
    ) -> DhsdResult<Self> {
        if records.is_empty() {
            return Err(DhsdError::EmptyDataset);
        }

        let mut writer_counts: BTreeMap<u32, usize> = BTreeMap::new();
        let mut words: HashSet<&str> = HashSet::new();
        let mut alphabet: BTreeSet<char> = BTreeSet::new();
        let mut char_freq: BTreeMap<char, u64> = BTreeMap::new();

        let mut min_len = usize::MAX;
        let mut max_len = 0;
        let mut total_len = 0;

        for record in records {
            *writer_counts.entry(record.writer_id).or_default() += 1;
            words.insert(record.text.as_str());

            let mut len = 0;
            for c in record.text.nfc() {
                len += 1;
                alphabet.insert(c);
                *char_freq.entry(c).or_default() += 1;
            }

            min_len = min_len.min(len);
            max_len = max_len.max(len);
            total_len += len;
        }

        let min_samples =
            writer_counts.values().min().copied().unwrap_or_default();
        let max_samples =
            writer_counts.values().max().copied().unwrap_or_default();

        Ok(Self {
            total_images: records.len(),
            total_writers: writer_counts.len(),
            unique_words: words.len(),
            min_samples_per_writer: min_samples,
            max_samples_per_writer: max_samples,
            avg_samples_per_writer: records.len() as f64
                / writer_counts.len() as f64,
            min_word_length: min_len,
            max_word_length: max_len,
            avg_word_length: total_len as f64 / records.len() as f64,
            writer_counts,
            alphabet,
            char_freq,
        })
    }

    /// Returns each required character together with its coverage flag.
    pub(crate) fn coverage(&self) -> Vec<(char, bool)> {
        REQUIRED_ALPHABET
            .chars()
            .map(|c| (c, self.alphabet.contains(&c)))
            .collect()
    }

    /// Returns the required characters missing from the transcriptions.
    pub(crate) fn missing_chars(&self) -> Vec<char> {
        self.coverage()
            .into_iter()
            .filter_map(|(c, covered)| (!covered).then_some(c))
            .collect()
    }

    /// Returns the `n` most frequent characters, ties broken by
    /// codepoint.
    pub(crate) fn top_chars(&self, n: usize) -> Vec<(char, u64)> {
        let mut freqs: Vec<(char, u64)> =
            self.char_freq.iter().map(|(c, n)| (*c, *n)).collect();
        freqs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        freqs.truncate(n);
        freqs
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    type TestResult = anyhow::Result<()>;

    fn record(
        file_name: &str,
        text: &str,
        writer_id: u32,
    ) -> AnnotationRecord {
        AnnotationRecord {
            file_name: file_name.into(),
            text: text.into(),
            writer_id,
        }
    }

    fn fixture() -> Vec<AnnotationRecord> {
        vec![
            record("german_hw_data/0001.png", "Bahnhofstraße", 1),
            record("german_hw_data/0002.png", "Ring", 1),
            record("german_hw_data/0003.png", "Gasse", 1),
            record("german_hw_data/0004.png", "Müller-Weg", 2),
            record("german_hw_data/0005.png", "Allee", 2),
            record("german_hw_data/0006.png", "Übergang", 3),
            record("german_hw_data/0007.png", "Platz", 3),
            record("german_hw_data/0008.png", "Damm", 3),
            record("german_hw_data/0009.png", "Weg", 3),
            record("german_hw_data/0010.png", "Hof", 5),
        ]
    }

    #[test]
    fn summary_counts() -> TestResult {
        let summary = DatasetSummary::from_records(&fixture())?;

        assert_eq!(summary.total_images, 10);
        assert_eq!(summary.total_writers, 4);
        assert_eq!(summary.unique_words, 10);

        assert_eq!(summary.min_samples_per_writer, 1);
        assert_eq!(summary.max_samples_per_writer, 4);
        assert_relative_eq!(summary.avg_samples_per_writer, 2.5);

        assert_eq!(summary.min_word_length, 3);
        assert_eq!(summary.max_word_length, 13);
        assert_relative_eq!(summary.avg_word_length, 6.0);

        assert_eq!(
            summary.writer_counts,
            BTreeMap::from([(1, 3), (2, 2), (3, 4), (5, 1)])
        );

        Ok(())
    }

    #[test]
    fn summary_alphabet_coverage() -> TestResult {
        let summary = DatasetSummary::from_records(&fixture())?;

        assert!(summary.alphabet.contains(&'ß'));
        assert!(summary.alphabet.contains(&'ü'));

        let coverage: BTreeMap<char, bool> =
            summary.coverage().into_iter().collect();
        assert_eq!(coverage.get(&'ß'), Some(&true));
        assert_eq!(coverage.get(&'ü'), Some(&true));
        // No transcription contains an 'ä' or a 'q'.
        assert_eq!(coverage.get(&'ä'), Some(&false));
        assert_eq!(coverage.get(&'q'), Some(&false));

        assert!(summary.missing_chars().contains(&'ä'));
        assert!(!summary.missing_chars().contains(&'ß'));

        Ok(())
    }

    #[test]
    fn summary_missing_eszett() -> TestResult {
        let records = vec![
            record("german_hw_data/0001.png", "Müller", 1),
            record("german_hw_data/0002.png", "Gasse", 2),
        ];

        let summary = DatasetSummary::from_records(&records)?;
        assert!(summary.missing_chars().contains(&'ß'));
        assert!(!summary.missing_chars().contains(&'ü'));

        Ok(())
    }

    #[test]
    fn summary_top_chars() -> TestResult {
        let records = vec![
            record("german_hw_data/0001.png", "aab", 1),
            record("german_hw_data/0002.png", "ab", 2),
        ];

        let summary = DatasetSummary::from_records(&records)?;
        assert_eq!(summary.top_chars(2), vec![('a', 3), ('b', 2)]);

        Ok(())
    }

    #[test]
    fn summary_empty_dataset() {
        let err = DatasetSummary::from_records(&[]).unwrap_err();
        assert!(matches!(err, DhsdError::EmptyDataset));
    }
}
