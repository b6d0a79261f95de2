use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::annotations::AnnotationRecord;
use crate::error::{DhsdError, DhsdResult};

/// Splitmix64 generator.
///
/// The shuffle sequence depends only on the seed, so a split computed
/// today reproduces byte-for-byte on any later run.
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len]
                .copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Derives the shuffle seed of a writer group, so each group shuffles
/// independently of the order in which groups are processed.
#[inline]
fn group_seed(seed: u64, writer_id: u32) -> u64 {
    seed ^ (writer_id as u64).wrapping_mul(0x9E3779B97F4A7C15)
}

/// Number of records a writer group of size `n` contributes to train.
///
/// Round-half-up on `train_fraction * n`, clamped so that a group of
/// two or more records lands in both partitions; a single record goes
/// entirely to train.
fn train_size(n: usize, train_fraction: f64) -> usize {
    if n <= 1 {
        return n;
    }

    let take = (train_fraction * n as f64 + 0.5).floor() as usize;
    take.clamp(1, n - 1)
}

/// Partitions `records` into disjoint train and test sequences.
///
/// Records are grouped by `writer_id`; each group is shuffled with a
/// generator seeded from `seed` and the writer id and then cut at
/// [train_size], so every writer with at least two records is
/// represented in both partitions at roughly `train_fraction`.
pub(crate) fn stratified_split(
    records: &[AnnotationRecord],
    train_fraction: f64,
    seed: u64,
) -> DhsdResult<(Vec<AnnotationRecord>, Vec<AnnotationRecord>)> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(DhsdError::InvalidFraction(train_fraction));
    }

    let mut groups: BTreeMap<u32, Vec<&AnnotationRecord>> =
        BTreeMap::new();

    for record in records {
        groups.entry(record.writer_id).or_default().push(record);
    }

    let mut train = Vec::new();
    let mut test = Vec::new();

    for (writer_id, mut group) in groups {
        let mut rng =
            DeterministicRng::new(group_seed(seed, writer_id));
        group.shuffle(&mut rng);

        let take = train_size(group.len(), train_fraction);
        for (idx, record) in group.into_iter().enumerate() {
            if idx < take {
                train.push(record.clone());
            } else {
                test.push(record.clone());
            }
        }
    }

    Ok((train, test))
}
