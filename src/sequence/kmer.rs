use proptest::strategy::{BoxedStrategy, Strategy};
use tracing::debug;

use crate::{ConfigError, Generator, Result};

/// Checks `1 <= k <= len`
fn validate(k: usize, len: usize) -> Result<()> {
    if k == 0 {
        return ConfigError::ZeroKmerLength.reject();
    }
    if k > len {
        return ConfigError::KmerTooLong { k, len }.reject();
    }
    Ok(())
}

/// Every length-`k` window of a sequence, in order of their start position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerSet {
    symbols: Vec<char>,
    k: usize,
}
impl KmerSet {
    pub fn new(seq: &str, k: usize) -> Result<Self> {
        let symbols: Vec<char> = seq.chars().collect();
        validate(k, symbols.len())?;
        Ok(Self { symbols, k })
    }

    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of windows, `len - k + 1`
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len() - self.k + 1
    }

    /// Always false: a valid set holds at least one window
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The k-mer starting at `start`
    #[must_use]
    pub fn get(&self, start: usize) -> Option<String> {
        self.symbols
            .get(start..start + self.k)
            .map(|window| window.iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        self.symbols.windows(self.k).map(|window| window.iter().collect())
    }
}

/// Draws one k-mer of a fixed sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerConfig {
    pub seq: String,
    pub k: usize,
}
impl KmerConfig {
    #[must_use]
    pub fn new<S: Into<String>>(seq: S, k: usize) -> Self {
        Self { seq: seq.into(), k }
    }
}
impl Generator for KmerConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let set = KmerSet::new(&self.seq, self.k)?;
        debug!(k = self.k, windows = set.len(), "Building k-mer strategy");
        // shrinks towards the first window
        Ok((0..set.len())
            .prop_map(move |start| set.get(start).unwrap_or_default())
            .boxed())
    }
}

/// Generates k-mers (sliding window substrings) of `seq`
///
/// The start offset is uniform over `0..=len(seq) - k`.
pub fn kmers(seq: &str, k: usize) -> Result<BoxedStrategy<String>> {
    KmerConfig::new(seq, k).strategy()
}

#[cfg(test)]
mod testing {
    use proptest::prelude::*;

    use super::*;
    use crate::{test_utils::minimal, Error};

    #[test]
    fn test_smallest_examples() -> Result<()> {
        assert_eq!(minimal(&kmers("A", 1)?, |_| true), "A");
        assert_eq!(minimal(&kmers("ACGT", 1)?, |_| true), "A");
        assert_eq!(minimal(&kmers("ACGTACGT", 4)?, |_| true), "ACGT");
        Ok(())
    }

    #[test]
    fn test_k_too_long() {
        let err = kmers("A", 5).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigError(ConfigError::KmerTooLong { k: 5, len: 1 })
        ));
    }

    #[test]
    fn test_zero_k() {
        assert!(matches!(
            kmers("ACGT", 0).unwrap_err(),
            Error::ConfigError(ConfigError::ZeroKmerLength)
        ));
        assert!(KmerSet::new("", 0).is_err());
    }

    #[test]
    fn test_kmer_set() -> Result<()> {
        let set = KmerSet::new("ACGTA", 3)?;
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["ACG", "CGT", "GTA"]);
        assert_eq!(set.get(2).as_deref(), Some("GTA"));
        assert_eq!(set.get(3), None);

        let whole = KmerSet::new("ACGT", 4)?;
        assert_eq!(whole.iter().collect::<Vec<_>>(), vec!["ACGT"]);
        Ok(())
    }

    #[test]
    fn test_every_window_reachable() -> Result<()> {
        let drawn = crate::generator::sample_many(&kmers("AACCGGTT", 2)?, 256)?;
        for window in KmerSet::new("AACCGGTT", 2)?.iter() {
            assert!(drawn.contains(&window));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn kmer_is_contiguous_substring(
            (seq, k, seed) in "[ACGT]{1,40}".prop_flat_map(|seq| {
                let len = seq.len();
                (Just(seq), 1..=len, any::<u64>())
            })
        ) {
            let mut rng = <rand::rngs::SmallRng as rand::SeedableRng>::seed_from_u64(seed);
            let kmer = KmerConfig::new(seq.clone(), k).sample(&mut rng).unwrap();
            prop_assert_eq!(kmer.len(), k);
            prop_assert!(seq.contains(&kmer));
        }
    }
}
