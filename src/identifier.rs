//! Identifier module for the bioprop library
//!
//! Strategies for the identifiers that open FASTA and FASTQ records. Plain sequence
//! identifiers are single tokens of printable ASCII. The instrument-style headers
//! (Illumina, Nanopore) contain spaces and therefore describe a whole header line:
//! the identifier followed by a comment.

use chrono::DateTime;
use proptest::arbitrary::any;
use proptest::sample::select;
use proptest::strategy::{BoxedStrategy, Strategy};
use proptest::string::string_regex;
use tracing::debug;

use crate::{alphabet::Alphabet, generator::SizeRange, sequence::text, Generator, Result};

/// Smallest code point of an identifier symbol (`!`)
pub const MIN_IDENTIFIER_ASCII: u8 = b'!';

/// Characters that open FASTA (`>`) and FASTQ (`@`) records
pub const DEFAULT_BLACKLIST: &[char] = &['>', '@'];

/// Default upper bound on the identifier length
pub const DEFAULT_IDENTIFIER_MAX_SIZE: usize = 100;

/// Latest `start_time` of a Nanopore header: 2099-12-31T23:59:59Z
const MAX_TIMESTAMP: i64 = 4_102_444_799;

/// Options for plain sequence identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierConfig {
    /// Characters that may not appear in the identifier
    pub blacklist_characters: Vec<char>,
    /// Bounds on the identifier length
    pub size: SizeRange,
}
impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            blacklist_characters: DEFAULT_BLACKLIST.to_vec(),
            size: SizeRange::new(0, Some(DEFAULT_IDENTIFIER_MAX_SIZE)),
        }
    }
}
impl IdentifierConfig {
    #[must_use]
    pub fn blacklist_characters<I: IntoIterator<Item = char>>(mut self, blacklist: I) -> Self {
        self.blacklist_characters = blacklist.into_iter().collect();
        self
    }

    #[must_use]
    pub fn min_size(mut self, min_size: usize) -> Self {
        self.size.min = min_size;
        self
    }

    #[must_use]
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.size.max = Some(max_size);
        self
    }

    /// Printable, non-whitespace ASCII minus the blacklist
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::printable(
            "sequence_id",
            MIN_IDENTIFIER_ASCII,
            crate::MAX_ASCII,
            &self.blacklist_characters,
        )
    }

    /// Number of distinct identifiers these options can produce, counted up to `limit`
    pub fn distinct_count(&self, limit: usize) -> Result<usize> {
        let symbols = self.alphabet()?.len();
        let mut total = 0usize;
        for len in self.size.to_range()? {
            let count = u32::try_from(len)
                .ok()
                .and_then(|len| symbols.checked_pow(len))
                .unwrap_or(usize::MAX);
            total = total.saturating_add(count);
            if total >= limit {
                return Ok(limit);
            }
        }
        Ok(total)
    }
}
impl Generator for IdentifierConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let alphabet = self.alphabet()?;
        let range = self.size.to_range()?;
        debug!(
            symbols = alphabet.len(),
            min = range.start(),
            max = range.end(),
            "Building sequence identifier strategy"
        );
        Ok(text(&alphabet, range))
    }
}

/// Generates a sequence identifier
pub fn sequence_id(config: &IdentifierConfig) -> Result<BoxedStrategy<String>> {
    config.strategy()
}

/// Illumina (CASAVA 1.8) read header
///
/// `instrument:run:flowcell:lane:tile:x:y:umi read:filtered:control:index`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IlluminaId;
impl Generator for IlluminaId {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let instrument = string_regex("[a-zA-Z0-9_]+")?;
        let flowcell = string_regex("[a-zA-Z0-9]+")?;
        let umi = string_regex(r"[ACGTN]+\+[ACGTN]+")?;
        let index = string_regex("[ACGTN]+")?;
        let location = (any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>());
        let read = (
            select(vec!['1', '2']),
            select(vec!['Y', 'N']),
            // control numbers are 0 or even
            (0..=u32::MAX / 2).prop_map(|n| n * 2),
        );
        debug!("Building Illumina identifier strategy");

        Ok((instrument, flowcell, location, umi, read, index)
            .prop_map(
                |(instrument, flowcell, (run, lane, tile, x, y), umi, (read, filtered, control), index)| {
                    format!(
                        "{instrument}:{run}:{flowcell}:{lane}:{tile}:{x}:{y}:{umi} \
                         {read}:{filtered}:{control}:{index}"
                    )
                },
            )
            .boxed())
    }
}

/// Generates an Illumina-style read header
pub fn illumina_id() -> Result<BoxedStrategy<String>> {
    IlluminaId.strategy()
}

/// Nanopore read header as written by Guppy
///
/// `read_id runid=<run> sampleid=<sample> read=<n> ch=<channel> start_time=<timestamp>`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NanoporeId;
impl Generator for NanoporeId {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let read_id = string_regex(
            "[a-zA-Z0-9]{8}-[a-zA-Z0-9]{4}-[a-zA-Z0-9]{4}-[a-zA-Z0-9]{4}-[a-zA-Z0-9]{12}",
        )?;
        let run_id = string_regex("[a-zA-Z0-9]{40}")?;
        let sample_id = string_regex("[!-~]+")?;
        let start_time = (0..=MAX_TIMESTAMP).prop_map(|secs| {
            DateTime::from_timestamp(secs, 0)
                .map(|time| time.format("%Y-%m-%dT%H:%M:%SZ").to_string())
                .unwrap_or_default()
        });
        debug!("Building Nanopore identifier strategy");

        Ok((read_id, run_id, sample_id, any::<u32>(), any::<u32>(), start_time)
            .prop_map(|(read_id, run_id, sample_id, read, channel, start_time)| {
                format!(
                    "{read_id} runid={run_id} sampleid={sample_id} read={read} \
                     ch={channel} start_time={start_time}"
                )
            })
            .boxed())
    }
}

/// Generates a Nanopore-style read header
pub fn nanopore_id() -> Result<BoxedStrategy<String>> {
    NanoporeId.strategy()
}

#[cfg(test)]
mod testing {
    use proptest::prelude::*;

    use super::*;
    use crate::{ConfigError, Error};

    #[test]
    fn test_blacklist_everything() {
        let everything: Vec<char> = ('!'..='~').collect();
        let config = IdentifierConfig::default().blacklist_characters(everything);
        assert!(matches!(
            sequence_id(&config).unwrap_err(),
            Error::ConfigError(ConfigError::EmptyAlphabet(_))
        ));
    }

    #[test]
    fn test_default_max_size() -> Result<()> {
        let config = IdentifierConfig::default();
        assert_eq!(config.size.to_range()?, 0..=DEFAULT_IDENTIFIER_MAX_SIZE);
        for id in config.sample_seeded(64)? {
            assert!(id.len() <= DEFAULT_IDENTIFIER_MAX_SIZE);
        }
        Ok(())
    }

    #[test]
    fn test_distinct_count() -> Result<()> {
        let two: Vec<char> = ('!'..='~').filter(|&c| c != 'A' && c != 'B').collect();
        let config = IdentifierConfig::default().blacklist_characters(two).max_size(2);
        // "", A, B, AA, AB, BA, BB
        assert_eq!(config.distinct_count(100)?, 7);
        assert_eq!(config.distinct_count(5)?, 5);
        assert_eq!(IdentifierConfig::default().max_size(0).distinct_count(10)?, 1);
        assert_eq!(IdentifierConfig::default().distinct_count(usize::MAX)?, usize::MAX);
        Ok(())
    }

    #[test]
    fn test_illumina_layout() -> Result<()> {
        for header in IlluminaId.sample_seeded(32)? {
            let (id, comment) = header.split_once(' ').unwrap();
            assert_eq!(id.split(':').count(), 8);
            let fields: Vec<&str> = comment.split(':').collect();
            assert_eq!(fields.len(), 4);
            assert!(fields[0] == "1" || fields[0] == "2");
            assert!(fields[1] == "Y" || fields[1] == "N");
            assert_eq!(fields[2].parse::<u32>().unwrap() % 2, 0);
        }
        Ok(())
    }

    #[test]
    fn test_nanopore_layout() -> Result<()> {
        for header in NanoporeId.sample_seeded(32)? {
            let fields: Vec<&str> = header.split(' ').collect();
            assert_eq!(fields.len(), 6);
            assert_eq!(fields[0].len(), 36);
            assert!(fields[1].starts_with("runid="));
            assert_eq!(fields[1].len(), "runid=".len() + 40);
            let time = fields[5].strip_prefix("start_time=").unwrap();
            assert_eq!(time.len(), "2018-02-26T21:39:56Z".len());
            assert!(time.ends_with('Z'));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn default_identifiers_avoid_record_sentinels(
            id in sequence_id(&IdentifierConfig::default().max_size(20)).unwrap()
        ) {
            prop_assert!(id.chars().count() <= 20);
            prop_assert!(!id.contains('>') && !id.contains('@'));
            prop_assert!(!id.chars().any(char::is_whitespace));
        }

        #[test]
        fn custom_blacklist_is_honoured(
            id in sequence_id(&IdentifierConfig::default().blacklist_characters("ACGT:|".chars()).min_size(1).max_size(8)).unwrap()
        ) {
            prop_assert!((1..=8).contains(&id.len()));
            prop_assert!(!id.chars().any(|c| "ACGT:|".contains(c)));
        }
    }
}
