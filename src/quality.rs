//! Quality module for the bioprop library
//!
//! PHRED quality strings as written on the fourth line of a FASTQ record. Each score
//! is stored as the ASCII character `score + offset`.
//!
//! The default encoding is Sanger (`fastq-sanger`). For Illumina 1.3+ use an offset of
//! 64 with a maximum score of 62, and for Solexa additionally a minimum score of -5.
//! See [`PhredEncoding`] for these presets.

use std::fmt;

use proptest::collection::vec;
use proptest::strategy::{BoxedStrategy, Strategy};
use tracing::debug;

use crate::{generator::SizeRange, ConfigError, Generator, Result, MAX_ASCII};

/// Common PHRED encodings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhredEncoding {
    /// Offset 33, scores 0..=93
    #[default]
    Sanger,
    /// Offset 64, scores 0..=62
    Illumina13,
    /// Offset 64, scores -5..=62
    Solexa,
}
impl PhredEncoding {
    #[must_use]
    pub fn offset(self) -> i32 {
        match self {
            Self::Sanger => 33,
            Self::Illumina13 | Self::Solexa => 64,
        }
    }

    #[must_use]
    pub fn min_score(self) -> i32 {
        match self {
            Self::Sanger | Self::Illumina13 => 0,
            Self::Solexa => -5,
        }
    }

    #[must_use]
    pub fn max_score(self) -> i32 {
        match self {
            Self::Sanger => 93,
            Self::Illumina13 | Self::Solexa => 62,
        }
    }
}

/// A string of encoded PHRED scores
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualityString(String);
impl QualityString {
    /// Encodes raw scores with the given offset
    ///
    /// Scores whose encoding falls outside `0..=MAX_ASCII` are clamped.
    #[must_use]
    pub fn from_scores(scores: &[i32], offset: i32) -> Self {
        Self(
            scores
                .iter()
                .map(|&score| char::from(score.saturating_add(offset).clamp(0, i32::from(MAX_ASCII)) as u8))
                .collect(),
        )
    }

    /// Decodes the scores using the given offset
    #[must_use]
    pub fn scores(&self, offset: i32) -> Vec<i32> {
        self.0.bytes().map(|b| i32::from(b) - offset).collect()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}
impl fmt::Display for QualityString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl From<QualityString> for String {
    fn from(quality: QualityString) -> Self {
        quality.0
    }
}

/// Options for FASTQ quality strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityConfig {
    /// Bounds on the number of scores
    pub size: SizeRange,
    /// Lowest PHRED score to use
    pub min_score: i32,
    /// Highest PHRED score to use
    pub max_score: i32,
    /// ASCII encoding offset
    pub offset: i32,
}
impl Default for QualityConfig {
    fn default() -> Self {
        Self::from_encoding(PhredEncoding::default())
    }
}
impl QualityConfig {
    /// Options covering the full score range of an encoding
    #[must_use]
    pub fn from_encoding(encoding: PhredEncoding) -> Self {
        Self {
            size: SizeRange::new(1, None),
            min_score: encoding.min_score(),
            max_score: encoding.max_score(),
            offset: encoding.offset(),
        }
    }

    /// Sets an exact length
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = SizeRange::exact(size);
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

    #[must_use]
    pub fn min_score(mut self, min_score: i32) -> Self {
        self.min_score = min_score;
        self
    }

    #[must_use]
    pub fn max_score(mut self, max_score: i32) -> Self {
        self.max_score = max_score;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Checks the score range and that its encoding stays within `floor..=MAX_ASCII`
    pub(crate) fn validate_scores(&self, floor: i32) -> Result<()> {
        if self.min_score > self.max_score {
            return ConfigError::InvalidScoreRange {
                min: self.min_score,
                max: self.max_score,
            }
            .reject();
        }
        // exact in i64 for any pair of i32 inputs
        let max_codepoint = i64::from(self.offset) + i64::from(self.max_score);
        if max_codepoint > i64::from(MAX_ASCII) {
            return ConfigError::QualityAboveAscii(max_codepoint, i64::from(MAX_ASCII)).reject();
        }
        let min_codepoint = i64::from(self.offset) + i64::from(self.min_score);
        if min_codepoint < i64::from(floor) {
            return ConfigError::QualityBelowMinimum(min_codepoint, i64::from(floor)).reject();
        }
        Ok(())
    }

    /// Quality strings of exactly `len` characters, assuming validated scores
    pub(crate) fn exact(&self, len: usize) -> BoxedStrategy<QualityString> {
        let offset = self.offset;
        vec(self.min_score..=self.max_score, len)
            .prop_map(move |scores| QualityString::from_scores(&scores, offset))
            .boxed()
    }
}
impl Generator for QualityConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        self.validate_scores(0)?;
        let range = self.size.to_range()?;
        debug!(
            min = range.start(),
            max = range.end(),
            min_score = self.min_score,
            max_score = self.max_score,
            offset = self.offset,
            "Building quality strategy"
        );
        let offset = self.offset;
        Ok(vec(self.min_score..=self.max_score, range)
            .prop_map(move |scores| QualityString::from_scores(&scores, offset).into_inner())
            .boxed())
    }
}

/// Generates the quality string of a FASTQ record
pub fn fastq_quality(config: QualityConfig) -> Result<BoxedStrategy<String>> {
    config.strategy()
}

#[cfg(test)]
mod testing {
    use proptest::prelude::*;

    use super::*;
    use crate::{test_utils::minimal, Error};

    #[test]
    fn test_smallest_example() -> Result<()> {
        assert_eq!(minimal(&fastq_quality(QualityConfig::default())?, |_| true), "!");
        assert_eq!(
            minimal(&fastq_quality(QualityConfig::default().min_size(0))?, |_| true),
            ""
        );
        Ok(())
    }

    #[test]
    fn test_default_is_sanger() {
        let config = QualityConfig::default();
        assert_eq!((config.offset, config.min_score, config.max_score), (33, 0, 93));
        assert_eq!(config.size.min, 1);
        let illumina = QualityConfig::from_encoding(PhredEncoding::Illumina13);
        assert_eq!((illumina.offset, illumina.min_score, illumina.max_score), (64, 0, 62));
    }

    #[test]
    fn test_single_score() -> Result<()> {
        let config = QualityConfig::default().size(3).min_score(5).max_score(5);
        assert_eq!(minimal(&fastq_quality(config)?, |_| true), "&&&");
        assert_eq!(minimal(&fastq_quality(config.offset(64))?, |_| true), "EEE");
        Ok(())
    }

    #[test]
    fn test_inverted_scores() {
        let config = QualityConfig::default().min_score(10).max_score(9);
        assert!(matches!(
            fastq_quality(config).unwrap_err(),
            Error::ConfigError(ConfigError::InvalidScoreRange { min: 10, max: 9 })
        ));
    }

    #[test]
    fn test_above_ascii() {
        let config = QualityConfig::default().min_score(100).max_score(101);
        assert!(matches!(
            fastq_quality(config).unwrap_err(),
            Error::ConfigError(ConfigError::QualityAboveAscii(134, 126))
        ));
    }

    #[test]
    fn test_below_zero() {
        let config = QualityConfig::default().offset(0).min_score(-5);
        assert!(matches!(
            fastq_quality(config).unwrap_err(),
            Error::ConfigError(ConfigError::QualityBelowMinimum(-5, 0))
        ));
    }

    #[test]
    fn test_extreme_offsets() {
        let config = QualityConfig::default().offset(i32::MAX).min_score(1).max_score(1);
        assert!(matches!(
            fastq_quality(config).unwrap_err(),
            Error::ConfigError(ConfigError::QualityAboveAscii(2_147_483_648, 126))
        ));
        let config = QualityConfig::default().offset(i32::MIN).min_score(-1).max_score(0);
        assert!(matches!(
            fastq_quality(config).unwrap_err(),
            Error::ConfigError(ConfigError::QualityBelowMinimum(-2_147_483_649, 0))
        ));
        assert_eq!(QualityString::from_scores(&[i32::MAX], 33).as_str(), "~");
    }

    #[test]
    fn test_encodings_are_valid() -> Result<()> {
        for encoding in [PhredEncoding::Sanger, PhredEncoding::Illumina13, PhredEncoding::Solexa] {
            let config = QualityConfig::from_encoding(encoding);
            config.strategy()?;
            assert_eq!(config.offset + config.max_score, 126);
        }
        Ok(())
    }

    #[test]
    fn test_quality_string_scores() {
        let quality = QualityString::from_scores(&[0, 40, 93], 33);
        assert_eq!(quality.as_str(), "!I~");
        assert_eq!(quality.scores(33), vec![0, 40, 93]);
        assert_eq!(quality.len(), 3);
    }

    proptest! {
        #[test]
        fn sanger_quality_in_range(
            quality in fastq_quality(QualityConfig::default().size(4).min_score(0).max_score(40).offset(33)).unwrap()
        ) {
            prop_assert_eq!(quality.len(), 4);
            prop_assert!(quality.bytes().all(|b| (33..=73).contains(&b)));
        }

        #[test]
        fn scores_decode_into_range(
            (min, max, offset) in (-5i32..=40, 0i32..=40, 5i32..=64),
            size in 0usize..50,
        ) {
            let config = QualityConfig::default()
                .size(size)
                .min_score(min.min(max))
                .max_score(min.max(max))
                .offset(offset);
            let quality = crate::generator::sample_many(&fastq_quality(config).unwrap(), 1).unwrap().remove(0);
            prop_assert_eq!(quality.len(), size);
            for score in QualityString(quality).scores(offset) {
                prop_assert!((min.min(max)..=min.max(max)).contains(&score));
            }
        }
    }
}
