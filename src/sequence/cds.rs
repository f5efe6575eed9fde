use proptest::collection::vec;
use proptest::sample::select;
use proptest::strategy::{BoxedStrategy, Just, Strategy};
use tracing::debug;

use super::text;
use crate::{
    alphabet::{
        is_stop_codon, Alphabet, AMBIGUOUS_START_CODONS, AMBIGUOUS_STOP_CODONS, START_CODONS,
        STOP_CODONS,
    },
    generator::SizeRange,
    ConfigError, Generator, Result,
};

const CODON: usize = 3;

/// Options for coding DNA sequences
///
/// With the codon switches left at their defaults a CDS is drawn exactly like a DNA
/// sequence. Turning on any of them makes the sequence codon structured: no gaps,
/// a length that is a multiple of three, and sizes rounded inward to whole codons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdsConfig {
    /// Whether IUPAC ambiguity codes may appear (also selects the ambiguous codon tables)
    pub allow_ambiguous: bool,
    /// Whether the gap symbol `-` may appear (ignored for codon structured sequences)
    pub allow_gaps: bool,
    /// Whether to restrict the sequence to uppercase symbols
    pub uppercase_only: bool,
    /// Whether the sequence opens with a start codon
    pub include_start_codon: bool,
    /// Whether the sequence closes with a stop codon
    pub include_stop_codon: bool,
    /// Whether stop codons may appear between the start and the final codon
    pub allow_internal_stop_codons: bool,
    /// Bounds on the number of bases
    pub size: SizeRange,
}
impl Default for CdsConfig {
    fn default() -> Self {
        Self {
            allow_ambiguous: true,
            allow_gaps: true,
            uppercase_only: false,
            include_start_codon: false,
            include_stop_codon: false,
            allow_internal_stop_codons: true,
            size: SizeRange::default(),
        }
    }
}
impl CdsConfig {
    #[must_use]
    pub fn allow_ambiguous(mut self, allow_ambiguous: bool) -> Self {
        self.allow_ambiguous = allow_ambiguous;
        self
    }

    #[must_use]
    pub fn allow_gaps(mut self, allow_gaps: bool) -> Self {
        self.allow_gaps = allow_gaps;
        self
    }

    #[must_use]
    pub fn uppercase_only(mut self, uppercase_only: bool) -> Self {
        self.uppercase_only = uppercase_only;
        self
    }

    #[must_use]
    pub fn include_start_codon(mut self, include_start_codon: bool) -> Self {
        self.include_start_codon = include_start_codon;
        self
    }

    #[must_use]
    pub fn include_stop_codon(mut self, include_stop_codon: bool) -> Self {
        self.include_stop_codon = include_stop_codon;
        self
    }

    #[must_use]
    pub fn allow_internal_stop_codons(mut self, allow_internal_stop_codons: bool) -> Self {
        self.allow_internal_stop_codons = allow_internal_stop_codons;
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

    /// Whether any codon option is active
    #[must_use]
    pub fn is_codon_structured(&self) -> bool {
        self.include_start_codon || self.include_stop_codon || !self.allow_internal_stop_codons
    }

    fn fixed_bases(&self) -> usize {
        CODON * (usize::from(self.include_start_codon) + usize::from(self.include_stop_codon))
    }

    /// Range of body codons that keeps the whole sequence within `size`
    fn body_codons(&self) -> Result<std::ops::RangeInclusive<usize>> {
        self.size.validate()?;
        let fixed = self.fixed_bases();
        let upper = self.size.upper();
        if upper < fixed {
            return ConfigError::SizeTooSmallForCodons {
                max: upper,
                needed: fixed,
            }
            .reject();
        }
        let min_codons = self.size.min.saturating_sub(fixed).div_ceil(CODON);
        let max_codons = (upper - fixed) / CODON;
        if min_codons > max_codons {
            return ConfigError::NoCodonAlignedLength {
                min: self.size.min,
                max: upper,
            }
            .reject();
        }
        Ok(min_codons..=max_codons)
    }

    fn codon_structured(&self) -> Result<BoxedStrategy<String>> {
        let body = self.body_codons()?;
        let alphabet = Alphabet::dna(self.allow_ambiguous, false, self.uppercase_only)?;
        debug!(
            symbols = alphabet.len(),
            min_codons = body.start(),
            max_codons = body.end(),
            start = self.include_start_codon,
            stop = self.include_stop_codon,
            "Building codon structured cds strategy"
        );

        let codon = if self.allow_internal_stop_codons {
            text(&alphabet, CODON..=CODON)
        } else {
            text(&alphabet, CODON..=CODON)
                .prop_filter("internal stop codon", |codon| !is_stop_codon(codon))
                .boxed()
        };
        let start = if self.include_start_codon {
            start_codon(self.allow_ambiguous)
        } else {
            Just(String::new()).boxed()
        };
        let stop = if self.include_stop_codon {
            stop_codon(self.allow_ambiguous)
        } else {
            Just(String::new()).boxed()
        };

        Ok((start, vec(codon, body), stop)
            .prop_map(|(start, body, stop)| {
                let mut sequence = start;
                sequence.extend(body);
                sequence.push_str(&stop);
                sequence
            })
            .boxed())
    }
}
impl Generator for CdsConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        if self.is_codon_structured() {
            return self.codon_structured();
        }
        let alphabet = Alphabet::dna(self.allow_ambiguous, self.allow_gaps, self.uppercase_only)?;
        let range = self.size.to_range()?;
        debug!(
            symbols = alphabet.len(),
            min = range.start(),
            max = range.end(),
            "Building cds strategy"
        );
        Ok(text(&alphabet, range))
    }
}

/// Generates coding DNA sequences
pub fn cds(config: CdsConfig) -> Result<BoxedStrategy<String>> {
    config.strategy()
}

/// Generates a start codon from the table of every NCBI translation table
#[must_use]
pub fn start_codon(allow_ambiguous: bool) -> BoxedStrategy<String> {
    codon_table(if allow_ambiguous {
        AMBIGUOUS_START_CODONS
    } else {
        START_CODONS
    })
}

/// Generates a stop codon from the table of every NCBI translation table
#[must_use]
pub fn stop_codon(allow_ambiguous: bool) -> BoxedStrategy<String> {
    codon_table(if allow_ambiguous {
        AMBIGUOUS_STOP_CODONS
    } else {
        STOP_CODONS
    })
}

fn codon_table(table: &'static [&'static str]) -> BoxedStrategy<String> {
    select(table).prop_map(str::to_string).boxed()
}
