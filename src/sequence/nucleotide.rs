use proptest::strategy::BoxedStrategy;
use tracing::debug;

use super::text;
use crate::{alphabet::Alphabet, generator::SizeRange, Generator, Result};

/// The nucleic acid a sequence is drawn for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Molecule {
    #[default]
    Dna,
    Rna,
}
impl Molecule {
    fn name(self) -> &'static str {
        match self {
            Self::Dna => "dna",
            Self::Rna => "rna",
        }
    }
}

/// Options for DNA and RNA sequences
///
/// The defaults follow the permissive end of each switch: ambiguous bases, gaps,
/// and both cases are all allowed, and the length is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NucleotideConfig {
    /// Which base table to draw from
    pub molecule: Molecule,
    /// Whether IUPAC ambiguity codes may appear
    pub allow_ambiguous: bool,
    /// Whether the gap symbol `-` may appear
    pub allow_gaps: bool,
    /// Whether to restrict the sequence to uppercase symbols
    pub uppercase_only: bool,
    /// Bounds on the number of bases
    pub size: SizeRange,
}
impl Default for NucleotideConfig {
    fn default() -> Self {
        Self::dna()
    }
}
impl NucleotideConfig {
    #[must_use]
    pub fn dna() -> Self {
        Self {
            molecule: Molecule::Dna,
            allow_ambiguous: true,
            allow_gaps: true,
            uppercase_only: false,
            size: SizeRange::default(),
        }
    }

    #[must_use]
    pub fn rna() -> Self {
        Self {
            molecule: Molecule::Rna,
            ..Self::dna()
        }
    }

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
    pub fn min_size(mut self, min_size: usize) -> Self {
        self.size.min = min_size;
        self
    }

    #[must_use]
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.size.max = Some(max_size);
        self
    }

    /// The alphabet these options select
    pub fn alphabet(&self) -> Result<Alphabet> {
        match self.molecule {
            Molecule::Dna => Alphabet::dna(self.allow_ambiguous, self.allow_gaps, self.uppercase_only),
            Molecule::Rna => Alphabet::rna(self.allow_ambiguous, self.allow_gaps, self.uppercase_only),
        }
    }
}
impl Generator for NucleotideConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let alphabet = self.alphabet()?;
        let range = self.size.to_range()?;
        debug!(
            molecule = self.molecule.name(),
            symbols = alphabet.len(),
            min = range.start(),
            max = range.end(),
            "Building nucleotide strategy"
        );
        Ok(text(&alphabet, range))
    }
}

/// Generates DNA sequences
///
/// The molecule of `config` is forced to DNA.
pub fn dna(config: NucleotideConfig) -> Result<BoxedStrategy<String>> {
    NucleotideConfig {
        molecule: Molecule::Dna,
        ..config
    }
    .strategy()
}

/// Generates RNA sequences
///
/// The molecule of `config` is forced to RNA.
pub fn rna(config: NucleotideConfig) -> Result<BoxedStrategy<String>> {
    NucleotideConfig {
        molecule: Molecule::Rna,
        ..config
    }
    .strategy()
}

#[cfg(test)]
mod testing {
    use proptest::prelude::*;

    use super::*;
    use crate::{test_utils::minimal, ConfigError, Error};

    fn strict() -> NucleotideConfig {
        NucleotideConfig::dna()
            .allow_ambiguous(false)
            .allow_gaps(false)
            .uppercase_only(true)
    }

    #[test]
    fn test_smallest_example() -> Result<()> {
        assert_eq!(minimal(&dna(NucleotideConfig::dna())?, |_| true), "");
        Ok(())
    }

    #[test]
    fn test_smallest_non_empty_example() -> Result<()> {
        assert_eq!(minimal(&dna(NucleotideConfig::dna().min_size(1))?, |_| true), "A");
        assert_eq!(minimal(&dna(NucleotideConfig::dna().min_size(2))?, |_| true), "AA");
        Ok(())
    }

    #[test]
    fn test_allow_gaps_smallest_example() -> Result<()> {
        let config = NucleotideConfig::dna()
            .allow_ambiguous(false)
            .uppercase_only(true)
            .min_size(1);
        let seq = minimal(&dna(config)?, |s: &String| s.chars().all(|c| !"ACGT".contains(c)));
        assert_eq!(seq, "-");
        Ok(())
    }

    #[test]
    fn test_allow_ambiguous_smallest_example() -> Result<()> {
        let config = NucleotideConfig::dna()
            .allow_gaps(false)
            .uppercase_only(true)
            .min_size(2);
        let seq = minimal(&dna(config)?, |s: &String| s.chars().all(|c| !"ACGT".contains(c)));
        assert_eq!(seq, "RR");
        Ok(())
    }

    #[test]
    fn test_allow_lowercase_smallest_example() -> Result<()> {
        let config = NucleotideConfig::dna()
            .allow_ambiguous(false)
            .allow_gaps(false)
            .min_size(1);
        let seq = minimal(&dna(config)?, |s: &String| s.chars().all(|c| !"ACGT".contains(c)));
        assert_eq!(seq, "a");
        Ok(())
    }

    #[test]
    fn test_empty_sequence() -> Result<()> {
        let strategy = dna(strict().min_size(0).max_size(0))?;
        for seq in crate::generator::sample_many(&strategy, 8)? {
            assert!(seq.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_inverted_size_range() {
        let err = dna(strict().min_size(3).max_size(2)).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigError(ConfigError::InvalidSizeRange { min: 3, max: 2 })
        ));
    }

    #[test]
    fn test_rna_forces_molecule() -> Result<()> {
        let strategy = rna(strict().min_size(20).max_size(20))?;
        for seq in crate::generator::sample_many(&strategy, 16)? {
            assert!(seq.bytes().all(|b| b"ACGU".contains(&b)));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn strict_dna_is_acgt_of_fixed_length(seq in dna(strict().min_size(5).max_size(5)).unwrap()) {
            prop_assert_eq!(seq.len(), 5);
            prop_assert!(seq.bytes().all(|b| b"ACGT".contains(&b)));
        }

        #[test]
        fn dna_respects_alphabet_and_bounds(
            allow_ambiguous in any::<bool>(),
            allow_gaps in any::<bool>(),
            uppercase_only in any::<bool>(),
            min in 0usize..20,
            extra in 0usize..20,
            seed in any::<u64>(),
        ) {
            let config = NucleotideConfig::dna()
                .allow_ambiguous(allow_ambiguous)
                .allow_gaps(allow_gaps)
                .uppercase_only(uppercase_only)
                .min_size(min)
                .max_size(min + extra);
            let alphabet = config.alphabet().unwrap();
            let mut rng = <rand::rngs::SmallRng as rand::SeedableRng>::seed_from_u64(seed);
            let seq = config.sample(&mut rng).unwrap();
            prop_assert!(config.size.contains(seq.chars().count()));
            prop_assert!(seq.chars().all(|c| alphabet.contains(c)));
            if !allow_gaps {
                prop_assert!(!seq.contains('-'));
            }
            if uppercase_only {
                prop_assert!(!seq.chars().any(|c| c.is_ascii_lowercase()));
            }
        }

        #[test]
        fn max_size_is_respected(seq in dna(NucleotideConfig::dna().max_size(10)).unwrap()) {
            prop_assert!(seq.len() <= 10);
        }
    }
}
