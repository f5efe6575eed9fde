use proptest::collection::vec;
use proptest::sample::select;
use proptest::strategy::{BoxedStrategy, Strategy};
use tracing::debug;

use crate::{
    alphabet::{three_letter_code, Alphabet},
    generator::SizeRange,
    Generator, Result,
};

/// Options for protein sequences
///
/// `size` always counts residues. With three-letter output every residue takes three
/// characters, so a sequence of `n` residues is `3 * n` characters long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProteinConfig {
    /// Whether the extended residues `BJOUZ` may appear
    pub allow_extended: bool,
    /// Whether the unknown residue `X` may appear
    pub allow_ambiguous: bool,
    /// Whether residues are written as one-letter (`A`) or three-letter (`Ala`) codes
    pub single_letter_protein: bool,
    /// Whether to restrict the sequence to uppercase symbols
    pub uppercase_only: bool,
    /// Bounds on the number of residues
    pub size: SizeRange,
}
impl Default for ProteinConfig {
    fn default() -> Self {
        Self {
            allow_extended: false,
            allow_ambiguous: true,
            single_letter_protein: true,
            uppercase_only: false,
            size: SizeRange::default(),
        }
    }
}
impl ProteinConfig {
    #[must_use]
    pub fn allow_extended(mut self, allow_extended: bool) -> Self {
        self.allow_extended = allow_extended;
        self
    }

    #[must_use]
    pub fn allow_ambiguous(mut self, allow_ambiguous: bool) -> Self {
        self.allow_ambiguous = allow_ambiguous;
        self
    }

    #[must_use]
    pub fn single_letter_protein(mut self, single_letter_protein: bool) -> Self {
        self.single_letter_protein = single_letter_protein;
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

    /// The one-letter alphabet these options select
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::protein(self.allow_extended, self.allow_ambiguous, self.uppercase_only)
    }
}
impl Generator for ProteinConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let alphabet = self.alphabet()?;
        let range = self.size.to_range()?;
        debug!(
            symbols = alphabet.len(),
            min = range.start(),
            max = range.end(),
            single_letter = self.single_letter_protein,
            "Building protein strategy"
        );

        let single_letter = self.single_letter_protein;
        let uppercase_only = self.uppercase_only;
        Ok(vec(select(alphabet.to_select()), range)
            .prop_map(move |residues| {
                if single_letter {
                    residues.into_iter().collect()
                } else {
                    residues
                        .into_iter()
                        .map(|residue| expand_residue(residue, uppercase_only))
                        .collect()
                }
            })
            .boxed())
    }
}

/// Writes a residue as its three-letter code, following the case it was drawn in
fn expand_residue(residue: char, uppercase_only: bool) -> String {
    let code = three_letter_code(residue).unwrap_or("Xaa");
    if uppercase_only {
        code.to_ascii_uppercase()
    } else if residue.is_ascii_lowercase() {
        code.to_ascii_lowercase()
    } else {
        code.to_string()
    }
}

/// Generates protein sequences
pub fn protein(config: ProteinConfig) -> Result<BoxedStrategy<String>> {
    config.strategy()
}
