//! Alphabet module for the bioprop library
//!
//! Static symbol tables for nucleotides and amino acids, along with the codon tables
//! used when generating coding sequences. Tables are ordered: the first symbol of an
//! alphabet is the value a shrunk sequence converges to.

use std::borrow::Cow;

use crate::error::{ConfigError, Result};

/// Unambiguous DNA bases
pub const DNA_BASES: &[u8] = b"ACGT";

/// Unambiguous RNA bases
pub const RNA_BASES: &[u8] = b"ACGU";

/// IUPAC nucleotide ambiguity codes, shared by DNA and RNA
pub const NUCLEOTIDE_AMBIGUOUS: &[u8] = b"RYSWKMBDHVN";

/// Alignment gap symbol
pub const GAP: u8 = b'-';

/// The 20 canonical amino acids in one-letter form
pub const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Unknown amino acid
pub const AMINO_ACIDS_AMBIGUOUS: &[u8] = b"X";

/// Extended amino acid alphabet (ambiguous pairs and rare residues)
pub const AMINO_ACIDS_EXTENDED: &[u8] = b"BJOUZ";

/// Start codons of all NCBI translation tables
pub const START_CODONS: &[&str] = &["ATA", "ATC", "ATG", "ATT", "CTG", "GTG", "TTA", "TTG"];

/// Start codons of all NCBI translation tables, including ambiguous spellings
pub const AMBIGUOUS_START_CODONS: &[&str] = &[
    "ATA", "ATB", "ATC", "ATD", "ATG", "ATH", "ATK", "ATM", "ATN", "ATR", "ATS", "ATT", "ATV",
    "ATW", "ATX", "ATY", "BTG", "CTG", "DTG", "GTG", "HTG", "KTG", "MTG", "NTG", "RTG", "STG",
    "TTA", "TTG", "TTR", "VTG", "WTA", "WTG", "WTR", "XTG", "YTG",
];

/// Stop codons of all NCBI translation tables
pub const STOP_CODONS: &[&str] = &["AGA", "AGG", "TAA", "TAG", "TCA", "TGA", "TTA"];

/// Stop codons of all NCBI translation tables, including ambiguous spellings
pub const AMBIGUOUS_STOP_CODONS: &[&str] = &[
    "AGA", "AGG", "AGR", "TAA", "TAG", "TAR", "TCA", "TDA", "TGA", "TKA", "TMA", "TRA", "TSA",
    "TTA", "TVA", "TWA",
];

/// Returns the three-letter code of a one-letter amino acid symbol (case-insensitive)
#[must_use]
pub fn three_letter_code(residue: char) -> Option<&'static str> {
    let code = match residue.to_ascii_uppercase() {
        'A' => "Ala",
        'C' => "Cys",
        'D' => "Asp",
        'E' => "Glu",
        'F' => "Phe",
        'G' => "Gly",
        'H' => "His",
        'I' => "Ile",
        'K' => "Lys",
        'L' => "Leu",
        'M' => "Met",
        'N' => "Asn",
        'P' => "Pro",
        'Q' => "Gln",
        'R' => "Arg",
        'S' => "Ser",
        'T' => "Thr",
        'V' => "Val",
        'W' => "Trp",
        'Y' => "Tyr",
        'X' => "Xaa",
        'B' => "Asx",
        'J' => "Xle",
        'O' => "Pyl",
        'U' => "Sec",
        'Z' => "Glx",
        _ => return None,
    };
    Some(code)
}

/// Whether a codon is a stop codon in any translation table (case-insensitive)
#[must_use]
pub fn is_stop_codon(codon: &str) -> bool {
    let upper = codon.to_ascii_uppercase();
    AMBIGUOUS_STOP_CODONS.contains(&upper.as_str())
}

/// An ordered, duplicate-free set of symbols to draw sequences from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}
impl Alphabet {
    /// Creates an alphabet from arbitrary symbols, keeping the first occurrence of each
    ///
    /// # Arguments
    ///
    /// * `name` - Used to label the error when no symbols remain
    /// * `symbols` - The symbols in draw order
    pub fn new<I: IntoIterator<Item = char>>(name: &'static str, symbols: I) -> Result<Self> {
        let mut unique = Vec::new();
        for symbol in symbols {
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }
        if unique.is_empty() {
            return ConfigError::EmptyAlphabet(name).reject();
        }
        Ok(Self { symbols: unique })
    }

    /// Builds a nucleotide alphabet from a core base table and the usual switches
    ///
    /// Letters come first (core, then ambiguity codes), then their lowercase forms
    /// when `uppercase_only` is unset, and the gap symbol last.
    pub fn nucleotide(
        name: &'static str,
        bases: &[u8],
        allow_ambiguous: bool,
        allow_gaps: bool,
        uppercase_only: bool,
    ) -> Result<Self> {
        let mut letters = bases.to_vec();
        if allow_ambiguous {
            letters.extend_from_slice(NUCLEOTIDE_AMBIGUOUS);
        }
        let mut symbols = cased(&letters, uppercase_only);
        if allow_gaps {
            symbols.push(char::from(GAP));
        }
        Self::new(name, symbols)
    }

    /// DNA alphabet with the given switches
    pub fn dna(allow_ambiguous: bool, allow_gaps: bool, uppercase_only: bool) -> Result<Self> {
        Self::nucleotide("dna", DNA_BASES, allow_ambiguous, allow_gaps, uppercase_only)
    }

    /// RNA alphabet with the given switches
    pub fn rna(allow_ambiguous: bool, allow_gaps: bool, uppercase_only: bool) -> Result<Self> {
        Self::nucleotide("rna", RNA_BASES, allow_ambiguous, allow_gaps, uppercase_only)
    }

    /// One-letter protein alphabet with the given switches
    pub fn protein(allow_extended: bool, allow_ambiguous: bool, uppercase_only: bool) -> Result<Self> {
        let mut letters = AMINO_ACIDS.to_vec();
        if allow_ambiguous {
            letters.extend_from_slice(AMINO_ACIDS_AMBIGUOUS);
        }
        if allow_extended {
            letters.extend_from_slice(AMINO_ACIDS_EXTENDED);
        }
        Self::new("protein", cased(&letters, uppercase_only))
    }

    /// Printable ASCII within `min..=max` excluding whatever is in the blacklist
    pub fn printable(name: &'static str, min: u8, max: u8, blacklist: &[char]) -> Result<Self> {
        Self::new(
            name,
            (min..=max)
                .map(char::from)
                .filter(|c| !blacklist.contains(c)),
        )
    }

    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Symbols in the owned form expected by [`proptest::sample::select`]
    pub(crate) fn to_select(&self) -> Cow<'static, [char]> {
        Cow::Owned(self.symbols.clone())
    }
}

fn cased(letters: &[u8], uppercase_only: bool) -> Vec<char> {
    let mut symbols: Vec<char> = letters.iter().map(|&b| char::from(b)).collect();
    if !uppercase_only {
        symbols.extend(letters.iter().map(|&b| char::from(b.to_ascii_lowercase())));
    }
    symbols
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_dna_core_only() -> Result<()> {
        let alphabet = Alphabet::dna(false, false, true)?;
        assert_eq!(alphabet.symbols(), &['A', 'C', 'G', 'T']);
        Ok(())
    }

    #[test]
    fn test_dna_full() -> Result<()> {
        let alphabet = Alphabet::dna(true, true, false)?;
        // 15 letters in two cases plus the gap
        assert_eq!(alphabet.len(), 31);
        assert_eq!(alphabet.symbols()[0], 'A');
        assert_eq!(*alphabet.symbols().last().unwrap(), '-');
        assert!(alphabet.contains('n'));
        assert!(!alphabet.contains('U'));
        Ok(())
    }

    #[test]
    fn test_rna_uses_uracil() -> Result<()> {
        let alphabet = Alphabet::rna(false, false, true)?;
        assert_eq!(alphabet.symbols(), &['A', 'C', 'G', 'U']);
        Ok(())
    }

    #[test]
    fn test_protein_switches() -> Result<()> {
        let canonical = Alphabet::protein(false, false, true)?;
        assert_eq!(canonical.len(), 20);
        assert!(!canonical.contains('X'));

        let ambiguous = Alphabet::protein(false, true, true)?;
        assert_eq!(ambiguous.len(), 21);
        assert!(ambiguous.contains('X'));

        let extended = Alphabet::protein(true, false, false)?;
        assert_eq!(extended.len(), 50);
        assert!(extended.contains('o'));
        Ok(())
    }

    #[test]
    fn test_empty_alphabet() {
        let printable: Vec<char> = ('!'..='~').collect();
        let err = Alphabet::printable("sequence_id", b'!', b'~', &printable).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::ConfigError(ConfigError::EmptyAlphabet("sequence_id"))
        ));
    }

    #[test]
    fn test_duplicates_removed() -> Result<()> {
        let alphabet = Alphabet::new("custom", "AACCA".chars())?;
        assert_eq!(alphabet.symbols(), &['A', 'C']);
        Ok(())
    }

    #[test]
    fn test_three_letter_codes() {
        for &residue in AMINO_ACIDS
            .iter()
            .chain(AMINO_ACIDS_AMBIGUOUS)
            .chain(AMINO_ACIDS_EXTENDED)
        {
            let code = three_letter_code(char::from(residue)).unwrap();
            assert_eq!(code.len(), 3);
        }
        assert_eq!(three_letter_code('a'), Some("Ala"));
        assert_eq!(three_letter_code('-'), None);
    }

    #[test]
    fn test_stop_codon_lookup() {
        assert!(is_stop_codon("TAA"));
        assert!(is_stop_codon("tga"));
        assert!(!is_stop_codon("ATG"));
        for codon in STOP_CODONS {
            assert!(AMBIGUOUS_STOP_CODONS.contains(codon));
        }
        for codon in START_CODONS {
            assert!(AMBIGUOUS_START_CODONS.contains(codon));
        }
    }
}
