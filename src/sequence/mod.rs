//! # sequence
//!
//! Strategies for raw biological sequences: DNA, RNA, protein, coding sequences,
//! codons, and k-mers drawn from an existing sequence.
//!
//! ```
//! use bioprop::{Generator, NucleotideConfig};
//!
//! let config = NucleotideConfig::dna()
//!     .allow_ambiguous(false)
//!     .allow_gaps(false)
//!     .uppercase_only(true)
//!     .min_size(5)
//!     .max_size(5);
//!
//! for seq in config.sample_seeded(16).unwrap() {
//!     assert_eq!(seq.len(), 5);
//!     assert!(seq.bytes().all(|b| b"ACGT".contains(&b)));
//! }
//! ```

mod cds;
mod kmer;
mod nucleotide;
mod protein;

use std::ops::RangeInclusive;

use proptest::collection::vec;
use proptest::sample::select;
use proptest::strategy::{BoxedStrategy, Strategy};

use crate::alphabet::Alphabet;

pub use cds::{cds, start_codon, stop_codon, CdsConfig};
pub use kmer::{kmers, KmerConfig, KmerSet};
pub use nucleotide::{dna, rna, Molecule, NucleotideConfig};
pub use protein::{protein, ProteinConfig};

/// Strings over `alphabet` whose length lies in `size`
///
/// Shrinks towards shorter strings made of the first symbol of the alphabet.
#[must_use]
pub fn text(alphabet: &Alphabet, size: RangeInclusive<usize>) -> BoxedStrategy<String> {
    vec(select(alphabet.to_select()), size)
        .prop_map(|symbols| symbols.into_iter().collect::<String>())
        .boxed()
}
