//! # bioprop
//!
//! Composable [`proptest`] strategies for biological sequences and the text formats
//! they are exchanged in: DNA, RNA, protein and coding sequences, sequence identifiers,
//! PHRED quality strings, FASTA and FASTQ records, and k-mers.
//!
//! Each generator is a configuration struct implementing [`Generator`]. Its defaults
//! are the documented defaults of the generator, and builder-style setters narrow them.
//! Building the strategy validates the configuration, so contradictory options are
//! reported as a [`ConfigError`] rather than producing bad values.
//!
//! ```
//! use bioprop::prelude::*;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn parses_any_record(record in fastq(&FastqConfig::default().max_size(50)).unwrap()) {
//!         prop_assert!(record.starts_with('@'));
//!     }
//! }
//! # fn main() {}
//! ```

mod alphabet;
mod error;
mod fasta;
mod fastq;
mod generator;
mod identifier;
mod quality;
mod sequence;

#[cfg(test)]
mod test_utils;

pub mod prelude;

/// Largest code point of a printable ASCII character (`~`)
pub const MAX_ASCII: u8 = 126;

/// Seed used for reproducible sampling outside of a test runner
pub const RNG_SEED: u64 = 42;

pub use alphabet::{
    is_stop_codon, three_letter_code, Alphabet, AMBIGUOUS_START_CODONS, AMBIGUOUS_STOP_CODONS,
    AMINO_ACIDS, AMINO_ACIDS_AMBIGUOUS, AMINO_ACIDS_EXTENDED, DNA_BASES, GAP,
    NUCLEOTIDE_AMBIGUOUS, RNA_BASES, START_CODONS, STOP_CODONS,
};
pub use error::{ConfigError, DrawError, Error, Result};
pub use fasta::{
    fasta, fasta_file, parsed_fasta, parsed_fasta_file, FastaConfig, FastaRecord, LineWrap,
    DEFAULT_WRAP_LENGTH,
};
pub use fastq::{fastq, fastq_file, parsed_fastq, FastqConfig, FastqRecord, MIN_QUALITY_ASCII};
pub use generator::{draw, sample_many, Generator, ReadRange, SizeRange, UNBOUNDED_EXTENT};
pub use identifier::{
    illumina_id, nanopore_id, sequence_id, IdentifierConfig, IlluminaId, NanoporeId,
    DEFAULT_BLACKLIST, DEFAULT_IDENTIFIER_MAX_SIZE, MIN_IDENTIFIER_ASCII,
};
pub use quality::{fastq_quality, PhredEncoding, QualityConfig, QualityString};
pub use sequence::{
    cds, dna, kmers, protein, rna, start_codon, stop_codon, text, CdsConfig, KmerConfig,
    KmerSet, Molecule, NucleotideConfig, ProteinConfig,
};
