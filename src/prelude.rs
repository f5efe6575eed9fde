pub use super::{Generator, Result, SizeRange};

pub use crate::fasta::{fasta, fasta_file, parsed_fasta, parsed_fasta_file, FastaConfig, FastaRecord};
pub use crate::fastq::{fastq, fastq_file, parsed_fastq, FastqConfig, FastqRecord};
pub use crate::identifier::{illumina_id, nanopore_id, sequence_id, IdentifierConfig};
pub use crate::quality::{fastq_quality, PhredEncoding, QualityConfig};
pub use crate::sequence::{
    cds, dna, kmers, protein, rna, CdsConfig, KmerConfig, NucleotideConfig, ProteinConfig,
};
