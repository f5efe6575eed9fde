//! FASTQ module for the bioprop library
//!
//! A FASTQ record spans four lines: the `@` header, the sequence, a `+` separator that
//! may repeat the header, and the quality string. The sequence and quality lines of a
//! generated record always have the same length.
//!
//! Records are written on four lines unless a wrap length is set, in which case the
//! sequence and quality are both split into lines of the same width.

use std::fmt;

use proptest::collection::vec;
use proptest::strategy::{BoxedStrategy, Just, Strategy};
use tracing::debug;

use crate::{
    fasta::{default_comment, DEFAULT_WRAP_LENGTH},
    generator::{ReadRange, SizeRange},
    identifier::IdentifierConfig,
    quality::{PhredEncoding, QualityConfig, QualityString},
    sequence::{dna, NucleotideConfig},
    Generator, Result,
};

/// Smallest code point a quality character may take (`!`), keeping the line free of whitespace
pub const MIN_QUALITY_ASCII: u8 = b'!';

/// A structured FASTQ record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FastqRecord {
    pub id: String,
    pub comment: Option<String>,
    pub sequence: String,
    pub quality: QualityString,
    /// Whether the `+` line repeats the header
    pub additional_description: bool,
}
impl FastqRecord {
    /// Builds a record from a full header line, splitting it at the first space
    #[must_use]
    pub fn from_header(
        header: &str,
        sequence: String,
        quality: QualityString,
        additional_description: bool,
    ) -> Self {
        let (id, comment) = split_header(header);
        Self {
            id,
            comment,
            sequence,
            quality,
            additional_description,
        }
    }

    /// The header line without its leading `@`
    #[must_use]
    pub fn header(&self) -> String {
        match &self.comment {
            Some(comment) => format!("{} {comment}", self.id),
            None => self.id.clone(),
        }
    }

    /// Renders the record with sequence and quality split every `width` symbols
    ///
    /// A width of zero falls back to [`DEFAULT_WRAP_LENGTH`].
    #[must_use]
    pub fn wrapped(&self, width: usize) -> String {
        let width = if width == 0 { DEFAULT_WRAP_LENGTH } else { width };
        let header = self.header();
        let mut rendered = format!("@{header}\n");
        push_wrapped(&mut rendered, &self.sequence, width);
        rendered.push('+');
        if self.additional_description {
            rendered.push_str(&header);
        }
        rendered.push('\n');
        push_wrapped(&mut rendered, self.quality.as_str(), width);
        rendered
    }

    fn render(&self, wrap_length: Option<usize>) -> String {
        match wrap_length {
            Some(width) => self.wrapped(width),
            None => self.to_string(),
        }
    }
}
impl fmt::Display for FastqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header();
        writeln!(f, "@{header}")?;
        writeln!(f, "{}", self.sequence)?;
        if self.additional_description {
            writeln!(f, "+{header}")?;
        } else {
            writeln!(f, "+")?;
        }
        writeln!(f, "{}", self.quality)
    }
}

fn push_wrapped(rendered: &mut String, text: &str, width: usize) {
    let symbols: Vec<char> = text.chars().collect();
    if symbols.is_empty() {
        rendered.push('\n');
    }
    for line in symbols.chunks(width) {
        rendered.extend(line);
        rendered.push('\n');
    }
}

fn split_header(header: &str) -> (String, Option<String>) {
    match header.split_once(' ') {
        Some((id, comment)) => (id.to_string(), Some(comment.to_string())),
        None => (header.to_string(), None),
    }
}

/// Options for FASTQ records and files
#[derive(Debug, Clone)]
pub struct FastqConfig {
    /// Bounds on the sequence length when no custom sequence source is set
    pub size: SizeRange,
    /// Lowest PHRED score to use
    pub min_score: i32,
    /// Highest PHRED score to use
    pub max_score: i32,
    /// ASCII encoding offset of the quality string
    pub offset: i32,
    /// Whether every generated header carries a comment after the identifier
    ///
    /// Ignored when `identifier_source` is set.
    pub add_comment: bool,
    /// Whether the `+` line repeats the header
    pub additional_description: bool,
    /// Width of the sequence and quality lines, `None` for a single line each
    pub wrap_length: Option<usize>,
    /// Options for the record identifiers
    pub identifier: IdentifierConfig,
    /// Source of whole header lines, replacing the identifier and comment
    pub identifier_source: Option<BoxedStrategy<String>>,
    /// Source of sequences, [`dna`] by default
    pub sequence_source: Option<BoxedStrategy<String>>,
    /// Bounds on the number of records in a file
    pub reads: ReadRange,
}
impl Default for FastqConfig {
    fn default() -> Self {
        let encoding = PhredEncoding::default();
        Self {
            size: SizeRange::new(1, None),
            min_score: encoding.min_score(),
            max_score: encoding.max_score(),
            offset: encoding.offset(),
            add_comment: true,
            additional_description: true,
            wrap_length: None,
            identifier: IdentifierConfig::default(),
            identifier_source: None,
            sequence_source: None,
            reads: ReadRange::default(),
        }
    }
}
impl FastqConfig {
    /// Sets an exact sequence length
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

    /// Uses the full score range and offset of `encoding`
    #[must_use]
    pub fn encoding(mut self, encoding: PhredEncoding) -> Self {
        self.min_score = encoding.min_score();
        self.max_score = encoding.max_score();
        self.offset = encoding.offset();
        self
    }

    #[must_use]
    pub fn add_comment(mut self, add_comment: bool) -> Self {
        self.add_comment = add_comment;
        self
    }

    #[must_use]
    pub fn additional_description(mut self, additional_description: bool) -> Self {
        self.additional_description = additional_description;
        self
    }

    /// `None` writes one line each, `Some(0)` wraps at 80 and `Some(n)` at `n`
    #[must_use]
    pub fn wrap_length(mut self, wrap_length: Option<usize>) -> Self {
        self.wrap_length = wrap_length;
        self
    }

    #[must_use]
    pub fn identifier(mut self, identifier: IdentifierConfig) -> Self {
        self.identifier = identifier;
        self
    }

    /// Draws whole header lines from `source`, e.g. [`crate::illumina_id`]
    #[must_use]
    pub fn identifier_source<S>(mut self, source: S) -> Self
    where
        S: Strategy<Value = String> + 'static,
    {
        self.identifier_source = Some(source.boxed());
        self
    }

    #[must_use]
    pub fn sequence_source<S>(mut self, source: S) -> Self
    where
        S: Strategy<Value = String> + 'static,
    {
        self.sequence_source = Some(source.boxed());
        self
    }

    #[must_use]
    pub fn min_reads(mut self, min_reads: usize) -> Self {
        self.reads.min = min_reads;
        self
    }

    #[must_use]
    pub fn max_reads(mut self, max_reads: usize) -> Self {
        self.reads.max = max_reads;
        self
    }

    /// Quality options shared by every record
    fn quality(&self) -> Result<QualityConfig> {
        let quality = QualityConfig::default()
            .min_score(self.min_score)
            .max_score(self.max_score)
            .offset(self.offset);
        quality.validate_scores(i32::from(MIN_QUALITY_ASCII))?;
        Ok(quality)
    }

    fn header_strategy(&self) -> Result<BoxedStrategy<(String, Option<String>)>> {
        if let Some(source) = &self.identifier_source {
            return Ok(source.clone().prop_map(|header| split_header(&header)).boxed());
        }
        let comments = if self.add_comment {
            default_comment()?.prop_map(Some).boxed()
        } else {
            Just(None).boxed()
        };
        Ok((self.identifier.strategy()?, comments).boxed())
    }

    fn sequence_strategy(&self) -> Result<BoxedStrategy<String>> {
        match &self.sequence_source {
            Some(source) => Ok(source.clone()),
            None => dna(NucleotideConfig {
                size: self.size,
                ..NucleotideConfig::dna()
            }),
        }
    }

    /// Structured records
    pub fn records(&self) -> Result<BoxedStrategy<FastqRecord>> {
        let quality = self.quality()?;
        let headers = self.header_strategy()?;
        let sequences = self.sequence_strategy()?;
        debug!(
            min_score = self.min_score,
            max_score = self.max_score,
            offset = self.offset,
            additional_description = self.additional_description,
            wrap_length = ?self.wrap_length,
            custom_header = self.identifier_source.is_some(),
            "Building fastq record strategy"
        );

        let additional_description = self.additional_description;
        Ok((headers, sequences)
            .prop_flat_map(move |((id, comment), sequence)| {
                let len = sequence.chars().count();
                (Just(id), Just(comment), Just(sequence), quality.exact(len))
            })
            .prop_map(move |(id, comment, sequence, quality)| FastqRecord {
                id,
                comment,
                sequence,
                quality,
                additional_description,
            })
            .boxed())
    }

    /// Structured files
    pub fn files(&self) -> Result<BoxedStrategy<Vec<FastqRecord>>> {
        let reads = self.reads.to_range()?;
        debug!(
            min_reads = reads.start(),
            max_reads = reads.end(),
            "Building fastq file strategy"
        );
        Ok(vec(self.records()?, reads).boxed())
    }
}
impl Generator for FastqConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let wrap_length = self.wrap_length;
        Ok(self
            .records()?
            .prop_map(move |record| record.render(wrap_length))
            .boxed())
    }
}

/// Generates a single rendered FASTQ record
pub fn fastq(config: &FastqConfig) -> Result<BoxedStrategy<String>> {
    config.strategy()
}

/// Generates structured FASTQ records
pub fn parsed_fastq(config: &FastqConfig) -> Result<BoxedStrategy<FastqRecord>> {
    config.records()
}

/// Generates rendered FASTQ files
pub fn fastq_file(config: &FastqConfig) -> Result<BoxedStrategy<String>> {
    let wrap_length = config.wrap_length;
    Ok(config
        .files()?
        .prop_map(move |records| {
            records
                .iter()
                .map(|record| record.render(wrap_length))
                .collect::<String>()
        })
        .boxed())
}
