//! FASTA module for the bioprop library
//!
//! A FASTA record is a header line (`>` followed by the identifier and an optional
//! comment) and the sequence. The sequence may be written on a single line, wrapped at a
//! fixed width, or split by random line breaks to exercise lenient parsers.
//!
//! Every record this module renders ends with a newline, so records of a file are
//! simply concatenated.

use std::fmt;

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::sample::select;
use proptest::strategy::{BoxedStrategy, Just, Strategy};
use tracing::debug;

use crate::{
    alphabet::Alphabet,
    generator::{ReadRange, UNBOUNDED_EXTENT},
    identifier::IdentifierConfig,
    sequence::{dna, text, NucleotideConfig},
    ConfigError, Generator, Result, MAX_ASCII,
};

/// Line width used when wrapping is requested with a width of zero
pub const DEFAULT_WRAP_LENGTH: usize = 80;

/// Chance of a line break between two adjacent symbols
const LINE_BREAK_PROBABILITY: f64 = 0.1;

/// A structured FASTA record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FastaRecord {
    pub id: String,
    pub comment: Option<String>,
    pub sequence: String,
}
impl FastaRecord {
    #[must_use]
    pub fn new<S: Into<String>>(id: S, comment: Option<String>, sequence: S) -> Self {
        Self {
            id: id.into(),
            comment,
            sequence: sequence.into(),
        }
    }

    /// The header line without its leading `>`
    #[must_use]
    pub fn header(&self) -> String {
        match &self.comment {
            Some(comment) => format!("{} {comment}", self.id),
            None => self.id.clone(),
        }
    }

    /// Renders the record with the sequence split every `width` symbols
    ///
    /// A width of zero falls back to [`DEFAULT_WRAP_LENGTH`].
    #[must_use]
    pub fn wrapped(&self, width: usize) -> String {
        let width = if width == 0 { DEFAULT_WRAP_LENGTH } else { width };
        let symbols: Vec<char> = self.sequence.chars().collect();
        let mut rendered = format!(">{}\n", self.header());
        if symbols.is_empty() {
            rendered.push('\n');
        }
        for line in symbols.chunks(width) {
            rendered.extend(line);
            rendered.push('\n');
        }
        rendered
    }

    /// Renders the record with `breaks[i]` inserted between symbols `i` and `i + 1`
    fn with_line_breaks(&self, breaks: &[Option<&str>]) -> String {
        let mut rendered = format!(">{}\n", self.header());
        for (i, symbol) in self.sequence.chars().enumerate() {
            if let Some(Some(ending)) = i.checked_sub(1).and_then(|gap| breaks.get(gap)) {
                rendered.push_str(ending);
            }
            rendered.push(symbol);
        }
        rendered.push('\n');
        rendered
    }
}
impl fmt::Display for FastaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ">{}", self.header())?;
        writeln!(f, "{}", self.sequence)
    }
}

/// How the sequence of a record is laid out over lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineWrap {
    /// The whole sequence on one line
    #[default]
    Single,
    /// Lines of at most this many symbols (zero means [`DEFAULT_WRAP_LENGTH`])
    Fixed(usize),
    /// Line breaks at random positions, never producing an empty line
    Random { windows_line_endings: bool },
}
impl From<Option<usize>> for LineWrap {
    fn from(wrap_length: Option<usize>) -> Self {
        wrap_length.map_or(Self::Single, Self::Fixed)
    }
}

/// Draws the rendered text of `record` under the given layout
fn layout(record: FastaRecord, wrap: LineWrap) -> BoxedStrategy<String> {
    match wrap {
        LineWrap::Single => Just(record.to_string()).boxed(),
        LineWrap::Fixed(width) => Just(record.wrapped(width)).boxed(),
        LineWrap::Random {
            windows_line_endings,
        } => {
            let endings = if windows_line_endings {
                vec!["\n", "\r\n"]
            } else {
                vec!["\n"]
            };
            let gaps = record.sequence.chars().count().saturating_sub(1);
            // shrinks towards a single line
            vec(option::weighted(LINE_BREAK_PROBABILITY, select(endings)), gaps)
                .prop_map(move |breaks| record.with_line_breaks(&breaks))
                .boxed()
        }
    }
}

/// Printable ASCII comments of at least one character
pub(crate) fn default_comment() -> Result<BoxedStrategy<String>> {
    let alphabet = Alphabet::printable("comment", b' ', MAX_ASCII, &[])?;
    Ok(text(&alphabet, 1..=1 + UNBOUNDED_EXTENT))
}

/// Options for FASTA records and files
#[derive(Debug, Clone)]
pub struct FastaConfig {
    /// Options for the record identifiers
    pub identifier: IdentifierConfig,
    /// Whether headers may carry a comment
    pub add_comment: bool,
    /// Source of comments, printable ASCII by default
    pub comment_source: Option<BoxedStrategy<String>>,
    /// Source of sequences, [`dna`] by default
    pub sequence_source: Option<BoxedStrategy<String>>,
    /// Layout of the sequence lines
    pub wrap: LineWrap,
    /// Bounds on the number of records in a file
    pub reads: ReadRange,
}
impl Default for FastaConfig {
    fn default() -> Self {
        Self {
            identifier: IdentifierConfig::default(),
            add_comment: true,
            comment_source: None,
            sequence_source: None,
            wrap: LineWrap::default(),
            reads: ReadRange::default(),
        }
    }
}
impl FastaConfig {
    #[must_use]
    pub fn identifier(mut self, identifier: IdentifierConfig) -> Self {
        self.identifier = identifier;
        self
    }

    #[must_use]
    pub fn add_comment(mut self, add_comment: bool) -> Self {
        self.add_comment = add_comment;
        self
    }

    #[must_use]
    pub fn comment_source<S>(mut self, source: S) -> Self
    where
        S: Strategy<Value = String> + 'static,
    {
        self.comment_source = Some(source.boxed());
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

    /// `None` writes one sequence line, `Some(0)` wraps at 80 and `Some(n)` at `n`
    #[must_use]
    pub fn wrap_length(mut self, wrap_length: Option<usize>) -> Self {
        self.wrap = wrap_length.into();
        self
    }

    #[must_use]
    pub fn random_line_breaks(mut self, windows_line_endings: bool) -> Self {
        self.wrap = LineWrap::Random {
            windows_line_endings,
        };
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

    fn comment_strategy(&self) -> Result<BoxedStrategy<Option<String>>> {
        if !self.add_comment {
            return Ok(Just(None).boxed());
        }
        let source = match &self.comment_source {
            Some(source) => source.clone(),
            None => default_comment()?,
        };
        Ok(option::of(source).boxed())
    }

    fn sequence_strategy(&self) -> Result<BoxedStrategy<String>> {
        match &self.sequence_source {
            Some(source) => Ok(source.clone()),
            None => dna(NucleotideConfig::dna()),
        }
    }

    /// Structured records
    pub fn records(&self) -> Result<BoxedStrategy<FastaRecord>> {
        let ids = self.identifier.strategy()?;
        let comments = self.comment_strategy()?;
        let sequences = self.sequence_strategy()?;
        debug!(
            add_comment = self.add_comment,
            custom_sequence = self.sequence_source.is_some(),
            "Building fasta record strategy"
        );
        Ok((ids, comments, sequences)
            .prop_map(|(id, comment, sequence)| FastaRecord {
                id,
                comment,
                sequence,
            })
            .boxed())
    }

    /// Structured files whose records have pairwise distinct identifiers
    ///
    /// A file never holds more records than there are distinct identifiers, and a
    /// minimum above that count is rejected.
    pub fn files(&self) -> Result<BoxedStrategy<Vec<FastaRecord>>> {
        let reads = self.reads.to_range()?;
        let available = self.identifier.distinct_count(*reads.end())?;
        if available < *reads.start() {
            return ConfigError::TooFewIdentifiers {
                needed: *reads.start(),
                available,
            }
            .reject();
        }
        let reads = *reads.start()..=available;
        let ids = self.identifier.strategy()?;
        let bodies = (self.comment_strategy()?, self.sequence_strategy()?);
        debug!(
            min_reads = reads.start(),
            max_reads = reads.end(),
            "Building fasta file strategy"
        );
        Ok(btree_map(ids, bodies, reads)
            .prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(id, (comment, sequence))| FastaRecord {
                        id,
                        comment,
                        sequence,
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
            .boxed())
    }

    /// Rendered files
    pub fn file_text(&self) -> Result<BoxedStrategy<String>> {
        let wrap = self.wrap;
        Ok(self
            .files()?
            .prop_flat_map(move |records| {
                records
                    .into_iter()
                    .map(|record| layout(record, wrap))
                    .collect::<Vec<_>>()
            })
            .prop_map(|records| records.concat())
            .boxed())
    }
}
impl Generator for FastaConfig {
    type Value = String;

    fn strategy(&self) -> Result<BoxedStrategy<String>> {
        let wrap = self.wrap;
        Ok(self
            .records()?
            .prop_flat_map(move |record| layout(record, wrap))
            .boxed())
    }
}

/// Generates a single rendered FASTA record
pub fn fasta(config: &FastaConfig) -> Result<BoxedStrategy<String>> {
    config.strategy()
}

/// Generates structured FASTA records from optional comment and sequence sources
pub fn parsed_fasta(
    comment_source: Option<BoxedStrategy<String>>,
    sequence_source: Option<BoxedStrategy<String>>,
) -> Result<BoxedStrategy<FastaRecord>> {
    FastaConfig {
        comment_source,
        sequence_source,
        ..FastaConfig::default()
    }
    .records()
}

/// Generates rendered FASTA files
pub fn fasta_file(config: &FastaConfig) -> Result<BoxedStrategy<String>> {
    config.file_text()
}

/// Generates structured FASTA files
pub fn parsed_fasta_file(config: &FastaConfig) -> Result<BoxedStrategy<Vec<FastaRecord>>> {
    config.files()
}
