/// Custom Result type for bioprop operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bioprop library, encompassing all possible error cases
/// that can occur while building or sampling a generator.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Contradictory or out-of-range generator options
    ConfigError(#[from] ConfigError),
    /// Errors raised while drawing a value from a strategy
    DrawError(#[from] DrawError),
    /// Regex patterns that proptest could not turn into a strategy
    RegexError(#[from] proptest::string::Error),
    /// Generic errors that can occur in any part of the system
    AnyhowError(#[from] anyhow::Error),
}

/// Errors describing a generator configuration that can never produce a valid value
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The effective alphabet has no symbols left to draw from
    ///
    /// # Arguments
    /// * `&'static str` - The generator whose alphabet was empty
    #[error("Alphabet for {0} is empty")]
    EmptyAlphabet(&'static str),

    /// The lower size bound is above the upper size bound
    #[error("Minimum size ({min}) is larger than the maximum size ({max})")]
    InvalidSizeRange { min: usize, max: usize },

    /// The lower PHRED score is above the upper PHRED score
    #[error("Minimum score ({min}) is larger than the maximum score ({max})")]
    InvalidScoreRange { min: i32, max: i32 },

    /// The highest encoded quality character is beyond the ASCII table used by FASTQ
    ///
    /// # Arguments
    /// * `i64` - The offending code point (`offset + max_score`)
    /// * `i64` - The largest permitted code point
    #[error("{0} is larger than the maximum ASCII value {1}")]
    QualityAboveAscii(i64, i64),

    /// The lowest encoded quality character is below the permitted code point
    ///
    /// # Arguments
    /// * `i64` - The offending code point (`offset + min_score`)
    /// * `i64` - The smallest permitted code point
    #[error("{0} is smaller than the minimum code point {1}")]
    QualityBelowMinimum(i64, i64),

    /// The k-mer length is zero
    #[error("The value of k must be at least 1")]
    ZeroKmerLength,

    /// The k-mer length is larger than the sequence it is drawn from
    #[error("The value of k: {k} is greater than the length of the sequence: {len}")]
    KmerTooLong { k: usize, len: usize },

    /// The size range cannot hold the requested start and stop codons
    ///
    /// # Fields
    /// * `max` - The largest permitted sequence length in bases
    /// * `needed` - The bases taken by the fixed codons
    #[error("Sequence of at most {max} bases is too short to include start/stop codons ({needed} bases)")]
    SizeTooSmallForCodons { max: usize, needed: usize },

    /// The size range does not contain any whole number of codons
    #[error("No codon-aligned length fits between {min} and {max} bases")]
    NoCodonAlignedLength { min: usize, max: usize },

    /// The identifier options cannot produce enough distinct identifiers for a file
    ///
    /// # Fields
    /// * `needed` - The minimum number of records
    /// * `available` - The number of distinct identifiers the options allow
    #[error("At least {needed} distinct identifiers are needed but only {available} can be drawn")]
    TooFewIdentifiers { needed: usize, available: usize },

    /// The record count range of a multi-record file is inverted
    #[error("Minimum number of reads ({min}) is larger than the maximum ({max})")]
    InvalidReadRange { min: usize, max: usize },
}

impl ConfigError {
    /// Logs the rejected configuration and returns it as the crate error
    pub(crate) fn reject<T>(self) -> Result<T> {
        tracing::warn!(error = %self, "Rejecting generator configuration");
        Err(self.into())
    }
}

/// Errors that can occur while drawing values outside of a proptest runner
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The strategy rejected every candidate value
    ///
    /// # Arguments
    /// * `String` - The rejection reason reported by proptest
    #[error("Strategy rejected the draw: {0}")]
    Rejected(String),
}
