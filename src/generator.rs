//! Generator module for the bioprop library
//!
//! Every generator in this crate is a configuration value implementing [`Generator`].
//! Building the strategy validates the configuration, so contradictory options fail
//! before any value is drawn. The resulting [`BoxedStrategy`] plugs into `proptest!`
//! like any other strategy and shrinks on failure.
//!
//! Outside of a test runner a configuration can still be sampled directly from any
//! [`rand::Rng`], which is how fixtures are produced reproducibly.

use std::fmt;
use std::ops::RangeInclusive;

use proptest::strategy::{BoxedStrategy, Strategy, ValueTree};
use proptest::test_runner::{Config, RngAlgorithm, TestRng, TestRunner};
use rand::{rngs::SmallRng, Rng, RngCore, SeedableRng};

use crate::error::{ConfigError, DrawError, Result};
use crate::RNG_SEED;

/// Number of symbols an unbounded size range may add on top of its minimum
pub const UNBOUNDED_EXTENT: usize = 64;

/// A validated-on-use generator configuration
pub trait Generator {
    /// The type of value produced
    type Value: fmt::Debug + 'static;

    /// Validates the configuration and builds the strategy drawing its values
    fn strategy(&self) -> Result<BoxedStrategy<Self::Value>>;

    /// Draws a single value using `rng` as the source of randomness
    ///
    /// The draw is fully determined by the state of `rng`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Value> {
        let strategy = self.strategy()?;
        draw(&strategy, rng)
    }

    /// Draws `n` values from a generator seeded with [`RNG_SEED`]
    fn sample_seeded(&self, n: usize) -> Result<Vec<Self::Value>> {
        sample_many(&self.strategy()?, n)
    }
}

/// Draws `n` values of `strategy` from a generator seeded with [`RNG_SEED`]
pub fn sample_many<S: Strategy>(strategy: &S, n: usize) -> Result<Vec<S::Value>> {
    let mut rng = SmallRng::seed_from_u64(RNG_SEED);
    (0..n).map(|_| draw(strategy, &mut rng)).collect()
}

/// Draws one value of `strategy` with a runner seeded from `rng`
pub fn draw<S, R>(strategy: &S, rng: &mut R) -> Result<S::Value>
where
    S: Strategy,
    R: Rng + ?Sized,
{
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    let mut runner = TestRunner::new_with_rng(
        Config::default(),
        TestRng::from_seed(RngAlgorithm::ChaCha, &seed),
    );
    let tree = strategy
        .new_tree(&mut runner)
        .map_err(|reason| DrawError::Rejected(reason.message().to_string()))?;
    Ok(tree.current())
}

/// Inclusive bounds on the length of a generated value
///
/// An absent maximum means "unbounded", drawn as at most [`UNBOUNDED_EXTENT`]
/// symbols beyond the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub min: usize,
    pub max: Option<usize>,
}
impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 0, max: None }
    }
}
impl SizeRange {
    #[must_use]
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// A range holding exactly one length
    #[must_use]
    pub fn exact(size: usize) -> Self {
        Self {
            min: size,
            max: Some(size),
        }
    }

    /// Checks that the minimum does not exceed the maximum
    pub fn validate(&self) -> Result<()> {
        match self.max {
            Some(max) if max < self.min => {
                ConfigError::InvalidSizeRange { min: self.min, max }.reject()
            }
            _ => Ok(()),
        }
    }

    /// The concrete upper bound used for drawing
    #[must_use]
    pub fn upper(&self) -> usize {
        self.max.unwrap_or(self.min + UNBOUNDED_EXTENT)
    }

    /// Validated range of lengths to draw from
    pub fn to_range(&self) -> Result<RangeInclusive<usize>> {
        self.validate()?;
        Ok(self.min..=self.upper())
    }

    /// Whether `len` lies within the range (unbounded ranges accept any length above the minimum)
    #[must_use]
    pub fn contains(&self, len: usize) -> bool {
        match self.max {
            Some(max) => (self.min..=max).contains(&len),
            None => len >= self.min,
        }
    }
}

/// Inclusive bounds on the number of records in a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRange {
    pub min: usize,
    pub max: usize,
}
impl Default for ReadRange {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}
impl ReadRange {
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn to_range(&self) -> Result<RangeInclusive<usize>> {
        if self.min > self.max {
            return ConfigError::InvalidReadRange {
                min: self.min,
                max: self.max,
            }
            .reject();
        }
        Ok(self.min..=self.max)
    }
}
