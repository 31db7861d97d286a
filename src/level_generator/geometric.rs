//! Geometric level generator.

use rand::prelude::*;
use thiserror::Error;

use crate::level_generator::LevelGenerator;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum number of levels must be non-zero.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The probability `p` must be in the range `(0, 1)`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// Starting from level 0, a Bernoulli trial with success probability `p` is
/// repeated; every success promotes the node by one level and the first
/// failure stops the draw. The draw is truncated at `total - 1`, so a node is
/// present at level `n` with probability `p^n` for every `n < total`.
///
/// With `p = 0.5` this is the classic fair coin flip, giving an expected node
/// height of about two and an expected `O(log n)` search path.
#[derive(Debug, Clone)]
pub struct Geometric {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `total` must be greater or
    /// equal to 1.
    #[inline]
    pub fn new(total: usize, p: f64) -> Result<Self, GeometricError> {
        Self::validate(total, p)?;
        Ok(Self::unchecked(total, p, SmallRng::from_rng(&mut rand::rng())))
    }

    /// Create a new geometric level generator whose draws are reproducible
    /// from `seed`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Geometric::new`].
    #[inline]
    pub fn with_seed(total: usize, p: f64, seed: u64) -> Result<Self, GeometricError> {
        Self::validate(total, p)?;
        Ok(Self::unchecked(total, p, SmallRng::seed_from_u64(seed)))
    }

    /// A fair coin generator with `total` levels.
    ///
    /// The caller guarantees `total >= 1`.
    pub(crate) fn fair(total: usize) -> Self {
        debug_assert!(total >= 1, "total must be non-zero");
        Self::unchecked(total, 0.5, SmallRng::from_rng(&mut rand::rng()))
    }

    /// The probability that a node is promoted to the next level.
    #[must_use]
    #[inline]
    pub const fn p(&self) -> f64 {
        self.p
    }

    fn validate(total: usize, p: f64) -> Result<(), GeometricError> {
        if total == 0 {
            return Err(GeometricError::ZeroMax);
        }
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(())
    }

    const fn unchecked(total: usize, p: f64, rng: SmallRng) -> Self {
        Geometric { total, p, rng }
    }
}

impl LevelGenerator for Geometric {
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    #[inline]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "level is bounded by total - 1"
    )]
    fn level(&mut self) -> usize {
        let mut level = 0;
        while level + 1 < self.total && self.rng.random_bool(self.p) {
            level += 1;
        }
        level
    }
}
