//! Decomposition parameters and the pseudo-random source.
//!
//! ```
//! use tensorlib_decomp::{DecompConfig, InitStrategy};
//!
//! let config = DecompConfig::new(3)
//!     .with_tol(1e-6)
//!     .with_max_iter(200)
//!     .with_init(InitStrategy::Random)
//!     .with_random_state(42);
//!
//! assert_eq!(config.validate().unwrap(), 3);
//! ```

use crate::error::{DecompError, DecompResult};
use crate::validation::check_stopping;
use scirs2_core::random::rngs::StdRng;
use scirs2_core::random::{thread_rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Default relative-change tolerance on the SSE.
pub const DEFAULT_TOL: f64 = 1e-4;

/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 500;

/// How the factor matrices are seeded before the first sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InitStrategy {
    /// Independent uniform [0, 1) draws from the configured random source
    Random,
    /// Leading eigenvectors of each unfolding's Gram matrix, sign-stabilized
    #[default]
    Hosvd,
}

impl fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStrategy::Random => write!(f, "random"),
            InitStrategy::Hosvd => write!(f, "hosvd"),
        }
    }
}

impl FromStr for InitStrategy {
    type Err = DecompError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(InitStrategy::Random),
            "hosvd" => Ok(InitStrategy::Hosvd),
            other => Err(DecompError::invalid(format!(
                "Unknown init strategy '{}': expected 'random' or 'hosvd'",
                other
            ))),
        }
    }
}

/// Source of randomness for [`InitStrategy::Random`].
///
/// No process-wide generator is ever mutated: `Entropy` builds a fresh
/// generator per call.
///
/// ```
/// use tensorlib_decomp::RandomState;
///
/// let seeded: RandomState = "7".parse().unwrap();
/// assert!(matches!(seeded, RandomState::Seed(7)));
///
/// let unseeded: RandomState = "none".parse().unwrap();
/// assert!(matches!(unseeded, RandomState::Entropy));
///
/// assert!("seven".parse::<RandomState>().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub enum RandomState {
    /// Fresh generator seeded from the thread-local entropy source
    #[default]
    Entropy,
    /// Deterministic generator from an integer seed
    Seed(u64),
    /// An existing generator handle, used from its current state
    Generator(StdRng),
}

impl RandomState {
    /// Build the generator this state describes.
    pub fn into_rng(self) -> StdRng {
        match self {
            RandomState::Entropy => {
                let seed = thread_rng().random::<u64>();
                StdRng::seed_from_u64(seed)
            }
            RandomState::Seed(seed) => StdRng::seed_from_u64(seed),
            RandomState::Generator(rng) => rng,
        }
    }

    /// Like [`RandomState::into_rng`], leaving `self` untouched.
    pub fn to_rng(&self) -> StdRng {
        self.clone().into_rng()
    }
}

impl From<u64> for RandomState {
    fn from(seed: u64) -> Self {
        RandomState::Seed(seed)
    }
}

impl From<Option<u64>> for RandomState {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(RandomState::Entropy, RandomState::Seed)
    }
}

impl From<StdRng> for RandomState {
    fn from(rng: StdRng) -> Self {
        RandomState::Generator(rng)
    }
}

impl FromStr for RandomState {
    type Err = DecompError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(RandomState::Entropy);
        }
        trimmed.parse::<u64>().map(RandomState::Seed).map_err(|_| {
            DecompError::invalid(format!(
                "'{}' cannot be used as a random seed: expected a non-negative integer or 'none'",
                trimmed
            ))
        })
    }
}

/// Parameters shared by CP and Tucker.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompConfig {
    /// Number of components; required
    pub rank: Option<usize>,
    /// Stop when `|SSE - previous SSE| / previous SSE < tol`
    pub tol: f64,
    /// Maximum number of full sweeps over the axes
    pub max_iter: usize,
    pub init: InitStrategy,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub random_state: RandomState,
}

impl Default for DecompConfig {
    fn default() -> Self {
        Self {
            rank: None,
            tol: DEFAULT_TOL,
            max_iter: DEFAULT_MAX_ITER,
            init: InitStrategy::default(),
            random_state: RandomState::default(),
        }
    }
}

impl DecompConfig {
    /// Defaults with the given rank.
    pub fn new(rank: usize) -> Self {
        Self {
            rank: Some(rank),
            ..Default::default()
        }
    }

    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    pub fn with_random_state(mut self, random_state: impl Into<RandomState>) -> Self {
        self.random_state = random_state.into();
        self
    }

    /// Check every parameter and return the rank.
    ///
    /// # Errors
    ///
    /// [`DecompError::InvalidParameter`] when the rank is missing or zero,
    /// the tolerance is negative or not finite, or `max_iter` is zero.
    pub fn validate(&self) -> DecompResult<usize> {
        let rank = match self.rank {
            None => return Err(DecompError::invalid("rank is a required argument")),
            Some(0) => return Err(DecompError::invalid("rank must be at least 1")),
            Some(r) => r,
        };

        check_stopping(self.tol, self.max_iter)?;
        Ok(rank)
    }
}
