//! Run parameters for the search.
//!
//! [`SearchConfig`] holds everything the generational loop needs beyond the
//! catalog and the fitness policy. Degenerate parameter combinations are
//! configuration errors: [`SearchConfig::validate_for`] rejects them with a
//! descriptive [`ConfigError`] before the loop starts, rather than letting a
//! run misbehave midway.

use crate::catalog::Catalog;
use thiserror::Error;

/// Admissible range for the number of selected parcels.
///
/// Inclusive on both ends. Every genome the engine breeds is kept inside
/// these bounds by construction or by [`repair`](crate::repair::repair).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionBounds {
    /// Minimum selected count.
    pub min: usize,

    /// Maximum selected count.
    pub max: usize,
}

impl SelectionBounds {
    /// Creates bounds without validating them; validation happens with the
    /// rest of the configuration.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `count` lies within the bounds.
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl Default for SelectionBounds {
    fn default() -> Self {
        Self { min: 3, max: 10 }
    }
}

/// Rejection reasons for a degenerate configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Breeding needs at least two genomes to pick parents from.
    #[error("population_size must be at least 2, got {got}")]
    PopulationTooSmall { got: usize },

    /// A run of zero generations would never rank a population.
    #[error("generations must be at least 1")]
    ZeroGenerations,

    /// Tournaments draw without replacement, so the size is capped by the
    /// population; a size below 2 would exert no selection pressure.
    #[error("tournament_size must be between 2 and population_size ({population}), got {got}")]
    InvalidTournamentSize { got: usize, population: usize },

    /// `min > max` admits no selected count at all.
    #[error("selection bounds admit no count: min ({min}) exceeds max ({max})")]
    EmptyBounds { min: usize, max: usize },

    /// The empty selection always evaluates to fitness 0; requiring at least
    /// one parcel keeps the search meaningful.
    #[error("bounds.min must be at least 1")]
    ZeroMinimumSelection,

    /// More parcels than the catalog holds can never be selected, and repair
    /// would not terminate.
    #[error("bounds.max ({max}) exceeds the catalog size ({catalog})")]
    BoundsExceedCatalog { max: usize, catalog: usize },
}

/// Parameters controlling one optimization run.
///
/// # Defaults
///
/// ```
/// use parcelopt::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.generations, 80);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use parcelopt::{SearchConfig, SelectionBounds};
///
/// let config = SearchConfig::default()
///     .with_generations(120)
///     .with_bounds(SelectionBounds::new(4, 8))
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Number of generations to run. The generation count is the sole
    /// termination condition; there is no early stopping.
    pub generations: usize,

    /// Number of genomes per generation. Rebuilt in full every generation
    /// from one elite plus bred offspring.
    pub population_size: usize,

    /// Tournament size `k`: each parent is the best of `k` genomes drawn
    /// without replacement. Must satisfy `2 <= k <= population_size`.
    pub tournament_size: usize,

    /// Admissible selected-count range.
    pub bounds: SelectionBounds,

    /// Seed for the run's random source. `None` seeds from entropy; a fixed
    /// seed makes the whole run reproducible.
    pub seed: Option<u64>,

    /// Evaluate each generation's fitness in parallel with rayon.
    ///
    /// Evaluation draws no randomness, so this changes neither the RNG
    /// stream nor the result. Worth enabling for large catalogs; for small
    /// ones the fork overhead dominates.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            generations: 80,
            population_size: 50,
            tournament_size: 3,
            bounds: SelectionBounds::default(),
            seed: None,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the selected-count bounds.
    pub fn with_bounds(mut self, bounds: SelectionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the catalog-independent parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                got: self.population_size,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.tournament_size < 2 || self.tournament_size > self.population_size {
            return Err(ConfigError::InvalidTournamentSize {
                got: self.tournament_size,
                population: self.population_size,
            });
        }
        if self.bounds.min > self.bounds.max {
            return Err(ConfigError::EmptyBounds {
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }
        if self.bounds.min == 0 {
            return Err(ConfigError::ZeroMinimumSelection);
        }
        Ok(())
    }

    /// Validates the full configuration against the catalog it will run on.
    pub fn validate_for(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        self.validate()?;
        if self.bounds.max > catalog.len() {
            return Err(ConfigError::BoundsExceedCatalog {
                max: self.bounds.max,
                catalog: catalog.len(),
            });
        }
        Ok(())
    }
}
