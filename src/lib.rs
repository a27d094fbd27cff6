//! Constrained genetic-algorithm engine for land-parcel selection.
//!
//! Searches for a subset of candidate parcels that best satisfies a
//! multi-criteria objective (cost, environmental impact, value appreciation,
//! housing capacity, distance, mobility, infrastructure) under hard
//! constraints: minimum average appreciation, minimum average housing
//! capacity, an optional budget ceiling, and a bounded selected-parcel
//! count. Constraint violations are hard rejects (fitness 0), never graded
//! penalties.
//!
//! # Key Types
//!
//! - [`Catalog`] / [`Parcel`]: The immutable search space
//! - [`Genome`]: Fixed-length binary selection vector over the catalog
//! - [`FitnessPolicy`]: Scoring calibration ([`Weighted`](FitnessPolicy::Weighted)
//!   or [`Convex`](FitnessPolicy::Convex)) with hard-reject constraints
//! - [`SearchConfig`]: Run parameters with fail-fast validation
//! - [`SearchRunner`]: The generational loop; returns a [`SearchResult`]
//!
//! # Submodules
//!
//! - [`operators`]: Uniform crossover and single-point mutation
//! - [`repair`]: Cardinality repair to the configured selection bounds
//! - [`selection`]: Tournament parent selection
//!
//! # Quick Start
//!
//! ```
//! use parcelopt::{Catalog, FitnessPolicy, SearchConfig, SearchRunner, SelectionBounds};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // A synthetic catalog for demonstration; real callers bring their own
//! // parcel data.
//! let mut rng = StdRng::seed_from_u64(9);
//! let catalog = Catalog::synthetic(15, 220_000.0, &mut rng);
//!
//! let config = SearchConfig::default()
//!     .with_generations(40)
//!     .with_population_size(24)
//!     .with_bounds(SelectionBounds::new(3, 6))
//!     .with_seed(42);
//!
//! let result = SearchRunner::run(&catalog, &FitnessPolicy::convex(), &config)?;
//! assert!((3..=6).contains(&result.report.selected_count));
//! # Ok::<(), parcelopt::ConfigError>(())
//! ```
//!
//! Runs are reproducible: a fixed [`SearchConfig::seed`] drives a single
//! sequential random source through every stochastic operator, and fitness
//! evaluation (optionally parallel via [`SearchConfig::parallel`]) draws no
//! randomness at all.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - Michalewicz & Schoenauer (1996), *Evolutionary Algorithms for
//!   Constrained Parameter Optimization Problems*

mod catalog;
mod config;
mod fitness;
mod genome;
pub mod operators;
pub mod repair;
mod runner;
pub mod selection;

pub use catalog::{Catalog, Parcel};
pub use config::{ConfigError, SearchConfig, SelectionBounds};
pub use fitness::{Attributes, Constraints, ConvexWeights, Evaluation, FitnessPolicy, Weights};
pub use genome::Genome;
pub use runner::{SearchResult, SearchRunner, MUTATION_RATE};
