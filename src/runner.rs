//! Generational loop execution.
//!
//! [`SearchRunner`] orchestrates the complete search: feasible
//! initialization → evaluation and ranking → breeding with elitism →
//! repeat for a fixed number of generations → final champion lookup.
//!
//! The loop is synchronous and sequential; one explicit [`StdRng`] drives
//! every stochastic operator, so a fixed [`SearchConfig::seed`] reproduces
//! the whole run. Fitness evaluation draws no randomness and may run on
//! rayon workers without changing the outcome.

use crate::catalog::Catalog;
use crate::config::{ConfigError, SearchConfig};
use crate::fitness::{Evaluation, FitnessPolicy};
use crate::genome::Genome;
use crate::operators::{point_mutation, uniform_crossover};
use crate::repair::repair;
use crate::selection::tournament;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Probability that a freshly bred child receives a single-gene mutation.
pub const MUTATION_RATE: f64 = 0.1;

/// Result of one optimization run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best genome in the final ranking.
    pub best: Genome,

    /// Its fitness (same as `report.fitness`).
    pub best_fitness: f64,

    /// Decomposed evaluation of the best genome.
    pub report: Evaluation,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness at each ranking: one entry for the initial population
    /// plus one per generation, `generations + 1` in total. Non-decreasing,
    /// since the champion survives every breeding step.
    pub fitness_history: Vec<f64>,
}

/// A genome paired with its fitness for one generation's ranking.
struct Scored {
    genome: Genome,
    fitness: f64,
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```
/// use parcelopt::{Catalog, FitnessPolicy, SearchConfig, SearchRunner};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let catalog = Catalog::synthetic(12, 200_000.0, &mut rng);
/// let config = SearchConfig::default()
///     .with_generations(10)
///     .with_population_size(12)
///     .with_seed(42);
///
/// let result = SearchRunner::run(&catalog, &FitnessPolicy::weighted(), &config)?;
/// assert!(result.report.selected_count >= 3);
/// # Ok::<(), parcelopt::ConfigError>(())
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search and returns the final champion.
    ///
    /// Fails fast with a [`ConfigError`] when the configuration is
    /// degenerate for this catalog; a constraint-violating selection is not
    /// an error, it simply scores 0.
    pub fn run(
        catalog: &Catalog,
        policy: &FitnessPolicy,
        config: &SearchConfig,
    ) -> Result<SearchResult, ConfigError> {
        config.validate_for(catalog)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        // 1. Initialize a population that is feasible at birth.
        let population: Vec<Genome> = (0..config.population_size)
            .map(|_| Genome::random_feasible(catalog.len(), &config.bounds, &mut rng))
            .collect();

        // 2. Evaluate and rank the initial population.
        let mut ranked = evaluate_and_rank(population, policy, catalog, config.parallel);
        let mut fitness_history = Vec::with_capacity(config.generations + 1);
        fitness_history.push(ranked[0].fitness);
        debug!(
            "initial population of {} ranked, best fitness {:.4}",
            config.population_size, ranked[0].fitness
        );

        // 3. Evolutionary loop: breed, then re-evaluate and re-rank.
        for generation in 0..config.generations {
            let offspring = breed(&ranked, config, &mut rng);
            ranked = evaluate_and_rank(offspring, policy, catalog, config.parallel);
            fitness_history.push(ranked[0].fitness);
            debug!(
                "generation {}/{}: best fitness {:.4}",
                generation + 1,
                config.generations,
                ranked[0].fitness
            );
        }

        // 4. The head of the final ranking is the champion.
        let champion = ranked.swap_remove(0);
        let report = policy.report(&champion.genome, catalog);

        Ok(SearchResult {
            best: champion.genome,
            best_fitness: champion.fitness,
            report,
            generations: config.generations,
            fitness_history,
        })
    }
}

/// Scores every genome and sorts best-first.
///
/// The sort is stable and the fitness function deterministic, so equal runs
/// produce equal rankings regardless of the `parallel` switch.
fn evaluate_and_rank(
    population: Vec<Genome>,
    policy: &FitnessPolicy,
    catalog: &Catalog,
    parallel: bool,
) -> Vec<Scored> {
    let mut scored: Vec<Scored> = if parallel {
        population
            .into_par_iter()
            .map(|genome| Scored {
                fitness: policy.evaluate(&genome, catalog),
                genome,
            })
            .collect()
    } else {
        population
            .into_iter()
            .map(|genome| Scored {
                fitness: policy.evaluate(&genome, catalog),
                genome,
            })
            .collect()
    };

    scored.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}

/// Builds the next generation from a ranked population.
///
/// The champion is cloned through unchanged (elitism, count 1); the rest of
/// the population is refilled pairwise with tournament parents, uniform
/// crossover, repair, and an occasional single-gene mutation. Children
/// arrive in pairs, so one may be dropped to hold the population size.
fn breed<R: Rng>(ranked: &[Scored], config: &SearchConfig, rng: &mut R) -> Vec<Genome> {
    let fitness: Vec<f64> = ranked.iter().map(|scored| scored.fitness).collect();
    let mut next = Vec::with_capacity(config.population_size + 1);

    next.push(ranked[0].genome.clone());

    while next.len() < config.population_size {
        let first = tournament(&fitness, config.tournament_size, rng);
        let second = tournament(&fitness, config.tournament_size, rng);
        let (mut child_a, mut child_b) =
            uniform_crossover(&ranked[first].genome, &ranked[second].genome, rng);

        for child in [&mut child_a, &mut child_b] {
            repair(child, &config.bounds, rng);
            if rng.random_bool(MUTATION_RATE) {
                point_mutation(child, rng);
                repair(child, &config.bounds, rng);
            }
        }

        next.push(child_a);
        next.push(child_b);
    }

    next.truncate(config.population_size);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Parcel;
    use crate::config::SelectionBounds;

    /// A catalog on which every selection satisfies both constraint sets.
    fn easy_catalog(count: usize) -> Catalog {
        let parcels = (0..count)
            .map(|i| Parcel {
                cost: 40_000.0 + 1_000.0 * i as f64,
                impact: (i % 10 + 1) as u8,
                appreciation: 25.0 + i as f64,
                housing: 18 + (i % 5) as u32,
                distance: 2.0 + i as f64,
                mobility: (i % 10 + 1) as u8,
                infrastructure: ((i + 3) % 10 + 1) as u8,
            })
            .collect();
        Catalog::new(parcels)
    }

    fn small_config() -> SearchConfig {
        SearchConfig::default()
            .with_generations(30)
            .with_population_size(20)
            .with_bounds(SelectionBounds::new(3, 5))
            .with_seed(42)
    }

    #[test]
    fn test_end_to_end_small_search() {
        let catalog = easy_catalog(10);

        for policy in [FitnessPolicy::weighted(), FitnessPolicy::convex()] {
            let result = SearchRunner::run(&catalog, &policy, &small_config()).unwrap();

            let count = result.report.selected_count;
            assert!(
                (3..=5).contains(&count),
                "champion selects {count} parcels, expected 3..=5"
            );
            assert!(result.best_fitness > 0.0);
            assert!(result.report.feasible);
            assert_eq!(result.generations, 30);
            assert_eq!(result.best.selected_count(), count);
        }
    }

    #[test]
    fn test_fitness_history_length() {
        let catalog = easy_catalog(10);
        let result =
            SearchRunner::run(&catalog, &FitnessPolicy::weighted(), &small_config()).unwrap();

        // Initial ranking plus one entry per generation.
        assert_eq!(result.fitness_history.len(), 31);
        assert_eq!(
            *result.fitness_history.last().unwrap(),
            result.best_fitness
        );
    }

    #[test]
    fn test_elitism_keeps_best_non_decreasing() {
        let catalog = easy_catalog(12);
        let result =
            SearchRunner::run(&catalog, &FitnessPolicy::weighted(), &small_config()).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness regressed with elitism: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let catalog = easy_catalog(15);
        let policy = FitnessPolicy::weighted();
        let config = small_config().with_seed(7);

        let first = SearchRunner::run(&catalog, &policy, &config).unwrap();
        let second = SearchRunner::run(&catalog, &policy, &config).unwrap();

        assert_eq!(first.best, second.best);
        assert_eq!(first.fitness_history, second.fitness_history);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        // Evaluation draws no randomness, so the parallel switch must not
        // change the outcome of a seeded run.
        let catalog = easy_catalog(15);
        let policy = FitnessPolicy::convex();

        let sequential =
            SearchRunner::run(&catalog, &policy, &small_config().with_parallel(false)).unwrap();
        let parallel =
            SearchRunner::run(&catalog, &policy, &small_config().with_parallel(true)).unwrap();

        assert_eq!(sequential.best, parallel.best);
        assert_eq!(sequential.fitness_history, parallel.fitness_history);
    }

    #[test]
    fn test_rejects_degenerate_configs() {
        let catalog = easy_catalog(6);

        let too_wide = small_config().with_bounds(SelectionBounds::new(3, 9));
        let err = SearchRunner::run(&catalog, &FitnessPolicy::weighted(), &too_wide)
            .unwrap_err();
        assert_eq!(err, ConfigError::BoundsExceedCatalog { max: 9, catalog: 6 });

        let tiny_population = small_config()
            .with_bounds(SelectionBounds::new(2, 4))
            .with_population_size(1);
        let err = SearchRunner::run(&catalog, &FitnessPolicy::weighted(), &tiny_population)
            .unwrap_err();
        assert_eq!(err, ConfigError::PopulationTooSmall { got: 1 });
    }

    #[test]
    fn test_odd_population_size_truncates() {
        // Elite + child pairs overshoots an even target by one; the breeding
        // loop must hold the configured size either way.
        let catalog = easy_catalog(10);

        for population_size in [2, 7, 20] {
            let config = small_config()
                .with_population_size(population_size)
                .with_tournament_size(2)
                .with_generations(5);
            let result =
                SearchRunner::run(&catalog, &FitnessPolicy::weighted(), &config).unwrap();
            assert_eq!(result.fitness_history.len(), 6);
        }
    }

    #[test]
    fn test_improves_over_random_init() {
        // With room to search, 30 generations should beat the initial
        // ranking on this catalog.
        let catalog = easy_catalog(20);
        let config = small_config().with_bounds(SelectionBounds::new(3, 8));
        let result =
            SearchRunner::run(&catalog, &FitnessPolicy::weighted(), &config).unwrap();

        assert!(result.best_fitness >= result.fitness_history[0]);
        assert!(result.best_fitness > 0.0);
    }
}
