//! Parent selection.
//!
//! One strategy is provided: k-way tournament over the current generation's
//! fitness values. Entrants are drawn **without replacement**, so no genome
//! competes against itself and a tournament of size `k == fitness.len()` is
//! a deterministic argmax. Higher `k` means stronger selection pressure.
//!
//! Selection assumes **maximization** (higher fitness = better) and never
//! mutates the population; it only returns an index into it.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

/// Tournament selection: draw `k` distinct population indices, return the
/// one with the highest fitness.
///
/// Ties go to the earliest-drawn maximal entrant. Draw order is random, so
/// tied candidates still win with equal probability over repeated calls.
///
/// # Complexity
/// O(k) per selection.
///
/// # Panics
/// Panics if `k` is zero or exceeds `fitness.len()`.
pub fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    assert!(
        (1..=fitness.len()).contains(&k),
        "tournament size {k} must be within 1..={}",
        fitness.len()
    );

    let entrants = index::sample(rng, fitness.len(), k);
    let mut winner = entrants.index(0);
    for position in 1..entrants.len() {
        let candidate = entrants.index(position);
        // Strict comparison keeps the earliest-drawn maximal entrant.
        if fitness[candidate] > fitness[winner] {
            winner = candidate;
        }
    }
    winner
}
