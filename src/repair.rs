//! Cardinality repair.
//!
//! Crossover and mutation change the selected count freely; [`repair`]
//! restores the `bounds.min..=bounds.max` invariant by flipping uniformly
//! random genes of the overrepresented kind, one at a time, until the count
//! is back in range. Already-feasible genomes are left untouched, so the
//! operator composes cheaply after every variation step.
//!
//! One pass splits the gene positions into selected and unselected index
//! vectors; each step then draws a victim in O(1) with `swap_remove`, so a
//! full repair costs O(L) for a genome of length L.
//!
//! # References
//!
//! - Michalewicz, Z. & Schoenauer, M. (1996). "Evolutionary algorithms for
//!   constrained parameter optimization problems"

use crate::config::SelectionBounds;
use crate::genome::Genome;
use rand::Rng;

/// Clamps the selected count of `genome` into `bounds`.
///
/// Over the maximum: deselects uniformly random selected genes. Under the
/// minimum: selects uniformly random unselected genes. Each flip moves the
/// count by exactly one toward the violated bound, so the loop runs
/// `|count - bound|` times and always terminates when
/// `bounds.min <= genome.len()` (config validation guarantees the stronger
/// `bounds.max <= genome.len()` before any run).
pub fn repair<R: Rng>(genome: &mut Genome, bounds: &SelectionBounds, rng: &mut R) {
    let mut count = genome.selected_count();
    if bounds.contains(count) {
        return;
    }

    let mut selected = Vec::new();
    let mut unselected = Vec::new();
    for index in 0..genome.len() {
        if genome.is_selected(index) {
            selected.push(index);
        } else {
            unselected.push(index);
        }
    }

    while count > bounds.max {
        let pick = rng.random_range(0..selected.len());
        genome.set(selected.swap_remove(pick), false);
        count -= 1;
    }

    while count < bounds.min {
        let pick = rng.random_range(0..unselected.len());
        genome.set(unselected.swap_remove(pick), true);
        count += 1;
    }
}
