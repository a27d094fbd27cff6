//! Variation operators: recombination and mutation.
//!
//! [`uniform_crossover`] mixes two parents gene-by-gene and returns two
//! children; [`point_mutation`] flips a single gene in place. Both operators
//! are cardinality-oblivious: they may leave a child outside the selection
//! bounds, and the breeding loop runs [`repair`](crate::repair::repair)
//! immediately afterward.
//!
//! # References
//!
//! - Syswerda, G. (1989). "Uniform Crossover in Genetic Algorithms"

use crate::genome::Genome;
use rand::Rng;

/// Uniform crossover over two equal-length parents.
///
/// Walks the gene positions once; at each, with probability 0.5 the children
/// keep the parental genes in order, otherwise they receive them swapped.
/// At every position one child carries `a`'s gene and the other carries
/// `b`'s, so the combined gene multiset is conserved.
///
/// # Complexity
/// O(L) for parents of length L.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn uniform_crossover<R: Rng>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
    assert_eq!(a.len(), b.len(), "crossover parents must have equal length");

    let mut first = Vec::with_capacity(a.len());
    let mut second = Vec::with_capacity(b.len());
    for (gene_a, gene_b) in a.genes().iter().zip(b.genes()) {
        if rng.random_bool(0.5) {
            first.push(*gene_a);
            second.push(*gene_b);
        } else {
            first.push(*gene_b);
            second.push(*gene_a);
        }
    }
    (Genome::from_genes(first), Genome::from_genes(second))
}

/// Flips one uniformly random gene in place.
///
/// Moves the selected count by exactly one in either direction.
///
/// # Panics
/// Panics if the genome has no genes.
pub fn point_mutation<R: Rng>(genome: &mut Genome, rng: &mut R) {
    assert!(!genome.is_empty(), "cannot mutate a zero-length genome");
    let position = rng.random_range(0..genome.len());
    genome.flip(position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_self_crossover_is_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        let parent = Genome::from_selected(12, &[0, 3, 7, 11]);

        for _ in 0..50 {
            let (first, second) = uniform_crossover(&parent, &parent, &mut rng);
            assert_eq!(first, parent);
            assert_eq!(second, parent);
        }
    }

    #[test]
    fn test_crossover_conserves_genes_per_position() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Genome::from_selected(16, &[0, 1, 2, 3, 8, 9]);
        let b = Genome::from_selected(16, &[4, 5, 6, 7, 8, 9]);

        for _ in 0..100 {
            let (first, second) = uniform_crossover(&a, &b, &mut rng);
            for index in 0..a.len() {
                let parents = (a.is_selected(index), b.is_selected(index));
                let children = (first.is_selected(index), second.is_selected(index));
                let swapped = (children.1, children.0);
                assert!(children == parents || swapped == parents);
            }
            assert_eq!(
                first.selected_count() + second.selected_count(),
                a.selected_count() + b.selected_count()
            );
        }
    }

    #[test]
    fn test_crossover_actually_mixes() {
        // Complementary parents: any position kept from one parent and
        // swapped at another makes the child differ from both.
        let mut rng = StdRng::seed_from_u64(11);
        let all = Genome::from_genes(vec![true; 64]);
        let none = Genome::empty(64);

        let (first, _) = uniform_crossover(&all, &none, &mut rng);
        let count = first.selected_count();
        assert!(
            count > 0 && count < 64,
            "64 fair coin flips produced a pure copy (count {count})"
        );
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_crossover_length_mismatch_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        uniform_crossover(&Genome::empty(4), &Genome::empty(5), &mut rng);
    }

    #[test]
    fn test_point_mutation_flips_exactly_one_gene() {
        let mut rng = StdRng::seed_from_u64(23);

        for _ in 0..100 {
            let before = Genome::from_selected(10, &[1, 4, 6]);
            let mut after = before.clone();
            point_mutation(&mut after, &mut rng);

            let flipped = (0..10)
                .filter(|&i| before.is_selected(i) != after.is_selected(i))
                .count();
            assert_eq!(flipped, 1);

            let delta = after.selected_count() as i64 - before.selected_count() as i64;
            assert_eq!(delta.abs(), 1);
        }
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn test_point_mutation_empty_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut genome = Genome::empty(0);
        point_mutation(&mut genome, &mut rng);
    }
}
