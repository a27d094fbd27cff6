//! Genome codec: fixed-length binary selection vectors.
//!
//! A [`Genome`] carries one gene per catalog position; a `true` gene selects
//! the parcel at that position. The codec between gene vectors and selected
//! index lists is lossless and order-preserving. Feasibility (selected count
//! within bounds) is *not* the codec's concern: construction via
//! [`Genome::random_feasible`] yields feasible genomes by sampling, and
//! [`repair`](crate::repair::repair) restores feasibility after variation.

use crate::config::SelectionBounds;
use rand::seq::index;
use rand::Rng;

/// Binary selection vector over a parcel catalog.
///
/// Length equals the catalog length everywhere a genome meets a catalog;
/// that contract is upheld by construction and debug-asserted at evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome {
    genes: Vec<bool>,
}

impl Genome {
    /// A genome of `len` genes with nothing selected.
    pub fn empty(len: usize) -> Self {
        Self {
            genes: vec![false; len],
        }
    }

    /// Wraps a raw gene vector.
    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// Builds a genome of `len` genes with exactly the given positions
    /// selected.
    ///
    /// Inverse of [`selected_indices`](Self::selected_indices).
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= len`.
    pub fn from_selected(len: usize, selected: &[usize]) -> Self {
        let mut genes = vec![false; len];
        for &index in selected {
            genes[index] = true;
        }
        Self { genes }
    }

    /// Creates a random genome whose selected count lies within `bounds`.
    ///
    /// Samples a count uniformly from `[bounds.min, bounds.max]`, then picks
    /// that many distinct positions uniformly at random. The result is
    /// feasible at birth; no repair needed.
    ///
    /// # Panics
    ///
    /// Panics if `bounds.max > len` (such bounds are rejected by config
    /// validation before any genome is created).
    pub fn random_feasible<R: Rng>(len: usize, bounds: &SelectionBounds, rng: &mut R) -> Self {
        assert!(
            bounds.max <= len,
            "selection bounds {}..={} do not fit a genome of length {len}",
            bounds.min,
            bounds.max
        );

        let count = rng.random_range(bounds.min..=bounds.max);
        let mut genes = vec![false; len];
        for position in index::sample(rng, len, count) {
            genes[position] = true;
        }
        Self { genes }
    }

    /// Number of genes (equals the catalog length).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` for the zero-length genome.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The raw gene slice.
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Whether the parcel at `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.genes[index]
    }

    /// Sets the gene at `index`.
    pub fn set(&mut self, index: usize, selected: bool) {
        self.genes[index] = selected;
    }

    /// Flips the gene at `index`.
    pub fn flip(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }

    /// Number of selected parcels (popcount).
    pub fn selected_count(&self) -> usize {
        self.genes.iter().filter(|&&gene| gene).count()
    }

    /// Iterates over selected positions in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(index, &gene)| gene.then_some(index))
    }

    /// Selected positions in ascending order.
    ///
    /// Inverse of [`from_selected`](Self::from_selected).
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_has_no_selection() {
        let genome = Genome::empty(8);
        assert_eq!(genome.len(), 8);
        assert_eq!(genome.selected_count(), 0);
        assert!(genome.selected_indices().is_empty());
    }

    #[test]
    fn test_codec_round_trip() {
        let genome = Genome::from_selected(6, &[0, 2, 5]);
        assert_eq!(genome.selected_indices(), vec![0, 2, 5]);
        assert_eq!(genome.selected_count(), 3);
        assert!(genome.is_selected(2));
        assert!(!genome.is_selected(1));
    }

    #[test]
    fn test_flip_and_set() {
        let mut genome = Genome::empty(4);
        genome.set(1, true);
        genome.flip(3);
        genome.flip(1);
        assert_eq!(genome.selected_indices(), vec![3]);
    }

    #[test]
    fn test_random_feasible_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = SelectionBounds::new(3, 5);

        for _ in 0..200 {
            let genome = Genome::random_feasible(10, &bounds, &mut rng);
            let count = genome.selected_count();
            assert!(
                (3..=5).contains(&count),
                "expected count in 3..=5, got {count}"
            );
            // Sampled positions must be distinct by construction.
            let indices = genome.selected_indices();
            assert_eq!(indices.len(), count);
        }
    }

    #[test]
    fn test_random_feasible_exact_bound() {
        // min == max == len: the only feasible genome is all-selected.
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = SelectionBounds::new(4, 4);
        let genome = Genome::random_feasible(4, &bounds, &mut rng);
        assert_eq!(genome.selected_count(), 4);
    }

    #[test]
    #[should_panic(expected = "do not fit a genome")]
    fn test_random_feasible_rejects_oversized_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        Genome::random_feasible(3, &SelectionBounds::new(2, 7), &mut rng);
    }

    proptest! {
        #[test]
        fn prop_codec_round_trips(genes in proptest::collection::vec(any::<bool>(), 0..64)) {
            let genome = Genome::from_genes(genes.clone());
            let rebuilt = Genome::from_selected(genes.len(), &genome.selected_indices());
            prop_assert_eq!(genome, rebuilt);
        }

        #[test]
        fn prop_selected_count_matches_indices(genes in proptest::collection::vec(any::<bool>(), 0..64)) {
            let genome = Genome::from_genes(genes);
            prop_assert_eq!(genome.selected_count(), genome.selected_indices().len());
        }
    }
}
