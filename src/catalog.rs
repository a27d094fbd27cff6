//! Parcel catalog: the immutable search space.
//!
//! A [`Catalog`] is an ordered sequence of [`Parcel`] records, fixed for the
//! duration of one optimization run. Parcels have no identity of their own;
//! every engine operation refers to them by catalog position, which is also
//! the gene position in a [`Genome`](crate::Genome).
//!
//! [`Catalog::synthetic`] generates a random catalog for tests, benchmarks,
//! and demos. The engine itself never calls it; production callers supply
//! their own parcel data.

use rand::Rng;

/// One candidate land parcel.
///
/// Attributes are read-only once the catalog is built. Score attributes
/// (`impact`, `mobility`, `infrastructure`) are graded 1–10.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parcel {
    /// Acquisition cost, in currency units.
    pub cost: f64,

    /// Environmental-impact score, 1 (benign) to 10 (severe).
    pub impact: u8,

    /// Expected value appreciation, in percent.
    pub appreciation: f64,

    /// Housing capacity, in dwelling units.
    pub housing: u32,

    /// Distance to the urban center.
    pub distance: f64,

    /// Mobility-access score, 1 to 10.
    pub mobility: u8,

    /// Infrastructure score, 1 to 10.
    pub infrastructure: u8,
}

/// Ordered, immutable sequence of parcels.
///
/// The catalog defines the genome length: a genome carries one gene per
/// catalog position. A run is only admissible when the configured selection
/// bounds fit the catalog (`bounds.max <= catalog.len()`), which
/// [`SearchConfig::validate_for`](crate::SearchConfig::validate_for) checks
/// before the loop starts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    parcels: Vec<Parcel>,
}

impl Catalog {
    /// Wraps an existing parcel list.
    pub fn new(parcels: Vec<Parcel>) -> Self {
        Self { parcels }
    }

    /// Number of parcels.
    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    /// Returns `true` when the catalog holds no parcels.
    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    /// Returns the parcel at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Parcel> {
        self.parcels.get(index)
    }

    /// Iterates over the parcels in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parcel> {
        self.parcels.iter()
    }

    /// Generates `count` random parcels.
    ///
    /// Attribute ranges (uniform draws):
    ///
    /// - cost: `[0.7, 1.3] * cost_ceiling`, redrawn while above the ceiling,
    ///   so every listed parcel is individually affordable
    /// - impact, mobility, infrastructure: 1–10
    /// - appreciation: 5–50 percent
    /// - housing: 5–30 units
    /// - distance: 1–20
    ///
    /// # Panics
    ///
    /// Panics if `cost_ceiling` is not strictly positive.
    pub fn synthetic<R: Rng>(count: usize, cost_ceiling: f64, rng: &mut R) -> Self {
        assert!(
            cost_ceiling > 0.0,
            "cost_ceiling must be positive, got {cost_ceiling}"
        );

        let parcels = (0..count)
            .map(|_| {
                let cost = loop {
                    let drawn = rng.random_range(0.7 * cost_ceiling..=1.3 * cost_ceiling);
                    if drawn <= cost_ceiling {
                        break drawn;
                    }
                };
                Parcel {
                    cost,
                    impact: rng.random_range(1..=10),
                    appreciation: rng.random_range(5.0..=50.0),
                    housing: rng.random_range(5..=30),
                    distance: rng.random_range(1.0..=20.0),
                    mobility: rng.random_range(1..=10),
                    infrastructure: rng.random_range(1..=10),
                }
            })
            .collect();

        log::debug!("synthesized catalog of {count} parcels, cost ceiling {cost_ceiling}");
        Self { parcels }
    }
}

impl From<Vec<Parcel>> for Catalog {
    fn from(parcels: Vec<Parcel>) -> Self {
        Self::new(parcels)
    }
}

impl std::ops::Index<usize> for Catalog {
    type Output = Parcel;

    fn index(&self, index: usize) -> &Parcel {
        &self.parcels[index]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Parcel;
    type IntoIter = std::slice::Iter<'a, Parcel>;

    fn into_iter(self) -> Self::IntoIter {
        self.parcels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_synthetic_returns_requested_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let catalog = Catalog::synthetic(100, 250_000.0, &mut rng);
        assert_eq!(catalog.len(), 100);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_synthetic_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let ceiling = 250_000.0;
        let catalog = Catalog::synthetic(200, ceiling, &mut rng);

        for parcel in &catalog {
            assert!(parcel.cost >= 0.7 * ceiling && parcel.cost <= ceiling);
            assert!((1..=10).contains(&parcel.impact));
            assert!((5.0..=50.0).contains(&parcel.appreciation));
            assert!((5..=30).contains(&parcel.housing));
            assert!((1.0..=20.0).contains(&parcel.distance));
            assert!((1..=10).contains(&parcel.mobility));
            assert!((1..=10).contains(&parcel.infrastructure));
        }
    }

    #[test]
    fn test_synthetic_is_seed_deterministic() {
        let a = Catalog::synthetic(30, 100_000.0, &mut StdRng::seed_from_u64(9));
        let b = Catalog::synthetic(30, 100_000.0, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_indexing_and_get() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = Catalog::synthetic(5, 1_000.0, &mut rng);

        assert_eq!(catalog.get(0), Some(&catalog[0]));
        assert!(catalog.get(5).is_none());
        assert_eq!(catalog.iter().count(), 5);
    }

    #[test]
    #[should_panic(expected = "cost_ceiling must be positive")]
    fn test_synthetic_rejects_nonpositive_ceiling() {
        let mut rng = StdRng::seed_from_u64(1);
        Catalog::synthetic(5, 0.0, &mut rng);
    }
}
