//! Fitness evaluation for parcel selections.
//!
//! A [`FitnessPolicy`] maps a genome and its catalog to a scalar score.
//! Evaluation is constraint-first: the attributes of the selected parcels are
//! summed, per-parcel means derived, and the hard constraints checked on
//! those means. Any violation, and the empty selection, scores exactly 0.0.
//! That is a hard reject rather than a graded penalty, so an infeasible
//! selection never outranks a feasible one.
//!
//! Two calibrations share the interface:
//!
//! - [`FitnessPolicy::Weighted`]: rewards housing and appreciation totals
//!   plus mobility and infrastructure means, and subtracts impact, distance,
//!   and cost penalty terms. Its defaults carry a mean-cost ceiling.
//! - [`FitnessPolicy::Convex`]: a convex combination of the four reward
//!   totals with no penalty terms, for callers that want budget pressure to
//!   come from the constraint set alone.
//!
//! Evaluation is a pure function of `(genome, catalog, policy)` and draws no
//! randomness, so it is safe to call from parallel workers.
//!
//! # References
//!
//! - Goldberg, D. E. (1989). "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Coello Coello, C. A. (2002). "Theoretical and numerical
//!   constraint-handling techniques used with evolutionary algorithms"

use crate::catalog::{Catalog, Parcel};
use crate::genome::Genome;

// ============================================================================
// Constraints
// ============================================================================

/// Hard feasibility constraints, checked on per-parcel means before any
/// reward is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    /// Minimum mean value appreciation, in percent.
    pub min_mean_appreciation: f64,

    /// Minimum mean housing capacity, in dwelling units.
    pub min_mean_housing: f64,

    /// Optional ceiling on the mean parcel cost. `None` disables the check;
    /// [`FitnessPolicy::weighted`] sets it, [`FitnessPolicy::convex`] leaves
    /// it off.
    pub max_mean_cost: Option<f64>,
}

impl Constraints {
    /// Whether a selection with these per-parcel means passes every check.
    pub fn satisfied_by(&self, means: &Attributes) -> bool {
        if means.appreciation < self.min_mean_appreciation {
            return false;
        }
        if means.housing < self.min_mean_housing {
            return false;
        }
        if let Some(ceiling) = self.max_mean_cost {
            if means.cost > ceiling {
                return false;
            }
        }
        true
    }
}

impl Default for Constraints {
    /// The shared constraint pair with no cost ceiling.
    fn default() -> Self {
        Self {
            min_mean_appreciation: 20.0,
            min_mean_housing: 15.0,
            max_mean_cost: None,
        }
    }
}

// ============================================================================
// Weights
// ============================================================================

/// Coefficients for the [`FitnessPolicy::Weighted`] calibration.
///
/// Reward terms apply to housing and appreciation *totals* and to mobility
/// and infrastructure *means*; penalty terms apply to the impact total, the
/// distance mean, and the cost total scaled down by `cost_divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    /// Reward per housing unit (total).
    pub housing: f64,

    /// Reward per appreciation point (total).
    pub appreciation: f64,

    /// Reward per mobility point (mean).
    pub mobility: f64,

    /// Reward per infrastructure point (mean).
    pub infrastructure: f64,

    /// Penalty per impact point (total).
    pub impact: f64,

    /// Penalty per distance unit (mean).
    pub distance: f64,

    /// The cost total is divided by this before subtraction.
    pub cost_divisor: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            housing: 10.0,
            appreciation: 5.0,
            mobility: 20.0,
            infrastructure: 20.0,
            impact: 15.0,
            distance: 10.0,
            cost_divisor: 1_000.0,
        }
    }
}

/// Normalized coefficients for the [`FitnessPolicy::Convex`] calibration.
///
/// Always sums to 1; build through [`ConvexWeights::new`] to renormalize an
/// arbitrary non-negative weight set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvexWeights {
    /// Share of the housing total.
    pub housing: f64,

    /// Share of the appreciation total.
    pub appreciation: f64,

    /// Share of the mobility total.
    pub mobility: f64,

    /// Share of the infrastructure total.
    pub infrastructure: f64,
}

impl ConvexWeights {
    /// Builds a weight set normalized so the four shares sum to 1.
    ///
    /// # Panics
    ///
    /// Panics if any weight is negative or all four are zero.
    pub fn new(housing: f64, appreciation: f64, mobility: f64, infrastructure: f64) -> Self {
        assert!(
            housing >= 0.0 && appreciation >= 0.0 && mobility >= 0.0 && infrastructure >= 0.0,
            "convex weights must be non-negative"
        );
        let sum = housing + appreciation + mobility + infrastructure;
        assert!(sum > 0.0, "at least one convex weight must be positive");
        Self {
            housing: housing / sum,
            appreciation: appreciation / sum,
            mobility: mobility / sum,
            infrastructure: infrastructure / sum,
        }
    }
}

impl Default for ConvexWeights {
    fn default() -> Self {
        Self {
            housing: 0.40,
            appreciation: 0.30,
            mobility: 0.15,
            infrastructure: 0.15,
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// The seven parcel attributes aggregated over a selection.
///
/// Used twice per evaluation: once as totals (plain sums) and once as
/// per-parcel means (totals divided by the selected count). Integer parcel
/// attributes widen to `f64` on accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub cost: f64,
    pub impact: f64,
    pub appreciation: f64,
    pub housing: f64,
    pub distance: f64,
    pub mobility: f64,
    pub infrastructure: f64,
}

impl Attributes {
    fn accumulate(&mut self, parcel: &Parcel) {
        self.cost += parcel.cost;
        self.impact += f64::from(parcel.impact);
        self.appreciation += parcel.appreciation;
        self.housing += f64::from(parcel.housing);
        self.distance += parcel.distance;
        self.mobility += f64::from(parcel.mobility);
        self.infrastructure += f64::from(parcel.infrastructure);
    }

    fn per_parcel(&self, count: usize) -> Self {
        let divisor = count as f64;
        Self {
            cost: self.cost / divisor,
            impact: self.impact / divisor,
            appreciation: self.appreciation / divisor,
            housing: self.housing / divisor,
            distance: self.distance / divisor,
            mobility: self.mobility / divisor,
            infrastructure: self.infrastructure / divisor,
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Decomposed result of evaluating one genome.
///
/// Carries the scalar fitness together with everything that went into it, so
/// callers can inspect or render a selection without re-deriving aggregates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Scalar score; 0.0 when infeasible.
    pub fitness: f64,

    /// Number of selected parcels.
    pub selected_count: usize,

    /// Whether the selection is non-empty and passes every constraint.
    pub feasible: bool,

    /// Attribute sums over the selected parcels.
    pub totals: Attributes,

    /// Per-parcel attribute means. All zero for the empty selection.
    pub means: Attributes,
}

// ============================================================================
// FitnessPolicy
// ============================================================================

/// Scoring calibration: constraints plus a reward formula.
///
/// Either variant can be built with any [`Constraints`] value; the
/// [`weighted`](Self::weighted) and [`convex`](Self::convex) constructors
/// supply the standard pairings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessPolicy {
    /// Mixed totals-and-means calibration with reward and penalty terms.
    Weighted {
        constraints: Constraints,
        weights: Weights,
    },

    /// Reward-only convex combination of the four benefit totals.
    Convex {
        constraints: Constraints,
        weights: ConvexWeights,
    },
}

impl FitnessPolicy {
    /// The weighted calibration with its standard constraint set, including
    /// a mean-cost ceiling of 250 000.
    pub fn weighted() -> Self {
        Self::Weighted {
            constraints: Constraints {
                max_mean_cost: Some(250_000.0),
                ..Constraints::default()
            },
            weights: Weights::default(),
        }
    }

    /// The convex calibration with the shared constraints and no cost
    /// ceiling.
    pub fn convex() -> Self {
        Self::Convex {
            constraints: Constraints::default(),
            weights: ConvexWeights::default(),
        }
    }

    /// The constraint set this policy checks.
    pub fn constraints(&self) -> &Constraints {
        match self {
            Self::Weighted { constraints, .. } | Self::Convex { constraints, .. } => constraints,
        }
    }

    /// Scores a genome against a catalog.
    ///
    /// Returns 0.0 for the empty selection and for any constraint violation.
    pub fn evaluate(&self, genome: &Genome, catalog: &Catalog) -> f64 {
        self.report(genome, catalog).fitness
    }

    /// Scores a genome and returns the full decomposition.
    pub fn report(&self, genome: &Genome, catalog: &Catalog) -> Evaluation {
        debug_assert_eq!(
            genome.len(),
            catalog.len(),
            "genome length must match the catalog"
        );

        let mut totals = Attributes::default();
        let mut selected_count = 0;
        for index in genome.selected() {
            totals.accumulate(&catalog[index]);
            selected_count += 1;
        }

        if selected_count == 0 {
            return Evaluation {
                fitness: 0.0,
                selected_count: 0,
                feasible: false,
                totals,
                means: Attributes::default(),
            };
        }

        let means = totals.per_parcel(selected_count);
        let feasible = self.constraints().satisfied_by(&means);
        let fitness = if feasible {
            self.score(&totals, &means)
        } else {
            0.0
        };

        Evaluation {
            fitness,
            selected_count,
            feasible,
            totals,
            means,
        }
    }

    fn score(&self, totals: &Attributes, means: &Attributes) -> f64 {
        match self {
            Self::Weighted { weights, .. } => {
                let reward = totals.housing * weights.housing
                    + totals.appreciation * weights.appreciation
                    + means.mobility * weights.mobility
                    + means.infrastructure * weights.infrastructure;
                let penalty = totals.impact * weights.impact
                    + means.distance * weights.distance
                    + totals.cost / weights.cost_divisor;
                reward - penalty
            }
            Self::Convex { weights, .. } => {
                totals.housing * weights.housing
                    + totals.appreciation * weights.appreciation
                    + totals.mobility * weights.mobility
                    + totals.infrastructure * weights.infrastructure
            }
        }
    }
}
