// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistent homology of Vietoris–Rips filtrations.
//!
//! The pipeline enumerates every simplex up to `max_epsilon`, orders them
//! globally (see [`Filtration`]), reduces the unified boundary matrix and
//! reads persistence pairs off the pivots: column j with low i means the class
//! born with simplex i dies when simplex j enters.
//!
//! Vertices and edges that never become a low and whose own column reduces
//! to zero open a class that is still alive at `max_epsilon`. These essential
//! features get `death = max_epsilon` and no death simplex, so "survives the
//! observed range" stays distinguishable from "paired".
//!
//! Unpaired triangles are not reported. No 3-simplices are built, so nothing
//! can ever kill a 2-cycle and every such class would be an artifact of the
//! truncation. Use [`compute_homology`](crate::homology::compute_homology)
//! for β₂ of a surface mesh.

use nalgebra::Point3;
use serde::Serialize;

use crate::builders::build_rips_complex;
use crate::complex::SimplicialComplex;
use crate::config::{HomologyConfig, PERSISTENCE_EPSILON};
use crate::error::{Error, Result};
use crate::filtration::Filtration;
use crate::geometry::{bounding_box_diagonal, check_finite};
use crate::homology::BettiNumbers;
use crate::reduction::reduce;
use crate::simplex::{Simplex, SimplexKey};

/// One (birth, death) interval of a homology class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistencePair {
    /// Homology dimension of the class (dimension of the birth simplex).
    pub dimension: usize,
    pub birth: f64,
    /// Death time, or `max_epsilon` for essential features.
    pub death: f64,
    /// `death - birth`.
    pub persistence: f64,
    /// `persistence > min_persistence`.
    pub significant: bool,
    /// Still alive at the end of the observed range.
    pub essential: bool,
    pub birth_simplex: SimplexKey,
    pub death_simplex: Option<SimplexKey>,
}

impl PersistencePair {
    fn new(
        birth: &Simplex,
        death: Option<&Simplex>,
        max_epsilon: f64,
        config: &HomologyConfig,
    ) -> Self {
        let death_time = death.map_or(max_epsilon, Simplex::birth);
        let persistence = death_time - birth.birth();
        Self {
            dimension: birth.dimension(),
            birth: birth.birth(),
            death: death_time,
            persistence,
            significant: persistence > config.min_persistence,
            essential: death.is_none(),
            birth_simplex: birth.key().clone(),
            death_simplex: death.map(|s| s.key().clone()),
        }
    }

    /// Whether the class is alive at filtration value `epsilon`.
    ///
    /// Essential classes are alive through `max_epsilon` inclusive.
    pub fn is_alive_at(&self, epsilon: f64) -> bool {
        self.birth <= epsilon && (epsilon < self.death || self.essential)
    }
}

/// Persistence pairs partitioned by dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersistenceDiagram {
    /// Connected components.
    pub dim0: Vec<PersistencePair>,
    /// Loops and holes.
    pub dim1: Vec<PersistencePair>,
    /// Voids. Always finite; see the module docs.
    pub dim2: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    fn push(&mut self, pair: PersistencePair) {
        match pair.dimension {
            0 => self.dim0.push(pair),
            1 => self.dim1.push(pair),
            _ => self.dim2.push(pair),
        }
    }

    /// Pairs of one dimension; empty above dimension 2.
    pub fn dimension(&self, dimension: usize) -> &[PersistencePair] {
        match dimension {
            0 => &self.dim0,
            1 => &self.dim1,
            2 => &self.dim2,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersistencePair> {
        self.dim0.iter().chain(self.dim1.iter()).chain(self.dim2.iter())
    }

    pub fn len(&self) -> usize {
        self.dim0.len() + self.dim1.len() + self.dim2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Significant pairs of one dimension.
    pub fn significant(&self, dimension: usize) -> impl Iterator<Item = &PersistencePair> {
        self.dimension(dimension).iter().filter(|p| p.significant)
    }

    /// Number of classes alive at `epsilon`, per dimension.
    pub fn betti_at(&self, epsilon: f64) -> BettiNumbers {
        let alive = |pairs: &[PersistencePair]| {
            pairs.iter().filter(|p| p.is_alive_at(epsilon)).count()
        };
        BettiNumbers::new(alive(&self.dim0), alive(&self.dim1), alive(&self.dim2))
    }
}

/// Aggregate statistics for one dimension of a diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DimensionSummary {
    pub total: usize,
    pub finite: usize,
    pub essential: usize,
    /// Finite pairs with nonzero persistence.
    pub positive: usize,
    pub significant: usize,
    /// Finite pairs with nonzero persistence below `noise_threshold`.
    pub noise: usize,
    pub max_persistence: f64,
    /// Sum over finite pairs.
    pub total_persistence: f64,
    /// Shannon entropy of the finite, nonzero persistences.
    pub entropy: f64,
}

impl DimensionSummary {
    fn from_pairs(pairs: &[PersistencePair], config: &HomologyConfig) -> Self {
        let finite: Vec<f64> = pairs
            .iter()
            .filter(|p| !p.essential)
            .map(|p| p.persistence)
            .collect();
        let total_persistence: f64 = finite.iter().sum();

        let mut entropy = 0.0;
        if total_persistence > 0.0 {
            for &p in finite.iter().filter(|&&p| p > PERSISTENCE_EPSILON) {
                let prob = p / total_persistence;
                entropy -= prob * prob.ln();
            }
        }

        Self {
            total: pairs.len(),
            finite: finite.len(),
            essential: pairs.len() - finite.len(),
            positive: finite.iter().filter(|&&p| p > PERSISTENCE_EPSILON).count(),
            significant: pairs.iter().filter(|p| p.significant).count(),
            noise: finite
                .iter()
                .filter(|&&p| p > PERSISTENCE_EPSILON && p < config.noise_threshold)
                .count(),
            max_persistence: pairs.iter().map(|p| p.persistence).fold(0.0, f64::max),
            total_persistence,
            entropy,
        }
    }
}

/// Diagram-wide summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistenceSummary {
    pub dim0: DimensionSummary,
    pub dim1: DimensionSummary,
    pub dim2: DimensionSummary,
    /// Number of simplices in the filtration.
    pub simplex_count: usize,
    pub max_epsilon: f64,
    /// Classes alive at `max_epsilon`.
    pub betti_at_max: BettiNumbers,
}

impl PersistenceSummary {
    pub fn dimension(&self, dimension: usize) -> Option<&DimensionSummary> {
        match dimension {
            0 => Some(&self.dim0),
            1 => Some(&self.dim1),
            2 => Some(&self.dim2),
            _ => None,
        }
    }
}

/// Betti numbers sampled at one filtration value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BettiSample {
    pub epsilon: f64,
    pub betti: BettiNumbers,
}

/// Betti numbers at evenly spaced filtration values from 0 to `max_epsilon`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BettiCurve {
    pub samples: Vec<BettiSample>,
}

impl BettiCurve {
    /// Samples `steps + 1` values `max_epsilon * s / steps`.
    pub fn from_diagram(diagram: &PersistenceDiagram, max_epsilon: f64, steps: usize) -> Self {
        let steps = steps.max(1);
        let samples = (0..=steps)
            .map(|s| {
                let epsilon = max_epsilon * s as f64 / steps as f64;
                BettiSample {
                    epsilon,
                    betti: diagram.betti_at(epsilon),
                }
            })
            .collect();
        Self { samples }
    }

    /// Area under the β₁ curve (trapezoidal rule).
    pub fn integrated_b1(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| (w[1].epsilon - w[0].epsilon) * (w[0].betti.b1 + w[1].betti.b1) as f64 / 2.0)
            .sum()
    }
}

/// Per-call options for [`compute_persistence`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersistenceOptions {
    /// End of the filtration range; half the bounding-box diagonal if `None`.
    pub max_epsilon: Option<f64>,
    /// Betti-curve sampling intervals; `config.filtration_steps` if `None`.
    pub steps: Option<usize>,
    pub config: HomologyConfig,
}

impl PersistenceOptions {
    pub fn with_max_epsilon(mut self, max_epsilon: f64) -> Self {
        self.max_epsilon = Some(max_epsilon);
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_config(mut self, config: HomologyConfig) -> Self {
        self.config = config;
        self
    }
}

/// Output of [`compute_persistence`].
#[derive(Debug, Clone, Serialize)]
pub struct PersistenceResult {
    pub diagram: PersistenceDiagram,
    pub summary: PersistenceSummary,
    pub betti_curve: BettiCurve,
    pub max_epsilon: f64,
}

/// Computes the persistence diagram of a point cloud's Rips filtration.
///
/// # Errors
/// `EmptyInput`, `NonFiniteCoordinate`, `InvalidEpsilon` for an explicit
/// non-positive range, `DegeneratePointCloud` when the default range would be
/// zero, plus every builder error (notably `ComplexTooLarge`).
pub fn compute_persistence(
    points: &[Point3<f64>],
    options: &PersistenceOptions,
) -> Result<PersistenceResult> {
    let config = match options.steps {
        Some(steps) => options.config.with_filtration_steps(steps),
        None => options.config,
    };
    config.validate()?;

    if points.is_empty() {
        return Err(Error::EmptyInput("point cloud"));
    }
    check_finite(points)?;

    let max_epsilon = match options.max_epsilon {
        Some(eps) if eps.is_finite() && eps > 0.0 => eps,
        Some(eps) => return Err(Error::InvalidEpsilon(eps)),
        None => {
            let half_diagonal = bounding_box_diagonal(points) / 2.0;
            if half_diagonal <= 0.0 {
                return Err(Error::DegeneratePointCloud);
            }
            half_diagonal
        }
    };

    let complex = build_rips_complex(points, max_epsilon, &config)?;
    persistence_of_complex(&complex, max_epsilon, &config)
}

/// Runs ordering, reduction and pair extraction on an already built complex.
///
/// `max_epsilon` closes the observed range and must not precede any birth in
/// the complex.
pub fn persistence_of_complex(
    complex: &SimplicialComplex,
    max_epsilon: f64,
    config: &HomologyConfig,
) -> Result<PersistenceResult> {
    config.validate()?;
    if !max_epsilon.is_finite() || max_epsilon <= 0.0 || max_epsilon < complex.max_birth() {
        return Err(Error::InvalidEpsilon(max_epsilon));
    }

    let filtration = Filtration::from_complex(complex)?;
    let reduction = reduce(filtration.boundary());
    let simplices = filtration.simplices();

    let mut diagram = PersistenceDiagram::default();
    let mut is_low = vec![false; simplices.len()];

    for (j, pivot) in reduction.pivots().iter().enumerate() {
        if let Some(i) = *pivot {
            is_low[i] = true;
            diagram.push(PersistencePair::new(
                &simplices[i],
                Some(&simplices[j]),
                max_epsilon,
                config,
            ));
        }
    }

    for (i, simplex) in simplices.iter().enumerate() {
        if simplex.dimension() < 2 && !is_low[i] && reduction.pivot(i).is_none() {
            diagram.push(PersistencePair::new(simplex, None, max_epsilon, config));
        }
    }

    let summary = PersistenceSummary {
        dim0: DimensionSummary::from_pairs(&diagram.dim0, config),
        dim1: DimensionSummary::from_pairs(&diagram.dim1, config),
        dim2: DimensionSummary::from_pairs(&diagram.dim2, config),
        simplex_count: simplices.len(),
        max_epsilon,
        betti_at_max: diagram.betti_at(max_epsilon),
    };
    let betti_curve = BettiCurve::from_diagram(&diagram, max_epsilon, config.filtration_steps);

    tracing::debug!(
        simplices = summary.simplex_count,
        pairs = diagram.len(),
        significant_loops = summary.dim1.significant,
        max_epsilon,
        "Computed persistence diagram"
    );

    Ok(PersistenceResult {
        diagram,
        summary,
        betti_curve,
        max_epsilon,
    })
}
