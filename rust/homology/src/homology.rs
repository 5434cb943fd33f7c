// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Betti numbers of a (non-filtered) complex via rank–nullity.
//!
//! - β₀ = |V| − rank ∂₁
//! - β₁ = (|E| − rank ∂₁) − rank ∂₂
//! - β₂ = |T| − rank ∂₂
//!
//! ## Scope of β₂
//!
//! No 3-simplices are modeled, so there is no ∂₃ and β₂ counts the 2-cycles of
//! the 2-skeleton. For a closed surface mesh that is exactly the number of
//! enclosed voids; a solid filled with tetrahedra is not representable here.

use serde::{Deserialize, Serialize};

use crate::boundary::boundary_matrix;
use crate::complex::{SimplexCounts, SimplicialComplex};
use crate::error::{Error, Result};
use crate::reduction::reduce;

/// Betti numbers β₀ (components), β₁ (loops) and β₂ (voids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BettiNumbers {
    pub b0: usize,
    pub b1: usize,
    pub b2: usize,
}

impl BettiNumbers {
    pub fn new(b0: usize, b1: usize, b2: usize) -> Self {
        Self { b0, b1, b2 }
    }

    /// βₖ, 0 above dimension 2.
    pub fn get(&self, dimension: usize) -> usize {
        match dimension {
            0 => self.b0,
            1 => self.b1,
            2 => self.b2,
            _ => 0,
        }
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// χ = β₀ − β₁ + β₂.
    pub fn euler_characteristic(&self) -> i64 {
        self.b0 as i64 - self.b1 as i64 + self.b2 as i64
    }
}

/// Ranks of the two boundary maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundaryRanks {
    pub rank_d1: usize,
    pub rank_d2: usize,
}

/// Output of [`compute_homology`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomologyResult {
    pub betti: BettiNumbers,
    pub euler_characteristic: i64,
    pub counts: SimplexCounts,
    pub ranks: BoundaryRanks,
}

/// Computes Betti numbers, ranks and the Euler characteristic of a complex.
///
/// The Euler characteristic from the Betti numbers is checked against
/// |V| − |E| + |T|; disagreement means the reduction is broken and is
/// reported as `EulerMismatch`.
pub fn compute_homology(complex: &SimplicialComplex) -> Result<HomologyResult> {
    let counts = complex.counts();

    let rank_d1 = if counts.edges > 0 {
        reduce(boundary_matrix(complex, 1)?.matrix()).rank()
    } else {
        0
    };
    let rank_d2 = if counts.triangles > 0 {
        reduce(boundary_matrix(complex, 2)?.matrix()).rank()
    } else {
        0
    };

    let betti = BettiNumbers {
        b0: counts.vertices - rank_d1,
        b1: counts.edges - rank_d1 - rank_d2,
        b2: counts.triangles - rank_d2,
    };

    let euler_characteristic = betti.euler_characteristic();
    let from_counts = counts.euler_characteristic();
    if euler_characteristic != from_counts {
        return Err(Error::EulerMismatch {
            homology: euler_characteristic,
            counts: from_counts,
        });
    }

    tracing::debug!(
        b0 = betti.b0,
        b1 = betti.b1,
        b2 = betti.b2,
        euler = euler_characteristic,
        "Computed homology"
    );

    Ok(HomologyResult {
        betti,
        euler_characteristic,
        counts,
        ranks: BoundaryRanks { rank_d1, rank_d2 },
    })
}
