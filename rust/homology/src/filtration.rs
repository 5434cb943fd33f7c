// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global chronological ordering of a complex's simplices.
//!
//! Simplices are sorted by (birth ascending, dimension ascending, key
//! ascending). The dimension tie-break puts every face before its cofaces
//! whenever they share a birth time, which the reduction needs; the key
//! tie-break makes the order total, so the same complex always yields the
//! same filtration.

use rustc_hash::FxHashMap;

use crate::boundary::Z2Matrix;
use crate::complex::SimplicialComplex;
use crate::error::Result;
use crate::simplex::{Simplex, SimplexKey};

/// Filtration-ordered simplices and their unified boundary matrix.
///
/// Column j of the boundary matrix is the boundary of simplex j, expressed as
/// indices into the same global order; the matrix is square and spans all
/// dimensions at once.
#[derive(Debug, Clone)]
pub struct Filtration {
    simplices: Vec<Simplex>,
    boundary: Z2Matrix,
}

impl Filtration {
    pub fn from_complex(complex: &SimplicialComplex) -> Result<Self> {
        let mut simplices: Vec<Simplex> = complex.iter().cloned().collect();
        simplices.sort_by(|a, b| {
            a.birth()
                .total_cmp(&b.birth())
                .then(a.dimension().cmp(&b.dimension()))
                .then_with(|| a.key().cmp(b.key()))
        });

        let boundary = {
            let position: FxHashMap<&SimplexKey, usize> = simplices
                .iter()
                .enumerate()
                .map(|(i, s)| (s.key(), i))
                .collect();

            let mut boundary = Z2Matrix::new(simplices.len());
            for (j, simplex) in simplices.iter().enumerate() {
                let rows: Vec<usize> = simplex
                    .faces()
                    .filter_map(|face| position.get(&face).copied())
                    .collect();
                debug_assert!(rows.iter().all(|&i| i < j), "face ordered after coface");
                boundary.push_column(rows)?;
            }
            boundary
        };

        tracing::debug!(
            simplices = simplices.len(),
            nnz = boundary.nnz(),
            "Built filtration"
        );
        Ok(Self {
            simplices,
            boundary,
        })
    }

    /// Simplices in filtration order.
    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    pub fn simplex(&self, index: usize) -> Option<&Simplex> {
        self.simplices.get(index)
    }

    pub fn boundary(&self) -> &Z2Matrix {
        &self.boundary
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::build_rips_complex;
    use crate::config::HomologyConfig;
    use crate::geometry::lift_2d;

    #[test]
    fn faces_precede_cofaces() {
        let pts = lift_2d(&[[0.0, 0.0], [1.0, 0.0], [0.5, 0.8], [2.0, 2.0]]);
        let complex = build_rips_complex(&pts, 3.0, &HomologyConfig::default()).unwrap();
        let filtration = Filtration::from_complex(&complex).unwrap();
        assert_eq!(filtration.len(), complex.len());

        for (j, simplex) in filtration.simplices().iter().enumerate() {
            let rows = filtration.boundary().column(j).unwrap();
            let expected = match simplex.dimension() {
                0 => 0,
                d => d + 1,
            };
            assert_eq!(rows.len(), expected);
            assert!(rows.iter().all(|&i| i < j));
        }
    }

    #[test]
    fn order_is_by_birth_then_dimension() {
        // Equilateral triangle: edges and the triangle share birth 1.
        let pts = lift_2d(&[[0.0, 0.0], [1.0, 0.0], [0.5, 3.0_f64.sqrt() / 2.0]]);
        let complex = build_rips_complex(&pts, 2.0, &HomologyConfig::default()).unwrap();
        let filtration = Filtration::from_complex(&complex).unwrap();
        let dims: Vec<usize> = filtration.simplices().iter().map(Simplex::dimension).collect();
        assert_eq!(dims, vec![0, 0, 0, 1, 1, 1, 2]);

        let births: Vec<f64> = filtration.simplices().iter().map(Simplex::birth).collect();
        assert!(births.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ordering_is_repeatable() {
        let pts = lift_2d(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let complex = build_rips_complex(&pts, 1.5, &HomologyConfig::default()).unwrap();
        let a = Filtration::from_complex(&complex).unwrap();
        let b = Filtration::from_complex(&complex).unwrap();
        let keys_a: Vec<_> = a.simplices().iter().map(|s| s.key().clone()).collect();
        let keys_b: Vec<_> = b.simplices().iter().map(|s| s.key().clone()).collect();
        assert_eq!(keys_a, keys_b);
        assert_eq!(a.boundary(), b.boundary());
    }
}
