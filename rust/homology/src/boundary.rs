// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sparse boundary matrices over GF(2).
//!
//! [`Z2Matrix`] stores each column as the sorted set of rows holding a 1.
//! There are no coefficients and no signs: adding a row twice cancels it. The
//! type exists so that nothing downstream can mistake these matrices for
//! integer boundary maps with orientation.

use rustc_hash::FxHashMap;

use crate::complex::SimplicialComplex;
use crate::error::{Error, Result};
use crate::simplex::SimplexKey;

/// Sparse column-major matrix over the two-element field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Z2Matrix {
    rows: usize,
    columns: Vec<Vec<usize>>,
}

impl Z2Matrix {
    /// Creates a matrix with `rows` rows and no columns.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: Vec::new(),
        }
    }

    /// Builds a matrix column by column. See [`Z2Matrix::push_column`].
    pub fn from_columns<C, I>(rows: usize, columns: C) -> Result<Self>
    where
        C: IntoIterator<Item = I>,
        I: IntoIterator<Item = usize>,
    {
        let mut matrix = Self::new(rows);
        for column in columns {
            matrix.push_column(column)?;
        }
        Ok(matrix)
    }

    /// Appends a column holding the given rows and returns its index.
    ///
    /// Rows may come in any order; a row listed an even number of times
    /// cancels out.
    pub fn push_column(&mut self, rows: impl IntoIterator<Item = usize>) -> Result<usize> {
        let mut column: Vec<usize> = rows.into_iter().collect();
        if let Some(&row) = column.iter().find(|&&r| r >= self.rows) {
            return Err(Error::RowOutOfRange {
                row,
                rows: self.rows,
            });
        }
        column.sort_unstable();

        // Drop pairs of equal rows (x + x = 0).
        let mut reduced = Vec::with_capacity(column.len());
        for row in column {
            if reduced.last() == Some(&row) {
                reduced.pop();
            } else {
                reduced.push(row);
            }
        }

        self.columns.push(reduced);
        Ok(self.columns.len() - 1)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Sorted nonzero rows of column `j`.
    pub fn column(&self, j: usize) -> Option<&[usize]> {
        self.columns.get(j).map(Vec::as_slice)
    }

    pub(crate) fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    /// Nonzero entries as `(row, column)`, column by column.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .flat_map(|(j, rows)| rows.iter().map(move |&i| (i, j)))
    }

    /// Number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}

/// The boundary map ∂ₖ: Cₖ → Cₖ₋₁ of a complex.
///
/// Row `i` is the (k−1)-simplex at position `i` of the complex's storage,
/// column `j` the k-simplex at position `j`.
#[derive(Debug, Clone)]
pub struct BoundaryMatrix {
    dimension: usize,
    matrix: Z2Matrix,
}

impl BoundaryMatrix {
    /// Dimension k of the simplices indexing the columns.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn row_count(&self) -> usize {
        self.matrix.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.matrix.column_count()
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matrix.entries()
    }

    pub fn matrix(&self) -> &Z2Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Z2Matrix {
        self.matrix
    }
}

/// Builds ∂ₖ for `k` in {1, 2}.
///
/// The complex must be closed under taking faces, which every builder
/// guarantees; a face missing from the complex contributes no entry.
pub fn boundary_matrix(complex: &SimplicialComplex, k: usize) -> Result<BoundaryMatrix> {
    if !(1..=2).contains(&k) {
        return Err(Error::UnsupportedDimension(k));
    }

    let faces = complex.simplices(k - 1);
    let row_of: FxHashMap<&SimplexKey, usize> = faces
        .iter()
        .enumerate()
        .map(|(i, s)| (s.key(), i))
        .collect();

    let mut matrix = Z2Matrix::new(faces.len());
    for simplex in complex.simplices(k) {
        let rows: Vec<usize> = simplex
            .faces()
            .filter_map(|face| row_of.get(&face).copied())
            .collect();
        matrix.push_column(rows)?;
    }

    tracing::debug!(
        dimension = k,
        rows = matrix.row_count(),
        columns = matrix.column_count(),
        nnz = matrix.nnz(),
        "Built boundary matrix"
    );
    Ok(BoundaryMatrix {
        dimension: k,
        matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::build_complex_from_mesh;
    use crate::config::HomologyConfig;
    use crate::mesh::IndexedMesh;

    #[test]
    fn push_column_cancels_pairs() {
        let mut m = Z2Matrix::new(5);
        m.push_column([3, 1, 3, 4]).unwrap();
        assert_eq!(m.column(0), Some(&[1, 4][..]));
        assert_eq!(m.nnz(), 2);
    }

    #[test]
    fn push_column_rejects_row_out_of_range() {
        let mut m = Z2Matrix::new(2);
        assert!(matches!(
            m.push_column([0, 2]),
            Err(Error::RowOutOfRange { row: 2, rows: 2 })
        ));
        assert_eq!(m.column_count(), 0);
    }

    #[test]
    fn entries_are_column_major() {
        let m = Z2Matrix::from_columns(3, vec![vec![0, 2], vec![], vec![1]]).unwrap();
        let entries: Vec<_> = m.entries().collect();
        assert_eq!(entries, vec![(0, 0), (2, 0), (1, 2)]);
        assert!(!m.is_zero());
    }

    #[test]
    fn triangle_boundaries() {
        let mesh = IndexedMesh::from_planar(
            &[[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]],
            vec![vec![0, 1, 2]],
        );
        let complex = build_complex_from_mesh(&mesh, &HomologyConfig::default()).unwrap();

        let d1 = boundary_matrix(&complex, 1).unwrap();
        assert_eq!((d1.row_count(), d1.column_count()), (3, 3));
        // Every edge has exactly two endpoints.
        for j in 0..3 {
            assert_eq!(d1.matrix().column(j).unwrap().len(), 2);
        }

        let d2 = boundary_matrix(&complex, 2).unwrap();
        assert_eq!((d2.row_count(), d2.column_count()), (3, 1));
        assert_eq!(d2.matrix().column(0), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn boundary_of_boundary_vanishes() {
        let mesh = IndexedMesh::from_planar(
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        );
        let complex = build_complex_from_mesh(&mesh, &HomologyConfig::default()).unwrap();
        let d1 = boundary_matrix(&complex, 1).unwrap();
        let d2 = boundary_matrix(&complex, 2).unwrap();

        for j in 0..d2.column_count() {
            let mut parity = vec![0u8; d1.row_count()];
            for &edge in d2.matrix().column(j).unwrap() {
                for &v in d1.matrix().column(edge).unwrap() {
                    parity[v] ^= 1;
                }
            }
            assert!(parity.iter().all(|&p| p == 0));
        }
    }

    #[test]
    fn rejects_unsupported_dimensions() {
        let complex = SimplicialComplex::default();
        assert!(matches!(boundary_matrix(&complex, 0), Err(Error::UnsupportedDimension(0))));
        assert!(matches!(boundary_matrix(&complex, 3), Err(Error::UnsupportedDimension(3))));
    }
}
