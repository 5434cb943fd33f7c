// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Standard column reduction over GF(2).
//!
//! Columns are processed left to right. While the low (largest row index) of
//! column j equals the low of an earlier, already reduced column i, column i
//! is added into column j. Addition over GF(2) is the symmetric difference of
//! the two row sets. A column stops when its low is unique or it becomes zero.
//!
//! The same routine serves plain homology (rank of ∂ₖ) and persistence (pairs
//! read off the lows of the filtration-ordered boundary matrix). Pivots depend
//! only on the column order and contents: the lookup from low row to owning
//! column is a plain vector, so no hashing order can leak into the result.
//!
//! Reference: Edelsbrunner, Letscher, Zomorodian (2002), "Topological
//! Persistence and Simplification".

use crate::boundary::Z2Matrix;

/// Reduced form of a [`Z2Matrix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    columns: Vec<Vec<usize>>,
    pivots: Vec<Option<usize>>,
}

impl Reduction {
    /// `pivots[j]` is the settled low of column j, or `None` if it reduced
    /// to zero.
    pub fn pivots(&self) -> &[Option<usize>] {
        &self.pivots
    }

    pub fn pivot(&self, column: usize) -> Option<usize> {
        self.pivots.get(column).copied().flatten()
    }

    /// Rank of the matrix: the number of nonzero reduced columns.
    pub fn rank(&self) -> usize {
        self.pivots.iter().filter(|p| p.is_some()).count()
    }

    /// Dimension of the kernel: columns minus rank.
    pub fn nullity(&self) -> usize {
        self.pivots.len() - self.rank()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Sorted rows of reduced column `j`.
    pub fn column(&self, j: usize) -> Option<&[usize]> {
        self.columns.get(j).map(Vec::as_slice)
    }
}

/// Reduces `matrix` and records every column's pivot.
pub fn reduce(matrix: &Z2Matrix) -> Reduction {
    let mut columns = matrix.columns().to_vec();
    let mut owner: Vec<Option<usize>> = vec![None; matrix.row_count()];
    let mut pivots = Vec::with_capacity(columns.len());
    let mut additions = 0usize;

    for j in 0..columns.len() {
        while let Some(&low) = columns[j].last() {
            let Some(i) = owner[low] else { break };
            let (reduced, rest) = columns.split_at_mut(j);
            xor_into(&mut rest[0], &reduced[i]);
            additions += 1;
        }

        let low = columns[j].last().copied();
        if let Some(row) = low {
            owner[row] = Some(j);
        }
        pivots.push(low);
    }

    let reduction = Reduction { columns, pivots };
    tracing::debug!(
        columns = reduction.column_count(),
        rank = reduction.rank(),
        additions,
        "Reduced boundary matrix"
    );
    reduction
}

/// `target ← target ⊕ other` for sorted row lists.
fn xor_into(target: &mut Vec<usize>, other: &[usize]) {
    let mut merged = Vec::with_capacity(target.len() + other.len());
    let (mut a, mut b) = (0, 0);
    while a < target.len() && b < other.len() {
        match target[a].cmp(&other[b]) {
            std::cmp::Ordering::Less => {
                merged.push(target[a]);
                a += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(other[b]);
                b += 1;
            }
            std::cmp::Ordering::Equal => {
                a += 1;
                b += 1;
            }
        }
    }
    merged.extend_from_slice(&target[a..]);
    merged.extend_from_slice(&other[b..]);
    *target = merged;
}
