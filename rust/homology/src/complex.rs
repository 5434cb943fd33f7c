// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storage for a 2-dimensional simplicial complex.
//!
//! The [`SimplicialComplex`] owns three disjoint collections (vertices, edges
//! and triangles) in insertion order, plus a key index used for membership
//! tests and birth-time lookups. Storage order is significant: boundary matrix
//! rows and columns follow it.
//!
//! Complexes are produced by the builders in [`crate::builders`] and are
//! read-only afterwards. Every builder guarantees closure (each face of a
//! stored simplex is stored too) and filtration monotonicity (a face is never
//! born after its coface).

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::simplex::{Simplex, SimplexKey};

/// Number of simplices per dimension (the f-vector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimplexCounts {
    pub vertices: usize,
    pub edges: usize,
    pub triangles: usize,
}

impl SimplexCounts {
    /// Number of simplices of the given dimension; 0 above dimension 2.
    pub fn count(&self, dimension: usize) -> usize {
        match dimension {
            0 => self.vertices,
            1 => self.edges,
            2 => self.triangles,
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.vertices + self.edges + self.triangles
    }

    /// χ = |V| − |E| + |T|.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.triangles as i64
    }
}

/// An immutable simplicial complex of dimension at most 2.
#[derive(Debug, Clone, Default)]
pub struct SimplicialComplex {
    vertices: Vec<Simplex>,
    edges: Vec<Simplex>,
    triangles: Vec<Simplex>,
    /// key → (dimension, position within that dimension's collection)
    index: FxHashMap<SimplexKey, (usize, usize)>,
    /// Originating coordinates, kept for Rips complexes only.
    points: Option<Vec<Point3<f64>>>,
}

impl SimplicialComplex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_points(points: Vec<Point3<f64>>) -> Self {
        Self {
            points: Some(points),
            ..Self::default()
        }
    }

    /// Stores a simplex unless one with the same key is already present.
    ///
    /// Returns `true` if the simplex was added.
    pub(crate) fn insert(&mut self, simplex: Simplex) -> bool {
        if self.index.contains_key(simplex.key()) {
            return false;
        }
        let dimension = simplex.dimension();
        let bucket = match dimension {
            0 => &mut self.vertices,
            1 => &mut self.edges,
            _ => &mut self.triangles,
        };
        self.index
            .insert(simplex.key().clone(), (dimension, bucket.len()));
        bucket.push(simplex);
        true
    }

    pub fn vertices(&self) -> &[Simplex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Simplex] {
        &self.edges
    }

    pub fn triangles(&self) -> &[Simplex] {
        &self.triangles
    }

    /// Simplices of one dimension in storage order. Empty above dimension 2.
    pub fn simplices(&self, dimension: usize) -> &[Simplex] {
        match dimension {
            0 => &self.vertices,
            1 => &self.edges,
            2 => &self.triangles,
            _ => &[],
        }
    }

    /// All simplices, vertices first, then edges, then triangles.
    pub fn iter(&self) -> impl Iterator<Item = &Simplex> {
        self.vertices
            .iter()
            .chain(self.edges.iter())
            .chain(self.triangles.iter())
    }

    pub fn contains(&self, key: &SimplexKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &SimplexKey) -> Option<&Simplex> {
        let &(dimension, position) = self.index.get(key)?;
        self.simplices(dimension).get(position)
    }

    /// Position of a simplex within its dimension's collection.
    pub fn index_of(&self, key: &SimplexKey) -> Option<usize> {
        self.index.get(key).map(|&(_, position)| position)
    }

    pub fn birth_of(&self, key: &SimplexKey) -> Option<f64> {
        self.get(key).map(Simplex::birth)
    }

    pub fn counts(&self) -> SimplexCounts {
        SimplexCounts {
            vertices: self.vertices.len(),
            edges: self.edges.len(),
            triangles: self.triangles.len(),
        }
    }

    /// Total number of simplices across all dimensions.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Highest dimension with at least one simplex, or `None` when empty.
    pub fn dimension(&self) -> Option<usize> {
        (0..=2).rev().find(|&d| !self.simplices(d).is_empty())
    }

    /// Coordinates of the points a Rips complex was built from.
    pub fn points(&self) -> Option<&[Point3<f64>]> {
        self.points.as_deref()
    }

    /// Largest filtration value in the complex (0 for an empty complex).
    pub fn max_birth(&self) -> f64 {
        self.iter().map(Simplex::birth).fold(0.0, f64::max)
    }

    /// χ from raw counts: |V| − |E| + |T|.
    pub fn euler_characteristic(&self) -> i64 {
        self.counts().euler_characteristic()
    }
}
