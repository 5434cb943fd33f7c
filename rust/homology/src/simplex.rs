// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertices, edges and triangles as immutable sorted vertex sets.
//!
//! A [`SimplexKey`] is the canonical identity of a simplex: its vertex ids in
//! strictly ascending order. Two simplices are equal exactly when their keys
//! are equal, regardless of the order the vertices were supplied in or of
//! their filtration values.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::MAX_DIMENSION;
use crate::error::{Error, Result};

/// Index of a vertex in the owning mesh or point cloud.
pub type VertexId = usize;

/// Canonical sorted vertex list identifying a simplex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimplexKey(SmallVec<[VertexId; 3]>);

impl SimplexKey {
    /// Builds a key from vertices in any order.
    ///
    /// Fails on an empty list, a repeated vertex, or more than three vertices.
    pub fn new(vertices: impl IntoIterator<Item = VertexId>) -> Result<Self> {
        let mut verts: SmallVec<[VertexId; 3]> = vertices.into_iter().collect();
        if verts.is_empty() {
            return Err(Error::EmptyInput("simplex vertices"));
        }
        verts.sort_unstable();
        if verts.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::DegenerateSimplex(verts.to_vec()));
        }
        if verts.len() > MAX_DIMENSION + 1 {
            return Err(Error::UnsupportedDimension(verts.len() - 1));
        }
        Ok(Self(verts))
    }

    /// Key of a single vertex.
    pub fn vertex(v: VertexId) -> Self {
        let mut verts = SmallVec::new();
        verts.push(v);
        Self(verts)
    }

    /// Key of the edge between two distinct vertices, in either order.
    pub(crate) fn edge(a: VertexId, b: VertexId) -> Self {
        debug_assert_ne!(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Self(SmallVec::from_slice(&[lo, hi]))
    }

    /// Key of the triangle on three distinct vertices, in any order.
    pub(crate) fn triangle(a: VertexId, b: VertexId, c: VertexId) -> Self {
        let mut verts = [a, b, c];
        verts.sort_unstable();
        debug_assert!(verts[0] != verts[1] && verts[1] != verts[2]);
        Self(SmallVec::from_buf(verts))
    }

    /// The sorted vertex ids.
    pub fn vertices(&self) -> &[VertexId] {
        &self.0
    }

    /// Dimension: number of vertices minus one.
    pub fn dimension(&self) -> usize {
        self.0.len() - 1
    }

    /// Keys of the codimension-one faces, obtained by deleting each vertex
    /// position in turn. A vertex has no faces.
    pub fn faces(&self) -> impl Iterator<Item = SimplexKey> + '_ {
        let n = if self.0.len() > 1 { self.0.len() } else { 0 };
        (0..n).map(move |skip| {
            SimplexKey(
                self.0
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &v)| v)
                    .collect(),
            )
        })
    }
}

impl fmt::Display for SimplexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A simplex together with its filtration value.
///
/// The birth time is 0 for mesh-derived simplices and a distance for
/// point-cloud-derived ones. Equality and hashing ignore it.
#[derive(Debug, Clone, Serialize)]
pub struct Simplex {
    key: SimplexKey,
    birth: f64,
}

impl Simplex {
    /// Creates a simplex from unsorted vertices and a birth time.
    pub fn new(vertices: impl IntoIterator<Item = VertexId>, birth: f64) -> Result<Self> {
        if !birth.is_finite() || birth < 0.0 {
            return Err(Error::InvalidEpsilon(birth));
        }
        Ok(Self {
            key: SimplexKey::new(vertices)?,
            birth,
        })
    }

    pub(crate) fn from_key(key: SimplexKey, birth: f64) -> Self {
        Self { key, birth }
    }

    pub fn key(&self) -> &SimplexKey {
        &self.key
    }

    pub fn vertices(&self) -> &[VertexId] {
        self.key.vertices()
    }

    pub fn dimension(&self) -> usize {
        self.key.dimension()
    }

    /// Filtration value at which the simplex appears.
    pub fn birth(&self) -> f64 {
        self.birth
    }

    pub fn faces(&self) -> impl Iterator<Item = SimplexKey> + '_ {
        self.key.faces()
    }
}

impl PartialEq for Simplex {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Simplex {}

impl Hash for Simplex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
