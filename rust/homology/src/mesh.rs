// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indexed polygon mesh input.

use nalgebra::Point3;

/// Polygon mesh given as vertex positions and faces of vertex indices.
///
/// Faces have at least three indices. Index validity is checked when the mesh
/// is turned into a complex, not here.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Vec<usize>>,
}

impl IndexedMesh {
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from triangle index triples.
    pub fn from_triangles(vertices: Vec<Point3<f64>>, triangles: &[[usize; 3]]) -> Self {
        Self {
            vertices,
            faces: triangles.iter().map(|t| t.to_vec()).collect(),
        }
    }

    /// Create a mesh from planar vertices (z = 0).
    pub fn from_planar(vertices: &[[f64; 2]], faces: Vec<Vec<usize>>) -> Self {
        Self {
            vertices: crate::geometry::lift_2d(vertices),
            faces,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
