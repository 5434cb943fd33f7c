// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Complex construction from meshes and point clouds.
//!
//! Both builders validate their whole input before allocating the complex and
//! enforce `max_simplices` as a hard ceiling, so oversized requests fail with
//! `ComplexTooLarge` instead of running away in time or memory.

use nalgebra::Point3;

use crate::complex::SimplicialComplex;
use crate::config::HomologyConfig;
use crate::error::{Error, Result};
use crate::geometry::check_finite;
use crate::mesh::IndexedMesh;
use crate::simplex::{Simplex, SimplexKey, VertexId};

#[inline]
fn check_size(count: usize, limit: usize) -> Result<()> {
    if count > limit {
        return Err(Error::ComplexTooLarge { count, limit });
    }
    Ok(())
}

/// Builds the complex spanned by a mesh's faces.
///
/// Every mesh vertex is a 0-simplex at birth 0, including vertices no face
/// uses. A triangular face contributes its triangle and three edges, each
/// stored once under its canonical key, so winding and duplicate faces do not
/// change the result. Polygonal faces are fan-triangulated from their first
/// vertex. A face whose corners repeat a vertex contributes only its distinct
/// edges.
///
/// # Errors
/// `EmptyInput` without vertices, `MalformedFace` for faces with fewer than
/// three indices, `IndexOutOfRange` for indices past the vertex list, and
/// `ComplexTooLarge` past `config.max_simplices`.
pub fn build_complex_from_mesh(
    mesh: &IndexedMesh,
    config: &HomologyConfig,
) -> Result<SimplicialComplex> {
    config.validate()?;

    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 {
        return Err(Error::EmptyInput("mesh vertices"));
    }

    for (face, indices) in mesh.faces.iter().enumerate() {
        if indices.len() < 3 {
            return Err(Error::MalformedFace {
                face,
                len: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
            return Err(Error::IndexOutOfRange {
                face,
                index,
                vertex_count,
            });
        }
    }

    check_size(vertex_count, config.max_simplices)?;

    let mut complex = SimplicialComplex::new();
    for v in 0..vertex_count {
        complex.insert(Simplex::from_key(SimplexKey::vertex(v), 0.0));
    }

    if config.max_dimension >= 1 {
        let mut degenerate = 0usize;
        for indices in &mesh.faces {
            let anchor = indices[0];
            for pair in indices[1..].windows(2) {
                if !insert_mesh_triangle(&mut complex, [anchor, pair[0], pair[1]], config) {
                    degenerate += 1;
                }
            }
            check_size(complex.len(), config.max_simplices)?;
        }
        if degenerate > 0 {
            tracing::debug!(degenerate, "Collapsed faces with repeated corners to edges");
        }
    }

    let counts = complex.counts();
    tracing::debug!(
        vertices = counts.vertices,
        edges = counts.edges,
        triangles = counts.triangles,
        faces = mesh.face_count(),
        "Built mesh complex"
    );
    Ok(complex)
}

/// Inserts one triangle and its edges. Returns `false` when the corners are
/// not distinct, in which case only the distinct edges are stored.
fn insert_mesh_triangle(
    complex: &mut SimplicialComplex,
    [a, b, c]: [VertexId; 3],
    config: &HomologyConfig,
) -> bool {
    for (u, v) in [(a, b), (b, c), (a, c)] {
        if u != v {
            complex.insert(Simplex::from_key(SimplexKey::edge(u, v), 0.0));
        }
    }

    let distinct = a != b && b != c && a != c;
    if distinct && config.max_dimension >= 2 {
        complex.insert(Simplex::from_key(SimplexKey::triangle(a, b, c), 0.0));
    }
    distinct
}

/// Builds the Vietoris–Rips complex of a point cloud at scale `epsilon`.
///
/// Edge (i, j) is present with birth `d(i, j)` whenever `d(i, j) <= epsilon`.
/// Triangle (i, j, k) is present exactly when its three edges are, born at
/// the latest of their births. The input points are kept on the complex.
///
/// # Errors
/// `EmptyInput`, `InvalidEpsilon` for non-positive or non-finite `epsilon`,
/// `NonFiniteCoordinate`, and `ComplexTooLarge`. The size guard runs on the
/// vertex count, on every edge found during the distance pass and on every
/// triangle found during the clique pass, so memory never outgrows the limit.
pub fn build_rips_complex(
    points: &[Point3<f64>],
    epsilon: f64,
    config: &HomologyConfig,
) -> Result<SimplicialComplex> {
    config.validate()?;

    if points.is_empty() {
        return Err(Error::EmptyInput("point cloud"));
    }
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(Error::InvalidEpsilon(epsilon));
    }
    check_finite(points)?;

    let n = points.len();
    check_size(n, config.max_simplices)?;

    let mut complex = SimplicialComplex::with_points(points.to_vec());
    for v in 0..n {
        complex.insert(Simplex::from_key(SimplexKey::vertex(v), 0.0));
    }
    if config.max_dimension == 0 {
        return Ok(complex);
    }

    // Upper neighbours only (j > i), ascending, each with its edge length.
    // Storage stays proportional to the edges actually found.
    let mut neighbors: Vec<Vec<(VertexId, f64)>> = vec![Vec::new(); n];
    let mut edge_count = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = nalgebra::distance(&points[i], &points[j]);
            if d <= epsilon {
                neighbors[i].push((j, d));
                edge_count += 1;
                check_size(n + edge_count, config.max_simplices)?;
            }
        }
    }

    for (i, upper) in neighbors.iter().enumerate() {
        for &(j, d) in upper {
            complex.insert(Simplex::from_key(SimplexKey::edge(i, j), d));
        }
    }

    if config.max_dimension >= 2 {
        for (i, upper) in neighbors.iter().enumerate() {
            for &(j, d_ij) in upper {
                for &(k, d_jk) in &neighbors[j] {
                    let Ok(pos) = upper.binary_search_by_key(&k, |&(v, _)| v) else {
                        continue;
                    };
                    let birth = d_ij.max(d_jk).max(upper[pos].1);
                    complex.insert(Simplex::from_key(SimplexKey::triangle(i, j, k), birth));
                    check_size(complex.len(), config.max_simplices)?;
                }
            }
        }
    }

    let counts = complex.counts();
    tracing::debug!(
        points = n,
        epsilon,
        edges = counts.edges,
        triangles = counts.triangles,
        "Built Rips complex"
    );
    Ok(complex)
}
