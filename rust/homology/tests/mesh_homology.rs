// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Betti numbers of reference meshes and Rips complexes.

use std::f64::consts::TAU;

use topolite_homology::{
    build_complex_from_mesh, build_rips_complex, compute_homology, lift_2d, Error,
    HomologyConfig, IndexedMesh, Point3, SimplicialComplex,
};

fn complex_of(mesh: &IndexedMesh) -> SimplicialComplex {
    build_complex_from_mesh(mesh, &HomologyConfig::default()).unwrap()
}

fn filled_square() -> IndexedMesh {
    IndexedMesh::from_planar(
        &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        vec![vec![0, 1, 2], vec![0, 2, 3]],
    )
}

/// 4x4 vertex grid with the middle cell left open, as quad faces.
fn hollow_square() -> IndexedMesh {
    let mut vertices = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            vertices.push([x as f64, y as f64]);
        }
    }
    let mut faces = Vec::new();
    for y in 0..3 {
        for x in 0..3 {
            if (x, y) == (1, 1) {
                continue;
            }
            let v = y * 4 + x;
            faces.push(vec![v, v + 1, v + 5, v + 4]);
        }
    }
    IndexedMesh::from_planar(&vertices, faces)
}

fn octahedron() -> IndexedMesh {
    IndexedMesh::from_triangles(
        vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ],
        &[[0, 2, 4], [2, 1, 4], [1, 3, 4], [3, 0, 4], [2, 0, 5], [1, 2, 5], [3, 1, 5], [0, 3, 5]],
    )
}

/// Triangulated torus on an `n x m` grid with wrap-around in both directions.
fn torus(n: usize, m: usize) -> IndexedMesh {
    let (major, minor) = (2.0, 0.5);
    let mut vertices = Vec::with_capacity(n * m);
    for i in 0..n {
        let u = TAU * i as f64 / n as f64;
        for j in 0..m {
            let v = TAU * j as f64 / m as f64;
            vertices.push(Point3::new(
                (major + minor * v.cos()) * u.cos(),
                (major + minor * v.cos()) * u.sin(),
                minor * v.sin(),
            ));
        }
    }
    let id = |i: usize, j: usize| (i % n) * m + (j % m);
    let mut triangles = Vec::with_capacity(2 * n * m);
    for i in 0..n {
        for j in 0..m {
            let (a, b, c, d) = (id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1));
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }
    IndexedMesh::from_triangles(vertices, &triangles)
}

#[test]
fn filled_triangle_is_contractible() {
    let mesh = IndexedMesh::from_planar(&[[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]], vec![vec![0, 1, 2]]);
    let h = compute_homology(&complex_of(&mesh)).unwrap();
    assert_eq!(h.betti.as_array(), [1, 0, 0]);
    assert_eq!(h.euler_characteristic, 1);
}

#[test]
fn filled_square_has_no_hole() {
    let h = compute_homology(&complex_of(&filled_square())).unwrap();
    assert_eq!(h.betti.b0, 1);
    assert_eq!(h.betti.b1, 0);
}

#[test]
fn hollow_square_has_one_hole() {
    let complex = complex_of(&hollow_square());
    let h = compute_homology(&complex).unwrap();
    assert_eq!(h.betti.as_array(), [1, 1, 0]);
    assert_eq!(h.euler_characteristic, 0);
    // 8 quads, two triangles each.
    assert_eq!(h.counts.triangles, 16);
}

#[test]
fn octahedron_surface_encloses_one_void() {
    let h = compute_homology(&complex_of(&octahedron())).unwrap();
    assert_eq!(h.counts.vertices, 6);
    assert_eq!(h.counts.edges, 12);
    assert_eq!(h.counts.triangles, 8);
    assert_eq!(h.betti.as_array(), [1, 0, 1]);
    assert_eq!(h.euler_characteristic, 2);
}

#[test]
fn torus_has_two_loops_and_a_void() {
    let h = compute_homology(&complex_of(&torus(4, 4))).unwrap();
    assert_eq!(h.counts.vertices, 16);
    assert_eq!(h.counts.edges, 48);
    assert_eq!(h.counts.triangles, 32);
    assert_eq!(h.betti.as_array(), [1, 2, 1]);
    assert_eq!(h.euler_characteristic, 0);
}

#[test]
fn disjoint_bodies_add_components() {
    let mut mesh = octahedron();
    let offset = mesh.vertices.len();
    let shifted: Vec<Point3<f64>> = mesh
        .vertices
        .iter()
        .map(|p| Point3::new(p.x + 10.0, p.y, p.z))
        .collect();
    let faces: Vec<Vec<usize>> = mesh
        .faces
        .iter()
        .map(|f| f.iter().map(|&i| i + offset).collect())
        .collect();
    mesh.vertices.extend(shifted);
    mesh.faces.extend(faces);

    let h = compute_homology(&complex_of(&mesh)).unwrap();
    assert_eq!(h.betti.as_array(), [2, 0, 2]);
}

#[test]
fn euler_identity_holds_everywhere() {
    let meshes = [filled_square(), hollow_square(), octahedron(), torus(5, 3)];
    for mesh in &meshes {
        let h = compute_homology(&complex_of(mesh)).unwrap();
        assert_eq!(h.euler_characteristic, h.counts.euler_characteristic());
        assert_eq!(
            h.betti.b0 as i64 - h.betti.b1 as i64 + h.betti.b2 as i64,
            h.counts.vertices as i64 - h.counts.edges as i64 + h.counts.triangles as i64
        );
    }
}

#[test]
fn homology_is_deterministic() {
    let complex = complex_of(&torus(4, 5));
    let first = compute_homology(&complex).unwrap();
    for _ in 0..3 {
        assert_eq!(compute_homology(&complex).unwrap(), first);
    }
}

#[test]
fn components_never_increase_with_epsilon() {
    let pts = lift_2d(&[
        [0.0, 0.0],
        [0.4, 0.1],
        [1.3, 0.2],
        [2.5, 0.0],
        [2.6, 1.1],
        [1.1, 2.0],
        [0.2, 1.4],
        [4.0, 4.0],
        [3.8, 3.1],
    ]);
    let config = HomologyConfig::default();
    let mut previous = usize::MAX;
    for step in 1..=12 {
        let epsilon = 0.5 * step as f64;
        let complex = build_rips_complex(&pts, epsilon, &config).unwrap();
        let h = compute_homology(&complex).unwrap();
        assert!(h.betti.b0 <= previous, "b0 rose at epsilon {epsilon}");
        assert_eq!(h.euler_characteristic, h.counts.euler_characteristic());
        previous = h.betti.b0;
    }
    assert_eq!(previous, 1);
}

#[test]
fn equilateral_rips_clique() {
    let pts = lift_2d(&[[0.0, 0.0], [1.0, 0.0], [0.5, 3.0_f64.sqrt() / 2.0]]);
    let complex = build_rips_complex(&pts, 2.0, &HomologyConfig::default()).unwrap();
    let counts = complex.counts();
    assert_eq!((counts.vertices, counts.edges, counts.triangles), (3, 3, 1));
}

#[test]
fn out_of_range_face_index_is_rejected() {
    let mesh = IndexedMesh::from_planar(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], vec![vec![0, 1, 7]]);
    assert!(matches!(
        build_complex_from_mesh(&mesh, &HomologyConfig::default()),
        Err(Error::IndexOutOfRange { face: 0, index: 7, vertex_count: 3 })
    ));
}

#[test]
fn oversized_rips_request_is_refused() {
    let pts: Vec<Point3<f64>> = (0..30).map(|i| Point3::new(i as f64 * 0.01, 0.0, 0.0)).collect();
    let config = HomologyConfig::default().with_max_simplices(100);
    assert!(matches!(
        build_rips_complex(&pts, 10.0, &config),
        Err(Error::ComplexTooLarge { limit: 100, .. })
    ));
}

#[test]
fn dimension_three_is_unsupported() {
    let config = HomologyConfig::default().with_max_dimension(3);
    assert!(matches!(
        build_complex_from_mesh(&octahedron(), &config),
        Err(Error::UnsupportedDimension(3))
    ));
}
