// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed-solid checks on tessellated B-Rep models.
//!
//! A single closed shell bounding a solid without handles has χ = 2. Shell
//! closure and manifoldness come from edge usage: in a closed 2-manifold every
//! edge borders exactly two faces.

use rustc_hash::FxHashMap;
use serde::Serialize;
use topolite_homology::{
    build_complex_from_mesh, compute_homology, BettiNumbers, HomologyConfig, IndexedMesh,
    SimplexKey,
};

use crate::error::Result;
use crate::report::{Issue, Report, Severity};

/// Expected Euler characteristic of one simply connected closed shell.
pub const DEFAULT_EXPECTED_EULER: i64 = 2;

/// Outcome of [`validate_brep`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BRepValidation {
    /// No issue at warning level or above.
    pub valid: bool,
    pub euler_characteristic: i64,
    pub expected_euler: i64,
    pub betti: BettiNumbers,
    /// Edges bordering at most one face.
    pub boundary_edges: usize,
    /// Edges bordering more than two faces.
    pub non_manifold_edges: usize,
    pub issues: Vec<Issue>,
}

impl BRepValidation {
    pub fn is_closed_manifold(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    pub fn issues_at(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

impl Report for BRepValidation {}

/// Validates a B-Rep given as a face mesh.
///
/// `expected_euler` defaults to [`DEFAULT_EXPECTED_EULER`]. Multi-shell or
/// higher-genus models pass their own value; the shell count is not inferred.
pub fn validate_brep(
    model: &IndexedMesh,
    expected_euler: Option<i64>,
    config: &HomologyConfig,
) -> Result<BRepValidation> {
    let expected_euler = expected_euler.unwrap_or(DEFAULT_EXPECTED_EULER);

    // Builds first so face indices are known to be valid below.
    let complex = build_complex_from_mesh(model, config)?;
    let homology = compute_homology(&complex)?;
    let chi = homology.euler_characteristic;

    // Usage over the deduplicated triangles, so repeated or rewound faces
    // count once and polygons follow the builder's fan triangulation.
    let mut usage: FxHashMap<&SimplexKey, usize> =
        complex.edges().iter().map(|e| (e.key(), 0)).collect();
    for triangle in complex.triangles() {
        for face in triangle.faces() {
            if let Some(count) = usage.get_mut(&face) {
                *count += 1;
            }
        }
    }
    let boundary_edges = usage.values().filter(|&&n| n <= 1).count();
    let non_manifold_edges = usage.values().filter(|&&n| n > 2).count();

    let mut issues = Vec::new();
    if complex.triangles().is_empty() {
        issues.push(Issue::error("no surface: the model has no non-degenerate faces"));
    }
    if chi != expected_euler {
        issues.push(Issue::warning(format!(
            "Euler characteristic {chi} differs from expected {expected_euler}"
        )));
    }
    if boundary_edges > 0 {
        issues.push(Issue::warning(format!(
            "open shell: {boundary_edges} edge(s) border fewer than two faces"
        )));
    }
    if non_manifold_edges > 0 {
        issues.push(Issue::warning(format!(
            "non-manifold: {non_manifold_edges} edge(s) border more than two faces"
        )));
    }
    let closed_manifold =
        !complex.triangles().is_empty() && boundary_edges == 0 && non_manifold_edges == 0;
    if closed_manifold && homology.betti.b0 == 1 && chi % 2 == 0 {
        let genus = (2 - chi) / 2;
        issues.push(Issue::info(format!("closed shell of genus {genus}")));
    }

    let valid = issues.iter().all(|i| i.severity < Severity::Warning);

    tracing::info!(
        valid,
        euler = chi,
        expected_euler,
        boundary_edges,
        non_manifold_edges,
        "B-Rep validation complete"
    );

    Ok(BRepValidation {
        valid,
        euler_characteristic: chi,
        expected_euler,
        betti: homology.betti,
        boundary_edges,
        non_manifold_edges,
        issues,
    })
}
