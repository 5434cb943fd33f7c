// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature-count validation of manufactured parts.
//!
//! A part drawing states how many bodies, through holes and enclosed cavities
//! the part should have. These map onto β₀, β₁ and β₂ of the part's mesh.

use serde::{Deserialize, Serialize};
use topolite_homology::{
    build_complex_from_mesh, compute_homology, BettiNumbers, HomologyConfig, IndexedMesh,
};

use crate::error::Result;
use crate::report::Report;

/// Expected feature counts. `None` leaves a feature unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedFeatures {
    /// Through holes (β₁).
    pub holes: Option<usize>,
    /// Separate bodies (β₀).
    pub components: Option<usize>,
    /// Enclosed cavities (β₂).
    pub voids: Option<usize>,
}

impl ExpectedFeatures {
    pub fn with_holes(mut self, holes: usize) -> Self {
        self.holes = Some(holes);
        self
    }

    pub fn with_components(mut self, components: usize) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_voids(mut self, voids: usize) -> Self {
        self.voids = Some(voids);
        self
    }
}

/// Which feature a discrepancy concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Components,
    Holes,
    Voids,
}

impl Feature {
    fn name(self) -> &'static str {
        match self {
            Feature::Components => "components",
            Feature::Holes => "holes",
            Feature::Voids => "voids",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub feature: Feature,
    pub expected: usize,
    pub actual: usize,
}

/// Outcome of [`validate_features`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureValidation {
    /// True when every supplied expectation matched.
    pub valid: bool,
    pub betti: BettiNumbers,
    pub euler_characteristic: i64,
    pub discrepancies: Vec<Discrepancy>,
    pub recommendations: Vec<String>,
}

impl FeatureValidation {
    pub fn discrepancy(&self, feature: Feature) -> Option<&Discrepancy> {
        self.discrepancies.iter().find(|d| d.feature == feature)
    }
}

impl Report for FeatureValidation {}

/// Compares the topology of `mesh` against expected feature counts.
///
/// A mismatch makes the result invalid; it is not an error. Errors only come
/// from malformed meshes and resource limits.
pub fn validate_features(
    mesh: &IndexedMesh,
    expected: &ExpectedFeatures,
    config: &HomologyConfig,
) -> Result<FeatureValidation> {
    let complex = build_complex_from_mesh(mesh, config)?;
    let homology = compute_homology(&complex)?;
    let betti = homology.betti;

    let checks = [
        (Feature::Components, expected.components, betti.b0),
        (Feature::Holes, expected.holes, betti.b1),
        (Feature::Voids, expected.voids, betti.b2),
    ];
    let discrepancies: Vec<Discrepancy> = checks
        .into_iter()
        .filter_map(|(feature, expected, actual)| {
            expected
                .filter(|&e| e != actual)
                .map(|expected| Discrepancy {
                    feature,
                    expected,
                    actual,
                })
        })
        .collect();

    let recommendations = recommend(&betti, &discrepancies);
    let valid = discrepancies.is_empty();

    tracing::info!(
        valid,
        b0 = betti.b0,
        b1 = betti.b1,
        b2 = betti.b2,
        discrepancies = discrepancies.len(),
        "Feature validation complete"
    );

    Ok(FeatureValidation {
        valid,
        betti,
        euler_characteristic: homology.euler_characteristic,
        discrepancies,
        recommendations,
    })
}

fn recommend(betti: &BettiNumbers, discrepancies: &[Discrepancy]) -> Vec<String> {
    let mut out = Vec::new();

    if betti.b1 > 0 {
        out.push(format!(
            "{} through hole(s) detected: plan drilling or boring and verify hole positions",
            betti.b1
        ));
    }
    if betti.b2 > 0 {
        out.push(format!(
            "{} enclosed cavity(ies) detected: not machinable, consider additive or casting",
            betti.b2
        ));
    }
    if betti.b0 > 1 {
        out.push(format!(
            "{} separate bodies detected: confirm this is an assembly and not a broken part",
            betti.b0
        ));
    }

    for d in discrepancies {
        let advice = match (d.feature, d.actual > d.expected) {
            (Feature::Holes, true) => {
                "unexpected holes: check for gaps or missing faces in the mesh"
            }
            (Feature::Holes, false) => {
                "missing holes: check that through holes were not filled or capped"
            }
            (Feature::Components, true) => {
                "extra bodies: check for loose fragments or disconnected faces"
            }
            (Feature::Components, false) => {
                "fewer bodies than expected: check for parts fused together"
            }
            (Feature::Voids, true) => {
                "unexpected cavities: check for internal shells or trapped volumes"
            }
            (Feature::Voids, false) => "missing cavities: check that the enclosing shell is closed",
        };
        out.push(format!(
            "{}: expected {}, found {}; {}",
            d.feature, d.expected, d.actual, advice
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_square() -> IndexedMesh {
        IndexedMesh::from_planar(
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        )
    }

    #[test]
    fn matching_expectations_pass() {
        let expected = ExpectedFeatures::default().with_components(1).with_holes(0);
        let result =
            validate_features(&filled_square(), &expected, &HomologyConfig::default()).unwrap();
        assert!(result.valid);
        assert!(result.discrepancies.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn missing_hole_is_reported() {
        let expected = ExpectedFeatures::default().with_holes(1);
        let result =
            validate_features(&filled_square(), &expected, &HomologyConfig::default()).unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.discrepancy(Feature::Holes),
            Some(&Discrepancy {
                feature: Feature::Holes,
                expected: 1,
                actual: 0
            })
        );
        assert!(result.discrepancy(Feature::Components).is_none());
        assert!(result.recommendations.iter().any(|r| r.starts_with("holes: expected 1, found 0")));
    }

    #[test]
    fn unchecked_features_never_fail() {
        let result = validate_features(
            &filled_square(),
            &ExpectedFeatures::default(),
            &HomologyConfig::default(),
        )
        .unwrap();
        assert!(result.valid);
    }

    #[test]
    fn malformed_mesh_is_an_error() {
        let mesh = IndexedMesh::from_planar(&[[0.0, 0.0], [1.0, 0.0]], vec![vec![0, 1]]);
        let expected = ExpectedFeatures::default();
        assert!(validate_features(&mesh, &expected, &HomologyConfig::default()).is_err());
    }

    #[test]
    fn report_serializes() {
        let expected = ExpectedFeatures::default().with_holes(2);
        let result =
            validate_features(&filled_square(), &expected, &HomologyConfig::default()).unwrap();
        let json = result.to_json().unwrap();
        assert!(json.contains("\"feature\": \"holes\""));
        assert!(json.contains("\"valid\": false"));
    }
}
