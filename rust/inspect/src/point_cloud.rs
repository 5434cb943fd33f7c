// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hole detection in scanned point clouds.
//!
//! Loops of the Rips filtration are ranked by persistence relative to the
//! filtration range. A hole that survives a large share of the range is a real
//! opening in the scanned part; one that flickers in and out is sampling noise.

use nalgebra::Point3;
use serde::Serialize;
use topolite_homology::{
    circumcircle, compute_persistence, HomologyConfig, PersistenceOptions, PersistencePair,
    PersistenceResult, PERSISTENCE_EPSILON,
};

use crate::error::{Error, Result};
use crate::report::Report;

/// Relative persistence above which a hole is definite.
pub const DEFINITE_THRESHOLD: f64 = 0.3;

/// Relative persistence above which a hole is probable.
pub const PROBABLE_THRESHOLD: f64 = 0.1;

/// Clouds with fewer points than this are graded sparse.
pub const MIN_POINTS: usize = 8;

/// Noise ratio above which a cloud is graded noisy.
pub const MAX_NOISE_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCloudOptions {
    /// End of the filtration range; half the bounding-box diagonal if `None`.
    pub max_epsilon: Option<f64>,
    pub steps: Option<usize>,
    pub definite_threshold: f64,
    pub probable_threshold: f64,
    pub config: HomologyConfig,
}

impl Default for PointCloudOptions {
    fn default() -> Self {
        Self {
            max_epsilon: None,
            steps: None,
            definite_threshold: DEFINITE_THRESHOLD,
            probable_threshold: PROBABLE_THRESHOLD,
            config: HomologyConfig::default(),
        }
    }
}

impl PointCloudOptions {
    pub fn with_max_epsilon(mut self, max_epsilon: f64) -> Self {
        self.max_epsilon = Some(max_epsilon);
        self
    }

    pub fn with_thresholds(mut self, definite: f64, probable: f64) -> Self {
        self.definite_threshold = definite;
        self.probable_threshold = probable;
        self
    }

    pub fn with_config(mut self, config: HomologyConfig) -> Self {
        self.config = config;
        self
    }

    fn validate(&self) -> Result<()> {
        let (definite, probable) = (self.definite_threshold, self.probable_threshold);
        let ordered = probable >= 0.0 && probable < definite;
        if !(definite.is_finite() && probable.is_finite() && ordered) {
            return Err(Error::InvalidThresholds(format!(
                "definite {definite}, probable {probable}"
            )));
        }
        Ok(())
    }
}

/// One dimension-1 feature of the scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hole {
    pub birth: f64,
    pub death: f64,
    pub persistence: f64,
    /// `persistence / max_epsilon`.
    pub relative_persistence: f64,
    pub essential: bool,
    /// Circumcenter of the triangle that filled the hole.
    pub center: Option<[f64; 3]>,
    pub radius: Option<f64>,
}

impl Hole {
    fn from_pair(pair: &PersistencePair, points: &[Point3<f64>], max_epsilon: f64) -> Self {
        let circle = pair
            .death_simplex
            .as_ref()
            .filter(|key| key.dimension() == 2)
            .and_then(|key| {
                let v = key.vertices();
                circumcircle(points.get(v[0])?, points.get(v[1])?, points.get(v[2])?)
            });

        Self {
            birth: pair.birth,
            death: pair.death,
            persistence: pair.persistence,
            relative_persistence: pair.persistence / max_epsilon,
            essential: pair.essential,
            center: circle.map(|(c, _)| [c.x, c.y, c.z]),
            radius: circle.map(|(_, r)| r),
        }
    }
}

/// Holes bucketed by relative persistence, each bucket ordered by
/// persistence descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HoleFeatures {
    pub definite_holes: Vec<Hole>,
    pub probable_holes: Vec<Hole>,
    /// Short-lived loops, most of them sampling noise.
    pub possible_holes: Vec<Hole>,
}

impl HoleFeatures {
    pub fn total(&self) -> usize {
        self.definite_holes.len() + self.probable_holes.len() + self.possible_holes.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Clean,
    Noisy,
    /// Too few points, or the cloud is still disconnected at the end of the range.
    Sparse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudQuality {
    pub point_count: usize,
    pub simplex_count: usize,
    pub max_epsilon: f64,
    /// Noise loops over finite loops with nonzero persistence; 0 without any.
    pub noise_ratio: f64,
    /// Significant components and loops.
    pub significant_features: usize,
    pub grade: QualityGrade,
}

/// Outcome of [`analyze_point_cloud`].
#[derive(Debug, Clone, Serialize)]
pub struct PointCloudAnalysis {
    pub persistence: PersistenceResult,
    pub features: HoleFeatures,
    pub quality: CloudQuality,
}

impl Report for PointCloudAnalysis {}

/// Detects holes in a scanned point cloud and grades the scan.
pub fn analyze_point_cloud(
    points: &[Point3<f64>],
    options: &PointCloudOptions,
) -> Result<PointCloudAnalysis> {
    options.validate()?;

    let persistence = compute_persistence(
        points,
        &PersistenceOptions {
            max_epsilon: options.max_epsilon,
            steps: options.steps,
            config: options.config,
        },
    )?;
    let max_epsilon = persistence.max_epsilon;

    let mut holes: Vec<Hole> = persistence
        .diagram
        .dim1
        .iter()
        .filter(|p| p.persistence > PERSISTENCE_EPSILON)
        .map(|p| Hole::from_pair(p, points, max_epsilon))
        .collect();
    holes.sort_by(|a, b| b.persistence.total_cmp(&a.persistence));

    let mut features = HoleFeatures::default();
    for hole in holes {
        if hole.relative_persistence > options.definite_threshold {
            features.definite_holes.push(hole);
        } else if hole.relative_persistence > options.probable_threshold {
            features.probable_holes.push(hole);
        } else {
            features.possible_holes.push(hole);
        }
    }

    let summary = &persistence.summary;
    let noise_ratio = if summary.dim1.positive > 0 {
        summary.dim1.noise as f64 / summary.dim1.positive as f64
    } else {
        0.0
    };
    let quality = CloudQuality {
        point_count: points.len(),
        simplex_count: summary.simplex_count,
        max_epsilon,
        noise_ratio,
        significant_features: summary.dim0.significant + summary.dim1.significant,
        grade: grade(points.len(), summary.betti_at_max.b0, noise_ratio),
    };

    tracing::info!(
        points = points.len(),
        definite = features.definite_holes.len(),
        probable = features.probable_holes.len(),
        possible = features.possible_holes.len(),
        grade = ?quality.grade,
        "Point cloud analysis complete"
    );

    Ok(PointCloudAnalysis {
        persistence,
        features,
        quality,
    })
}

fn grade(point_count: usize, components_at_max: usize, noise_ratio: f64) -> QualityGrade {
    if point_count < MIN_POINTS || components_at_max > 1 {
        QualityGrade::Sparse
    } else if noise_ratio > MAX_NOISE_RATIO {
        QualityGrade::Noisy
    } else {
        QualityGrade::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn circle(n: usize, radius: f64, center: [f64; 2]) -> Vec<Point3<f64>> {
        (0..n)
            .map(|i| {
                let t = TAU * i as f64 / n as f64;
                Point3::new(center[0] + radius * t.cos(), center[1] + radius * t.sin(), 0.0)
            })
            .collect()
    }

    #[test]
    fn ring_scan_has_one_definite_hole() {
        let pts = circle(24, 1.0, [3.0, -2.0]);
        let analysis =
            analyze_point_cloud(&pts, &PointCloudOptions::default().with_max_epsilon(2.0)).unwrap();
        let definite = &analysis.features.definite_holes;
        assert_eq!(definite.len(), 1);
        assert!(analysis.features.probable_holes.is_empty());

        let hole = &definite[0];
        assert!(!hole.essential);
        let center = hole.center.unwrap();
        assert_relative_eq!(center[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(center[1], -2.0, epsilon = 1e-9);
        assert_relative_eq!(hole.radius.unwrap(), 1.0, epsilon = 1e-9);
        assert_eq!(analysis.quality.grade, QualityGrade::Clean);
    }

    #[test]
    fn open_hole_has_no_center() {
        // The default range stops before the ring fills in.
        let pts = circle(24, 1.0, [0.0, 0.0]);
        let analysis = analyze_point_cloud(&pts, &PointCloudOptions::default()).unwrap();
        let hole = &analysis.features.definite_holes[0];
        assert!(hole.essential);
        assert!(hole.center.is_none());
        assert!(hole.radius.is_none());
    }

    #[test]
    fn collinear_scan_has_no_holes() {
        let pts: Vec<Point3<f64>> = (0..10).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let analysis =
            analyze_point_cloud(&pts, &PointCloudOptions::default().with_max_epsilon(3.0)).unwrap();
        assert_eq!(analysis.features.total(), 0);
    }

    #[test]
    fn thresholds_must_be_ordered() {
        let pts = circle(8, 1.0, [0.0, 0.0]);
        let options = PointCloudOptions::default().with_thresholds(0.1, 0.3);
        assert!(matches!(
            analyze_point_cloud(&pts, &options),
            Err(Error::InvalidThresholds(_))
        ));
    }

    #[test]
    fn tiny_ring_grades_noisy() {
        // Radius 0.04: the only real loop persists about 0.043, under the
        // default noise threshold of 0.05.
        let pts = circle(8, 0.04, [0.0, 0.0]);
        let analysis =
            analyze_point_cloud(&pts, &PointCloudOptions::default().with_max_epsilon(0.1)).unwrap();
        let summary = &analysis.persistence.summary;
        assert_eq!(summary.dim1.noise, 1);
        assert_eq!(summary.dim1.positive, 1);
        assert!(summary.dim1.finite > summary.dim1.positive);
        assert_relative_eq!(analysis.quality.noise_ratio, 1.0);
        assert_eq!(analysis.quality.grade, QualityGrade::Noisy);

        // Lowering the threshold under the loop's persistence clears it.
        let strict = PointCloudOptions::default()
            .with_max_epsilon(0.1)
            .with_config(HomologyConfig::default().with_noise_threshold(0.04));
        let analysis = analyze_point_cloud(&pts, &strict).unwrap();
        assert_eq!(analysis.persistence.summary.dim1.noise, 0);
        assert_eq!(analysis.quality.grade, QualityGrade::Clean);
    }

    #[test]
    fn truncation_voids_do_not_count_as_features() {
        let pts = circle(30, 5.0, [0.0, 0.0]);
        let options = PointCloudOptions::default().with_max_epsilon(10.0);
        let analysis = analyze_point_cloud(&pts, &options).unwrap();
        let summary = &analysis.persistence.summary;
        assert_eq!(summary.dim2.total, 0);
        assert_eq!(analysis.features.definite_holes.len(), 1);
        // 29 merges, the surviving component and the ring.
        assert_eq!(summary.dim0.significant, 30);
        assert_eq!(summary.dim1.significant, 1);
        assert_eq!(analysis.quality.significant_features, 31);
    }

    #[test]
    fn grading() {
        assert_eq!(grade(3, 1, 0.0), QualityGrade::Sparse);
        assert_eq!(grade(100, 2, 0.0), QualityGrade::Sparse);
        assert_eq!(grade(100, 1, 0.8), QualityGrade::Noisy);
        assert_eq!(grade(100, 1, 0.1), QualityGrade::Clean);
    }
}
