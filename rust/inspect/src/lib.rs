// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Topolite Inspect
//!
//! Manufacturing and metrology checks built on `topolite-homology`:
//!
//! - [`validate_features`] compares a part mesh's bodies, through holes and
//!   cavities against the drawing.
//! - [`analyze_point_cloud`] finds holes in scan data and grades the scan.
//! - [`validate_brep`] checks that a tessellated solid is one closed shell.
//!
//! Each report derives `Serialize` and exports JSON through [`Report::to_json`].

pub mod brep;
pub mod error;
pub mod features;
pub mod point_cloud;
pub mod report;

pub use brep::{validate_brep, BRepValidation, DEFAULT_EXPECTED_EULER};
pub use error::{Error, Result};
pub use features::{validate_features, Discrepancy, ExpectedFeatures, Feature, FeatureValidation};
pub use point_cloud::{
    analyze_point_cloud, CloudQuality, Hole, HoleFeatures, PointCloudAnalysis, PointCloudOptions,
    QualityGrade,
};
pub use report::{Issue, Report, Severity};
